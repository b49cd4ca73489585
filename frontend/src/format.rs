//! Display formatting for amounts, dates and file sizes.
//!
//! All functions are total: malformed input degrades to a placeholder or
//! is echoed back, never a panic.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::types::Amount;

pub const CURRENCY_SYMBOL: &str = "₹";
pub const NOT_AVAILABLE: &str = "N/A";

const DISPLAY_DATE_FORMAT: &str = "%d %b %Y";
const BYTE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Format an amount in rupees with two decimals and en-IN grouping.
///
/// ```
/// use statement_lens_web::format::format_amount;
/// use statement_lens_web::Amount;
///
/// assert_eq!(format_amount(None), "₹0.00");
/// assert_eq!(format_amount(Some(&Amount::Number(4500.5))), "₹4,500.50");
/// ```
pub fn format_amount(amount: Option<&Amount>) -> String {
    let Some(amount) = amount else {
        return format!("{}0.00", CURRENCY_SYMBOL);
    };

    match amount.as_f64() {
        Some(value) => format!("{}{}", CURRENCY_SYMBOL, group_decimal(value)),
        None => match amount {
            Amount::Number(n) => format!("{}{}", CURRENCY_SYMBOL, n),
            Amount::Text(raw) => format!("{}{}", CURRENCY_SYMBOL, raw),
        },
    }
}

/// Two fixed decimals, integer part grouped the Indian way
/// (last three digits, then pairs): 123456.78 -> "1,23,456.78".
fn group_decimal(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let negative = value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');

    let grouped = if int_part.len() <= 3 {
        int_part.to_string()
    } else {
        let (head, tail) = int_part.split_at(int_part.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };

    format!("{}{}.{}", if negative { "-" } else { "" }, grouped, frac_part)
}

/// Format a date as `DD Mon YYYY` (`01 Nov 2025`).
///
/// Missing or blank input gives `N/A`. Input that is not a recognized
/// date is returned unchanged.
pub fn format_date(value: Option<&str>) -> String {
    let Some(raw) = value else {
        return NOT_AVAILABLE.to_string();
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return NOT_AVAILABLE.to_string();
    }

    match parse_date(trimmed) {
        Some(date) => date.format(DISPLAY_DATE_FORMAT).to_string(),
        None => raw.to_string(),
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.date_naive());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(datetime.date());
    }
    ["%d/%m/%Y", DISPLAY_DATE_FORMAT]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// Human readable file size: `0 Bytes`, `512 Bytes`, `1.5 KB`, `2.25 MB`.
pub fn format_byte_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, BYTE_UNITS[unit])
}

/// Shorten text to `max_chars` characters, appending `...` when cut.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount_basics() {
        assert_eq!(format_amount(None), "₹0.00");
        assert_eq!(format_amount(Some(&Amount::Number(4500.5))), "₹4,500.50");
        assert_eq!(format_amount(Some(&Amount::from("890.5"))), "₹890.50");
        assert_eq!(format_amount(Some(&Amount::Number(0.0))), "₹0.00");
        assert_eq!(format_amount(Some(&Amount::Number(999.999))), "₹1,000.00");
    }

    #[test]
    fn test_format_amount_indian_grouping() {
        assert_eq!(format_amount(Some(&Amount::Number(123456.78))), "₹1,23,456.78");
        assert_eq!(format_amount(Some(&Amount::Number(10000000.0))), "₹1,00,00,000.00");
        assert_eq!(format_amount(Some(&Amount::from("1,250.00"))), "₹1,250.00");
    }

    #[test]
    fn test_format_amount_negative() {
        assert_eq!(format_amount(Some(&Amount::Number(-5000.0))), "₹-5,000.00");
        assert_eq!(format_amount(Some(&Amount::Number(-0.001))), "₹0.00");
    }

    #[test]
    fn test_format_amount_unparsable_falls_back_to_raw() {
        assert_eq!(format_amount(Some(&Amount::from("abc"))), "₹abc");
        assert_eq!(format_amount(Some(&Amount::from(""))), "₹");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(None), "N/A");
        assert_eq!(format_date(Some("")), "N/A");
        assert_eq!(format_date(Some("2025-11-01")), "01 Nov 2025");
        assert_eq!(format_date(Some("2025-09-15T10:30:00Z")), "15 Sep 2025");
        assert_eq!(format_date(Some("2025-09-15T10:30:00")), "15 Sep 2025");
        assert_eq!(format_date(Some("14/10/2025")), "14 Oct 2025");
    }

    #[test]
    fn test_format_date_echoes_unparsable() {
        assert_eq!(format_date(Some("sometime soon")), "sometime soon");
        assert_eq!(format_date(Some("2025-13-45")), "2025-13-45");
    }

    #[test]
    fn test_format_date_is_idempotent() {
        let once = format_date(Some("2025-11-01"));
        assert_eq!(format_date(Some("2025-11-01")), once);
        assert_eq!(format_date(Some(&once)), once);
    }

    #[test]
    fn test_format_byte_size() {
        assert_eq!(format_byte_size(0), "0 Bytes");
        assert_eq!(format_byte_size(512), "512 Bytes");
        assert_eq!(format_byte_size(1024), "1 KB");
        assert_eq!(format_byte_size(1536), "1.5 KB");
        assert_eq!(format_byte_size(10 * 1024 * 1024), "10 MB");
        assert_eq!(format_byte_size(1_234_567), "1.18 MB");
        assert_eq!(format_byte_size(3 * 1024 * 1024 * 1024), "3 GB");
        assert_eq!(format_byte_size(2048 * 1024 * 1024 * 1024), "2048 GB");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short.pdf", 50), "short.pdf");
        assert_eq!(truncate_text("abcdef", 3), "abc...");
        assert_eq!(truncate_text("₹₹₹₹", 2), "₹₹...");
    }
}
