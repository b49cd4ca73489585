//! Projection of a parsed statement into display fields, plus exports.
//!
//! The display model is capped (first [`MAX_DISPLAYED_TRANSACTIONS`]
//! rows); exports always serialize the full document as received.

use serde_json::Value;

use crate::config::MAX_DISPLAYED_TRANSACTIONS;
use crate::format::{format_amount, format_date, NOT_AVAILABLE};
use crate::types::{ParseResult, StatementData, Transaction};

/// Colour family of a key data point card. Styling only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Accent {
    Indigo,
    Purple,
    Blue,
    Orange,
    Red,
}

impl Accent {
    pub fn css_class(&self) -> &'static str {
        match self {
            Accent::Indigo => "accent-indigo",
            Accent::Purple => "accent-purple",
            Accent::Blue => "accent-blue",
            Accent::Orange => "accent-orange",
            Accent::Red => "accent-red",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Accent::Indigo | Accent::Purple => "💳",
            Accent::Blue | Accent::Orange => "📅",
            Accent::Red => "💰",
        }
    }
}

/// One of the five headline cards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataPoint {
    pub label: &'static str,
    pub value: String,
    pub accent: Accent,
    pub highlight: bool,
}

/// A label/value pair in the additional information block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabeledValue {
    pub label: &'static str,
    pub value: String,
}

/// A formatted transaction row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionRow {
    pub date: String,
    pub description: String,
    pub amount: String,
}

/// Everything the results view renders.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayModel {
    /// Issuer used in the success header
    pub headline: String,
    pub key_data_points: Vec<DataPoint>,
    /// `None` when the statement has no credit limit, available credit
    /// or minimum due at all
    pub additional_info: Option<Vec<LabeledValue>>,
    /// First rows only, in received order
    pub transactions: Vec<TransactionRow>,
    pub total_transactions: usize,
    /// Rows not shown
    pub remaining: usize,
    pub export: StatementExport,
}

impl DisplayModel {
    /// "Showing 10 of 15 transactions (5 more)" when truncated.
    pub fn overflow_label(&self) -> Option<String> {
        (self.remaining > 0).then(|| {
            format!(
                "Showing {} of {} transactions ({} more)",
                self.transactions.len(),
                self.total_transactions,
                self.remaining
            )
        })
    }
}

/// Derive the display model from a parse result.
pub fn project(result: &ParseResult) -> DisplayModel {
    let statement = &result.statement;
    let all = statement.transactions();

    let transactions: Vec<TransactionRow> = all
        .iter()
        .take(MAX_DISPLAYED_TRANSACTIONS)
        .map(transaction_row)
        .collect();

    DisplayModel {
        headline: statement
            .issuer_name
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "your".to_string()),
        key_data_points: key_data_points(statement),
        additional_info: additional_info(statement),
        total_transactions: all.len(),
        remaining: all.len().saturating_sub(transactions.len()),
        transactions,
        export: StatementExport::new(result),
    }
}

fn key_data_points(statement: &StatementData) -> Vec<DataPoint> {
    let card_number = statement
        .card_last_four_digits
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(|digits| format!("•••• {}", digits))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let card_variant = statement
        .card_variant
        .clone()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    vec![
        DataPoint { label: "Card Number", value: card_number, accent: Accent::Indigo, highlight: false },
        DataPoint { label: "Card Type", value: card_variant, accent: Accent::Purple, highlight: false },
        DataPoint {
            label: "Statement Date",
            value: format_date(statement.statement_date.as_deref()),
            accent: Accent::Blue,
            highlight: false,
        },
        DataPoint {
            label: "Payment Due Date",
            value: format_date(statement.payment_due_date.as_deref()),
            accent: Accent::Orange,
            highlight: false,
        },
        DataPoint {
            label: "Total Amount Due",
            value: format_amount(statement.total_amount_due.as_ref()),
            accent: Accent::Red,
            highlight: true,
        },
    ]
}

fn additional_info(statement: &StatementData) -> Option<Vec<LabeledValue>> {
    let any_present = statement.credit_limit.is_some()
        || statement.available_credit.is_some()
        || statement.minimum_amount_due.is_some();
    if !any_present {
        return None;
    }

    Some(vec![
        LabeledValue { label: "Credit Limit", value: format_amount(statement.credit_limit.as_ref()) },
        LabeledValue { label: "Available Credit", value: format_amount(statement.available_credit.as_ref()) },
        LabeledValue { label: "Minimum Payment", value: format_amount(statement.minimum_amount_due.as_ref()) },
    ])
}

fn transaction_row(txn: &Transaction) -> TransactionRow {
    let description = [&txn.description, &txn.merchant_name]
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
        .cloned()
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    TransactionRow {
        date: format_date(txn.effective_date()),
        description,
        amount: format_amount(txn.amount.as_ref()),
    }
}

// =============================================================================
// Export
// =============================================================================

/// A file ready to hand to the browser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadableFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub contents: String,
}

/// Lossless exports of the full parse response.
#[derive(Clone, Debug, PartialEq)]
pub struct StatementExport {
    raw: Value,
    issuer: Option<String>,
}

impl StatementExport {
    pub fn new(result: &ParseResult) -> Self {
        Self {
            raw: result.raw.clone(),
            issuer: result.statement.issuer_name.clone(),
        }
    }

    /// Pretty-printed JSON of the complete document, untruncated.
    pub fn to_json(&self) -> String {
        // Value serialization cannot fail: keys are always strings
        serde_json::to_string_pretty(&self.raw).unwrap_or_else(|_| self.raw.to_string())
    }

    pub fn to_clipboard_text(&self) -> String {
        self.to_json()
    }

    pub fn to_downloadable_file(&self, file_name: impl Into<String>) -> DownloadableFile {
        DownloadableFile {
            file_name: file_name.into(),
            mime_type: "application/json",
            contents: self.to_json(),
        }
    }

    /// Default download name for this statement at `unix_millis`.
    pub fn default_file_name(&self, unix_millis: u64) -> String {
        download_file_name(self.issuer.as_deref(), unix_millis)
    }
}

/// `statement-{issuer}-{millis}.json`, issuer reduced to `[a-z0-9-]`.
pub fn download_file_name(issuer: Option<&str>, unix_millis: u64) -> String {
    let slug = issuer
        .map(|name| {
            name.trim()
                .to_lowercase()
                .split(|c: char| !c.is_ascii_alphanumeric())
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join("-")
        })
        .filter(|slug| !slug.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    format!("statement-{}-{}.json", slug, unix_millis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn statement_with_transactions(count: usize) -> ParseResult {
        let transactions: Vec<Value> = (0..count)
            .map(|i| {
                json!({
                    "transactionDate": format!("2025-10-{:02}", i + 1),
                    "description": format!("Purchase #{}", i + 1),
                    "amount": 100.0 + i as f64,
                    "type": "DEBIT"
                })
            })
            .collect();

        ParseResult::from_value(json!({
            "issuerName": "HDFC Bank",
            "cardHolderName": "Test User",
            "cardLastFourDigits": "5678",
            "cardVariant": "Regalia",
            "statementDate": "2025-10-14",
            "paymentDueDate": "2025-11-01",
            "totalAmountDue": 4500.5,
            "creditLimit": 200000,
            "availableCredit": "195499.50",
            "minimumAmountDue": 500,
            "transactions": transactions
        }))
        .unwrap()
    }

    #[test]
    fn test_key_data_points() {
        let model = project(&statement_with_transactions(1));
        let labels: Vec<_> = model.key_data_points.iter().map(|p| p.label).collect();
        assert_eq!(
            labels,
            vec!["Card Number", "Card Type", "Statement Date", "Payment Due Date", "Total Amount Due"]
        );

        let values: Vec<_> = model.key_data_points.iter().map(|p| p.value.as_str()).collect();
        assert_eq!(values, vec!["•••• 5678", "Regalia", "14 Oct 2025", "01 Nov 2025", "₹4,500.50"]);

        let highlighted: Vec<_> = model.key_data_points.iter().filter(|p| p.highlight).collect();
        assert_eq!(highlighted.len(), 1);
        assert_eq!(highlighted[0].accent, Accent::Red);
        assert_eq!(model.headline, "HDFC Bank");
    }

    #[test]
    fn test_missing_fields_render_placeholders() {
        let result = ParseResult::from_value(json!({})).unwrap();
        let model = project(&result);

        let values: Vec<_> = model.key_data_points.iter().map(|p| p.value.as_str()).collect();
        assert_eq!(values, vec!["N/A", "N/A", "N/A", "N/A", "₹0.00"]);
        assert_eq!(model.headline, "your");
        assert!(model.additional_info.is_none());
        assert!(model.transactions.is_empty());
        assert_eq!(model.overflow_label(), None);
    }

    #[test]
    fn test_additional_info_when_any_field_present() {
        let model = project(&statement_with_transactions(0));
        let info = model.additional_info.expect("additional info");
        assert_eq!(info.len(), 3);
        assert_eq!(info[0].value, "₹2,00,000.00");
        assert_eq!(info[1].value, "₹1,95,499.50");
        assert_eq!(info[2].value, "₹500.00");

        let only_minimum = ParseResult::from_value(json!({ "minimumAmountDue": 250 })).unwrap();
        let info = project(&only_minimum).additional_info.expect("additional info");
        assert_eq!(info[0].value, "₹0.00");
        assert_eq!(info[2].value, "₹250.00");
    }

    #[test]
    fn test_transactions_truncated_to_ten() {
        let result = statement_with_transactions(15);
        let model = project(&result);

        assert_eq!(model.transactions.len(), 10);
        assert_eq!(model.total_transactions, 15);
        assert_eq!(model.remaining, 5);
        assert_eq!(
            model.overflow_label().as_deref(),
            Some("Showing 10 of 15 transactions (5 more)")
        );

        let exported: Value = serde_json::from_str(&model.export.to_json()).unwrap();
        assert_eq!(exported["transactions"].as_array().unwrap().len(), 15);
    }

    #[test]
    fn test_transactions_keep_received_order() {
        let result = ParseResult::from_value(json!({
            "transactions": [
                { "transactionDate": "2025-10-10", "description": "Later", "amount": 1 },
                { "transactionDate": "2025-09-01", "description": "Earlier", "amount": 2 },
                { "transactionDate": "2025-10-01", "merchantName": "Merchant Only", "amount": 3 },
                { "transactionDate": null, "description": "  ", "amount": null }
            ]
        }))
        .unwrap();

        let rows = project(&result).transactions;
        let descriptions: Vec<_> = rows.iter().map(|r| r.description.as_str()).collect();
        assert_eq!(descriptions, vec!["Later", "Earlier", "Merchant Only", "N/A"]);
        assert_eq!(rows[0].date, "10 Oct 2025");
        assert_eq!(rows[3].date, "N/A");
        assert_eq!(rows[3].amount, "₹0.00");
    }

    #[test]
    fn test_export_round_trip_is_lossless() {
        let mut raw = statement_with_transactions(12).raw;
        raw["unknownField"] = json!({ "nested": [1, 2, 3] });
        let result = ParseResult::from_value(raw.clone()).unwrap();

        let export = project(&result).export;
        let parsed: Value = serde_json::from_str(&export.to_json()).unwrap();
        assert_eq!(parsed, raw);
        assert_eq!(export.to_clipboard_text(), export.to_json());

        let file = export.to_downloadable_file("statement.json");
        assert_eq!(file.file_name, "statement.json");
        assert_eq!(file.mime_type, "application/json");
        assert_eq!(file.contents, export.to_json());
    }

    #[test]
    fn test_download_file_name() {
        assert_eq!(
            download_file_name(Some("HDFC Bank"), 1_730_000_000_000),
            "statement-hdfc-bank-1730000000000.json"
        );
        assert_eq!(download_file_name(None, 42), "statement-unknown-42.json");
        assert_eq!(download_file_name(Some("  "), 42), "statement-unknown-42.json");

        let export = project(&statement_with_transactions(0)).export;
        assert_eq!(export.default_file_name(7), "statement-hdfc-bank-7.json");
    }
}
