//! Fixture statements served in place of real PDF extraction.
//!
//! The first five transactions reproduce the reference October 2025
//! statement (card ending 5678, ₹4,500.50 due on 1 Nov 2025). Larger
//! fixtures repeat the same merchants one billing cycle further back,
//! which is enough to exercise the client's "showing 10 of N" view.

use std::fs;
use std::path::Path;

use chrono::{Days, NaiveDate};

use crate::error::{FixtureError, FixtureResult};
use crate::models::{Issuer, StatementData, Transaction, TransactionType};

pub const FIXTURE_CARD_LAST_FOUR: &str = "5678";
pub const FIXTURE_CARD_HOLDER: &str = "JPC-12 Developer";
pub const FIXTURE_CREDIT_LIMIT: f64 = 200_000.0;

/// Floor for the minimum amount due on a non-zero balance.
const MINIMUM_DUE_FLOOR: f64 = 500.0;
const MINIMUM_DUE_RATE: f64 = 0.05;
const DAYS_UNTIL_DUE: u64 = 18;
const CYCLE_DAYS: u64 = 30;

/// (days before statement date, description, merchant, amount, type)
const CATALOGUE: [(u64, &str, &str, f64, TransactionType); 5] = [
    (4, "Amazon.in Purchase", "Amazon", 1250.00, TransactionType::Debit),
    (9, "Grocery Store Payment", "FreshMart", 890.50, TransactionType::Debit),
    (14, "Online Subscription Fee", "StreamPlus", 150.00, TransactionType::Debit),
    (19, "Credit Card Payment", "Payment Received", 5000.00, TransactionType::Credit),
    (27, "Restaurant Dinner", "Spice Route", 2210.00, TransactionType::Debit),
];

/// Closing date of the reference statement.
pub fn default_statement_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 14).unwrap_or_default()
}

/// Build a fixture for `issuer` with `transactions` lines, closing on the
/// reference statement date.
pub fn fixture_statement(issuer: Issuer, transactions: usize) -> StatementData {
    fixture_statement_on(issuer, transactions, default_statement_date())
}

/// Build a fixture closing on `statement_date`.
///
/// The amount due is the sum of debits and fees; credits are payments
/// against the previous balance and do not reduce it.
pub fn fixture_statement_on(issuer: Issuer, transactions: usize, statement_date: NaiveDate) -> StatementData {
    let lines: Vec<Transaction> = (0..transactions)
        .map(|i| catalogue_entry(i, statement_date))
        .collect();

    let total = round2(
        lines
            .iter()
            .filter(|t| t.kind != TransactionType::Credit)
            .map(|t| t.amount)
            .sum(),
    );
    let minimum = if total > 0.0 {
        round2((total * MINIMUM_DUE_RATE).max(MINIMUM_DUE_FLOOR).min(total))
    } else {
        0.0
    };

    StatementData {
        card_last_four_digits: Some(FIXTURE_CARD_LAST_FOUR.to_string()),
        card_variant: Some(issuer.card_variant().to_string()),
        statement_date: Some(statement_date),
        payment_due_date: statement_date.checked_add_days(Days::new(DAYS_UNTIL_DUE)),
        total_amount_due: Some(total),
        issuer_name: Some(issuer.display_name().to_string()),
        card_holder_name: Some(FIXTURE_CARD_HOLDER.to_string()),
        credit_limit: Some(FIXTURE_CREDIT_LIMIT),
        available_credit: Some(round2(FIXTURE_CREDIT_LIMIT - total)),
        minimum_amount_due: Some(minimum),
        transactions: lines,
    }
}

fn catalogue_entry(index: usize, statement_date: NaiveDate) -> Transaction {
    let (offset, description, merchant, amount, kind) = CATALOGUE[index % CATALOGUE.len()];
    let cycle = (index / CATALOGUE.len()) as u64;
    let transaction_date = statement_date
        .checked_sub_days(Days::new(offset + cycle * CYCLE_DAYS))
        .unwrap_or(statement_date);

    Transaction {
        transaction_date,
        posting_date: transaction_date.checked_add_days(Days::new(1)),
        description: description.to_string(),
        merchant_name: Some(merchant.to_string()),
        amount,
        kind,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Resolve an issuer given on the command line.
pub fn issuer_from_name(name: &str) -> FixtureResult<Issuer> {
    Issuer::from_code(name).ok_or_else(|| FixtureError::UnknownIssuer(name.to_string()))
}

/// Pretty-printed JSON for a fixture, as returned by `/parse`.
pub fn to_json(statement: &StatementData) -> FixtureResult<String> {
    Ok(serde_json::to_string_pretty(statement)?)
}

/// Write a fixture to disk.
pub fn save_fixture(statement: &StatementData, path: &Path) -> FixtureResult<()> {
    fs::write(path, to_json(statement)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_statement() {
        let statement = fixture_statement(Issuer::Hdfc, 5);

        assert!(statement.is_valid());
        assert_eq!(statement.issuer_name.as_deref(), Some("HDFC Bank"));
        assert_eq!(statement.total_amount_due, Some(4500.50));
        assert_eq!(statement.minimum_amount_due, Some(500.0));
        assert_eq!(statement.payment_due_date, NaiveDate::from_ymd_opt(2025, 11, 1));
        assert_eq!(statement.available_credit, Some(195_499.50));

        let first = &statement.transactions[0];
        assert_eq!(first.description, "Amazon.in Purchase");
        assert_eq!(first.transaction_date, NaiveDate::from_ymd_opt(2025, 10, 10).unwrap());
        assert_eq!(statement.transactions[4].transaction_date, NaiveDate::from_ymd_opt(2025, 9, 17).unwrap());
    }

    #[test]
    fn test_large_fixture_repeats_a_cycle_earlier() {
        let statement = fixture_statement(Issuer::Axis, 15);
        assert_eq!(statement.transactions.len(), 15);
        assert_eq!(statement.transactions[5].description, "Amazon.in Purchase");
        assert_eq!(
            statement.transactions[5].transaction_date,
            NaiveDate::from_ymd_opt(2025, 9, 10).unwrap()
        );
        assert_eq!(statement.total_amount_due, Some(13501.50));
    }

    #[test]
    fn test_empty_fixture_owes_nothing() {
        let statement = fixture_statement(Issuer::Sbi, 0);
        assert!(statement.transactions.is_empty());
        assert_eq!(statement.total_amount_due, Some(0.0));
        assert_eq!(statement.minimum_amount_due, Some(0.0));
    }

    #[test]
    fn test_unknown_issuer() {
        assert!(matches!(issuer_from_name("Kotak"), Err(FixtureError::UnknownIssuer(_))));
        assert_eq!(issuer_from_name("amex").unwrap(), Issuer::Amex);
    }

    #[test]
    fn test_save_fixture_writes_camel_case_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hdfc.json");

        save_fixture(&fixture_statement(Issuer::Hdfc, 2), &path).unwrap();

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["cardLastFourDigits"], "5678");
        assert_eq!(value["paymentDueDate"], "2025-11-01");
        assert_eq!(value["transactions"][1]["transactionDate"], "2025-10-05");
    }
}
