//! Domain models for the statement parser service.
//!
//! - [`Issuer`] - Supported card issuers and their detection keywords
//! - [`StatementData`] - A parsed statement as returned by `/parse`
//! - [`Transaction`] - One statement line
//! - [`TransactionType`] - Debit, credit or fee

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// Issuer
// =============================================================================

/// Card issuer recognised by the parser.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Issuer {
    Hdfc,
    Icici,
    Sbi,
    Axis,
    Amex,
}

impl Issuer {
    /// All issuers in detection order.
    pub const ALL: [Issuer; 5] = [Issuer::Hdfc, Issuer::Icici, Issuer::Sbi, Issuer::Axis, Issuer::Amex];

    /// Parse from a short code or display name (case-insensitive).
    pub fn from_code(code: &str) -> Option<Self> {
        let normalized = normalize(code);
        Self::ALL.into_iter().find(|issuer| {
            normalized == issuer.to_code()
                || normalized == normalize(issuer.display_name())
                || issuer.keywords().iter().any(|k| normalized == *k)
        })
    }

    /// Short code used on the command line.
    pub fn to_code(&self) -> &'static str {
        match self {
            Issuer::Hdfc => "HDFC",
            Issuer::Icici => "ICICI",
            Issuer::Sbi => "SBI",
            Issuer::Axis => "AXIS",
            Issuer::Amex => "AMEX",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Issuer::Hdfc => "HDFC Bank",
            Issuer::Icici => "ICICI Bank",
            Issuer::Sbi => "SBI Card",
            Issuer::Axis => "Axis Bank",
            Issuer::Amex => "American Express",
        }
    }

    /// Upper-case, separator-free tokens that identify the issuer.
    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Issuer::Hdfc => &["HDFC", "HDFCBANK"],
            Issuer::Icici => &["ICICI", "ICICIBANK"],
            Issuer::Sbi => &["SBI", "SBICARD"],
            Issuer::Axis => &["AXIS", "AXISBANK"],
            Issuer::Amex => &["AMEX", "AMERICANEXPRESS"],
        }
    }

    /// Card variant printed on fixture statements.
    pub fn card_variant(&self) -> &'static str {
        match self {
            Issuer::Hdfc => "Regalia Gold",
            Issuer::Icici => "Amazon Pay",
            Issuer::Sbi => "SimplyCLICK",
            Issuer::Axis => "Flipkart",
            Issuer::Amex => "Membership Rewards",
        }
    }

    /// Detect the issuer mentioned in free text such as a file name.
    ///
    /// Word boundaries are ignored, so `hdfc_statement_oct.pdf` and
    /// `HDFCBank-Oct.pdf` both match.
    pub fn detect(text: &str) -> Option<Self> {
        let normalized = normalize(text);
        Self::ALL
            .into_iter()
            .find(|issuer| issuer.keywords().iter().any(|k| normalized.contains(k)))
    }
}

impl std::fmt::Display for Issuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

// =============================================================================
// Transactions
// =============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Debit,
    Credit,
    Fee,
}

/// One statement line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub transaction_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posting_date: Option<NaiveDate>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_name: Option<String>,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

// =============================================================================
// Statement
// =============================================================================

/// A parsed credit card statement.
///
/// Optional fields are serialized as `null` so clients see the full shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatementData {
    pub card_last_four_digits: Option<String>,
    pub card_variant: Option<String>,
    pub statement_date: Option<NaiveDate>,
    pub payment_due_date: Option<NaiveDate>,
    pub total_amount_due: Option<f64>,
    pub issuer_name: Option<String>,
    pub card_holder_name: Option<String>,
    pub credit_limit: Option<f64>,
    pub available_credit: Option<f64>,
    pub minimum_amount_due: Option<f64>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl StatementData {
    /// A statement is usable once the card, amount due and due date are known.
    pub fn is_valid(&self) -> bool {
        self.card_last_four_digits.is_some()
            && self.total_amount_due.is_some()
            && self.payment_due_date.is_some()
    }
}
