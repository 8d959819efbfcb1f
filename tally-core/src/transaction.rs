//! Transaction and ledger row types.

use serde::{Deserialize, Serialize};

/// One transaction recovered from a statement.
///
/// Dates are kept as the raw statement labels (e.g. "Apr. 4") rather than
/// calendar dates: statements only print month + day, and the ledger groups
/// by month label anyway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub trans_date: String,
    pub post_date: String,
    pub description: String,
    /// Positive = charge/debit; negative = credit/refund (CR lines).
    pub amount: f64,
    /// Present only after categorization runs.
    pub category: Option<String>,
}

impl Transaction {
    pub fn new(
        trans_date: impl Into<String>,
        post_date: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            trans_date: trans_date.into(),
            post_date: post_date.into(),
            description: description.into(),
            amount,
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// A persisted ledger row: a transaction tagged with the month group it
/// belongs to.
///
/// `year` stays a raw string so that hand-edited rows with a bad year
/// survive a read/sort/write cycle untouched (they sort last, see
/// [`crate::ledger::sort_ledger`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub year: String,
    /// Three-letter month abbreviation ("Jan" .. "Dec").
    pub month: String,
    pub trans_date: String,
    pub post_date: String,
    pub description: String,
    pub amount: f64,
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_builder() {
        let txn = Transaction::new("Apr. 4", "Apr. 7", "TIM HORTONS #3667", 4.50);
        assert_eq!(txn.amount, 4.50);
        assert!(txn.category.is_none());

        let txn = txn.with_category("Food & Dining");
        assert_eq!(txn.category.as_deref(), Some("Food & Dining"));
    }

    #[test]
    fn test_ledger_entry_serde_round_trip() {
        let entry = LedgerEntry {
            year: "2025".to_string(),
            month: "Apr".to_string(),
            trans_date: "Apr. 4".to_string(),
            post_date: "Apr. 7".to_string(),
            description: "AMAZON.CA TORONTO ON".to_string(),
            amount: 54.23,
            category: None,
        };

        let json = serde_json::to_string(&entry).unwrap();
        let back: LedgerEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
        // Absent category serializes as null, not as an empty label.
        assert!(json.contains("\"category\":null"));
    }
}
