//! Month-replace merge and chronological ordering of the ledger.
//!
//! A parsed statement batch replaces the matching (year, month) group in the
//! prior ledger, so re-running the tool on the same statement is idempotent.

use std::fmt;

use crate::transaction::{LedgerEntry, Transaction};

/// Explicit month ordering used for the ledger sort.
pub const MONTH_ORDER: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Identifies the month group a statement batch belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupKey {
    pub year: i32,
    pub month: String,
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month, self.year)
    }
}

/// Index of a three-letter month abbreviation in [`MONTH_ORDER`].
pub fn month_index(month: &str) -> Option<u32> {
    MONTH_ORDER.iter().position(|m| *m == month).map(|i| i as u32)
}

/// Sort rank for one ledger row: (year, month index).
///
/// Rows whose year does not parse or whose month label is not in the table
/// are classified here, up front, and pushed after all well-formed rows via
/// a sentinel rank instead of failing the sort.
fn sort_rank(entry: &LedgerEntry) -> (i32, u32) {
    match (entry.year.trim().parse::<i32>(), month_index(&entry.month)) {
        (Ok(year), Some(idx)) => (year, idx),
        _ => (i32::MAX, u32::MAX),
    }
}

/// Sort the ledger chronologically: year ascending, then month. Rows within
/// the same month keep their relative order (statement order).
pub fn sort_ledger(entries: &mut [LedgerEntry]) {
    entries.sort_by_key(sort_rank);
}

/// Derive the group key for a batch from its first transaction.
///
/// The month comes from the label before the period ("Apr. 4" -> "Apr");
/// the year is an explicit caller input because BMO statements do not carry
/// it on transaction rows. Batches spanning two month groups are not
/// supported: every row is tagged with the first row's month.
pub fn group_key_for(batch: &[Transaction], year: i32) -> Option<GroupKey> {
    let first = batch.first()?;
    let month = first.trans_date.split('.').next()?.trim();
    if month.is_empty() {
        return None;
    }
    Some(GroupKey {
        year,
        month: month.to_string(),
    })
}

/// Merge a freshly parsed batch into the prior ledger.
///
/// Every prior row with the batch's (year, month) is removed before the
/// batch is appended, then the whole ledger is re-sorted. An empty batch is
/// a no-op and reports no group.
pub fn merge_batch(
    batch: Vec<Transaction>,
    prior: Vec<LedgerEntry>,
    year: i32,
) -> (Vec<LedgerEntry>, Option<GroupKey>) {
    let Some(key) = group_key_for(&batch, year) else {
        return (prior, None);
    };

    let mut merged: Vec<LedgerEntry> = prior
        .into_iter()
        .filter(|e| !entry_in_group(e, &key))
        .collect();

    merged.extend(batch.into_iter().map(|txn| LedgerEntry {
        year: key.year.to_string(),
        month: key.month.clone(),
        trans_date: txn.trans_date,
        post_date: txn.post_date,
        description: txn.description,
        amount: txn.amount,
        category: txn.category,
    }));

    sort_ledger(&mut merged);
    (merged, Some(key))
}

fn entry_in_group(entry: &LedgerEntry, key: &GroupKey) -> bool {
    entry.year.trim().parse::<i32>() == Ok(key.year) && entry.month == key.month
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(trans_date: &str, amount: f64) -> Transaction {
        Transaction::new(trans_date, trans_date, "MERCHANT", amount)
    }

    fn entry(year: &str, month: &str, amount: f64) -> LedgerEntry {
        LedgerEntry {
            year: year.to_string(),
            month: month.to_string(),
            trans_date: format!("{month}. 1"),
            post_date: format!("{month}. 1"),
            description: "MERCHANT".to_string(),
            amount,
            category: None,
        }
    }

    #[test]
    fn test_group_key_from_first_transaction() {
        let batch = vec![txn("Apr. 4", 1.0), txn("Apr. 9", 2.0)];
        let key = group_key_for(&batch, 2025).unwrap();
        assert_eq!(key.year, 2025);
        assert_eq!(key.month, "Apr");
        assert_eq!(key.to_string(), "Apr 2025");
    }

    #[test]
    fn test_empty_batch_is_noop() {
        let prior = vec![entry("2025", "Mar", 10.0)];
        let (merged, key) = merge_batch(vec![], prior.clone(), 2025);
        assert_eq!(merged, prior);
        assert!(key.is_none());
    }

    #[test]
    fn test_merge_replaces_same_month_group() {
        let prior: Vec<_> = (0..5).map(|i| entry("2025", "Apr", i as f64)).collect();
        let batch = vec![txn("Apr. 4", 1.0), txn("Apr. 5", 2.0), txn("Apr. 6", 3.0)];

        let (merged, key) = merge_batch(batch, prior, 2025);
        assert_eq!(key.unwrap().month, "Apr");
        let apr: Vec<_> = merged.iter().filter(|e| e.month == "Apr").collect();
        assert_eq!(apr.len(), 3, "old Apr rows must be replaced, not appended");
    }

    #[test]
    fn test_merge_is_idempotent() {
        let batch = vec![txn("Apr. 4", 12.99), txn("Apr. 8", -4.00)];
        let (once, _) = merge_batch(batch.clone(), vec![entry("2025", "Mar", 5.0)], 2025);
        let (twice, _) = merge_batch(batch, once.clone(), 2025);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_merge_keeps_other_groups() {
        let prior = vec![entry("2025", "Mar", 10.0), entry("2024", "Apr", 20.0)];
        let (merged, _) = merge_batch(vec![txn("Apr. 4", 1.0)], prior, 2025);
        // Same month in a different year is a different group.
        assert_eq!(merged.len(), 3);
        assert!(merged.iter().any(|e| e.year == "2024" && e.month == "Apr"));
    }

    #[test]
    fn test_sort_spans_year_boundary() {
        let mut ledger = vec![entry("2025", "Jan", 1.0), entry("2024", "Dec", 2.0)];
        sort_ledger(&mut ledger);
        assert_eq!((ledger[0].year.as_str(), ledger[0].month.as_str()), ("2024", "Dec"));
        assert_eq!((ledger[1].year.as_str(), ledger[1].month.as_str()), ("2025", "Jan"));
    }

    #[test]
    fn test_malformed_rows_sort_last() {
        let mut ledger = vec![
            entry("2025", "Smarch", 1.0),
            entry("twenty25", "Feb", 2.0),
            entry("2025", "Nov", 3.0),
        ];
        sort_ledger(&mut ledger);
        assert_eq!(ledger[0].month, "Nov");
        // Both malformed rows come after every recognized one.
        assert!(month_index(&ledger[1].month).is_none() || ledger[1].year.parse::<i32>().is_err());
        assert!(month_index(&ledger[2].month).is_none() || ledger[2].year.parse::<i32>().is_err());
    }

    #[test]
    fn test_month_index_table() {
        assert_eq!(month_index("Jan"), Some(0));
        assert_eq!(month_index("Dec"), Some(11));
        assert_eq!(month_index("jan"), None);
    }
}
