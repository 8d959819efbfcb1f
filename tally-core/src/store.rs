//! CSV persistence for the transaction log.
//!
//! Columns: Year, Month, Transaction Date, Posted Date, Description, Amount
//! and, when categorization ran, a trailing Category column. The whole file
//! is rewritten on every save; there is no append path.

use anyhow::{Context, Result};
use std::path::Path;

use crate::transaction::LedgerEntry;

const HEADER: [&str; 6] = [
    "Year",
    "Month",
    "Transaction Date",
    "Posted Date",
    "Description",
    "Amount",
];

/// Read the persisted ledger. A missing file is an empty ledger, not an
/// error (first run).
pub fn load_ledger(path: impl AsRef<Path>) -> Result<Vec<LedgerEntry>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut entries = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let year = record.get(0).unwrap_or("").trim();
        if year.is_empty() {
            continue;
        }

        let amount: f64 = record
            .get(5)
            .unwrap_or("0")
            .trim()
            .parse()
            .unwrap_or(0.0);

        // Category column only exists in logs written after categorization.
        let category = record
            .get(6)
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        entries.push(LedgerEntry {
            year: year.to_string(),
            month: record.get(1).unwrap_or("").trim().to_string(),
            trans_date: record.get(2).unwrap_or("").trim().to_string(),
            post_date: record.get(3).unwrap_or("").trim().to_string(),
            description: record.get(4).unwrap_or("").trim().to_string(),
            amount,
            category,
        });
    }

    Ok(entries)
}

/// Write the full ledger, replacing whatever was on disk.
///
/// The Category column is emitted only if at least one row carries a label,
/// so rule-free runs keep the original six-column shape.
pub fn save_ledger(path: impl AsRef<Path>, entries: &[LedgerEntry]) -> Result<()> {
    let path = path.as_ref();
    let with_category = entries.iter().any(|e| e.category.is_some());

    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("writing {}", path.display()))?;

    if with_category {
        let mut header: Vec<&str> = HEADER.to_vec();
        header.push("Category");
        wtr.write_record(&header)?;
    } else {
        wtr.write_record(HEADER)?;
    }

    for e in entries {
        let amount = format!("{:.2}", e.amount);
        let mut record = vec![
            e.year.as_str(),
            e.month.as_str(),
            e.trans_date.as_str(),
            e.post_date.as_str(),
            e.description.as_str(),
            amount.as_str(),
        ];
        if with_category {
            record.push(e.category.as_deref().unwrap_or(""));
        }
        wtr.write_record(&record)?;
    }

    wtr.flush().with_context(|| format!("flushing {}", path.display()))?;
    Ok(())
}
