//! End-to-end statement run: extract text, locate the section, parse,
//! categorize (optional), merge into the log, print the summary.

use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;

use tally_core::{GroupKey, LedgerEntry, Transaction, load_ledger, merge_batch, save_ledger};
use tally_finance::CategoryAssigner;
use tally_ingest::{locate_section, parse_section};

use crate::extract;

/// How many raw lines to dump when the transaction section is missing.
const DIAGNOSTIC_LINES: usize = 20;

pub fn run_import(
    statement: &Path,
    log: &Path,
    year: i32,
    skip_markers: &[String],
    assigner: Option<&CategoryAssigner>,
) -> Result<()> {
    let text = extract::extract_text(statement)?;

    let section = match locate_section(&text) {
        Ok(section) => section,
        Err(e) => {
            dump_raw_lines(&text);
            return Err(e.into());
        }
    };

    let mut batch = parse_section(section, skip_markers)?;

    if let Some(assigner) = assigner {
        println!("Categorizing {} transactions...", batch.len());
        batch = batch
            .into_iter()
            .map(|txn| {
                let category = assigner.assign(&txn.description);
                txn.with_category(category)
            })
            .collect();
    }

    let prior = load_ledger(log)?;
    let (merged, key) = merge_batch(batch.clone(), prior, year);

    let Some(key) = key else {
        // The anchor was there but nothing matched the record shape; show
        // the section lines so the user can see what the parser saw.
        println!("No new transactions to add");
        dump_raw_lines(section);
        return Ok(());
    };

    save_ledger(log, &merged)?;

    println!("Extracted {} transactions for {}", batch.len(), key);
    println!("Updated log file: {}", log.display());
    println!("Total transactions in log: {}", merged.len());

    print_monthly_summary(&merged);

    if assigner.is_some() {
        print_category_breakdown(&batch, &key);
    }

    println!("\nLatest transactions from {}:", key);
    for txn in batch.iter().take(5) {
        print_transaction(txn);
    }

    Ok(())
}

pub fn run_summary(log: &Path) -> Result<()> {
    let ledger = load_ledger(log)?;
    if ledger.is_empty() {
        println!("Log is empty: {}", log.display());
        return Ok(());
    }
    println!("Total transactions in log: {}", ledger.len());
    print_monthly_summary(&ledger);
    Ok(())
}

/// First lines of the problem text, for figuring out why nothing parsed
/// (wrong document, extraction garbled the text, unexpected layout, ...).
fn dump_raw_lines(text: &str) {
    eprintln!("Raw lines from the document:");
    for (i, line) in text.lines().take(DIAGNOSTIC_LINES).enumerate() {
        eprintln!("{}: '{}'", i, line.trim());
    }
}

/// Count and amount sum per (year, month) group, in ledger (sorted) order.
fn print_monthly_summary(ledger: &[LedgerEntry]) {
    println!("\nMonthly summary:");
    let mut i = 0;
    while i < ledger.len() {
        let (year, month) = (&ledger[i].year, &ledger[i].month);
        let mut count = 0;
        let mut total = 0.0;
        while i < ledger.len() && &ledger[i].year == year && &ledger[i].month == month {
            count += 1;
            total += ledger[i].amount;
            i += 1;
        }
        println!("  {} {}: {} transactions, total {}", month, year, count, dollars(total));
    }
}

/// Count and sum per category for the just-processed batch.
fn print_category_breakdown(batch: &[Transaction], key: &GroupKey) {
    let mut by_category: HashMap<&str, (usize, f64)> = HashMap::new();
    for txn in batch {
        let category = txn.category.as_deref().unwrap_or("Miscellaneous");
        let slot = by_category.entry(category).or_insert((0, 0.0));
        slot.0 += 1;
        slot.1 += txn.amount;
    }

    let mut categories: Vec<_> = by_category.into_iter().collect();
    categories.sort_by_key(|(name, _)| *name);

    println!("\nCategory breakdown for {}:", key);
    for (name, (count, total)) in categories {
        println!("  {}: {} transactions, total {}", name, count, dollars(total));
    }
}

fn print_transaction(txn: &Transaction) {
    match &txn.category {
        Some(category) => println!(
            "  {} | {} | {} | {} [{}]",
            txn.trans_date, txn.post_date, txn.description, dollars(txn.amount), category
        ),
        None => println!(
            "  {} | {} | {} | {}",
            txn.trans_date, txn.post_date, txn.description, dollars(txn.amount)
        ),
    }
}

fn dollars(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", -amount)
    } else {
        format!("${:.2}", amount)
    }
}
