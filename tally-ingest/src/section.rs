//! Locate the transaction listing inside the full extracted statement text.

use thiserror::Error;

/// Literal anchor that opens the transaction listing on BMO credit-card
/// statements.
pub const SECTION_START: &str = "Transactions since your last statement";

/// Optional anchor that closes the listing (the per-card subtotal line).
pub const SECTION_END: &str = "Subtotal for";

#[derive(Error, Debug)]
pub enum IngestError {
    /// The statement text has no transaction listing at all. Nothing can be
    /// parsed without it, so this aborts the run.
    #[error("could not find transaction section (no \"Transactions since your last statement\" anchor)")]
    SectionNotFound,
}

/// Return the slice of `full_text` between the start anchor and the subtotal
/// marker, untouched (line breaks preserved for the parser).
///
/// The subtotal marker is optional; when absent the section runs to the end
/// of the text.
pub fn locate_section(full_text: &str) -> Result<&str, IngestError> {
    let (_, after) = full_text
        .split_once(SECTION_START)
        .ok_or(IngestError::SectionNotFound)?;

    let section = match after.split_once(SECTION_END) {
        Some((before, _)) => before,
        None => after,
    };

    Ok(section)
}
