//! tally-ingest: isolates the transaction section of a statement text dump
//! and parses it into transactions.

pub mod parser;
pub mod section;

pub use parser::{DEFAULT_SKIP_MARKERS, parse_section};
pub use section::{IngestError, SECTION_END, SECTION_START, locate_section};
