//! tally-core: transaction and ledger types, the month-replace merge, and the CSV log store.

pub mod ledger;
pub mod store;
pub mod transaction;

pub use ledger::{GroupKey, MONTH_ORDER, merge_batch, month_index, sort_ledger};
pub use store::{load_ledger, save_ledger};
pub use transaction::{LedgerEntry, Transaction};
