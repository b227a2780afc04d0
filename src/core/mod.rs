//! Core business logic module
//!
//! - `sequence` - explicit account-number generation
//! - `ledger` - the account registry and cross-account orchestration
//! - `report` - aggregate snapshots for the reporting layer

pub mod ledger;
pub mod report;
pub mod sequence;

pub use ledger::Ledger;
pub use report::LedgerReport;
pub use sequence::{AccountSequence, FIRST_ACCOUNT_NUMBER};
