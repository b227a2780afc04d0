//! Types module
//!
//! Contains the core data structures of the ledger:
//! - `customer`: validated customer identity
//! - `movement`: append-only history entries
//! - `account`: account state, variants, and balance operations
//! - `error`: error types for the whole crate

pub mod account;
pub mod customer;
pub mod error;
pub mod movement;

pub use account::{Account, AccountKind, AccountNumber, AccrualOutcome, RateOutcome};
pub use customer::Customer;
pub use error::LedgerError;
pub use movement::{Movement, MovementKind};
