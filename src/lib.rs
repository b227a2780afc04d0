//! Bank Ledger Library
//! # Overview
//!
//! This library implements an in-memory retail-banking ledger: customers own
//! accounts of two variants, every account keeps an append-only movement
//! history next to its balance, and a central registry coordinates transfers
//! and periodic rate application across accounts.
//!
//! # Architecture
//!
//! - [`types`] - Core data types:
//!   - [`types::customer`] - validated customer identity
//!   - [`types::account`] - account state, variants, and balance operations
//!   - [`types::movement`] - append-only history entries
//!   - [`types::error`] - the crate-wide error type
//! - [`core`] - Business logic:
//!   - [`core::ledger`] - the account registry and cross-account orchestration
//!   - [`core::sequence`] - explicit account-number generation
//!   - [`core::report`] - aggregate snapshots for the reporting layer
//!
//! # Account variants
//!
//! - **Checking**: overdraft facility up to a per-account credit limit,
//!   withdrawals capped at 5000 per operation, 1% monthly fee on positive
//!   balances.
//! - **Savings**: no overdraft, withdrawals capped at 1000 per operation,
//!   monthly interest credited at most once per calendar month.
//!
//! # Error handling
//!
//! Business-rule rejections (insufficient funds, duplicate numbers, limit
//! violations, ...) are ordinary [`LedgerError`] results that callers branch
//! on; nothing in the library panics. A failed transfer deposit leg is
//! compensated by re-depositing into the source; the rolled-back case and
//! the (theoretical) failed-compensation case surface as distinct errors.
//!
//! # Concurrency
//!
//! Single-threaded by design. No operation blocks or suspends; callers that
//! share a [`Ledger`] across threads must add their own synchronization.

pub mod core;
pub mod types;

pub use self::core::{AccountSequence, Ledger, LedgerReport, FIRST_ACCOUNT_NUMBER};
pub use self::types::{
    Account, AccountKind, AccountNumber, AccrualOutcome, Customer, LedgerError, Movement,
    MovementKind, RateOutcome,
};
