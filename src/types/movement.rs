//! Movement history entries
//!
//! Every balance-affecting event on an account appends exactly one movement
//! to that account's history. The history is append-only: entries are never
//! edited, reordered, or truncated.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use super::account::AccountNumber;

/// What kind of event a movement records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    /// Appended once at construction, with a delta of zero
    AccountOpened,
    /// Funds credited by a deposit (or the deposit leg of a transfer)
    Deposit,
    /// Funds debited by a withdrawal (or the withdrawal leg of a transfer)
    Withdrawal,
    /// Marker appended on the source account after both transfer legs succeed
    TransferOut {
        /// Destination account number
        to: AccountNumber,
    },
    /// Monthly operation fee charged on a positive balance
    MonthlyFee,
    /// Monthly interest credited to a savings balance
    Interest,
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovementKind::AccountOpened => write!(f, "Account opened"),
            MovementKind::Deposit => write!(f, "Deposit"),
            MovementKind::Withdrawal => write!(f, "Withdrawal"),
            MovementKind::TransferOut { to } => write!(f, "Transfer to account {to}"),
            MovementKind::MonthlyFee => write!(f, "Monthly fee"),
            MovementKind::Interest => write!(f, "Interest"),
        }
    }
}

/// One entry of an account's movement history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movement {
    /// When the event happened
    pub at: DateTime<Utc>,
    /// What happened
    pub kind: MovementKind,
    /// Signed balance delta (zero for the opening entry)
    pub amount: Decimal,
    /// The account balance immediately after the event
    pub balance_after: Decimal,
}

impl Movement {
    /// Record an event happening now
    pub fn new(kind: MovementKind, amount: Decimal, balance_after: Decimal) -> Self {
        Movement {
            at: Utc::now(),
            kind,
            amount,
            balance_after,
        }
    }
}
