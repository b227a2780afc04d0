//! Error types for the banking ledger
//!
//! This module defines every failure the ledger core can report. Errors fall
//! into two classes:
//!
//! - **Construction-time validation failures** (bad customer data, negative
//!   credit limit, out-of-range interest rate): these abort object creation.
//! - **Operation-time business-rule failures** (insufficient funds, exceeded
//!   withdrawal limit, duplicate account number, ...): these are expected
//!   outcomes of normal use. Every mutating operation returns a `Result` and
//!   callers are expected to branch on it; none of these paths panic.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use super::account::AccountNumber;

/// Main error type for the banking ledger
///
/// Each variant carries enough context to diagnose the rejection without
/// access to the account state at the time of the failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Customer name was empty or whitespace-only
    #[error("Customer name must not be empty")]
    EmptyName,

    /// National ID did not have exactly 11 characters
    #[error("National ID '{value}' must have exactly 11 characters")]
    InvalidNationalId {
        /// The rejected national ID value
        value: String,
    },

    /// Birth date lies in the future
    #[error("Birth date {date} is in the future")]
    BirthDateInFuture {
        /// The rejected birth date
        date: NaiveDate,
    },

    /// Customer address was empty or whitespace-only
    #[error("Customer address must not be empty")]
    EmptyAddress,

    /// Credit limit for a checking account was negative
    #[error("Credit limit {limit} must not be negative")]
    NegativeCreditLimit {
        /// The rejected limit
        limit: Decimal,
    },

    /// Savings interest rate was outside the allowed 0%..=10% range
    #[error("Interest rate {rate} must be between 0 and 0.1")]
    InterestRateOutOfRange {
        /// The rejected monthly rate
        rate: Decimal,
    },

    /// A deposit, withdrawal, or transfer amount was zero or negative
    #[error("Amount {amount} must be positive")]
    NonPositiveAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// A withdrawal exceeded the per-operation limit of the account variant
    #[error("Withdrawal of {requested} from account {account} exceeds the per-operation limit of {limit}")]
    WithdrawLimitExceeded {
        /// Account the withdrawal targeted
        account: AccountNumber,
        /// The variant's fixed per-withdrawal limit
        limit: Decimal,
        /// The rejected amount
        requested: Decimal,
    },

    /// Not enough funds (including any overdraft headroom) for a withdrawal
    #[error("Insufficient funds in account {account}: available {available}, requested {requested}")]
    InsufficientFunds {
        /// Account the withdrawal targeted
        account: AccountNumber,
        /// Balance plus remaining overdraft headroom at the time of rejection
        available: Decimal,
        /// The rejected amount
        requested: Decimal,
    },

    /// Interest projection was requested over a non-positive number of months
    #[error("Projection over {months} months is not meaningful, need at least 1")]
    NonPositiveMonths {
        /// The rejected month count
        months: i32,
    },

    /// A credit-limit update did not strictly increase the limit
    #[error("New credit limit {proposed} must be greater than the current limit {current}")]
    CreditLimitNotIncreased {
        /// The limit currently in force
        current: Decimal,
        /// The rejected proposal
        proposed: Decimal,
    },

    /// A variant-specific operation was invoked on the wrong account variant
    #[error("Operation '{operation}' is not supported by account {account}")]
    WrongAccountKind {
        /// Account the operation targeted
        account: AccountNumber,
        /// Name of the rejected operation
        operation: String,
    },

    /// An account with the same number is already registered
    #[error("An account with number {account} is already registered")]
    DuplicateAccount {
        /// The conflicting account number
        account: AccountNumber,
    },

    /// No registered account carries the requested number
    #[error("Account {account} not found")]
    AccountNotFound {
        /// The missing account number
        account: AccountNumber,
    },

    /// Source and destination of a transfer were the same account
    #[error("Cannot transfer from account {account} to itself")]
    SelfTransfer {
        /// The account named on both sides
        account: AccountNumber,
    },

    /// A transfer was rolled back after its deposit leg failed
    ///
    /// The source account was restored to its pre-transfer balance by the
    /// compensating deposit. Distinct from an outright rejection so callers
    /// can tell "never left the source" from "left and came back".
    #[error("Transfer of {amount} from account {from} to account {to} was rolled back")]
    TransferRolledBack {
        /// Source account
        from: AccountNumber,
        /// Destination account
        to: AccountNumber,
        /// The transfer amount
        amount: Decimal,
    },

    /// The compensating deposit of a failed transfer itself failed
    ///
    /// The source account's balance no longer reflects its pre-transfer
    /// state. This must never be conflated with an ordinary rejection.
    #[error("Compensation failed: {amount} withdrawn from account {from} could not be re-deposited")]
    CompensationFailed {
        /// Source account whose state is now short by `amount`
        from: AccountNumber,
        /// The amount that could not be restored
        amount: Decimal,
    },
}

// Helper constructors for the variants built from more than one value

impl LedgerError {
    /// Create an InvalidNationalId error
    pub fn invalid_national_id(value: &str) -> Self {
        LedgerError::InvalidNationalId {
            value: value.to_string(),
        }
    }

    /// Create a NonPositiveAmount error
    pub fn non_positive_amount(amount: Decimal) -> Self {
        LedgerError::NonPositiveAmount { amount }
    }

    /// Create a WithdrawLimitExceeded error
    pub fn withdraw_limit_exceeded(
        account: AccountNumber,
        limit: Decimal,
        requested: Decimal,
    ) -> Self {
        LedgerError::WithdrawLimitExceeded {
            account,
            limit,
            requested,
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(
        account: AccountNumber,
        available: Decimal,
        requested: Decimal,
    ) -> Self {
        LedgerError::InsufficientFunds {
            account,
            available,
            requested,
        }
    }

    /// Create a WrongAccountKind error
    pub fn wrong_account_kind(account: AccountNumber, operation: &str) -> Self {
        LedgerError::WrongAccountKind {
            account,
            operation: operation.to_string(),
        }
    }

    /// Create a TransferRolledBack error
    pub fn transfer_rolled_back(from: AccountNumber, to: AccountNumber, amount: Decimal) -> Self {
        LedgerError::TransferRolledBack { from, to, amount }
    }

    /// Create a CompensationFailed error
    pub fn compensation_failed(from: AccountNumber, amount: Decimal) -> Self {
        LedgerError::CompensationFailed { from, amount }
    }

    /// Whether this error indicates the failing operation left state behind
    ///
    /// True only for [`LedgerError::CompensationFailed`]; every other variant
    /// guarantees the rejected operation had no effect.
    pub fn is_state_compromising(&self) -> bool {
        matches!(self, LedgerError::CompensationFailed { .. })
    }
}
