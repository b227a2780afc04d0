//! Account-number generation
//!
//! The original model kept the next account number in hidden process-wide
//! state. Here the counter is an explicit value owned by whoever opens
//! accounts (normally the [`Ledger`](crate::core::Ledger)), so tests can
//! start fresh sequences deterministically and concurrent creation, if ever
//! introduced, has a single obvious value to serialize.

use crate::types::AccountNumber;

/// First number handed out by a fresh sequence
pub const FIRST_ACCOUNT_NUMBER: AccountNumber = 1000;

/// Monotonically increasing account-number source
///
/// Numbers start at 1000 and advance by one per account, regardless of the
/// account variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSequence {
    next: AccountNumber,
}

impl AccountSequence {
    /// A sequence whose first number is [`FIRST_ACCOUNT_NUMBER`]
    pub fn new() -> Self {
        Self::starting_at(FIRST_ACCOUNT_NUMBER)
    }

    /// A sequence whose first number is `first`
    pub fn starting_at(first: AccountNumber) -> Self {
        AccountSequence { next: first }
    }

    /// Hand out the next number and advance
    pub fn next_number(&mut self) -> AccountNumber {
        let number = self.next;
        self.next += 1;
        number
    }

    /// The number the next call to [`AccountSequence::next_number`] returns
    pub fn peek(&self) -> AccountNumber {
        self.next
    }
}

impl Default for AccountSequence {
    fn default() -> Self {
        Self::new()
    }
}
