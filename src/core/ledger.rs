//! Account registry and cross-account orchestration
//!
//! The [`Ledger`] owns the registered accounts, enforces account-number
//! uniqueness, and coordinates the operations that span more than one
//! account: transfers and bulk monthly rate application. Aggregate views
//! (capital totals, per-variant splits, rankings) are recomputed from the
//! live collection on every call, never cached.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::types::{Account, AccountNumber, Customer, LedgerError, RateOutcome};

use super::report::LedgerReport;
use super::sequence::AccountSequence;

/// The central account registry
///
/// Accounts are kept in registration order; every listing, ranking, and bulk
/// operation iterates in that order.
#[derive(Debug)]
pub struct Ledger {
    name: String,
    accounts: Vec<Account>,
    sequence: AccountSequence,
}

impl Ledger {
    /// Create an empty ledger with its own account-number sequence
    pub fn new(name: &str) -> Self {
        Ledger {
            name: name.to_string(),
            accounts: Vec::new(),
            sequence: AccountSequence::new(),
        }
    }

    /// The ledger's display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Open and register a checking account, returning its number
    ///
    /// # Errors
    ///
    /// [`LedgerError::NegativeCreditLimit`] if `credit_limit < 0`.
    pub fn open_checking(
        &mut self,
        owner: Arc<Customer>,
        credit_limit: Decimal,
    ) -> Result<AccountNumber, LedgerError> {
        let account = Account::checking(self.sequence.next_number(), owner, credit_limit)?;
        let number = account.number();
        self.add_account(account)?;
        Ok(number)
    }

    /// Open and register a savings account, returning its number
    ///
    /// # Errors
    ///
    /// [`LedgerError::InterestRateOutOfRange`] if `interest_rate` is outside
    /// `0..=0.1`.
    pub fn open_savings(
        &mut self,
        owner: Arc<Customer>,
        interest_rate: Decimal,
    ) -> Result<AccountNumber, LedgerError> {
        let account = Account::savings(self.sequence.next_number(), owner, interest_rate)?;
        let number = account.number();
        self.add_account(account)?;
        Ok(number)
    }

    /// Register an externally constructed account
    ///
    /// # Errors
    ///
    /// [`LedgerError::DuplicateAccount`] if an account with the same number
    /// is already registered. The rejected account is dropped unchanged.
    pub fn add_account(&mut self, account: Account) -> Result<(), LedgerError> {
        let number = account.number();
        if self.index_of(number).is_some() {
            warn!(account = number, ledger = %self.name, "rejected duplicate account number");
            return Err(LedgerError::DuplicateAccount { account: number });
        }
        debug!(account = number, ledger = %self.name, "account registered");
        self.accounts.push(account);
        Ok(())
    }

    /// Remove an account from the registry, returning it
    ///
    /// Only membership changes; the returned account keeps its balance and
    /// history.
    ///
    /// # Errors
    ///
    /// [`LedgerError::AccountNotFound`] if no account carries `number`.
    pub fn remove_account(&mut self, number: AccountNumber) -> Result<Account, LedgerError> {
        let index = self
            .index_of(number)
            .ok_or(LedgerError::AccountNotFound { account: number })?;
        debug!(account = number, ledger = %self.name, "account removed");
        Ok(self.accounts.remove(index))
    }

    /// Look up an account by number
    pub fn find_account(&self, number: AccountNumber) -> Option<&Account> {
        self.accounts.iter().find(|a| a.number() == number)
    }

    /// Look up an account by number for mutation
    pub fn find_account_mut(&mut self, number: AccountNumber) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.number() == number)
    }

    /// Accounts whose owner name contains `pattern`, case-insensitively
    pub fn find_accounts_by_owner_name(&self, pattern: &str) -> Vec<&Account> {
        let pattern = pattern.to_lowercase();
        self.accounts
            .iter()
            .filter(|a| a.owner().name().to_lowercase().contains(&pattern))
            .collect()
    }

    /// All registered accounts, in registration order
    pub fn accounts(&self) -> Vec<&Account> {
        self.accounts.iter().collect()
    }

    /// The registered checking accounts, in registration order
    pub fn checking_accounts(&self) -> Vec<&Account> {
        self.accounts.iter().filter(|a| a.is_checking()).collect()
    }

    /// The registered savings accounts, in registration order
    pub fn savings_accounts(&self) -> Vec<&Account> {
        self.accounts.iter().filter(|a| a.is_savings()).collect()
    }

    /// Number of registered accounts
    pub fn total_accounts(&self) -> usize {
        self.accounts.len()
    }

    /// Sum of all registered balances, recomputed on every call
    pub fn total_capital(&self) -> Decimal {
        self.accounts.iter().map(Account::balance).sum()
    }

    /// Accounts currently below zero, in registration order
    pub fn negative_balance_accounts(&self) -> Vec<&Account> {
        self.accounts
            .iter()
            .filter(|a| a.balance() < Decimal::ZERO)
            .collect()
    }

    /// The `n` accounts with the highest balances, descending
    ///
    /// The sort is stable, so accounts with equal balances keep their
    /// registration order.
    pub fn top_balances(&self, n: usize) -> Vec<&Account> {
        let mut ranked: Vec<&Account> = self.accounts.iter().collect();
        ranked.sort_by(|a, b| b.balance().cmp(&a.balance()));
        ranked.truncate(n);
        ranked
    }

    /// Transfer `amount` between two registered accounts
    ///
    /// Resolves both numbers first, then delegates to
    /// [`Account::transfer`], inheriting its compensation semantics.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::SelfTransfer`] if `from == to`
    /// - [`LedgerError::AccountNotFound`] naming whichever side is missing
    /// - any error from [`Account::transfer`]
    pub fn transfer(
        &mut self,
        from: AccountNumber,
        to: AccountNumber,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        if from == to {
            return Err(LedgerError::SelfTransfer { account: from });
        }
        let from_index = self
            .index_of(from)
            .ok_or(LedgerError::AccountNotFound { account: from })?;
        let to_index = self
            .index_of(to)
            .ok_or(LedgerError::AccountNotFound { account: to })?;

        let (source, dest) = if from_index < to_index {
            let (head, tail) = self.accounts.split_at_mut(to_index);
            (&mut head[from_index], &mut tail[0])
        } else {
            let (head, tail) = self.accounts.split_at_mut(from_index);
            (&mut tail[0], &mut head[to_index])
        };

        source.transfer(dest, amount)?;
        debug!(from, to, %amount, ledger = %self.name, "transfer completed");
        Ok(())
    }

    /// Apply the monthly rate to every account as of now
    ///
    /// See [`Ledger::apply_monthly_rates_at`].
    pub fn apply_monthly_rates(&mut self) -> Vec<(AccountNumber, RateOutcome)> {
        self.apply_monthly_rates_at(Utc::now())
    }

    /// Apply the monthly rate to every account as of `now`
    ///
    /// Accounts are processed in registration order, each independently; a
    /// no-op on one account never blocks the rest. The per-account outcomes
    /// are returned in the same order.
    pub fn apply_monthly_rates_at(
        &mut self,
        now: DateTime<Utc>,
    ) -> Vec<(AccountNumber, RateOutcome)> {
        self.accounts
            .iter_mut()
            .map(|account| (account.number(), account.apply_monthly_rate_at(now)))
            .collect()
    }

    /// Aggregate snapshot for the reporting layer
    pub fn report(&self) -> LedgerReport {
        LedgerReport::of(self)
    }

    fn index_of(&self, number: AccountNumber) -> Option<usize> {
        self.accounts.iter().position(|a| a.number() == number)
    }
}
