//! Account state and balance operations
//!
//! An [`Account`] is a closed tagged-variant type: common state (number,
//! balance, owner, movement history) lives on the struct, and the
//! variant-specific payload lives in [`AccountKind`]. Withdrawal, deposit,
//! and monthly-rate rules dispatch on the variant:
//!
//! - **Checking**: withdrawals up to 5000 per operation may overdraw into a
//!   credit limit; deposits repay the overdraft before touching the balance;
//!   a 1% monthly fee is charged on positive balances.
//! - **Savings**: withdrawals up to 1000 per operation, never beyond the
//!   balance; deposits credit the balance directly; instead of a fee, the
//!   monthly rate hook credits interest, at most once per calendar month.
//!
//! Every successful balance change appends exactly one [`Movement`] in the
//! same operation.

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

use super::customer::Customer;
use super::error::LedgerError;
use super::movement::{Movement, MovementKind};

/// Account identifier, assigned sequentially from 1000
pub type AccountNumber = u32;

/// Per-withdrawal cap for checking accounts
pub const CHECKING_WITHDRAW_LIMIT: Decimal = dec!(5000);

/// Monthly operation fee rate for checking accounts (1%)
pub const CHECKING_OPERATION_RATE: Decimal = dec!(0.01);

/// Per-withdrawal cap for savings accounts
pub const SAVINGS_WITHDRAW_LIMIT: Decimal = dec!(1000);

/// Savings accounts pay no operation fee
pub const SAVINGS_OPERATION_RATE: Decimal = Decimal::ZERO;

/// Upper bound for the monthly savings interest rate (10%)
pub const MAX_INTEREST_RATE: Decimal = dec!(0.1);

/// Variant-specific account state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    /// Checking account with an overdraft facility
    Checking {
        /// Maximum overdraft the account may consume
        credit_limit: Decimal,
        /// Portion of the credit limit currently consumed
        used_limit: Decimal,
    },
    /// Savings account that accrues monthly interest
    Savings {
        /// Monthly interest rate, between 0 and [`MAX_INTEREST_RATE`]
        interest_rate: Decimal,
        /// When interest was last credited; starts at creation time
        last_accrual: DateTime<Utc>,
    },
}

/// Outcome of a savings interest accrual attempt
///
/// Only `Credited` mutates the account; the other outcomes report why
/// nothing happened without treating it as an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccrualOutcome {
    /// Interest was credited and the accrual marker advanced
    Credited {
        /// The credited interest amount
        amount: Decimal,
    },
    /// Interest was already credited in this calendar month
    AlreadyAccrued,
    /// The balance was not positive; the accrual marker did not advance
    NothingToAccrue,
}

/// Outcome of applying the monthly rate to one account
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RateOutcome {
    /// A checking fee was charged against a positive balance
    FeeCharged {
        /// The charged fee
        amount: Decimal,
    },
    /// Savings interest was credited
    InterestCredited {
        /// The credited interest
        amount: Decimal,
    },
    /// Savings interest was already credited this calendar month
    AlreadyAccrued,
    /// Nothing to charge or credit (non-positive balance)
    Skipped,
}

/// A single bank account: common state plus a variant payload
#[derive(Debug, Clone)]
pub struct Account {
    number: AccountNumber,
    balance: Decimal,
    owner: Arc<Customer>,
    history: Vec<Movement>,
    kind: AccountKind,
}

impl Account {
    /// Open a checking account with a zero balance
    ///
    /// # Errors
    ///
    /// [`LedgerError::NegativeCreditLimit`] if `credit_limit < 0`.
    pub fn checking(
        number: AccountNumber,
        owner: Arc<Customer>,
        credit_limit: Decimal,
    ) -> Result<Self, LedgerError> {
        if credit_limit < Decimal::ZERO {
            return Err(LedgerError::NegativeCreditLimit {
                limit: credit_limit,
            });
        }
        Ok(Self::open(
            number,
            owner,
            AccountKind::Checking {
                credit_limit,
                used_limit: Decimal::ZERO,
            },
        ))
    }

    /// Open a savings account with a zero balance
    ///
    /// The accrual marker starts at the creation time, so the first interest
    /// credit can happen no earlier than the next calendar month.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InterestRateOutOfRange`] if `interest_rate` is outside
    /// `0..=0.1`.
    pub fn savings(
        number: AccountNumber,
        owner: Arc<Customer>,
        interest_rate: Decimal,
    ) -> Result<Self, LedgerError> {
        validate_interest_rate(interest_rate)?;
        Ok(Self::open(
            number,
            owner,
            AccountKind::Savings {
                interest_rate,
                last_accrual: Utc::now(),
            },
        ))
    }

    fn open(number: AccountNumber, owner: Arc<Customer>, kind: AccountKind) -> Self {
        let mut account = Account {
            number,
            balance: Decimal::ZERO,
            owner,
            history: Vec::new(),
            kind,
        };
        account.record(MovementKind::AccountOpened, Decimal::ZERO);
        account
    }

    /// The unique account number
    pub fn number(&self) -> AccountNumber {
        self.number
    }

    /// Current balance
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// The owning customer
    pub fn owner(&self) -> &Customer {
        &self.owner
    }

    /// Variant payload (overdraft state or interest state)
    pub fn kind(&self) -> &AccountKind {
        &self.kind
    }

    /// Whether this is a checking account
    pub fn is_checking(&self) -> bool {
        matches!(self.kind, AccountKind::Checking { .. })
    }

    /// Whether this is a savings account
    pub fn is_savings(&self) -> bool {
        matches!(self.kind, AccountKind::Savings { .. })
    }

    /// Immutable view of the movement history, oldest first
    ///
    /// The slice borrows the live history; the borrow checker prevents any
    /// mutation while the view is held, so no defensive copy is needed.
    pub fn history(&self) -> &[Movement] {
        &self.history
    }

    /// The variant's fixed per-withdrawal cap
    pub fn withdraw_limit(&self) -> Decimal {
        match self.kind {
            AccountKind::Checking { .. } => CHECKING_WITHDRAW_LIMIT,
            AccountKind::Savings { .. } => SAVINGS_WITHDRAW_LIMIT,
        }
    }

    /// The variant's fixed monthly operation fee rate
    pub fn operation_rate(&self) -> Decimal {
        match self.kind {
            AccountKind::Checking { .. } => CHECKING_OPERATION_RATE,
            AccountKind::Savings { .. } => SAVINGS_OPERATION_RATE,
        }
    }

    /// Overdraft ceiling, `None` for savings accounts
    pub fn credit_limit(&self) -> Option<Decimal> {
        match self.kind {
            AccountKind::Checking { credit_limit, .. } => Some(credit_limit),
            AccountKind::Savings { .. } => None,
        }
    }

    /// Consumed overdraft, `None` for savings accounts
    pub fn used_limit(&self) -> Option<Decimal> {
        match self.kind {
            AccountKind::Checking { used_limit, .. } => Some(used_limit),
            AccountKind::Savings { .. } => None,
        }
    }

    /// Remaining overdraft headroom, `None` for savings accounts
    pub fn available_credit(&self) -> Option<Decimal> {
        match self.kind {
            AccountKind::Checking {
                credit_limit,
                used_limit,
            } => Some(credit_limit - used_limit),
            AccountKind::Savings { .. } => None,
        }
    }

    /// Monthly interest rate, `None` for checking accounts
    pub fn interest_rate(&self) -> Option<Decimal> {
        match self.kind {
            AccountKind::Savings { interest_rate, .. } => Some(interest_rate),
            AccountKind::Checking { .. } => None,
        }
    }

    /// When interest was last credited, `None` for checking accounts
    pub fn last_accrual(&self) -> Option<DateTime<Utc>> {
        match self.kind {
            AccountKind::Savings { last_accrual, .. } => Some(last_accrual),
            AccountKind::Checking { .. } => None,
        }
    }

    /// Withdraw `amount` from the account
    ///
    /// Checking accounts may overdraw: once the balance is exhausted, the
    /// shortfall is taken from the credit limit. Savings accounts never go
    /// below zero.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NonPositiveAmount`] if `amount <= 0`
    /// - [`LedgerError::WithdrawLimitExceeded`] if `amount` exceeds the
    ///   variant's per-operation cap
    /// - [`LedgerError::InsufficientFunds`] if `amount` exceeds the balance
    ///   plus any remaining overdraft headroom
    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::non_positive_amount(amount));
        }
        let limit = self.withdraw_limit();
        if amount > limit {
            return Err(LedgerError::withdraw_limit_exceeded(
                self.number,
                limit,
                amount,
            ));
        }

        match &mut self.kind {
            AccountKind::Checking {
                credit_limit,
                used_limit,
            } => {
                let available = self.balance + (*credit_limit - *used_limit);
                if amount > available {
                    return Err(LedgerError::insufficient_funds(
                        self.number,
                        available,
                        amount,
                    ));
                }
                if amount <= self.balance {
                    self.balance -= amount;
                } else {
                    let shortfall = amount - self.balance;
                    self.balance = Decimal::ZERO;
                    *used_limit += shortfall;
                }
            }
            AccountKind::Savings { .. } => {
                if amount > self.balance {
                    return Err(LedgerError::insufficient_funds(
                        self.number,
                        self.balance,
                        amount,
                    ));
                }
                self.balance -= amount;
            }
        }

        self.record(MovementKind::Withdrawal, -amount);
        Ok(())
    }

    /// Deposit `amount` into the account
    ///
    /// On a checking account with consumed overdraft, the deposit repays the
    /// overdraft first; only the remainder, if any, reaches the balance. The
    /// recorded movement always carries the full deposited amount.
    ///
    /// # Errors
    ///
    /// [`LedgerError::NonPositiveAmount`] if `amount <= 0`.
    pub fn deposit(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::non_positive_amount(amount));
        }

        match &mut self.kind {
            AccountKind::Checking { used_limit, .. } if *used_limit > Decimal::ZERO => {
                if amount <= *used_limit {
                    *used_limit -= amount;
                } else {
                    let remainder = amount - *used_limit;
                    *used_limit = Decimal::ZERO;
                    self.balance += remainder;
                }
            }
            AccountKind::Checking { .. } | AccountKind::Savings { .. } => {
                self.balance += amount;
            }
        }

        self.record(MovementKind::Deposit, amount);
        Ok(())
    }

    /// Transfer `amount` from this account into `dest`
    ///
    /// Compensating two-step protocol, not an atomic transaction: first the
    /// withdrawal on `self`, then the deposit on `dest`. A failed withdrawal
    /// propagates with `dest` untouched. A failed deposit triggers a
    /// compensating deposit back into `self`.
    ///
    /// On success a transfer marker is appended on the source, in addition
    /// to the withdrawal movement.
    ///
    /// # Errors
    ///
    /// - any withdrawal error from `self` (nothing was moved)
    /// - [`LedgerError::TransferRolledBack`] if the deposit leg failed and
    ///   the compensation restored the source balance
    /// - [`LedgerError::CompensationFailed`] if the compensating deposit
    ///   itself failed; the source state no longer matches its pre-transfer
    ///   balance and the caller must surface this
    pub fn transfer(&mut self, dest: &mut Account, amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::non_positive_amount(amount));
        }

        self.withdraw(amount)?;

        if let Err(rejection) = dest.deposit(amount) {
            warn!(
                from = self.number,
                to = dest.number,
                %amount,
                %rejection,
                "transfer deposit leg rejected, compensating source"
            );
            return match self.deposit(amount) {
                Ok(()) => Err(LedgerError::transfer_rolled_back(
                    self.number,
                    dest.number,
                    amount,
                )),
                Err(_) => Err(LedgerError::compensation_failed(self.number, amount)),
            };
        }

        self.record(MovementKind::TransferOut { to: dest.number }, -amount);
        Ok(())
    }

    /// Apply the monthly rate for this account as of now
    ///
    /// See [`Account::apply_monthly_rate_at`].
    pub fn apply_monthly_rate(&mut self) -> RateOutcome {
        self.apply_monthly_rate_at(Utc::now())
    }

    /// Apply the monthly rate for this account as of `now`
    ///
    /// Checking accounts are charged `balance * operation_rate` when the
    /// balance is positive. Savings accounts credit interest instead,
    /// gated to once per calendar month.
    pub fn apply_monthly_rate_at(&mut self, now: DateTime<Utc>) -> RateOutcome {
        match self.kind {
            AccountKind::Checking { .. } => {
                if self.balance <= Decimal::ZERO {
                    return RateOutcome::Skipped;
                }
                let fee = self.balance * CHECKING_OPERATION_RATE;
                self.balance -= fee;
                self.record_at(now, MovementKind::MonthlyFee, -fee);
                RateOutcome::FeeCharged { amount: fee }
            }
            AccountKind::Savings { .. } => match self.accrue_interest_at(now) {
                Ok(AccrualOutcome::Credited { amount }) => RateOutcome::InterestCredited { amount },
                Ok(AccrualOutcome::AlreadyAccrued) => RateOutcome::AlreadyAccrued,
                _ => RateOutcome::Skipped,
            },
        }
    }

    /// Credit monthly interest as of now
    ///
    /// See [`Account::accrue_interest_at`].
    pub fn accrue_interest(&mut self) -> Result<AccrualOutcome, LedgerError> {
        self.accrue_interest_at(Utc::now())
    }

    /// Credit monthly interest as of `now`
    ///
    /// At most one credit per calendar month/year pair, compared against the
    /// accrual marker. With a positive balance in a new month, credits
    /// `balance * interest_rate` and advances the marker to `now`. In the
    /// same month the call is a reported no-op. With a non-positive balance
    /// the marker stays put, so accrual is retried until the balance turns
    /// positive in a later month.
    ///
    /// # Errors
    ///
    /// [`LedgerError::WrongAccountKind`] on a checking account.
    pub fn accrue_interest_at(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<AccrualOutcome, LedgerError> {
        let AccountKind::Savings {
            interest_rate,
            last_accrual,
        } = &mut self.kind
        else {
            return Err(LedgerError::wrong_account_kind(
                self.number,
                "accrue_interest",
            ));
        };

        if now.month() == last_accrual.month() && now.year() == last_accrual.year() {
            return Ok(AccrualOutcome::AlreadyAccrued);
        }
        if self.balance <= Decimal::ZERO {
            return Ok(AccrualOutcome::NothingToAccrue);
        }

        let interest = self.balance * *interest_rate;
        self.balance += interest;
        *last_accrual = now;
        self.record_at(now, MovementKind::Interest, interest);
        Ok(AccrualOutcome::Credited { amount: interest })
    }

    /// Cumulative interest gain over `months` of compounding
    ///
    /// Iterative compounding of the current balance at the current rate;
    /// the account itself is not mutated.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::WrongAccountKind`] on a checking account
    /// - [`LedgerError::NonPositiveMonths`] if `months <= 0`
    pub fn projected_interest(&self, months: i32) -> Result<Decimal, LedgerError> {
        let AccountKind::Savings { interest_rate, .. } = &self.kind else {
            return Err(LedgerError::wrong_account_kind(
                self.number,
                "projected_interest",
            ));
        };
        if months <= 0 {
            return Err(LedgerError::NonPositiveMonths { months });
        }

        let mut projected = self.balance;
        for _ in 0..months {
            projected += projected * *interest_rate;
        }
        Ok(projected - self.balance)
    }

    /// Raise the overdraft ceiling of a checking account
    ///
    /// # Errors
    ///
    /// - [`LedgerError::WrongAccountKind`] on a savings account
    /// - [`LedgerError::CreditLimitNotIncreased`] unless `new_limit` is
    ///   strictly greater than the current limit
    pub fn increase_credit_limit(&mut self, new_limit: Decimal) -> Result<(), LedgerError> {
        let AccountKind::Checking { credit_limit, .. } = &mut self.kind else {
            return Err(LedgerError::wrong_account_kind(
                self.number,
                "increase_credit_limit",
            ));
        };
        if new_limit <= *credit_limit {
            return Err(LedgerError::CreditLimitNotIncreased {
                current: *credit_limit,
                proposed: new_limit,
            });
        }
        *credit_limit = new_limit;
        Ok(())
    }

    /// Change the monthly interest rate of a savings account
    ///
    /// # Errors
    ///
    /// - [`LedgerError::WrongAccountKind`] on a checking account
    /// - [`LedgerError::InterestRateOutOfRange`] if `rate` is outside `0..=0.1`
    pub fn set_interest_rate(&mut self, rate: Decimal) -> Result<(), LedgerError> {
        validate_interest_rate(rate)?;
        let AccountKind::Savings { interest_rate, .. } = &mut self.kind else {
            return Err(LedgerError::wrong_account_kind(
                self.number,
                "set_interest_rate",
            ));
        };
        *interest_rate = rate;
        Ok(())
    }

    fn record(&mut self, kind: MovementKind, amount: Decimal) {
        self.history.push(Movement::new(kind, amount, self.balance));
    }

    fn record_at(&mut self, at: DateTime<Utc>, kind: MovementKind, amount: Decimal) {
        self.history.push(Movement {
            at,
            kind,
            amount,
            balance_after: self.balance,
        });
    }
}

fn validate_interest_rate(rate: Decimal) -> Result<(), LedgerError> {
    if rate < Decimal::ZERO || rate > MAX_INTEREST_RATE {
        return Err(LedgerError::InterestRateOutOfRange { rate });
    }
    Ok(())
}
