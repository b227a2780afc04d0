//! Aggregate snapshots for the reporting layer
//!
//! The core never formats or prints. Anything a presentation layer wants to
//! render is exposed as plain data, computed on demand from the live
//! registry.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::Account;

use super::ledger::Ledger;

/// Point-in-time aggregate view of a ledger
///
/// Built by [`Ledger::report`]; holds no references into the registry, so it
/// stays valid after further mutations (and stale, by the same token).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerReport {
    /// Name of the ledger the snapshot was taken from
    pub ledger_name: String,
    /// Number of registered accounts
    pub total_accounts: usize,
    /// Sum of every registered balance
    pub total_capital: Decimal,
    /// Number of checking accounts
    pub checking_accounts: usize,
    /// Capital held in checking accounts
    pub checking_capital: Decimal,
    /// Number of savings accounts
    pub savings_accounts: usize,
    /// Capital held in savings accounts
    pub savings_capital: Decimal,
}

impl LedgerReport {
    pub(crate) fn of(ledger: &Ledger) -> Self {
        let checking = ledger.checking_accounts();
        let savings = ledger.savings_accounts();
        LedgerReport {
            ledger_name: ledger.name().to_string(),
            total_accounts: ledger.total_accounts(),
            total_capital: ledger.total_capital(),
            checking_accounts: checking.len(),
            checking_capital: capital(&checking),
            savings_accounts: savings.len(),
            savings_capital: capital(&savings),
        }
    }
}

fn capital(accounts: &[&Account]) -> Decimal {
    accounts.iter().map(|a| a.balance()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Customer;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    #[test]
    fn report_splits_capital_by_variant() {
        let owner = Arc::new(
            Customer::new(
                "Rui Costa",
                "11122233344",
                NaiveDate::from_ymd_opt(1975, 11, 30).unwrap(),
                "Rua A 7",
            )
            .unwrap(),
        );
        let mut ledger = Ledger::new("Banco Digital");
        let checking = ledger.open_checking(owner.clone(), dec!(500)).unwrap();
        let savings = ledger.open_savings(owner, dec!(0.005)).unwrap();
        ledger
            .find_account_mut(checking)
            .unwrap()
            .deposit(dec!(1200))
            .unwrap();
        ledger
            .find_account_mut(savings)
            .unwrap()
            .deposit(dec!(800))
            .unwrap();

        let report = ledger.report();
        assert_eq!(
            report,
            LedgerReport {
                ledger_name: "Banco Digital".to_string(),
                total_accounts: 2,
                total_capital: dec!(2000),
                checking_accounts: 1,
                checking_capital: dec!(1200),
                savings_accounts: 1,
                savings_capital: dec!(800),
            }
        );

        // snapshots are plain data: mutating the ledger afterwards does not
        // change an already-taken report
        ledger
            .find_account_mut(checking)
            .unwrap()
            .deposit(dec!(1))
            .unwrap();
        assert_eq!(report.total_capital, dec!(2000));
    }

    #[test]
    fn empty_ledger_reports_zeroes() {
        let ledger = Ledger::new("Banco");
        let report = ledger.report();
        assert_eq!(report.total_accounts, 0);
        assert_eq!(report.total_capital, Decimal::ZERO);
    }
}
