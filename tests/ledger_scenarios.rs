//! End-to-end ledger scenarios
//!
//! These tests drive the public API the way a front-end would: customers are
//! created once, accounts are opened through the ledger, and every balance
//! assertion goes through registry lookups rather than direct account
//! handles.

use bank_ledger::{
    AccrualOutcome, Customer, Ledger, LedgerError, MovementKind, RateOutcome,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal_macros::dec;
use std::sync::Arc;

fn customer(name: &str, national_id: &str) -> Arc<Customer> {
    Arc::new(
        Customer::new(
            name,
            national_id,
            NaiveDate::from_ymd_opt(1988, 2, 14).unwrap(),
            "Rua do Comércio 55",
        )
        .unwrap(),
    )
}

fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 10, 30, 0).unwrap()
}

#[test]
fn full_branch_day() {
    let mut ledger = Ledger::new("Banco Nacional");
    let maria = customer("Maria Silva", "12345678901");
    let joao = customer("João Santos", "10987654321");

    // Maria holds one account of each variant; João holds a checking account
    let maria_checking = ledger.open_checking(maria.clone(), dec!(2000)).unwrap();
    let maria_savings = ledger.open_savings(maria.clone(), dec!(0.005)).unwrap();
    let joao_checking = ledger.open_checking(joao.clone(), dec!(1000)).unwrap();
    assert_eq!(
        (maria_checking, maria_savings, joao_checking),
        (1000, 1001, 1002)
    );

    // opening deposits
    ledger
        .find_account_mut(maria_checking)
        .unwrap()
        .deposit(dec!(1500))
        .unwrap();
    ledger
        .find_account_mut(maria_savings)
        .unwrap()
        .deposit(dec!(5000))
        .unwrap();
    ledger
        .find_account_mut(joao_checking)
        .unwrap()
        .deposit(dec!(300))
        .unwrap();

    // Maria draws down her checking account into the overdraft
    let account = ledger.find_account_mut(maria_checking).unwrap();
    account.withdraw(dec!(1000)).unwrap();
    assert_eq!(account.balance(), dec!(500));
    account.withdraw(dec!(2000)).unwrap();
    assert_eq!(account.balance(), dec!(0));
    assert_eq!(account.used_limit(), Some(dec!(1500)));

    // a transfer from savings tops João up
    ledger
        .transfer(maria_savings, joao_checking, dec!(700))
        .unwrap();
    assert_eq!(
        ledger.find_account(maria_savings).unwrap().balance(),
        dec!(4300)
    );
    assert_eq!(
        ledger.find_account(joao_checking).unwrap().balance(),
        dec!(1000)
    );
    assert_eq!(
        ledger
            .find_account(maria_savings)
            .unwrap()
            .history()
            .last()
            .unwrap()
            .kind,
        MovementKind::TransferOut { to: joao_checking }
    );

    // month end: fee on positive checking balances, interest on savings
    let outcomes = ledger.apply_monthly_rates_at(at(2032, 3, 31));
    assert_eq!(
        outcomes,
        vec![
            (maria_checking, RateOutcome::Skipped),
            (
                maria_savings,
                RateOutcome::InterestCredited { amount: dec!(21.500) }
            ),
            (joao_checking, RateOutcome::FeeCharged { amount: dec!(10.00) }),
        ]
    );

    // aggregate views reflect all of the above
    let report = ledger.report();
    assert_eq!(report.total_accounts, 3);
    assert_eq!(report.checking_accounts, 2);
    assert_eq!(report.savings_accounts, 1);
    assert_eq!(report.checking_capital, dec!(990.00));
    assert_eq!(report.savings_capital, dec!(4321.500));
    assert_eq!(report.total_capital, report.checking_capital + report.savings_capital);

    let top: Vec<_> = ledger.top_balances(2).iter().map(|a| a.number()).collect();
    assert_eq!(top, vec![maria_savings, joao_checking]);
    assert!(ledger.negative_balance_accounts().is_empty());

    // owner search spans both of Maria's accounts
    assert_eq!(ledger.find_accounts_by_owner_name("silva").len(), 2);
}

#[test]
fn movement_history_counts_every_successful_operation() {
    let mut ledger = Ledger::new("Banco");
    let owner = customer("Pedro Lima", "55544433322");
    let number = ledger.open_savings(owner, dec!(0.005)).unwrap();

    let account = ledger.find_account_mut(number).unwrap();
    account.deposit(dec!(100)).unwrap();
    account.deposit(dec!(50)).unwrap();
    account.withdraw(dec!(30)).unwrap();
    assert!(account.withdraw(dec!(9999)).is_err());

    // three successful operations plus the opening entry; the rejected
    // withdrawal leaves no trace
    assert_eq!(account.history().len(), 4);
    assert_eq!(account.balance(), dec!(120));
}

#[test]
fn savings_interest_cycle_over_three_months() {
    let mut ledger = Ledger::new("Banco");
    let owner = customer("Lia Prado", "66677788899");
    let number = ledger.open_savings(owner, dec!(0.01)).unwrap();
    ledger
        .find_account_mut(number)
        .unwrap()
        .deposit(dec!(1000))
        .unwrap();

    for (month, expected_balance) in [(4, dec!(1010)), (5, dec!(1020.10)), (6, dec!(1030.3010))] {
        let account = ledger.find_account_mut(number).unwrap();
        let outcome = account.accrue_interest_at(at(2032, month, 1)).unwrap();
        assert!(matches!(outcome, AccrualOutcome::Credited { .. }));
        assert_eq!(account.balance(), expected_balance);

        // the rest of the month is a reported no-op
        assert_eq!(
            account.accrue_interest_at(at(2032, month, 20)).unwrap(),
            AccrualOutcome::AlreadyAccrued
        );
    }
}

#[test]
fn projection_matches_manual_compounding() {
    let mut ledger = Ledger::new("Banco");
    let owner = customer("Rui Costa", "11122233344");
    let number = ledger.open_savings(owner, dec!(0.005)).unwrap();
    ledger
        .find_account_mut(number)
        .unwrap()
        .deposit(dec!(5000))
        .unwrap();

    let account = ledger.find_account(number).unwrap();
    assert_eq!(account.projected_interest(3).unwrap(), dec!(75.375625));
    assert_eq!(account.balance(), dec!(5000));
}

#[test]
fn removing_an_account_frees_its_number_for_explicit_reuse() {
    let mut ledger = Ledger::new("Banco");
    let owner = customer("Ana Souza", "12345678901");
    let number = ledger.open_checking(owner.clone(), dec!(100)).unwrap();

    let mut detached = ledger.remove_account(number).unwrap();
    assert_eq!(ledger.total_accounts(), 0);

    // the detached account still works, and can be re-registered
    detached.deposit(dec!(10)).unwrap();
    ledger.add_account(detached).unwrap();
    assert_eq!(ledger.find_account(number).unwrap().balance(), dec!(10));
}

#[test]
fn construction_failures_never_register_anything() {
    let mut ledger = Ledger::new("Banco");
    let owner = customer("Ana Souza", "12345678901");

    assert_eq!(
        ledger.open_checking(owner.clone(), dec!(-50)).unwrap_err(),
        LedgerError::NegativeCreditLimit { limit: dec!(-50) }
    );
    assert_eq!(
        ledger.open_savings(owner.clone(), dec!(0.5)).unwrap_err(),
        LedgerError::InterestRateOutOfRange { rate: dec!(0.5) }
    );
    assert_eq!(ledger.total_accounts(), 0);

    // the next successful open still gets a fresh number
    let number = ledger.open_checking(owner, dec!(0)).unwrap();
    assert!(ledger.find_account(number).is_some());
}
