//! Customer identity data
//!
//! A customer is validated once at construction and immutable afterwards.
//! Accounts reference their owner through an `Arc<Customer>`, so one customer
//! may own any number of accounts without any of them owning the identity
//! record exclusively.

use chrono::{Datelike, NaiveDate, Utc};
use serde::Serialize;

use super::error::LedgerError;

/// A validated retail-banking customer
///
/// All fields are checked by [`Customer::new`]; there is no way to construct
/// an invalid customer or to mutate one after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    name: String,
    national_id: String,
    birth_date: NaiveDate,
    address: String,
}

impl Customer {
    /// Create a validated customer
    ///
    /// # Errors
    ///
    /// - [`LedgerError::EmptyName`] if `name` is blank
    /// - [`LedgerError::InvalidNationalId`] if `national_id` is blank or not
    ///   exactly 11 characters long
    /// - [`LedgerError::BirthDateInFuture`] if `birth_date` is after today
    /// - [`LedgerError::EmptyAddress`] if `address` is blank
    pub fn new(
        name: &str,
        national_id: &str,
        birth_date: NaiveDate,
        address: &str,
    ) -> Result<Self, LedgerError> {
        if name.trim().is_empty() {
            return Err(LedgerError::EmptyName);
        }
        if national_id.trim().is_empty() || national_id.chars().count() != 11 {
            return Err(LedgerError::invalid_national_id(national_id));
        }
        if birth_date > Utc::now().date_naive() {
            return Err(LedgerError::BirthDateInFuture { date: birth_date });
        }
        if address.trim().is_empty() {
            return Err(LedgerError::EmptyAddress);
        }

        Ok(Customer {
            name: name.to_string(),
            national_id: national_id.to_string(),
            birth_date,
            address: address.to_string(),
        })
    }

    /// The customer's full name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The 11-character national ID
    pub fn national_id(&self) -> &str {
        &self.national_id
    }

    /// Date of birth
    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    /// Postal address
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Age in whole years as of today
    ///
    /// Derived on every call, never stored.
    pub fn age(&self) -> i32 {
        self.age_at(Utc::now().date_naive())
    }

    /// Age in whole years as of `on`
    pub fn age_at(&self, on: NaiveDate) -> i32 {
        let mut age = on.year() - self.birth_date.year();
        if on.ordinal() < self.birth_date.ordinal() {
            age -= 1;
        }
        age
    }
}
