//! The state of one user's workflow.

use std::fmt::Display;

use serde::Deserialize;

use crate::{Error, ledger::LedgerStore, workflow::Step};

/// A tax year between 2000 and 2100 (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TaxYear(i32);

impl TaxYear {
    /// The earliest supported tax year.
    pub const MIN: i32 = 2000;
    /// The latest supported tax year.
    pub const MAX: i32 = 2100;

    /// Create a tax year.
    ///
    /// # Errors
    /// Returns [Error::InvalidTaxYear] if `year` is outside of
    /// [TaxYear::MIN]..=[TaxYear::MAX].
    pub fn new(year: i32) -> Result<Self, Error> {
        if (Self::MIN..=Self::MAX).contains(&year) {
            Ok(Self(year))
        } else {
            Err(Error::InvalidTaxYear(year))
        }
    }

    /// The year as a number.
    pub fn as_i32(self) -> i32 {
        self.0
    }
}

impl Display for TaxYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the business is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Jurisdiction {
    /// The state of Delaware.
    #[default]
    Delaware,
    /// Anywhere else.
    Other,
}

impl Jurisdiction {
    /// Every jurisdiction, in the order they are offered to the user.
    pub const ALL: [Jurisdiction; 2] = [Jurisdiction::Delaware, Jurisdiction::Other];

    /// The name shown to the user and used as the form value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Jurisdiction::Delaware => "Delaware",
            Jurisdiction::Other => "Other",
        }
    }
}

/// The business name and tax year, once both have been entered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BusinessDetails<'a> {
    /// The name of the business.
    pub name: &'a str,
    /// The tax year the expenses are recorded for.
    pub tax_year: TaxYear,
}

/// Everything remembered about one user's visit.
///
/// A new session starts on [Step::Details] with no business details and the
/// server's default store.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// The step the user is on.
    pub step: Step,
    /// The name of the business, empty until entered.
    pub business_name: String,
    /// The tax year, `None` until entered.
    pub tax_year: Option<TaxYear>,
    /// Where the business is registered.
    pub jurisdiction: Jurisdiction,
    /// The store that expenses are written to and read from.
    pub store: LedgerStore,
}

impl Session {
    /// Create a session at the first step that uses `store`.
    pub fn new(store: LedgerStore) -> Self {
        Self {
            step: Step::default(),
            business_name: String::new(),
            tax_year: None,
            jurisdiction: Jurisdiction::default(),
            store,
        }
    }

    /// The business details, or `None` if the name or tax year is missing.
    pub fn business_details(&self) -> Option<BusinessDetails<'_>> {
        if self.business_name.trim().is_empty() {
            return None;
        }

        self.tax_year.map(|tax_year| BusinessDetails {
            name: &self.business_name,
            tax_year,
        })
    }
}
