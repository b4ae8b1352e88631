//! A ledger backed by a SQLite file.

use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::{
    Error,
    ledger::core::{
        Expense, NewExpense, check_expense_table, create_expense_table, get_all_expenses,
        insert_expense,
    },
};

/// The expense ledger stored in the SQLite file at `path`.
///
/// Each operation opens its own connection and closes it before returning,
/// so a `LedgerStore` is just a path and is cheap to clone.
///
/// Sessions that point at the same file are not coordinated with each other,
/// concurrent appends rely on SQLite's per-statement atomicity.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    /// Create a handle to the ledger at `path`.
    ///
    /// Nothing is read or written until one of the operations is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path to the SQLite file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The name of the SQLite file, for display.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Make sure the file exists and has the `expenses` table.
    ///
    /// Calling this on a store that is already initialized leaves its
    /// expenses untouched.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::IncompatibleStore] if the file is not a SQLite database or its
    ///   `expenses` table is missing columns,
    /// - [Error::StoreIo] if the file cannot be opened or created,
    /// - or [Error::SqlError] if there is some other SQL error.
    pub fn initialize(&self) -> Result<(), Error> {
        let connection = self.open()?;

        check_expense_table(&connection)?;
        create_expense_table(&connection)?;

        tracing::debug!("initialized expense store {}", self.path.display());

        Ok(())
    }

    /// Check that the file can be used as a ledger without changing it.
    ///
    /// # Errors
    /// Returns the same errors as [LedgerStore::initialize].
    pub fn check_compatible(&self) -> Result<(), Error> {
        let connection = self.open()?;

        check_expense_table(&connection)
    }

    /// Add `expense` to the ledger and return it with its assigned ID.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::StoreIo] if the file cannot be opened,
    /// - or [Error::SqlError] if the expense cannot be written, e.g. the store
    ///   has not been initialized or the file is read-only.
    pub fn append(&self, expense: NewExpense) -> Result<Expense, Error> {
        let connection = self.open()?;

        insert_expense(expense, &connection)
    }

    /// Get every expense in the ledger, ordered by ID.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::StoreIo] if the file cannot be opened,
    /// - or [Error::SqlError] if there is some SQL error.
    pub fn read_all(&self) -> Result<Vec<Expense>, Error> {
        let connection = self.open()?;

        get_all_expenses(&connection)
    }

    fn open(&self) -> Result<Connection, Error> {
        Connection::open(&self.path)
            .inspect_err(|error| {
                tracing::error!(
                    "could not open expense store {}: {error}",
                    self.path.display()
                )
            })
            .map_err(|error| error.into())
    }
}
