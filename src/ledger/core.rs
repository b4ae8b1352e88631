//! Defines the core data models and database queries for expenses.

use std::fmt::Display;

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// Alias for the integer type used for expense IDs.
pub type ExpenseId = i64;

/// The kinds of expense offered by the expense form.
///
/// The database stores the category as free text, so expenses read back from
/// a store may carry categories outside of this list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    /// Wages paid to employees.
    Salaries,
    /// Payments to contractors and freelancers.
    Contractors,
    /// Flights, hotels and other travel costs.
    Travel,
    /// Events, meals and memberships for meeting people.
    Networking,
    /// Anything else.
    Other,
}

impl ExpenseCategory {
    /// Every category, in the order they are offered to the user.
    pub const ALL: [ExpenseCategory; 5] = [
        ExpenseCategory::Salaries,
        ExpenseCategory::Contractors,
        ExpenseCategory::Travel,
        ExpenseCategory::Networking,
        ExpenseCategory::Other,
    ];

    /// The category name as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Salaries => "Salaries",
            ExpenseCategory::Contractors => "Contractors",
            ExpenseCategory::Travel => "Travel",
            ExpenseCategory::Networking => "Networking",
            ExpenseCategory::Other => "Other",
        }
    }
}

impl Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An expense as it is stored in the ledger.
///
/// Text fields are kept exactly as stored, since stores uploaded by the user
/// may have been written by other tools.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    /// The ID of the expense, assigned by the database.
    pub id: ExpenseId,
    /// When the expense happened, as `YYYY-MM-DD` text.
    pub date: String,
    /// What kind of expense this is, e.g. "Travel".
    pub category: String,
    /// A short description of what the money was spent on.
    pub description: String,
    /// How much was spent, in dollars.
    pub amount: f64,
    /// Any extra notes about the expense.
    pub notes: String,
}

/// An expense that has not been added to the ledger yet.
///
/// To create a new `NewExpense`, use [NewExpense::build].
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// When the expense happened.
    pub date: Date,
    /// What kind of expense this is.
    pub category: ExpenseCategory,
    /// A short description of what the money was spent on.
    ///
    /// Defaults to the empty string.
    pub description: String,
    /// How much was spent, in dollars.
    ///
    /// The form only offers non-negative amounts, but the ledger does not
    /// check the sign.
    pub amount: f64,
    /// Any extra notes about the expense.
    ///
    /// Defaults to the empty string.
    pub notes: String,
}

impl NewExpense {
    /// Start building a new expense with an empty description and notes.
    pub fn build(date: Date, category: ExpenseCategory, amount: f64) -> Self {
        Self {
            date,
            category,
            description: String::new(),
            amount,
            notes: String::new(),
        }
    }

    /// Set the description for the expense.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Set the notes for the expense.
    pub fn notes(mut self, notes: &str) -> Self {
        self.notes = notes.to_owned();
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// The columns of the `expenses` table, in the order they are defined.
pub(super) const EXPENSE_COLUMNS: [&str; 6] =
    ["id", "date", "category", "description", "amount", "notes"];

/// Create the expenses table in the database if it does not exist yet.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub(super) fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expenses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT,
            category TEXT,
            description TEXT,
            amount REAL,
            notes TEXT
        )",
        (),
    )?;

    Ok(())
}

/// Check that the database behind `connection` can be used as a ledger.
///
/// A database without an `expenses` table is compatible, the table will be
/// created by [create_expense_table].
///
/// # Errors
/// This function will return a:
/// - [Error::IncompatibleStore] if the file is not a SQLite database or the
///   `expenses` table is missing columns,
/// - or [Error::SqlError] if there is some other SQL error.
pub(super) fn check_expense_table(connection: &Connection) -> Result<(), Error> {
    let columns = connection
        .prepare("SELECT name FROM pragma_table_info('expenses')")?
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<String>, rusqlite::Error>>()?;

    if columns.is_empty() {
        return Ok(());
    }

    let missing_columns: Vec<&str> = EXPENSE_COLUMNS
        .into_iter()
        .filter(|column| !columns.iter().any(|existing| existing == column))
        .collect();

    if missing_columns.is_empty() {
        Ok(())
    } else {
        Err(Error::IncompatibleStore(format!(
            "the expenses table is missing the column(s) {}",
            missing_columns.join(", ")
        )))
    }
}

/// Add an expense to the database and return it with its new ID.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error,
/// e.g. the table has not been created.
pub(super) fn insert_expense(
    expense: NewExpense,
    connection: &Connection,
) -> Result<Expense, Error> {
    let expense = connection
        .prepare(
            "INSERT INTO expenses (date, category, description, amount, notes)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, date, category, description, amount, notes",
        )?
        .query_row(
            (
                expense.date,
                expense.category.as_str(),
                expense.description,
                expense.amount,
                expense.notes,
            ),
            map_expense_row,
        )?;

    Ok(expense)
}

/// Retrieve every expense in the database, oldest ID first.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub(super) fn get_all_expenses(connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(
            "SELECT id, date, category, description, amount, notes FROM expenses ORDER BY id ASC",
        )?
        .query_map([], map_expense_row)?
        .collect::<Result<Vec<Expense>, rusqlite::Error>>()
        .map_err(|error| error.into())
}

/// Map a database row to an Expense.
///
/// NULL text columns are read as empty strings and a NULL amount as zero.
fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let date: Option<String> = row.get(1)?;
    let category: Option<String> = row.get(2)?;
    let description: Option<String> = row.get(3)?;
    let amount: Option<f64> = row.get(4)?;
    let notes: Option<String> = row.get(5)?;

    Ok(Expense {
        id,
        date: date.unwrap_or_default(),
        category: category.unwrap_or_default(),
        description: description.unwrap_or_default(),
        amount: amount.unwrap_or_default(),
        notes: notes.unwrap_or_default(),
    })
}

/// Get the total number of expenses in the database.
#[cfg(test)]
pub(super) fn count_expenses(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM expenses;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

// ============================================================================
// TESTS
// ============================================================================
