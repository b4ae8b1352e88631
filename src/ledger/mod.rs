//! The expense ledger.
//!
//! This module contains everything related to storing expenses:
//! - The `Expense` model and `NewExpense` for appending expenses
//! - [LedgerStore], a SQLite file holding the `expenses` table
//! - Importing a store file uploaded by the user
//! - Exporting the ledger as CSV

mod core;
mod export;
mod import;
mod store;

pub use core::{Expense, ExpenseCategory, NewExpense};
pub use export::{export_file_name, expenses_to_csv};
pub use import::import_store;
pub use store::LedgerStore;
