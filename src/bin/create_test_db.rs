use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use time::macros::date;

use bizledger::{ExpenseCategory, LedgerStore, NewExpense};

/// A utility for creating a sample expense store for bizledger.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate an expense store for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating expense store at {output_path:#?}");
    let store = LedgerStore::new(output_path);
    store.initialize()?;

    println!("Adding sample expenses...");

    let expenses = [
        NewExpense::build(date!(2024 - 01 - 15), ExpenseCategory::Travel, 450.0)
            .description("Flight to client site")
            .notes("Economy, return"),
        NewExpense::build(date!(2024 - 01 - 16), ExpenseCategory::Travel, 300.0)
            .description("Hotel"),
        NewExpense::build(date!(2024 - 01 - 31), ExpenseCategory::Salaries, 4200.0)
            .description("January payroll"),
        NewExpense::build(date!(2024 - 02 - 09), ExpenseCategory::Contractors, 1250.5)
            .description("Website redesign")
            .notes("Invoice #1042"),
        NewExpense::build(date!(2024 - 02 - 20), ExpenseCategory::Networking, 85.0)
            .description("Chamber of commerce breakfast"),
        NewExpense::build(date!(2024 - 03 - 02), ExpenseCategory::Other, 39.99)
            .description("Office supplies"),
    ];

    for expense in expenses {
        store.append(expense)?;
    }

    println!("Success!");

    Ok(())
}
