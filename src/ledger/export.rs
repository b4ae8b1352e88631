//! Exporting the ledger as CSV.

use std::{fmt::Display, io};

use crate::{Error, ledger::Expense};

/// The header row of an exported CSV file.
const CSV_HEADER: [&str; 5] = [
    "Date",
    "Expense Category",
    "Expense Description",
    "Amount",
    "Notes",
];

/// Write `expenses` as CSV, one row per expense after the header row.
///
/// Amounts are written with two decimal places. The expense ID is not
/// exported.
///
/// # Errors
/// Returns [Error::CsvError] if the CSV could not be written.
pub fn write_expenses_csv(expenses: &[Expense], writer: impl io::Write) -> Result<(), Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(CSV_HEADER).map_err(csv_error)?;

    for expense in expenses {
        let amount = format!("{:.2}", expense.amount);

        csv_writer
            .write_record([
                expense.date.as_str(),
                expense.category.as_str(),
                expense.description.as_str(),
                amount.as_str(),
                expense.notes.as_str(),
            ])
            .map_err(csv_error)?;
    }

    csv_writer
        .flush()
        .map_err(|error| Error::CsvError(error.to_string()))?;

    Ok(())
}

/// Write `expenses` as CSV into a byte buffer.
///
/// # Errors
/// Returns [Error::CsvError] if the CSV could not be written.
pub fn expenses_to_csv(expenses: &[Expense]) -> Result<Vec<u8>, Error> {
    let mut buffer = Vec::new();
    write_expenses_csv(expenses, &mut buffer)?;

    Ok(buffer)
}

/// The name for the downloaded CSV file, e.g. `Acme_expenses_2024.csv`.
pub fn export_file_name(business_name: &str, tax_year: impl Display) -> String {
    format!("{business_name}_expenses_{tax_year}.csv")
}

fn csv_error(error: csv::Error) -> Error {
    tracing::error!("could not write CSV: {error}");
    Error::CsvError(error.to_string())
}
