//! Importing a ledger store uploaded by the user.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::{Error, ledger::LedgerStore};

/// Every SQLite database file starts with these 16 bytes.
const SQLITE_HEADER: &[u8; 16] = b"SQLite format 3\0";

/// Save the uploaded store `bytes` as `file_name` in `work_dir` and return the
/// store at its new location.
///
/// The bytes are staged in a temporary file and checked with
/// [LedgerStore::check_compatible] before they replace any existing file of the
/// same name, so a rejected upload leaves the working directory untouched.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidFileName] if `file_name` has no usable final component,
/// - [Error::IncompatibleStore] if the bytes are not a compatible SQLite database,
/// - or [Error::StoreIo] if the file cannot be written.
pub fn import_store(work_dir: &Path, file_name: &str, bytes: &[u8]) -> Result<LedgerStore, Error> {
    let file_name = sanitize_file_name(file_name)?;

    if !bytes.starts_with(SQLITE_HEADER) {
        tracing::debug!("rejected upload {file_name:?}: missing SQLite header");
        return Err(Error::IncompatibleStore(
            "the file is not a SQLite database".to_owned(),
        ));
    }

    let mut staged = NamedTempFile::new_in(work_dir)?;
    staged.write_all(bytes)?;
    staged.flush()?;

    LedgerStore::new(staged.path()).check_compatible()?;

    let target = work_dir.join(&file_name);
    staged
        .persist(&target)
        .map_err(|error| Error::from(error.error))?;

    tracing::info!(
        "imported expense store {} ({} bytes)",
        target.display(),
        bytes.len()
    );

    Ok(LedgerStore::new(target))
}

/// Reduce a client supplied file name to its final path component.
fn sanitize_file_name(file_name: &str) -> Result<PathBuf, Error> {
    // Browsers on Windows may send the full path with backslashes.
    let last_component = file_name.rsplit(['/', '\\']).next().unwrap_or_default();

    match Path::new(last_component).file_name() {
        Some(name) if last_component != "." && last_component != ".." => Ok(PathBuf::from(name)),
        _ => Err(Error::InvalidFileName(file_name.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use time::macros::date;

    use crate::{
        Error,
        ledger::{
            ExpenseCategory, LedgerStore, NewExpense,
            import::{import_store, sanitize_file_name},
        },
    };

    fn create_prior_store(dir: &std::path::Path) -> Vec<u8> {
        let path = dir.join("prior.db");
        let store = LedgerStore::new(&path);
        store.initialize().unwrap();
        store
            .append(
                NewExpense::build(date!(2023 - 05 - 01), ExpenseCategory::Salaries, 5000.0)
                    .description("May payroll"),
            )
            .unwrap();
        store
            .append(
                NewExpense::build(date!(2023 - 05 - 03), ExpenseCategory::Networking, 80.0)
                    .description("Meetup tickets"),
            )
            .unwrap();

        fs::read(&path).unwrap()
    }

    #[test]
    fn imported_store_keeps_records_and_continues_ids() {
        let source_dir = tempfile::tempdir().unwrap();
        let work_dir = tempfile::tempdir().unwrap();
        let bytes = create_prior_store(source_dir.path());

        let store = import_store(work_dir.path(), "acme.db", &bytes).unwrap();
        store.initialize().unwrap();

        assert_eq!(store.path(), work_dir.path().join("acme.db"));
        let prior = store.read_all().unwrap();
        assert_eq!(prior.len(), 2);
        assert_eq!(prior[1].description, "Meetup tickets");

        let next = store
            .append(NewExpense::build(
                date!(2023 - 06 - 01),
                ExpenseCategory::Travel,
                120.0,
            ))
            .unwrap();
        assert_eq!(next.id, prior[1].id + 1);
    }

    #[test]
    fn import_overwrites_existing_file() {
        let source_dir = tempfile::tempdir().unwrap();
        let work_dir = tempfile::tempdir().unwrap();
        let existing = LedgerStore::new(work_dir.path().join("acme.db"));
        existing.initialize().unwrap();
        let bytes = create_prior_store(source_dir.path());

        let store = import_store(work_dir.path(), "acme.db", &bytes).unwrap();

        assert_eq!(store.read_all().unwrap().len(), 2);
    }

    #[test]
    fn rejects_file_without_sqlite_header() {
        let work_dir = tempfile::tempdir().unwrap();

        let result = import_store(work_dir.path(), "notes.db", b"not a database");

        assert_eq!(
            result,
            Err(Error::IncompatibleStore(
                "the file is not a SQLite database".to_owned()
            ))
        );
        assert!(!work_dir.path().join("notes.db").exists());
    }

    #[test]
    fn rejects_incompatible_schema_and_keeps_existing_file() {
        let source_dir = tempfile::tempdir().unwrap();
        let work_dir = tempfile::tempdir().unwrap();

        let existing = LedgerStore::new(work_dir.path().join("acme.db"));
        existing.initialize().unwrap();
        existing
            .append(NewExpense::build(
                date!(2024 - 01 - 15),
                ExpenseCategory::Travel,
                450.0,
            ))
            .unwrap();

        let other_path = source_dir.path().join("other.db");
        let conn = rusqlite::Connection::open(&other_path).unwrap();
        conn.execute("CREATE TABLE expenses (id INTEGER PRIMARY KEY, cost REAL)", ())
            .unwrap();
        drop(conn);
        let bytes = fs::read(&other_path).unwrap();

        let result = import_store(work_dir.path(), "acme.db", &bytes);

        assert!(matches!(result, Err(Error::IncompatibleStore(_))));
        assert_eq!(existing.read_all().unwrap().len(), 1);
    }

    #[test]
    fn sanitize_strips_directories() {
        assert_eq!(
            sanitize_file_name("../../etc/acme.db"),
            Ok(PathBuf::from("acme.db"))
        );
        assert_eq!(
            sanitize_file_name("C:\\Users\\me\\acme.db"),
            Ok(PathBuf::from("acme.db"))
        );
    }

    #[test]
    fn sanitize_rejects_empty_and_dot_names() {
        for name in ["", ".", "..", "dir/"] {
            assert_eq!(
                sanitize_file_name(name),
                Err(Error::InvalidFileName(name.to_owned())),
                "want {name:?} to be rejected"
            );
        }
    }
}
