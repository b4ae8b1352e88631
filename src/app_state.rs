//! Implements a struct that holds the state of the REST server.

use std::path::{Path, PathBuf};

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};

use crate::{Error, ledger::LedgerStore, workflow::SessionStore};

/// The file name of the expense store that sessions start with.
pub const DEFAULT_STORE_FILE_NAME: &str = "business_expenses.db";

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The directory holding the default store and any uploaded stores.
    pub work_dir: PathBuf,

    /// The workflow state of every visitor.
    pub sessions: SessionStore,
}

impl AppState {
    /// Create a new [AppState] that keeps expense stores in `work_dir`.
    ///
    /// This function will initialize the default expense store,
    /// `business_expenses.db` in `work_dir`, creating it if needed.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an error if the default store cannot be initialized.
    pub fn new(cookie_secret: &str, local_timezone: &str, work_dir: &Path) -> Result<Self, Error> {
        let default_store = LedgerStore::new(work_dir.join(DEFAULT_STORE_FILE_NAME));
        default_store.initialize()?;

        Ok(Self {
            cookie_key: create_cookie_key(cookie_secret),
            local_timezone: local_timezone.to_owned(),
            work_dir: work_dir.to_owned(),
            sessions: SessionStore::new(default_store),
        })
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

impl FromRef<AppState> for SessionStore {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

/// Create a signing key for cookies from a `secret`s string.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}
