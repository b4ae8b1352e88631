//! Keeps each visitor's [Session] in memory, keyed by an ID in a private cookie.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use uuid::Uuid;

use crate::{Error, ledger::LedgerStore, workflow::Session};

pub(crate) const COOKIE_SESSION_ID: &str = "session_id";

/// The sessions of everyone using the app.
///
/// Sessions live until the server stops. The lock is only held while a
/// session is read or updated, never while a store file is accessed.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
    default_store: LedgerStore,
}

impl SessionStore {
    /// Create an empty session store. New sessions will use `default_store`.
    pub fn new(default_store: LedgerStore) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            default_store,
        }
    }

    /// The store that new sessions start with.
    pub fn default_store(&self) -> &LedgerStore {
        &self.default_store
    }

    /// Get the session named by the cookie in `jar`.
    ///
    /// If the cookie is missing, cannot be read, or names a session the server
    /// does not know about, a new session is started and its ID is added to the
    /// returned jar.
    ///
    /// # Errors
    /// Returns [Error::SessionLockError] if the session lock is poisoned.
    pub fn load(&self, jar: PrivateCookieJar) -> Result<(PrivateCookieJar, Uuid, Session), Error> {
        let known_id = jar
            .get(COOKIE_SESSION_ID)
            .and_then(|cookie| Uuid::parse_str(cookie.value()).ok());

        let mut sessions = self.lock()?;

        let existing =
            known_id.and_then(|id| sessions.get(&id).map(|session| (id, session.clone())));

        if let Some((id, session)) = existing {
            return Ok((jar, id, session));
        }

        let id = Uuid::new_v4();
        let session = Session::new(self.default_store.clone());
        sessions.insert(id, session.clone());
        tracing::debug!("started session {id}");

        Ok((jar.add(session_cookie(id)), id, session))
    }

    /// Change the session `id` with `update` and return the changed session.
    ///
    /// A session that does not exist yet is started before `update` runs.
    ///
    /// # Errors
    /// Returns [Error::SessionLockError] if the session lock is poisoned.
    pub fn update<F>(&self, id: Uuid, update: F) -> Result<Session, Error>
    where
        F: FnOnce(&mut Session),
    {
        let mut sessions = self.lock()?;
        let session = sessions
            .entry(id)
            .or_insert_with(|| Session::new(self.default_store.clone()));

        update(session);

        Ok(session.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, Session>>, Error> {
        self.sessions
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire session lock: {error}"))
            .map_err(|_| Error::SessionLockError)
    }
}

fn session_cookie(id: Uuid) -> Cookie<'static> {
    Cookie::build((COOKIE_SESSION_ID, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .build()
}
