use std::path::Path;

use axum_extra::extract::{PrivateCookieJar, cookie::Cookie};
use axum_test::TestServer;
use tempfile::TempDir;
use uuid::Uuid;

use crate::{AppState, build_router, endpoints, workflow::COOKIE_SESSION_ID};

/// A test server backed by a fresh working directory.
pub(crate) struct TestApp {
    pub(crate) server: TestServer,
    pub(crate) state: AppState,
    work_dir: TempDir,
}

impl TestApp {
    pub(crate) fn work_dir(&self) -> &Path {
        self.work_dir.path()
    }

    /// Visit the workflow page and return the session cookie it sets along
    /// with the session ID it carries.
    pub(crate) async fn start_session(&self) -> (Cookie<'static>, Uuid) {
        let cookie = self.server.get(endpoints::ROOT).await.cookie(COOKIE_SESSION_ID);
        let id = self.session_id(&cookie);

        (cookie, id)
    }

    /// The session ID inside the encrypted session `cookie`.
    #[track_caller]
    fn session_id(&self, cookie: &Cookie<'static>) -> Uuid {
        let decrypted = PrivateCookieJar::new(self.state.cookie_key.clone())
            .decrypt(cookie.clone())
            .expect("Could not decrypt session cookie");

        Uuid::parse_str(decrypted.value()).expect("Session cookie did not hold a UUID")
    }
}

pub(crate) fn get_test_app() -> TestApp {
    let work_dir = tempfile::tempdir().expect("Could not create temp dir");
    let state =
        AppState::new("42", "Etc/UTC", work_dir.path()).expect("Could not create app state");
    let server =
        TestServer::try_new(build_router(state.clone())).expect("Could not create test server.");

    TestApp {
        server,
        state,
        work_dir,
    }
}

#[cfg(test)]
mod tests {
    use super::get_test_app;

    #[tokio::test]
    async fn session_cookie_is_encrypted() {
        let app = get_test_app();

        let (cookie, id) = app.start_session().await;

        assert_ne!(cookie.value(), id.to_string());
        assert!(app.state.sessions.update(id, |_| {}).is_ok());
    }
}
