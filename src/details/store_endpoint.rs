//! Defines the endpoint for uploading an existing expense store.

use std::path::PathBuf;

use axum::{
    extract::{FromRef, Multipart, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use maud::html;

use crate::{
    AppState, Error,
    alert::Alert,
    details::view::active_store_view,
    ledger::{LedgerStore, import_store},
    workflow::SessionStore,
};

/// The name of the multipart field holding the store file.
const STORE_FIELD: &str = "store";

/// The largest store file that can be uploaded, in bytes.
pub const MAX_STORE_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// The state needed for uploading an expense store.
#[derive(Debug, Clone)]
pub struct ImportStoreState {
    /// The workflow state of every visitor.
    pub sessions: SessionStore,
    /// The directory uploaded stores are saved to.
    pub work_dir: PathBuf,
}

impl FromRef<AppState> for ImportStoreState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            sessions: state.sessions.clone(),
            work_dir: state.work_dir.clone(),
        }
    }
}

struct StoreUpload {
    file_name: String,
    bytes: Vec<u8>,
}

/// Route handler for uploading an expense store.
///
/// The uploaded file is saved to the working directory under its own name and
/// becomes the visitor's active store. Files that are not compatible stores are
/// rejected and the active store is left as it was.
pub async fn import_store_endpoint(
    State(state): State<ImportStoreState>,
    jar: PrivateCookieJar,
    mut multipart: Multipart,
) -> Response {
    let (jar, id, _) = match state.sessions.load(jar) {
        Ok(loaded) => loaded,
        Err(error) => return error.into_alert_response(),
    };

    let upload = match read_store_field(&mut multipart).await {
        Ok(upload) => upload,
        Err(error) => return error.into_alert_response(),
    };

    let store = match save_store(&state, &upload) {
        Ok(store) => store,
        Err(error) => {
            tracing::warn!("rejected store upload {:?}: {error}", upload.file_name);
            return error.into_alert_response();
        }
    };

    let file_name = store.file_name();

    if let Err(error) = state
        .sessions
        .update(id, |session| session.store = store.clone())
    {
        return error.into_alert_response();
    }

    tracing::info!("session {id} switched to expense store {}", store.path().display());

    let alert = Alert::Success {
        message: format!("Loaded database: {file_name}"),
        details: "New expenses will be saved to this database.".to_owned(),
    };

    (
        jar,
        html!(
            (alert.into_html())
            (active_store_view(&file_name, true))
        ),
    )
        .into_response()
}

fn save_store(state: &ImportStoreState, upload: &StoreUpload) -> Result<LedgerStore, Error> {
    let store = import_store(&state.work_dir, &upload.file_name, &upload.bytes)?;
    store.initialize()?;

    Ok(store)
}

async fn read_store_field(multipart: &mut Multipart) -> Result<StoreUpload, Error> {
    while let Some(field) = multipart.next_field().await.map_err(|error| {
        tracing::error!("Could not read multipart form: {error}");
        Error::MultipartError(error.to_string())
    })? {
        if field.name() != Some(STORE_FIELD) {
            continue;
        }

        let file_name = match field.file_name() {
            Some(file_name) => file_name.to_owned(),
            None => {
                tracing::error!("Could not get file name from multipart form field: {field:#?}");
                return Err(Error::MultipartError(
                    "Could not get file name from multipart form field".to_owned(),
                ));
            }
        };

        let bytes = field.bytes().await.map_err(|error| {
            tracing::error!("Could not read data from multipart form field: {error}");
            Error::MultipartError("Could not read data from multipart form field.".to_owned())
        })?;

        // Browsers send an empty part when no file was chosen.
        if bytes.is_empty() {
            return Err(Error::MissingStoreFile);
        }

        tracing::debug!("Received file '{}' that is {} bytes", file_name, bytes.len());

        return Ok(StoreUpload {
            file_name,
            bytes: bytes.to_vec(),
        });
    }

    Err(Error::MissingStoreFile)
}
