//! Application state for HTTP microservices.
//!
//! This module provides the shared state structure that axum handlers use to
//! access the loaded lab directory and the configured mailer.

use std::path::Path;
use std::sync::Arc;

use labfinder_lib::{Error as LibError, LabDirectory, LogMailer, MailConfig, Mailer};

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Failed to parse or read the lab dataset.
    DatasetLoad(LibError),

    /// Dataset file not found.
    DatasetNotFound(String),

    /// Failed to construct the mail client.
    MailerInit(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatasetLoad(e) => write!(f, "failed to load lab dataset: {}", e),
            Self::DatasetNotFound(path) => write!(f, "dataset not found: {}", path),
            Self::MailerInit(e) => write!(f, "failed to initialize mailer: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DatasetLoad(e) | Self::MailerInit(e) => Some(e),
            Self::DatasetNotFound(_) => None,
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        Self::DatasetLoad(err)
    }
}

/// Shared application state for all axum handlers.
///
/// This struct is cheaply cloneable (using `Arc` internally) and should be
/// shared via axum's `State` extractor.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::get, extract::State};
/// use labfinder_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) {
///     let labs = state.directory().len();
///     // ... use the directory
/// }
///
/// let state = AppState::load("path/to/labs.json", &MailConfig::default()).unwrap();
/// let app = Router::new()
///     .route("/labs-search", get(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    directory: LabDirectory,
    mailer: Arc<dyn Mailer>,
    mail_config: MailConfig,
}

impl AppState {
    /// Load application state from a dataset file and mail settings.
    ///
    /// The dataset must exist; the mailer falls back to logging when no API
    /// key is configured.
    pub fn load(data_path: impl AsRef<Path>, mail_config: &MailConfig) -> Result<Self, AppStateError> {
        let data_path = data_path.as_ref();

        if !data_path.exists() {
            return Err(AppStateError::DatasetNotFound(
                data_path.display().to_string(),
            ));
        }

        tracing::info!(path = %data_path.display(), "loading lab directory");
        let directory = LabDirectory::from_path(data_path)?;
        tracing::info!(lab_count = directory.len(), "lab directory loaded successfully");

        let mailer = mail_config
            .build_mailer()
            .map_err(AppStateError::MailerInit)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                directory,
                mailer: Arc::from(mailer),
                mail_config: mail_config.clone(),
            }),
        })
    }

    /// Create application state from pre-loaded components.
    ///
    /// This is useful for testing or when loading from bundled bytes.
    pub fn from_components(
        directory: LabDirectory,
        mailer: Arc<dyn Mailer>,
        mail_config: MailConfig,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                directory,
                mailer,
                mail_config,
            }),
        }
    }

    /// Create state around a directory with a logging-only mailer.
    pub fn with_directory(directory: LabDirectory) -> Self {
        Self::from_components(directory, Arc::new(LogMailer), MailConfig::default())
    }

    /// Access the loaded lab directory.
    pub fn directory(&self) -> &LabDirectory {
        &self.inner.directory
    }

    /// Shared handle to the mailer, for use on the blocking pool.
    pub fn mailer(&self) -> Arc<dyn Mailer> {
        Arc::clone(&self.inner.mailer)
    }

    /// Mail addressing used when rendering submissions.
    pub fn mail_config(&self) -> &MailConfig {
        &self.inner.mail_config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("lab_count", &self.inner.directory.len())
            .field("mail_to", &self.inner.mail_config.to)
            .finish()
    }
}
