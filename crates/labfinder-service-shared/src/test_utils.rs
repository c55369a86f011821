//! Test utilities for microservice handler testing.
//!
//! This module provides fixtures, a pre-loaded state, and mailers that record
//! or reject messages so handlers can be tested without a mail provider.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock};

use labfinder_lib::{EmailMessage, Error as LibError, LabDirectory, MailConfig, Mailer};

use crate::state::AppState;

/// Path to the test fixture dataset.
pub const TEST_FIXTURE_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../docs/fixtures/labs.json"
);

/// Lazily-initialized directory loaded from the fixture dataset.
static TEST_DIRECTORY: OnceLock<LabDirectory> = OnceLock::new();

/// Get the absolute path to the test fixture dataset.
pub fn fixture_labs_path() -> PathBuf {
    PathBuf::from(TEST_FIXTURE_PATH)
}

/// Get the fixture directory, loading it on first use.
///
/// # Panics
///
/// Panics if the fixture cannot be loaded. This indicates a test
/// configuration issue.
pub fn fixture_directory() -> LabDirectory {
    TEST_DIRECTORY
        .get_or_init(|| {
            let path = fixture_labs_path();
            LabDirectory::from_path(&path)
                .unwrap_or_else(|e| panic!("failed to load test fixture from {:?}: {}", path, e))
        })
        .clone()
}

/// Get a test AppState over the fixture dataset with a logging mailer.
pub fn test_state() -> AppState {
    AppState::with_directory(fixture_directory())
}

/// Get a test AppState whose mailer is the given one.
pub fn test_state_with_mailer(mailer: Arc<dyn Mailer>) -> AppState {
    AppState::from_components(fixture_directory(), mailer, MailConfig::default())
}

/// Mailer that keeps every message it is asked to send.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<EmailMessage>>,
}

impl RecordingMailer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Messages sent so far.
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }
}

impl Mailer for RecordingMailer {
    fn send(&self, message: &EmailMessage) -> labfinder_lib::Result<()> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(message.clone());
        }
        Ok(())
    }
}

/// Mailer that fails every delivery the way a rejecting provider would.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingMailer;

impl Mailer for FailingMailer {
    fn send(&self, _message: &EmailMessage) -> labfinder_lib::Result<()> {
        Err(LibError::MailDelivery {
            message: "provider responded with 401 Unauthorized: invalid api key".to_string(),
        })
    }
}

/// Generate a unique request ID for testing.
pub fn test_request_id() -> String {
    format!("test-{}", uuid::Uuid::now_v7())
}
