use std::sync::Arc;

use crate::application::form::SubmissionSettings;
use crate::application::latch::SubmissionLatch;
use crate::contacts::ContactSink;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Contact list writer. Production: `BrevoClient`.
    pub contacts: Arc<dyn ContactSink>,
    pub submission: SubmissionSettings,
    /// One in-flight submission per applicant email.
    pub latch: SubmissionLatch,
}
