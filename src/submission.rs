//! Completion boundary: where a finished application is handed off.

use serde::Serialize;

use crate::model::{ApplicationDraft, PaymentSubmission};

/// Errors a [`CompletionHandler`] can report.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The application could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The receiver refused the application.
    #[error("submission rejected: {0}")]
    Rejected(String),
}

/// The pair handed to the completion boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedApplication<'a> {
    pub form_data: &'a ApplicationDraft,
    pub payment_data: &'a PaymentSubmission,
}

/// Receives the application once both steps have validated.
pub trait CompletionHandler {
    /// Takes ownership of the finished application's disposition.
    fn complete(
        &mut self,
        draft: &ApplicationDraft,
        payment: &PaymentSubmission,
    ) -> Result<(), SubmitError>;
}

impl<F> CompletionHandler for F
where
    F: FnMut(&ApplicationDraft, &PaymentSubmission) -> Result<(), SubmitError>,
{
    fn complete(
        &mut self,
        draft: &ApplicationDraft,
        payment: &PaymentSubmission,
    ) -> Result<(), SubmitError> {
        self(draft, payment)
    }
}

/// Emits the finished application as a JSON `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogHandler;

impl CompletionHandler for LogHandler {
    fn complete(
        &mut self,
        draft: &ApplicationDraft,
        payment: &PaymentSubmission,
    ) -> Result<(), SubmitError> {
        let application = CompletedApplication {
            form_data: draft,
            payment_data: payment,
        };
        let json = serde_json::to_string(&application)?;
        tracing::info!(application = %json, "application submitted");
        Ok(())
    }
}
