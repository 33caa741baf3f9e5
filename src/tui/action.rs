//! Actions returned by screen event handlers.

use crossterm::event::KeyEvent;

use crate::model::{ApplicationDraft, PaymentSubmission};

/// An action that a screen handler returns to the [`App`](super::App).
///
/// The `App` interprets these to drive the wizard and switch screens.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No state change needed.
    None,
    /// Freeze the validated details and move to the payment step.
    Advance(ApplicationDraft),
    /// Return from the payment step to the details step.
    Back,
    /// Hand the validated payment to the completion handler.
    Submit(PaymentSubmission),
    /// Dismiss the help screen.
    CloseHelp,
    /// Quit the application.
    Quit,
}

/// Common behavior for all screen state types.
pub trait ScreenState {
    /// Process a key event and return an [`Action`] for the `App` to apply.
    fn handle_key(&mut self, key: KeyEvent) -> Action;
}
