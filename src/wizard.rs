//! Two-step wizard coordinator.
//!
//! Owns the current step and the frozen details snapshot. Screens hand it
//! validated values; it decides which step is shown and when the completion
//! handler runs.

use crate::model::{ApplicationDraft, PaymentSubmission};
use crate::submission::{CompletionHandler, SubmitError};

/// The wizard's steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Applicant, child, parent and certificate details.
    Details,
    /// QR acknowledgment, receipt and transaction reference.
    Payment,
}

impl Step {
    /// One-based position shown to the user.
    pub fn number(self) -> usize {
        match self {
            Step::Details => 1,
            Step::Payment => 2,
        }
    }

    /// Human-readable step title.
    pub fn title(self) -> &'static str {
        match self {
            Step::Details => "Application Details",
            Step::Payment => "Payment Details",
        }
    }
}

/// Errors from driving the wizard out of order.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    /// The transition is not available from the current step.
    #[error("cannot {action} from the {} step", .step.title())]
    WrongStep { action: &'static str, step: Step },

    /// The application has already been handed to the completion handler.
    #[error("the application has already been submitted")]
    AlreadySubmitted,

    /// The completion handler failed.
    #[error(transparent)]
    Submit(#[from] SubmitError),
}

/// The finite-state coordinator for the two-step form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wizard {
    step: Step,
    draft: Option<ApplicationDraft>,
    submitted: bool,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    /// Creates a wizard on the [`Step::Details`] step with no snapshot.
    pub fn new() -> Self {
        Self {
            step: Step::Details,
            draft: None,
            submitted: false,
        }
    }

    /// Returns the current step.
    pub fn step(&self) -> Step {
        self.step
    }

    /// Returns the frozen details snapshot, if the applicant has advanced.
    pub fn draft(&self) -> Option<&ApplicationDraft> {
        self.draft.as_ref()
    }

    /// Returns `true` once the completion handler has accepted the application.
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Freezes `draft` and moves to [`Step::Payment`].
    ///
    /// The snapshot cannot be replaced once the application is submitted.
    pub fn advance(&mut self, draft: ApplicationDraft) -> Result<(), WizardError> {
        if self.submitted {
            return Err(WizardError::AlreadySubmitted);
        }
        if self.step != Step::Details {
            return Err(WizardError::WrongStep {
                action: "advance",
                step: self.step,
            });
        }
        self.draft = Some(draft);
        self.step = Step::Payment;
        Ok(())
    }

    /// Returns to [`Step::Details`], keeping the snapshot.
    pub fn back(&mut self) -> Result<(), WizardError> {
        if self.submitted {
            return Err(WizardError::AlreadySubmitted);
        }
        if self.step != Step::Payment {
            return Err(WizardError::WrongStep {
                action: "go back",
                step: self.step,
            });
        }
        self.step = Step::Details;
        Ok(())
    }

    /// Hands the snapshot and `payment` to `handler`, exactly once.
    ///
    /// On handler failure the wizard is left unsubmitted so the applicant can
    /// retry.
    pub fn complete(
        &mut self,
        payment: &PaymentSubmission,
        handler: &mut dyn CompletionHandler,
    ) -> Result<(), WizardError> {
        if self.submitted {
            return Err(WizardError::AlreadySubmitted);
        }
        let draft = match (&self.draft, self.step) {
            (Some(draft), Step::Payment) => draft,
            _ => {
                return Err(WizardError::WrongStep {
                    action: "submit",
                    step: self.step,
                });
            }
        };
        handler.complete(draft, payment)?;
        self.submitted = true;
        Ok(())
    }
}
