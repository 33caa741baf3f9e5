//! Step bar widget: one-line wizard progress display.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::wizard::{Step, Wizard};

/// Number of steps in the wizard.
const STEP_COUNT: usize = 2;

/// Data passed to the step bar widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepBarContext {
    /// The step currently shown.
    pub step: Step,
    /// Whether the application has been submitted.
    pub submitted: bool,
}

impl From<&Wizard> for StepBarContext {
    fn from(wizard: &Wizard) -> Self {
        Self {
            step: wizard.step(),
            submitted: wizard.is_submitted(),
        }
    }
}

/// Renders a one-line bar showing wizard progress.
///
/// Display format (left-aligned, Cyan):
/// - In progress: `Step 1 of 2: Application Details`
/// - Submitted:   `Step 2 of 2: Payment Details  SUBMITTED` (SUBMITTED in Green)
#[mutants::skip]
pub fn draw_step_bar(ctx: &StepBarContext, frame: &mut Frame, area: Rect) {
    let cyan = Style::default().fg(Color::Cyan);
    let green = Style::default().fg(Color::Green);

    let mut spans = vec![Span::styled(
        format!(
            "Step {} of {STEP_COUNT}: {}",
            ctx.step.number(),
            ctx.step.title()
        ),
        cyan,
    )];
    if ctx.submitted {
        spans.push(Span::styled("  ", cyan));
        spans.push(Span::styled("SUBMITTED", green));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
