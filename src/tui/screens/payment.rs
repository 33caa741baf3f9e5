//! Payment screen: the second wizard step, confirming payment for the application.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::{PaymentField, PaymentInput, PaymentProof, PaymentSubmission, ProofError};
use crate::tui::action::{Action, ScreenState};
use crate::tui::widgets::form::{Form, FormField, FormRow, draw_form};

const PAYMENT_PROOF: usize = 0;
const UTR_NUMBER: usize = 1;

static PROOF_ROW: &[FormRow] = &[FormRow::Fields(&[PAYMENT_PROOF])];
static UTR_ROW: &[FormRow] = &[FormRow::Fields(&[UTR_NUMBER])];

/// State for the payment screen.
#[derive(Debug, Clone)]
pub struct PaymentState {
    form: Form,
    qr_code_scanned: bool,
    /// Whether Enter has been pressed; the QR error is only shown afterwards.
    submit_attempted: bool,
    qr_error: Option<String>,
    /// Error reported by the app, e.g. a failed completion.
    general_error: Option<String>,
    submitted: bool,
}

impl Default for PaymentState {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentState {
    /// Creates an empty payment step: nothing scanned, attached or entered.
    pub fn new() -> Self {
        let mut state = Self {
            form: Form::new(vec![
                FormField::new("Payment Proof (path to image or PDF)", true),
                FormField::new("UTR Number", true),
            ]),
            qr_code_scanned: false,
            submit_attempted: false,
            qr_error: None,
            general_error: None,
            submitted: false,
        };
        state.refresh_errors();
        state
    }

    /// Returns a reference to the form for rendering.
    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Returns whether the QR code has been marked as scanned.
    pub fn qr_code_scanned(&self) -> bool {
        self.qr_code_scanned
    }

    /// Returns the QR-code error, if a submit was attempted before scanning.
    pub fn qr_error(&self) -> Option<&str> {
        self.qr_error.as_deref()
    }

    /// Returns the error reported by the app, if any.
    pub fn general_error(&self) -> Option<&str> {
        self.general_error.as_deref()
    }

    /// Returns whether the application has been submitted.
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Shows an error that does not belong to a single field.
    pub fn set_error(&mut self, message: String) {
        self.general_error = Some(message);
    }

    /// Shows the confirmation banner.
    pub fn set_submitted(&mut self) {
        self.submitted = true;
        self.general_error = None;
    }

    /// Attaches the proof whose path is typed in, if any.
    fn capture_proof(&self) -> Result<Option<PaymentProof>, ProofError> {
        let path = self.form.value(PAYMENT_PROOF).trim();
        if path.is_empty() {
            return Ok(None);
        }
        PaymentProof::capture(path).map(Some)
    }

    /// Collects the current values. A proof that cannot be attached counts as missing.
    pub fn input(&self) -> PaymentInput {
        PaymentInput {
            qr_code_scanned: self.qr_code_scanned,
            payment_proof: self.capture_proof().ok().flatten(),
            utr_number: self.form.value(UTR_NUMBER).to_string(),
        }
    }

    fn refresh_errors(&mut self) -> Option<PaymentSubmission> {
        self.form.clear_errors();
        self.qr_error = None;
        let result = self.input().validate();
        if let Err(errors) = &result {
            for (field, error) in errors.iter() {
                match field {
                    PaymentField::PaymentProof => {
                        self.form.set_error(PAYMENT_PROOF, error.to_string())
                    }
                    PaymentField::UtrNumber => self.form.set_error(UTR_NUMBER, error.to_string()),
                    PaymentField::QrCodeScanned if self.submit_attempted => {
                        self.qr_error = Some(error.to_string());
                    }
                    PaymentField::QrCodeScanned => {}
                }
            }
        }
        if let Err(e) = self.capture_proof() {
            self.form.set_error(PAYMENT_PROOF, e.to_string());
        }
        result.ok()
    }

    fn mark_scanned(&mut self) {
        self.qr_code_scanned = true;
    }

    /// Touches every field and submits if the payment is complete.
    fn submit(&mut self) -> Action {
        self.form.touch_all();
        self.submit_attempted = true;
        match self.refresh_errors() {
            Some(submission) => Action::Submit(submission),
            None => {
                tracing::debug!(
                    scanned = self.qr_code_scanned,
                    "payment step rejected"
                );
                Action::None
            }
        }
    }
}

impl ScreenState for PaymentState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        let action = match key.code {
            KeyCode::Char('s' | 'S') if key.modifiers.contains(KeyModifiers::ALT) => {
                self.mark_scanned();
                Action::None
            }
            KeyCode::Tab => {
                self.form.focus_next();
                Action::None
            }
            KeyCode::BackTab => {
                self.form.focus_prev();
                Action::None
            }
            KeyCode::Backspace => {
                self.form.delete_char();
                Action::None
            }
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.form.insert_char(ch);
                Action::None
            }
            KeyCode::Enter => return self.submit(),
            KeyCode::Esc => return Action::Back,
            _ => return Action::None,
        };
        self.refresh_errors();
        action
    }
}

/// Renders the payment screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_payment(state: &PaymentState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Payment Details ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [
        qr_area,
        qr_status_area,
        proof_area,
        hint_area,
        utr_area,
        message_area,
        _,
        footer_area,
    ] = Layout::vertical([
        Constraint::Length(5),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    let qr_panel = Paragraph::new(vec![
        Line::from(Span::styled(
            "[ QR CODE ]",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("Scan with your payment app to pay"),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().title("Scan QR Code").borders(Borders::ALL));
    frame.render_widget(qr_panel, qr_area);

    let qr_status = if state.qr_code_scanned() {
        Span::styled("[x] QR code scanned", Style::default().fg(Color::Green))
    } else if let Some(err) = state.qr_error() {
        Span::styled(
            format!("[ ] {err} (Alt+S once scanned)"),
            Style::default().fg(Color::Red),
        )
    } else {
        Span::raw("[ ] Press Alt+S once you have scanned the QR code")
    };
    frame.render_widget(Paragraph::new(Line::from(qr_status)), qr_status_area);

    draw_form(state.form(), PROOF_ROW, frame, proof_area);
    let hint = Paragraph::new("Supported formats: JPG, PNG, PDF")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hint, hint_area);
    draw_form(state.form(), UTR_ROW, frame, utr_area);

    let message = match state.general_error() {
        Some(err) => Some(Span::styled(err, Style::default().fg(Color::Red))),
        None if state.is_submitted() => Some(Span::styled(
            "Application submitted successfully",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        None => None,
    };
    if let Some(message) = message {
        frame.render_widget(Paragraph::new(Line::from(message)), message_area);
    }

    let footer = Paragraph::new(Line::from(
        "Alt+S: QR scanned  Tab/Shift+Tab: next/prev  Enter: submit  Esc: back  F1: help",
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
