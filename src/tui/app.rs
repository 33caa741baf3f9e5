use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Layout};
use ratatui::{Frame, Terminal};

use crate::model::{ApplicationDraft, PaymentSubmission};
use crate::submission::CompletionHandler;
use crate::wizard::{Step, Wizard};

use super::action::{Action, ScreenState};
use super::error::AppError;
use super::screens::{
    ApplicationFormState, HelpState, PaymentState, draw_details, draw_help, draw_payment,
};
use super::widgets::{StepBarContext, draw_step_bar};

/// All screens the app can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Application details, the first step.
    Details,
    /// Payment confirmation, the second step.
    Payment,
    /// Keybinding help for the current step.
    Help,
}

/// Top-level application state.
pub struct App<H> {
    wizard: Wizard,
    details: ApplicationFormState,
    payment: PaymentState,
    help: Option<HelpState>,
    handler: H,
    should_quit: bool,
}

impl<H: CompletionHandler> App<H> {
    /// Creates a new `App` on the details step.
    ///
    /// `current_year` decides which financial years are offered.
    pub fn new(handler: H, current_year: i32) -> Self {
        Self {
            wizard: Wizard::new(),
            details: ApplicationFormState::new(current_year),
            payment: PaymentState::new(),
            help: None,
            handler,
            should_quit: false,
        }
    }

    /// Main event loop: draw → read event → dispatch → check quit.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        let [bar_area, body_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(frame.area());

        draw_step_bar(&StepBarContext::from(&self.wizard), frame, bar_area);

        match self.screen() {
            Screen::Help => {
                if let Some(help) = &self.help {
                    draw_help(help, frame, body_area);
                }
            }
            Screen::Details => draw_details(&self.details, frame, body_area),
            Screen::Payment => draw_payment(&self.payment, frame, body_area),
        }
    }

    /// Handles a key event: global keys first, then the active screen.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        if key.code == KeyCode::F(1) && self.help.is_none() {
            self.help = Some(HelpState::new(self.wizard.step()));
            return;
        }

        let screen: &mut dyn ScreenState = match (&mut self.help, self.wizard.step()) {
            (Some(help), _) => help,
            (None, Step::Details) => &mut self.details,
            (None, Step::Payment) => &mut self.payment,
        };
        let action = screen.handle_key(key);
        self.apply(action);
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Advance(draft) => self.advance(draft),
            Action::Back => self.back(),
            Action::Submit(payment) => self.submit(&payment),
            Action::CloseHelp => self.help = None,
            Action::Quit => {
                tracing::info!(step = self.wizard.step().number(), "quit requested");
                self.should_quit = true;
            }
        }
    }

    fn advance(&mut self, draft: ApplicationDraft) {
        match self.wizard.advance(draft) {
            Ok(()) => {
                tracing::info!("application details accepted");
                self.payment = PaymentState::new();
            }
            Err(e) => tracing::warn!(error = %e, "advance rejected"),
        }
    }

    /// Returns to the details screen as it was left, typed text included.
    fn back(&mut self) {
        match self.wizard.back() {
            Ok(()) => tracing::info!("returned to application details"),
            Err(e) => {
                tracing::warn!(error = %e, "back rejected");
                self.payment.set_error(e.to_string());
            }
        }
    }

    fn submit(&mut self, payment: &PaymentSubmission) {
        match self.wizard.complete(payment, &mut self.handler) {
            Ok(()) => {
                tracing::info!("application completed");
                self.payment.set_submitted();
            }
            Err(e) => {
                tracing::warn!(error = %e, "completion failed");
                self.payment.set_error(e.to_string());
            }
        }
    }

    /// Returns the screen currently shown.
    pub fn screen(&self) -> Screen {
        match (&self.help, self.wizard.step()) {
            (Some(_), _) => Screen::Help,
            (None, Step::Details) => Screen::Details,
            (None, Step::Payment) => Screen::Payment,
        }
    }

    /// Returns a reference to the wizard.
    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    /// Returns a reference to the details screen state.
    pub fn details(&self) -> &ApplicationFormState {
        &self.details
    }

    /// Returns a reference to the payment screen state.
    pub fn payment(&self) -> &PaymentState {
        &self.payment
    }

    /// Returns a reference to the completion handler.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
