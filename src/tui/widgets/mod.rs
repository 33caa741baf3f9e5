//! Reusable TUI widgets.

pub mod form;
pub mod step_bar;

pub use form::{FieldKind, Form, FormField, FormRow, draw_form};
pub use step_bar::{StepBarContext, draw_step_bar};
