//! TUI screen implementations.

pub mod details;
pub mod help;
pub mod payment;

pub use details::{ApplicationFormState, draw_details};
pub use help::{HelpState, draw_help};
pub use payment::{PaymentState, draw_payment};
