#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Two-step birth-certificate application form for the terminal.

pub mod diagnostics;
pub mod model;
pub mod submission;
pub mod tui;
pub mod wizard;
