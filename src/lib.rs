//! A minimal unit-test harness.
//!
//! Tests are plain functions taking a [`TestContext`]; an explicit
//! [`manifest!`] lists them, [`TestRunner`](runner::TestRunner) executes
//! each in an isolated context that collects assertions and log
//! messages, and [`report`] prints the pass/fail summary. Mock
//! substitutes for the code under test come from the companion
//! `examine-substitute` crate.

pub mod cli;
pub mod config;
pub mod context;
pub mod demo;
pub mod manifest;
pub mod output;
pub mod report;
pub mod result;
pub mod runner;

pub use context::TestContext;
pub use manifest::TestCase;
pub use result::TestReport;
pub use runner::TestRunner;

use miette::Diagnostic;

/// Result type alias for the harness.
pub type Result<T> = miette::Result<T>;

/// Error types for the harness surface (test outcomes are reported, not
/// raised; these cover the runner's own failures).
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum HarnessError {
    #[error("failed to load config: {0}")]
    #[diagnostic(
        code(examine::config_error),
        help("Check that the config file is valid TOML and readable.")
    )]
    ConfigError(String),

    #[error("failed to write report: {0}")]
    #[diagnostic(code(examine::report_error))]
    ReportError(String),

    #[error("no tests matched filter '{0}'")]
    #[diagnostic(
        code(examine::empty_selection),
        help("Use `examine list` to see the registered test names.")
    )]
    EmptySelection(String),
}
