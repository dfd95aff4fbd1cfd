//! The context a test body runs within.

use std::any::{type_name, Any};
use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};

use tracing::debug;

use crate::result::TestReport;

/// Collects assertions and log messages for one test execution.
///
/// A failing assertion marks the test failed but never halts the body;
/// the remainder of the test keeps running and logging.
pub struct TestContext {
    failed: bool,
    messages: Vec<String>,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            failed: false,
            messages: Vec::new(),
        }
    }

    /// Record a failure and log `failure_message` when `condition` is
    /// false. Never halts execution.
    pub fn assert(&mut self, condition: bool, failure_message: &str) {
        if !condition {
            self.failed = true;
            self.log(failure_message);
        }
    }

    /// Append a message to the test's log unconditionally.
    pub fn log(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!(message = %message, "test log");
        self.messages.push(message);
    }

    /// Run `action` expecting it to raise an error of type `E`.
    ///
    /// A panic whose payload downcasts to `E` satisfies the expectation
    /// and is logged; completing without a panic fails the assertion
    /// with `failure_message`. A panic of any other type is not this
    /// expectation's to swallow and resumes unwinding, so the runner
    /// records it as an unexpected test error.
    pub fn run_expecting_error<E: Any>(&mut self, action: impl FnOnce(), failure_message: &str) {
        let caught = match catch_unwind(AssertUnwindSafe(action)) {
            Ok(()) => false,
            Err(payload) => {
                if payload.is::<E>() {
                    self.log(format!("Caught expected error: {}", type_name::<E>()));
                    true
                } else {
                    resume_unwind(payload);
                }
            }
        };

        self.assert(
            caught,
            &format!(
                "Expected error of type {}, but none was caught. Message: {}",
                type_name::<E>(),
                failure_message
            ),
        );
    }

    pub fn failed(&self) -> bool {
        self.failed
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub(crate) fn into_report(self, name: &str) -> TestReport {
        TestReport {
            name: name.to_string(),
            failed: self.failed,
            messages: self.messages,
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
