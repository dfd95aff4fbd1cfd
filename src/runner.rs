//! Sequential test execution.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use examine_substitute::SubstituteError;
use tracing::{info, warn};

use crate::context::TestContext;
use crate::manifest::TestCase;
use crate::result::TestReport;

type PanicHook = Box<dyn Fn(&std::panic::PanicHookInfo<'_>) + Send + Sync + 'static>;

/// Restores the previous panic hook when dropped.
struct PanicHookGuard {
    previous: Option<PanicHook>,
}

impl PanicHookGuard {
    /// Swap in a hook that prints nothing. Deliberately unmocked calls
    /// and expected errors unwind as part of normal operation; their
    /// backtraces have no place in the report.
    fn silence() -> Self {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(|_| {}));
        Self {
            previous: Some(previous),
        }
    }
}

impl Drop for PanicHookGuard {
    fn drop(&mut self) {
        if let Some(hook) = self.previous.take() {
            std::panic::set_hook(hook);
        }
    }
}

/// Runs manifests of tests, one at a time, each with a fresh context.
pub struct TestRunner;

impl TestRunner {
    /// Run every test in the manifest, in manifest order.
    ///
    /// The process-wide panic hook is silenced for the duration, so this
    /// assumes the single-threaded runner process the harness is
    /// designed for.
    pub fn run_all(manifest: &[TestCase]) -> Vec<TestReport> {
        let _quiet = PanicHookGuard::silence();
        manifest.iter().map(Self::run_test).collect()
    }

    /// Run one test. An error the body does not catch is recorded as a
    /// failure with its description; it never aborts the run.
    pub fn run_test(case: &TestCase) -> TestReport {
        info!(test = case.name, "running test");
        let mut context = TestContext::new();

        let outcome = catch_unwind(AssertUnwindSafe(|| (case.run)(&mut context)));
        if let Err(payload) = outcome {
            warn!(test = case.name, "test raised an unexpected error");
            context.assert(
                false,
                &format!(
                    "Unexpected error during test: {}",
                    panic_message(payload.as_ref())
                ),
            );
        }

        context.into_report(case.name)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(e) = payload.downcast_ref::<SubstituteError>() {
        e.to_string()
    } else {
        "non-string panic payload".to_string()
    }
}
