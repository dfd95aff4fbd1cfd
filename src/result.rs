//! The result of a test that has been run.

use serde::Serialize;

/// One test's outcome: its qualified name, whether it failed, and the
/// messages emitted during its run.
#[derive(Debug, Clone, Serialize)]
pub struct TestReport {
    pub name: String,
    pub failed: bool,
    pub messages: Vec<String>,
}

impl TestReport {
    pub fn passed(&self) -> bool {
        !self.failed
    }
}
