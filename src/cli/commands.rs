use std::io;

use crate::cli::args::{ReportFormat, RunArgs};
use crate::manifest::TestCase;
use crate::runner::TestRunner;
use crate::{demo, report, HarnessError};

/// Counts returned to `main` so it can pick the exit code.
pub struct RunSummary {
    pub passed: usize,
    pub total: usize,
}

/// Run the registered suite, optionally filtered, and print the report.
pub fn run(args: RunArgs) -> crate::Result<RunSummary> {
    let manifest = demo::manifest();
    let selected: Vec<TestCase> = match args.filter.as_deref() {
        Some(filter) => manifest
            .into_iter()
            .filter(|case| case.name.contains(filter))
            .collect(),
        None => manifest,
    };

    if selected.is_empty() {
        return Err(HarnessError::EmptySelection(args.filter.unwrap_or_default()).into());
    }

    let reports = TestRunner::run_all(&selected);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format.unwrap_or(ReportFormat::Text) {
        ReportFormat::Text => report::write_text(&mut out, &reports)?,
        ReportFormat::Json => report::write_json(&mut out, &reports)?,
    }

    Ok(RunSummary {
        passed: reports.iter().filter(|r| r.passed()).count(),
        total: reports.len(),
    })
}

/// Print the registered test names, one per line, in manifest order.
pub fn list() -> crate::Result<()> {
    for case in demo::manifest() {
        println!("{}", case.name);
    }
    Ok(())
}
