//! Pass/fail summary printing.

use std::io::Write;

use colored::Colorize;
use serde::Serialize;

use crate::output::OutputConfig;
use crate::result::TestReport;
use crate::HarnessError;

/// Write the console report:
///
/// ```text
/// Test results: 1/2 passed.
/// [ * ] examine::demo::passing_assertion
/// [!!!] examine::demo::failing_assertion
///          one should equal zero
/// ```
pub fn write_text<W: Write>(writer: &mut W, reports: &[TestReport]) -> crate::Result<()> {
    let render = |result: std::io::Result<()>| -> crate::Result<()> {
        result.map_err(|e| HarnessError::ReportError(e.to_string()).into())
    };

    let passed = reports.iter().filter(|r| r.passed()).count();
    render(writeln!(
        writer,
        "Test results: {}/{} passed.",
        passed,
        reports.len()
    ))?;

    for report in reports {
        render(writeln!(writer, "{} {}", marker(report), report.name))?;
        for message in &report.messages {
            render(writeln!(writer, "         {}", message))?;
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct JsonSummary<'a> {
    passed: usize,
    total: usize,
    tests: &'a [TestReport],
}

/// Write the report as a single JSON object `{passed, total, tests}`.
pub fn write_json<W: Write>(writer: &mut W, reports: &[TestReport]) -> crate::Result<()> {
    let summary = JsonSummary {
        passed: reports.iter().filter(|r| r.passed()).count(),
        total: reports.len(),
        tests: reports,
    };
    serde_json::to_writer_pretty(&mut *writer, &summary)
        .map_err(|e| HarnessError::ReportError(e.to_string()))?;
    writeln!(writer).map_err(|e| HarnessError::ReportError(e.to_string()))?;
    Ok(())
}

fn marker(report: &TestReport) -> String {
    let marker = if report.failed { "[!!!]" } else { "[ * ]" };
    if !OutputConfig::colors_enabled() {
        return marker.to_string();
    }
    if report.failed {
        marker.red().to_string()
    } else {
        marker.green().to_string()
    }
}
