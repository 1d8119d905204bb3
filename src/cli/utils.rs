use serde_json::json;

use crate::cli::OutputFormat;
use crate::smoke::{CheckOutcome, SmokeReport};

/// One line per check, e.g. `PASS  GET /api/status -> 200 (2ms)`
pub fn format_result_line(result: &crate::smoke::CheckResult) -> String {
    let detail = match &result.outcome {
        CheckOutcome::Passed { observed } => format!("PASS  GET {} -> {}", result.check.path, observed),
        CheckOutcome::AssertionFailure { expected, observed } => format!(
            "FAIL  GET {} -> {} (expected {})",
            result.check.path, observed, expected
        ),
        CheckOutcome::DispatchError { message } => {
            format!("ERROR GET {} -> {}", result.check.path, message)
        }
    };
    format!("{} ({}ms)", detail, result.elapsed_ms)
}

/// Output a smoke report in the appropriate format
pub fn output_report(output_format: &OutputFormat, report: &SmokeReport) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({
                "success": report.all_passed(),
                "passed": report.passed(),
                "failed": report.failed(),
                "report": report,
            }))?);
        }
        OutputFormat::Text => {
            print!("{}", format_report_text(report));
        }
    }
    Ok(())
}

/// Text rendering of a report, one line per check
pub fn format_report_text(report: &SmokeReport) -> String {
    let mut text = format!("Smoke checks against {}\n", report.target);
    for result in &report.results {
        text.push_str(&format!("  {}\n", format_result_line(result)));
    }
    // Failures are summarized once, by the error the check command returns
    if report.all_passed() {
        text.push_str(&format!("✓ {} checks passed\n", report.passed()));
    }
    text
}
