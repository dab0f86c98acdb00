use crate::modules::registration_webhook::runner::execute::{CaseOutcome, CaseReport, RunSummary};
use crate::modules::registration_webhook::runner::suite::{Suite, case_id};
use serde::Serialize;
use std::io::{self, Write};

const RULE: &str = "==================================================";

pub fn list_cases(out: &mut impl Write, suite: &Suite) -> io::Result<()> {
    for category in &suite.categories {
        writeln!(out, "{} - {}", category.name, category.description)?;
        for case in &category.cases {
            writeln!(out, "  {:<40} {}", case_id(category, case), case.description)?;
        }
    }
    Ok(())
}

pub fn write_text(out: &mut impl Write, reports: &[CaseReport]) -> io::Result<()> {
    let summary = RunSummary::from_reports(reports);
    writeln!(out, "{RULE}")?;
    writeln!(out, "Webhook Contract Summary")?;
    writeln!(out, "{RULE}")?;
    for report in reports {
        match &report.outcome {
            CaseOutcome::Passed => {
                writeln!(out, "PASS  {} ({} ms)", report.id, report.duration_ms)?
            }
            CaseOutcome::Failed(reason) => {
                writeln!(out, "FAIL  {} ({} ms)", report.id, report.duration_ms)?;
                writeln!(out, "      {reason}")?;
            }
            CaseOutcome::Skipped(reason) => writeln!(out, "SKIP  {}: {reason}", report.id)?,
        }
    }
    writeln!(out)?;
    writeln!(
        out,
        "Results: {}/{} passed, {} failed, {} skipped",
        summary.passed,
        summary.total - summary.skipped,
        summary.failed,
        summary.skipped
    )?;
    if summary.all_passed() {
        writeln!(out, "All contract cases passed.")
    } else {
        writeln!(out, "{} contract case(s) failed.", summary.failed)
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: RunSummary,
    cases: &'a [CaseReport],
}

pub fn write_json(out: &mut impl Write, reports: &[CaseReport]) -> Result<(), serde_json::Error> {
    let document = JsonReport {
        summary: RunSummary::from_reports(reports),
        cases: reports,
    };
    serde_json::to_writer_pretty(&mut *out, &document)?;
    writeln!(out).map_err(serde_json::Error::io)
}
