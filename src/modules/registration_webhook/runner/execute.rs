// Runs the selected cases one after another, each isolated on its own task.
//
// Responsibilities
// - Probe the service once before any case runs.
// - Record every case as passed, failed or skipped; a failing or panicking case
//   never stops the run.

use crate::modules::registration_webhook::core::errors::ContractError;
use crate::modules::registration_webhook::runner::suite::{Suite, case_id};
use crate::modules::registration_webhook::use_cases::health::probe::wait_for_service;
use crate::shell::state::HarnessState;
use serde::Serialize;
use std::time::Instant;
use tokio::task::JoinError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum CaseOutcome {
    Passed,
    Failed(String),
    Skipped(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseReport {
    pub id: String,
    #[serde(flatten)]
    pub outcome: CaseOutcome,
    pub duration_ms: u64,
}

impl CaseReport {
    pub fn passed(&self) -> bool {
        self.outcome == CaseOutcome::Passed
    }

    pub fn failed(&self) -> bool {
        matches!(self.outcome, CaseOutcome::Failed(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl RunSummary {
    pub fn from_reports(reports: &[CaseReport]) -> Self {
        reports.iter().fold(
            RunSummary {
                total: reports.len(),
                ..RunSummary::default()
            },
            |mut summary, report| {
                match report.outcome {
                    CaseOutcome::Passed => summary.passed += 1,
                    CaseOutcome::Failed(_) => summary.failed += 1,
                    CaseOutcome::Skipped(_) => summary.skipped += 1,
                }
                summary
            },
        )
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

pub async fn run_suite(state: &HarnessState, suite: &Suite, filter: Option<&str>) -> Vec<CaseReport> {
    let selected = suite.select(filter);
    if selected.is_empty() {
        tracing::warn!(?filter, "no contract cases selected");
        return Vec::new();
    }

    let unavailable = wait_for_service(
        &state.client,
        state.config.probe_attempts,
        state.config.probe_interval,
    )
    .await
    .err();
    if let Some(error) = &unavailable {
        tracing::error!(%error, "health probe exhausted, failing every case");
    }

    let mut reports = Vec::with_capacity(selected.len());
    for (category, case) in selected {
        let id = case_id(category, case);

        if let Some(reason) = case.skip_reason(&state.config) {
            tracing::info!(case = %id, %reason, "skipped");
            reports.push(CaseReport {
                id,
                outcome: CaseOutcome::Skipped(reason),
                duration_ms: 0,
            });
            continue;
        }

        if let Some(error) = &unavailable {
            reports.push(CaseReport {
                id,
                outcome: CaseOutcome::Failed(error.to_string()),
                duration_ms: 0,
            });
            continue;
        }

        tracing::info!(case = %id, "running");
        let started = Instant::now();
        let result = match tokio::spawn((case.run)(state.clone())).await {
            Ok(result) => result,
            Err(join_error) => Err(panic_to_error(join_error)),
        };
        let duration_ms = started.elapsed().as_millis() as u64;

        let outcome = match result {
            Ok(()) => {
                tracing::info!(case = %id, duration_ms, "passed");
                CaseOutcome::Passed
            }
            Err(error) => {
                tracing::warn!(case = %id, duration_ms, %error, "failed");
                CaseOutcome::Failed(error.to_string())
            }
        };
        reports.push(CaseReport {
            id,
            outcome,
            duration_ms,
        });
    }
    reports
}

pub(crate) fn panic_to_error(join_error: JoinError) -> ContractError {
    if !join_error.is_panic() {
        return ContractError::Panicked(join_error.to_string());
    }
    let payload = join_error.into_panic();
    let message = payload
        .downcast_ref::<&str>()
        .map(|text| text.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string());
    ContractError::Panicked(message)
}
