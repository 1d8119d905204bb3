// Endpoint smoke checker
//
// Issues one GET per (path, expected_status) pair against an application
// handle and records pass/fail per pair. Failures never abort the run.

pub mod dispatch;
pub mod error;

use std::path::Path;
use std::time::Instant;

use futures::future::join_all;
use serde::{Deserialize, Serialize};

pub use dispatch::{Dispatch, InProcess, Remote};
pub use error::CheckError;

/// Valid HTTP status range a handle may report
pub const STATUS_RANGE: std::ops::RangeInclusive<u16> = 100..=599;

fn default_expected_status() -> u16 {
    200
}

/// One path and the status it must answer with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointCheck {
    pub path: String,
    #[serde(default = "default_expected_status")]
    pub expected_status: u16,
}

impl EndpointCheck {
    pub fn new(path: impl Into<String>, expected_status: u16) -> Self {
        Self {
            path: path.into(),
            expected_status,
        }
    }
}

/// GET `path` through `handle` and return the observed status code
pub async fn check<D>(handle: &D, path: &str) -> Result<u16, CheckError>
where
    D: Dispatch + ?Sized,
{
    if path.is_empty() || !path.starts_with('/') {
        return Err(CheckError::InvalidPath(path.to_string()));
    }

    let status = handle.get(path).await?;

    if !STATUS_RANGE.contains(&status) {
        return Err(CheckError::dispatch(
            path,
            format!("status {} outside valid HTTP range", status),
        ));
    }

    Ok(status)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckOutcome {
    Passed { observed: u16 },
    AssertionFailure { expected: u16, observed: u16 },
    DispatchError { message: String },
}

impl CheckOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, CheckOutcome::Passed { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub check: EndpointCheck,
    #[serde(flatten)]
    pub outcome: CheckOutcome,
    pub elapsed_ms: u64,
}

/// Run one check and fold every failure mode into an outcome
pub async fn run_check<D>(handle: &D, endpoint: &EndpointCheck) -> CheckResult
where
    D: Dispatch + ?Sized,
{
    let started = Instant::now();

    let outcome = match check(handle, &endpoint.path).await {
        Ok(observed) if observed == endpoint.expected_status => {
            tracing::debug!(path = %endpoint.path, status = observed, "Check passed");
            CheckOutcome::Passed { observed }
        }
        Ok(observed) => {
            tracing::warn!(
                path = %endpoint.path,
                expected = endpoint.expected_status,
                observed,
                "Status mismatch"
            );
            CheckOutcome::AssertionFailure {
                expected: endpoint.expected_status,
                observed,
            }
        }
        Err(e) => {
            tracing::warn!(path = %endpoint.path, error = %e, "Check could not be dispatched");
            CheckOutcome::DispatchError {
                message: e.to_string(),
            }
        }
    };

    CheckResult {
        check: endpoint.clone(),
        outcome,
        elapsed_ms: started.elapsed().as_millis() as u64,
    }
}

/// Ordered set of checks to run against one handle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SmokeSuite {
    pub checks: Vec<EndpointCheck>,
}

impl Default for SmokeSuite {
    /// `/` and `/api/status`, both expecting 200
    fn default() -> Self {
        Self::new(
            crate::app::ROUTES
                .iter()
                .map(|path| EndpointCheck::new(*path, 200))
                .collect(),
        )
    }
}

impl SmokeSuite {
    pub fn new(checks: Vec<EndpointCheck>) -> Self {
        Self { checks }
    }

    /// Parse a YAML list of `{path, expected_status}` entries
    pub fn from_yaml(source: &str) -> Result<Self, CheckError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, CheckError> {
        let source = std::fs::read_to_string(path).map_err(|source| CheckError::SuiteRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&source)
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Run every check in order
    pub async fn run<D>(&self, handle: &D) -> SmokeReport
    where
        D: Dispatch + ?Sized,
    {
        tracing::info!(target_handle = %handle.describe(), checks = self.len(), "Running smoke suite");

        let mut results = Vec::with_capacity(self.checks.len());
        for endpoint in &self.checks {
            results.push(run_check(handle, endpoint).await);
        }

        SmokeReport::new(handle.describe(), results)
    }

    /// Run every check concurrently; results keep suite order
    pub async fn run_parallel<D>(&self, handle: &D) -> SmokeReport
    where
        D: Dispatch + ?Sized,
    {
        tracing::info!(
            target_handle = %handle.describe(),
            checks = self.len(),
            "Running smoke suite in parallel"
        );

        let results = join_all(self.checks.iter().map(|endpoint| run_check(handle, endpoint))).await;

        SmokeReport::new(handle.describe(), results)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmokeReport {
    pub target: String,
    pub results: Vec<CheckResult>,
}

impl SmokeReport {
    pub fn new(target: String, results: Vec<CheckResult>) -> Self {
        Self { target, results }
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_pass()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }
}
