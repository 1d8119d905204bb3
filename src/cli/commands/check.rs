use std::path::PathBuf;
use std::time::Duration;

use clap::Args;

use crate::app::build_app;
use crate::cli::{utils, OutputFormat};
use crate::config::{self, AppConfig};
use crate::smoke::{CheckError, Dispatch, InProcess, Remote, SmokeReport, SmokeSuite};

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[arg(long, help = "Base URL of a running server; in-process when omitted")]
    pub url: Option<String>,

    #[arg(long, help = "YAML suite file of {path, expected_status} entries")]
    pub suite: Option<PathBuf>,

    #[arg(long, help = "Run checks concurrently")]
    pub parallel: bool,
}

pub async fn handle(args: CheckArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let config = config::config();

    let suite = match &args.suite {
        Some(path) => SmokeSuite::from_file(path)?,
        None => SmokeSuite::default(),
    };

    let handle = dispatcher(args.url.as_deref(), config)?;
    let report = execute(&suite, handle.as_ref(), args.parallel || config.smoke.parallel).await;
    utils::output_report(&output_format, &report)?;

    if !report.all_passed() {
        anyhow::bail!("{} of {} checks failed", report.failed(), report.results.len());
    }

    Ok(())
}

/// Remote handle when a base URL is given, otherwise a fresh in-process app
pub fn dispatcher(url: Option<&str>, config: &AppConfig) -> Result<Box<dyn Dispatch>, CheckError> {
    let handle: Box<dyn Dispatch> = match url {
        Some(url) => Box::new(Remote::new(
            url,
            Duration::from_secs(config.smoke.request_timeout_secs),
        )?),
        None => Box::new(InProcess::from(build_app(config))),
    };
    Ok(handle)
}

pub async fn execute(suite: &SmokeSuite, handle: &dyn Dispatch, parallel: bool) -> SmokeReport {
    if parallel {
        suite.run_parallel(handle).await
    } else {
        suite.run(handle).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;

    fn write_suite(name: &str, yaml: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "status-smoke-{}-{}.yaml",
            std::process::id(),
            name
        ));
        std::fs::write(&path, yaml).unwrap();
        path
    }

    fn args(url: Option<String>, suite: Option<PathBuf>) -> CheckArgs {
        CheckArgs { url, suite, parallel: false }
    }

    #[tokio::test]
    async fn default_suite_in_process_succeeds() {
        let result = handle(args(None, None), OutputFormat::Text).await;
        assert!(result.is_ok(), "unexpected error: {:?}", result);
    }

    #[tokio::test]
    async fn failing_suite_file_returns_error() {
        let path = write_suite(
            "failing",
            "- path: /\n- path: /nonexistent\n  expected_status: 200\n",
        );

        let result = handle(args(None, Some(path.clone())), OutputFormat::Json).await;
        let _ = std::fs::remove_file(&path);

        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "1 of 2 checks failed");
    }

    #[tokio::test]
    async fn passing_suite_file_runs_every_entry() {
        let path = write_suite(
            "passing",
            "- path: /api/status\n- path: /missing\n  expected_status: 404\n",
        );

        let suite = SmokeSuite::from_file(&path).unwrap();
        let result = handle(args(None, Some(path.clone())), OutputFormat::Text).await;
        let _ = std::fs::remove_file(&path);

        assert_eq!(suite.len(), 2);
        assert!(result.is_ok(), "unexpected error: {:?}", result);
    }

    #[tokio::test]
    async fn missing_suite_file_returns_read_error() {
        let path = std::env::temp_dir().join("status-smoke-absent-suite.yaml");
        let err = handle(args(None, Some(path)), OutputFormat::Text).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CheckError>(),
            Some(CheckError::SuiteRead { .. })
        ));
    }

    #[tokio::test]
    async fn unreachable_url_returns_error() {
        let port = portpicker::pick_unused_port().expect("free port");
        let url = format!("http://127.0.0.1:{}", port);

        let result = handle(args(Some(url), None), OutputFormat::Text).await;
        assert_eq!(result.unwrap_err().to_string(), "2 of 2 checks failed");
    }

    #[test]
    fn url_selects_remote_dispatch() {
        let config = AppConfig::for_environment(Environment::Development);

        let remote = dispatcher(Some("http://127.0.0.1:4100"), &config).unwrap();
        assert_eq!(remote.describe(), "http://127.0.0.1:4100/");

        let local = dispatcher(None, &config).unwrap();
        assert_eq!(local.describe(), "in-process");
    }

    #[test]
    fn bad_url_is_rejected() {
        let config = AppConfig::for_environment(Environment::Development);
        assert!(matches!(
            dispatcher(Some("not a url"), &config),
            Err(CheckError::InvalidBaseUrl(_))
        ));
    }
}
