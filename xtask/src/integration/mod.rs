//! Integration test infrastructure.
//!
//! Runs the ignored DynamoDB tests of the `chathistory` crate against
//! DynamoDB Local in Docker or Podman.
//!
//! # Usage
//!
//! ```bash
//! # Start DynamoDB Local, run the tests, stop the container
//! cargo xtask integration
//!
//! # Skip container management (assumes DynamoDB Local is already running)
//! cargo xtask integration --no-docker
//!
//! # Only run tests whose name matches a filter
//! cargo xtask integration --filter clear
//! ```

pub mod containers;
pub mod error;

pub use error::{IntegrationError, Result};

use std::time::Duration;

use containers::{ContainerRuntime, DYNAMODB_SPEC};

use crate::prelude::*;

/// Integration test command.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Run integration tests against DynamoDB Local.

This command starts a DynamoDB Local container, runs the ignored tests of
the chathistory crate with the dynamodb feature, and stops the container
afterward. Each test creates and drops its own table.

Environment variables:
  AWS_ENDPOINT_URL    - Override DynamoDB endpoint (default: http://localhost:8000)")]
pub struct IntegrationCommand {
    /// Skip container management (assume DynamoDB Local is already running).
    #[arg(long)]
    pub no_docker: bool,

    /// Keep the container running after tests complete.
    #[arg(long)]
    pub keep_containers: bool,

    /// Timeout in seconds for container health checks.
    #[arg(long, default_value = "30")]
    pub health_timeout: u64,

    /// Only run tests whose name contains this string.
    #[arg(long)]
    pub filter: Option<String>,
}

/// Main entry point for integration command.
pub async fn run(command: IntegrationCommand, global: crate::Global) -> Result<()> {
    if !global.is_silent() {
        aprintln!("{}", p_b("Integration Tests"));
        aprintln!();
    }

    let runtime = if command.no_docker {
        if !global.is_silent() {
            aprintln!(
                "{} {}",
                p_y("⚠️"),
                "Skipping DynamoDB container management (--no-docker)"
            );
        }
        None
    } else {
        Some(containers::detect_runtime().await?)
    };

    let started = match runtime {
        Some(rt) => start_dynamodb_container(command.health_timeout, &global, rt).await?,
        None => false,
    };

    let endpoint = std::env::var("AWS_ENDPOINT_URL")
        .unwrap_or_else(|_| containers::endpoint_url(&DYNAMODB_SPEC));
    let passed = run_tests(&endpoint, command.filter.as_deref(), &global).await;

    if let Some(rt) = runtime {
        if started && !command.keep_containers {
            stop_dynamodb_container(&global, rt).await;
        } else if started && !global.is_silent() {
            aprintln!(
                "{} {}",
                p_y("⚠️"),
                "Container left running (--keep-containers)"
            );
        }
    }

    aprintln!();
    if passed? {
        aprintln!("{} {}", p_g("✅"), p_g("All integration tests passed!"));
        Ok(())
    } else {
        aprintln!("{} {}", p_r("❌"), p_r("Some integration tests failed"));
        Err(IntegrationError::TestFailed(
            "DynamoDB test suite failed".to_string(),
        ))
    }
}

/// Builds the `cargo test` arguments for the ignored DynamoDB tests.
fn cargo_test_args(filter: Option<&str>) -> Vec<String> {
    let mut args = vec![
        "test".to_string(),
        "-p".to_string(),
        "chathistory".to_string(),
        "--features".to_string(),
        "dynamodb".to_string(),
        "--".to_string(),
        "--ignored".to_string(),
    ];
    if let Some(filter) = filter {
        args.push(filter.to_string());
    }
    args
}

/// Run the ignored DynamoDB tests, returning whether they passed.
async fn run_tests(endpoint: &str, filter: Option<&str>, global: &crate::Global) -> Result<bool> {
    if !global.is_silent() {
        aprintln!(
            "{} {}",
            p_b("🔧"),
            p_b("Running DynamoDB integration tests...")
        );
        aprintln!("{} Endpoint: {}", p_b("  →"), p_y(endpoint));
    }

    let status = tokio::process::Command::new("cargo")
        .args(cargo_test_args(filter))
        .envs(containers::test_environment(endpoint))
        .status()
        .await?;

    Ok(status.success())
}

/// Start the DynamoDB Local container, returning false if it was already running.
async fn start_dynamodb_container(
    timeout_secs: u64,
    global: &crate::Global,
    runtime: ContainerRuntime,
) -> Result<bool> {
    if containers::is_running(runtime, DYNAMODB_SPEC.name).await? {
        if !global.is_silent() {
            aprintln!(
                "{} {}",
                p_y("⚠️"),
                "DynamoDB Local container already running"
            );
        }
        return Ok(false);
    }

    if !global.is_silent() {
        aprintln!("{} {}", p_b("🐳"), "Starting DynamoDB Local container...");
    }

    containers::start_container(runtime, &DYNAMODB_SPEC).await?;

    if !global.is_silent() {
        aprintln!(
            "{} {}",
            p_b("⏳"),
            format!("Waiting for container health (max {}s)...", timeout_secs)
        );
    }

    containers::wait_for_health(&DYNAMODB_SPEC, Duration::from_secs(timeout_secs)).await?;

    if !global.is_silent() {
        aprintln!("{} {}", p_g("✅"), "DynamoDB Local is ready");
    }

    Ok(true)
}

/// Stop the DynamoDB Local container.
async fn stop_dynamodb_container(global: &crate::Global, runtime: ContainerRuntime) {
    if !global.is_silent() {
        aprintln!("{} {}", p_b("🐳"), "Stopping DynamoDB Local container...");
    }

    containers::stop_container(runtime, DYNAMODB_SPEC.name).await;

    if !global.is_silent() {
        aprintln!("{} {}", p_g("✅"), "DynamoDB container stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cargo_test_args() {
        assert_eq!(
            cargo_test_args(None),
            vec![
                "test",
                "-p",
                "chathistory",
                "--features",
                "dynamodb",
                "--",
                "--ignored"
            ]
        );
    }

    #[test]
    fn test_cargo_test_args_with_filter() {
        let args = cargo_test_args(Some("clear"));
        assert_eq!(args.last().map(String::as_str), Some("clear"));
        assert_eq!(args.len(), 8);
    }
}
