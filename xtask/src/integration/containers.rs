//! DynamoDB Local container management.
//!
//! Follows the Functional Core - Imperative Shell pattern:
//!
//! - **Pure functions** build command arguments and test environment.
//! - **I/O functions** execute container commands and poll health.

use std::time::Duration;

use tokio::process::Command;

use super::error::{IntegrationError, Result};

// ============================================================================
// Types
// ============================================================================

/// Container runtime (Docker or Podman).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContainerRuntime {
    #[default]
    Docker,
    Podman,
}

/// Specification for a container.
#[derive(Debug, Clone)]
pub struct ContainerSpec {
    pub name: &'static str,
    pub image: &'static str,
    pub port: u16,
    pub command: Option<&'static str>,
    /// Status code returned by `GET /` once the service is up.
    pub healthy_status: u16,
}

/// DynamoDB Local container specification.
///
/// Runs in memory; every test creates its own table.
pub const DYNAMODB_SPEC: ContainerSpec = ContainerSpec {
    name: "chathistory-dynamodb",
    image: "amazon/dynamodb-local:latest",
    port: 8000,
    command: Some("-jar DynamoDBLocal.jar -sharedDb -inMemory"),
    healthy_status: 400,
};

// ============================================================================
// Pure Functions (Functional Core)
// ============================================================================

/// Builds arguments for `docker run` / `podman run`.
pub fn container_run_args(spec: &ContainerSpec) -> Vec<String> {
    let mut args = vec![
        "run".to_string(),
        "--name".to_string(),
        spec.name.to_string(),
        "-d".to_string(),
        "-p".to_string(),
        format!("{}:{}", spec.port, spec.port),
        spec.image.to_string(),
    ];

    if let Some(cmd) = spec.command {
        args.extend(cmd.split_whitespace().map(String::from));
    }

    args
}

/// Endpoint URL for a container listening on localhost.
pub fn endpoint_url(spec: &ContainerSpec) -> String {
    format!("http://localhost:{}", spec.port)
}

/// Environment for `cargo test` against DynamoDB Local.
pub fn test_environment(endpoint_url: &str) -> Vec<(&'static str, String)> {
    vec![
        ("AWS_ENDPOINT_URL", endpoint_url.to_string()),
        ("AWS_REGION", "us-east-1".to_string()),
        ("AWS_ACCESS_KEY_ID", "test".to_string()),
        ("AWS_SECRET_ACCESS_KEY", "test".to_string()),
    ]
}

/// Returns the command name for the container runtime.
pub fn runtime_command(runtime: ContainerRuntime) -> &'static str {
    match runtime {
        ContainerRuntime::Docker => "docker",
        ContainerRuntime::Podman => "podman",
    }
}

// ============================================================================
// I/O Functions (Imperative Shell)
// ============================================================================

/// Detects which container runtime is available, Docker first.
pub async fn detect_runtime() -> Result<ContainerRuntime> {
    for runtime in [ContainerRuntime::Docker, ContainerRuntime::Podman] {
        let output = Command::new(runtime_command(runtime))
            .arg("--version")
            .output()
            .await;

        if let Ok(output) = output {
            if output.status.success() {
                return Ok(runtime);
            }
        }
    }

    Err(IntegrationError::ContainerRuntimeNotFound(
        "Neither docker nor podman found in PATH".to_string(),
    ))
}

/// Returns true if a container with this name is running.
pub async fn is_running(runtime: ContainerRuntime, name: &str) -> Result<bool> {
    let output = Command::new(runtime_command(runtime))
        .args(["ps", "-q", "-f", &format!("name={}", name)])
        .output()
        .await?;

    Ok(!String::from_utf8_lossy(&output.stdout).trim().is_empty())
}

/// Stops and removes a container.
///
/// Errors are ignored since the container might not exist.
pub async fn stop_container(runtime: ContainerRuntime, name: &str) {
    let cmd = runtime_command(runtime);

    let _ = Command::new(cmd).args(["stop", name]).output().await;
    let _ = Command::new(cmd).args(["rm", name]).output().await;
}

/// Starts a container, replacing any stopped container with the same name.
pub async fn start_container(runtime: ContainerRuntime, spec: &ContainerSpec) -> Result<()> {
    stop_container(runtime, spec.name).await;

    let args = container_run_args(spec);
    let output = Command::new(runtime_command(runtime))
        .args(&args)
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(IntegrationError::ContainerFailed(format!(
            "Failed to start container '{}': {}",
            spec.name, stderr
        )));
    }

    Ok(())
}

/// Polls the container's HTTP port until it answers or the timeout is exceeded.
pub async fn wait_for_health(spec: &ContainerSpec, timeout: Duration) -> Result<()> {
    let start = std::time::Instant::now();
    let poll_interval = Duration::from_millis(500);
    let url = format!("{}/", endpoint_url(spec));

    while start.elapsed() < timeout {
        if check_http_health(&url, spec.healthy_status).await {
            return Ok(());
        }
        tokio::time::sleep(poll_interval).await;
    }

    Err(IntegrationError::ContainerNotHealthy {
        name: spec.name.to_string(),
        timeout_secs: timeout.as_secs(),
    })
}

/// DynamoDB Local answers 400 to a bare GET once it is serving.
async fn check_http_health(url: &str, expected_status: u16) -> bool {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build();

    let Ok(client) = client else {
        return false;
    };

    match client.get(url).send().await {
        Ok(response) => response.status().as_u16() == expected_status,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_run_args() {
        let args = container_run_args(&DYNAMODB_SPEC);

        assert_eq!(&args[..4], ["run", "--name", "chathistory-dynamodb", "-d"]);
        assert!(args.contains(&"8000:8000".to_string()));
        assert!(args.contains(&"amazon/dynamodb-local:latest".to_string()));
        assert!(args.contains(&"-inMemory".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("-inMemory"));
    }

    #[test]
    fn test_endpoint_url() {
        assert_eq!(endpoint_url(&DYNAMODB_SPEC), "http://localhost:8000");
    }

    #[test]
    fn test_test_environment() {
        let vars = test_environment("http://localhost:8000");

        assert!(vars.contains(&("AWS_ENDPOINT_URL", "http://localhost:8000".to_string())));
        assert!(vars.contains(&("AWS_REGION", "us-east-1".to_string())));
        assert!(vars.contains(&("AWS_ACCESS_KEY_ID", "test".to_string())));
        assert!(vars.contains(&("AWS_SECRET_ACCESS_KEY", "test".to_string())));
    }

    #[test]
    fn test_runtime_command() {
        assert_eq!(runtime_command(ContainerRuntime::Docker), "docker");
        assert_eq!(runtime_command(ContainerRuntime::Podman), "podman");
    }
}
