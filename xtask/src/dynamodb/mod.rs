//! Chat history table management commands.

mod client;
mod config;
mod deploy;
mod error;
mod planning;

pub use error::{DynamodbError, Result};

use crate::prelude::*;
use dialoguer::Confirm;

/// DynamoDB infrastructure management commands.
#[derive(Debug, clap::Parser)]
pub struct DynamodbCommand {
    #[command(subcommand)]
    pub action: DynamodbAction,
}

/// Available DynamoDB actions.
#[derive(Debug, clap::Subcommand)]
pub enum DynamodbAction {
    /// Deploy or destroy the chat history table.
    Deploy(DeployCommand),
}

/// Deploy or destroy the chat history table.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Deploy or destroy the chat history table.

By default, this command creates the table with a single string partition
key and on-demand billing, then waits until it is active. Each conversation
is stored as one item in this table.

The command shows a plan of changes before applying and asks for confirmation.

Environment variables:
  AWS_ENDPOINT_URL    - Use local DynamoDB (e.g., http://localhost:8000)
  AWS_REGION          - AWS region (defaults to us-east-1)
  AWS_PROFILE         - AWS profile to use for credentials")]
pub struct DeployCommand {
    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,

    /// Destroy the table instead of creating it.
    #[arg(long)]
    pub destroy: bool,

    /// Table name to use.
    #[arg(long, default_value = config::DEFAULT_TABLE_NAME)]
    pub table_name: String,

    /// Partition key attribute name.
    #[arg(long, default_value = config::DEFAULT_PRIMARY_KEY_NAME)]
    pub primary_key_name: String,
}

/// Main entry point for dynamodb command.
pub async fn run(command: DynamodbCommand, global: crate::Global) -> Result<()> {
    match command.action {
        DynamodbAction::Deploy(deploy_cmd) => run_deploy(deploy_cmd, &global).await,
    }
}

async fn run_deploy(cmd: DeployCommand, global: &crate::Global) -> Result<()> {
    let aws_config = client::AwsConfig::default();

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display());
        aprintln!();
    }

    let dynamo_client = client::create_client(&aws_config).await;
    let current_state = client::get_table_state(&dynamo_client, &cmd.table_name).await?;

    if cmd.destroy {
        run_destroy(&dynamo_client, current_state.as_ref(), &cmd, global).await
    } else {
        run_create(&dynamo_client, current_state.as_ref(), &cmd, global).await
    }
}

async fn run_destroy(
    dynamo_client: &aws_sdk_dynamodb::Client,
    current_state: Option<&planning::TableState>,
    cmd: &DeployCommand,
    global: &crate::Global,
) -> Result<()> {
    let plan = planning::calculate_destroy_plan(current_state, &cmd.table_name);

    if !global.is_silent() {
        aprintln!("{}", p_y("Destroy Plan:"));
        for line in planning::format_destroy_plan(&plan) {
            aprintln!("  {}", p_r(&line));
        }
        aprintln!();
    }

    if matches!(plan, planning::DestroyPlan::AlreadyGone { .. }) {
        if !global.is_silent() {
            aprintln!("{}", p_g("Nothing to destroy."));
        }
        return Ok(());
    }

    if !cmd.force {
        let confirmed = Confirm::new()
            .with_prompt("Are you sure you want to delete this table? ALL DATA WILL BE LOST")
            .default(false)
            .interact()?;

        if !confirmed {
            return Err(DynamodbError::UserCancelled);
        }
    }

    if !global.is_silent() {
        aprintln!("{}", p_b("Deleting table..."));
    }

    deploy::execute_destroy_plan(dynamo_client, &plan).await?;

    if !global.is_silent() {
        aprintln!("{}", p_g("Table destroyed successfully."));
    }

    Ok(())
}

async fn run_create(
    dynamo_client: &aws_sdk_dynamodb::Client,
    current_state: Option<&planning::TableState>,
    cmd: &DeployCommand,
    global: &crate::Global,
) -> Result<()> {
    let table_config = config::chathistory_table_config()
        .with_table_name(&cmd.table_name)
        .with_primary_key_name(&cmd.primary_key_name);

    let plan = planning::calculate_deploy_plan(current_state, &table_config);

    if !global.is_silent() {
        aprintln!("{}", p_c("Deploy Plan:"));
        for line in planning::format_deploy_plan(&plan) {
            if line.starts_with('+') {
                aprintln!("  {}", p_g(&line));
            } else if line.starts_with('!') {
                aprintln!("  {}", p_r(&line));
            } else if line.starts_with('~') {
                aprintln!("  {}", p_y(&line));
            } else {
                aprintln!("  {}", line);
            }
        }
        aprintln!();
    }

    match plan {
        planning::DeployPlan::NoChanges { .. } => {
            if !global.is_silent() {
                aprintln!("{}", p_g("Infrastructure is up to date."));
            }
            return Ok(());
        }
        planning::DeployPlan::KeyMismatch { .. } => {
            return deploy::execute_deploy_plan(dynamo_client, &plan).await;
        }
        _ => {}
    }

    if !cmd.force {
        let confirmed = Confirm::new()
            .with_prompt("Apply these changes?")
            .default(true)
            .interact()?;

        if !confirmed {
            return Err(DynamodbError::UserCancelled);
        }
    }

    if !global.is_silent() {
        aprintln!("{}", p_b("Applying changes..."));
    }

    deploy::execute_deploy_plan(dynamo_client, &plan).await?;

    if !global.is_silent() {
        aprintln!("{}", p_g("Table deployed successfully."));
    }

    Ok(())
}
