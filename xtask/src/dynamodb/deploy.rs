//! Table deployment operations (Imperative Shell).

use std::time::Duration;

use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ScalarAttributeType,
};
use aws_sdk_dynamodb::Client;

use super::client;
use super::config::{self, TableConfig};
use super::error::{DynamodbError, Result};
use super::planning::{DeployPlan, DestroyPlan, TableStatus};

const MAX_ATTEMPTS: u32 = 60;
const POLL_DELAY: Duration = Duration::from_secs(2);

/// Execute a deploy plan.
pub async fn execute_deploy_plan(client: &Client, plan: &DeployPlan) -> Result<()> {
    match plan {
        DeployPlan::CreateTable { config } => {
            create_table(client, config).await?;
            wait_for_table_active(client, &config.table_name).await?;
        }
        DeployPlan::RecreateTable { config } => {
            wait_for_table_deleted(client, &config.table_name).await?;
            create_table(client, config).await?;
            wait_for_table_active(client, &config.table_name).await?;
        }
        DeployPlan::WaitForActive { table_name } => {
            wait_for_table_active(client, table_name).await?;
        }
        DeployPlan::KeyMismatch {
            table_name,
            existing,
            expected,
        } => {
            return Err(DynamodbError::KeyMismatch {
                table_name: table_name.clone(),
                existing: existing.clone(),
                expected: expected.clone(),
            });
        }
        DeployPlan::NoChanges { .. } => {}
    }
    Ok(())
}

/// Execute a destroy plan.
pub async fn execute_destroy_plan(client: &Client, plan: &DestroyPlan) -> Result<()> {
    match plan {
        DestroyPlan::DeleteTable { table_name } => {
            delete_table(client, table_name).await?;
            wait_for_table_deleted(client, table_name).await?;
        }
        DestroyPlan::AlreadyGone { .. } => {}
    }
    Ok(())
}

async fn create_table(client: &Client, config: &TableConfig) -> Result<()> {
    let key_schema = KeySchemaElement::builder()
        .attribute_name(&config.primary_key_name)
        .key_type(KeyType::Hash)
        .build()
        .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;

    let attribute_definition = AttributeDefinition::builder()
        .attribute_name(&config.primary_key_name)
        .attribute_type(ScalarAttributeType::S)
        .build()
        .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;

    client
        .create_table()
        .table_name(&config.table_name)
        .key_schema(key_schema)
        .attribute_definitions(attribute_definition)
        .billing_mode(to_billing_mode(config.billing_mode))
        .send()
        .await
        .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;
    Ok(())
}

async fn delete_table(client: &Client, table_name: &str) -> Result<()> {
    client
        .delete_table()
        .table_name(table_name)
        .send()
        .await
        .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;
    Ok(())
}

async fn wait_for_table_active(client: &Client, table_name: &str) -> Result<()> {
    for _ in 0..MAX_ATTEMPTS {
        if let Some(state) = client::get_table_state(client, table_name).await? {
            if state.status == TableStatus::Active {
                return Ok(());
            }
        }
        tokio::time::sleep(POLL_DELAY).await;
    }

    Err(DynamodbError::TableActivationTimeout(table_name.to_string()))
}

async fn wait_for_table_deleted(client: &Client, table_name: &str) -> Result<()> {
    for _ in 0..MAX_ATTEMPTS {
        if client::get_table_state(client, table_name).await?.is_none() {
            return Ok(());
        }
        tokio::time::sleep(POLL_DELAY).await;
    }

    Err(DynamodbError::TableDeletionTimeout(table_name.to_string()))
}

fn to_billing_mode(mode: config::BillingMode) -> BillingMode {
    match mode {
        config::BillingMode::PayPerRequest => BillingMode::PayPerRequest,
    }
}
