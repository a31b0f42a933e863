//! Pure functions for calculating deployment plans (Functional Core).

use super::config::TableConfig;

/// Represents the current state of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    pub status: TableStatus,
    /// Name of the HASH key attribute, if the description carried one.
    pub primary_key_name: Option<String>,
}

/// Table status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    Active,
    Creating,
    Updating,
    Deleting,
}

/// Planned changes for deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployPlan {
    /// Table doesn't exist, needs to be created.
    CreateTable { config: TableConfig },
    /// Table exists but is still transitioning; wait for it.
    WaitForActive { table_name: String },
    /// Table is being deleted; wait for it to disappear, then create it.
    RecreateTable { config: TableConfig },
    /// Table exists with a different partition key and cannot be reused.
    KeyMismatch {
        table_name: String,
        existing: String,
        expected: String,
    },
    /// Table is up to date, no changes needed.
    NoChanges { table_name: String },
}

/// Plan for destroying a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestroyPlan {
    /// Table exists and will be deleted.
    DeleteTable { table_name: String },
    /// Table doesn't exist, nothing to do.
    AlreadyGone { table_name: String },
}

/// Pure function: Calculate what changes are needed to reach desired state.
pub fn calculate_deploy_plan(current: Option<&TableState>, desired: &TableConfig) -> DeployPlan {
    let state = match current {
        None => {
            return DeployPlan::CreateTable {
                config: desired.clone(),
            }
        }
        Some(state) if state.status == TableStatus::Deleting => {
            return DeployPlan::RecreateTable {
                config: desired.clone(),
            }
        }
        Some(state) => state,
    };

    if let Some(existing) = &state.primary_key_name {
        if existing != &desired.primary_key_name {
            return DeployPlan::KeyMismatch {
                table_name: desired.table_name.clone(),
                existing: existing.clone(),
                expected: desired.primary_key_name.clone(),
            };
        }
    }

    if state.status == TableStatus::Active {
        DeployPlan::NoChanges {
            table_name: desired.table_name.clone(),
        }
    } else {
        DeployPlan::WaitForActive {
            table_name: desired.table_name.clone(),
        }
    }
}

/// Pure function: Calculate destroy plan.
pub fn calculate_destroy_plan(current: Option<&TableState>, table_name: &str) -> DestroyPlan {
    match current {
        Some(state) if state.status != TableStatus::Deleting => DestroyPlan::DeleteTable {
            table_name: table_name.to_string(),
        },
        _ => DestroyPlan::AlreadyGone {
            table_name: table_name.to_string(),
        },
    }
}

/// Pure function: Format a deploy plan for display.
pub fn format_deploy_plan(plan: &DeployPlan) -> Vec<String> {
    match plan {
        DeployPlan::CreateTable { config } => vec![
            format!("+ Create table: {}", config.table_name),
            format!("  Partition key: {} (S)", config.primary_key_name),
            format!("  Billing: {}", config.billing_mode.as_str()),
        ],
        DeployPlan::WaitForActive { table_name } => {
            vec![format!("~ Wait for table '{}' to become active", table_name)]
        }
        DeployPlan::RecreateTable { config } => vec![
            format!("~ Wait for table '{}' to finish deleting", config.table_name),
            format!("+ Create table: {}", config.table_name),
            format!("  Partition key: {} (S)", config.primary_key_name),
            format!("  Billing: {}", config.billing_mode.as_str()),
        ],
        DeployPlan::KeyMismatch {
            table_name,
            existing,
            expected,
        } => vec![format!(
            "! Table '{}' is keyed by '{}', expected '{}'",
            table_name, existing, expected
        )],
        DeployPlan::NoChanges { table_name } => {
            vec![format!("= Table '{}' is up to date", table_name)]
        }
    }
}

/// Pure function: Format a destroy plan for display.
pub fn format_destroy_plan(plan: &DestroyPlan) -> Vec<String> {
    match plan {
        DestroyPlan::DeleteTable { table_name } => {
            vec![format!(
                "- Delete table: {} (ALL CONVERSATIONS WILL BE LOST)",
                table_name
            )]
        }
        DestroyPlan::AlreadyGone { table_name } => {
            vec![format!("= Table '{}' does not exist", table_name)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamodb::config::chathistory_table_config;

    fn state(status: TableStatus, key: &str) -> TableState {
        TableState {
            status,
            primary_key_name: Some(key.to_string()),
        }
    }

    #[test]
    fn test_deploy_plan_creates_missing_table() {
        let config = chathistory_table_config();

        let plan = calculate_deploy_plan(None, &config);

        assert_eq!(plan, DeployPlan::CreateTable { config });
    }

    #[test]
    fn test_deploy_plan_no_changes_for_active_table() {
        let config = chathistory_table_config();
        let current = state(TableStatus::Active, "chat_id");

        let plan = calculate_deploy_plan(Some(&current), &config);

        assert_eq!(
            plan,
            DeployPlan::NoChanges {
                table_name: "chathistory".to_string()
            }
        );
    }

    #[test]
    fn test_deploy_plan_waits_for_creating_table() {
        let config = chathistory_table_config();
        let current = state(TableStatus::Creating, "chat_id");

        let plan = calculate_deploy_plan(Some(&current), &config);

        assert!(matches!(plan, DeployPlan::WaitForActive { .. }));
    }

    #[test]
    fn test_deploy_plan_recreates_deleting_table() {
        let config = chathistory_table_config();
        let current = state(TableStatus::Deleting, "PK");

        let plan = calculate_deploy_plan(Some(&current), &config);

        assert_eq!(plan, DeployPlan::RecreateTable { config });
    }

    #[test]
    fn test_deploy_plan_detects_key_mismatch() {
        let config = chathistory_table_config();
        let current = state(TableStatus::Active, "PK");

        let plan = calculate_deploy_plan(Some(&current), &config);

        assert_eq!(
            plan,
            DeployPlan::KeyMismatch {
                table_name: "chathistory".to_string(),
                existing: "PK".to_string(),
                expected: "chat_id".to_string(),
            }
        );
    }

    #[test]
    fn test_destroy_plan() {
        let current = state(TableStatus::Active, "chat_id");

        assert_eq!(
            calculate_destroy_plan(Some(&current), "chathistory"),
            DestroyPlan::DeleteTable {
                table_name: "chathistory".to_string()
            }
        );
        assert_eq!(
            calculate_destroy_plan(None, "chathistory"),
            DestroyPlan::AlreadyGone {
                table_name: "chathistory".to_string()
            }
        );
    }

    #[test]
    fn test_destroy_plan_skips_deleting_table() {
        let current = state(TableStatus::Deleting, "chat_id");

        assert!(matches!(
            calculate_destroy_plan(Some(&current), "chathistory"),
            DestroyPlan::AlreadyGone { .. }
        ));
    }

    #[test]
    fn test_format_create_plan() {
        let plan = DeployPlan::CreateTable {
            config: chathistory_table_config().with_primary_key_name("session_id"),
        };

        assert_eq!(
            format_deploy_plan(&plan),
            vec![
                "+ Create table: chathistory".to_string(),
                "  Partition key: session_id (S)".to_string(),
                "  Billing: PAY_PER_REQUEST".to_string(),
            ]
        );
    }

    #[test]
    fn test_format_destroy_plan() {
        let lines = format_destroy_plan(&DestroyPlan::DeleteTable {
            table_name: "chathistory".to_string(),
        });

        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("- Delete table: chathistory"));
    }
}
