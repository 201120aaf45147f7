//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::args::{AddCampaignArgs, AddClientArgs, AddTaskArgs, AddTransactionArgs};
use crate::commands::add_transaction;
use crate::model::{Amount, Priority, TaskCategory, TransactionKind, TransactionStatus};
use crate::Config;
use std::str::FromStr;
use tempfile::TempDir;

/// Test environment that sets up a painel home directory with its Config.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    _temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    /// Creates a test environment with an initialized painel home.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("painel");
        let config = Config::create(&root, Some("Estúdio Teste".to_string()))
            .await
            .unwrap();
        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Args for a client with the given name and estimated value.
    pub fn client_args(name: &str, value: &str) -> AddClientArgs {
        AddClientArgs {
            name: name.to_string(),
            email: format!("{}@email.com", name.to_lowercase().replace(' ', ".")),
            phone: "(11) 90000-0000".to_string(),
            company: "Empresa X".to_string(),
            value: Amount::from_str(value).unwrap(),
        }
    }

    /// Args for a pending, medium-priority task with the given title.
    pub fn task_args(title: &str) -> AddTaskArgs {
        AddTaskArgs {
            title: title.to_string(),
            description: String::new(),
            due_date: "2024-06-10".to_string(),
            priority: Priority::Medium,
            category: TaskCategory::Pending,
        }
    }

    /// Args for a completed transaction of the given kind, amount and date.
    pub fn transaction_args(
        kind: TransactionKind,
        amount: &str,
        date: &str,
    ) -> AddTransactionArgs {
        AddTransactionArgs {
            kind,
            description: "t".to_string(),
            amount: Amount::from_str(amount).unwrap(),
            date: date.to_string(),
            category: "Outros".to_string(),
            recurring: false,
            payment_method: None,
            status: TransactionStatus::Completed,
        }
    }

    /// Args for an active campaign with the given name.
    pub fn campaign_args(name: &str) -> AddCampaignArgs {
        AddCampaignArgs {
            name: name.to_string(),
            platform: "Google Ads".to_string(),
            budget: Amount::from_str("R$ 2.500,00").unwrap(),
            start_date: "2024-07-01".to_string(),
            end_date: "2024-09-30".to_string(),
        }
    }

    /// Seeds the ledger with the canonical three-transaction example:
    /// completed income of 100 and expense of 40 in January 2024, plus a
    /// pending income of 999 in February.
    pub async fn seed_ledger(&self) {
        add_transaction(
            self.config(),
            Self::transaction_args(TransactionKind::Income, "100", "2024-01-05"),
        )
        .await
        .unwrap();
        add_transaction(
            self.config(),
            Self::transaction_args(TransactionKind::Expense, "40", "2024-01-20"),
        )
        .await
        .unwrap();
        let mut pending =
            Self::transaction_args(TransactionKind::Income, "999", "2024-02-01");
        pending.status = TransactionStatus::Pending;
        add_transaction(self.config(), pending).await.unwrap();
    }
}
