//! List command handlers.
//!
//! Listing renders a plain-text view into the output message and carries
//! the records as structured data. Sorting is a presentation concern; the
//! collections themselves stay in insertion order.

use crate::args::ListTransactionsArgs;
use crate::commands::Out;
use crate::model::{Campaign, Client, Deadline, Task, TaskCategory, Transaction, TransactionKind};
use crate::pipeline::StageBucket;
use crate::{Collection, Config, Pipeline, Result};

/// Lists all clients across every pipeline stage.
pub async fn list_clients(config: &Config) -> Result<Out<Vec<Client>>> {
    let pipeline = Pipeline::load(config.store().clone()).await;
    let clients: Vec<Client> = pipeline.clients().cloned().collect();
    let mut lines = vec![format!("{} client(s)", clients.len())];
    for client in &clients {
        lines.push(format!(
            "  {} {} ({}) | {} | {}",
            client.id(),
            client.name(),
            client.stage().display_name(),
            client.value(),
            client.email
        ));
    }
    Ok(Out::new(lines.join("\n"), clients))
}

/// Shows the pipeline board: one column per stage with its derived count.
pub async fn list_pipeline(config: &Config) -> Result<Out<Vec<StageBucket>>> {
    let pipeline = Pipeline::load(config.store().clone()).await;
    let mut lines = Vec::new();
    for bucket in pipeline.buckets() {
        lines.push(format!(
            "{} ({})",
            bucket.stage().display_name(),
            bucket.count()
        ));
        for client in bucket.clients() {
            lines.push(format!(
                "  {} {} | {} | {}",
                client.id(),
                client.name(),
                client.status,
                client.value()
            ));
        }
    }
    Ok(Out::new(lines.join("\n"), pipeline.buckets().to_vec()))
}

/// Lists tasks grouped by board section, each with its count.
pub async fn list_tasks(config: &Config) -> Result<Out<Vec<Task>>> {
    let tasks = Collection::<Task>::load(config.store().clone()).await;
    let mut lines = Vec::new();
    for category in TaskCategory::ALL {
        let in_section: Vec<&Task> = tasks
            .records()
            .iter()
            .filter(|t| t.category() == category)
            .collect();
        lines.push(format!(
            "{} ({})",
            category.display_name(),
            in_section.len()
        ));
        for task in in_section {
            let check = if task.completed() { "x" } else { " " };
            lines.push(format!(
                "  [{check}] {} {} | {} | {}",
                task.id(),
                task.title,
                task.due_date,
                task.priority
            ));
        }
    }
    Ok(Out::new(lines.join("\n"), tasks.records().to_vec()))
}

/// Lists deadlines.
pub async fn list_deadlines(config: &Config) -> Result<Out<Vec<Deadline>>> {
    let deadlines = Collection::<Deadline>::load(config.store().clone()).await;
    let mut lines = vec![format!("{} deadline(s)", deadlines.len())];
    for deadline in deadlines.records() {
        lines.push(format!(
            "  {} {} | {} | {} | {}",
            deadline.id(),
            deadline.title,
            deadline.due_date,
            deadline.priority,
            deadline.status
        ));
    }
    Ok(Out::new(lines.join("\n"), deadlines.records().to_vec()))
}

/// Lists campaigns.
pub async fn list_campaigns(config: &Config) -> Result<Out<Vec<Campaign>>> {
    let campaigns = Collection::<Campaign>::load(config.store().clone()).await;
    let mut lines = vec![format!("{} campaign(s)", campaigns.len())];
    for campaign in campaigns.records() {
        lines.push(format!(
            "  {} {} ({}) | budget {} | spent {} | {} clicks | {}",
            campaign.id(),
            campaign.name,
            campaign.platform,
            campaign.budget,
            campaign.spent,
            campaign.clicks,
            campaign.status
        ));
    }
    Ok(Out::new(lines.join("\n"), campaigns.records().to_vec()))
}

/// Lists transactions, filtered by kind, exact date, category and status
/// when the corresponding filters are present.
pub async fn list_transactions(
    config: &Config,
    args: ListTransactionsArgs,
) -> Result<Out<Vec<Transaction>>> {
    let transactions = Collection::<Transaction>::load(config.store().clone()).await;
    let filtered: Vec<Transaction> = transactions
        .records()
        .iter()
        .filter(|t| {
            if let Some(kind) = args.kind {
                if t.kind() != kind {
                    return false;
                }
            }
            if let Some(date) = &args.date {
                if t.date() != date {
                    return false;
                }
            }
            if let Some(category) = &args.category {
                if &t.category != category {
                    return false;
                }
            }
            if let Some(status) = args.status {
                if t.status() != status {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect();

    let mut lines = vec![format!("{} transaction(s)", filtered.len())];
    for transaction in &filtered {
        let sign = match transaction.kind() {
            TransactionKind::Income => "+",
            TransactionKind::Expense => "-",
        };
        lines.push(format!(
            "  {} {} {}{} | {} | {} | {}",
            transaction.id(),
            transaction.date(),
            sign,
            transaction.amount(),
            transaction.description,
            transaction.category,
            transaction.status()
        ));
    }
    Ok(Out::new(lines.join("\n"), filtered))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{add_task, add_transaction};
    use crate::model::{TransactionKind, TransactionStatus};
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_list_pipeline_shows_counts() {
        let env = TestEnv::new().await;
        let out = list_pipeline(env.config()).await.unwrap();
        // The seeded board has one lead and four empty columns.
        assert!(out.message().contains("Leads (1)"));
        assert!(out.message().contains("Fechado (0)"));
        assert_eq!(out.structure().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_list_tasks_groups_by_section() {
        let env = TestEnv::new().await;
        add_task(env.config(), TestEnv::task_args("Enviar proposta"))
            .await
            .unwrap();
        let out = list_tasks(env.config()).await.unwrap();
        // The seed placeholder plus the new task, both pending.
        assert!(out.message().contains("Tarefas Pendentes (2)"));
        assert!(out.message().contains("Em Andamento (0)"));
    }

    #[tokio::test]
    async fn test_list_transactions_filters() {
        let env = TestEnv::new().await;
        add_transaction(
            env.config(),
            TestEnv::transaction_args(TransactionKind::Income, "100", "2024-01-05"),
        )
        .await
        .unwrap();
        add_transaction(
            env.config(),
            TestEnv::transaction_args(TransactionKind::Expense, "40", "2024-01-20"),
        )
        .await
        .unwrap();

        let out = list_transactions(
            env.config(),
            ListTransactionsArgs {
                kind: Some(TransactionKind::Income),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(out.structure().unwrap().len(), 1);
        assert!(out.message().contains("1 transaction(s)"));

        let out = list_transactions(
            env.config(),
            ListTransactionsArgs {
                status: Some(TransactionStatus::Pending),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(out.structure().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_transactions_date_filter_is_exact() {
        let env = TestEnv::new().await;
        add_transaction(
            env.config(),
            TestEnv::transaction_args(TransactionKind::Income, "100", "2024-01-05"),
        )
        .await
        .unwrap();
        let out = list_transactions(
            env.config(),
            ListTransactionsArgs {
                date: Some("2024-01-06".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(out.structure().unwrap().is_empty());
    }
}
