//! Add command handlers.

use crate::args::{
    AddCampaignArgs, AddClientArgs, AddDeadlineArgs, AddTaskArgs, AddTransactionArgs,
};
use crate::commands::report::refresh_monthly_cache;
use crate::commands::Out;
use crate::model::{
    Campaign, Client, Deadline, NewCampaign, NewClient, NewDeadline, NewTask, NewTransaction,
    Task, Transaction,
};
use crate::{Collection, Config, Pipeline, Result};

/// Creates a client on the sales pipeline. New clients always land in the
/// Leads stage; the identifier is unique across every stage.
pub async fn add_client(config: &Config, args: AddClientArgs) -> Result<Out<Client>> {
    let mut pipeline = Pipeline::load(config.store().clone()).await;
    let created = pipeline
        .create_client(NewClient {
            name: args.name,
            email: args.email,
            phone: args.phone,
            company: args.company,
            value: args.value,
        })
        .await?;
    let message = format!(
        "Created client {} '{}' in stage {}",
        created.id(),
        created.name(),
        created.stage().display_name()
    );
    Ok(Out::new(message, created))
}

/// Creates a task. New tasks start out not completed, whatever section they
/// are filed under.
pub async fn add_task(config: &Config, args: AddTaskArgs) -> Result<Out<Task>> {
    let mut tasks = Collection::<Task>::load(config.store().clone()).await;
    let created = tasks
        .create(Task::new(NewTask {
            title: args.title,
            description: args.description,
            due_date: args.due_date,
            priority: args.priority,
            category: args.category,
        }))
        .await?;
    let message = format!("Created task {} '{}'", created.id(), created.title);
    Ok(Out::new(message, created))
}

/// Creates a deadline.
pub async fn add_deadline(config: &Config, args: AddDeadlineArgs) -> Result<Out<Deadline>> {
    let mut deadlines = Collection::<Deadline>::load(config.store().clone()).await;
    let created = deadlines
        .create(Deadline::new(NewDeadline {
            title: args.title,
            due_date: args.due_date,
            priority: args.priority,
            status: args.status,
            assigned_to: args.assigned_to,
        }))
        .await?;
    let message = format!(
        "Created deadline {} '{}' due {}",
        created.id(),
        created.title,
        created.due_date
    );
    Ok(Out::new(message, created))
}

/// Creates a campaign with zeroed metrics and status "Ativo".
pub async fn add_campaign(config: &Config, args: AddCampaignArgs) -> Result<Out<Campaign>> {
    let mut campaigns = Collection::<Campaign>::load(config.store().clone()).await;
    let created = campaigns
        .create(Campaign::new(NewCampaign {
            name: args.name,
            platform: args.platform,
            budget: args.budget,
            start_date: args.start_date,
            end_date: args.end_date,
        }))
        .await?;
    let message = format!(
        "Created campaign {} '{}' on {}",
        created.id(),
        created.name,
        created.platform
    );
    Ok(Out::new(message, created))
}

/// Creates a transaction and refreshes the cached monthly series.
pub async fn add_transaction(
    config: &Config,
    args: AddTransactionArgs,
) -> Result<Out<Transaction>> {
    let mut transactions = Collection::<Transaction>::load(config.store().clone()).await;
    let created = transactions
        .create(Transaction::new(NewTransaction {
            kind: args.kind,
            description: args.description,
            amount: args.amount,
            date: args.date,
            category: args.category,
            recurring: args.recurring,
            payment_method: args.payment_method,
            status: args.status,
        }))
        .await?;
    refresh_monthly_cache(config, transactions.records()).await?;
    let message = format!(
        "Created {} transaction {} of {}",
        created.kind(),
        created.id(),
        created.amount()
    );
    Ok(Out::new(message, created))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Stage, TaskCategory, TransactionKind};
    use crate::test::TestEnv;
    use crate::Prefs;

    #[tokio::test]
    async fn test_add_client_lands_in_leads() {
        let env = TestEnv::new().await;
        let out = add_client(
            env.config(),
            TestEnv::client_args("Maria Souza", "R$ 3.000,00"),
        )
        .await
        .unwrap();
        assert!(out.message().contains("in stage Leads"));
        let created = out.structure().unwrap();
        assert_eq!(created.stage(), Stage::Lead);

        let pipeline = Pipeline::load(env.config().store().clone()).await;
        assert!(pipeline.get(created.id()).is_some());
    }

    #[tokio::test]
    async fn test_add_task_is_not_completed() {
        let env = TestEnv::new().await;
        let out = add_task(env.config(), TestEnv::task_args("Enviar proposta"))
            .await
            .unwrap();
        let created = out.structure().unwrap();
        assert!(!created.completed());
        assert_eq!(created.category(), TaskCategory::Pending);
    }

    #[tokio::test]
    async fn test_add_transaction_refreshes_monthly_cache() {
        let env = TestEnv::new().await;
        let out = add_transaction(
            env.config(),
            TestEnv::transaction_args(TransactionKind::Income, "100", "2024-01-05"),
        )
        .await
        .unwrap();
        assert!(out.message().contains("income transaction"));

        let cache = Prefs::new(env.config().store().clone())
            .monthly_cache()
            .await
            .unwrap();
        assert_eq!(cache.len(), 1);
        assert_eq!(cache[0].month, "2024-01");
    }

    #[tokio::test]
    async fn test_add_campaign_zeroes_metrics() {
        let env = TestEnv::new().await;
        let out = add_campaign(env.config(), TestEnv::campaign_args("Lançamento Q3"))
            .await
            .unwrap();
        let created = out.structure().unwrap();
        assert_eq!(created.clicks, 0);
        assert_eq!(created.status, "Ativo");
    }
}
