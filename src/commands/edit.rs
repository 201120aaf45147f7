//! Edit command handlers.
//!
//! Edits merge only the fields that were passed; everything else is left
//! untouched. Editing an identifier that does not exist changes nothing and
//! is not an error.

use crate::args::{
    EditCampaignArgs, EditClientArgs, EditDeadlineArgs, EditTaskArgs, EditTransactionArgs,
};
use crate::commands::report::refresh_monthly_cache;
use crate::commands::Out;
use crate::model::{
    Campaign, CampaignUpdates, Client, ClientUpdates, Deadline, DeadlineUpdates, Task,
    TaskUpdates, Transaction, TransactionUpdates,
};
use crate::{Collection, Config, Pipeline, Result};

fn edited_message<T>(kind: &str, id: u64, edited: &Option<T>) -> String {
    match edited {
        Some(_) => format!("Updated {kind} {id}"),
        None => format!("Nothing to update: no {kind} with ID {id}"),
    }
}

/// Edits a client's fields in place, wherever it sits on the board. The
/// stage never changes here; `painel move` is the way between stages.
pub async fn edit_client(config: &Config, args: EditClientArgs) -> Result<Out<Client>> {
    let mut pipeline = Pipeline::load(config.store().clone()).await;
    let updated = pipeline
        .update_client(
            args.id,
            ClientUpdates {
                name: args.name,
                email: args.email,
                phone: args.phone,
                company: args.company,
                status: args.status,
                value: args.value,
                last_contact: args.last_contact,
            },
        )
        .await?;
    let message = edited_message("client", args.id, &updated);
    Ok(match updated {
        Some(client) => Out::new(message, client),
        None => Out::new_message(message),
    })
}

/// Edits a task. The completed flag is preserved: only the toggle changes
/// it, so an edit can file a completed task under any section.
pub async fn edit_task(config: &Config, args: EditTaskArgs) -> Result<Out<Task>> {
    let mut tasks = Collection::<Task>::load(config.store().clone()).await;
    let updated = tasks
        .update(
            args.id,
            TaskUpdates {
                title: args.title,
                description: args.description,
                due_date: args.due_date,
                priority: args.priority,
                category: args.category,
            },
        )
        .await?;
    let message = edited_message("task", args.id, &updated);
    Ok(match updated {
        Some(task) => Out::new(message, task),
        None => Out::new_message(message),
    })
}

/// Edits a deadline.
pub async fn edit_deadline(config: &Config, args: EditDeadlineArgs) -> Result<Out<Deadline>> {
    let mut deadlines = Collection::<Deadline>::load(config.store().clone()).await;
    let updated = deadlines
        .update(
            args.id,
            DeadlineUpdates {
                title: args.title,
                due_date: args.due_date,
                priority: args.priority,
                status: args.status,
                assigned_to: args.assigned_to,
            },
        )
        .await?;
    let message = edited_message("deadline", args.id, &updated);
    Ok(match updated {
        Some(deadline) => Out::new(message, deadline),
        None => Out::new_message(message),
    })
}

/// Edits a campaign, including recording metrics as it runs.
pub async fn edit_campaign(config: &Config, args: EditCampaignArgs) -> Result<Out<Campaign>> {
    let mut campaigns = Collection::<Campaign>::load(config.store().clone()).await;
    let updated = campaigns
        .update(
            args.id,
            CampaignUpdates {
                name: args.name,
                platform: args.platform,
                budget: args.budget,
                spent: args.spent,
                roi: args.roi,
                clicks: args.clicks,
                conversions: args.conversions,
                start_date: args.start_date,
                end_date: args.end_date,
                status: args.status,
            },
        )
        .await?;
    let message = edited_message("campaign", args.id, &updated);
    Ok(match updated {
        Some(campaign) => Out::new(message, campaign),
        None => Out::new_message(message),
    })
}

/// Edits a transaction and refreshes the cached monthly series.
pub async fn edit_transaction(
    config: &Config,
    args: EditTransactionArgs,
) -> Result<Out<Transaction>> {
    let mut transactions = Collection::<Transaction>::load(config.store().clone()).await;
    let updated = transactions
        .update(
            args.id,
            TransactionUpdates {
                kind: args.kind,
                description: args.description,
                amount: args.amount,
                date: args.date,
                category: args.category,
                recurring: args.recurring,
                payment_method: args.payment_method,
                status: args.status,
            },
        )
        .await?;
    refresh_monthly_cache(config, transactions.records()).await?;
    let message = edited_message("transaction", args.id, &updated);
    Ok(match updated {
        Some(transaction) => Out::new(message, transaction),
        None => Out::new_message(message),
    })
}
