//! Delete command handlers.
//!
//! Deletion is idempotent: removing an identifier that is not present
//! leaves the collection as it is and reports success.

use crate::commands::report::refresh_monthly_cache;
use crate::commands::Out;
use crate::model::{Campaign, Deadline, Task, Transaction};
use crate::{Collection, Config, Pipeline, Result};

/// Deletes a client from whichever stage bucket currently holds it.
pub async fn delete_client(config: &Config, id: u64) -> Result<Out<()>> {
    let mut pipeline = Pipeline::load(config.store().clone()).await;
    pipeline.delete_client(id).await?;
    Ok(Out::new_message(format!("Deleted client {id}")))
}

/// Deletes a task.
pub async fn delete_task(config: &Config, id: u64) -> Result<Out<()>> {
    let mut tasks = Collection::<Task>::load(config.store().clone()).await;
    tasks.remove(id).await?;
    Ok(Out::new_message(format!("Deleted task {id}")))
}

/// Deletes a deadline.
pub async fn delete_deadline(config: &Config, id: u64) -> Result<Out<()>> {
    let mut deadlines = Collection::<Deadline>::load(config.store().clone()).await;
    deadlines.remove(id).await?;
    Ok(Out::new_message(format!("Deleted deadline {id}")))
}

/// Deletes a campaign.
pub async fn delete_campaign(config: &Config, id: u64) -> Result<Out<()>> {
    let mut campaigns = Collection::<Campaign>::load(config.store().clone()).await;
    campaigns.remove(id).await?;
    Ok(Out::new_message(format!("Deleted campaign {id}")))
}

/// Deletes a transaction and refreshes the cached monthly series.
pub async fn delete_transaction(config: &Config, id: u64) -> Result<Out<()>> {
    let mut transactions = Collection::<Transaction>::load(config.store().clone()).await;
    transactions.remove(id).await?;
    refresh_monthly_cache(config, transactions.records()).await?;
    Ok(Out::new_message(format!("Deleted transaction {id}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{add_client, add_task};
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_delete_task_then_again_is_idempotent() {
        let env = TestEnv::new().await;
        let created = add_task(env.config(), TestEnv::task_args("Enviar proposta"))
            .await
            .unwrap()
            .structure()
            .cloned()
            .unwrap();

        delete_task(env.config(), created.id()).await.unwrap();
        let tasks = Collection::<Task>::load(env.config().store().clone()).await;
        assert!(tasks.get(created.id()).is_none());
        let before = tasks.records().to_vec();

        // A second delete is a silent no-op.
        delete_task(env.config(), created.id()).await.unwrap();
        let tasks = Collection::<Task>::load(env.config().store().clone()).await;
        assert_eq!(tasks.records(), before.as_slice());
    }

    #[tokio::test]
    async fn test_delete_client_removes_from_board() {
        let env = TestEnv::new().await;
        let created = add_client(env.config(), TestEnv::client_args("Maria", "0"))
            .await
            .unwrap()
            .structure()
            .cloned()
            .unwrap();

        delete_client(env.config(), created.id()).await.unwrap();
        let pipeline = Pipeline::load(env.config().store().clone()).await;
        assert!(pipeline.get(created.id()).is_none());
    }
}
