//! Move command handler: the explicit way a client changes pipeline stage.

use crate::commands::Out;
use crate::model::{Client, Stage};
use crate::{Config, Pipeline, Result};

/// Moves a client out of its current stage bucket and appends it to the
/// target bucket. Field edits never move clients; this is the only path
/// between stages.
pub async fn move_client(config: &Config, id: u64, stage: Stage) -> Result<Out<Client>> {
    let mut pipeline = Pipeline::load(config.store().clone()).await;
    let moved = pipeline.move_to_stage(id, stage).await?;
    Ok(match moved {
        Some(client) => Out::new(
            format!(
                "Moved client {} '{}' to {}",
                client.id(),
                client.name(),
                stage.display_name()
            ),
            client,
        ),
        None => Out::new_message(format!("Nothing to move: no client with ID {id}")),
    })
}
