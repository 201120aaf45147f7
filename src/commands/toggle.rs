//! Toggle command handler.

use crate::commands::Out;
use crate::model::Task;
use crate::{Collection, Config, Result};

/// Toggles a task between completed and pending. The board section follows
/// the flag: `completed` when done, `pending` when not, whatever section
/// the task was in before.
pub async fn toggle_task(config: &Config, id: u64) -> Result<Out<Task>> {
    let mut tasks = Collection::<Task>::load(config.store().clone()).await;
    let toggled = tasks.modify(id, Task::toggle).await?;
    Ok(match toggled {
        Some(task) => {
            let state = if task.completed() {
                "completed"
            } else {
                "pending"
            };
            Out::new(format!("Task {id} is now {state}"), task)
        }
        None => Out::new_message(format!("Nothing to toggle: no task with ID {id}")),
    })
}
