//! Command handlers for the painel CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod add;
mod auth;
mod delete;
mod edit;
mod init;
mod list;
mod report;
mod stage;
mod theme;
mod toggle;

use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use add::{add_campaign, add_client, add_deadline, add_task, add_transaction};
pub use auth::{auth_sign_in, auth_sign_out, auth_sign_up, auth_verify};
pub use delete::{
    delete_campaign, delete_client, delete_deadline, delete_task, delete_transaction,
};
pub use edit::{edit_campaign, edit_client, edit_deadline, edit_task, edit_transaction};
pub use init::init;
pub use list::{
    list_campaigns, list_clients, list_deadlines, list_pipeline, list_tasks, list_transactions,
};
pub use report::{report_monthly, report_summary, DashboardSummary};
pub use stage::move_client;
pub use theme::theme;
pub use toggle::toggle_task;

/// The output type for a command. This allows the command to return a
/// consistent message and, optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}
