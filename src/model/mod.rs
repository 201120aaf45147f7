//! Types that represent the core data model, such as `Client`, `Task` and
//! `Transaction`.

mod amount;
mod campaign;
mod client;
mod deadline;
mod task;
mod transaction;

pub use amount::{Amount, AmountFormat};
pub use campaign::{Campaign, CampaignUpdates, NewCampaign};
pub use client::{Client, ClientUpdates, NewClient, Stage};
pub use deadline::{Deadline, DeadlineUpdates, NewDeadline};
pub use task::{NewTask, Task, TaskCategory, TaskUpdates};
pub use transaction::{
    category_suggestions, NewTransaction, Transaction, TransactionKind, TransactionStatus,
    TransactionUpdates, EXPENSE_CATEGORIES, INCOME_CATEGORIES, PAYMENT_METHODS,
};

use serde::{Deserialize, Serialize};

/// Priority of a task or deadline.
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

serde_plain::derive_display_from_serialize!(Priority);
serde_plain::derive_fromstr_from_deserialize!(Priority);

/// Today's calendar date as a `YYYY-MM-DD` string. Dates are stored as plain
/// strings throughout the data model.
pub(crate) fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}
