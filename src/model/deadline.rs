//! The `Deadline` type.

use crate::collection::Record;
use crate::model::{today, Priority};
use crate::store::DEADLINES_KEY;
use serde::{Deserialize, Serialize};

/// A dated commitment assigned to someone.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deadline {
    pub(crate) id: u64,
    pub(crate) title: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub(crate) due_date: String,
    pub(crate) priority: Priority,
    /// Free-text label, e.g. "Pendente".
    pub(crate) status: String,
    pub(crate) assigned_to: String,
}

impl Deadline {
    pub fn new(fields: NewDeadline) -> Self {
        Self {
            id: 0,
            title: fields.title,
            due_date: fields.due_date,
            priority: fields.priority,
            status: fields.status,
            assigned_to: fields.assigned_to,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Fields of the new-deadline form.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDeadline {
    pub title: String,
    pub due_date: String,
    pub priority: Priority,
    pub status: String,
    pub assigned_to: String,
}

impl Default for NewDeadline {
    fn default() -> Self {
        Self {
            title: String::new(),
            due_date: String::new(),
            priority: Priority::Medium,
            status: "Pendente".to_string(),
            assigned_to: String::new(),
        }
    }
}

/// A field-merge patch for a deadline. `None` fields are left unchanged.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct DeadlineUpdates {
    pub title: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<String>,
    pub assigned_to: Option<String>,
}

impl Record for Deadline {
    const STORE_KEY: &'static str = DEADLINES_KEY;
    type Updates = DeadlineUpdates;

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn apply(&mut self, updates: DeadlineUpdates) {
        if let Some(title) = updates.title {
            self.title = title;
        }
        if let Some(due_date) = updates.due_date {
            self.due_date = due_date;
        }
        if let Some(priority) = updates.priority {
            self.priority = priority;
        }
        if let Some(status) = updates.status {
            self.status = status;
        }
        if let Some(assigned_to) = updates.assigned_to {
            self.assigned_to = assigned_to;
        }
    }

    /// A single blank placeholder dated today.
    fn seed() -> Vec<Self> {
        vec![Deadline {
            id: 1,
            title: String::new(),
            due_date: today(),
            priority: Priority::Medium,
            status: "Pendente".to_string(),
            assigned_to: String::new(),
        }]
    }
}
