//! The `Task` type and its completion toggle.

use crate::collection::Record;
use crate::model::{today, Priority};
use crate::store::TASKS_KEY;
use serde::{Deserialize, Serialize};

/// The board section a task is listed under.
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
#[serde(rename_all = "camelCase")]
pub enum TaskCategory {
    #[default]
    Pending,
    InProgress,
    Completed,
}

serde_plain::derive_display_from_serialize!(TaskCategory);
serde_plain::derive_fromstr_from_deserialize!(TaskCategory);

impl TaskCategory {
    /// All sections in display order.
    pub const ALL: [TaskCategory; 3] = [
        TaskCategory::Pending,
        TaskCategory::InProgress,
        TaskCategory::Completed,
    ];

    /// The section heading shown above the task list.
    pub fn display_name(&self) -> &'static str {
        match self {
            TaskCategory::Pending => "Tarefas Pendentes",
            TaskCategory::InProgress => "Em Andamento",
            TaskCategory::Completed => "Concluídas",
        }
    }
}

/// A to-do item.
///
/// `completed` and `category` are related but separately stored: the toggle
/// keeps them in lockstep, while a full-record edit may set `category` on its
/// own. States such as `category = inProgress` with `completed = true` are
/// therefore representable and must survive round trips.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub(crate) id: u64,
    pub(crate) title: String,
    pub(crate) description: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub(crate) due_date: String,
    pub(crate) completed: bool,
    pub(crate) priority: Priority,
    pub(crate) category: TaskCategory,
}

impl Task {
    /// Builds a task from the creation-form fields. New tasks are never
    /// completed, whatever section they are filed under.
    pub fn new(fields: NewTask) -> Self {
        Self {
            id: 0,
            title: fields.title,
            description: fields.description,
            due_date: fields.due_date,
            completed: false,
            priority: fields.priority,
            category: fields.category,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn category(&self) -> TaskCategory {
        self.category
    }

    /// Flips the completed flag and forces the section to match: `completed`
    /// when done, `pending` when not. An in-progress task toggled off lands
    /// on `pending`, not back on `inProgress`.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
        self.category = if self.completed {
            TaskCategory::Completed
        } else {
            TaskCategory::Pending
        };
    }
}

/// Fields of the new-task form.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub priority: Priority,
    pub category: TaskCategory,
}

/// A field-merge patch for a task. `None` fields are left unchanged. The
/// `completed` flag is deliberately absent: the edit form preserves it, and
/// the toggle is the only targeted way to change it.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct TaskUpdates {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<Priority>,
    pub category: Option<TaskCategory>,
}

impl Record for Task {
    const STORE_KEY: &'static str = TASKS_KEY;
    type Updates = TaskUpdates;

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn apply(&mut self, updates: TaskUpdates) {
        if let Some(title) = updates.title {
            self.title = title;
        }
        if let Some(description) = updates.description {
            self.description = description;
        }
        if let Some(due_date) = updates.due_date {
            self.due_date = due_date;
        }
        if let Some(priority) = updates.priority {
            self.priority = priority;
        }
        if let Some(category) = updates.category {
            self.category = category;
        }
    }

    /// A single blank placeholder dated today.
    fn seed() -> Vec<Self> {
        vec![Task {
            id: 1,
            title: String::new(),
            description: String::new(),
            due_date: today(),
            completed: false,
            priority: Priority::Medium,
            category: TaskCategory::Pending,
        }]
    }
}
