//! These structs provide the CLI interface for the painel CLI.

use crate::model::{Amount, Priority, Stage, TaskCategory, TransactionKind, TransactionStatus};
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;

/// painel: A command-line tool for running a small business.
///
/// The purpose of this program is to track your clients, tasks, deadlines,
/// cash flow, marketing campaigns and sales pipeline in a local data
/// directory on your own machine. Nothing leaves the machine: every
/// collection is a JSON snapshot in the painel home directory.
///
/// Start with `painel init`, create an account with `painel auth --signup`,
/// sign in, and the dashboard is available through `painel report summary`.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber crate
    /// for instructions.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where painel data and configuration is held. Defaults
    /// to ~/painel
    #[arg(long, env = "PAINEL_HOME", default_value_t = default_painel_home())]
    painel_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, painel_home: PathBuf) -> Self {
        Self {
            log_level,
            painel_home: painel_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn painel_home(&self) -> &DisplayPath {
        &self.painel_home
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and initialize the configuration file.
    ///
    /// This is the first command you should run when setting up painel.
    /// Decide what directory you want to store data in and pass it as
    /// --painel-home (or set PAINEL_HOME). By default it will be $HOME/painel.
    Init(InitArgs),
    /// Sign in, sign up or sign out. The dashboard only renders for a
    /// signed-in user.
    Auth(AuthArgs),
    /// Create a client, task, deadline, campaign or transaction.
    Add(AddArgs),
    /// Edit fields of an existing record. Only the flags you pass change.
    Edit(EditArgs),
    /// Delete a record by ID. Deleting an absent ID is a no-op.
    Delete(DeleteArgs),
    /// List the records of a collection.
    List(ListArgs),
    /// Toggle a task between completed and pending.
    Toggle(ToggleArgs),
    /// Move a client to another pipeline stage.
    Move(MoveArgs),
    /// The dashboard: totals, project status and the monthly series.
    Report(ReportArgs),
    /// Show or set the dark-mode preference.
    Theme(ThemeArgs),
}

/// Args for the `painel init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The name of your business, shown on the dashboard.
    #[arg(long)]
    company: Option<String>,
}

impl InitArgs {
    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }
}

/// Args for the `painel auth` command.
#[derive(Debug, Parser, Clone)]
pub struct AuthArgs {
    /// The email address of the account.
    #[arg(long)]
    pub email: Option<String>,

    /// The password of the account.
    #[arg(long)]
    pub password: Option<String>,

    /// Create the account instead of signing in.
    #[arg(long)]
    pub signup: bool,

    /// Report who is currently signed in, without changing anything.
    #[arg(long)]
    pub verify: bool,

    /// Sign out and discard the stored session.
    #[arg(long)]
    pub sign_out: bool,
}

/// Args for the `painel add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    #[command(subcommand)]
    pub entity: AddSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum AddSubcommand {
    /// Add a client to the sales pipeline. New clients start in the Leads
    /// stage.
    Client(AddClientArgs),
    /// Add a task. New tasks start out not completed.
    Task(AddTaskArgs),
    /// Add a deadline.
    Deadline(AddDeadlineArgs),
    /// Add a marketing campaign. Metrics start at zero.
    Campaign(AddCampaignArgs),
    /// Add a cash-flow transaction.
    Transaction(AddTransactionArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct AddClientArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    #[arg(long, default_value = "")]
    pub company: String,

    /// Estimated deal value, e.g. "R$ 5.000,00" or "5000".
    #[arg(long, default_value = "0")]
    pub value: Amount,
}

#[derive(Debug, Parser, Clone)]
pub struct AddTaskArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Due date, YYYY-MM-DD.
    #[arg(long)]
    pub due_date: String,

    #[arg(long, value_enum, default_value_t = Priority::Medium)]
    pub priority: Priority,

    /// The board section to file the task under.
    #[arg(long, value_enum, default_value_t = TaskCategory::Pending)]
    pub category: TaskCategory,
}

#[derive(Debug, Parser, Clone)]
pub struct AddDeadlineArgs {
    #[arg(long)]
    pub title: String,

    /// Due date, YYYY-MM-DD.
    #[arg(long)]
    pub due_date: String,

    #[arg(long, value_enum, default_value_t = Priority::Medium)]
    pub priority: Priority,

    #[arg(long, default_value = "Pendente")]
    pub status: String,

    #[arg(long, default_value = "")]
    pub assigned_to: String,
}

#[derive(Debug, Parser, Clone)]
pub struct AddCampaignArgs {
    #[arg(long)]
    pub name: String,

    /// Where the campaign runs, e.g. "Google Ads" or "Instagram".
    #[arg(long)]
    pub platform: String,

    #[arg(long, default_value = "0")]
    pub budget: Amount,

    /// First day of the campaign, YYYY-MM-DD.
    #[arg(long)]
    pub start_date: String,

    /// Last day of the campaign, YYYY-MM-DD.
    #[arg(long)]
    pub end_date: String,
}

#[derive(Debug, Parser, Clone)]
pub struct AddTransactionArgs {
    #[arg(long, value_enum)]
    pub kind: TransactionKind,

    #[arg(long)]
    pub description: String,

    /// Amount, e.g. "R$ 1.250,00" or "1250".
    #[arg(long)]
    pub amount: Amount,

    /// Calendar date, YYYY-MM-DD.
    #[arg(long)]
    pub date: String,

    /// Category label, free text. See the suggestion lists in the docs.
    #[arg(long)]
    pub category: String,

    #[arg(long)]
    pub recurring: bool,

    /// Payment method, e.g. "Pix".
    #[arg(long)]
    pub payment_method: Option<String>,

    #[arg(long, value_enum, default_value_t = TransactionStatus::Completed)]
    pub status: TransactionStatus,
}

/// Args for the `painel edit` command.
#[derive(Debug, Parser, Clone)]
pub struct EditArgs {
    #[command(subcommand)]
    pub entity: EditSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum EditSubcommand {
    /// Edit a client's fields in place. The stage never changes here; use
    /// `painel move` for that.
    Client(EditClientArgs),
    /// Edit a task. The completed flag is preserved; use `painel toggle`
    /// to change it.
    Task(EditTaskArgs),
    /// Edit a deadline.
    Deadline(EditDeadlineArgs),
    /// Edit a campaign, including recording its metrics.
    Campaign(EditCampaignArgs),
    /// Edit a transaction.
    Transaction(EditTransactionArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct EditClientArgs {
    /// The client ID.
    pub id: u64,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub company: Option<String>,

    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub value: Option<Amount>,

    /// Date of the last contact, YYYY-MM-DD.
    #[arg(long)]
    pub last_contact: Option<String>,
}

#[derive(Debug, Parser, Clone)]
pub struct EditTaskArgs {
    /// The task ID.
    pub id: u64,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub due_date: Option<String>,

    #[arg(long, value_enum)]
    pub priority: Option<Priority>,

    #[arg(long, value_enum)]
    pub category: Option<TaskCategory>,
}

#[derive(Debug, Parser, Clone)]
pub struct EditDeadlineArgs {
    /// The deadline ID.
    pub id: u64,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub due_date: Option<String>,

    #[arg(long, value_enum)]
    pub priority: Option<Priority>,

    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub assigned_to: Option<String>,
}

#[derive(Debug, Parser, Clone)]
pub struct EditCampaignArgs {
    /// The campaign ID.
    pub id: u64,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub platform: Option<String>,

    #[arg(long)]
    pub budget: Option<Amount>,

    #[arg(long)]
    pub spent: Option<Amount>,

    #[arg(long)]
    pub roi: Option<f64>,

    #[arg(long)]
    pub clicks: Option<u64>,

    #[arg(long)]
    pub conversions: Option<u64>,

    #[arg(long)]
    pub start_date: Option<String>,

    #[arg(long)]
    pub end_date: Option<String>,

    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Debug, Parser, Clone)]
pub struct EditTransactionArgs {
    /// The transaction ID.
    pub id: u64,

    #[arg(long, value_enum)]
    pub kind: Option<TransactionKind>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub amount: Option<Amount>,

    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub recurring: Option<bool>,

    #[arg(long)]
    pub payment_method: Option<String>,

    #[arg(long, value_enum)]
    pub status: Option<TransactionStatus>,
}

/// Args for the `painel delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    #[command(subcommand)]
    pub entity: DeleteSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum DeleteSubcommand {
    /// Delete a client from whichever stage holds it.
    Client(DeleteByIdArgs),
    /// Delete a task.
    Task(DeleteByIdArgs),
    /// Delete a deadline.
    Deadline(DeleteByIdArgs),
    /// Delete a campaign.
    Campaign(DeleteByIdArgs),
    /// Delete a transaction.
    Transaction(DeleteByIdArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct DeleteByIdArgs {
    /// The record ID.
    pub id: u64,
}

/// Args for the `painel list` command.
#[derive(Debug, Parser, Clone)]
pub struct ListArgs {
    #[command(subcommand)]
    pub entity: ListSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ListSubcommand {
    /// List all clients across every stage.
    Clients,
    /// Show the pipeline board: one column per stage with its count.
    Pipeline,
    /// List tasks grouped by board section.
    Tasks,
    /// List deadlines.
    Deadlines,
    /// List campaigns.
    Campaigns,
    /// List transactions, with optional filters.
    Transactions(ListTransactionsArgs),
}

#[derive(Debug, Parser, Clone, Default)]
pub struct ListTransactionsArgs {
    /// Only transactions of this kind.
    #[arg(long, value_enum)]
    pub kind: Option<TransactionKind>,

    /// Only transactions on this exact date, YYYY-MM-DD.
    #[arg(long)]
    pub date: Option<String>,

    /// Only transactions in this category.
    #[arg(long)]
    pub category: Option<String>,

    /// Only transactions with this status.
    #[arg(long, value_enum)]
    pub status: Option<TransactionStatus>,
}

/// Args for the `painel toggle` command.
#[derive(Debug, Parser, Clone)]
pub struct ToggleArgs {
    /// The task ID.
    pub id: u64,
}

/// Args for the `painel move` command.
#[derive(Debug, Parser, Clone)]
pub struct MoveArgs {
    /// The client ID.
    pub id: u64,

    /// The target stage.
    #[arg(value_enum)]
    pub stage: Stage,
}

/// Args for the `painel report` command.
#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    #[command(subcommand)]
    pub which: ReportSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ReportSubcommand {
    /// The dashboard summary: totals, balance and project status.
    Summary,
    /// The monthly income/expense/profit series.
    Monthly(MonthlyReportArgs),
}

#[derive(Debug, Parser, Clone, Default)]
pub struct MonthlyReportArgs {
    /// Write the series to this CSV file instead of only printing it.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Args for the `painel theme` command.
#[derive(Debug, Parser, Clone)]
pub struct ThemeArgs {
    /// The theme to switch to. Without a value, prints the current theme.
    #[arg(value_enum)]
    pub value: Option<ThemeChoice>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, clap::ValueEnum)]
pub enum ThemeChoice {
    Dark,
    Light,
}

/// A `PathBuf` wrapper that knows how to display itself, so it can be used
/// as a clap default value.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DisplayPath(PathBuf);

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        Self(value)
    }
}

impl Deref for DisplayPath {
    type Target = PathBuf;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

/// The default painel home, `$HOME/painel`, falling back to a relative
/// `painel` directory when no home directory can be determined.
fn default_painel_home() -> DisplayPath {
    dirs::home_dir()
        .map(|home| home.join("painel"))
        .unwrap_or_else(|| PathBuf::from("painel"))
        .into()
}
