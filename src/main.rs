use anyhow::bail;
use clap::Parser;
use painel::args::{
    AddSubcommand, Args, Command, DeleteSubcommand, EditSubcommand, ListSubcommand,
    ReportSubcommand,
};
use painel::auth::{self, Gate};
use painel::{commands, Config, Mode, Result};
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().painel_home().path();

    // This allows for exercising the program without touching the local
    // account registry. When PAINEL_IN_TEST_MODE is set and non-zero in
    // length, then the mode will be Mode::Test, otherwise Mode::Local.
    let mode = Mode::from_env();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init(init_args) => commands::init(home, init_args.company()).await?.print(),

        Command::Auth(auth_args) => {
            let config = Config::load(home).await?;
            let provider = auth::provider(&config, mode);
            if auth_args.verify {
                commands::auth_verify(&config).await?.print()
            } else if auth_args.sign_out {
                commands::auth_sign_out(&config, provider.as_ref())
                    .await?
                    .print()
            } else {
                let email = auth_args.email.clone().unwrap_or_default();
                let password = auth_args.password.clone().unwrap_or_default();
                if email.is_empty() || password.is_empty() {
                    bail!("--email and --password are required to sign in or sign up");
                }
                if auth_args.signup {
                    commands::auth_sign_up(&config, provider.as_ref(), &email, &password)
                        .await?
                        .print()
                } else {
                    commands::auth_sign_in(&config, provider.as_ref(), &email, &password)
                        .await?
                        .print()
                }
            }
        }

        Command::Add(add_args) => {
            let config = open(home).await?;
            match add_args.entity.clone() {
                AddSubcommand::Client(args) => commands::add_client(&config, args).await?.print(),
                AddSubcommand::Task(args) => commands::add_task(&config, args).await?.print(),
                AddSubcommand::Deadline(args) => {
                    commands::add_deadline(&config, args).await?.print()
                }
                AddSubcommand::Campaign(args) => {
                    commands::add_campaign(&config, args).await?.print()
                }
                AddSubcommand::Transaction(args) => {
                    commands::add_transaction(&config, args).await?.print()
                }
            }
        }

        Command::Edit(edit_args) => {
            let config = open(home).await?;
            match edit_args.entity.clone() {
                EditSubcommand::Client(args) => commands::edit_client(&config, args).await?.print(),
                EditSubcommand::Task(args) => commands::edit_task(&config, args).await?.print(),
                EditSubcommand::Deadline(args) => {
                    commands::edit_deadline(&config, args).await?.print()
                }
                EditSubcommand::Campaign(args) => {
                    commands::edit_campaign(&config, args).await?.print()
                }
                EditSubcommand::Transaction(args) => {
                    commands::edit_transaction(&config, args).await?.print()
                }
            }
        }

        Command::Delete(delete_args) => {
            let config = open(home).await?;
            match delete_args.entity.clone() {
                DeleteSubcommand::Client(args) => {
                    commands::delete_client(&config, args.id).await?.print()
                }
                DeleteSubcommand::Task(args) => {
                    commands::delete_task(&config, args.id).await?.print()
                }
                DeleteSubcommand::Deadline(args) => {
                    commands::delete_deadline(&config, args.id).await?.print()
                }
                DeleteSubcommand::Campaign(args) => {
                    commands::delete_campaign(&config, args.id).await?.print()
                }
                DeleteSubcommand::Transaction(args) => {
                    commands::delete_transaction(&config, args.id).await?.print()
                }
            }
        }

        Command::List(list_args) => {
            let config = open(home).await?;
            match list_args.entity.clone() {
                ListSubcommand::Clients => commands::list_clients(&config).await?.print(),
                ListSubcommand::Pipeline => commands::list_pipeline(&config).await?.print(),
                ListSubcommand::Tasks => commands::list_tasks(&config).await?.print(),
                ListSubcommand::Deadlines => commands::list_deadlines(&config).await?.print(),
                ListSubcommand::Campaigns => commands::list_campaigns(&config).await?.print(),
                ListSubcommand::Transactions(args) => {
                    commands::list_transactions(&config, args).await?.print()
                }
            }
        }

        Command::Toggle(toggle_args) => {
            let config = open(home).await?;
            commands::toggle_task(&config, toggle_args.id).await?.print()
        }

        Command::Move(move_args) => {
            let config = open(home).await?;
            commands::move_client(&config, move_args.id, move_args.stage)
                .await?
                .print()
        }

        Command::Report(report_args) => {
            let config = open(home).await?;
            match report_args.which.clone() {
                ReportSubcommand::Summary => commands::report_summary(&config).await?.print(),
                ReportSubcommand::Monthly(args) => {
                    commands::report_monthly(&config, args.export.as_deref())
                        .await?
                        .print()
                }
            }
        }

        Command::Theme(theme_args) => {
            let config = open(home).await?;
            commands::theme(&config, theme_args.value).await?.print()
        }
    };
    Ok(())
}

/// Loads the configuration and enforces the authentication gate: everything
/// past the entry commands renders only for a signed-in user.
async fn open(home: &Path) -> Result<Config> {
    let config = Config::load(home).await?;
    let gate = Gate::load(&config).await;
    if !gate.is_signed_in() {
        bail!(
            "Nenhum usuário autenticado. Entre com 'painel auth --email <email> --password <senha>'."
        );
    }
    Ok(config)
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
