//! Init command handler.

use crate::commands::Out;
use crate::{Config, Result};
use std::path::Path;

/// Creates the painel home directory with its configuration file and
/// secrets subdirectory.
///
/// # Errors
///
/// - Returns an error if the directory is already initialized.
/// - Returns an error if any file operation fails.
pub async fn init(home: &Path, company: Option<&str>) -> Result<Out<()>> {
    let config = Config::create(home, company.map(str::to_string)).await?;
    let message = format!(
        "Initialized painel home at '{}'. Create an account with 'painel auth --signup'.",
        config.root().display()
    );
    Ok(Out::new_message(message))
}
