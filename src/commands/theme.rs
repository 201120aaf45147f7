//! Theme command handler.

use crate::args::ThemeChoice;
use crate::commands::Out;
use crate::{Config, Prefs, Result};

/// Shows or sets the persisted dark-mode preference. With no value, reports
/// the current theme; an unset preference follows the system.
pub async fn theme(config: &Config, value: Option<ThemeChoice>) -> Result<Out<()>> {
    let prefs = Prefs::new(config.store().clone());
    let message = match value {
        Some(choice) => {
            let dark = choice == ThemeChoice::Dark;
            prefs.set_dark_mode(dark).await?;
            format!("Theme set to {}", if dark { "dark" } else { "light" })
        }
        None => match prefs.dark_mode().await {
            Some(true) => "Theme: dark".to_string(),
            Some(false) => "Theme: light".to_string(),
            None => "Theme: following the system preference".to_string(),
        },
    };
    Ok(Out::new_message(message))
}
