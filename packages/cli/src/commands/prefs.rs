use super::open_preferences;
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Subcommand;
use colored::Colorize;
use inkmark_highlighter::ColorKey;

#[derive(Debug, Subcommand)]
pub enum PrefsCommand {
    /// Print the remembered highlight color
    Get,

    /// Remember a highlight color
    SetColor {
        /// Palette key
        color: String,
    },

    /// Print the highlights saved for a page as JSON
    Show {
        /// Page key given to `--save`
        page: String,
    },

    /// Drop the highlights saved for a page
    Forget {
        /// Page key given to `--save`
        page: String,
    },
}

pub fn prefs(command: PrefsCommand, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut prefs = open_preferences(&config, cwd)?;

    match command {
        PrefsCommand::Get => match prefs.highlight_color()? {
            Some(color) => println!("{}", color),
            None => println!("{} (default)", config.default_color),
        },
        PrefsCommand::SetColor { color } => {
            let color = ColorKey::new(color)?;
            if !config.palette().contains(&color) {
                return Err(anyhow!("Unknown color '{}'", color));
            }
            prefs.set_highlight_color(&color)?;
            println!("  {} Highlight color set to {}", "✓".green(), color);
        }
        PrefsCommand::Show { page } => match prefs.saved_highlights(&page)? {
            Some(saved) => println!("{}", serde_json::to_string_pretty(&saved)?),
            None => eprintln!("{} Nothing saved for {}", "⚠️".yellow(), page),
        },
        PrefsCommand::Forget { page } => {
            prefs.forget_highlights(&page)?;
            println!("  {} Forgot highlights for {}", "✓".green(), page);
        }
    }

    Ok(())
}
