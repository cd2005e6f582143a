mod commands;
mod config;

use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use commands::{
    highlight, prefs, remove, stylesheet, HighlightArgs, PrefsCommand, RemoveArgs,
    StylesheetArgs,
};
use tracing_subscriber::EnvFilter;

/// Inkmark CLI - highlight text in document snapshots
#[derive(Parser, Debug)]
#[command(name = "inkmark")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// More logging (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Highlight a selection in a document snapshot
    Highlight(HighlightArgs),

    /// Remove highlights from a document snapshot
    Remove(RemoveArgs),

    /// Print the CSS for the configured palette
    Stylesheet(StylesheetArgs),

    /// Read or change stored preferences
    Prefs {
        #[command(subcommand)]
        command: PrefsCommand,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| {
            let cwd = cwd.display().to_string();
            match cli.command {
                Command::Highlight(args) => highlight(args, &cwd),
                Command::Remove(args) => remove(args, &cwd),
                Command::Stylesheet(args) => stylesheet(args, &cwd),
                Command::Prefs { command } => prefs(command, &cwd),
            }
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
