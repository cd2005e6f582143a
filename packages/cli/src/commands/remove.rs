use super::{emit, load_document, open_preferences, render_document};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use inkmark_highlighter::Highlighter;
use std::path::PathBuf;

#[derive(Debug, Args)]
#[command(group = clap::ArgGroup::new("target").required(true).args(["id", "all"]))]
pub struct RemoveArgs {
    /// Document snapshot (JSON)
    pub input: PathBuf,

    /// Highlight group to remove, e.g. `highlight_2`
    #[arg(long)]
    pub id: Option<String>,

    /// Remove every highlight in the document
    #[arg(long)]
    pub all: bool,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Emit HTML instead of a JSON snapshot
    #[arg(long)]
    pub html: bool,

    /// Update the highlights saved under this page key
    #[arg(long)]
    pub save: Option<String>,
}

pub fn remove(args: RemoveArgs, cwd: &str) -> Result<()> {
    let mut doc = load_document(&args.input)?;
    let highlighter = Highlighter::new(|| {});

    let removed = match &args.id {
        Some(id) => highlighter.remove_highlight(&mut doc, id)?,
        None => highlighter.remove_all_highlights(&mut doc)?,
    };

    if removed == 0 {
        eprintln!("{} No matching highlights", "⚠️".yellow());
    } else {
        eprintln!("  {} Removed {} fragment(s)", "✓".green(), removed);
    }

    if let Some(page) = &args.save {
        let config = Config::load(cwd)?;
        let mut prefs = open_preferences(&config, cwd)?;
        let remaining = highlighter.highlights(&doc);
        if remaining.is_empty() {
            prefs.forget_highlights(page)?;
        } else {
            prefs.save_highlights(page, remaining)?;
        }
    }

    emit(args.out.as_ref(), &render_document(&doc, args.html)?)
}
