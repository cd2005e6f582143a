pub mod highlight;
pub mod prefs;
pub mod remove;
pub mod stylesheet;

pub use highlight::{highlight, HighlightArgs};
pub use prefs::{prefs, PrefsCommand};
pub use remove::{remove, RemoveArgs};
pub use stylesheet::{stylesheet, StylesheetArgs};

use crate::config::Config;
use anyhow::{Context, Result};
use inkmark_dom::{to_html, Document, HtmlOptions};
use inkmark_highlighter::{JsonFileStore, Preferences};
use std::fs;
use std::path::{Path, PathBuf};

pub(crate) fn load_document(path: &Path) -> Result<Document> {
    let json =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Document::from_json(&json).with_context(|| format!("parsing {}", path.display()))
}

pub(crate) fn open_preferences(config: &Config, cwd: &str) -> Result<Preferences<JsonFileStore>> {
    let path = config.store_path(cwd);
    let store = JsonFileStore::open(&path)
        .with_context(|| format!("opening preferences at {}", path.display()))?;
    Ok(Preferences::new(store))
}

/// Serialize `doc` as a JSON snapshot, or as HTML when `html` is set
pub(crate) fn render_document(doc: &Document, html: bool) -> Result<String> {
    if html {
        Ok(to_html(
            doc,
            HtmlOptions {
                pretty: true,
                ..HtmlOptions::default()
            },
        ))
    } else {
        Ok(doc.to_json(true)?)
    }
}

/// Write to `out`, or to stdout when no path is given
pub(crate) fn emit(out: Option<&PathBuf>, content: &str) -> Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(path, content).with_context(|| format!("writing {}", path.display()))
        }
        None => {
            println!("{}", content);
            Ok(())
        }
    }
}
