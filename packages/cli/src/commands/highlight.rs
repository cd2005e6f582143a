use super::{emit, load_document, open_preferences, render_document};
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use inkmark_dom::{DomEvent, PointSnapshot, SelectionSnapshot};
use inkmark_highlighter::{ColorKey, EventOutcome, Highlighter};
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Args)]
pub struct HighlightArgs {
    /// Document snapshot (JSON)
    pub input: PathBuf,

    /// Selection start as `path:offset`, e.g. `0/1/0:3`
    #[arg(long)]
    pub start: String,

    /// Selection end as `path:offset`
    #[arg(long)]
    pub end: String,

    /// Palette key (defaults to the last color used)
    #[arg(short, long)]
    pub color: Option<String>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Emit HTML instead of a JSON snapshot
    #[arg(long)]
    pub html: bool,

    /// Save the document's highlights under this page key
    #[arg(long)]
    pub save: Option<String>,
}

pub fn highlight(args: HighlightArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let palette = config.palette();
    let mut prefs = open_preferences(&config, cwd)?;

    let color = match &args.color {
        Some(key) => ColorKey::new(key.as_str())?,
        None => prefs
            .highlight_color()?
            .filter(|key| palette.contains(key))
            .unwrap_or_else(|| config.default_color.clone()),
    };
    if !palette.contains(&color) {
        let known: Vec<&str> = palette.entries().iter().map(|e| e.key.as_str()).collect();
        return Err(anyhow!(
            "Unknown color '{}'. Use one of: {}",
            color,
            known.join(", ")
        ));
    }

    let mut doc = load_document(&args.input)?;
    let selection = SelectionSnapshot {
        start: args.start.parse::<PointSnapshot>()?,
        end: args.end.parse::<PointSnapshot>()?,
    };
    let range = selection.resolve(&doc)?;

    // Replay the toolbar flow: arm, select, release
    let mut highlighter = Highlighter::new(|| debug!("Highlight session ended"));
    highlighter.resume(&doc);
    highlighter.start(&mut doc, color.clone());
    doc.selection_mut().set_range(range);
    let group = match highlighter.handle_event(&mut doc, DomEvent::PointerUp)? {
        EventOutcome::Released(group) => group,
        other => return Err(anyhow!("Unexpected highlighter outcome: {:?}", other)),
    };

    let Some(group) = group else {
        eprintln!(
            "{} Selection is empty, nothing highlighted",
            "⚠️".yellow()
        );
        return Ok(());
    };
    prefs.set_highlight_color(&color)?;

    eprintln!(
        "  {} {} ({} fragment{}, {})",
        "✓".green(),
        group.id.bright_white(),
        group.fragments.len(),
        if group.fragments.len() == 1 { "" } else { "s" },
        color
    );

    if let Some(page) = &args.save {
        let saved = prefs.save_highlights(page, highlighter.highlights(&doc))?;
        eprintln!(
            "  {} Saved {} highlight(s) for {}",
            "✓".green(),
            saved.highlights.len(),
            page
        );
    }

    emit(args.out.as_ref(), &render_document(&doc, args.html)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkmark_highlighter::collect_highlights;
    use std::fs;
    use tempfile::TempDir;

    const DOC: &str = r#"[{"type": "Element", "tag": "body", "children": [
        {"type": "Element", "tag": "p", "children": [
            {"type": "Element", "tag": "b", "children": [{"type": "Text", "content": "bold"}]},
            {"type": "Text", "content": " text"}
        ]}
    ]}]"#;

    fn workspace() -> (TempDir, String, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.json");
        fs::write(&input, DOC).unwrap();
        let cwd = dir.path().to_str().unwrap().to_string();
        (dir, cwd, input)
    }

    fn args(input: PathBuf, out: PathBuf, start: &str, end: &str) -> HighlightArgs {
        HighlightArgs {
            input,
            start: start.to_string(),
            end: end.to_string(),
            color: None,
            out: Some(out),
            html: false,
            save: None,
        }
    }

    #[test]
    fn test_highlight_writes_snapshot() {
        let (dir, cwd, input) = workspace();
        let out = dir.path().join("out.json");
        let mut args = args(input, out.clone(), "0/0/0/0:0", "0/0/1:5");
        args.color = Some("blue".to_string());
        args.save = Some("page-1".to_string());

        highlight(args, &cwd).unwrap();

        let doc = load_document(&out).unwrap();
        let records = collect_highlights(&doc);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].chunks, vec!["bold", " text"]);
        assert_eq!(records[0].color.as_ref().map(ColorKey::as_str), Some("blue"));

        let config = Config::load(&cwd).unwrap();
        let prefs = open_preferences(&config, &cwd).unwrap();
        assert_eq!(
            prefs.highlight_color().unwrap().map(|c| c.to_string()),
            Some("blue".to_string())
        );
        assert_eq!(
            prefs.saved_highlights("page-1").unwrap().unwrap().highlights,
            records
        );
    }

    #[test]
    fn test_highlighting_a_saved_document_gets_a_new_id() {
        let (dir, cwd, input) = workspace();
        let first = dir.path().join("first.json");
        let second = dir.path().join("second.json");

        highlight(args(input, first.clone(), "0/0/0/0:0", "0/0/0/0:4"), &cwd).unwrap();
        // " text" is still the second child of <p>
        highlight(args(first, second.clone(), "0/0/1:1", "0/0/1:5"), &cwd).unwrap();

        let records = collect_highlights(&load_document(&second).unwrap());
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["highlight_1", "highlight_2"]);
        assert_eq!(records[0].chunks, vec!["bold"]);
        assert_eq!(records[1].chunks, vec!["text"]);
    }

    #[test]
    fn test_last_color_is_reused() {
        let (dir, cwd, input) = workspace();
        let config = Config::load(&cwd).unwrap();
        open_preferences(&config, &cwd)
            .unwrap()
            .set_highlight_color(&ColorKey::new("green").unwrap())
            .unwrap();

        let out = dir.path().join("out.json");
        highlight(args(input, out.clone(), "0/0/1:1", "0/0/1:5"), &cwd).unwrap();

        let records = collect_highlights(&load_document(&out).unwrap());
        assert_eq!(records[0].color.as_ref().map(ColorKey::as_str), Some("green"));
        assert_eq!(records[0].text(), "text");
    }

    #[test]
    fn test_empty_selection_writes_nothing() {
        let (dir, cwd, input) = workspace();
        let out = dir.path().join("out.json");
        highlight(args(input, out.clone(), "0/0/1:0", "0/0/1:1"), &cwd).unwrap();
        assert!(!out.exists());
    }

    #[test]
    fn test_unknown_color_is_rejected() {
        let (dir, cwd, input) = workspace();
        let mut args = args(input, dir.path().join("out.json"), "0/0/1:1", "0/0/1:5");
        args.color = Some("mauve".to_string());
        let err = highlight(args, &cwd).unwrap_err();
        assert!(err.to_string().contains("mauve"));
    }

    #[test]
    fn test_bad_points_are_rejected() {
        let (dir, cwd, input) = workspace();
        let out = dir.path().join("out.json");
        assert!(highlight(args(input.clone(), out.clone(), "0/0/1", "0/0/1:5"), &cwd).is_err());
        assert!(highlight(args(input.clone(), out.clone(), "9/9:0", "0/0/1:5"), &cwd).is_err());
        assert!(highlight(args(input, out, "0/0/1:5", "0/0/1:1"), &cwd).is_err());
    }
}
