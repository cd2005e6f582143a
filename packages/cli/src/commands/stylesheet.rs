use super::emit;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct StylesheetArgs {
    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

/// CSS for the configured palette
pub fn stylesheet(args: StylesheetArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    emit(args.out.as_ref(), &config.palette().stylesheet())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_CONFIG_NAME;
    use std::fs;

    #[test]
    fn test_stylesheet_uses_configured_palette() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(DEFAULT_CONFIG_NAME),
            r##"{ "defaultColor": "mint", "palette": [{ "key": "mint", "fill": "#98FF98" }] }"##,
        )
        .unwrap();
        let out = dir.path().join("css/highlights.css");

        stylesheet(StylesheetArgs { out: Some(out.clone()) }, dir.path().to_str().unwrap())
            .unwrap();

        let css = fs::read_to_string(out).unwrap();
        assert!(css.contains(".text-highlight-mint { background-color: #98FF98; }"));
        assert!(!css.contains("text-highlight-yellow"));
    }
}
