//! # Colors and stylesheet
//!
//! A [`ColorKey`] is an opaque token; only the [`Palette`] knows what it
//! looks like. The highlighter copies the key into class names and never
//! inspects it further.

use crate::fragment::{
    COLOR_CLASS_PREFIX, CURSOR_CLASS, CURSOR_CLASS_PREFIX, HIGHLIGHT_CLASS, REMOVE_BUTTON_CLASS,
};
use crate::{HighlightError, HighlightResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Write as _;
use std::str::FromStr;

/// Style key selecting a palette entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorKey(String);

impl ColorKey {
    pub fn new(key: impl Into<String>) -> HighlightResult<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(HighlightError::EmptyColor);
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// `yellow`, the first entry of the default palette
impl Default for ColorKey {
    fn default() -> Self {
        Self("yellow".to_string())
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ColorKey {
    type Err = HighlightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ColorKey {
    type Error = HighlightError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ColorKey> for String {
    fn from(key: ColorKey) -> Self {
        key.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub key: ColorKey,
    /// CSS color used as the highlight fill
    pub fill: String,
}

/// Ordered set of highlight colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    pub fn from_entries(entries: Vec<PaletteEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn get(&self, key: &ColorKey) -> Option<&PaletteEntry> {
        self.entries.iter().find(|e| &e.key == key)
    }

    pub fn contains(&self, key: &ColorKey) -> bool {
        self.get(key).is_some()
    }

    /// CSS for fragments, the removal button and the cursor cue
    pub fn stylesheet(&self) -> String {
        let mut css = String::new();

        let _ = writeln!(
            css,
            ".{HIGHLIGHT_CLASS} {{\n  position: relative;\n  display: inline;\n  border-radius: 2px;\n  transition: background-color 0.2s ease;\n}}\n"
        );

        for entry in &self.entries {
            let _ = writeln!(
                css,
                ".{COLOR_CLASS_PREFIX}{} {{ background-color: {}; }}",
                entry.key, entry.fill
            );
        }
        css.push('\n');

        let _ = writeln!(
            css,
            ".{REMOVE_BUTTON_CLASS} {{\n  position: absolute;\n  top: -8px;\n  left: -8px;\n  width: 16px;\n  height: 16px;\n  color: #555;\n  border: none;\n  border-radius: 50%;\n  cursor: pointer;\n  font-size: 18px;\n  line-height: 1;\n  display: none;\n  z-index: 1000;\n  font-weight: bold;\n  background-color: transparent;\n}}\n"
        );
        let _ = writeln!(
            css,
            ".{HIGHLIGHT_CLASS}:hover .{REMOVE_BUTTON_CLASS} {{ display: block; }}\n"
        );

        let _ = writeln!(
            css,
            ".{CURSOR_CLASS}, .{CURSOR_CLASS} * {{ cursor: crosshair; }}"
        );
        for entry in &self.entries {
            let _ = writeln!(
                css,
                ".{CURSOR_CLASS_PREFIX}{} ::selection {{ background-color: {}; }}",
                entry.key, entry.fill
            );
        }

        css
    }
}

impl Default for Palette {
    fn default() -> Self {
        let entry = |key: &str, fill: &str| PaletteEntry {
            key: ColorKey(key.to_string()),
            fill: fill.to_string(),
        };
        Self {
            entries: vec![
                entry("yellow", "#FFFF5C"),
                entry("pink", "#f8879b"),
                entry("blue", "#00CFFF"),
                entry("green", "#7CFC00"),
                entry("orange", "#FF9E00"),
            ],
        }
    }
}
