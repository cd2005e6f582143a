//! # Inkmark Highlighter
//!
//! Maps a text selection onto highlight fragments and back.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ host: delivers pointer-up / click events    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ highlighter: session + commit + removal     │
//! │  - decompose range into text leaves         │
//! │  - wrap each leaf span in a fragment        │
//! │  - unwrap fragments and normalize parents   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ inkmark-dom: rich text tree                 │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use inkmark_dom::{Document, DomEvent};
//! use inkmark_highlighter::{ColorKey, Highlighter};
//!
//! let mut highlighter = Highlighter::new(|| println!("highlighting finished"));
//! highlighter.start(&mut doc, ColorKey::new("yellow")?);
//!
//! // ... the user selects text ...
//! highlighter.handle_event(&mut doc, DomEvent::PointerUp)?;
//! ```

mod decompose;
mod errors;
mod fragment;
mod highlighter;
mod palette;
mod preferences;
mod records;
mod storage;

pub use decompose::{leaf_spans, text_leaves, LeafSpan};
pub use errors::{HighlightError, HighlightResult, StorageError};
pub use fragment::{
    COLOR_CLASS_PREFIX, CURSOR_CLASS, CURSOR_CLASS_PREFIX, GROUP_ATTR, HIGHLIGHT_CLASS, PART_ATTR,
    REMOVE_ATTR, REMOVE_BUTTON_CLASS,
};
pub use highlighter::{EventOutcome, HighlightGroup, Highlighter};
pub use palette::{ColorKey, Palette, PaletteEntry};
pub use preferences::{Preferences, SavedHighlights, HIGHLIGHT_COLOR_KEY};
pub use records::{collect_highlights, HighlightRecord};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};

// Re-export the tree types callers need alongside the highlighter
pub use inkmark_dom::{BoundaryPoint, Document, DomEvent, NodeId, Range};
