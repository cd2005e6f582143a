//! # Inkmark DOM
//!
//! Owned rich text tree that stands in for a browser document.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ snapshot: JSON ⇄ node tree                  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ document: arena tree                        │
//! │  - insert / replace / remove / normalize    │
//! │  - attributes and class lists               │
//! │  - selection + listener registry            │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ range: boundary points, intersection, text  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Offsets inside text are counted in `char`s.

mod document;
mod error;
mod events;
mod html;
mod node;
mod range;
mod selection;
mod snapshot;

pub use document::{Descendants, Document};
pub use error::{DomError, DomResult};
pub use events::{DomEvent, EventKind, ListenMode, ListenerId, Listeners};
pub use html::{to_html, HtmlOptions};
pub use node::{char_len, char_slice, NodeData, NodeId};
pub use range::{compare_points, BoundaryPoint, Range};
pub use selection::Selection;
pub use snapshot::{NodeSnapshot, PointSnapshot, SelectionSnapshot};
