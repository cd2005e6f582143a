//! # Selection Highlighter
//!
//! Turns the user's next text selection into highlight fragments.
//!
//! ## Session lifecycle
//!
//! ```text
//! Idle ──start(color)──▶ Highlighting ──pointer-up──▶ Idle
//!                              │                        ▲
//!                              └── empty selection ─────┘
//! ```
//!
//! While a session is armed the document carries a one-shot pointer-up
//! listener and a selection-gesture listener, both owned by the session and
//! removed in [`Highlighter::stop`]. Fragments are not tracked after they are
//! inserted; removal finds them again through their marker attributes.

use crate::decompose::leaf_spans;
use crate::fragment::{
    remove_target, unwrap_fragments, wrap_leaf, CURSOR_CLASS, CURSOR_CLASS_PREFIX, GROUP_ATTR,
    HIGHLIGHT_CLASS,
};
use crate::records::{collect_highlights, HighlightRecord};
use crate::{ColorKey, HighlightResult};
use inkmark_dom::{DomEvent, Document, EventKind, ListenMode, ListenerId, NodeId, Range};
use tracing::{debug, info, instrument, warn};

const GROUP_ID_PREFIX: &str = "highlight_";

/// Fragments created by one highlighting action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightGroup {
    /// `highlight_<n>`
    pub id: String,
    pub color: ColorKey,
    /// Fragment elements in document order; index = ordinal
    pub fragments: Vec<NodeId>,
}

/// What the highlighter did with a host event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// Not addressed to this highlighter
    Ignored,
    /// Selection gesture observed while a session is armed
    Suppressed,
    /// The armed pointer-up fired; holds the group when one was committed
    Released(Option<HighlightGroup>),
    /// A removal button was clicked; the host should stop propagation
    Removed { group_id: String, fragments: usize },
}

struct Session {
    color: ColorKey,
    release: ListenerId,
    suppress: ListenerId,
}

pub struct Highlighter {
    group_counter: u64,
    session: Option<Session>,
    on_session_end: Box<dyn FnMut()>,
}

impl Highlighter {
    /// `on_session_end` runs once every time a session finishes, whether a
    /// highlight was committed or not.
    pub fn new(on_session_end: impl FnMut() + 'static) -> Self {
        Self {
            group_counter: 0,
            session: None,
            on_session_end: Box::new(on_session_end),
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn active_color(&self) -> Option<&ColorKey> {
        self.session.as_ref().map(|s| &s.color)
    }

    /// Number of group ids handed out so far
    pub fn groups_created(&self) -> u64 {
        self.group_counter
    }

    /// Continue numbering after the highest `highlight_<n>` group already in
    /// `doc`, so a reloaded document never gets a second group with the same id.
    pub fn resume(&mut self, doc: &Document) {
        let highest = doc
            .query_class(HIGHLIGHT_CLASS)
            .into_iter()
            .filter_map(|fragment| doc.attribute(fragment, GROUP_ATTR))
            .filter_map(|id| id.strip_prefix(GROUP_ID_PREFIX)?.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        if highest > self.group_counter {
            debug!(from = self.group_counter, to = highest, "Resuming group numbering");
            self.group_counter = highest;
        }
    }

    /// Arm a session. No-op while one is already active.
    pub fn start(&mut self, doc: &mut Document, color: ColorKey) {
        if self.session.is_some() {
            debug!(color = %color, "Highlight session already active");
            return;
        }

        let body = doc.body();
        if doc.is_element(body) {
            let cue = format!("{}{}", CURSOR_CLASS_PREFIX, color);
            for class in [CURSOR_CLASS, cue.as_str()] {
                if let Err(e) = doc.add_class(body, class) {
                    warn!(error = %e, "Could not apply cursor cue");
                }
            }
        }

        let listeners = doc.listeners_mut();
        let release = listeners.add(EventKind::PointerUp, ListenMode::Once);
        let suppress = listeners.add(EventKind::SelectStart, ListenMode::UntilRemoved);

        debug!(color = %color, "Highlight session started");
        self.session = Some(Session {
            color,
            release,
            suppress,
        });
    }

    /// End the session, if any, and notify the host
    pub fn stop(&mut self, doc: &mut Document) {
        let Some(session) = self.session.take() else {
            return;
        };

        let body = doc.body();
        if doc.is_element(body) {
            let cue = format!("{}{}", CURSOR_CLASS_PREFIX, session.color);
            for class in [CURSOR_CLASS, cue.as_str()] {
                if let Err(e) = doc.remove_class(body, class) {
                    warn!(error = %e, "Could not clear cursor cue");
                }
            }
        }

        let listeners = doc.listeners_mut();
        listeners.remove(session.release);
        listeners.remove(session.suppress);

        debug!(color = %session.color, "Highlight session stopped");
        (self.on_session_end)();
    }

    /// Route a host event
    pub fn handle_event(
        &mut self,
        doc: &mut Document,
        event: DomEvent,
    ) -> HighlightResult<EventOutcome> {
        match event {
            DomEvent::PointerUp => {
                let Some((release, color)) =
                    self.session.as_ref().map(|s| (s.release, s.color.clone()))
                else {
                    return Ok(EventOutcome::Ignored);
                };
                if !doc.listeners_mut().fire(release, EventKind::PointerUp) {
                    return Ok(EventOutcome::Ignored);
                }
                let group = self.on_pointer_release(doc, color)?;
                Ok(EventOutcome::Released(group))
            }
            DomEvent::SelectStart => {
                let armed = self
                    .session
                    .as_ref()
                    .map(|s| doc.listeners_mut().fire(s.suppress, EventKind::SelectStart))
                    .unwrap_or(false);
                Ok(if armed {
                    EventOutcome::Suppressed
                } else {
                    EventOutcome::Ignored
                })
            }
            DomEvent::Click { target } => {
                let Some(group_id) = remove_target(doc, target) else {
                    return Ok(EventOutcome::Ignored);
                };
                let fragments = self.remove_highlight(doc, &group_id)?;
                Ok(EventOutcome::Removed {
                    group_id,
                    fragments,
                })
            }
        }
    }

    fn on_pointer_release(
        &mut self,
        doc: &mut Document,
        color: ColorKey,
    ) -> HighlightResult<Option<HighlightGroup>> {
        let selection = doc.selection().clone();
        let range = match selection.range_at(0) {
            Some(range) if !selection.is_collapsed() => range,
            _ => {
                debug!("No selection on release");
                self.stop(doc);
                return Ok(None);
            }
        };

        let text = match range.selected_text(doc) {
            Ok(text) => text,
            Err(e) => {
                self.stop(doc);
                return Err(e.into());
            }
        };
        if text.trim().is_empty() {
            debug!("Selection is blank");
            self.stop(doc);
            return Ok(None);
        }

        let committed = self.highlight_range(doc, &range, &color);
        doc.selection_mut().remove_all_ranges();
        self.stop(doc);
        committed.map(Some)
    }

    /// Wrap every text leaf the range covers in a fragment of a new group
    #[instrument(skip(self, doc, range, color), fields(color = %color))]
    pub fn highlight_range(
        &mut self,
        doc: &mut Document,
        range: &Range,
        color: &ColorKey,
    ) -> HighlightResult<HighlightGroup> {
        self.group_counter += 1;
        let id = format!("{}{}", GROUP_ID_PREFIX, self.group_counter);

        let spans = leaf_spans(doc, range)?;
        let mut fragments = Vec::with_capacity(spans.len());
        for span in &spans {
            let fragment = wrap_leaf(doc, span, &id, color, fragments.len())?;
            fragments.push(fragment);
        }

        info!(group_id = %id, fragments = fragments.len(), "Highlight committed");
        Ok(HighlightGroup {
            id,
            color: color.clone(),
            fragments,
        })
    }

    /// Restore the text of every fragment in `group_id`.
    /// Returns the number of fragments removed.
    #[instrument(skip(self, doc))]
    pub fn remove_highlight(&self, doc: &mut Document, group_id: &str) -> HighlightResult<usize> {
        let fragments: Vec<NodeId> = doc
            .query_attribute(GROUP_ATTR, group_id)
            .into_iter()
            .filter(|id| doc.has_class(*id, HIGHLIGHT_CLASS))
            .collect();
        let removed = unwrap_fragments(doc, &fragments)?;
        info!(removed, "Highlight removed");
        Ok(removed)
    }

    /// Restore every fragment this crate created that is still in the tree
    #[instrument(skip(self, doc))]
    pub fn remove_all_highlights(&self, doc: &mut Document) -> HighlightResult<usize> {
        let fragments = doc.query_class(HIGHLIGHT_CLASS);
        let removed = unwrap_fragments(doc, &fragments)?;
        info!(removed, "All highlights removed");
        Ok(removed)
    }

    /// Groups currently present in `doc`
    pub fn highlights(&self, doc: &Document) -> Vec<HighlightRecord> {
        collect_highlights(doc)
    }
}

impl std::fmt::Debug for Highlighter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Highlighter")
            .field("group_counter", &self.group_counter)
            .field("active_color", &self.active_color())
            .finish()
    }
}
