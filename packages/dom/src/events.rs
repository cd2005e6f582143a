//! Listener registry.
//!
//! The document keeps track of which listeners are armed; whoever registered
//! a listener keeps the [`ListenerId`] and asks the registry whether it fires
//! when the host delivers an event.

use crate::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerUp,
    SelectStart,
    Click,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenMode {
    /// Removed after the first delivery
    Once,
    /// Stays until explicitly removed
    UntilRemoved,
}

/// Event delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomEvent {
    PointerUp,
    SelectStart,
    Click { target: NodeId },
}

impl DomEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            DomEvent::PointerUp => EventKind::PointerUp,
            DomEvent::SelectStart => EventKind::SelectStart,
            DomEvent::Click { .. } => EventKind::Click,
        }
    }
}

#[derive(Debug, Clone)]
struct Listener {
    id: ListenerId,
    kind: EventKind,
    mode: ListenMode,
}

#[derive(Debug, Clone, Default)]
pub struct Listeners {
    next_id: u64,
    entries: Vec<Listener>,
}

impl Listeners {
    pub fn add(&mut self, kind: EventKind, mode: ListenMode) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.entries.push(Listener { id, kind, mode });
        id
    }

    /// Returns false when the listener was not registered
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|l| l.id != id);
        self.entries.len() != before
    }

    /// Deliver to `id`: true when it is registered for `kind`.
    /// One-shot listeners are consumed.
    pub fn fire(&mut self, id: ListenerId, kind: EventKind) -> bool {
        let Some(pos) = self
            .entries
            .iter()
            .position(|l| l.id == id && l.kind == kind)
        else {
            return false;
        };
        if self.entries[pos].mode == ListenMode::Once {
            self.entries.remove(pos);
        }
        true
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.entries.iter().filter(|l| l.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
