//! Handler registrations and pointer capture.
//!
//! Models the host's event system closely enough to make duplicate
//! registrations observable: registering the same handler twice really
//! does produce two invocations. Idempotence is therefore a property of
//! the callers, which use [`EventRouter::rebind`] on every state entry.

use ovd_core::ElementId;
use smallvec::SmallVec;
use std::collections::HashMap;

/// The handlers the drag behavior attaches to elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    PointerDown,
    PointerMove,
    PointerUp,
    LostCapture,
    SizeChanged,
}

/// Handlers attached to an armed drag handle.
pub const SESSION_HANDLERS: [HandlerKind; 3] = [
    HandlerKind::PointerMove,
    HandlerKind::PointerUp,
    HandlerKind::LostCapture,
];

#[derive(Debug, Default)]
pub struct EventRouter {
    handlers: HashMap<ElementId, SmallVec<[HandlerKind; 4]>>,
    captured: Option<ElementId>,
}

impl EventRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a registration. Duplicates are kept.
    pub fn add_handler(&mut self, element: ElementId, kind: HandlerKind) {
        self.handlers.entry(element).or_default().push(kind);
    }

    /// Remove one registration of `kind`. Returns false if none existed.
    pub fn remove_handler(&mut self, element: ElementId, kind: HandlerKind) -> bool {
        let Some(list) = self.handlers.get_mut(&element) else {
            return false;
        };
        let Some(pos) = list.iter().position(|k| *k == kind) else {
            return false;
        };
        list.remove(pos);
        if list.is_empty() {
            self.handlers.remove(&element);
        }
        true
    }

    /// Remove every registration of each kind in `kinds`.
    pub fn remove_all(&mut self, element: ElementId, kinds: &[HandlerKind]) {
        if let Some(list) = self.handlers.get_mut(&element) {
            list.retain(|k| !kinds.contains(k));
            if list.is_empty() {
                self.handlers.remove(&element);
            }
        }
    }

    /// Leave exactly one registration of each kind in `kinds`.
    pub fn rebind(&mut self, element: ElementId, kinds: &[HandlerKind]) {
        self.remove_all(element, kinds);
        for kind in kinds {
            self.add_handler(element, *kind);
        }
    }

    pub fn handler_count(&self, element: ElementId, kind: HandlerKind) -> usize {
        self.handlers
            .get(&element)
            .map_or(0, |list| list.iter().filter(|k| **k == kind).count())
    }

    /// Total registrations on `element`, all kinds.
    pub fn registrations(&self, element: ElementId) -> usize {
        self.handlers.get(&element).map_or(0, |list| list.len())
    }

    pub fn captured(&self) -> Option<ElementId> {
        self.captured
    }

    /// Give pointer capture to `element`. Returns the previous holder if
    /// capture moved away from a different element.
    pub fn capture(&mut self, element: ElementId) -> Option<ElementId> {
        self.captured
            .replace(element)
            .filter(|previous| *previous != element)
    }

    /// Release capture if `element` holds it.
    pub fn release(&mut self, element: ElementId) -> bool {
        if self.captured == Some(element) {
            self.captured = None;
            true
        } else {
            false
        }
    }

    /// Release capture unconditionally, returning the holder.
    pub fn release_any(&mut self) -> Option<ElementId> {
        self.captured.take()
    }
}
