//! Per-element drag capability records.
//!
//! Instead of framework-level attached properties, each element that takes
//! part in dragging has an explicit [`DraggableElement`] record keyed by its
//! id. Handler wiring for a toggle lives in the controller.

use ovd_core::{ElementId, VisualHost};
use std::collections::HashMap;

/// Capability record for one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DraggableElement {
    pub is_draggable: bool,
    /// The element that moves. `None` means the handle's parent.
    pub drag_target: Option<ElementId>,
}

/// Outcome of [`Capabilities::set_draggable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Enabled,
    Disabled,
    Unchanged,
}

#[derive(Debug, Default)]
pub struct Capabilities {
    records: HashMap<ElementId, DraggableElement>,
}

impl Capabilities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, element: ElementId) -> DraggableElement {
        self.records.get(&element).copied().unwrap_or_default()
    }

    pub fn is_draggable(&self, element: ElementId) -> bool {
        self.get(element).is_draggable
    }

    pub fn set_draggable(&mut self, element: ElementId, enabled: bool) -> Toggle {
        let record = self.records.entry(element).or_default();
        let toggle = match (record.is_draggable, enabled) {
            (false, true) => Toggle::Enabled,
            (true, false) => Toggle::Disabled,
            _ => Toggle::Unchanged,
        };
        record.is_draggable = enabled;
        if *record == DraggableElement::default() {
            self.records.remove(&element);
        }
        toggle
    }

    pub fn set_drag_target(&mut self, element: ElementId, target: Option<ElementId>) {
        let record = self.records.entry(element).or_default();
        record.drag_target = target;
        if *record == DraggableElement::default() {
            self.records.remove(&element);
        }
    }

    /// The element a drag on `handle` moves: the override if it exists in
    /// the host, else the handle's parent.
    pub fn resolve_target<H: VisualHost + ?Sized>(
        &self,
        host: &H,
        handle: ElementId,
    ) -> Option<ElementId> {
        match self.get(handle).drag_target {
            Some(target) if host.contains(target) => Some(target),
            Some(target) => {
                log::debug!("drag target {target} of {handle} is not in the tree");
                None
            }
            None => host.parent(handle),
        }
    }
}
