//! Input abstraction layer.
//!
//! Pointer events as delivered by the host after hit-testing. Positions
//! are in window space; `element` is the hit element (the router
//! substitutes the capturing element while capture is held).

use ovd_core::{ElementId, Point};

/// Pointer button state at the time of the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerButtons {
    pub primary: bool,
}

impl PointerButtons {
    pub const NONE: Self = Self { primary: false };

    pub const PRIMARY: Self = Self { primary: true };
}

/// A normalized pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed.
    PointerDown { element: ElementId, x: f64, y: f64 },

    PointerMove {
        element: ElementId,
        x: f64,
        y: f64,
        buttons: PointerButtons,
    },

    /// Primary button released.
    PointerUp { element: ElementId, x: f64, y: f64 },

    /// The host took pointer capture away from `element` (focus change,
    /// escape, another element capturing).
    LostCapture { element: ElementId },
}

impl InputEvent {
    pub fn down(element: ElementId, x: f64, y: f64) -> Self {
        Self::PointerDown { element, x, y }
    }

    /// A move with the primary button held.
    pub fn drag(element: ElementId, x: f64, y: f64) -> Self {
        Self::PointerMove {
            element,
            x,
            y,
            buttons: PointerButtons::PRIMARY,
        }
    }

    /// A move with no buttons held.
    pub fn hover(element: ElementId, x: f64, y: f64) -> Self {
        Self::PointerMove {
            element,
            x,
            y,
            buttons: PointerButtons::NONE,
        }
    }

    pub fn up(element: ElementId, x: f64, y: f64) -> Self {
        Self::PointerUp { element, x, y }
    }

    /// The element the host delivered this event to.
    pub fn element(&self) -> ElementId {
        match self {
            Self::PointerDown { element, .. }
            | Self::PointerMove { element, .. }
            | Self::PointerUp { element, .. }
            | Self::LostCapture { element } => *element,
        }
    }

    /// Window-space position, if this is a positional event.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y, .. }
            | Self::PointerUp { x, y, .. } => Some(Point::new(*x, *y)),
            Self::LostCapture { .. } => None,
        }
    }
}
