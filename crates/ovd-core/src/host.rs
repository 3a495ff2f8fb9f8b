//! The host-framework boundary.
//!
//! Everything the drag behavior needs from the retained visual tree is
//! expressed by [`VisualHost`]. [`crate::model::VisualTree`] is the
//! in-process implementation; an embedding UI toolkit supplies its own.

use crate::id::ElementId;
use crate::transform::RenderTransform;
use kurbo::{Affine, Point, Size};
use serde::{Deserialize, Serialize};

/// Structural role of an element, as far as overlay dragging cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementRole {
    /// Top-level window; root of a visual tree.
    Window,
    /// The floating-content layer that defines the visible drag bounds.
    OverlayLayer,
    /// A container hosted on the overlay layer (one per floating element).
    Adorner,
    /// A dialog-like widget hosted by an adorner.
    Dialog,
    #[default]
    Element,
}

/// Pointer cursor shown while hovering an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cursor {
    #[default]
    Arrow,
    Move,
}

/// Queries and mutations consumed from the host's retained visual tree.
pub trait VisualHost {
    fn contains(&self, id: ElementId) -> bool;

    /// Immediate parent in the visual hierarchy.
    fn parent(&self, id: ElementId) -> Option<ElementId>;

    /// First hosted child (a dialog's content, an adorner's dialog).
    fn first_child(&self, id: ElementId) -> Option<ElementId>;

    fn role(&self, id: ElementId) -> Option<ElementRole>;

    /// Rendered size after the last arrange pass; zero if never measured.
    fn render_size(&self, id: ElementId) -> Size;

    /// Size requested during measure.
    fn desired_size(&self, id: ElementId) -> Size;

    /// Size of the window that owns `id`, if any.
    fn window_size(&self, id: ElementId) -> Option<Size>;

    /// Usable area of the primary display.
    fn work_area(&self) -> Size;

    /// Maps a point in `id`'s local space to window space, including every
    /// layout offset and render transform on the way up.
    fn local_to_root(&self, id: ElementId) -> Affine;

    fn transform(&self, id: ElementId) -> Option<&RenderTransform>;

    fn set_transform(&mut self, id: ElementId, transform: RenderTransform);

    fn set_cursor(&mut self, id: ElementId, cursor: Cursor);
}

/// Walk strict ancestors of `start` upward, returning the first that
/// satisfies `predicate`.
pub fn find_ancestor<H, P>(host: &H, start: ElementId, mut predicate: P) -> Option<ElementId>
where
    H: VisualHost + ?Sized,
    P: FnMut(ElementId) -> bool,
{
    let mut current = host.parent(start);
    while let Some(id) = current {
        if predicate(id) {
            return Some(id);
        }
        current = host.parent(id);
    }
    None
}

/// Nearest ancestor with the given role.
pub fn find_ancestor_with_role<H: VisualHost + ?Sized>(
    host: &H,
    start: ElementId,
    role: ElementRole,
) -> Option<ElementId> {
    find_ancestor(host, start, |id| host.role(id) == Some(role))
}

/// Express a window-space point relative to `id`'s local origin.
///
/// Returns `None` when `id`'s placement collapses an axis (zero scale), as
/// no local position exists to map back to.
pub fn position_in<H: VisualHost + ?Sized>(
    host: &H,
    id: ElementId,
    window_point: Point,
) -> Option<Point> {
    let affine = host.local_to_root(id);
    let det = affine.determinant();
    if !det.is_finite() || det.abs() <= f64::EPSILON {
        return None;
    }
    Some(affine.inverse() * window_point)
}
