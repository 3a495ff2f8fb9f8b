//! Drag session: the per-gesture state between pointer-down and release.
//!
//! ```text
//!            pointer-down (target + adorner + overlay resolved)
//!   Idle ───────────────────────────────────────────────────▶ Armed
//!    ▲                                                          │
//!    │          pointer-up / lost capture                       │ pointer-move
//!    └──────────────────────────────────────────────────────────┘ (clamp + write)
//! ```
//!
//! A session owns no handlers or capture itself; the controller acquires
//! and releases those around [`DragSession::begin`] and dropping the
//! session.

use crate::error::DragRejected;
use ovd_core::{
    ClampInput, DragBounds, DragConfig, ElementId, ElementRole, Point, Translation, Vec2,
    VisualHost, clamp_translation, find_ancestor_with_role, overlay_extent, position_in,
    resolve_translation, target_extent,
};

/// Observable phase of a drag handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Armed,
}

#[derive(Debug, Clone)]
pub struct DragSession {
    pub handle: ElementId,
    pub target: ElementId,
    /// Adorner hosting the target.
    pub adorner: ElementId,
    /// The adorner's parent; defines the drag bounds.
    pub overlay: ElementId,
    pub translation: Translation,
    /// `start - translation` at drag start. Fixed for the session.
    pub grip: Vec2,
    /// Pointer position in overlay space at drag start.
    pub start: Point,
    /// Pointer position relative to the target's origin at drag start.
    pub relate: Point,
}

impl DragSession {
    /// Resolve the hosting structure for `target` and capture the gesture's
    /// starting geometry. Installs a translation on the target if needed.
    pub fn begin<H: VisualHost + ?Sized>(
        host: &mut H,
        handle: ElementId,
        target: ElementId,
        window_point: Point,
    ) -> Result<Self, DragRejected> {
        if !host.contains(target) {
            return Err(DragRejected::NoTarget { handle });
        }
        let adorner = find_ancestor_with_role(host, target, ElementRole::Adorner)
            .ok_or(DragRejected::NoAdorner { target })?;
        let overlay = host
            .parent(adorner)
            .ok_or(DragRejected::NoOverlayLayer { adorner })?;
        // Map the pointer before installing anything, so a rejected
        // gesture leaves the target's transform untouched.
        let start = position_in(host, overlay, window_point)
            .ok_or(DragRejected::SingularTransform { element: overlay })?;
        let relate = position_in(host, target, window_point)
            .ok_or(DragRejected::SingularTransform { element: target })?;
        let translation =
            resolve_translation(host, target).ok_or(DragRejected::NoTarget { handle })?;

        let grip = start.to_vec2() - translation.offset();

        log::debug!(
            "drag armed on {handle}: target {target}, grip ({:.1}, {:.1}), relate ({:.1}, {:.1})",
            grip.x,
            grip.y,
            relate.x,
            relate.y
        );

        Ok(Self {
            handle,
            target,
            adorner,
            overlay,
            translation,
            grip,
            start,
            relate,
        })
    }

    /// Clamp bounds for the current live geometry.
    pub fn bounds<H: VisualHost + ?Sized>(&self, host: &H, config: &DragConfig) -> DragBounds {
        DragBounds::compute(
            self.grip,
            target_extent(host, self.target, config),
            overlay_extent(host, self.overlay, config),
            self.relate,
        )
    }

    /// Move the target to follow the pointer, clamped to the overlay.
    /// Sizes are re-read on every call so layout changes mid-drag apply.
    ///
    /// Returns the written translation, or `None` if the overlay collapsed
    /// since the drag started and the move was skipped.
    pub fn drag_to<H: VisualHost + ?Sized>(
        &self,
        host: &H,
        window_point: Point,
        config: &DragConfig,
    ) -> Option<Point> {
        let Some(pointer) = position_in(host, self.overlay, window_point) else {
            log::debug!("overlay {} collapsed, move on {} skipped", self.overlay, self.handle);
            return None;
        };
        let input = ClampInput {
            pointer,
            grip: self.grip,
            target: target_extent(host, self.target, config),
            overlay: overlay_extent(host, self.overlay, config),
            relate: self.relate,
        };
        let clamped = clamp_translation(&input);
        self.translation.set_offset(clamped.to_vec2());
        log::trace!(
            "drag {} -> ({:.1}, {:.1})",
            self.target,
            clamped.x,
            clamped.y
        );
        Some(clamped)
    }

    /// Current translation of the target.
    pub fn offset(&self) -> Vec2 {
        self.translation.offset()
    }
}
