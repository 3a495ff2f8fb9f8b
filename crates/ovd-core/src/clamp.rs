//! Boundary clamp: keep a dragged target's rectangle inside the overlay.
//!
//! All positions are in overlay space except `relate`, which is the pointer
//! position relative to the target's own origin at drag start. The grip is
//! `pointer_at_start - translation_at_start` and stays fixed for the whole
//! gesture, so the unclamped translation is simply `pointer - grip`.
//!
//! ```text
//! min.x = relate.x - grip.x        max.x = W - (w - relate.x) - grip.x
//! min.y = relate.y - grip.y        max.y = H - (h - relate.y) - grip.y
//! ```
//!
//! When the target is larger than the overlay on an axis (`min > max`) the
//! result is pinned to `min`, which keeps the target's near edge visible.

use kurbo::{Point, Size, Vec2};

/// Everything the clamp needs for one pointer move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampInput {
    /// Pointer position in overlay space.
    pub pointer: Point,
    pub grip: Vec2,
    pub target: Size,
    pub overlay: Size,
    pub relate: Point,
}

/// Allowed translation range for the current geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragBounds {
    pub min: Point,
    pub max: Point,
}

impl DragBounds {
    pub fn compute(grip: Vec2, target: Size, overlay: Size, relate: Point) -> Self {
        Self {
            min: Point::new(relate.x - grip.x, relate.y - grip.y),
            max: Point::new(
                overlay.width - (target.width - relate.x) - grip.x,
                overlay.height - (target.height - relate.y) - grip.y,
            ),
        }
    }

    /// True when the target does not fit on at least one axis.
    pub fn is_inverted(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn clamp(&self, desired: Point) -> Point {
        Point::new(
            clamp_axis(desired.x, self.min.x, self.max.x),
            clamp_axis(desired.y, self.min.y, self.max.y),
        )
    }
}

/// `f64::clamp` panics when `lo > hi`; this pins to `lo` instead.
fn clamp_axis(value: f64, lo: f64, hi: f64) -> f64 {
    lo.max(hi.min(value))
}

/// Clamp `pointer - grip` into the bounds derived from `input`.
pub fn clamp_translation(input: &ClampInput) -> Point {
    let desired = input.pointer - input.grip;
    DragBounds::compute(input.grip, input.target, input.overlay, input.relate).clamp(desired)
}
