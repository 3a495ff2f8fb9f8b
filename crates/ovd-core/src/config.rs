//! Tunables for drag sessions and resize resets.

use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Configuration shared by the drag controller and the harness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Sizes at or below this extent on either axis count as unmeasured.
    pub degenerate_extent: f64,

    /// Used for the target when neither its render nor measured size is usable.
    pub fallback_target_size: Size,

    /// Also reset a target whose only transform is a bare translation when
    /// the overlay container resizes. Off by default: only grouped
    /// translations are reset.
    pub reset_bare_translation: bool,

    /// Ignore pointer moves unless the primary button is held.
    pub require_primary_button: bool,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            degenerate_extent: 1.0,
            fallback_target_size: Size::new(100.0, 100.0),
            reset_bare_translation: false,
            require_primary_button: true,
        }
    }
}

impl DragConfig {
    /// True when `size` has not been meaningfully measured.
    pub fn is_degenerate(&self, size: Size) -> bool {
        size.width <= self.degenerate_extent || size.height <= self.degenerate_extent
    }
}
