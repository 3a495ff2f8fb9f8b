//! Live geometry lookups with fallbacks for unmeasured elements.

use crate::config::DragConfig;
use crate::host::VisualHost;
use crate::id::ElementId;
use kurbo::Size;

/// Size of the drag target: rendered size, else measured size, else the
/// configured sentinel.
pub fn target_extent<H: VisualHost + ?Sized>(
    host: &H,
    target: ElementId,
    config: &DragConfig,
) -> Size {
    let rendered = host.render_size(target);
    if !config.is_degenerate(rendered) {
        return rendered;
    }
    let desired = host.desired_size(target);
    if !config.is_degenerate(desired) {
        return desired;
    }
    log::debug!("{target} is unmeasured, using fallback size");
    config.fallback_target_size
}

/// Size of the overlay layer: rendered size, else the owning window, else
/// the work area.
pub fn overlay_extent<H: VisualHost + ?Sized>(
    host: &H,
    overlay: ElementId,
    config: &DragConfig,
) -> Size {
    let rendered = host.render_size(overlay);
    if !config.is_degenerate(rendered) {
        return rendered;
    }
    if let Some(window) = host.window_size(overlay)
        && !config.is_degenerate(window)
    {
        return window;
    }
    host.work_area()
}
