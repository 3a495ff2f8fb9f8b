//! Resize reset: when an adorner hosting draggable content is resized, the
//! content's stale drag offset is cleared so it reappears at its arranged
//! position.
//!
//! The hosted target is found structurally: adorner → dialog (first child)
//! → content (the dialog's first child). Only translations composed into a
//! group by the resolver are recognised unless `reset_bare_translation` is
//! set. A reset during a live drag is not suppressed; the next move writes
//! relative to the old grip and the target visibly jumps.

use ovd_core::{DragConfig, ElementId, VisualHost};

/// The content element an adorner hosts through its dialog.
pub fn hosted_drag_target<H: VisualHost + ?Sized>(host: &H, adorner: ElementId) -> Option<ElementId> {
    let dialog = host.first_child(adorner)?;
    host.first_child(dialog)
}

/// Zero the hosted content's drag translation. Returns true if a
/// translation was found and reset.
pub fn reset_hosted_translation<H: VisualHost + ?Sized>(
    host: &H,
    adorner: ElementId,
    config: &DragConfig,
) -> bool {
    let Some(target) = hosted_drag_target(host, adorner) else {
        return false;
    };
    let Some(transform) = host.transform(target) else {
        return false;
    };
    let translation = if config.reset_bare_translation {
        transform.drag_translation()
    } else {
        transform.group_translation()
    };
    match translation {
        Some(t) => {
            log::debug!("{adorner} resized, resetting {target} to origin");
            t.reset();
            true
        }
        None => false,
    }
}
