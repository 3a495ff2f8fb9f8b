use ovd_core::ElementId;
use thiserror::Error;

/// Why a pointer-down did not start a drag session.
///
/// None of these are failures from the user's point of view: the event is
/// left unhandled and routing continues as if no drag behavior existed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DragRejected {
    #[error("{handle} has no drag target")]
    NoTarget { handle: ElementId },
    #[error("{target} is not hosted in an adorner")]
    NoAdorner { target: ElementId },
    #[error("adorner {adorner} is not attached to an overlay layer")]
    NoOverlayLayer { adorner: ElementId },
    #[error("{element} has a collapsed transform; pointer positions cannot be mapped into it")]
    SingularTransform { element: ElementId },
}
