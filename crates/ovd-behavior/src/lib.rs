pub mod capability;
pub mod controller;
pub mod error;
pub mod input;
pub mod resize;
pub mod router;
pub mod session;

pub use capability::{Capabilities, DraggableElement, Toggle};
pub use controller::{Dispatch, DragController};
pub use error::DragRejected;
pub use input::{InputEvent, PointerButtons};
pub use router::{EventRouter, HandlerKind};
pub use session::{DragPhase, DragSession};
