pub mod clamp;
pub mod config;
pub mod host;
pub mod id;
pub mod measure;
pub mod model;
pub mod transform;

pub use clamp::{ClampInput, DragBounds, clamp_translation};
pub use config::DragConfig;
pub use host::{Cursor, ElementRole, VisualHost, find_ancestor, find_ancestor_with_role, position_in};
pub use id::ElementId;
pub use measure::{overlay_extent, target_extent};
pub use model::{Visual, VisualTree};
pub use transform::{RenderTransform, Translation, compose_translation, resolve_translation};

// Re-export geometry types so downstream crates share one kurbo version
pub use kurbo::{Affine, Point, Size, Vec2};
pub use petgraph::graph::NodeIndex;
