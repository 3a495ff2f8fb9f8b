//! Render transforms and translation resolution.
//!
//! A target's render transform is one of a closed set of shapes:
//! a bare translation, an ordered group, or an opaque matrix (rotation,
//! scale, skew supplied by the host). Drag writes go through a single
//! [`Translation`] that the resolver guarantees is composed *after*
//! anything the host already installed.

use crate::host::VisualHost;
use crate::id::ElementId;
use kurbo::{Affine, Vec2};
use std::cell::Cell;
use std::rc::Rc;

// ─── Translation ─────────────────────────────────────────────────────────

/// A shared translation component.
///
/// Clones share the same offset cell, so a live drag session and the
/// visual tree observe the same value. Identity is checked with
/// [`Translation::ptr_eq`]. Translations created by [`compose_translation`]
/// are marked as installed; only those are ever reused from inside a group.
#[derive(Debug, Clone, Default)]
pub struct Translation {
    offset: Rc<Cell<Vec2>>,
    installed: bool,
}

impl Translation {
    /// A host-authored translation.
    pub fn new(offset: Vec2) -> Self {
        Self {
            offset: Rc::new(Cell::new(offset)),
            installed: false,
        }
    }

    fn installed() -> Self {
        Self {
            offset: Rc::default(),
            installed: true,
        }
    }

    /// Current (x, y) offset.
    pub fn offset(&self) -> Vec2 {
        self.offset.get()
    }

    pub fn set_offset(&self, offset: Vec2) {
        self.offset.set(offset);
    }

    /// Move back to the origin.
    pub fn reset(&self) {
        self.offset.set(Vec2::ZERO);
    }

    /// True when both handles point at the same component.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.offset, &other.offset)
    }

    /// True when the resolver created this translation.
    pub fn is_installed(&self) -> bool {
        self.installed
    }
}

// ─── Render transform ────────────────────────────────────────────────────

/// The transform attached to an element's render pipeline.
#[derive(Debug, Clone)]
pub enum RenderTransform {
    /// A bare translation.
    Translate(Translation),
    /// Children applied in order: the first child is applied first.
    Group(Vec<RenderTransform>),
    /// Any other affine transform owned by the host.
    Matrix(Affine),
}

impl RenderTransform {
    pub fn rotation(radians: f64) -> Self {
        Self::Matrix(Affine::rotate(radians))
    }

    pub fn scale(factor: f64) -> Self {
        Self::Matrix(Affine::scale(factor))
    }

    /// The composed affine value of this transform.
    pub fn affine(&self) -> Affine {
        match self {
            Self::Translate(t) => Affine::translate(t.offset()),
            Self::Matrix(m) => *m,
            Self::Group(children) => children
                .iter()
                .fold(Affine::IDENTITY, |acc, child| child.affine() * acc),
        }
    }

    /// The translation appended by [`resolve_translation`] to a group.
    ///
    /// Only an installed translation in the trailing position counts; a
    /// host group that happens to end in a translation, a bare `Translate`
    /// and a `Matrix` all yield `None`.
    pub fn group_translation(&self) -> Option<&Translation> {
        match self {
            Self::Group(children) => match children.last() {
                Some(Self::Translate(t)) if t.is_installed() => Some(t),
                _ => None,
            },
            _ => None,
        }
    }

    /// The translation a drag session would write into, for any shape
    /// produced by [`resolve_translation`].
    pub fn drag_translation(&self) -> Option<&Translation> {
        match self {
            Self::Translate(t) => Some(t),
            _ => self.group_translation(),
        }
    }
}

/// Compose a translation after `existing`, returning the new transform and
/// its translation handle. Reuses a bare translation or one this function
/// installed earlier; anything else, host groups included, is wrapped.
pub fn compose_translation(existing: Option<RenderTransform>) -> (RenderTransform, Translation) {
    match existing {
        None => {
            let translation = Translation::installed();
            (RenderTransform::Translate(translation.clone()), translation)
        }
        Some(current) => {
            if let Some(t) = current.drag_translation() {
                let t = t.clone();
                return (current, t);
            }
            let translation = Translation::installed();
            let group = RenderTransform::Group(vec![
                current,
                RenderTransform::Translate(translation.clone()),
            ]);
            (group, translation)
        }
    }
}

/// Find or create the translation component of `target`'s render transform.
///
/// Returns `None` only when `target` is unknown to the host.
pub fn resolve_translation<H: VisualHost + ?Sized>(
    host: &mut H,
    target: ElementId,
) -> Option<Translation> {
    if !host.contains(target) {
        return None;
    }
    if let Some(existing) = host.transform(target).and_then(|t| t.drag_translation()) {
        return Some(existing.clone());
    }

    let (composed, translation) = compose_translation(host.transform(target).cloned());
    log::trace!(
        "installed translation on {target} (grouped: {})",
        matches!(composed, RenderTransform::Group(_))
    );
    host.set_transform(target, composed);
    Some(translation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn no_transform_becomes_bare_translation() {
        let (composed, translation) = compose_translation(None);
        match &composed {
            RenderTransform::Translate(t) => assert!(t.ptr_eq(&translation)),
            other => panic!("expected bare translation, got {other:?}"),
        }
    }

    #[test]
    fn bare_translation_is_reused() {
        let existing = Translation::new(Vec2::new(4.0, 5.0));
        let (_, resolved) = compose_translation(Some(RenderTransform::Translate(existing.clone())));
        assert!(resolved.ptr_eq(&existing));
        assert_eq!(resolved.offset(), Vec2::new(4.0, 5.0));
    }

    #[test]
    fn matrix_is_wrapped_before_translation() {
        let (composed, translation) = compose_translation(Some(RenderTransform::scale(2.0)));
        let RenderTransform::Group(children) = &composed else {
            panic!("expected group");
        };
        assert_eq!(children.len(), 2);
        assert!(matches!(children[0], RenderTransform::Matrix(_)));
        assert!(composed.group_translation().unwrap().ptr_eq(&translation));
    }

    #[test]
    fn group_affine_applies_children_in_order() {
        // Rotate a quarter turn, then shift right by 10.
        let (composed, translation) =
            compose_translation(Some(RenderTransform::rotation(FRAC_PI_2)));
        translation.set_offset(Vec2::new(10.0, 0.0));

        let p = composed.affine() * Point::new(1.0, 0.0);
        assert!((p.x - 10.0).abs() < 1e-9, "x = {}", p.x);
        assert!((p.y - 1.0).abs() < 1e-9, "y = {}", p.y);
    }

    #[test]
    fn group_without_trailing_translation_has_none() {
        let group = RenderTransform::Group(vec![
            RenderTransform::Translate(Translation::default()),
            RenderTransform::scale(3.0),
        ]);
        assert!(group.group_translation().is_none());
        assert!(RenderTransform::Translate(Translation::default())
            .group_translation()
            .is_none());
    }

    #[test]
    fn host_group_ending_in_translation_is_wrapped() {
        let host_shift = Translation::new(Vec2::new(10.0, 10.0));
        let host_group = RenderTransform::Group(vec![
            RenderTransform::scale(2.0),
            RenderTransform::Translate(host_shift.clone()),
        ]);
        assert!(host_group.group_translation().is_none());

        let (composed, translation) = compose_translation(Some(host_group));
        assert!(!translation.ptr_eq(&host_shift));
        assert!(translation.is_installed());
        assert!(composed.group_translation().unwrap().ptr_eq(&translation));

        // Composing again reuses the installed translation, not the host's.
        let (_, again) = compose_translation(Some(composed));
        assert!(again.ptr_eq(&translation));
    }

    #[test]
    fn reset_returns_to_origin() {
        let t = Translation::new(Vec2::new(37.0, 52.0));
        let shared = t.clone();
        t.reset();
        assert_eq!(shared.offset(), Vec2::ZERO);
    }
}
