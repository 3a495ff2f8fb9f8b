//! Integration tests: overlay container resizes reset stale drag offsets.

use ovd_behavior::{DragController, HandlerKind, InputEvent};
use ovd_core::id::ElementId;
use ovd_core::{
    DragConfig, ElementRole, RenderTransform, Size, Vec2, Visual, VisualHost, VisualTree,
    resolve_translation,
};
use std::f64::consts::FRAC_PI_8;

fn id(name: &str) -> ElementId {
    ElementId::intern(name)
}

fn hosted_tree(prefix: &str, content_transform: Option<RenderTransform>) -> VisualTree {
    let n = |s: &str| id(&format!("{prefix}_{s}"));
    let mut tree = VisualTree::new(n("window"), Size::new(1024.0, 768.0));
    tree.add_child_of(
        n("window"),
        Visual::new(n("layer"), ElementRole::OverlayLayer).with_size(800.0, 600.0),
    );
    tree.add_child_of(
        n("layer"),
        Visual::new(n("adorner"), ElementRole::Adorner).with_size(800.0, 600.0),
    );
    tree.add_child_of(n("adorner"), Visual::new(n("dialog"), ElementRole::Dialog));
    let mut content = Visual::new(n("content"), ElementRole::Element)
        .with_offset(80.0, 90.0)
        .with_size(200.0, 100.0);
    content.transform = content_transform;
    tree.add_child_of(n("dialog"), content);
    tree.add_child_of(
        n("content"),
        Visual::new(n("title"), ElementRole::Element).with_size(200.0, 30.0),
    );
    tree
}

#[test]
fn size_change_resets_grouped_translation() {
    let mut tree = hosted_tree("rs", Some(RenderTransform::rotation(FRAC_PI_8)));
    let (adorner, content) = (id("rs_adorner"), id("rs_content"));
    let translation = resolve_translation(&mut tree, content).unwrap();
    translation.set_offset(Vec2::new(37.0, 52.0));

    let mut ctl = DragController::default();
    ctl.subscribe_resize(adorner);

    assert!(tree.set_size(adorner, Size::new(640.0, 480.0)));
    assert!(ctl.notify_size_changed(&tree, adorner));
    assert_eq!(translation.offset(), Vec2::ZERO);
}

#[test]
fn resubscribing_keeps_a_single_listener() {
    let mut ctl = DragController::default();
    let adorner = id("sub_adorner");
    ctl.subscribe_resize(adorner);
    ctl.subscribe_resize(adorner);
    assert_eq!(ctl.router().handler_count(adorner, HandlerKind::SizeChanged), 1);

    ctl.unsubscribe_resize(adorner);
    assert_eq!(ctl.router().handler_count(adorner, HandlerKind::SizeChanged), 0);
}

#[test]
fn unsubscribed_adorner_is_not_reset() {
    let mut tree = hosted_tree("nosub", Some(RenderTransform::scale(1.0)));
    let translation = resolve_translation(&mut tree, id("nosub_content")).unwrap();
    translation.set_offset(Vec2::new(37.0, 52.0));

    let ctl = DragController::default();
    assert!(!ctl.notify_size_changed(&tree, id("nosub_adorner")));
    assert_eq!(translation.offset(), Vec2::new(37.0, 52.0));
}

#[test]
fn bare_translation_survives_resize_unless_configured() {
    let mut tree = hosted_tree("bare", None);
    let (adorner, title, content) = (id("bare_adorner"), id("bare_title"), id("bare_content"));

    let mut ctl = DragController::default();
    ctl.subscribe_resize(adorner);
    ctl.set_draggable(&mut tree, title, true);
    ctl.dispatch(&mut tree, InputEvent::down(title, 100.0, 100.0));
    ctl.dispatch(&mut tree, InputEvent::drag(title, 137.0, 152.0));
    ctl.dispatch(&mut tree, InputEvent::up(title, 137.0, 152.0));
    assert!(matches!(tree.transform(content), Some(RenderTransform::Translate(_))));

    assert!(!ctl.notify_size_changed(&tree, adorner));
    let translation = tree.transform(content).and_then(RenderTransform::drag_translation).unwrap();
    assert_eq!(translation.offset(), Vec2::new(37.0, 52.0));

    ctl.config = DragConfig {
        reset_bare_translation: true,
        ..ctl.config
    };
    assert!(ctl.notify_size_changed(&tree, adorner));
    assert_eq!(translation.offset(), Vec2::ZERO);
}

#[test]
fn reset_during_drag_is_overwritten_by_next_move() {
    let mut tree = hosted_tree("mid", Some(RenderTransform::scale(1.0)));
    let (adorner, title, content) = (id("mid_adorner"), id("mid_title"), id("mid_content"));

    let mut ctl = DragController::default();
    ctl.subscribe_resize(adorner);
    ctl.set_draggable(&mut tree, title, true);
    ctl.dispatch(&mut tree, InputEvent::down(title, 100.0, 100.0));
    ctl.dispatch(&mut tree, InputEvent::drag(title, 140.0, 130.0));

    let translation = ctl.session(title).unwrap().translation.clone();
    assert_eq!(translation.offset(), Vec2::new(40.0, 30.0));

    assert!(ctl.notify_size_changed(&tree, adorner));
    assert_eq!(translation.offset(), Vec2::ZERO);

    // The grip is unchanged, so the next move jumps straight back.
    ctl.dispatch(&mut tree, InputEvent::drag(title, 141.0, 130.0));
    assert_eq!(translation.offset(), Vec2::new(41.0, 30.0));
}
