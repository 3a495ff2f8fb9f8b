//! Drag controller: wires capabilities, routing, sessions and resize resets.
//!
//! The controller is the single entry point the host calls from its event
//! loop. Everything is synchronous; the host passes its visual tree into
//! each call rather than the controller holding a reference to it.

use crate::capability::{Capabilities, Toggle};
use crate::error::DragRejected;
use crate::input::InputEvent;
use crate::resize::reset_hosted_translation;
use crate::router::{EventRouter, HandlerKind, SESSION_HANDLERS};
use crate::session::{DragPhase, DragSession};
use ovd_core::{Cursor, DragConfig, ElementId, Point, VisualHost};
use std::collections::HashMap;

/// What happened to one dispatched event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dispatch {
    /// Number of drag handlers invoked.
    pub invoked: usize,
    /// Whether a handler marked the event handled, stopping further routing.
    pub handled: bool,
}

#[derive(Debug, Default)]
pub struct DragController {
    pub config: DragConfig,
    capabilities: Capabilities,
    router: EventRouter,
    sessions: HashMap<ElementId, DragSession>,
}

impl DragController {
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    // ─── Capability ──────────────────────────────────────────────────────

    /// Enable or disable dragging by `element`.
    pub fn set_draggable<H: VisualHost + ?Sized>(
        &mut self,
        host: &mut H,
        element: ElementId,
        enabled: bool,
    ) {
        match self.capabilities.set_draggable(element, enabled) {
            Toggle::Enabled => self.router.add_handler(element, HandlerKind::PointerDown),
            Toggle::Disabled => {
                self.router.remove_handler(element, HandlerKind::PointerDown);
            }
            Toggle::Unchanged => {}
        }
        if enabled {
            host.set_cursor(element, Cursor::Move);
        }
    }

    /// Override which element a drag on `element` moves.
    pub fn set_drag_target(&mut self, element: ElementId, target: Option<ElementId>) {
        self.capabilities.set_drag_target(element, target);
    }

    pub fn is_draggable(&self, element: ElementId) -> bool {
        self.capabilities.is_draggable(element)
    }

    // ─── Resize reset ────────────────────────────────────────────────────

    /// Listen for size changes on an adorner. Re-subscribing replaces the
    /// previous subscription.
    pub fn subscribe_resize(&mut self, adorner: ElementId) {
        self.router.rebind(adorner, &[HandlerKind::SizeChanged]);
    }

    pub fn unsubscribe_resize(&mut self, adorner: ElementId) {
        self.router.remove_all(adorner, &[HandlerKind::SizeChanged]);
    }

    /// Size-changed notification from the host. Returns true if a hosted
    /// translation was reset.
    pub fn notify_size_changed<H: VisualHost + ?Sized>(&self, host: &H, element: ElementId) -> bool {
        let mut reset = false;
        for _ in 0..self.router.handler_count(element, HandlerKind::SizeChanged) {
            reset |= reset_hosted_translation(host, element, &self.config);
        }
        reset
    }

    // ─── Pointer routing ─────────────────────────────────────────────────

    /// Route one pointer event.
    ///
    /// While capture is held, every positional event goes to the capturing
    /// element. Otherwise events bubble from the hit element upward until a
    /// handler marks them handled.
    pub fn dispatch<H: VisualHost + ?Sized>(&mut self, host: &mut H, event: InputEvent) -> Dispatch {
        let kind = match event {
            InputEvent::PointerDown { .. } => HandlerKind::PointerDown,
            InputEvent::PointerMove { .. } => HandlerKind::PointerMove,
            InputEvent::PointerUp { .. } => HandlerKind::PointerUp,
            InputEvent::LostCapture { element } => {
                return self.deliver_lost_capture(element);
            }
        };

        if let Some(captured) = self.router.captured() {
            return self.invoke(host, captured, kind, &event);
        }

        let mut dispatch = Dispatch::default();
        let mut current = Some(event.element());
        while let Some(element) = current {
            let step = self.invoke(host, element, kind, &event);
            dispatch.invoked += step.invoked;
            if step.handled {
                dispatch.handled = true;
                break;
            }
            current = host.parent(element);
        }
        dispatch
    }

    /// Force-release capture (escape key, focus loss). Ends the session of
    /// the capturing handle. Returns true if anything was captured.
    pub fn cancel(&mut self) -> bool {
        match self.router.release_any() {
            Some(holder) => {
                self.deliver_lost_capture(holder);
                true
            }
            None => false,
        }
    }

    // ─── Inspection ──────────────────────────────────────────────────────

    pub fn phase(&self, handle: ElementId) -> DragPhase {
        if self.sessions.contains_key(&handle) {
            DragPhase::Armed
        } else {
            DragPhase::Idle
        }
    }

    pub fn is_dragging(&self, handle: ElementId) -> bool {
        self.phase(handle) == DragPhase::Armed
    }

    pub fn session(&self, handle: ElementId) -> Option<&DragSession> {
        self.sessions.get(&handle)
    }

    pub fn router(&self) -> &EventRouter {
        &self.router
    }

    // ─── Handlers ────────────────────────────────────────────────────────

    fn invoke<H: VisualHost + ?Sized>(
        &mut self,
        host: &mut H,
        element: ElementId,
        kind: HandlerKind,
        event: &InputEvent,
    ) -> Dispatch {
        let mut dispatch = Dispatch::default();
        let Some(position) = event.position() else {
            return dispatch;
        };
        for _ in 0..self.router.handler_count(element, kind) {
            dispatch.invoked += 1;
            let handled = match kind {
                HandlerKind::PointerDown => self.on_pointer_down(host, element, position),
                HandlerKind::PointerMove => self.on_pointer_move(host, element, position, event),
                HandlerKind::PointerUp => self.end_session(element),
                HandlerKind::LostCapture | HandlerKind::SizeChanged => false,
            };
            dispatch.handled |= handled;
        }
        dispatch
    }

    fn on_pointer_down<H: VisualHost + ?Sized>(
        &mut self,
        host: &mut H,
        handle: ElementId,
        position: Point,
    ) -> bool {
        match self.arm(host, handle, position) {
            Ok(()) => true,
            Err(reason) => {
                log::debug!("pointer-down on {handle} ignored: {reason}");
                false
            }
        }
    }

    /// Idle → Armed. Handlers are cleared and re-registered on every entry
    /// so repeated drags never accumulate duplicates.
    fn arm<H: VisualHost + ?Sized>(
        &mut self,
        host: &mut H,
        handle: ElementId,
        position: Point,
    ) -> Result<(), DragRejected> {
        let target = self
            .capabilities
            .resolve_target(host, handle)
            .ok_or(DragRejected::NoTarget { handle })?;
        let session = DragSession::begin(host, handle, target, position)?;

        if let Some(previous) = self.router.capture(handle) {
            self.deliver_lost_capture(previous);
        }
        self.router.rebind(handle, &SESSION_HANDLERS);
        self.sessions.insert(handle, session);
        Ok(())
    }

    fn on_pointer_move<H: VisualHost + ?Sized>(
        &mut self,
        host: &mut H,
        handle: ElementId,
        position: Point,
        event: &InputEvent,
    ) -> bool {
        if self.config.require_primary_button
            && let InputEvent::PointerMove { buttons, .. } = event
            && !buttons.primary
        {
            return false;
        }
        if self.router.captured() != Some(handle) {
            return false;
        }
        let Some(session) = self.sessions.get(&handle) else {
            return false;
        };
        session.drag_to(host, position, &self.config).is_some()
    }

    fn deliver_lost_capture(&mut self, element: ElementId) -> Dispatch {
        let mut dispatch = Dispatch::default();
        for _ in 0..self.router.handler_count(element, HandlerKind::LostCapture) {
            dispatch.invoked += 1;
            dispatch.handled |= self.end_session(element);
        }
        dispatch
    }

    /// Armed → Idle: release capture, drop session handlers and state.
    fn end_session(&mut self, handle: ElementId) -> bool {
        self.router.release(handle);
        self.router.remove_all(handle, &SESSION_HANDLERS);
        match self.sessions.remove(&handle) {
            Some(session) => {
                let offset = session.offset();
                log::debug!(
                    "drag on {handle} ended at ({:.1}, {:.1})",
                    offset.x,
                    offset.y
                );
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerButtons;
    use ovd_core::{ElementRole, Size, Vec2, Visual, VisualTree};

    fn id(name: &str) -> ElementId {
        ElementId::intern(name)
    }

    /// window → layer (800×600) → adorner → dialog → content (200×100 at 80,90) → bar → label
    fn tree() -> VisualTree {
        let mut tree = VisualTree::new(id("c_win"), Size::new(1024.0, 768.0));
        tree.add_child_of(
            id("c_win"),
            Visual::new(id("c_layer"), ElementRole::OverlayLayer).with_size(800.0, 600.0),
        );
        tree.add_child_of(id("c_layer"), Visual::new(id("c_adorner"), ElementRole::Adorner));
        tree.add_child_of(id("c_adorner"), Visual::new(id("c_dialog"), ElementRole::Dialog));
        tree.add_child_of(
            id("c_dialog"),
            Visual::new(id("c_content"), ElementRole::Element)
                .with_offset(80.0, 90.0)
                .with_size(200.0, 100.0),
        );
        tree.add_child_of(
            id("c_content"),
            Visual::new(id("c_bar"), ElementRole::Element).with_size(200.0, 30.0),
        );
        tree.add_child_of(
            id("c_bar"),
            Visual::new(id("c_label"), ElementRole::Element).with_size(60.0, 20.0),
        );
        tree
    }

    #[test]
    fn enabling_twice_registers_one_handler() {
        let mut tree = tree();
        let mut ctl = DragController::default();
        ctl.set_draggable(&mut tree, id("c_bar"), true);
        ctl.set_draggable(&mut tree, id("c_bar"), true);

        assert_eq!(ctl.router().handler_count(id("c_bar"), HandlerKind::PointerDown), 1);
        assert_eq!(tree.get_by_id(id("c_bar")).unwrap().cursor, Cursor::Move);

        let d = ctl.dispatch(&mut tree, InputEvent::down(id("c_bar"), 100.0, 100.0));
        assert_eq!(d, Dispatch { invoked: 1, handled: true });
    }

    #[test]
    fn disabling_detaches_handler() {
        let mut tree = tree();
        let mut ctl = DragController::default();
        ctl.set_draggable(&mut tree, id("c_bar"), true);
        ctl.set_draggable(&mut tree, id("c_bar"), false);

        let d = ctl.dispatch(&mut tree, InputEvent::down(id("c_bar"), 100.0, 100.0));
        assert_eq!(d, Dispatch::default());
        assert!(!ctl.is_dragging(id("c_bar")));
    }

    #[test]
    fn pointer_down_bubbles_from_child_to_handle() {
        let mut tree = tree();
        let mut ctl = DragController::default();
        ctl.set_draggable(&mut tree, id("c_bar"), true);

        let d = ctl.dispatch(&mut tree, InputEvent::down(id("c_label"), 100.0, 100.0));
        assert!(d.handled);
        assert!(ctl.is_dragging(id("c_bar")));
        assert_eq!(ctl.router().captured(), Some(id("c_bar")));
    }

    #[test]
    fn rejected_pointer_down_is_not_handled() {
        let mut tree = tree();
        let mut ctl = DragController::default();
        // The layer's parent is the window, which is not hosted in an adorner.
        ctl.set_draggable(&mut tree, id("c_layer"), true);

        let d = ctl.dispatch(&mut tree, InputEvent::down(id("c_layer"), 10.0, 10.0));
        assert_eq!(d, Dispatch { invoked: 1, handled: false });
        assert_eq!(ctl.phase(id("c_layer")), DragPhase::Idle);
        assert_eq!(ctl.router().captured(), None);
    }

    #[test]
    fn moves_without_primary_button_are_ignored() {
        let mut tree = tree();
        let mut ctl = DragController::default();
        ctl.set_draggable(&mut tree, id("c_bar"), true);
        ctl.dispatch(&mut tree, InputEvent::down(id("c_bar"), 100.0, 100.0));

        let d = ctl.dispatch(&mut tree, InputEvent::hover(id("c_bar"), 150.0, 150.0));
        assert!(!d.handled);
        assert_eq!(ctl.session(id("c_bar")).unwrap().offset(), Vec2::ZERO);

        ctl.dispatch(&mut tree, InputEvent::drag(id("c_bar"), 150.0, 150.0));
        assert_eq!(ctl.session(id("c_bar")).unwrap().offset(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn pointer_up_returns_to_idle_and_drops_handlers() {
        let mut tree = tree();
        let mut ctl = DragController::default();
        ctl.set_draggable(&mut tree, id("c_bar"), true);

        for _ in 0..3 {
            ctl.dispatch(&mut tree, InputEvent::down(id("c_bar"), 100.0, 100.0));
            for kind in SESSION_HANDLERS {
                assert_eq!(ctl.router().handler_count(id("c_bar"), kind), 1, "{kind:?}");
            }
            let d = ctl.dispatch(&mut tree, InputEvent::up(id("c_bar"), 100.0, 100.0));
            assert!(d.handled);
            assert_eq!(ctl.phase(id("c_bar")), DragPhase::Idle);
            assert_eq!(ctl.router().registrations(id("c_bar")), 1);
        }
        assert_eq!(ctl.router().captured(), None);
    }

    #[test]
    fn cancel_tears_down_session() {
        let mut tree = tree();
        let mut ctl = DragController::default();
        ctl.set_draggable(&mut tree, id("c_bar"), true);
        ctl.dispatch(&mut tree, InputEvent::down(id("c_bar"), 100.0, 100.0));

        assert!(ctl.cancel());
        assert!(!ctl.is_dragging(id("c_bar")));
        assert!(!ctl.cancel());

        // Moves after cancellation no longer reach the target.
        let d = ctl.dispatch(
            &mut tree,
            InputEvent::PointerMove {
                element: id("c_bar"),
                x: 300.0,
                y: 300.0,
                buttons: PointerButtons::PRIMARY,
            },
        );
        assert_eq!(d.invoked, 0);
    }
}
