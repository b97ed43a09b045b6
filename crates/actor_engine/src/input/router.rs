//! Maps raw input to named axes and actions and tracks who listens to them

use super::{ActionMapping, AxisBinding, AxisMapping, InputConfig, InputSource, InputState, KeyCode, MouseButton};
use crate::foundation::collections::{ActorId, BindingHandle, SlotMap};
use crate::scene::{CallbackResult, World};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Subscriber to a named axis; receives the owning actor and the resolved value
pub type AxisCallback = Rc<RefCell<dyn FnMut(&mut World, ActorId, f32) -> CallbackResult>>;

/// Subscriber to a named action; receives the owning actor
pub type ActionCallback = Rc<RefCell<dyn FnMut(&mut World, ActorId) -> CallbackResult>>;

enum Subscriber {
    Axis(AxisCallback),
    Action {
        edge_triggered: bool,
        callback: ActionCallback,
    },
}

struct Subscription {
    handle: BindingHandle,
    owner: ActorId,
    name: String,
    subscriber: Subscriber,
}

/// One subscriber call resolved for the current frame
pub enum InputDispatch {
    /// Axis subscriber with its resolved value
    Axis {
        /// Binding that produced the call
        handle: BindingHandle,
        /// Actor the subscriber belongs to
        owner: ActorId,
        /// Subscriber
        callback: AxisCallback,
        /// Resolved axis value
        value: f32,
    },
    /// Action subscriber whose action fired
    Action {
        /// Binding that produced the call
        handle: BindingHandle,
        /// Actor the subscriber belongs to
        owner: ActorId,
        /// Subscriber
        callback: ActionCallback,
    },
}

impl InputDispatch {
    /// Binding that produced the call
    pub const fn handle(&self) -> BindingHandle {
        match self {
            Self::Axis { handle, .. } | Self::Action { handle, .. } => *handle,
        }
    }

    /// Actor the subscriber belongs to
    pub const fn owner(&self) -> ActorId {
        match self {
            Self::Axis { owner, .. } | Self::Action { owner, .. } => *owner,
        }
    }
}

/// Named axis / action registry plus the raw device snapshot they resolve against
///
/// Axis and action names live in separate namespaces. Registering a name that
/// already exists replaces its bindings.
#[derive(Default)]
pub struct InputRouter {
    state: InputState,
    axes: HashMap<String, AxisMapping>,
    actions: HashMap<String, ActionMapping>,
    handles: SlotMap<BindingHandle, ()>,
    subscriptions: Vec<Subscription>,
}

impl InputRouter {
    /// Create an empty router
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a router preloaded with configured mappings
    pub fn from_config(config: &InputConfig) -> Self {
        let mut router = Self::new();
        router.apply_config(config);
        router
    }

    /// Install every mapping from `config`, replacing same-named ones
    pub fn apply_config(&mut self, config: &InputConfig) {
        for axis in &config.axes {
            self.add_axis(axis.name.clone(), axis.bindings.clone());
        }
        for action in &config.actions {
            self.add_action(action.name.clone(), action.bindings.clone());
        }
    }

    /// Register (or replace) an axis mapping
    pub fn add_axis(&mut self, name: impl Into<String>, bindings: Vec<AxisBinding>) {
        let mapping = AxisMapping::new(name, bindings);
        if self.axes.insert(mapping.name.clone(), mapping).is_some() {
            log::debug!("Replaced existing axis mapping");
        }
    }

    /// Register (or replace) an action mapping
    pub fn add_action(&mut self, name: impl Into<String>, bindings: Vec<InputSource>) {
        let mapping = ActionMapping::new(name, bindings);
        if self.actions.insert(mapping.name.clone(), mapping).is_some() {
            log::debug!("Replaced existing action mapping");
        }
    }

    /// Whether an axis with this name is registered
    pub fn has_axis(&self, name: &str) -> bool {
        self.axes.contains_key(name)
    }

    /// Whether an action with this name is registered
    pub fn has_action(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Current value of an axis; unknown names resolve to 0
    pub fn axis_value(&self, name: &str) -> f32 {
        self.axes.get(name).map_or(0.0, |axis| axis.resolve(&self.state))
    }

    /// Whether an action is currently held; unknown names resolve to `false`
    pub fn action_held(&self, name: &str) -> bool {
        self.actions.get(name).is_some_and(|action| action.is_held(&self.state))
    }

    /// Whether an action went down this frame; unknown names resolve to `false`
    pub fn action_went_down(&self, name: &str) -> bool {
        self.actions.get(name).is_some_and(|action| action.went_down(&self.state))
    }

    /// Raw device snapshot
    pub const fn state(&self) -> &InputState {
        &self.state
    }

    /// Mutable raw device snapshot, for device layers that write it directly
    pub fn state_mut(&mut self) -> &mut InputState {
        &mut self.state
    }

    /// Device layer: key went down
    pub fn press(&mut self, key: KeyCode) {
        self.state.keys.press(key);
    }

    /// Device layer: key went up
    pub fn release(&mut self, key: KeyCode) {
        self.state.keys.release(key);
    }

    /// Device layer: mouse button went down
    pub fn press_button(&mut self, button: MouseButton) {
        self.state.mouse_buttons.press(button);
    }

    /// Device layer: mouse button went up
    pub fn release_button(&mut self, button: MouseButton) {
        self.state.mouse_buttons.release(button);
    }

    /// Device layer: mouse moved
    pub fn add_mouse_motion(&mut self, dx: f32, dy: f32) {
        self.state.add_mouse_motion(dx, dy);
    }

    /// Subscribe `owner` to an axis
    pub fn bind_axis(&mut self, owner: ActorId, name: impl Into<String>, callback: AxisCallback) -> BindingHandle {
        let name = name.into();
        if !self.has_axis(&name) {
            log::warn!("Binding to axis '{name}' which has no mapping yet; it resolves to 0 until one is added");
        }
        self.subscribe(owner, name, Subscriber::Axis(callback))
    }

    /// Subscribe `owner` to an action, edge triggered (once per key-down) or level triggered (every frame while held)
    pub fn bind_action(
        &mut self,
        owner: ActorId,
        name: impl Into<String>,
        edge_triggered: bool,
        callback: ActionCallback,
    ) -> BindingHandle {
        let name = name.into();
        if !self.has_action(&name) {
            log::warn!("Binding to action '{name}' which has no mapping yet; it never fires until one is added");
        }
        self.subscribe(
            owner,
            name,
            Subscriber::Action {
                edge_triggered,
                callback,
            },
        )
    }

    fn subscribe(&mut self, owner: ActorId, name: String, subscriber: Subscriber) -> BindingHandle {
        let handle = self.handles.insert(());
        self.subscriptions.push(Subscription {
            handle,
            owner,
            name,
            subscriber,
        });
        handle
    }

    /// Remove a subscription; unknown or already removed handles are ignored
    pub fn unbind(&mut self, handle: BindingHandle) -> bool {
        if self.handles.remove(handle).is_none() {
            return false;
        }
        self.subscriptions.retain(|s| s.handle != handle);
        true
    }

    /// Remove every subscription belonging to `owner`
    pub fn unbind_owner(&mut self, owner: ActorId) -> usize {
        let handles = &mut self.handles;
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| {
            if s.owner == owner {
                handles.remove(s.handle);
                false
            } else {
                true
            }
        });
        before - self.subscriptions.len()
    }

    /// Whether a handle still refers to a live subscription
    pub fn is_bound(&self, handle: BindingHandle) -> bool {
        self.handles.contains_key(handle)
    }

    /// Number of live subscriptions
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Resolve the current snapshot into the list of subscriber calls for this frame,
    /// in subscription order. The list is detached from the router so subscribers may
    /// bind and unbind freely while it is being dispatched.
    pub fn collect_dispatch(&self) -> Vec<InputDispatch> {
        let mut calls = Vec::with_capacity(self.subscriptions.len());
        for subscription in &self.subscriptions {
            match &subscription.subscriber {
                Subscriber::Axis(callback) => calls.push(InputDispatch::Axis {
                    handle: subscription.handle,
                    owner: subscription.owner,
                    callback: Rc::clone(callback),
                    value: self.axis_value(&subscription.name),
                }),
                Subscriber::Action {
                    edge_triggered,
                    callback,
                } => {
                    let fired = self
                        .actions
                        .get(&subscription.name)
                        .is_some_and(|action| action.fired(&self.state, *edge_triggered));
                    if fired {
                        calls.push(InputDispatch::Action {
                            handle: subscription.handle,
                            owner: subscription.owner,
                            callback: Rc::clone(callback),
                        });
                    }
                }
            }
        }
        calls
    }

    /// Finish the frame: forget key transitions and mouse motion
    pub fn end_frame(&mut self) {
        self.state.end_frame();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn owner() -> ActorId {
        ActorId::from(KeyData::from_ffi(1))
    }

    fn noop_axis() -> AxisCallback {
        Rc::new(RefCell::new(|_: &mut World, _: ActorId, _: f32| Ok(())))
    }

    fn noop_action() -> ActionCallback {
        Rc::new(RefCell::new(|_: &mut World, _: ActorId| Ok(())))
    }

    #[test]
    fn test_re_registering_replaces_bindings() {
        let mut router = InputRouter::new();
        router.add_axis("Turn", vec![AxisBinding::new(KeyCode::A, -1.0)]);
        router.add_axis("Turn", vec![AxisBinding::new(KeyCode::D, 1.0)]);
        router.press(KeyCode::A);
        assert_eq!(router.axis_value("Turn"), 0.0);
        router.press(KeyCode::D);
        assert_eq!(router.axis_value("Turn"), 1.0);
    }

    #[test]
    fn test_axis_and_action_namespaces_are_separate() {
        let mut router = InputRouter::new();
        router.add_axis("Fire", vec![AxisBinding::new(KeyCode::F, 1.0)]);
        router.add_action("Fire", vec![KeyCode::Space.into()]);
        router.press(KeyCode::F);
        assert_eq!(router.axis_value("Fire"), 1.0);
        assert!(!router.action_held("Fire"));
    }

    #[test]
    fn test_unknown_names_resolve_to_nothing() {
        let router = InputRouter::new();
        assert_eq!(router.axis_value("Nope"), 0.0);
        assert!(!router.action_held("Nope"));
        assert!(!router.action_went_down("Nope"));
    }

    #[test]
    fn test_dispatch_lists_axes_every_frame_and_actions_only_when_fired() {
        let mut router = InputRouter::new();
        router.add_axis("MoveForward", vec![AxisBinding::new(KeyCode::W, 1.0)]);
        router.add_action("Shoot", vec![KeyCode::Space.into()]);
        router.bind_axis(owner(), "MoveForward", noop_axis());
        router.bind_action(owner(), "Shoot", true, noop_action());
        router.bind_axis(owner(), "Unmapped", noop_axis());

        let calls = router.collect_dispatch();
        assert_eq!(calls.len(), 2, "two axis subscribers, action idle");

        router.press(KeyCode::W);
        router.press(KeyCode::Space);
        let calls = router.collect_dispatch();
        assert_eq!(calls.len(), 3);
        match &calls[0] {
            InputDispatch::Axis { value, .. } => assert_eq!(*value, 1.0),
            InputDispatch::Action { .. } => panic!("subscription order not preserved"),
        }
        match &calls[2] {
            InputDispatch::Axis { value, .. } => assert_eq!(*value, 0.0),
            InputDispatch::Action { .. } => panic!("subscription order not preserved"),
        }

        router.end_frame();
        assert_eq!(router.collect_dispatch().len(), 2, "edge trigger must not repeat while held");
    }

    #[test]
    fn test_unbind_is_idempotent() {
        let mut router = InputRouter::new();
        let handle = router.bind_axis(owner(), "Turn", noop_axis());
        assert!(router.unbind(handle));
        assert!(!router.unbind(handle));
        assert!(!router.is_bound(handle));
        assert_eq!(router.subscription_count(), 0);
    }

    #[test]
    fn test_unbind_owner_drops_only_that_owner() {
        let mut router = InputRouter::new();
        let other = ActorId::from(KeyData::from_ffi(2));
        router.bind_axis(owner(), "Turn", noop_axis());
        router.bind_action(owner(), "Shoot", true, noop_action());
        let kept = router.bind_axis(other, "Turn", noop_axis());

        assert_eq!(router.unbind_owner(owner()), 2);
        assert!(router.is_bound(kept));
        assert_eq!(router.subscription_count(), 1);
    }
}
