//! Handle types for the world-owned arenas
//!
//! Every cross-reference in the scene (component owner, attachment parent,
//! actor root, binding owner) is one of these generational keys rather than a
//! pointer, so a destroyed object can be detected instead of dangling.

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Handle to an actor stored in a [`World`](crate::scene::World)
    pub struct ActorId;

    /// Handle to a component stored in a [`World`](crate::scene::World)
    pub struct ComponentId;

    /// Handle returned by [`TimerManager::set_timer`](crate::timers::TimerManager::set_timer)
    pub struct TimerHandle;

    /// Handle returned when binding an axis or action subscriber
    pub struct BindingHandle;
}
