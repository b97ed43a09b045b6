//! Scene errors

use crate::assets::AssetError;
use crate::config::ConfigError;
use crate::foundation::collections::{ActorId, ComponentId};
use crate::scene::ComponentType;
use thiserror::Error;

/// Errors raised by world operations and returned from actor callbacks
#[derive(Error, Debug)]
pub enum SceneError {
    /// The actor was destroyed (or never existed)
    #[error("Stale actor handle: {0:?}")]
    StaleActor(ActorId),

    /// The component was removed (or never existed)
    #[error("Stale component handle: {0:?}")]
    StaleComponent(ComponentId),

    /// A typed accessor was used on a component of another kind
    #[error("Component {component:?} is a {actual:?} component, expected {expected:?}")]
    WrongComponentKind {
        /// Component that was accessed
        component: ComponentId,
        /// Kind the accessor wanted
        expected: ComponentType,
        /// Kind the component has
        actual: ComponentType,
    },

    /// An asset identifier was rejected
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Game-defined failure
    #[error("{0}")]
    Custom(String),
}

/// Result type of every actor callback (update, input, overlap, timer)
///
/// An `Err` is logged by the world and the tick carries on.
pub type CallbackResult = Result<(), SceneError>;
