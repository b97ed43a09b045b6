//! Named axis and action mappings

use super::{InputSource, InputState};
use serde::{Deserialize, Serialize};

/// One contribution to an axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBinding {
    /// Raw input feeding the axis
    pub source: InputSource,
    /// Value contributed while held (digital) or multiplier on motion (analog)
    pub scale: f32,
}

impl AxisBinding {
    /// Create a binding
    pub fn new(source: impl Into<InputSource>, scale: f32) -> Self {
        Self {
            source: source.into(),
            scale,
        }
    }
}

/// A named continuous input channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisMapping {
    /// Axis name subscribers bind to
    pub name: String,
    /// Contributing bindings
    pub bindings: Vec<AxisBinding>,
}

impl AxisMapping {
    /// Create an axis mapping
    pub fn new(name: impl Into<String>, bindings: Vec<AxisBinding>) -> Self {
        Self {
            name: name.into(),
            bindings,
        }
    }

    /// Resolve the axis against a raw snapshot.
    ///
    /// Held digital sources add their scale; the digital sum is clamped to the
    /// largest digital magnitude on the axis so two keys bound with the same
    /// sign cannot add up past a single key. Analog sources add
    /// `motion * scale` unclamped.
    pub fn resolve(&self, state: &InputState) -> f32 {
        let mut digital = 0.0_f32;
        let mut digital_limit = 0.0_f32;
        let mut analog = 0.0_f32;

        for binding in &self.bindings {
            if binding.source.is_digital() {
                digital_limit = digital_limit.max(binding.scale.abs());
                if state.is_held(binding.source) {
                    digital += binding.scale;
                }
            } else {
                analog += state.analog(binding.source) * binding.scale;
            }
        }

        digital.clamp(-digital_limit, digital_limit) + analog
    }
}

/// A named discrete input channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionMapping {
    /// Action name subscribers bind to
    pub name: String,
    /// Sources that trigger the action
    pub bindings: Vec<InputSource>,
}

impl ActionMapping {
    /// Create an action mapping
    pub fn new(name: impl Into<String>, bindings: Vec<InputSource>) -> Self {
        Self {
            name: name.into(),
            bindings,
        }
    }

    /// Whether any bound source is held (level trigger)
    pub fn is_held(&self, state: &InputState) -> bool {
        self.bindings.iter().any(|source| state.is_held(*source))
    }

    /// Whether any bound source went down this frame (edge trigger)
    pub fn went_down(&self, state: &InputState) -> bool {
        self.bindings.iter().any(|source| state.went_down(*source))
    }

    /// Resolve for a subscriber's trigger mode
    pub fn fired(&self, state: &InputState, edge_triggered: bool) -> bool {
        if edge_triggered {
            self.went_down(state)
        } else {
            self.is_held(state)
        }
    }
}

/// Serializable set of mappings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Axis mappings
    pub axes: Vec<AxisMapping>,
    /// Action mappings
    pub actions: Vec<ActionMapping>,
}
