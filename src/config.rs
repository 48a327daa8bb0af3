#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Global simulation parameters consumed by the engine.
///
/// The acceleration and deceleration defaults are resolved into the
/// immutable [Train](crate::Train) profile when a train is created;
/// the intervals are used by the scheduler driving this engine.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimConfig {
    /// Acceleration in m/s^2 used for trains without their own value.
    pub default_acceleration: f64,
    /// Maximum deceleration in m/s^2 used for trains without their own value.
    pub default_deceleration: f64,
    /// Time in s a train waits before re-requesting a reservation
    /// that was denied because the track was blocked by another train.
    pub poll_interval: f64,
    /// Maximum time in s between train position update events.
    pub position_update_interval: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            default_acceleration: 0.5,
            default_deceleration: 0.5,
            poll_interval: 10.0,
            position_update_interval: 10.0,
        }
    }
}

impl SimConfig {
    /// Creates a config with the default parameters.
    pub fn new() -> Self {
        Default::default()
    }

    /// Checks the parameters are physically meaningful.
    ///
    /// # Panics
    /// Panics if any value is not strictly positive.
    pub(crate) fn check(&self) {
        assert!(
            self.default_acceleration > 0.0,
            "default acceleration must be positive"
        );
        assert!(
            self.default_deceleration > 0.0,
            "default deceleration must be positive"
        );
        assert!(self.poll_interval > 0.0, "poll interval must be positive");
        assert!(
            self.position_update_interval > 0.0,
            "position update interval must be positive"
        );
    }
}
