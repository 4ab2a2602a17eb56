//! Device vibration, degrading to a no-op where unsupported.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A single buzz or an on/off pattern of durations, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VibrationPattern {
    Once(u32),
    Pattern(SmallVec<[u32; 4]>),
}

impl From<u32> for VibrationPattern {
    fn from(ms: u32) -> Self {
        VibrationPattern::Once(ms)
    }
}

impl From<&[u32]> for VibrationPattern {
    fn from(pattern: &[u32]) -> Self {
        VibrationPattern::Pattern(SmallVec::from_slice(pattern))
    }
}

/// Host vibration capability.
pub trait Vibrator {
    /// Returns `true` if the host accepted the request.
    fn vibrate(&self, pattern: &VibrationPattern) -> bool;
}

/// Vibration entry point, resolved once against the host.
#[derive(Debug, Clone)]
pub struct Vibration<V> {
    vibrator: Option<V>,
}

impl<V: Vibrator> Vibration<V> {
    pub fn new(vibrator: Option<V>) -> Self {
        if vibrator.is_none() {
            log::info!("device does not support vibration; requests will be ignored");
        }
        Self { vibrator }
    }

    pub fn is_supported(&self) -> bool {
        self.vibrator.is_some()
    }

    /// Returns `true` if vibration happened.
    pub fn vibrate(&self, pattern: impl Into<VibrationPattern>) -> bool {
        let pattern = pattern.into();
        match &self.vibrator {
            Some(vibrator) => vibrator.vibrate(&pattern),
            None => false,
        }
    }
}
