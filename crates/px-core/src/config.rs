//! Surface configuration, deserializable from the host's JSON.

use crate::geometry::{LogicalSize, ScaleFactor};
use serde::{Deserialize, Serialize};

/// Initial request for a managed surface.
///
/// ```json
/// { "heightPx": 300, "widthPx": 400, "fallbackScale": 1 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SurfaceConfig {
    pub height_px: f64,
    pub width_px: f64,
    /// Scale used when the host cannot report a usable device pixel ratio.
    pub fallback_scale: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            height_px: 150.0,
            width_px: 300.0,
            fallback_scale: 1.0,
        }
    }
}

impl SurfaceConfig {
    pub fn logical_size(&self) -> LogicalSize {
        LogicalSize::new(self.height_px, self.width_px)
    }

    /// The configured fallback, itself falling back to `1` if unusable.
    pub fn fallback_scale(&self) -> ScaleFactor {
        ScaleFactor::from_reported(Some(self.fallback_scale))
    }
}
