//! Logical and physical surface geometry.
//!
//! A surface has two sizes: the **logical** size it occupies in layout (CSS
//! pixels) and the **physical** size of its pixel buffer (device pixels).
//! The device scale factor links the two, and the bound drawing transform
//! maps one logical unit onto `scale` physical pixels.

use kurbo::Affine;
use serde::{Deserialize, Serialize};

/// Size a surface should appear to occupy, in layout units.
///
/// Components are never negative or NaN: [`LogicalSize::new`] clamps such
/// values to zero. Positive infinity is kept and saturates on conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogicalSize {
    pub height_px: f64,
    pub width_px: f64,
}

impl LogicalSize {
    pub fn new(height_px: f64, width_px: f64) -> Self {
        let size = Self {
            height_px: clamp_extent(height_px),
            width_px: clamp_extent(width_px),
        };
        if size.height_px.to_bits() != height_px.to_bits()
            || size.width_px.to_bits() != width_px.to_bits()
        {
            log::warn!(
                "logical size {height_px}x{width_px} (h x w) clamped to {}x{}",
                size.height_px,
                size.width_px
            );
        }
        size
    }

    /// Derive the pixel-buffer size for the given scale.
    ///
    /// Each axis is `round(extent * scale)` independently.
    pub fn to_physical(self, scale: ScaleFactor) -> PhysicalSize {
        PhysicalSize {
            height: round_to_pixels(self.height_px * scale.get()),
            width: round_to_pixels(self.width_px * scale.get()),
        }
    }

    /// CSS length strings for `style.height` / `style.width`.
    pub fn css_lengths(&self) -> (String, String) {
        (format!("{}px", self.height_px), format!("{}px", self.width_px))
    }
}

/// Pixel-buffer dimensions of a surface, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PhysicalSize {
    pub height: u32,
    pub width: u32,
}

impl PhysicalSize {
    pub const ZERO: Self = Self {
        height: 0,
        width: 0,
    };

    pub fn new(height: u32, width: u32) -> Self {
        Self { height, width }
    }
}

/// Ratio of physical to logical pixels for the current display.
///
/// Always finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ScaleFactor(f64);

impl ScaleFactor {
    pub const ONE: Self = Self(1.0);

    /// Accept a reported ratio, or `None` if it is not a usable scale.
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value > 0.0).then_some(Self(value))
    }

    /// Normalize whatever the host reported.
    ///
    /// An unavailable, zero, negative or non-finite ratio falls back to `1`.
    pub fn from_reported(reported: Option<f64>) -> Self {
        Self::from_reported_or(reported, Self::ONE)
    }

    /// Like [`ScaleFactor::from_reported`] with a caller-chosen fallback.
    pub fn from_reported_or(reported: Option<f64>, fallback: Self) -> Self {
        reported.and_then(Self::new).unwrap_or(fallback)
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// The uniform `(s, 0, 0, s, 0, 0)` transform: one drawing unit is one
    /// logical pixel.
    pub fn transform(self) -> Affine {
        Affine::scale(self.0)
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self::ONE
    }
}

/// Canvas `setTransform` argument order `(a, b, c, d, e, f)`.
pub fn transform_coeffs(xf: Affine) -> [f64; 6] {
    xf.as_coeffs()
}

fn clamp_extent(v: f64) -> f64 {
    if v.is_nan() || v < 0.0 { 0.0 } else { v }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_to_pixels(v: f64) -> u32 {
    let rounded = v.round();
    if rounded.is_nan() || rounded <= 0.0 {
        0
    } else if rounded >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        rounded as u32
    }
}
