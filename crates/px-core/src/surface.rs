//! Collaborator traits for the platform drawing surface.
//!
//! The manager never touches a concrete platform type. A host implements
//! these traits over its own canvas element (see `px-wasm` for the browser
//! implementation) or over a fake for tests.

use crate::geometry::{LogicalSize, PhysicalSize};
use kurbo::Affine;

/// A platform drawing surface, e.g. an HTML `<canvas>` element.
pub trait DrawingSurface {
    type Context: DrawingContext;

    /// `true` if `other` refers to the same platform element as `self`.
    ///
    /// Used to decide whether a cached context still belongs to the surface.
    fn same_surface(&self, other: &Self) -> bool;

    /// Size the element occupies in layout (CSS `width` / `height`).
    fn set_layout_size(&self, size: LogicalSize);

    /// Resize the backing pixel buffer.
    fn set_buffer_size(&self, size: PhysicalSize);

    /// Current backing pixel buffer size, as reported by the element.
    fn buffer_size(&self) -> PhysicalSize;

    /// Obtain a 2-D drawing context, or `None` if the surface has no 2-D
    /// capability.
    fn context_2d(&self) -> Option<Self::Context>;
}

/// Stateful handle used to issue drawing commands against a surface.
pub trait DrawingContext {
    /// Replace the current transform (canvas `setTransform` semantics).
    fn set_transform(&self, xf: Affine);

    /// Erase a rectangle, in the coordinate space of the current transform.
    fn clear_rect(&self, x: f64, y: f64, width: f64, height: f64);

    /// Push the current drawing state (transform included) onto a stack.
    fn save(&self);

    /// Pop the state pushed by the matching [`Self::save`].
    fn restore(&self);
}

/// Reports the device scale factor of the display hosting the surface.
pub trait ScaleReporter {
    /// Raw ratio of physical to logical pixels, or `None` outside an
    /// environment that can report one.
    fn device_pixel_ratio(&self) -> Option<f64>;
}

/// Reporter for headless hosts; always unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoScale;

impl ScaleReporter for NoScale {
    fn device_pixel_ratio(&self) -> Option<f64> {
        None
    }
}

/// Reporter with a constant ratio.
#[derive(Debug, Clone, Copy)]
pub struct FixedScale(pub f64);

impl ScaleReporter for FixedScale {
    fn device_pixel_ratio(&self) -> Option<f64> {
        Some(self.0)
    }
}

impl<R: ScaleReporter + ?Sized> ScaleReporter for &R {
    fn device_pixel_ratio(&self) -> Option<f64> {
        (**self).device_pixel_ratio()
    }
}
