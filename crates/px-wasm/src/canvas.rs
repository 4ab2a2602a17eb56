//! Browser implementations of the surface collaborators.
//!
//! `HtmlCanvasElement` is the drawing surface, `CanvasRenderingContext2d`
//! (wrapped in [`WebContext`]) the drawing context, and
//! `window.devicePixelRatio` the scale reporter.

use px_core::{Affine, DrawingContext, DrawingSurface, LogicalSize, PhysicalSize, ScaleReporter};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// A mounted `<canvas>` element.
#[derive(Debug, Clone)]
pub struct WebCanvas(pub HtmlCanvasElement);

impl WebCanvas {
    pub fn element(&self) -> &HtmlCanvasElement {
        &self.0
    }
}

impl DrawingSurface for WebCanvas {
    type Context = WebContext;

    fn same_surface(&self, other: &Self) -> bool {
        js_sys::Object::is(self.0.as_ref(), other.0.as_ref())
    }

    fn set_layout_size(&self, size: LogicalSize) {
        let (height, width) = size.css_lengths();
        let style = self.0.style();
        if let Err(err) = style
            .set_property("width", &width)
            .and_then(|()| style.set_property("height", &height))
        {
            log::warn!("failed to set canvas css size: {err:?}");
        }
    }

    fn set_buffer_size(&self, size: PhysicalSize) {
        self.0.set_width(size.width);
        self.0.set_height(size.height);
    }

    fn buffer_size(&self) -> PhysicalSize {
        PhysicalSize::new(self.0.height(), self.0.width())
    }

    fn context_2d(&self) -> Option<WebContext> {
        match self.0.get_context("2d") {
            Ok(Some(ctx)) => ctx.dyn_into::<CanvasRenderingContext2d>().ok().map(WebContext),
            Ok(None) => None,
            Err(err) => {
                log::warn!("getContext(\"2d\") threw: {err:?}");
                None
            }
        }
    }
}

/// The 2d context of a [`WebCanvas`].
#[derive(Debug, Clone)]
pub struct WebContext(pub CanvasRenderingContext2d);

impl DrawingContext for WebContext {
    fn set_transform(&self, xf: Affine) {
        let [a, b, c, d, e, f] = px_core::transform_coeffs(xf);
        if let Err(err) = self.0.set_transform(a, b, c, d, e, f) {
            log::warn!("setTransform threw: {err:?}");
        }
    }

    fn clear_rect(&self, x: f64, y: f64, width: f64, height: f64) {
        self.0.clear_rect(x, y, width, height);
    }

    fn save(&self) {
        self.0.save();
    }

    fn restore(&self) {
        self.0.restore();
    }
}

/// `window.devicePixelRatio`; unavailable outside a window (e.g. workers).
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowScale;

impl ScaleReporter for WindowScale {
    fn device_pixel_ratio(&self) -> Option<f64> {
        web_sys::window().map(|window| window.device_pixel_ratio())
    }
}
