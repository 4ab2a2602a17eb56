//! Software canvas used by the integration tests.
//!
//! Mimics the parts of an HTML canvas the manager relies on: resizing the
//! buffer wipes it and resets the transform and the save stack, `clearRect` and `fillRect`
//! honor the current transform, and pixels are covered when their center
//! falls inside the transformed rectangle.

#![allow(dead_code)]

use px_core::{Affine, DrawingContext, DrawingSurface, LogicalSize, PhysicalSize, ScaleReporter};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub const BACKGROUND: u32 = 0;

struct Raster {
    layout: Cell<Option<LogicalSize>>,
    size: Cell<PhysicalSize>,
    pixels: RefCell<Vec<u32>>,
    transform: Cell<[f64; 6]>,
    saved: RefCell<Vec<[f64; 6]>>,
    supports_2d: bool,
    contexts_created: Cell<u32>,
}

#[derive(Clone)]
pub struct RasterCanvas(Rc<Raster>);

impl RasterCanvas {
    pub fn new() -> Self {
        Self::build(true)
    }

    /// A canvas whose `getContext("2d")` returns nothing.
    pub fn without_2d() -> Self {
        Self::build(false)
    }

    fn build(supports_2d: bool) -> Self {
        RasterCanvas(Rc::new(Raster {
            layout: Cell::new(None),
            size: Cell::new(PhysicalSize::ZERO),
            pixels: RefCell::new(Vec::new()),
            transform: Cell::new(Affine::IDENTITY.as_coeffs()),
            saved: RefCell::new(Vec::new()),
            supports_2d,
            contexts_created: Cell::new(0),
        }))
    }

    pub fn layout_size(&self) -> Option<LogicalSize> {
        self.0.layout.get()
    }

    pub fn contexts_created(&self) -> u32 {
        self.0.contexts_created.get()
    }

    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        let size = self.0.size.get();
        self.0.pixels.borrow()[(y * size.width + x) as usize]
    }

    pub fn count_pixels(&self, color: u32) -> usize {
        self.0.pixels.borrow().iter().filter(|&&p| p == color).count()
    }

    pub fn all_pixels(&self, color: u32) -> bool {
        self.0.pixels.borrow().iter().all(|&p| p == color)
    }
}

impl DrawingSurface for RasterCanvas {
    type Context = RasterContext;

    fn same_surface(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn set_layout_size(&self, size: LogicalSize) {
        self.0.layout.set(Some(size));
    }

    fn set_buffer_size(&self, size: PhysicalSize) {
        self.0.size.set(size);
        let len = size.width as usize * size.height as usize;
        *self.0.pixels.borrow_mut() = vec![BACKGROUND; len];
        self.0.transform.set(Affine::IDENTITY.as_coeffs());
        self.0.saved.borrow_mut().clear();
    }

    fn buffer_size(&self) -> PhysicalSize {
        self.0.size.get()
    }

    fn context_2d(&self) -> Option<RasterContext> {
        if !self.0.supports_2d {
            return None;
        }
        self.0.contexts_created.set(self.0.contexts_created.get() + 1);
        Some(RasterContext(self.0.clone()))
    }
}

#[derive(Clone)]
pub struct RasterContext(Rc<Raster>);

impl RasterContext {
    pub fn transform(&self) -> [f64; 6] {
        self.0.transform.get()
    }

    pub fn fill_rect(&self, x: f64, y: f64, width: f64, height: f64, color: u32) {
        self.paint(x, y, width, height, color);
    }

    fn paint(&self, x: f64, y: f64, width: f64, height: f64, color: u32) {
        let [a, b, c, d, e, f] = self.0.transform.get();
        let map = |px: f64, py: f64| (a * px + c * py + e, b * px + d * py + f);
        let (x0, y0) = map(x, y);
        let (x1, y1) = map(x + width, y + height);
        let (left, right) = (x0.min(x1), x0.max(x1));
        let (top, bottom) = (y0.min(y1), y0.max(y1));

        let size = self.0.size.get();
        let mut pixels = self.0.pixels.borrow_mut();
        for row in 0..size.height {
            let cy = f64::from(row) + 0.5;
            if cy < top || cy >= bottom {
                continue;
            }
            for col in 0..size.width {
                let cx = f64::from(col) + 0.5;
                if cx >= left && cx < right {
                    pixels[(row * size.width + col) as usize] = color;
                }
            }
        }
    }
}

impl DrawingContext for RasterContext {
    fn set_transform(&self, xf: Affine) {
        self.0.transform.set(xf.as_coeffs());
    }

    fn clear_rect(&self, x: f64, y: f64, width: f64, height: f64) {
        self.paint(x, y, width, height, BACKGROUND);
    }

    fn save(&self) {
        self.0.saved.borrow_mut().push(self.0.transform.get());
    }

    fn restore(&self) {
        // Unbalanced restore is a no-op, as on a real canvas.
        if let Some(xf) = self.0.saved.borrow_mut().pop() {
            self.0.transform.set(xf);
        }
    }
}

/// Scale reporter the test can change between binds, e.g. to simulate the
/// window moving to another monitor.
#[derive(Default)]
pub struct SharedScale(Cell<Option<f64>>);

impl SharedScale {
    pub fn new(ratio: Option<f64>) -> Self {
        SharedScale(Cell::new(ratio))
    }

    pub fn set(&self, ratio: Option<f64>) {
        self.0.set(ratio);
    }
}

impl ScaleReporter for SharedScale {
    fn device_pixel_ratio(&self) -> Option<f64> {
        self.0.get()
    }
}
