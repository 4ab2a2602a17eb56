//! WASM bridge for Pixel Hooks — exposes the surface manager and the device
//! helpers to JavaScript hosts.
//!
//! Built via `wasm-pack build --target web`. A host component calls
//! `attach` when its `<canvas>` mounts, `resize` when the requested size
//! changes, and `detach` on unmount; drawing code calls `getContext` or
//! `clear` and must handle the thrown error while the canvas is unmounted.

mod canvas;
mod device;

pub use canvas::{WebCanvas, WebContext, WindowScale};
pub use device::{DocumentTitle, NavigatorClipboard, NavigatorVibrator};

use px_core::{
    ClipboardProvider, ClipboardTracker, LogicalSize, SurfaceConfig, SurfaceError,
    SurfaceManager, SurfaceState, TitleGuard, Vibration, VibrationPattern,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

// ─── Canvas ─────────────────────────────────────────────────────────────

/// JS-facing DPI-aware canvas.
#[wasm_bindgen]
pub struct PxCanvas {
    manager: SurfaceManager<WebCanvas, WindowScale>,
}

/// The canvas element and its 2d context, as returned by `getContext`.
#[wasm_bindgen]
pub struct SurfacePair {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

#[wasm_bindgen]
impl SurfacePair {
    #[wasm_bindgen(getter)]
    pub fn canvas(&self) -> HtmlCanvasElement {
        self.canvas.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn ctx(&self) -> CanvasRenderingContext2d {
        self.ctx.clone()
    }
}

#[wasm_bindgen]
impl PxCanvas {
    /// Request a canvas of the given logical size, in CSS pixels.
    #[wasm_bindgen(constructor)]
    pub fn new(height_px: f64, width_px: f64) -> Self {
        init();
        let mut manager = SurfaceManager::new(WindowScale);
        manager.request_size(LogicalSize::new(height_px, width_px));
        Self { manager }
    }

    /// Build from a JSON `SurfaceConfig`, e.g.
    /// `{"heightPx":300,"widthPx":400,"fallbackScale":1}`.
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(json: &str) -> Result<PxCanvas, JsError> {
        init();
        let config: SurfaceConfig = serde_json::from_str(json)?;
        Ok(Self {
            manager: SurfaceManager::from_config(&config, WindowScale),
        })
    }

    /// Call when the canvas element mounts.
    pub fn attach(&mut self, canvas: HtmlCanvasElement) {
        self.manager.on_attach(WebCanvas(canvas));
    }

    /// Call when the canvas element unmounts. Returns the detached element.
    pub fn detach(&mut self) -> Option<HtmlCanvasElement> {
        self.manager.on_detach().map(|canvas| canvas.0)
    }

    /// Change the requested logical size; re-binds if it differs.
    pub fn resize(&mut self, height_px: f64, width_px: f64) {
        self.manager.request_size(LogicalSize::new(height_px, width_px));
    }

    /// Throws if the canvas is not mounted or has no 2d context.
    #[wasm_bindgen(js_name = getContext)]
    pub fn get_context(&self) -> Result<SurfacePair, JsError> {
        let pair = self.manager.get_context().map_err(surface_error)?;
        Ok(SurfacePair {
            canvas: pair.surface.element().clone(),
            ctx: pair.context.0.clone(),
        })
    }

    /// The mounted canvas element. Throws like `getContext`.
    pub fn canvas(&self) -> Result<HtmlCanvasElement, JsError> {
        let pair = self.manager.get_context().map_err(surface_error)?;
        Ok(pair.surface.element().clone())
    }

    /// The canvas' 2d context. Throws like `getContext`.
    pub fn context(&self) -> Result<CanvasRenderingContext2d, JsError> {
        let pair = self.manager.get_context().map_err(surface_error)?;
        Ok(pair.context.0.clone())
    }

    /// Erase the whole backing buffer. Throws like `getContext`.
    pub fn clear(&self) -> Result<(), JsError> {
        self.manager.clear().map_err(surface_error)
    }

    /// `"unmounted"`, `"attached"` or `"ready"`.
    pub fn state(&self) -> String {
        state_name(self.manager.state()).to_string()
    }

    #[wasm_bindgen(js_name = physicalWidth)]
    pub fn physical_width(&self) -> u32 {
        self.manager.physical_size().map_or(0, |size| size.width)
    }

    #[wasm_bindgen(js_name = physicalHeight)]
    pub fn physical_height(&self) -> u32 {
        self.manager.physical_size().map_or(0, |size| size.height)
    }

    pub fn scale(&self) -> f64 {
        self.manager.scale().get()
    }

    /// Last binding as JSON:
    /// `{"state":..,"logical":{..},"physical":{..},"scale":..}`.
    #[wasm_bindgen(js_name = bindingJson)]
    pub fn binding_json(&self) -> String {
        binding_to_json(&self.manager)
    }
}

fn surface_error(err: SurfaceError) -> JsError {
    JsError::new(&format!("{}: {err}", err.code()))
}

fn state_name(state: SurfaceState) -> &'static str {
    match state {
        SurfaceState::Unmounted => "unmounted",
        SurfaceState::Attached => "attached",
        SurfaceState::Ready => "ready",
    }
}

fn binding_to_json<S: px_core::DrawingSurface, R: px_core::ScaleReporter>(
    manager: &SurfaceManager<S, R>,
) -> String {
    let value = serde_json::json!({
        "state": state_name(manager.state()),
        "logical": manager.logical_size(),
        "physical": manager.physical_size(),
        "scale": manager.scale().get(),
    });
    value.to_string()
}

// ─── Clipboard ──────────────────────────────────────────────────────────

/// Clipboard text access with `status` / `error` reflecting the latest
/// `copy` or `paste`.
#[wasm_bindgen]
#[derive(Default)]
pub struct PxClipboard {
    tracker: Rc<RefCell<ClipboardTracker>>,
}

#[wasm_bindgen]
impl PxClipboard {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        init();
        Self::default()
    }

    /// `"pending"`, `"success"` or `"error"`.
    pub fn status(&self) -> String {
        self.tracker.borrow().status().as_str().to_string()
    }

    /// Message of the latest failure, if the status is `"error"`.
    pub fn error(&self) -> Option<String> {
        self.tracker.borrow().error().map(ToString::to_string)
    }

    /// Resolves once the write settles; never rejects.
    pub fn copy(&self, content: String) -> js_sys::Promise {
        let tracker = self.tracker.clone();
        wasm_bindgen_futures::future_to_promise(async move {
            tracker.borrow_mut().begin();
            let result = NavigatorClipboard.write_text(&content).await;
            tracker.borrow_mut().record(result);
            Ok(JsValue::UNDEFINED)
        })
    }

    /// Resolves to the clipboard text, or `undefined` on failure.
    pub fn paste(&self) -> js_sys::Promise {
        let tracker = self.tracker.clone();
        wasm_bindgen_futures::future_to_promise(async move {
            tracker.borrow_mut().begin();
            let result = NavigatorClipboard.read_text().await;
            let text = tracker.borrow_mut().record(result);
            Ok(text.map_or(JsValue::UNDEFINED, JsValue::from))
        })
    }
}

// ─── Vibration ──────────────────────────────────────────────────────────

thread_local! {
    static VIBRATION: Vibration<NavigatorVibrator> = Vibration::new(NavigatorVibrator::detect());
}

/// Vibrate once for `pattern` ms, or follow an array of on/off durations.
/// Returns `true` if the device vibrated.
#[wasm_bindgen]
pub fn vibrate(pattern: JsValue) -> bool {
    let pattern = if js_sys::Array::is_array(&pattern) {
        let durations = js_sys::Array::from(&pattern)
            .iter()
            .filter_map(|value| value.as_f64())
            .map(device::duration_ms)
            .collect();
        VibrationPattern::Pattern(durations)
    } else if let Some(ms) = pattern.as_f64() {
        VibrationPattern::Once(device::duration_ms(ms))
    } else {
        return false;
    };
    VIBRATION.with(|vibration| vibration.vibrate(pattern))
}

// ─── Window title ───────────────────────────────────────────────────────

/// Overrides `document.title` until `restore()` or `free()` is called.
#[wasm_bindgen]
pub struct PxTitle {
    guard: Option<TitleGuard<DocumentTitle>>,
}

#[wasm_bindgen]
impl PxTitle {
    #[wasm_bindgen(constructor)]
    pub fn new(title: &str) -> Result<PxTitle, JsError> {
        init();
        let document = DocumentTitle::current().ok_or_else(|| JsError::new("no document"))?;
        Ok(Self {
            guard: Some(TitleGuard::new(document, title)),
        })
    }

    pub fn set(&mut self, title: &str) {
        if let Some(guard) = self.guard.as_mut() {
            guard.set(title);
        }
    }

    /// Put the original title back. Later `set` calls are ignored.
    pub fn restore(&mut self) {
        self.guard = None;
    }
}

// ─── Setup ──────────────────────────────────────────────────────────────

/// Route `log` records and panics to the browser console.
///
/// Safe to call repeatedly; only the first call installs anything. The
/// constructors call it too, so calling it explicitly is only needed to
/// see log output before the first `PxCanvas` exists.
#[wasm_bindgen]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOKS: Once = Once::new();
        SET_HOOKS.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("px-wasm panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
            if console_log::init_with_level(log::Level::Info).is_err() {
                web_sys::console::warn_1(&"px-wasm: a logger is already installed".into());
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use px_core::NoScale;

    #[derive(Clone)]
    struct Detached;

    struct NoContext;

    impl px_core::DrawingContext for NoContext {
        fn set_transform(&self, _xf: px_core::Affine) {}
        fn clear_rect(&self, _x: f64, _y: f64, _width: f64, _height: f64) {}
        fn save(&self) {}
        fn restore(&self) {}
    }

    impl px_core::DrawingSurface for Detached {
        type Context = NoContext;
        fn same_surface(&self, _other: &Self) -> bool {
            true
        }
        fn set_layout_size(&self, _size: LogicalSize) {}
        fn set_buffer_size(&self, _size: px_core::PhysicalSize) {}
        fn buffer_size(&self) -> px_core::PhysicalSize {
            px_core::PhysicalSize::ZERO
        }
        fn context_2d(&self) -> Option<NoContext> {
            Some(NoContext)
        }
    }

    #[test]
    fn binding_json_reports_unbound_state() {
        let mut manager: SurfaceManager<Detached, _> = SurfaceManager::new(NoScale);
        manager.request_size(LogicalSize::new(10.0, 20.0));
        let value: serde_json::Value = serde_json::from_str(&binding_to_json(&manager)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "state": "unmounted",
                "logical": { "heightPx": 10.0, "widthPx": 20.0 },
                "physical": null,
                "scale": 1.0,
            })
        );
    }

    #[test]
    fn binding_json_reports_physical_size_once_bound() {
        let mut manager = SurfaceManager::new(px_core::FixedScale(2.0));
        manager.on_attach(Detached);
        manager.request_size(LogicalSize::new(10.0, 20.0));
        let value: serde_json::Value = serde_json::from_str(&binding_to_json(&manager)).unwrap();
        assert_eq!(value["state"], "ready");
        assert_eq!(value["physical"], serde_json::json!({ "height": 20, "width": 40 }));
    }

    #[test]
    fn config_json_uses_camel_case_and_defaults() {
        let config: SurfaceConfig = serde_json::from_str(r#"{"heightPx": 300}"#).unwrap();
        assert_eq!(config.logical_size(), LogicalSize::new(300.0, 300.0));
        assert_eq!(config.fallback_scale, 1.0);
    }

    #[test]
    fn state_names_are_lowercase() {
        assert_eq!(state_name(SurfaceState::Unmounted), "unmounted");
        assert_eq!(state_name(SurfaceState::Attached), "attached");
        assert_eq!(state_name(SurfaceState::Ready), "ready");
    }

    #[test]
    fn web_canvas_hands_out_the_wrapped_2d_context() {
        fn context_of<S: px_core::DrawingSurface>() -> std::any::TypeId
        where
            S::Context: 'static,
        {
            std::any::TypeId::of::<S::Context>()
        }
        assert_eq!(context_of::<WebCanvas>(), std::any::TypeId::of::<WebContext>());
    }

    #[test]
    fn init_can_run_repeatedly() {
        init();
        init();
    }
}
