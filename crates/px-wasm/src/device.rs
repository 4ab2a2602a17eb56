//! Browser device APIs: clipboard, vibration and document title.
//!
//! Support is feature-detected through `Reflect` so older engines without
//! `navigator.clipboard` or `navigator.vibrate` degrade instead of throwing.

use px_core::{ClipboardError, ClipboardProvider, TitleProvider, VibrationPattern, Vibrator};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Navigator};

// ─── Clipboard ──────────────────────────────────────────────────────────

/// `navigator.clipboard` text access.
#[derive(Debug, Clone, Copy, Default)]
pub struct NavigatorClipboard;

impl NavigatorClipboard {
    fn clipboard() -> Result<web_sys::Clipboard, ClipboardError> {
        let navigator = web_sys::window()
            .ok_or(ClipboardError::Unsupported)?
            .navigator();
        let clipboard = navigator_property(&navigator, "clipboard")
            .filter(|value| value.is_object())
            .ok_or(ClipboardError::Unsupported)?;
        Ok(clipboard.unchecked_into())
    }
}

impl ClipboardProvider for NavigatorClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let promise = Self::clipboard()?.write_text(text);
        JsFuture::from(promise).await.map_err(rejection)?;
        Ok(())
    }

    async fn read_text(&self) -> Result<String, ClipboardError> {
        let promise = Self::clipboard()?.read_text();
        let value = JsFuture::from(promise).await.map_err(rejection)?;
        value
            .as_string()
            .ok_or_else(|| ClipboardError::Rejected("clipboard returned non-text data".into()))
    }
}

fn rejection(err: JsValue) -> ClipboardError {
    let message = match err.dyn_ref::<js_sys::Error>() {
        Some(error) => String::from(error.message()),
        None => err.as_string().unwrap_or_else(|| format!("{err:?}")),
    };
    ClipboardError::Rejected(message)
}

// ─── Vibration ──────────────────────────────────────────────────────────

/// `navigator.vibrate`, present only where the browser implements it.
#[derive(Debug, Clone)]
pub struct NavigatorVibrator(Navigator);

impl NavigatorVibrator {
    pub fn detect() -> Option<Self> {
        let navigator = web_sys::window()?.navigator();
        navigator_property(&navigator, "vibrate")
            .filter(|value| value.is_function())
            .map(|_| NavigatorVibrator(navigator))
    }
}

impl Vibrator for NavigatorVibrator {
    fn vibrate(&self, pattern: &VibrationPattern) -> bool {
        match pattern {
            VibrationPattern::Once(ms) => self.0.vibrate_with_duration(*ms),
            VibrationPattern::Pattern(durations) => {
                let array: js_sys::Array = durations
                    .iter()
                    .map(|&ms| JsValue::from_f64(f64::from(ms)))
                    .collect();
                self.0.vibrate_with_pattern(&array)
            }
        }
    }
}

/// Convert a JS duration (milliseconds) to the `u32` the Vibration API takes.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn duration_ms(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        value.min(f64::from(u32::MAX)) as u32
    }
}

// ─── Document title ─────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct DocumentTitle(pub Document);

impl DocumentTitle {
    pub fn current() -> Option<Self> {
        web_sys::window()?.document().map(DocumentTitle)
    }
}

impl TitleProvider for DocumentTitle {
    fn title(&self) -> String {
        self.0.title()
    }

    fn set_title(&self, title: &str) {
        self.0.set_title(title);
    }
}

fn navigator_property(navigator: &Navigator, name: &str) -> Option<JsValue> {
    js_sys::Reflect::get(navigator, &JsValue::from_str(name))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}
