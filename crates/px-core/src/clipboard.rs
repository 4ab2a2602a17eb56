//! Clipboard text access with observable status.
//!
//! Every action resets the tracker to [`ClipboardStatus::Pending`] with no
//! error, then records the outcome. Failures never escape as errors from
//! [`Clipboard::copy`]/[`Clipboard::paste`]; callers inspect
//! [`Clipboard::status`] and [`Clipboard::error`] instead.
//!
//! [`ClipboardTracker`] is the status half on its own, for hosts that must
//! not hold a borrow of the clipboard across an `await`.

use crate::error::ClipboardError;
use std::future::Future;

/// Host clipboard. Both operations are asynchronous in browsers.
pub trait ClipboardProvider {
    fn write_text(&self, text: &str) -> impl Future<Output = Result<(), ClipboardError>>;
    fn read_text(&self) -> impl Future<Output = Result<String, ClipboardError>>;
}

/// Outcome of the latest clipboard action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipboardStatus {
    /// No action has completed yet, or one is in flight.
    #[default]
    Pending,
    Success,
    Error,
}

impl ClipboardStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClipboardTracker {
    status: ClipboardStatus,
    error: Option<ClipboardError>,
}

impl ClipboardTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> ClipboardStatus {
        self.status
    }

    /// Error of the latest action; `None` unless the status is `Error`.
    pub fn error(&self) -> Option<&ClipboardError> {
        self.error.as_ref()
    }

    /// Mark an action as started.
    pub fn begin(&mut self) {
        self.status = ClipboardStatus::Pending;
        self.error = None;
    }

    /// Record the outcome of the action started by [`Self::begin`].
    pub fn record<T>(&mut self, result: Result<T, ClipboardError>) -> Option<T> {
        match result {
            Ok(value) => {
                self.status = ClipboardStatus::Success;
                Some(value)
            }
            Err(err) => {
                log::debug!("clipboard action failed: {err}");
                self.status = ClipboardStatus::Error;
                self.error = Some(err);
                None
            }
        }
    }
}

/// A clipboard provider paired with the status of its latest action.
#[derive(Debug, Clone, Default)]
pub struct Clipboard<P> {
    provider: P,
    tracker: ClipboardTracker,
}

impl<P: ClipboardProvider> Clipboard<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            tracker: ClipboardTracker::new(),
        }
    }

    pub fn status(&self) -> ClipboardStatus {
        self.tracker.status()
    }

    pub fn error(&self) -> Option<&ClipboardError> {
        self.tracker.error()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Copy `text` to the clipboard.
    pub async fn copy(&mut self, text: &str) -> ClipboardStatus {
        self.tracker.begin();
        let result = self.provider.write_text(text).await;
        self.tracker.record(result);
        self.tracker.status()
    }

    /// Read the clipboard's text; `None` on failure.
    pub async fn paste(&mut self) -> Option<String> {
        self.tracker.begin();
        let result = self.provider.read_text().await;
        self.tracker.record(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;

    #[derive(Default)]
    struct MemoryClipboard {
        text: RefCell<Option<String>>,
        denied: bool,
    }

    impl ClipboardProvider for MemoryClipboard {
        async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
            if self.denied {
                return Err(ClipboardError::Rejected("NotAllowedError".into()));
            }
            *self.text.borrow_mut() = Some(text.to_string());
            Ok(())
        }

        async fn read_text(&self) -> Result<String, ClipboardError> {
            if self.denied {
                return Err(ClipboardError::Rejected("NotAllowedError".into()));
            }
            self.text.borrow().clone().ok_or(ClipboardError::Unsupported)
        }
    }

    #[test]
    fn starts_pending_without_error() {
        let tracker = ClipboardTracker::new();
        assert_eq!(tracker.status(), ClipboardStatus::Pending);
        assert!(tracker.error().is_none());
    }

    #[test]
    fn copy_then_paste_succeeds() {
        let mut clipboard = Clipboard::new(MemoryClipboard::default());

        let status = block_on(clipboard.copy("Hello World!!"));
        assert_eq!(status, ClipboardStatus::Success);

        let pasted = block_on(clipboard.paste());
        assert_eq!(pasted.as_deref(), Some("Hello World!!"));
        assert_eq!(clipboard.status(), ClipboardStatus::Success);
        assert_eq!(
            clipboard.provider().text.borrow().as_deref(),
            Some("Hello World!!")
        );
    }

    #[test]
    fn rejection_is_recorded_not_raised() {
        let mut clipboard = Clipboard::new(MemoryClipboard {
            denied: true,
            ..MemoryClipboard::default()
        });

        assert_eq!(block_on(clipboard.copy("x")), ClipboardStatus::Error);
        assert_eq!(
            clipboard.error(),
            Some(&ClipboardError::Rejected("NotAllowedError".into()))
        );
        assert_eq!(block_on(clipboard.paste()), None);
        assert_eq!(clipboard.status().as_str(), "error");
    }

    #[test]
    fn new_action_clears_previous_error() {
        let mut tracker = ClipboardTracker::new();
        tracker.begin();
        tracker.record::<()>(Err(ClipboardError::Unsupported));
        assert!(tracker.error().is_some());

        tracker.begin();
        assert_eq!(tracker.status(), ClipboardStatus::Pending);
        assert!(tracker.error().is_none());
    }
}
