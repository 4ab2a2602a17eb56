pub mod clipboard;
pub mod config;
pub mod error;
pub mod geometry;
pub mod manager;
pub mod surface;
pub mod title;
pub mod vibrate;

pub use clipboard::{Clipboard, ClipboardProvider, ClipboardStatus, ClipboardTracker};
pub use config::SurfaceConfig;
pub use error::{ClipboardError, SurfaceError};
pub use geometry::{LogicalSize, PhysicalSize, ScaleFactor, transform_coeffs};
pub use manager::{Binding, SurfaceContext, SurfaceKey, SurfaceManager, SurfaceState};
pub use surface::{DrawingContext, DrawingSurface, FixedScale, NoScale, ScaleReporter};
pub use title::{TitleGuard, TitleProvider};
pub use vibrate::{Vibration, VibrationPattern, Vibrator};

// Re-export kurbo's affine so downstream crates don't need a direct dependency
pub use kurbo::Affine;
