//! DPI-aware drawing-surface manager.
//!
//! Keeps a surface's layout size, its pixel-buffer size and its context
//! transform consistent with the device scale factor, so one drawing unit
//! is always one logical pixel.
//!
//! The host drives the lifecycle through [`SurfaceManager::on_attach`],
//! [`SurfaceManager::on_detach`] and [`SurfaceManager::request_size`].
//! Binding is a side effect that never fails; problems surface when drawing
//! code asks for the context via [`SurfaceManager::get_context`] or
//! [`SurfaceManager::clear`].

use crate::config::SurfaceConfig;
use crate::error::SurfaceError;
use crate::geometry::{LogicalSize, PhysicalSize, ScaleFactor};
use crate::surface::{DrawingContext, DrawingSurface, ScaleReporter};
use kurbo::Affine;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of one surface binding; changes whenever a different platform
/// element is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceKey(u64);

impl SurfaceKey {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        SurfaceKey(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SurfaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

/// Lifecycle state of the managed surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceState {
    /// No platform element attached.
    Unmounted,
    /// Element attached, not bound to a size yet.
    Attached,
    /// Element attached and sized; transform installed if a context exists.
    Ready,
}

/// The bound surface together with its drawing context.
pub struct SurfaceContext<'a, S: DrawingSurface> {
    pub surface: &'a S,
    pub context: &'a S::Context,
}

/// Result of the last successful bind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binding {
    pub logical: LogicalSize,
    pub physical: PhysicalSize,
    pub scale: ScaleFactor,
}

struct Attached<S> {
    handle: S,
    key: SurfaceKey,
}

struct CachedContext<C> {
    key: SurfaceKey,
    context: C,
}

/// Owns the surface binding and the context cache for one canvas.
pub struct SurfaceManager<S: DrawingSurface, R> {
    reporter: R,
    fallback_scale: ScaleFactor,
    requested: Option<LogicalSize>,
    attached: Option<Attached<S>>,
    context: Option<CachedContext<S::Context>>,
    binding: Option<Binding>,
}

impl<S: DrawingSurface, R: ScaleReporter> SurfaceManager<S, R> {
    pub fn new(reporter: R) -> Self {
        Self {
            reporter,
            fallback_scale: ScaleFactor::ONE,
            requested: None,
            attached: None,
            context: None,
            binding: None,
        }
    }

    /// Create a manager with a requested size and fallback scale taken from
    /// `config`. Nothing is bound until a surface is attached.
    pub fn from_config(config: &SurfaceConfig, reporter: R) -> Self {
        let mut manager = Self::new(reporter);
        manager.fallback_scale = config.fallback_scale();
        manager.requested = Some(config.logical_size());
        manager
    }

    // ─── Lifecycle ───────────────────────────────────────────────────────

    /// The host mounted `handle`.
    ///
    /// Re-attaching the element that is already bound keeps the cached
    /// context; any other element invalidates it. Binds immediately if a
    /// size has been requested.
    pub fn on_attach(&mut self, handle: S) {
        let key = match &self.attached {
            Some(current) if current.handle.same_surface(&handle) => current.key,
            _ => {
                self.context = None;
                self.binding = None;
                SurfaceKey::next()
            }
        };
        log::debug!("attach {key}");
        self.attached = Some(Attached { handle, key });
        if let Some(size) = self.requested {
            self.bind(size);
        }
    }

    /// The host unmounted the element. Returns the handle that was attached.
    pub fn on_detach(&mut self) -> Option<S> {
        self.context = None;
        self.binding = None;
        let detached = self.attached.take()?;
        log::debug!("detach {}", detached.key);
        Some(detached.handle)
    }

    /// Record a new requested size; re-binds only when it changed.
    pub fn request_size(&mut self, logical: LogicalSize) {
        if self.requested == Some(logical) && self.binding.is_some() {
            return;
        }
        self.bind(logical);
    }

    /// Size the attached surface for `logical` and install the scale
    /// transform.
    ///
    /// Never fails. Without an attached surface only the requested size is
    /// recorded. If the surface cannot supply a 2-D context the context
    /// stays unset and later accessor calls report
    /// [`SurfaceError::ContextUnavailable`].
    pub fn bind(&mut self, logical: LogicalSize) {
        self.requested = Some(logical);
        let Some(attached) = &self.attached else {
            log::trace!("bind deferred: no surface attached");
            return;
        };

        let scale = ScaleFactor::from_reported_or(
            self.reporter.device_pixel_ratio(),
            self.fallback_scale,
        );
        let physical = logical.to_physical(scale);

        attached.handle.set_layout_size(logical);
        attached.handle.set_buffer_size(physical);

        let cached = self
            .context
            .take()
            .filter(|cached| cached.key == attached.key)
            .map(|cached| cached.context);
        match cached.or_else(|| attached.handle.context_2d()) {
            Some(context) => {
                // Resizing the buffer resets context state on most hosts.
                context.set_transform(scale.transform());
                self.context = Some(CachedContext {
                    key: attached.key,
                    context,
                });
            }
            None => log::warn!("{}: no 2d context available", attached.key),
        }

        log::debug!(
            "bind {}: logical {}x{} scale {} -> physical {}x{}",
            attached.key,
            logical.width_px,
            logical.height_px,
            scale.get(),
            physical.width,
            physical.height
        );
        self.binding = Some(Binding {
            logical,
            physical,
            scale,
        });
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    /// The bound surface and its context.
    pub fn get_context(&self) -> Result<SurfaceContext<'_, S>, SurfaceError> {
        let attached = self
            .attached
            .as_ref()
            .ok_or(SurfaceError::SurfaceNotReady)?;
        let cached = self
            .context
            .as_ref()
            .filter(|cached| cached.key == attached.key)
            .ok_or(SurfaceError::ContextUnavailable)?;
        Ok(SurfaceContext {
            surface: &attached.handle,
            context: &cached.context,
        })
    }

    /// Erase the whole pixel buffer.
    ///
    /// The clear runs in device-pixel space between a `save`/`restore`
    /// pair, so whatever transform the caller had installed survives it.
    pub fn clear(&self) -> Result<(), SurfaceError> {
        let SurfaceContext { surface, context } = self.get_context()?;
        let buffer = surface.buffer_size();
        context.save();
        context.set_transform(Affine::IDENTITY);
        context.clear_rect(0.0, 0.0, f64::from(buffer.width), f64::from(buffer.height));
        context.restore();
        log::trace!("clear {}x{}", buffer.width, buffer.height);
        Ok(())
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn state(&self) -> SurfaceState {
        match (&self.attached, &self.binding) {
            (None, _) => SurfaceState::Unmounted,
            (Some(_), None) => SurfaceState::Attached,
            (Some(_), Some(_)) => SurfaceState::Ready,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached.is_some()
    }

    pub fn surface(&self) -> Option<&S> {
        self.attached.as_ref().map(|attached| &attached.handle)
    }

    pub fn surface_key(&self) -> Option<SurfaceKey> {
        self.attached.as_ref().map(|attached| attached.key)
    }

    /// Last requested logical size, bound or not.
    pub fn logical_size(&self) -> Option<LogicalSize> {
        self.requested
    }

    /// Buffer size computed by the last bind.
    pub fn physical_size(&self) -> Option<PhysicalSize> {
        self.binding.map(|binding| binding.physical)
    }

    pub fn binding(&self) -> Option<Binding> {
        self.binding
    }

    /// Scale used by the last bind, or the fallback scale if unbound.
    pub fn scale(&self) -> ScaleFactor {
        self.binding
            .map_or(self.fallback_scale, |binding| binding.scale)
    }

    /// Transform installed on the context by the last bind.
    pub fn transform(&self) -> Affine {
        self.scale().transform()
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }
}
