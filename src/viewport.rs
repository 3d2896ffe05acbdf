//! Viewport sizing and the device pixel ratio cap.
//!
//! The galaxy is drawn at the logical window size times the host scale
//! factor, with the scale capped (2 by default) to bound fill cost on
//! high-DPI displays. The swapchain itself always matches the window's
//! physical size; see [`Viewport::window_size`].

use winit::dpi::PhysicalSize;

/// Cap applied to the host scale factor unless configured otherwise.
pub const DEFAULT_MAX_PIXEL_RATIO: f64 = 2.0;

/// Drawing surface dimensions in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

/// Logical viewport size and host pixel density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Logical width.
    pub width: f64,
    /// Logical height.
    pub height: f64,
    /// Host scale factor (device pixel ratio).
    pub scale_factor: f64,
    pub max_pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, scale_factor: f64) -> Self {
        Self {
            width,
            height,
            scale_factor,
            max_pixel_ratio: DEFAULT_MAX_PIXEL_RATIO,
        }
    }

    pub fn with_max_pixel_ratio(mut self, max: f64) -> Self {
        self.max_pixel_ratio = max;
        self
    }

    /// Viewport from a window's physical size and scale factor.
    pub fn from_physical(size: PhysicalSize<u32>, scale_factor: f64) -> Self {
        let logical = size.to_logical::<f64>(scale_factor);
        Self::new(logical.width, logical.height, scale_factor)
    }

    /// Effective pixel ratio: `min(scale_factor, max_pixel_ratio)`.
    pub fn pixel_ratio(&self) -> f64 {
        self.scale_factor.min(self.max_pixel_ratio)
    }

    /// Camera aspect ratio. A collapsed viewport reports 1.
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            (self.width / self.height) as f32
        } else {
            1.0
        }
    }

    /// Drawing buffer size for the current pixel ratio, never smaller than 1x1.
    pub fn surface_size(&self) -> SurfaceSize {
        self.scaled(self.pixel_ratio())
    }

    /// The window's physical size, uncapped.
    pub fn window_size(&self) -> SurfaceSize {
        self.scaled(self.scale_factor)
    }

    fn scaled(&self, ratio: f64) -> SurfaceSize {
        SurfaceSize {
            width: ((self.width * ratio).round() as u32).max(1),
            height: ((self.height * ratio).round() as u32).max(1),
        }
    }

    /// Whether the window is minimized or otherwise has no area.
    pub fn is_collapsed(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Apply a resize or scale-factor change reported by the window.
    pub fn resize(&mut self, size: PhysicalSize<u32>, scale_factor: f64) -> SurfaceSize {
        let logical = size.to_logical::<f64>(scale_factor);
        self.width = logical.width;
        self.height = logical.height;
        self.scale_factor = scale_factor;
        self.surface_size()
    }
}
