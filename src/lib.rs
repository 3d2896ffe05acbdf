//! # galaxy - procedural particle galaxies
//!
//! Generates a spiral galaxy as a cloud of colored points and shows it in a
//! wgpu viewport with orbit controls and a live control panel.
//!
//! ## Quick Start
//!
//! ```ignore
//! use galaxy::prelude::*;
//!
//! fn main() -> Result<(), ViewerError> {
//!     Viewer::new()
//!         .with_params(GalaxyParams {
//!             branches: 5,
//!             spin: -1.5,
//!             ..Default::default()
//!         })
//!         .run()
//! }
//! ```
//!
//! ## Generation
//!
//! [`generate`] places `count` particles on `branches` evenly spaced arms at
//! a uniformly random radius, twists each arm by `spin` radians per unit of
//! radius, and jitters every axis by `uniform^randomness_power * ±1 *
//! randomness`. Colors fade from `inside_color` at the core to
//! `outside_color` at the rim. Use [`generate_with`] and a seeded RNG for
//! reproducible clouds:
//!
//! ```ignore
//! use rand::{rngs::SmallRng, SeedableRng};
//!
//! let cloud = galaxy::generate_with(&GalaxyParams::default(), &mut SmallRng::seed_from_u64(1))?;
//! assert_eq!(cloud.len(), 100_000);
//! ```
//!
//! ## Regeneration
//!
//! The control panel edits the single [`GalaxyParams`] in place and reports
//! every edit as a [`ParamChange`]. [`GalaxyHost`] ignores provisional edits
//! (a slider still being dragged) and regenerates once per settled edit,
//! disposing the previous cloud before the new one becomes live.
//!
//! ## Viewer controls
//!
//! | Input | Action |
//! |-------|--------|
//! | Left drag | Orbit |
//! | Right drag | Pan |
//! | Wheel | Zoom |
//! | Double-click | Toggle fullscreen |
//! | Escape | Leave fullscreen |
//! | H | Show or hide the panel |

pub mod color;
pub mod config;
pub mod controls;
pub mod error;
pub mod galaxy;
pub mod gpu;
pub mod host;
pub mod input;
pub mod panel;
pub mod params;
pub mod render_loop;
pub mod scene;
pub mod shader;
pub mod time;
mod viewer;
pub mod viewport;
pub mod visuals;
mod window;

pub use color::Color;
pub use config::ViewerConfig;
pub use controls::OrbitControls;
pub use error::{ColorParseError, ConfigError, GpuError, ViewerError};
pub use galaxy::{generate, generate_with, generate_with_colors, PointCloud, PointVertex};
pub use glam::{Vec2, Vec3};
pub use gpu::camera::PerspectiveCamera;
pub use host::{GalaxyHost, ParamChange};
pub use params::{GalaxyParams, ParamField};
pub use render_loop::{LoopControl, RenderLoop, StopHandle};
pub use scene::{Dispose, PointsUploader, Scene};
pub use viewer::Viewer;
pub use viewport::Viewport;
pub use visuals::{BlendMode, PointsMaterial};

/// Convenient imports for embedding the viewer.
///
/// ```ignore
/// use galaxy::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Color;
    pub use crate::config::ViewerConfig;
    pub use crate::error::ViewerError;
    pub use crate::galaxy::{generate, generate_with, PointCloud};
    pub use crate::host::ParamChange;
    pub use crate::params::{GalaxyParams, ParamField};
    pub use crate::viewer::Viewer;
    pub use crate::{Vec2, Vec3};
}
