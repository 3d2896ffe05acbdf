//! Regeneration policy of the viewport.
//!
//! [`GalaxyHost`] owns the single [`GalaxyParams`], the scene slot, and the
//! uploader that turns clouds into drawable points. Control-panel events
//! arrive as [`ParamChange`]s; only settled ones (`last == true`) trigger a
//! regeneration, and they are handled strictly in arrival order.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::color::Color;
use crate::error::ColorParseError;
use crate::galaxy;
use crate::params::{GalaxyParams, ParamField};
use crate::scene::{PointsUploader, Scene};

/// A parameter edit reported by the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamChange {
    pub field: ParamField,
    /// `true` once the gesture is over (drag released, text committed).
    pub last: bool,
}

impl ParamChange {
    pub fn provisional(field: ParamField) -> Self {
        Self { field, last: false }
    }

    pub fn settled(field: ParamField) -> Self {
        Self { field, last: true }
    }
}

/// Owns the parameters and the live galaxy, and regenerates on demand.
pub struct GalaxyHost<U: PointsUploader> {
    params: GalaxyParams,
    colors: (Color, Color),
    scene: Scene<U::Points>,
    uploader: U,
    regenerations: u64,
    last_generation: Option<Duration>,
}

impl<U: PointsUploader> GalaxyHost<U> {
    /// Create the host and generate the first galaxy.
    ///
    /// Fails only if the initial colors cannot be parsed.
    pub fn new(params: GalaxyParams, uploader: U) -> Result<Self, ColorParseError> {
        let colors = params.colors()?;
        let mut host = Self {
            params,
            colors,
            scene: Scene::new(),
            uploader,
            regenerations: 0,
            last_generation: None,
        };
        host.regenerate();
        Ok(host)
    }

    pub fn params(&self) -> &GalaxyParams {
        &self.params
    }

    /// Mutable access for the control panel. Edits take effect on the next
    /// settled change or explicit [`regenerate`](Self::regenerate).
    pub fn params_mut(&mut self) -> &mut GalaxyParams {
        &mut self.params
    }

    pub fn scene(&self) -> &Scene<U::Points> {
        &self.scene
    }

    pub fn uploader_mut(&mut self) -> &mut U {
        &mut self.uploader
    }

    /// Split borrow for rendering: the uploader (renderer) plus the scene it draws.
    pub fn renderer_and_scene(&mut self) -> (&mut U, &Scene<U::Points>) {
        (&mut self.uploader, &self.scene)
    }

    /// Number of galaxies generated so far, including the initial one.
    pub fn regenerations(&self) -> u64 {
        self.regenerations
    }

    pub fn last_generation_time(&self) -> Option<Duration> {
        self.last_generation
    }

    /// Handle one control-panel event. Returns whether it regenerated.
    pub fn apply(&mut self, change: &ParamChange) -> bool {
        if !change.last {
            return false;
        }
        debug!(field = change.field.label(), "settled parameter change");
        self.regenerate();
        true
    }

    /// Handle events in arrival order. Returns the number of regenerations.
    pub fn apply_all<I>(&mut self, changes: I) -> usize
    where
        I: IntoIterator<Item = ParamChange>,
    {
        changes
            .into_iter()
            .filter(|change| self.apply(change))
            .count()
    }

    /// Build a new galaxy from the current parameters and make it live.
    ///
    /// The previous cloud is disposed and detached before the new one is
    /// generated, so at most one cloud holds GPU memory at a time. It is
    /// returned for inspection.
    pub fn regenerate(&mut self) -> Option<U::Points> {
        self.resolve_colors();
        let (inside, outside) = self.colors;
        let old = self.scene.clear();

        let started = Instant::now();
        let cloud = galaxy::generate_with_colors(
            &self.params,
            inside,
            outside,
            &mut rand::thread_rng(),
        );
        let points = self.uploader.upload(&cloud);
        self.scene.replace(points);
        let elapsed = started.elapsed();

        self.regenerations += 1;
        self.last_generation = Some(elapsed);
        info!(
            count = cloud.len(),
            branches = self.params.branches,
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "galaxy generated"
        );
        old
    }

    /// Dispose the live galaxy. Used on shutdown.
    pub fn teardown(&mut self) {
        if self.scene.clear().is_some() {
            debug!("live galaxy disposed");
        }
    }

    /// Parse the color strings, keeping the last valid color for any that fail.
    fn resolve_colors(&mut self) {
        match self.params.inside_color.parse() {
            Ok(color) => self.colors.0 = color,
            Err(e) => warn!(error = %e, "keeping previous inside color"),
        }
        match self.params.outside_color.parse() {
            Ok(color) => self.colors.1 = color,
            Err(e) => warn!(error = %e, "keeping previous outside color"),
        }
    }
}
