//! Viewer builder and runner

use tracing::info;
use winit::event_loop::{ControlFlow, EventLoop};

use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::params::GalaxyParams;
use crate::window::App;

/// An interactive galaxy viewer.
///
/// Use method chaining to configure, then call `.run()` to open the window.
#[derive(Debug, Clone, Default)]
pub struct Viewer {
    config: ViewerConfig,
    params: GalaxyParams,
}

impl Viewer {
    /// Create a viewer with default window settings and galaxy parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window and camera configuration.
    pub fn with_config(mut self, config: ViewerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the galaxy parameters shown on startup.
    pub fn with_params(mut self, params: GalaxyParams) -> Self {
        self.params = params;
        self
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn params(&self) -> &GalaxyParams {
        &self.params
    }

    /// Run the viewer. This blocks until the window is closed.
    ///
    /// Configuration and initial colors are checked before any window is
    /// created.
    pub fn run(self) -> Result<(), ViewerError> {
        self.config.validate()?;
        self.params.colors()?;

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self.config, self.params);
        event_loop.run_app(&mut app)?;

        match app.take_error() {
            Some(e) => Err(e),
            None => {
                info!("viewer closed");
                Ok(())
            }
        }
    }
}
