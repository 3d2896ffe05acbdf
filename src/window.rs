//! The viewer window: winit event handling and the per-frame pipeline.
//!
//! Each redraw runs, in order: keyboard shortcuts, pointer input into the
//! orbit controls, damped camera update, the control panel, regeneration
//! for settled changes, and finally rendering. Regeneration therefore
//! always completes before the frame that shows it is drawn.

use std::sync::Arc;

use glam::Vec3;
use tracing::{debug, error, info, warn};
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{MouseButton, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::KeyCode,
    window::{Fullscreen, Window, WindowId},
};

use crate::config::ViewerConfig;
use crate::controls::OrbitControls;
use crate::error::ViewerError;
use crate::gpu::camera::PerspectiveCamera;
use crate::gpu::egui_integration::EguiIntegration;
use crate::gpu::GpuState;
use crate::host::GalaxyHost;
use crate::input::Input;
use crate::panel::{ControlPanel, PanelStats};
use crate::params::GalaxyParams;
use crate::render_loop::{LoopControl, RenderLoop};
use crate::time::FrameClock;
use crate::viewport::Viewport;

/// Everything that exists once the window is open.
struct Running {
    window: Arc<Window>,
    viewport: Viewport,
    host: GalaxyHost<GpuState>,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    egui: EguiIntegration,
    panel: ControlPanel,
    input: Input,
    clock: FrameClock,
}

impl Running {
    /// Run one frame. Only an unrecoverable surface error is returned.
    fn frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.handle_shortcuts();
        self.apply_pointer();
        self.controls.update(&mut self.camera);

        let stats = PanelStats {
            points: self.host.scene().live().map_or(0, |p| p.count() as usize),
            generation_ms: self
                .host
                .last_generation_time()
                .map_or(0.0, |d| d.as_secs_f64() * 1000.0),
            fps: self.clock.fps(),
        };

        let panel = &mut self.panel;
        let params = self.host.params_mut();
        let mut changes = Vec::new();
        let egui_output = self.egui.run(&self.window, |ctx| {
            changes.extend(panel.show(ctx, params, stats));
        });
        // egui may run the UI twice in one frame
        changes.dedup();
        self.host.apply_all(changes);

        let pixel_ratio = self.viewport.pixel_ratio() as f32;
        let (gpu, scene) = self.host.renderer_and_scene();
        match gpu.render(
            &self.camera,
            scene.live(),
            pixel_ratio,
            &mut self.egui,
            &egui_output,
        ) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                debug!("surface lost, reconfiguring");
                gpu.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                return Err(wgpu::SurfaceError::OutOfMemory);
            }
            Err(e) => warn!(error = %e, "frame dropped"),
        }

        self.clock.tick();
        self.input.begin_frame();
        Ok(())
    }

    fn handle_shortcuts(&mut self) {
        let typing = self.egui.wants_keyboard();

        if !typing && self.input.key_pressed(KeyCode::KeyH) {
            self.panel.toggle();
        }
        if self.input.key_pressed(KeyCode::Escape) && self.window.fullscreen().is_some() {
            self.window.set_fullscreen(None);
            debug!("left fullscreen");
        }
        if self.input.double_clicked() && !self.egui.wants_pointer() {
            self.toggle_fullscreen();
        }
    }

    fn toggle_fullscreen(&self) {
        if self.window.fullscreen().is_some() {
            self.window.set_fullscreen(None);
            debug!("left fullscreen");
        } else {
            self.window
                .set_fullscreen(Some(Fullscreen::Borderless(None)));
            debug!("entered fullscreen");
        }
    }

    /// Left drag orbits, right drag pans, the wheel dollies.
    fn apply_pointer(&mut self) {
        if self.egui.wants_pointer() {
            return;
        }
        let delta = self.input.cursor_delta();
        let height = self.viewport.height as f32;

        if self.input.mouse_held(MouseButton::Left) {
            self.controls.rotate(delta, height);
        } else if self.input.mouse_held(MouseButton::Right) {
            self.controls.pan(delta, height, &self.camera);
        }

        let scroll = self.input.scroll_delta();
        if scroll != 0.0 {
            self.controls.dolly(scroll);
        }
    }

    fn resize(&mut self, size: PhysicalSize<u32>, scale_factor: f64) {
        let surface = self.viewport.resize(size, scale_factor);
        self.input.set_scale_factor(scale_factor);
        if self.viewport.is_collapsed() {
            debug!("viewport collapsed, keeping previous surface");
            return;
        }

        self.camera.set_aspect(self.viewport.aspect());
        let window_size = self.viewport.window_size();
        self.host.uploader_mut().resize(window_size, surface);
        debug!(
            width = window_size.width,
            height = window_size.height,
            scene_width = surface.width,
            scene_height = surface.height,
            pixel_ratio = self.viewport.pixel_ratio(),
            "viewport resized"
        );
    }
}

/// winit application driving the viewer.
pub(crate) struct App {
    config: ViewerConfig,
    params: Option<GalaxyParams>,
    running: Option<Running>,
    render_loop: RenderLoop,
    error: Option<ViewerError>,
}

impl App {
    pub(crate) fn new(config: ViewerConfig, params: GalaxyParams) -> Self {
        Self {
            config,
            params: Some(params),
            running: None,
            render_loop: RenderLoop::new(),
            error: None,
        }
    }

    /// The error that ended the event loop, if any.
    pub(crate) fn take_error(&mut self) -> Option<ViewerError> {
        self.error.take()
    }

    fn open(&mut self, event_loop: &ActiveEventLoop) -> Result<Running, ViewerError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let viewport = Viewport::from_physical(window.inner_size(), window.scale_factor())
            .with_max_pixel_ratio(self.config.max_pixel_ratio);
        let background = self.config.background_color()?;

        let gpu = pollster::block_on(GpuState::new(
            window.clone(),
            viewport.window_size(),
            viewport.surface_size(),
            background.into(),
        ))?;
        let egui = EguiIntegration::new(gpu.device(), gpu.format(), &window);

        let params = self.params.take().unwrap_or_default();
        let host = GalaxyHost::new(params, gpu)?;

        let mut camera = PerspectiveCamera::new(self.config.fov, viewport.aspect());
        camera.position = self.config.camera_position();
        let controls = OrbitControls::new(Vec3::ZERO).with_damping(self.config.damping);

        info!(
            title = %self.config.title,
            width = viewport.width,
            height = viewport.height,
            pixel_ratio = viewport.pixel_ratio(),
            "viewer started"
        );

        Ok(Running {
            input: Input::new(window.scale_factor()),
            window,
            viewport,
            host,
            camera,
            controls,
            egui,
            panel: ControlPanel::new(self.config.show_panel),
            clock: FrameClock::new(),
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, e: ViewerError) {
        error!(error = %e, "viewer stopped");
        self.render_loop.stop_handle().stop();
        self.error = Some(e);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        match self.open(event_loop) {
            Ok(running) => {
                running.window.request_redraw();
                self.running = Some(running);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(running) = self.running.as_mut() else {
            return;
        };

        running.egui.on_window_event(&running.window, &event);
        // Button releases must reach Input even over the panel, so pointer
        // gating happens per frame instead
        running.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                self.render_loop.stop_handle().stop();
                running.host.teardown();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                let scale_factor = running.window.scale_factor();
                running.resize(size, scale_factor);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                let size = running.window.inner_size();
                running.resize(size, scale_factor);
            }
            WindowEvent::RedrawRequested => {
                let mut result = Ok(());
                let control = self.render_loop.tick(|| result = running.frame());
                if let Err(e) = result {
                    error!(error = %e, "surface out of memory");
                    running.host.teardown();
                    self.render_loop.stop_handle().stop();
                    event_loop.exit();
                    return;
                }
                if control == LoopControl::Continue {
                    running.window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
