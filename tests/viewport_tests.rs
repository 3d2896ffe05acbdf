//! Resize handling: viewport, pixel ratio cap and camera aspect.

use galaxy::viewport::{SurfaceSize, DEFAULT_MAX_PIXEL_RATIO};
use galaxy::{PerspectiveCamera, Viewport};
use winit::dpi::PhysicalSize;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn test_resize_updates_camera_aspect_and_surface() {
    let mut viewport = Viewport::new(1280.0, 720.0, 1.0);
    let mut camera = PerspectiveCamera::new(75.0, viewport.aspect());
    let before = camera.projection_matrix();

    // 1000x500 logical at 1.5x
    let surface = viewport.resize(PhysicalSize::new(1500, 750), 1.5);
    camera.set_aspect(viewport.aspect());

    assert!(close(camera.aspect, 2.0));
    assert_ne!(camera.projection_matrix(), before);
    assert_eq!(
        surface,
        SurfaceSize {
            width: 1500,
            height: 750
        }
    );
}

#[test]
fn test_dense_displays_are_capped() {
    let mut viewport = Viewport::new(800.0, 600.0, 1.0);
    // 800x600 logical at 3x
    let surface = viewport.resize(PhysicalSize::new(2400, 1800), 3.0);

    assert_eq!(DEFAULT_MAX_PIXEL_RATIO, 2.0);
    assert_eq!(viewport.pixel_ratio(), 2.0);
    assert_eq!(
        surface,
        SurfaceSize {
            width: 1600,
            height: 1200
        }
    );
    assert!(close(viewport.aspect(), 800.0 / 600.0));
}

#[test]
fn test_swapchain_keeps_full_window_size_when_capped() {
    let mut viewport = Viewport::new(800.0, 600.0, 1.0);
    viewport.resize(PhysicalSize::new(2400, 1800), 3.0);

    assert_eq!(
        viewport.window_size(),
        SurfaceSize {
            width: 2400,
            height: 1800
        }
    );
    assert_eq!(
        viewport.surface_size(),
        SurfaceSize {
            width: 1600,
            height: 1200
        }
    );
}

#[test]
fn test_window_and_drawing_sizes_agree_below_the_cap() {
    let mut viewport = Viewport::new(800.0, 600.0, 1.0);
    viewport.resize(PhysicalSize::new(1500, 750), 1.5);
    assert_eq!(viewport.window_size(), viewport.surface_size());
}

#[test]
fn test_low_density_is_not_upscaled() {
    let mut viewport = Viewport::new(800.0, 600.0, 2.0);
    viewport.resize(PhysicalSize::new(1024, 768), 1.0);
    assert_eq!(viewport.pixel_ratio(), 1.0);
    assert_eq!(
        viewport.surface_size(),
        SurfaceSize {
            width: 1024,
            height: 768
        }
    );
}

#[test]
fn test_minimized_window_keeps_a_valid_aspect() {
    let mut viewport = Viewport::new(800.0, 600.0, 1.0);
    viewport.resize(PhysicalSize::new(0, 0), 1.0);
    assert!(viewport.is_collapsed());
    assert_eq!(viewport.aspect(), 1.0);
}

#[test]
fn test_camera_defaults() {
    let camera = PerspectiveCamera::new(75.0, 1.0);
    assert_eq!(camera.near, 0.1);
    assert_eq!(camera.far, 100.0);
    assert_eq!(camera.position, glam::Vec3::new(5.0, 5.0, 0.0));
}
