use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::visuals::PointsMaterial;

pub const SHADER_SOURCE: &str = include_str!("points.wgsl");
/// Full-screen pass copying the scene target onto the swapchain.
pub const UPSCALE_SHADER_SOURCE: &str = include_str!("upscale.wgsl");

/// Per-frame camera data, bind group 0.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct CameraUniforms {
    pub view_proj: [[f32; 4]; 4],
    /// Scene target width and height in device pixels, pixel ratio, unused.
    pub viewport: [f32; 4],
}

impl CameraUniforms {
    pub fn new(view_proj: Mat4, width: u32, height: u32, pixel_ratio: f32) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            viewport: [width as f32, height as f32, pixel_ratio, 0.0],
        }
    }
}

/// Per-cloud material data, bind group 1.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct MaterialUniforms {
    pub size: f32,
    pub size_attenuation: u32,
    pub vertex_colors: u32,
    pub _pad: u32,
}

impl From<&PointsMaterial> for MaterialUniforms {
    fn from(material: &PointsMaterial) -> Self {
        Self {
            size: material.size,
            size_attenuation: material.size_attenuation as u32,
            vertex_colors: material.vertex_colors as u32,
            _pad: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_sizes_match_wgsl_layout() {
        assert_eq!(std::mem::size_of::<CameraUniforms>(), 80);
        assert_eq!(std::mem::size_of::<MaterialUniforms>(), 16);
    }

    #[test]
    fn test_material_flags() {
        let uniforms = MaterialUniforms::from(&PointsMaterial::galaxy(0.05));
        assert_eq!(uniforms.size, 0.05);
        assert_eq!(uniforms.size_attenuation, 1);
        assert_eq!(uniforms.vertex_colors, 1);
    }

    #[test]
    fn test_camera_viewport() {
        let uniforms = CameraUniforms::new(Mat4::IDENTITY, 1600, 900, 2.0);
        assert_eq!(uniforms.viewport, [1600.0, 900.0, 2.0, 0.0]);
        assert_eq!(uniforms.view_proj[3][3], 1.0);
    }
}
