//! Material settings for rendering point clouds.
//!
//! A [`PointsMaterial`] travels with every generated cloud and decides how
//! the renderer draws it: sprite size, blending, whether vertex colors are
//! used, and whether the points write depth.

/// Blend mode for point rendering.
///
/// Overlapping points add up and glow. Dense galaxy cores saturate toward
/// white.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    #[default]
    Additive,
}

impl BlendMode {
    /// Convert to the wgpu blend state used by the point pipeline.
    pub fn to_wgpu_blend_state(self) -> wgpu::BlendState {
        match self {
            BlendMode::Additive => wgpu::BlendState {
                color: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::SrcAlpha,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
                alpha: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::One,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
            },
        }
    }
}

/// Rendering attributes of a point cloud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointsMaterial {
    /// Sprite size. With attenuation this is in world units, otherwise pixels.
    pub size: f32,
    /// Shrink sprites with distance from the camera.
    pub size_attenuation: bool,
    pub blend: BlendMode,
    /// Use per-point colors. When off, points are drawn white.
    pub vertex_colors: bool,
    pub depth_write: bool,
}

impl PointsMaterial {
    /// The glowing star material used for galaxies.
    pub fn galaxy(size: f32) -> Self {
        Self {
            size,
            size_attenuation: true,
            blend: BlendMode::Additive,
            vertex_colors: true,
            depth_write: false,
        }
    }

    /// Pipeline-relevant state. Materials sharing a key share a pipeline.
    pub fn pipeline_key(&self) -> PipelineKey {
        PipelineKey {
            blend: self.blend,
            depth_write: self.depth_write,
        }
    }
}

impl Default for PointsMaterial {
    fn default() -> Self {
        Self::galaxy(0.01)
    }
}

/// The part of a material that is baked into a render pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineKey {
    pub blend: BlendMode,
    pub depth_write: bool,
}
