pub mod camera;
pub mod egui_integration;
pub mod scene_target;

use std::collections::HashMap;
use std::sync::Arc;

use bytemuck::Zeroable;
use tracing::{debug, info};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::error::GpuError;
use crate::galaxy::{PointCloud, PointVertex};
use crate::scene::{Dispose, PointsUploader};
use crate::shader::{CameraUniforms, MaterialUniforms, SHADER_SOURCE};
use crate::viewport::SurfaceSize;
use crate::visuals::{PipelineKey, PointsMaterial};

use camera::PerspectiveCamera;
use egui_integration::{EguiFrameOutput, EguiIntegration};
use scene_target::SceneTarget;

pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
/// Vertices per point sprite (two triangles).
const QUAD_VERTICES: u32 = 6;

/// A point cloud living in GPU memory.
///
/// Buffers are released by [`Dispose::dispose`]; a disposed cloud is never
/// drawn again.
#[derive(Debug)]
pub struct GpuPoints {
    vertex_buffer: wgpu::Buffer,
    material_buffer: wgpu::Buffer,
    material_bind_group: wgpu::BindGroup,
    count: u32,
    material: PointsMaterial,
    disposed: bool,
}

impl GpuPoints {
    pub fn count(&self) -> u32 {
        self.count
    }
}

impl Dispose for GpuPoints {
    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.vertex_buffer.destroy();
        self.material_buffer.destroy();
        self.disposed = true;
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    scene_target: SceneTarget,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    material_bind_group_layout: wgpu::BindGroupLayout,
    pipeline_layout: wgpu::PipelineLayout,
    shader: wgpu::ShaderModule,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
    background: wgpu::Color,
}

impl GpuState {
    /// `window_size` is the window's full physical size and sizes the
    /// swapchain; `scene_size` is the capped resolution points render at.
    pub async fn new(
        window: Arc<Window>,
        window_size: SurfaceSize,
        scene_size: SurfaceSize,
        background: wgpu::Color,
    ) -> Result<Self, GpuError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                trace: Default::default(),
            })
            .await?;

        // Colors are authored as plain 0..1 channel values; a linear target
        // shows them as written and is what egui expects
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(GpuError::NoSurfaceFormat)?;

        let adapter_info = adapter.get_info();
        info!(
            adapter = %adapter_info.name,
            backend = ?adapter_info.backend,
            format = ?surface_format,
            width = window_size.width,
            height = window_size.height,
            scene_width = scene_size.width,
            scene_height = scene_size.height,
            "gpu initialized"
        );

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: window_size.width.max(1),
            height: window_size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let scene_target = SceneTarget::new(&device, scene_size, surface_format);

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Camera Uniform Buffer"),
            size: std::mem::size_of::<CameraUniforms>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let camera_bind_group_layout = uniform_layout(&device, "Camera Bind Group Layout");
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let material_bind_group_layout = uniform_layout(&device, "Material Bind Group Layout");

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Points Shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER_SOURCE.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Points Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &material_bind_group_layout],
            push_constant_ranges: &[],
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            scene_target,
            camera_buffer,
            camera_bind_group,
            material_bind_group_layout,
            pipeline_layout,
            shader,
            pipelines: HashMap::new(),
            background,
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Resize the swapchain to the window and the scene target to the
    /// capped render size.
    ///
    /// Vulkan on X11 and Windows, and DX12, only present swapchains that
    /// match the window exactly, so the pixel ratio cap is applied to the
    /// scene target instead of the swapchain.
    pub fn resize(&mut self, window_size: SurfaceSize, scene_size: SurfaceSize) {
        if window_size.width == 0 || window_size.height == 0 {
            return;
        }
        self.config.width = window_size.width;
        self.config.height = window_size.height;
        self.reconfigure();
        self.scene_target.resize(&self.device, scene_size);
    }

    /// Reconfigure the surface at its current size, e.g. after it was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    fn ensure_pipeline(&mut self, key: PipelineKey) {
        if self.pipelines.contains_key(&key) {
            return;
        }
        debug!(blend = ?key.blend, depth_write = key.depth_write, "building point pipeline");
        let pipeline = create_points_pipeline(
            &self.device,
            &self.pipeline_layout,
            &self.shader,
            self.config.format,
            key,
        );
        self.pipelines.insert(key, pipeline);
    }

    /// Draw one frame: the live points into the scene target, the target
    /// scaled onto the swapchain, then the egui overlay at native resolution.
    pub fn render(
        &mut self,
        camera: &PerspectiveCamera,
        points: Option<&GpuPoints>,
        pixel_ratio: f32,
        egui: &mut EguiIntegration,
        egui_output: &EguiFrameOutput,
    ) -> Result<(), wgpu::SurfaceError> {
        let scene_size = self.scene_target.size();
        let uniforms = CameraUniforms::new(
            camera.view_proj(),
            scene_size.width,
            scene_size.height,
            pixel_ratio,
        );
        self.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&uniforms));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: egui_output.pixels_per_point,
        };
        // Texture uploads must not be skipped when the frame is dropped
        let egui_commands = egui.prepare(
            &self.device,
            &self.queue,
            &mut encoder,
            egui_output,
            &screen_descriptor,
        );

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(e) => {
                egui.cleanup(egui_output);
                return Err(e);
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Points pass
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Points Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: self.scene_target.view(),
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.background),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: self.scene_target.depth_view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let drawable = points.filter(|p| !p.is_disposed() && p.count > 0);
            if let Some(points) = drawable {
                if let Some(pipeline) = self.pipelines.get(&points.material.pipeline_key()) {
                    render_pass.set_pipeline(pipeline);
                    render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
                    render_pass.set_bind_group(1, &points.material_bind_group, &[]);
                    render_pass.set_vertex_buffer(0, points.vertex_buffer.slice(..));
                    render_pass.draw(0..QUAD_VERTICES, 0..points.count);
                }
            }
        }

        self.scene_target.upscale(&mut encoder, &view);

        // UI pass
        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Egui Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            egui.paint(&mut render_pass.forget_lifetime(), egui_output, &screen_descriptor);
        }

        self.queue.submit(
            egui_commands
                .into_iter()
                .chain(std::iter::once(encoder.finish())),
        );
        output.present();
        egui.cleanup(egui_output);

        Ok(())
    }
}

impl PointsUploader for GpuState {
    type Points = GpuPoints;

    fn upload(&mut self, cloud: &PointCloud) -> GpuPoints {
        let material = *cloud.material();
        self.ensure_pipeline(material.pipeline_key());

        let mut vertices = cloud.vertices();
        let count = vertices.len() as u32;
        // Vertex buffers cannot be empty; the pad vertex is never drawn
        if vertices.is_empty() {
            vertices.push(PointVertex::zeroed());
        }

        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Galaxy Vertex Buffer"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let material_uniforms = MaterialUniforms::from(&material);
        let material_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Galaxy Material Buffer"),
                contents: bytemuck::bytes_of(&material_uniforms),
                usage: wgpu::BufferUsages::UNIFORM,
            });

        let material_bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Galaxy Material Bind Group"),
            layout: &self.material_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: material_buffer.as_entire_binding(),
            }],
        });

        GpuPoints {
            vertex_buffer,
            material_buffer,
            material_bind_group,
            count,
            material,
            disposed: false,
        }
    }
}

fn uniform_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

fn create_points_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    key: PipelineKey,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Points Pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<PointVertex>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &wgpu::vertex_attr_array![
                    0 => Float32x3, // position
                    1 => Float32x3, // color
                ],
            }],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(key.blend.to_wgpu_blend_state()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: key.depth_write,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
