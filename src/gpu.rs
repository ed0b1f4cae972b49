//! GPU state and render passes.
//!
//! Owns the wgpu surface, pipelines, and device-resident buffers. Generated
//! fields are uploaded once per generation; every frame the render pass
//! writes fresh uniform blocks from the scene's [`FrameSnapshot`] and draws
//! the star layers, the galaxy points, and the core sprite as instanced
//! billboard quads.

use std::sync::Arc;

use bytemuck::Zeroable;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::error::GpuError;
use crate::galaxy::GalaxyField;
use crate::scene::FrameSnapshot;
use crate::starfield::{StarLayer, BACKGROUND_LAYERS};
use crate::uniforms::{GalaxyUniforms, LayerUniforms};

/// Galaxy point shader source.
pub const GALAXY_SHADER: &str = include_str!("shader.wgsl");
/// Star layer / core sprite shader source.
pub const STARFIELD_SHADER: &str = include_str!("starfield.wgsl");

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Night-sky clear color (#000510).
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0196,
    b: 0.0627,
    a: 1.0,
};

/// Device-resident buffers for one generated galaxy field.
///
/// Release is explicit and idempotent: the first [`GalaxyBuffers::release`]
/// destroys the buffers, later calls are no-ops. Regeneration goes through
/// release first so old buffers are never leaked.
#[derive(Debug)]
pub struct GalaxyBuffers {
    buffers: Option<FieldBuffers>,
    count: u32,
}

#[derive(Debug)]
struct FieldBuffers {
    positions: wgpu::Buffer,
    colors: wgpu::Buffer,
    scales: wgpu::Buffer,
}

impl GalaxyBuffers {
    fn upload(device: &wgpu::Device, field: &GalaxyField) -> Self {
        let positions = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Galaxy Positions"),
            contents: bytemuck::cast_slice(&field.positions),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let colors = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Galaxy Colors"),
            contents: bytemuck::cast_slice(&field.colors),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let scales = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Galaxy Scales"),
            contents: bytemuck::cast_slice(&field.scales),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            buffers: Some(FieldBuffers {
                positions,
                colors,
                scales,
            }),
            count: field.len() as u32,
        }
    }

    /// Destroy the device buffers. Safe to call more than once.
    pub fn release(&mut self) {
        if let Some(buffers) = self.buffers.take() {
            buffers.positions.destroy();
            buffers.colors.destroy();
            buffers.scales.destroy();
            self.count = 0;
        }
    }

    /// Whether the buffers have been released.
    pub fn is_released(&self) -> bool {
        self.buffers.is_none()
    }
}

/// All GPU-side state for the scene window.
pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    galaxy_pipeline: wgpu::RenderPipeline,
    layer_pipeline: wgpu::RenderPipeline,
    galaxy_uniform_buffer: wgpu::Buffer,
    galaxy_bind_group: wgpu::BindGroup,
    // One uniform buffer + bind group per star layer, plus one for the core.
    layer_uniform_buffers: Vec<wgpu::Buffer>,
    layer_bind_groups: Vec<wgpu::BindGroup>,
    star_buffers: Vec<(wgpu::Buffer, u32)>,
    core_buffer: wgpu::Buffer,
    galaxy: GalaxyBuffers,
    depth_texture: wgpu::TextureView,
}

impl GpuState {
    /// Initialize the surface, device, pipelines, and static buffers.
    pub async fn new(
        window: Arc<Window>,
        field: &GalaxyField,
        layers: &[StarLayer; 3],
    ) -> Result<Self, GpuError> {
        let size = window.inner_size();

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
            .await
            .map_err(|_| GpuError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                trace: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture = create_depth_texture(&device, &config);

        // Shared bind group layout: one uniform block per pass.
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Uniform Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let galaxy_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Galaxy Uniform Buffer"),
            contents: bytemuck::cast_slice(&[GalaxyUniforms::zeroed()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let galaxy_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Galaxy Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: galaxy_uniform_buffer.as_entire_binding(),
            }],
        });

        // Star layers and the core share the layer pipeline; each draw gets
        // its own uniform block.
        let mut layer_uniform_buffers = Vec::with_capacity(layers.len() + 1);
        let mut layer_bind_groups = Vec::with_capacity(layers.len() + 1);
        for i in 0..layers.len() + 1 {
            let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Layer Uniform Buffer"),
                contents: bytemuck::cast_slice(&[LayerUniforms::zeroed()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(if i < layers.len() {
                    "Star Layer Bind Group"
                } else {
                    "Core Bind Group"
                }),
                layout: &bind_group_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            });
            layer_uniform_buffers.push(buffer);
            layer_bind_groups.push(bind_group);
        }

        let star_buffers = layers
            .iter()
            .map(|layer| {
                let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Star Layer Buffer"),
                    contents: bytemuck::cast_slice(&layer.positions),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                (buffer, layer.len() as u32)
            })
            .collect();

        // The core is a single instance at the origin.
        let core_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Core Buffer"),
            contents: bytemuck::cast_slice(&[0.0f32, 0.0, 0.0]),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Render Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let galaxy_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Galaxy Shader"),
            source: wgpu::ShaderSource::Wgsl(GALAXY_SHADER.into()),
        });
        let starfield_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Starfield Shader"),
            source: wgpu::ShaderSource::Wgsl(STARFIELD_SHADER.into()),
        });

        // Additive blending carries the galaxy's glow; layers use plain
        // alpha blending like any dim background.
        let additive = wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
        };

        let galaxy_pipeline = create_billboard_pipeline(
            &device,
            &pipeline_layout,
            &galaxy_shader,
            config.format,
            additive,
            &[
                wgpu::VertexBufferLayout {
                    array_stride: 12,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &[wgpu::VertexAttribute {
                        offset: 0,
                        shader_location: 0,
                        format: wgpu::VertexFormat::Float32x3,
                    }],
                },
                wgpu::VertexBufferLayout {
                    array_stride: 12,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &[wgpu::VertexAttribute {
                        offset: 0,
                        shader_location: 1,
                        format: wgpu::VertexFormat::Float32x3,
                    }],
                },
                wgpu::VertexBufferLayout {
                    array_stride: 4,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &[wgpu::VertexAttribute {
                        offset: 0,
                        shader_location: 2,
                        format: wgpu::VertexFormat::Float32,
                    }],
                },
            ],
        );

        let layer_pipeline = create_billboard_pipeline(
            &device,
            &pipeline_layout,
            &starfield_shader,
            config.format,
            wgpu::BlendState::ALPHA_BLENDING,
            &[wgpu::VertexBufferLayout {
                array_stride: 12,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                }],
            }],
        );

        let galaxy = GalaxyBuffers::upload(&device, field);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            galaxy_pipeline,
            layer_pipeline,
            galaxy_uniform_buffer,
            galaxy_bind_group,
            layer_uniform_buffers,
            layer_bind_groups,
            star_buffers,
            core_buffer,
            galaxy,
            depth_texture,
        })
    }

    /// Reconfigure the surface after a window resize.
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_texture = create_depth_texture(&self.device, &self.config);
        }
    }

    /// Current surface aspect ratio.
    pub fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }

    /// Replace the galaxy field, releasing the previous buffers first.
    pub fn regenerate(&mut self, field: &GalaxyField) {
        self.galaxy.release();
        self.galaxy = GalaxyBuffers::upload(&self.device, field);
    }

    /// Release the galaxy buffers. Idempotent; rendering afterward draws
    /// only the background.
    pub fn release(&mut self) {
        self.galaxy.release();
    }

    /// Render one frame from the scene snapshot.
    pub fn render(&mut self, snapshot: &FrameSnapshot) -> Result<(), wgpu::SurfaceError> {
        self.queue.write_buffer(
            &self.galaxy_uniform_buffer,
            0,
            bytemuck::cast_slice(&[GalaxyUniforms::from_snapshot(snapshot)]),
        );
        for (i, params) in BACKGROUND_LAYERS.iter().enumerate() {
            self.queue.write_buffer(
                &self.layer_uniform_buffers[i],
                0,
                bytemuck::cast_slice(&[LayerUniforms::star_layer(snapshot, i, params)]),
            );
        }
        self.queue.write_buffer(
            &self.layer_uniform_buffers[BACKGROUND_LAYERS.len()],
            0,
            bytemuck::cast_slice(&[LayerUniforms::core(snapshot)]),
        );

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // Far to near: star layers, galaxy points, core sprite.
            render_pass.set_pipeline(&self.layer_pipeline);
            for (i, (buffer, count)) in self.star_buffers.iter().enumerate() {
                render_pass.set_bind_group(0, &self.layer_bind_groups[i], &[]);
                render_pass.set_vertex_buffer(0, buffer.slice(..));
                render_pass.draw(0..6, 0..*count);
            }

            if let Some(buffers) = &self.galaxy.buffers {
                render_pass.set_pipeline(&self.galaxy_pipeline);
                render_pass.set_bind_group(0, &self.galaxy_bind_group, &[]);
                render_pass.set_vertex_buffer(0, buffers.positions.slice(..));
                render_pass.set_vertex_buffer(1, buffers.colors.slice(..));
                render_pass.set_vertex_buffer(2, buffers.scales.slice(..));
                render_pass.draw(0..6, 0..self.galaxy.count);
            }

            render_pass.set_pipeline(&self.layer_pipeline);
            render_pass.set_bind_group(
                0,
                &self.layer_bind_groups[BACKGROUND_LAYERS.len()],
                &[],
            );
            render_pass.set_vertex_buffer(0, self.core_buffer.slice(..));
            render_pass.draw(0..6, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn create_billboard_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    blend: wgpu::BlendState,
    buffers: &[wgpu::VertexBufferLayout],
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Billboard Pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(blend),
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
            depth_write_enabled: false,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

fn create_depth_texture(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
