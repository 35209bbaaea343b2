//! wgpu display surface for the viewer.
//!
//! Draws the lit ornament meshes and the emissive topper first, then the
//! foliage as additive glow billboards that test against, but never write,
//! the depth buffer.

mod camera;
mod mesh;
mod shaders;

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use tracing::{debug, info};
use wgpu::util::DeviceExt;
use winit::window::Window;

pub use camera::Camera;
pub use mesh::{Mesh, MeshVertex};

use crate::config::SceneConfig;
use crate::error::GpuError;
use crate::foliage::PointVertex;
use crate::ornaments::{InstanceColor, InstanceTransform, OrnamentShape};
use crate::palette::{srgb_hex, NamedColor};
use crate::surface::DisplaySurface;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
/// Clear color, `#000502`.
const BACKGROUND: u32 = 0x000502;
/// Ambient light strength on the emerald ambient color.
const AMBIENT_INTENSITY: f32 = 0.1;
/// Circumradius of the topper icosahedron.
const TOPPER_RADIUS: f32 = 0.6;

const POINT_ATTRIBUTES: [wgpu::VertexAttribute; 4] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32, 2 => Float32x3, 3 => Float32];
const MESH_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
const TRANSFORM_ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
    2 => Float32x4, 3 => Float32x4, 4 => Float32x4, 5 => Float32x4
];
const COLOR_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![6 => Float32x4];

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    world_offset: [f32; 4],
    camera_position: [f32; 4],
    ambient: [f32; 4],
    viewport: [f32; 2],
    time: f32,
    _padding: f32,
}

/// GPU buffers of one instanced mesh draw.
struct InstancedMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    transform_buffer: wgpu::Buffer,
    color_buffer: wgpu::Buffer,
    capacity: usize,
    count: u32,
}

impl InstancedMesh {
    fn new(device: &wgpu::Device, label: &str, mesh: &Mesh, capacity: usize) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(format!("{label} Vertex Buffer").as_str()),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(format!("{label} Index Buffer").as_str()),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let capacity = capacity.max(1);

        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.index_count(),
            transform_buffer: instance_buffer::<InstanceTransform>(
                device,
                &format!("{label} Transform Buffer"),
                capacity,
            ),
            color_buffer: instance_buffer::<InstanceColor>(
                device,
                &format!("{label} Color Buffer"),
                capacity,
            ),
            capacity,
            count: 0,
        }
    }

    fn write_transforms(&mut self, queue: &wgpu::Queue, transforms: &[InstanceTransform]) {
        let n = transforms.len().min(self.capacity);
        queue.write_buffer(&self.transform_buffer, 0, bytemuck::cast_slice(&transforms[..n]));
        self.count = n as u32;
    }

    fn write_colors(&self, queue: &wgpu::Queue, colors: &[InstanceColor]) {
        let n = colors.len().min(self.capacity);
        queue.write_buffer(&self.color_buffer, 0, bytemuck::cast_slice(&colors[..n]));
    }

    fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.count == 0 {
            return;
        }
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_vertex_buffer(1, self.transform_buffer.slice(..));
        pass.set_vertex_buffer(2, self.color_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..self.index_count, 0, 0..self.count);
    }
}

/// The window-backed display surface.
pub struct GpuSurface {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    depth_texture: wgpu::TextureView,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    point_pipeline: wgpu::RenderPipeline,
    mesh_pipeline: wgpu::RenderPipeline,
    emissive_pipeline: wgpu::RenderPipeline,
    point_buffer: wgpu::Buffer,
    point_capacity: usize,
    point_count: u32,
    populations: Vec<InstancedMesh>,
    topper: InstancedMesh,
    pub camera: Camera,
    world_offset: Vec3,
    elapsed: f32,
    /// False while the window has a zero-sized client area.
    visible: bool,
}

impl GpuSurface {
    /// Set up the device, pipelines and buffers sized for `scene`.
    pub async fn new(window: Arc<Window>, scene: &SceneConfig) -> Result<Self, GpuError> {
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
            .await?;
        info!(adapter = %adapter.get_info().name, "GPU adapter selected");

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .unwrap_or(wgpu::TextureFormat::Bgra8UnormSrgb);
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture = create_depth_texture(&device, &config);

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Uniform Buffer"),
            size: std::mem::size_of::<Uniforms>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
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

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Render Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        let point_pipeline = create_point_pipeline(&device, &pipeline_layout, config.format);
        let mesh_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Mesh Shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::mesh_shader().into()),
        });
        let mesh_pipeline = create_mesh_pipeline(
            &device,
            &pipeline_layout,
            &mesh_shader,
            "fs_main",
            config.format,
        );
        let emissive_pipeline = create_mesh_pipeline(
            &device,
            &pipeline_layout,
            &mesh_shader,
            "fs_emissive",
            config.format,
        );

        let point_capacity = scene.foliage.count.max(1);
        let point_buffer =
            instance_buffer::<PointVertex>(&device, "Point Buffer", point_capacity);

        let cube = Mesh::cube();
        let sphere = Mesh::uv_sphere(32, 32);
        let populations = scene
            .populations
            .iter()
            .map(|population| {
                let mesh = match population.shape {
                    OrnamentShape::Box => &cube,
                    OrnamentShape::Sphere => &sphere,
                };
                InstancedMesh::new(&device, &population.name, mesh, population.count)
            })
            .collect();
        let topper = InstancedMesh::new(&device, "Topper", &Mesh::icosahedron(TOPPER_RADIUS), 1);

        debug!(
            width = config.width,
            height = config.height,
            format = ?config.format,
            "GPU surface configured"
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_texture,
            uniform_buffer,
            uniform_bind_group,
            point_pipeline,
            mesh_pipeline,
            emissive_pipeline,
            point_buffer,
            point_capacity,
            point_count: 0,
            populations,
            topper,
            camera: Camera::new(),
            world_offset: scene.world_offset,
            elapsed: 0.0,
            visible: size.width > 0 && size.height > 0,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.visible = new_size.width > 0 && new_size.height > 0;
        if self.visible {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_texture = create_depth_texture(&self.device, &self.config);
        }
    }

    /// Reconfigure at the current size, after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.resize(winit::dpi::PhysicalSize {
            width: self.config.width,
            height: self.config.height,
        });
    }

    fn update_uniforms(&mut self) {
        let aspect = self.config.width as f32 / self.config.height as f32;
        let view = self.camera.view_matrix();
        let view_proj = self.camera.projection_matrix(aspect) * view;
        let ambient = NamedColor::EmeraldDark.linear() * AMBIENT_INTENSITY;

        let uniforms = Uniforms {
            view_proj: view_proj.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            world_offset: self.world_offset.extend(0.0).to_array(),
            camera_position: self.camera.position().extend(1.0).to_array(),
            ambient: ambient.extend(1.0).to_array(),
            viewport: [self.config.width as f32, self.config.height as f32],
            time: self.elapsed,
            _padding: 0.0,
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
    }

    /// Draw and present the buffers written this frame.
    pub fn render(&mut self, elapsed: f32, delta: f32) -> Result<(), wgpu::SurfaceError> {
        self.elapsed = elapsed;
        self.camera.update(delta);
        self.update_uniforms();

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let background = srgb_hex(BACKGROUND);
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: background.x as f64,
                            g: background.y as f64,
                            b: background.z as f64,
                            a: 1.0,
                        }),
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

            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);

            render_pass.set_pipeline(&self.mesh_pipeline);
            for population in &self.populations {
                population.draw(&mut render_pass);
            }

            render_pass.set_pipeline(&self.emissive_pipeline);
            self.topper.draw(&mut render_pass);

            if self.point_count > 0 {
                render_pass.set_pipeline(&self.point_pipeline);
                render_pass.set_vertex_buffer(0, self.point_buffer.slice(..));
                render_pass.draw(0..6, 0..self.point_count);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

impl DisplaySurface for GpuSurface {
    fn is_ready(&self) -> bool {
        self.visible
    }

    fn write_points(&mut self, points: &[PointVertex]) {
        if points.len() > self.point_capacity {
            self.point_capacity = points.len();
            self.point_buffer =
                instance_buffer::<PointVertex>(&self.device, "Point Buffer", self.point_capacity);
        }
        self.queue
            .write_buffer(&self.point_buffer, 0, bytemuck::cast_slice(points));
        self.point_count = points.len() as u32;
    }

    fn write_instance_colors(&mut self, population: usize, colors: &[InstanceColor]) {
        if let Some(mesh) = self.populations.get(population) {
            mesh.write_colors(&self.queue, colors);
        }
    }

    fn write_instance_transforms(&mut self, population: usize, transforms: &[InstanceTransform]) {
        if let Some(mesh) = self.populations.get_mut(population) {
            mesh.write_transforms(&self.queue, transforms);
        }
    }

    fn write_topper(&mut self, transform: Mat4, color: Vec3) {
        self.topper.write_colors(
            &self.queue,
            &[InstanceColor {
                color: color.extend(1.0).to_array(),
            }],
        );
        self.topper
            .write_transforms(&self.queue, &[InstanceTransform::from(transform)]);
    }
}

fn instance_buffer<T>(device: &wgpu::Device, label: &str, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: (std::mem::size_of::<T>() * capacity) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_point_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Point Shader"),
        source: wgpu::ShaderSource::Wgsl(shaders::point_shader().into()),
    });

    let additive = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    };

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Point Pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<PointVertex>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &POINT_ATTRIBUTES,
            }],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState {
                    color: additive,
                    alpha: additive,
                }),
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

fn create_mesh_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    fragment_entry: &str,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(fragment_entry),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &MESH_ATTRIBUTES,
                },
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<InstanceTransform>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &TRANSFORM_ATTRIBUTES,
                },
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<InstanceColor>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &COLOR_ATTRIBUTES,
                },
            ],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fragment_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: Some(wgpu::Face::Back),
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
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
