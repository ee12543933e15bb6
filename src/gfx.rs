use std::sync::Arc;

use anyhow::{Context, Result};
use glam::Mat4;
use log::warn;
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::mesh::Vertex;

const SKY: wgpu::Color = wgpu::Color {
    r: 0.53,
    g: 0.81,
    b: 0.92,
    a: 1.0,
};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

fn depth_view(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration) -> wgpu::TextureView {
    device
        .create_texture(&wgpu::TextureDescriptor {
            label: Some("depth"),
            size: wgpu::Extent3d {
                width: config.width.max(1),
                height: config.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        })
        .create_view(&wgpu::TextureViewDescriptor::default())
}

fn screen_size(config: &wgpu::SurfaceConfiguration) -> [f32; 4] {
    [config.width as f32, config.height as f32, 0.0, 0.0]
}

/// Ein Uniform-Buffer samt Bind-Group (Gruppe 0, Binding 0, nur Vertex-Stufe).
struct Uniform {
    buf: wgpu::Buffer,
    group: wgpu::BindGroup,
}

impl Uniform {
    fn new(device: &wgpu::Device, label: &str, contents: &[u8]) -> (Self, wgpu::BindGroupLayout) {
        let buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
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
        });

        let group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buf.as_entire_binding(),
            }],
        });

        (Self { buf, group }, layout)
    }

    fn write(&self, queue: &wgpu::Queue, contents: &[u8]) {
        queue.write_buffer(&self.buf, 0, contents);
    }
}

/// Hochgeladenes Mesh; leer = nichts zu zeichnen.
struct GpuMesh {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, label: &str, vertices: &[Vertex], indices: &[u32]) -> Option<Self> {
        if vertices.is_empty() || indices.is_empty() {
            return None;
        }

        let vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ib = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Some(Self {
            vertices: vb,
            indices: ib,
            count: indices.len() as u32,
        })
    }

    fn draw(&self, rp: &mut wgpu::RenderPass<'_>) {
        rp.set_vertex_buffer(0, self.vertices.slice(..));
        rp.set_index_buffer(self.indices.slice(..), wgpu::IndexFormat::Uint32);
        rp.draw_indexed(0..self.count, 0, 0..1);
    }
}

/// Unterschiede zwischen Level- und HUD-Pipeline.
struct PassStyle {
    blend: wgpu::BlendState,
    cull_mode: Option<wgpu::Face>,
    depth_write: bool,
    depth_compare: wgpu::CompareFunction,
}

fn build_pipeline(
    device: &wgpu::Device,
    label: &str,
    source: &'static str,
    bind_layout: &wgpu::BindGroupLayout,
    format: wgpu::TextureFormat,
    style: PassStyle,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts: &[bind_layout],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::layout()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(style.blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: style.cull_mode,
            front_face: wgpu::FrontFace::Ccw,
            ..Default::default()
        },
        // beide Pipelines laufen im selben Pass mit Tiefenpuffer
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: style.depth_write,
            depth_compare: style.depth_compare,
            stencil: Default::default(),
            bias: Default::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

/// Was der Host nach einem fehlgeschlagenen Frame tun soll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Drawn,
    /// Surface neu konfiguriert, nächster Frame versucht es wieder
    Skipped,
    Fatal,
}

pub struct Gfx {
    window: Arc<Window>,
    pub size: PhysicalSize<u32>,

    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth: wgpu::TextureView,

    scene: wgpu::RenderPipeline,
    camera: Uniform,
    level: Option<GpuMesh>,

    hud: wgpu::RenderPipeline,
    screen: Uniform,
    hud_mesh: Option<GpuMesh>,
}

impl Gfx {
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no suitable GPU adapter")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::Performance,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to request device")?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .context("surface reports no formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let (camera, camera_layout) = Uniform::new(
            &device,
            "camera",
            bytemuck::bytes_of(&Mat4::IDENTITY.to_cols_array()),
        );
        let scene = build_pipeline(
            &device,
            "scene",
            include_str!("shaders/scene.wgsl"),
            &camera_layout,
            format,
            PassStyle {
                blend: wgpu::BlendState::REPLACE,
                cull_mode: Some(wgpu::Face::Back),
                depth_write: true,
                depth_compare: wgpu::CompareFunction::Less,
            },
        );

        // HUD in Pixelkoordinaten, immer obenauf
        let (screen, screen_layout) =
            Uniform::new(&device, "screen", bytemuck::bytes_of(&screen_size(&config)));
        let hud = build_pipeline(
            &device,
            "hud",
            include_str!("shaders/hud.wgsl"),
            &screen_layout,
            format,
            PassStyle {
                blend: wgpu::BlendState::ALPHA_BLENDING,
                cull_mode: None,
                depth_write: false,
                depth_compare: wgpu::CompareFunction::Always,
            },
        );

        let depth = depth_view(&device, &config);

        Ok(Self {
            window,
            size,
            surface,
            device,
            queue,
            config,
            depth,
            scene,
            camera,
            level: None,
            hud,
            screen,
            hud_mesh: None,
        })
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);

        self.depth = depth_view(&self.device, &self.config);
        self.screen
            .write(&self.queue, bytemuck::bytes_of(&screen_size(&self.config)));
    }

    pub fn set_camera(&mut self, view_proj: Mat4) {
        self.camera
            .write(&self.queue, bytemuck::bytes_of(&view_proj.to_cols_array()));
    }

    pub fn set_mesh(&mut self, vertices: &[Vertex], indices: &[u32]) {
        self.level = GpuMesh::upload(&self.device, "level", vertices, indices);
    }

    /// Touch-Bedienelemente in Bildschirmpixeln; leer blendet sie aus.
    pub fn set_hud(&mut self, vertices: &[Vertex], indices: &[u32]) {
        self.hud_mesh = GpuMesh::upload(&self.device, "hud", vertices, indices);
    }

    pub fn render(&mut self) -> FrameStatus {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("surface lost, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return FrameStatus::Skipped;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return FrameStatus::Fatal,
            Err(e) => {
                warn!("skipping frame: {e}");
                return FrameStatus::Skipped;
            }
        };

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render encoder"),
            });

        {
            let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(SKY),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
                multiview_mask: None,
            });

            if let Some(mesh) = &self.level {
                rp.set_pipeline(&self.scene);
                rp.set_bind_group(0, &self.camera.group, &[]);
                mesh.draw(&mut rp);
            }

            if let Some(mesh) = &self.hud_mesh {
                rp.set_pipeline(&self.hud);
                rp.set_bind_group(0, &self.screen.group, &[]);
                mesh.draw(&mut rp);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        self.window.pre_present_notify();
        frame.present();
        FrameStatus::Drawn
    }
}
