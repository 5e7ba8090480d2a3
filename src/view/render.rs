use wgpu::*;

use crate::utils::Vertex;
use crate::view::{GpuContext, LineBatch};

pub const DEPTH_FORMAT: TextureFormat = TextureFormat::Depth32Float;

pub fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> (wgpu::Texture, wgpu::TextureView) {
    let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth_texture"),
        size: wgpu::Extent3d { width: width.max(1), height: height.max(1), depth_or_array_layers: 1 },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let depth_view = depth_texture.create_view(&wgpu::TextureViewDescriptor::default());
    (depth_texture, depth_view)
}

pub struct CameraResources {
    pub camera_buffer: wgpu::Buffer,
    pub bind_group_layout: wgpu::BindGroupLayout,
    pub camera_bind_group: wgpu::BindGroup,
}

pub fn create_camera_resources(device: &wgpu::Device) -> CameraResources {
    let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("camera_buffer"),
        size: 64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("camera_bind_group_layout"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
        ],
    });

    let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("camera_bind_group"),
        layout: &bind_group_layout,
        entries: &[
            wgpu::BindGroupEntry { binding: 0, resource: camera_buffer.as_entire_binding() },
        ],
    });

    CameraResources { camera_buffer, bind_group_layout, camera_bind_group }
}

pub fn create_line_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("line_shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shaders/lines.wgsl").into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("line_pipeline_layout"),
        bind_group_layouts: &[bind_group_layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("line_pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[
                    wgpu::VertexAttribute { offset: 0, shader_location: 0, format: wgpu::VertexFormat::Float32x3 },
                    wgpu::VertexAttribute { offset: 12, shader_location: 1, format: wgpu::VertexFormat::Float32x4 },
                ],
            }],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState { format, blend: Some(wgpu::BlendState::ALPHA_BLENDING), write_mask: wgpu::ColorWrites::ALL })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::LineList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
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
        multisample: wgpu::MultisampleState { count: 1, mask: !0, alpha_to_coverage_enabled: false },
        multiview: None,
        cache: None,
    })
}

///////////////////////////////////////////////////////////////////////////////

/// The egui half of a frame, produced by the UI pass and consumed by `draw_frame`
pub struct OverlayFrame {
    pub primitives: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub pixels_per_point: f32,
}

/// Owns every GPU object the scene needs besides the device itself
pub struct SceneRenderer {
    pipeline: RenderPipeline,
    camera: CameraResources,
    // keeps the depth view's texture alive
    _depth_texture: Texture,
    depth_view: TextureView,
    egui_renderer: egui_wgpu::Renderer,
}

impl SceneRenderer {
    pub fn new(gpu: &GpuContext) -> Self {
        let camera = create_camera_resources(&gpu.device);
        let pipeline = create_line_pipeline(&gpu.device, gpu.format, &camera.bind_group_layout);
        let (depth_texture, depth_view) = create_depth_texture(&gpu.device, gpu.config.width, gpu.config.height);
        let egui_renderer = egui_wgpu::Renderer::new(&gpu.device, gpu.format, egui_wgpu::RendererOptions::default());

        Self { pipeline, camera, _depth_texture: depth_texture, depth_view, egui_renderer }
    }

    pub fn resize(&mut self, gpu: &GpuContext) {
        let (depth_texture, depth_view) = create_depth_texture(&gpu.device, gpu.config.width, gpu.config.height);
        self._depth_texture = depth_texture;
        self.depth_view = depth_view;
    }

    /// Draw the 3D line batch, then the egui overlay on top, and present
    pub fn draw_frame(&mut self, gpu: &GpuContext, batch: &LineBatch, overlay: OverlayFrame) -> Result<(), SurfaceError> {
        let frame = gpu.surface.get_current_texture()?;
        let view = frame.texture.create_view(&TextureViewDescriptor::default());

        gpu.queue.write_buffer(&self.camera.camera_buffer, 0, bytemuck::cast_slice(&batch.view_proj.to_cols_array()));

        let line_buffers = (!batch.mesh.is_empty()).then(|| batch.mesh.upload(&gpu.device));

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: overlay.pixels_per_point,
        };

        let mut encoder = gpu.device.create_command_encoder(&CommandEncoderDescriptor {
            label: Some("encoder"),
        });

        for (id, image_delta) in &overlay.textures_delta.set {
            self.egui_renderer.update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        self.egui_renderer
            .update_buffers(&gpu.device, &gpu.queue, &mut encoder, &overlay.primitives, &screen_descriptor);

        let clear = egui::Rgba::from(batch.clear_color);
        {
            let mut rp = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(Color {
                            r: clear.r() as f64,
                            g: clear.g() as f64,
                            b: clear.b() as f64,
                            a: 1.0,
                        }),
                        store: StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(Operations {
                        load: LoadOp::Clear(1.0),
                        store: StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Some(lines) = &line_buffers {
                rp.set_pipeline(&self.pipeline);
                rp.set_bind_group(0, &self.camera.camera_bind_group, &[]);
                rp.set_vertex_buffer(0, lines.vertex_buffer.slice(..));
                rp.set_index_buffer(lines.index_buffer.slice(..), IndexFormat::Uint32);
                rp.draw_indexed(0..lines.index_count, 0, 0..1);
            }
        }

        {
            let egui_pass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("egui_render_pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Load,
                        store: StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.egui_renderer
                .render(&mut egui_pass.forget_lifetime(), &overlay.primitives, &screen_descriptor);
        }

        for id in &overlay.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}
