use crate::pass::render_pass;
use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use std::{borrow::Cow, mem};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct OverlayVertexPod {
    position: [f32; 2],
    color: [f32; 3],
}

const fn vertex(position: [f32; 2], color: [f32; 3]) -> OverlayVertexPod {
    OverlayVertexPod { position, color }
}

const SKY_COLOR: [f32; 3] = [0.5, 0.8, 1.0];
const GROUND_COLOR: [f32; 3] = [0.2, 0.6, 0.2];

// Two screen-space quads split at the horizon line y = 0.
const OVERLAY_VERTICES: [OverlayVertexPod; 8] = [
    vertex([-1.0, 1.0], SKY_COLOR),
    vertex([1.0, 1.0], SKY_COLOR),
    vertex([1.0, 0.0], SKY_COLOR),
    vertex([-1.0, 0.0], SKY_COLOR),
    vertex([-1.0, 0.0], GROUND_COLOR),
    vertex([1.0, 0.0], GROUND_COLOR),
    vertex([1.0, -1.0], GROUND_COLOR),
    vertex([-1.0, -1.0], GROUND_COLOR),
];

const OVERLAY_INDICES: [u16; 12] = [0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7];

/// Flat 2D sky/ground backdrop drawn before the scene. Works directly in
/// normalized device coordinates, so it needs no camera state and clears the
/// color target for the frame.
pub struct BackgroundPass {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    pipeline: wgpu::RenderPipeline,
}

impl render_pass::RenderPass for BackgroundPass {
    fn on_resized(
        &mut self,
        _config: &wgpu::SurfaceConfiguration,
        _device: &wgpu::Device,
        _queue: &wgpu::Queue,
    ) {
    }

    fn process_event(&mut self, _event: winit::event::WindowEvent) {
        //empty
    }

    fn update_render(&mut self, _device: &wgpu::Device, _queue: &wgpu::Queue) {}

    fn render(
        &mut self,
        back_buffer_view: &wgpu::TextureView,
        encoder: &mut wgpu::CommandEncoder,
        _device: &wgpu::Device,
        _queue: &wgpu::Queue,
    ) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Background Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: back_buffer_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        render_pass.draw_indexed(0..OVERLAY_INDICES.len() as u32, 0, 0..1);
    }
}

impl BackgroundPass {
    pub(crate) fn create_pass(
        config: &wgpu::SurfaceConfiguration,
        device: &wgpu::Device,
    ) -> Result<Self> {
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: None,
            bind_group_layouts: &[],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: None,
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(include_str!(
                "../shader/background.wgsl"
            ))),
        });

        let input_layout = [wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<OverlayVertexPod>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                },
            ],
        }];

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: None,
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                buffers: &input_layout,
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                targets: &[Some(config.view_formats[0].into())],
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer [ background ]"),
            contents: bytemuck::cast_slice(&OVERLAY_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer [ background ]"),
            contents: bytemuck::cast_slice(&OVERLAY_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        Ok(Self {
            vertex_buffer,
            index_buffer,
            pipeline,
        })
    }
}
