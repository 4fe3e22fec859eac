use crate::{
    pass::render_pass,
    render_client::{camera::Camera, texture},
    scene::cube,
    utils::math_util,
};
use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use std::{borrow::Cow, cell::RefCell, mem, rc::Rc};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct CameraUniformPod {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
}

const VIEW_OFFSET: u64 = 0;
const PROJ_OFFSET: u64 = mem::size_of::<[[f32; 4]; 4]>() as u64;

/// The colored cube, standing on the ground plane in front of the camera.
/// The projection and model matrices are uploaded once at creation; the view
/// matrix is refreshed from the camera every frame.
pub struct CubeScenePass {
    mesh: cube::CubeMesh,
    camera: Rc<RefCell<Camera>>,
    camera_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    pipeline: wgpu::RenderPipeline,
    depth_texture: texture::DepthTexture,
}

impl render_pass::RenderPass for CubeScenePass {
    fn on_resized(
        &mut self,
        config: &wgpu::SurfaceConfiguration,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    ) {
        self.depth_texture = texture::DepthTexture::create(device, config);

        // The renderer refreshed the camera aspect before fanning out.
        let proj = Self::clip_space_proj(&self.camera.borrow());
        queue.write_buffer(&self.camera_buffer, PROJ_OFFSET, bytemuck::cast_slice(&proj));
    }

    fn process_event(&mut self, _event: winit::event::WindowEvent) {
        //empty
    }

    fn update_render(&mut self, _device: &wgpu::Device, queue: &wgpu::Queue) {
        let view = self.camera.borrow().build_view_matrix().to_cols_array_2d();
        queue.write_buffer(&self.camera_buffer, VIEW_OFFSET, bytemuck::cast_slice(&view));
    }

    fn render(
        &mut self,
        back_buffer_view: &wgpu::TextureView,
        encoder: &mut wgpu::CommandEncoder,
        _device: &wgpu::Device,
        _queue: &wgpu::Queue,
    ) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Cube Scene Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: back_buffer_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: self.depth_texture.view(),
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Discard,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.mesh.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        render_pass.draw_indexed(0..self.mesh.index_count, 0, 0..1);
    }
}

impl CubeScenePass {
    pub(crate) fn create_pass(
        config: &wgpu::SurfaceConfiguration,
        device: &wgpu::Device,
        camera: Rc<RefCell<Camera>>,
    ) -> Result<Self> {
        let mesh = cube::CubeMesh::create(device);

        let camera_uniform = {
            let camera = camera.borrow();
            CameraUniformPod {
                view: camera.build_view_matrix().to_cols_array_2d(),
                proj: Self::clip_space_proj(&camera),
                model: glam::Mat4::from_translation(glam::Vec3::new(0.0, 1.0, 0.0))
                    .to_cols_array_2d(),
            }
        };
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer [ cube ]"),
            contents: bytemuck::bytes_of(&camera_uniform),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: None,
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        mem::size_of::<CameraUniformPod>() as u64
                    ),
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
            label: Some("Camera Bind Group [ cube ]"),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: None,
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: None,
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(include_str!("../shader/cube.wgsl"))),
        });

        let input_layout = [wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<cube::VertexPod>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
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
            depth_stencil: Some(wgpu::DepthStencilState {
                format: texture::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        let depth_texture = texture::DepthTexture::create(device, config);

        Ok(Self {
            mesh,
            camera,
            camera_buffer,
            bind_group,
            pipeline,
            depth_texture,
        })
    }

    fn clip_space_proj(camera: &Camera) -> [[f32; 4]; 4] {
        (math_util::OPENGL_TO_WGPU_MATRIX * camera.build_proj_matrix()).to_cols_array_2d()
    }
}
