use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct VertexPod {
    position: [f32; 3],
    color: [f32; 3],
}

const fn vertex(position: [f32; 3], color: [f32; 3]) -> VertexPod {
    VertexPod { position, color }
}

const RED: [f32; 3] = [1.0, 0.0, 0.0];
const GREEN: [f32; 3] = [0.0, 1.0, 0.0];
const BLUE: [f32; 3] = [0.0, 0.0, 1.0];
const YELLOW: [f32; 3] = [1.0, 1.0, 0.0];
const CYAN: [f32; 3] = [0.0, 1.0, 1.0];
const MAGENTA: [f32; 3] = [1.0, 0.0, 1.0];

const CUBE_VERTICES: [VertexPod; 24] = [
    // Front
    vertex([-1.0, -1.0, 1.0], RED),
    vertex([1.0, -1.0, 1.0], RED),
    vertex([1.0, 1.0, 1.0], RED),
    vertex([-1.0, 1.0, 1.0], RED),
    // Back
    vertex([-1.0, -1.0, -1.0], GREEN),
    vertex([-1.0, 1.0, -1.0], GREEN),
    vertex([1.0, 1.0, -1.0], GREEN),
    vertex([1.0, -1.0, -1.0], GREEN),
    // Top
    vertex([-1.0, 1.0, -1.0], BLUE),
    vertex([-1.0, 1.0, 1.0], BLUE),
    vertex([1.0, 1.0, 1.0], BLUE),
    vertex([1.0, 1.0, -1.0], BLUE),
    // Bottom
    vertex([-1.0, -1.0, -1.0], YELLOW),
    vertex([1.0, -1.0, -1.0], YELLOW),
    vertex([1.0, -1.0, 1.0], YELLOW),
    vertex([-1.0, -1.0, 1.0], YELLOW),
    // Right
    vertex([1.0, -1.0, -1.0], CYAN),
    vertex([1.0, 1.0, -1.0], CYAN),
    vertex([1.0, 1.0, 1.0], CYAN),
    vertex([1.0, -1.0, 1.0], CYAN),
    // Left
    vertex([-1.0, -1.0, -1.0], MAGENTA),
    vertex([-1.0, -1.0, 1.0], MAGENTA),
    vertex([-1.0, 1.0, 1.0], MAGENTA),
    vertex([-1.0, 1.0, -1.0], MAGENTA),
];

const CUBE_INDICES: [u16; 36] = [
    0, 1, 2, 0, 2, 3, // front
    4, 5, 6, 4, 6, 7, // back
    8, 9, 10, 8, 10, 11, // top
    12, 13, 14, 12, 14, 15, // bottom
    16, 17, 18, 16, 18, 19, // right
    20, 21, 22, 20, 22, 23, // left
];

pub struct CubeMesh {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
}

impl CubeMesh {
    pub fn create(device: &wgpu::Device) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer [ cube ]"),
            contents: bytemuck::cast_slice(&CUBE_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer [ cube ]"),
            contents: bytemuck::cast_slice(&CUBE_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: CUBE_INDICES.len() as u32,
        }
    }
}
