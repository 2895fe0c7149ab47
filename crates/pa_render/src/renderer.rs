//! GPU side of the quad batch: buffers, camera uniform and image bindings.
//!
//! Vertex and index buffers grow to the next power of two when a frame needs
//! more room and are never shrunk.

use std::collections::HashMap;
use std::sync::Arc;

use wgpu::util::DeviceExt;

use crate::batch::QuadBatch;
use crate::camera::ScreenCamera;
use crate::gpu_context::GpuContext;
use crate::quad_pipeline::QuadPipeline;
use crate::texture::Texture;
use crate::vertex::QuadVertex;

struct GpuImage {
    texture: Texture,
    bind_group: wgpu::BindGroup,
}

pub struct QuadRenderer {
    pipeline: QuadPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    index_capacity: usize,
    images: HashMap<Arc<str>, GpuImage>,
}

impl QuadRenderer {
    pub fn new(gpu: &GpuContext, camera: &ScreenCamera) -> Self {
        let pipeline = QuadPipeline::new(&gpu.device, gpu.surface_format);
        let camera_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Uniform Buffer"),
                contents: bytemuck::cast_slice(&[camera.build_uniform()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let camera_bind_group = pipeline.create_camera_bind_group(&gpu.device, &camera_buffer);

        Self {
            vertex_buffer: create_vertex_buffer(&gpu.device, 1),
            index_buffer: create_index_buffer(&gpu.device, 1),
            vertex_capacity: 1,
            index_capacity: 1,
            pipeline,
            camera_buffer,
            camera_bind_group,
            images: HashMap::new(),
        }
    }

    pub fn insert_texture(&mut self, device: &wgpu::Device, key: &str, texture: Texture) {
        let bind_group = self.pipeline.create_texture_bind_group(device, &texture);
        self.images.insert(
            Arc::from(key),
            GpuImage {
                texture,
                bind_group,
            },
        );
    }

    pub fn has_texture(&self, key: &str) -> bool {
        self.images.contains_key(key)
    }

    pub fn texture_size(&self, key: &str) -> Option<(u32, u32)> {
        self.images.get(key).map(|image| image.texture.size)
    }

    pub fn texture_count(&self) -> usize {
        self.images.len()
    }

    /// Rough GPU memory held by textures and mesh buffers, in megabytes.
    pub fn estimate_memory_mb(&self) -> f32 {
        let mut bytes: usize = 0;
        for image in self.images.values() {
            let (w, h) = image.texture.size;
            bytes += (w as usize) * (h as usize) * 4;
        }
        bytes += self.vertex_capacity * std::mem::size_of::<QuadVertex>();
        bytes += self.index_capacity * std::mem::size_of::<u32>();
        bytes as f32 / (1024.0 * 1024.0)
    }

    /// Stream this frame's mesh and camera into GPU buffers.
    pub fn prepare(&mut self, gpu: &GpuContext, camera: &ScreenCamera, batch: &QuadBatch) {
        gpu.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[camera.build_uniform()]),
        );

        let needed_vertices = batch.vertices.len().max(1);
        if needed_vertices > self.vertex_capacity {
            self.vertex_capacity = needed_vertices.next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(&gpu.device, self.vertex_capacity);
        }
        let needed_indices = batch.indices.len().max(1);
        if needed_indices > self.index_capacity {
            self.index_capacity = needed_indices.next_power_of_two();
            self.index_buffer = create_index_buffer(&gpu.device, self.index_capacity);
        }

        if !batch.vertices.is_empty() {
            gpu.queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&batch.vertices));
        }
        if !batch.indices.is_empty() {
            gpu.queue
                .write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&batch.indices));
        }
    }

    /// Record the batch's draw calls. `prepare` must have run for this batch.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>, batch: &QuadBatch) {
        if batch.draw_calls.is_empty() {
            return;
        }
        render_pass.set_pipeline(&self.pipeline.render_pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

        let mut last_bound: Option<&Arc<str>> = None;
        for draw in &batch.draw_calls {
            let Some(image) = self.images.get(&draw.texture_key) else {
                log::trace!("Skipping draw with unknown texture '{}'", draw.texture_key);
                continue;
            };
            if last_bound.map_or(true, |last| **last != *draw.texture_key) {
                render_pass.set_bind_group(1, &image.bind_group, &[]);
                last_bound = Some(&draw.texture_key);
            }
            render_pass.draw_indexed(draw.index_start..(draw.index_start + draw.index_count), 0, 0..1);
        }
    }
}

fn create_vertex_buffer(device: &wgpu::Device, vertex_capacity: usize) -> wgpu::Buffer {
    let byte_len = (vertex_capacity * std::mem::size_of::<QuadVertex>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Quad Vertex Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_index_buffer(device: &wgpu::Device, index_capacity: usize) -> wgpu::Buffer {
    let byte_len = (index_capacity * std::mem::size_of::<u32>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Quad Index Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
