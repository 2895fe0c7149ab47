//! CPU-side quad mesh built fresh every frame.
//!
//! Quads are appended in painter's order. Consecutive quads that sample the
//! same texture collapse into one draw call, so a frame made of a handful of
//! colored rectangles plus a few sprites costs only a few `draw_indexed`.

use std::sync::Arc;

use pa_core::{Rect, Rgb};

use crate::vertex::QuadVertex;

/// A contiguous run of indices that share the same texture binding.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub texture_key: Arc<str>,
    pub index_start: u32,
    pub index_count: u32,
}

#[derive(Debug, Default)]
pub struct QuadBatch {
    pub vertices: Vec<QuadVertex>,
    pub indices: Vec<u32>,
    pub draw_calls: Vec<DrawCall>,
}

impl QuadBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.draw_calls.clear();
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Append `rect` textured with `texture_key` and tinted by linear `color`.
    pub fn push_quad(&mut self, texture_key: &str, rect: Rect, color: [f32; 4]) {
        let base_index = self.vertices.len() as u32;
        let corners = [
            ([rect.left(), rect.top()], [0.0, 0.0]),
            ([rect.right(), rect.top()], [1.0, 0.0]),
            ([rect.right(), rect.bottom()], [1.0, 1.0]),
            ([rect.left(), rect.bottom()], [0.0, 1.0]),
        ];
        for (position, uv) in corners {
            self.vertices.push(QuadVertex {
                position,
                uv,
                color,
            });
        }

        let draw_start = self.indices.len() as u32;
        self.indices.extend_from_slice(&[
            base_index,
            base_index + 1,
            base_index + 2,
            base_index,
            base_index + 2,
            base_index + 3,
        ]);
        self.push_draw_call(texture_key, draw_start, 6);
    }

    fn push_draw_call(&mut self, texture_key: &str, index_start: u32, index_count: u32) {
        if let Some(last) = self.draw_calls.last_mut() {
            let contiguous = last.index_start + last.index_count == index_start;
            if &*last.texture_key == texture_key && contiguous {
                last.index_count += index_count;
                return;
            }
        }
        self.draw_calls.push(DrawCall {
            texture_key: Arc::from(texture_key),
            index_start,
            index_count,
        });
    }
}

/// Convert an sRGB byte color into the tint expected by the shader. When the
/// render target is an sRGB surface the GPU re-encodes on write, so the tint
/// has to be linear for the on-screen color to match the requested one.
pub fn linear_color(color: Rgb, srgb_target: bool) -> [f32; 4] {
    let encoded = color.to_rgba_f32();
    if !srgb_target {
        return encoded;
    }
    let to_linear = |c: f32| {
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    [
        to_linear(encoded[0]),
        to_linear(encoded[1]),
        to_linear(encoded[2]),
        encoded[3],
    ]
}
