use glam::{Mat4, Vec2};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// Maps a fixed-size world (origin top-left, y down) onto the whole surface.
pub struct ScreenCamera {
    pub world_size: Vec2,
    pub viewport: (u32, u32),
}

impl ScreenCamera {
    pub fn new(world_width: f32, world_height: f32, viewport: (u32, u32)) -> Self {
        Self {
            world_size: Vec2::new(world_width, world_height),
            viewport,
        }
    }

    pub fn view_proj(&self) -> Mat4 {
        Mat4::orthographic_rh(0.0, self.world_size.x, self.world_size.y, 0.0, -1.0, 1.0)
    }

    pub fn build_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_proj().to_cols_array_2d(),
        }
    }

    /// Physical surface pixels per world unit, per axis.
    pub fn pixels_per_unit(&self) -> Vec2 {
        Vec2::new(
            self.viewport.0.max(1) as f32 / self.world_size.x,
            self.viewport.1.max(1) as f32 / self.world_size.y,
        )
    }

    /// Convert a physical cursor position into world coordinates.
    pub fn screen_to_world(&self, physical: Vec2) -> Vec2 {
        physical / self.pixels_per_unit()
    }
}
