//! Image catalog for the host renderer.
//!
//! Every frame id the game can name is loaded from `assets/images/<id>.png`.
//! Missing or unreadable files are replaced with a generated placeholder of
//! the right size so the game stays playable without art.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use glam::Vec2;
use pa_render::texture::decode_rgba8;

use crate::coin::{COIN_IMAGE, COIN_SIZE};
use crate::enemy::{ENEMY_FRAMES, ENEMY_SIZE};
use crate::player::{
    IDLE_LEFT, IDLE_RIGHT, JUMP_LEFT, JUMP_RIGHT, PLAYER_HEIGHT, PLAYER_WIDTH, RUN_LEFT,
    RUN_RIGHT,
};

pub const IMAGE_DIR: &str = "assets/images";
/// 1x1 white texture used for solid fills.
pub const WHITE_TEXTURE: &str = "__white";
const FALLBACK_SIZE: f32 = 32.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SpriteImage {
    pub id: String,
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl SpriteImage {
    fn filled(id: &str, width: u32, height: u32, color: [u8; 4]) -> Self {
        let rgba = color
            .iter()
            .copied()
            .cycle()
            .take((width * height * 4) as usize)
            .collect();
        Self {
            id: id.to_string(),
            rgba,
            width,
            height,
        }
    }

    fn put(&mut self, x: u32, y: u32, color: [u8; 4]) {
        if x < self.width && y < self.height {
            let offset = ((y * self.width + x) * 4) as usize;
            self.rgba[offset..offset + 4].copy_from_slice(&color);
        }
    }

    fn fill(&mut self, x0: u32, y0: u32, w: u32, h: u32, color: [u8; 4]) {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                self.put(x, y, color);
            }
        }
    }
}

/// Every image id the game draws, without duplicates.
pub fn all_image_ids() -> Vec<&'static str> {
    let mut ids: Vec<&'static str> = Vec::new();
    let sequences = [
        IDLE_RIGHT,
        IDLE_LEFT,
        RUN_RIGHT,
        RUN_LEFT,
        JUMP_RIGHT,
        JUMP_LEFT,
        ENEMY_FRAMES,
    ];
    for id in sequences.iter().flat_map(|seq| seq.iter()) {
        if !ids.contains(id) {
            ids.push(*id);
        }
    }
    ids.push(COIN_IMAGE);
    ids
}

pub fn load_image_from_path(path: &Path, id: &str) -> Result<SpriteImage, String> {
    let bytes = fs::read(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let (rgba, width, height) = decode_rgba8(&bytes, id)?;
    Ok(SpriteImage {
        id: id.to_string(),
        rgba,
        width,
        height,
    })
}

/// Load `<dir>/<id>.png`, falling back to a placeholder.
pub fn load_sprite_image(dir: &Path, id: &str) -> SpriteImage {
    let path = dir.join(format!("{id}.png"));
    if !path.exists() {
        log::warn!("Image '{}' not found, using placeholder", path.display());
        return placeholder_image(id);
    }
    match load_image_from_path(&path, id) {
        Ok(image) => {
            log::debug!("Loaded image '{id}' ({}x{})", image.width, image.height);
            image
        }
        Err(err) => {
            log::warn!("{err}; using placeholder for '{id}'");
            placeholder_image(id)
        }
    }
}

pub fn white_image() -> SpriteImage {
    SpriteImage::filled(WHITE_TEXTURE, 1, 1, [255, 255, 255, 255])
}

/// Generated stand-in art sized like the real sprites.
pub fn placeholder_image(id: &str) -> SpriteImage {
    const CLEAR: [u8; 4] = [0, 0, 0, 0];
    const DARK: [u8; 4] = [30, 30, 40, 255];

    if id.starts_with("hero") {
        let (w, h) = (PLAYER_WIDTH as u32, PLAYER_HEIGHT as u32);
        let mut image = SpriteImage::filled(id, w, h, CLEAR);
        image.fill(15, 0, 20, 18, [240, 190, 70, 255]);
        let eye_x = if id.contains("left") { 18 } else { 29 };
        image.fill(eye_x, 5, 3, 3, DARK);
        // Walk frames spread the legs apart.
        let stride = if id.contains("walk") { 6 } else { 2 };
        image.fill(20 - stride, 18, 4, 9, [70, 90, 200, 255]);
        image.fill(26 + stride, 18, 4, 9, [70, 90, 200, 255]);
        image
    } else if id.starts_with("enemy") {
        let size = ENEMY_SIZE as u32;
        let mut image = SpriteImage::filled(id, size, size, CLEAR);
        let squash = if id.ends_with('2') { 4 } else { 0 };
        image.fill(5, 10 + squash, 40, 40 - squash, [200, 60, 60, 255]);
        image.fill(14, 20 + squash, 6, 6, DARK);
        image.fill(30, 20 + squash, 6, 6, DARK);
        image
    } else if id == COIN_IMAGE {
        let size = COIN_SIZE as u32;
        let mut image = SpriteImage::filled(id, size, size, CLEAR);
        let center = (size as f32 - 1.0) / 2.0;
        for y in 0..size {
            for x in 0..size {
                let d = Vec2::new(x as f32 - center, y as f32 - center).length();
                if d <= center {
                    image.put(x, y, [250, 210, 40, 255]);
                }
            }
        }
        image
    } else {
        let size = FALLBACK_SIZE as u32;
        SpriteImage::filled(id, size, size, [255, 0, 255, 255])
    }
}

/// Drawn size of each image in world units, taken from the loaded pixels.
#[derive(Debug, Default)]
pub struct SpriteSizes {
    sizes: HashMap<String, Vec2>,
}

impl SpriteSizes {
    pub fn insert(&mut self, image: &SpriteImage) {
        self.sizes.insert(
            image.id.clone(),
            Vec2::new(image.width as f32, image.height as f32),
        );
    }

    pub fn size_of(&self, id: &str) -> Vec2 {
        self.sizes
            .get(id)
            .copied()
            .unwrap_or(Vec2::splat(FALLBACK_SIZE))
    }
}
