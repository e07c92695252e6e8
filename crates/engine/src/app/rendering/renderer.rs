use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture};
use winit::window::Window;

use crate::app::{Vec2, World};
use crate::content::SpriteImage;

use super::transform::{SurfaceSize, ViewportTransform};

const BAR_COLOR: [u8; 4] = [0, 0, 0, 255];
const PLAYFIELD_COLOR: [u8; 4] = [100, 149, 237, 255];

pub struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    surface: SurfaceSize,
    sprite: SpriteImage,
}

impl Renderer {
    pub fn new(window: Arc<Window>, sprite: SpriteImage) -> Result<Self, Error> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(Arc::clone(&window), size.width, size.height)?;
        Ok(Self {
            window,
            pixels,
            surface: SurfaceSize {
                width: size.width,
                height: size.height,
            },
            sprite,
        })
    }

    pub fn sprite_half_extent(&self) -> Vec2 {
        let (x, y) = self.sprite.half_extent();
        Vec2 { x, y }
    }

    /// Rebuilds the pixel buffer for the new surface size. A zero dimension
    /// (minimized window) keeps the old buffer and records the size so
    /// `render` skips drawing until a usable size arrives. Any other size is
    /// recorded only after the rebuild succeeds, so the recorded size never
    /// claims more pixels than the buffer holds.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            self.surface = SurfaceSize { width, height };
            return Ok(());
        }
        self.pixels = Self::build_pixels(Arc::clone(&self.window), width, height)?;
        self.surface = SurfaceSize { width, height };
        Ok(())
    }

    fn build_pixels(
        window: Arc<Window>,
        width: u32,
        height: u32,
    ) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(width, height, window);
        Pixels::new(width, height, surface)
    }

    pub(crate) fn render(&mut self, world: &World) -> Result<(), Error> {
        if self.surface.width == 0 || self.surface.height == 0 {
            return Ok(());
        }

        let transform = ViewportTransform::fit(world.logical(), self.surface);
        let frame = self.pixels.frame_mut();

        clear_frame(frame, BAR_COLOR);
        fill_rect(
            frame,
            self.surface.width,
            self.surface.height,
            transform.offset_x as i32,
            transform.offset_y as i32,
            transform.scaled_width,
            transform.scaled_height,
            PLAYFIELD_COLOR,
        );

        let center = transform.project(world.player().position);
        draw_sprite_centered_scaled(
            frame,
            self.surface.width,
            self.surface.height,
            center.x.round() as i32,
            center.y.round() as i32,
            &self.sprite,
            transform.scale,
        );

        self.pixels.render()
    }
}

fn clear_frame(frame: &mut [u8], color: [u8; 4]) {
    for chunk in frame.chunks_exact_mut(4) {
        chunk.copy_from_slice(&color);
    }
}

#[allow(clippy::too_many_arguments)]
fn fill_rect(
    frame: &mut [u8],
    frame_width: u32,
    frame_height: u32,
    left: i32,
    top: i32,
    rect_width: u32,
    rect_height: u32,
    color: [u8; 4],
) {
    let right = left.saturating_add(rect_width as i32);
    let bottom = top.saturating_add(rect_height as i32);
    let draw_left = left.max(0);
    let draw_top = top.max(0);
    let draw_right = right.min(frame_width as i32);
    let draw_bottom = bottom.min(frame_height as i32);

    for y in draw_top..draw_bottom {
        for x in draw_left..draw_right {
            write_pixel_rgba_clipped(frame, frame_width as usize, x, y, color);
        }
    }
}

fn write_pixel_rgba_clipped(frame: &mut [u8], width: usize, x: i32, y: i32, color: [u8; 4]) {
    if x < 0 || y < 0 {
        return;
    }
    let x = x as usize;
    let y = y as usize;
    let Some(pixel_offset) = y.checked_mul(width).and_then(|row| row.checked_add(x)) else {
        return;
    };
    let Some(byte_offset) = pixel_offset.checked_mul(4) else {
        return;
    };
    let Some(end) = byte_offset.checked_add(4) else {
        return;
    };
    if end > frame.len() {
        return;
    }
    frame[byte_offset..end].copy_from_slice(&color);
}

fn normalized_sprite_scale(scale: f32) -> f32 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}

fn scaled_sprite_dimensions(sprite: &SpriteImage, scale: f32) -> (u32, u32) {
    let scale = normalized_sprite_scale(scale);
    let width = (sprite.width as f32 * scale).round().max(1.0) as u32;
    let height = (sprite.height as f32 * scale).round().max(1.0) as u32;
    (width, height)
}

/// Nearest-neighbor blit of `sprite` centered on (`center_x`, `center_y`),
/// clipped to the frame. Fully transparent source pixels are skipped.
fn draw_sprite_centered_scaled(
    frame: &mut [u8],
    width: u32,
    height: u32,
    center_x: i32,
    center_y: i32,
    sprite: &SpriteImage,
    scale: f32,
) {
    if sprite.width == 0 || sprite.height == 0 || width == 0 || height == 0 {
        return;
    }
    let expected_rgba_len = sprite.width as usize * sprite.height as usize * 4;
    if sprite.rgba.len() < expected_rgba_len {
        return;
    }
    let expected_frame_len = width as usize * height as usize * 4;
    if frame.len() < expected_frame_len {
        return;
    }

    let scale = normalized_sprite_scale(scale);
    let inv_scale = scale.recip();
    let (scaled_w, scaled_h) = scaled_sprite_dimensions(sprite, scale);
    let left = center_x - (scaled_w as i32 / 2);
    let top = center_y - (scaled_h as i32 / 2);
    let right = left + scaled_w as i32;
    let bottom = top + scaled_h as i32;

    let draw_left = left.max(0);
    let draw_top = top.max(0);
    let draw_right = right.min(width as i32);
    let draw_bottom = bottom.min(height as i32);
    if draw_left >= draw_right || draw_top >= draw_bottom {
        return;
    }

    let frame_width = width as usize;
    let sprite_width = sprite.width as usize;

    for out_y in draw_top..draw_bottom {
        let dy = out_y - top;
        let src_y = ((dy as f32) * inv_scale).floor() as u32;
        let src_y = src_y.min(sprite.height - 1) as usize;
        let src_row_offset = src_y * sprite_width * 4;
        let dst_row_offset = out_y as usize * frame_width * 4;

        for out_x in draw_left..draw_right {
            let dx = out_x - left;
            let src_x = ((dx as f32) * inv_scale).floor() as u32;
            let src_x = src_x.min(sprite.width - 1) as usize;
            let src_offset = src_row_offset + src_x * 4;
            let alpha = sprite.rgba[src_offset + 3];
            if alpha == 0 {
                continue;
            }
            let dst_offset = dst_row_offset + out_x as usize * 4;
            frame[dst_offset] = sprite.rgba[src_offset];
            frame[dst_offset + 1] = sprite.rgba[src_offset + 1];
            frame[dst_offset + 2] = sprite.rgba[src_offset + 2];
            frame[dst_offset + 3] = alpha;
        }
    }
}
