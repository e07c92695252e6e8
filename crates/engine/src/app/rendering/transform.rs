use crate::app::{LogicalViewport, Vec2};

/// Physical pixel dimensions of the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

/// Uniform-scale mapping from logical coordinates onto the surface. The
/// logical viewport is scaled by the smaller axis ratio so it always fits,
/// then centered; the leftover rows or columns become letterbox bars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub scaled_width: u32,
    pub scaled_height: u32,
}

impl ViewportTransform {
    pub fn fit(logical: LogicalViewport, surface: SurfaceSize) -> Self {
        let scale_x = surface.width as f32 / logical.width as f32;
        let scale_y = surface.height as f32 / logical.height as f32;
        let raw_scale = scale_x.min(scale_y);
        // A zero-sized surface (minimized window) would produce a zero or
        // non-finite scale and poison every later division.
        let scale = if raw_scale.is_finite() && raw_scale > f32::EPSILON {
            raw_scale
        } else {
            f32::EPSILON
        };

        let scaled_width = (logical.width as f32 * scale).floor() as u32;
        let scaled_height = (logical.height as f32 * scale).floor() as u32;
        let offset_x = surface.width.saturating_sub(scaled_width) / 2;
        let offset_y = surface.height.saturating_sub(scaled_height) / 2;

        Self {
            scale,
            offset_x: offset_x as f32,
            offset_y: offset_y as f32,
            scaled_width,
            scaled_height,
        }
    }

    pub fn project(&self, logical_point: Vec2) -> Vec2 {
        Vec2 {
            x: logical_point.x * self.scale + self.offset_x,
            y: logical_point.y * self.scale + self.offset_y,
        }
    }

    pub fn unproject(&self, surface_point: Vec2) -> Vec2 {
        Vec2 {
            x: (surface_point.x - self.offset_x) / self.scale,
            y: (surface_point.y - self.offset_y) / self.scale,
        }
    }
}
