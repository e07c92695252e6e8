use std::io;
use std::path::{Path, PathBuf};

use image::ImageReader;
use thiserror::Error;
use tracing::warn;

/// Edge length of the solid square substituted for a sprite that failed to
/// load.
pub const PLACEHOLDER_SPRITE_SIZE: u32 = 64;

const PLACEHOLDER_COLOR: [u8; 4] = [255, 255, 255, 255];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpriteKeyError {
    #[error("sprite key must not be empty")]
    Empty,
    #[error("sprite key must not start with '/'")]
    LeadingSlash,
    #[error("sprite key must not contain '\\\\'")]
    Backslash,
    #[error("sprite key must not contain '..'")]
    ParentTraversal,
    #[error("sprite key contains invalid character '{character}'")]
    InvalidCharacter { character: char },
}

pub fn validate_sprite_key(key: &str) -> Result<(), SpriteKeyError> {
    if key.is_empty() {
        return Err(SpriteKeyError::Empty);
    }
    if key.starts_with('/') {
        return Err(SpriteKeyError::LeadingSlash);
    }
    if key.contains('\\') {
        return Err(SpriteKeyError::Backslash);
    }
    if key.contains("..") {
        return Err(SpriteKeyError::ParentTraversal);
    }
    for ch in key.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || matches!(ch, '_' | '/' | '-') {
            continue;
        }
        return Err(SpriteKeyError::InvalidCharacter { character: ch });
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum SpriteLoadError {
    #[error(transparent)]
    InvalidKey(#[from] SpriteKeyError),
    #[error("failed to open sprite file {path}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode sprite file {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Decoded RGBA8 sprite data, row-major, 4 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl SpriteImage {
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        let mut rgba = Vec::with_capacity(pixel_count * 4);
        for _ in 0..pixel_count {
            rgba.extend_from_slice(&color);
        }
        Self {
            width,
            height,
            rgba,
        }
    }

    pub fn half_extent(&self) -> (f32, f32) {
        (self.width as f32 * 0.5, self.height as f32 * 0.5)
    }
}

pub fn sprite_path(assets_dir: &Path, key: &str) -> Result<PathBuf, SpriteKeyError> {
    validate_sprite_key(key)?;
    Ok(assets_dir.join(format!("{key}.png")))
}

pub fn load_sprite(assets_dir: &Path, key: &str) -> Result<SpriteImage, SpriteLoadError> {
    let path = sprite_path(assets_dir, key)?;
    let reader = ImageReader::open(&path).map_err(|source| SpriteLoadError::FileOpen {
        path: path.clone(),
        source,
    })?;
    let decoded = reader
        .decode()
        .map_err(|source| SpriteLoadError::Decode {
            path: path.clone(),
            source,
        })?;
    let image = decoded.to_rgba8();
    Ok(SpriteImage {
        width: image.width(),
        height: image.height(),
        rgba: image.into_raw(),
    })
}

/// Load a sprite, substituting the solid placeholder square when anything
/// goes wrong. A missing or corrupt asset downgrades to a warning instead of
/// aborting startup.
pub fn load_sprite_or_placeholder(assets_dir: &Path, key: &str) -> SpriteImage {
    match load_sprite(assets_dir, key) {
        Ok(sprite) => sprite,
        Err(error) => {
            warn!(
                sprite_key = key,
                error = %error,
                "sprite_load_failed_using_placeholder"
            );
            SpriteImage::solid_color(
                PLACEHOLDER_SPRITE_SIZE,
                PLACEHOLDER_SPRITE_SIZE,
                PLACEHOLDER_COLOR,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_test_png(dir: &Path, name: &str, width: u32, height: u32) {
        let mut image = image::RgbaImage::new(width, height);
        for pixel in image.pixels_mut() {
            *pixel = image::Rgba([10, 20, 30, 255]);
        }
        image
            .save(dir.join(format!("{name}.png")))
            .expect("write test png");
    }

    #[test]
    fn accepts_valid_keys() {
        for key in ["player", "ui/icons/worker_1", "a-b/c_d"] {
            assert!(validate_sprite_key(key).is_ok(), "key={key}");
        }
    }

    #[test]
    fn rejects_invalid_keys() {
        for key in ["", "/a", "..", "a/../b", r"a\b", "A", "a.b"] {
            assert!(validate_sprite_key(key).is_err(), "key={key}");
        }
    }

    #[test]
    fn load_sprite_reads_png_dimensions_and_pixels() {
        let temp = TempDir::new().expect("temp dir");
        write_test_png(temp.path(), "player", 48, 32);

        let sprite = load_sprite(temp.path(), "player").expect("load sprite");
        assert_eq!(sprite.width, 48);
        assert_eq!(sprite.height, 32);
        assert_eq!(sprite.rgba.len(), 48 * 32 * 4);
        assert_eq!(&sprite.rgba[0..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn load_sprite_missing_file_reports_file_open() {
        let temp = TempDir::new().expect("temp dir");
        let error = load_sprite(temp.path(), "player").expect_err("missing file");
        assert!(matches!(error, SpriteLoadError::FileOpen { .. }));
    }

    #[test]
    fn load_sprite_rejects_invalid_key_before_touching_disk() {
        let temp = TempDir::new().expect("temp dir");
        let error = load_sprite(temp.path(), "../player").expect_err("invalid key");
        assert!(matches!(error, SpriteLoadError::InvalidKey(_)));
    }

    #[test]
    fn load_sprite_garbage_bytes_reports_decode() {
        let temp = TempDir::new().expect("temp dir");
        std::fs::write(temp.path().join("player.png"), b"not a png").expect("write file");

        let error = load_sprite(temp.path(), "player").expect_err("garbage png");
        assert!(matches!(error, SpriteLoadError::Decode { .. }));
    }

    #[test]
    fn placeholder_is_solid_64_square_with_32_half_extent() {
        let temp = TempDir::new().expect("temp dir");
        let sprite = load_sprite_or_placeholder(temp.path(), "player");

        assert_eq!(sprite.width, PLACEHOLDER_SPRITE_SIZE);
        assert_eq!(sprite.height, PLACEHOLDER_SPRITE_SIZE);
        assert_eq!(sprite.half_extent(), (32.0, 32.0));
        assert!(sprite
            .rgba
            .chunks_exact(4)
            .all(|pixel| pixel == PLACEHOLDER_COLOR));
    }

    #[test]
    fn load_or_placeholder_prefers_real_asset() {
        let temp = TempDir::new().expect("temp dir");
        write_test_png(temp.path(), "player", 48, 48);

        let sprite = load_sprite_or_placeholder(temp.path(), "player");
        assert_eq!(sprite.width, 48);
        assert_eq!(sprite.half_extent(), (24.0, 24.0));
    }

    #[test]
    fn solid_color_fills_every_pixel() {
        let sprite = SpriteImage::solid_color(2, 3, [1, 2, 3, 4]);
        assert_eq!(sprite.rgba.len(), 2 * 3 * 4);
        assert!(sprite.rgba.chunks_exact(4).all(|pixel| pixel == [1, 2, 3, 4]));
    }
}
