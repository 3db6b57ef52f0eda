//! Item sprite atlas: a grid of square tiles, one per item identifier.

use std::path::Path;

use gridstash_core::{ItemId, EMPTY_ITEM};
use image::ImageReader;
use thiserror::Error;

use crate::layout::CellRect;

/// Edge length of one item tile in atlas pixels.
pub const DEFAULT_TILE_SIZE: u32 = 8;

/// Errors that can occur while loading an atlas image.
#[derive(Debug, Error)]
pub enum AtlasError {
    /// Generic IO failure.
    #[error("failed to read atlas image: {0}")]
    Io(#[from] std::io::Error),
    /// Image decoding failed.
    #[error("failed to decode atlas image: {0}")]
    Image(#[from] image::ImageError),
    /// Dimensions or pixel data are inconsistent.
    #[error("invalid atlas: {0}")]
    Invalid(String),
}

/// RGBA atlas image with its tile grid.
#[derive(Debug, Clone)]
pub struct SpriteAtlas {
    width: u32,
    height: u32,
    tile_size: u32,
    pixels: Vec<u8>,
}

impl SpriteAtlas {
    /// Decode a PNG (or JPEG) atlas from disk.
    pub fn load(path: impl AsRef<Path>, tile_size: u32) -> Result<Self, AtlasError> {
        let image = ImageReader::open(path)?.decode()?;
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba(width, height, rgba.into_raw(), tile_size)
    }

    /// Wrap raw RGBA pixels (`width * height * 4` bytes).
    pub fn from_rgba(
        width: u32,
        height: u32,
        pixels: Vec<u8>,
        tile_size: u32,
    ) -> Result<Self, AtlasError> {
        if tile_size == 0 {
            return Err(AtlasError::Invalid("tile_size must be > 0".into()));
        }
        if width < tile_size || height < tile_size {
            return Err(AtlasError::Invalid(format!(
                "atlas {width}x{height} is smaller than one {tile_size}px tile"
            )));
        }
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(AtlasError::Invalid(format!(
                "expected {expected} bytes of RGBA data, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            tile_size,
            pixels,
        })
    }

    /// Generate a stand-in atlas of solid, bordered tiles.
    pub fn placeholder(tile_size: u32, columns: u32, rows: u32) -> Self {
        let tile_size = tile_size.max(1);
        let width = tile_size * columns.max(1);
        let height = tile_size * rows.max(1);
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                let tile = (y / tile_size) * columns.max(1) + x / tile_size;
                let [r, g, b] = tile_color(tile);
                let (tx, ty) = (x % tile_size, y % tile_size);
                let border = tx == 0 || ty == 0 || tx == tile_size - 1 || ty == tile_size - 1;
                if border {
                    pixels.extend_from_slice(&[r / 2, g / 2, b / 2, 255]);
                } else {
                    pixels.extend_from_slice(&[r, g, b, 255]);
                }
            }
        }
        Self {
            width,
            height,
            tile_size,
            pixels,
        }
    }

    /// Atlas width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Atlas height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Tile edge length in pixels.
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Tiles per atlas row.
    pub fn columns(&self) -> u32 {
        self.width / self.tile_size
    }

    /// Tile rows in the atlas.
    pub fn rows(&self) -> u32 {
        self.height / self.tile_size
    }

    /// Pixel rectangle of the sprite for `item`, `None` for the empty item or
    /// identifiers past the end of the atlas.
    pub fn tile_rect(&self, item: ItemId) -> Option<CellRect> {
        if item == EMPTY_ITEM {
            return None;
        }
        let tile = u32::from(item) - 1;
        let column = tile % self.columns();
        let row = tile / self.columns();
        if row >= self.rows() {
            return None;
        }
        let size = self.tile_size as i32;
        Some(CellRect {
            x: column as i32 * size,
            y: row as i32 * size,
            width: size,
            height: size,
        })
    }

    /// Normalized texture coordinates of the sprite for `item`.
    pub fn uv_rect(&self, item: ItemId) -> Option<egui::Rect> {
        let rect = self.tile_rect(item)?;
        let (w, h) = (self.width as f32, self.height as f32);
        Some(egui::Rect::from_min_max(
            egui::pos2(rect.x as f32 / w, rect.y as f32 / h),
            egui::pos2(
                (rect.x + rect.width) as f32 / w,
                (rect.y + rect.height) as f32 / h,
            ),
        ))
    }

    /// Copy the pixels into an egui image for texture upload.
    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgba_unmultiplied(
            [self.width as usize, self.height as usize],
            &self.pixels,
        )
    }
}

fn tile_color(tile: u32) -> [u8; 3] {
    const PALETTE: [[u8; 3]; 8] = [
        [200, 70, 60],
        [70, 170, 80],
        [70, 110, 210],
        [220, 190, 60],
        [170, 80, 190],
        [60, 190, 190],
        [230, 130, 50],
        [180, 180, 180],
    ];
    PALETTE[tile as usize % PALETTE.len()]
}
