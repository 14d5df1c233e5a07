use std::path::{Path, PathBuf};

use image::ImageReader;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to open tile sheet {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode tile sheet {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error(
        "tile sheet is {width}x{height}, not a multiple of the {tile_size}px tile size"
    )]
    Geometry {
        width: u32,
        height: u32,
        tile_size: u32,
    },
}

/// RGBA tile atlas. Tiles are square, laid out left-to-right, top-to-bottom;
/// a tile index addresses them in that order.
#[derive(Debug)]
pub struct TileSheet {
    tile_size: u32,
    columns: u32,
    rows: u32,
    width: u32,
    rgba: Vec<u8>,
}

impl TileSheet {
    pub fn load(path: &Path, tile_size: u32) -> Result<Self, AssetError> {
        let reader = ImageReader::open(path).map_err(|source| AssetError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let image = reader
            .decode()
            .map_err(|source| AssetError::Decode {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();

        let (width, height) = image.dimensions();
        Self::from_rgba(image.into_raw(), width, height, tile_size)
    }

    pub fn from_rgba(
        rgba: Vec<u8>,
        width: u32,
        height: u32,
        tile_size: u32,
    ) -> Result<Self, AssetError> {
        if tile_size == 0 || width % tile_size != 0 || height % tile_size != 0 {
            return Err(AssetError::Geometry {
                width,
                height,
                tile_size,
            });
        }
        Ok(Self {
            tile_size,
            columns: width / tile_size,
            rows: height / tile_size,
            width,
            rgba,
        })
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn tile_count(&self) -> u32 {
        self.columns * self.rows
    }

    /// Top-left sheet pixel of the given tile, or None past the last tile.
    pub(crate) fn tile_origin(&self, tile_index: u32) -> Option<(u32, u32)> {
        if tile_index >= self.tile_count() {
            return None;
        }
        Some((
            (tile_index % self.columns) * self.tile_size,
            (tile_index / self.columns) * self.tile_size,
        ))
    }

    pub(crate) fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let mut color = [0u8; 4];
        color.copy_from_slice(&self.rgba[offset..offset + 4]);
        color
    }
}
