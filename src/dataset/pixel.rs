//! Image decoding utilities for the converter.
//!
//! Files are identified by their content rather than their extension, then
//! expanded to RGBA and packed one `u32` per pixel in ARGB order
//! (`a << 24 | r << 16 | g << 8 | b`). Grayscale mode later keeps only the
//! low byte, which for a gray source is the intensity itself.
use std::path::Path;

use image::io::Reader as ImageReader;
use image::{DynamicImage, Rgba};

use crate::error::{Error, Result};

/// A decoded image, one packed ARGB value per pixel, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u32>,
}

fn pack_argb(pixel: Rgba<u8>) -> u32 {
    let [r, g, b, a] = pixel.0;
    (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Packs every pixel of `img`, rows top to bottom, left to right within a row.
fn pack_image(img: &DynamicImage) -> RasterImage {
    let rgba = img.to_rgba8();
    RasterImage {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.pixels().map(|&p| pack_argb(p)).collect(),
    }
}

fn open_guessed(path: &Path) -> Result<ImageReader<std::io::BufReader<std::fs::File>>> {
    let to_decode_err = |e: std::io::Error| Error::ImageDecode {
        path: path.to_path_buf(),
        source: image::ImageError::IoError(e),
    };
    ImageReader::open(path)
        .map_err(to_decode_err)?
        .with_guessed_format()
        .map_err(to_decode_err)
}

/// Reads only the image header and returns `(width, height)`.
pub fn read_dimensions(path: &Path) -> Result<(u32, u32)> {
    open_guessed(path)?
        .into_dimensions()
        .map_err(|source| Error::ImageDecode {
            path: path.to_path_buf(),
            source,
        })
}

/// Fully decodes `path` and packs its pixels.
pub fn decode_packed(path: &Path) -> Result<RasterImage> {
    let img = open_guessed(path)?
        .decode()
        .map_err(|source| Error::ImageDecode {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(pack_image(&img))
}
