//! Captured image buffers and file formats

use anyhow::{anyhow, Result};
use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};
use std::env;
use std::path::PathBuf;

use crate::geometry::{PixelDensity, Region};

/// Raw pixel buffer plus the metadata needed to interpret it
///
/// Pixel data is row-major, tightly packed, `channels` bytes per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub channels: u8,
    pub pixel_density: PixelDensity,
}

impl Image {
    pub fn new(
        width: u32,
        height: u32,
        data: Vec<u8>,
        channels: u8,
        pixel_density: PixelDensity,
    ) -> Self {
        Self {
            width,
            height,
            data,
            channels,
            pixel_density,
        }
    }

    pub fn from_rgba(image: RgbaImage, pixel_density: PixelDensity) -> Self {
        let (width, height) = image.dimensions();
        Self::new(width, height, image.into_raw(), 4, pixel_density)
    }

    pub fn has_alpha_channel(&self) -> bool {
        self.channels > 3
    }

    /// Convert into an `image` crate buffer for processing or encoding
    pub fn to_dynamic(&self) -> Result<DynamicImage> {
        let (w, h, data) = (self.width, self.height, self.data.clone());
        let image = match self.channels {
            1 => GrayImage::from_raw(w, h, data).map(DynamicImage::ImageLuma8),
            3 => RgbImage::from_raw(w, h, data).map(DynamicImage::ImageRgb8),
            4 => RgbaImage::from_raw(w, h, data).map(DynamicImage::ImageRgba8),
            n => return Err(anyhow!("Unsupported channel count: {}", n)),
        };
        image.ok_or_else(|| anyhow!("Pixel buffer does not match {}x{} dimensions", w, h))
    }

    /// Cut a logical screen region out of this image
    ///
    /// The region is scaled by the image's pixel density and clamped to the
    /// image bounds. The result keeps the source density.
    pub fn slice(&self, roi: &Region) -> Result<Image> {
        let scaled = roi.scaled(&self.pixel_density);
        let x = (scaled.left.round().max(0.0) as u32).min(self.width);
        let y = (scaled.top.round().max(0.0) as u32).min(self.height);
        let width = (scaled.width.round() as u32).min(self.width - x);
        let height = (scaled.height.round() as u32).min(self.height - y);

        let cropped = self.to_dynamic()?.crop_imm(x, y, width, height);
        Ok(Image::new(
            cropped.width(),
            cropped.height(),
            cropped.into_bytes(),
            self.channels,
            self.pixel_density,
        ))
    }
}

/// Output format for persisted screenshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileType {
    #[default]
    Png,
    Jpg,
}

impl FileType {
    pub fn extension(&self) -> &'static str {
        match self {
            FileType::Png => "png",
            FileType::Jpg => "jpg",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(FileType::Png),
            "jpg" | "jpeg" => Some(FileType::Jpg),
            _ => None,
        }
    }
}

/// Where and how a screenshot is written
///
/// Output files are named `{prefix}{name}{postfix}.{extension}` inside `path`,
/// which defaults to the working directory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptureParameters {
    pub file_type: FileType,
    pub path: Option<PathBuf>,
    pub prefix: String,
    pub postfix: String,
}

impl CaptureParameters {
    pub fn new(file_type: FileType) -> Self {
        Self {
            file_type,
            ..Self::default()
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_postfix(mut self, postfix: impl Into<String>) -> Self {
        self.postfix = postfix.into();
        self
    }

    pub fn output_path(&self, name: &str) -> PathBuf {
        let directory = self
            .path
            .clone()
            .unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
        directory.join(format!(
            "{}{}{}.{}",
            self.prefix,
            name,
            self.postfix,
            self.file_type.extension()
        ))
    }
}
