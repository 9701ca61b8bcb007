use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use image::{DynamicImage, ImageFormat};
use std::path::Path;
use tokio::task;

use super::DataSink;
use crate::raster::Image;

/// Persists images with the `image` crate, format chosen by file extension
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageWriter;

impl ImageWriter {
    pub fn new() -> Self {
        Self
    }

    fn write(image: &Image, path: &Path) -> Result<()> {
        let format = ImageFormat::from_path(path)
            .map_err(|e| anyhow!("Unsupported output format for {}: {}", path.display(), e))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let mut output = image.to_dynamic()?;
        // JPEG cannot carry alpha
        if format == ImageFormat::Jpeg && image.has_alpha_channel() {
            output = DynamicImage::ImageRgb8(output.to_rgb8());
        }

        output
            .save_with_format(path, format)
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

#[async_trait]
impl DataSink for ImageWriter {
    async fn store(&self, image: &Image, path: &Path) -> Result<()> {
        let image = image.clone();
        let path = path.to_path_buf();
        task::spawn_blocking(move || {
            tracing::debug!("Writing {}x{} image to {}", image.width, image.height, path.display());
            Self::write(&image, &path)
        })
        .await?
    }
}
