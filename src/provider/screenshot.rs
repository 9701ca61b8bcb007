//! Cross-platform screenshot capture using xcap
//!
//! Captures the primary monitor. xcap reports monitor sizes in logical
//! coordinates while captured frames use physical pixels; the ratio between the
//! two becomes the image's pixel density.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::time::Duration;
use tokio::task;
use xcap::Monitor;

use super::ScreenActionProvider;
use crate::geometry::{PixelDensity, Region};
use crate::raster::Image;

/// Screen access through xcap
#[derive(Debug, Clone, Copy, Default)]
pub struct ScreenCapture;

impl ScreenCapture {
    pub fn new() -> Self {
        Self
    }

    fn primary_monitor() -> Result<Monitor> {
        let monitors = Monitor::all().map_err(|e| anyhow!("Failed to get monitors: {}", e))?;

        monitors
            .into_iter()
            .find(|m| m.is_primary())
            .ok_or_else(|| anyhow!("No primary monitor found"))
    }

    /// Capture the entire primary monitor
    pub fn capture_primary_screen() -> Result<Image> {
        let primary = Self::primary_monitor()?;

        let frame = primary
            .capture_image()
            .map_err(|e| anyhow!("Failed to capture screen: {}", e))?;

        let density = PixelDensity::from_sizes(frame.dimensions(), (primary.width(), primary.height()));
        Ok(Image::from_rgba(frame, density))
    }

    /// Get primary monitor dimensions
    pub fn primary_screen_size() -> Result<(u32, u32)> {
        let primary = Self::primary_monitor()?;
        Ok((primary.width(), primary.height()))
    }
}

#[async_trait]
impl ScreenActionProvider for ScreenCapture {
    async fn grab_screen(&self) -> Result<Image> {
        task::spawn_blocking(Self::capture_primary_screen).await?
    }

    async fn grab_screen_region(&self, region: &Region) -> Result<Image> {
        let screen = self.grab_screen().await?;
        screen.slice(region)
    }

    async fn highlight_screen_region(
        &self,
        region: &Region,
        duration: Duration,
        opacity: f64,
    ) -> Result<()> {
        // xcap has no overlay windows
        tracing::warn!(
            "Highlight of {} ({:?}, opacity {}) is not supported by the xcap backend",
            region,
            duration,
            opacity
        );
        Ok(())
    }

    async fn screen_width(&self) -> Result<u32> {
        let (width, _) = task::spawn_blocking(Self::primary_screen_size).await??;
        Ok(width)
    }

    async fn screen_height(&self) -> Result<u32> {
        let (_, height) = task::spawn_blocking(Self::primary_screen_size).await??;
        Ok(height)
    }

    async fn screen_size(&self) -> Result<Region> {
        let (width, height) = task::spawn_blocking(Self::primary_screen_size).await??;
        Ok(Region::new(0.0, 0.0, width as f64, height as f64))
    }
}
