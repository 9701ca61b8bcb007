//! Collaborator interfaces and the bundled backends
//!
//! ## Vision side
//!
//! - [`ScreenActionProvider`] - screen capture, size queries and highlight overlays
//! - [`ImageFinder`] - template matching
//! - [`TextReader`] - OCR
//! - [`DataSink`] - persisting images
//!
//! ## Native input side
//!
//! - [`MouseActionProvider`], [`KeyboardActionProvider`], [`ClipboardActionProvider`]
//!
//! Bundled backends: [`ScreenCapture`] (xcap), [`EnigoInput`] (enigo) and
//! [`ImageWriter`] (image crate). Matching and OCR engines are supplied by the caller.

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

use crate::geometry::{Point, Region};
use crate::matching::{ImageMatchRequest, MatchResult, OcrResult};
use crate::raster::Image;

pub mod image_writer;
pub mod input;
pub mod screenshot;

pub use image_writer::ImageWriter;
pub use input::{EnigoInput, KeyCode, MouseButton};
pub use screenshot::ScreenCapture;

/// Access to the main display
#[async_trait]
pub trait ScreenActionProvider: Send + Sync {
    /// Capture the whole main screen
    async fn grab_screen(&self) -> Result<Image>;

    /// Capture a logical region of the main screen
    async fn grab_screen_region(&self, region: &Region) -> Result<Image>;

    /// Overlay a region for `duration`, resolving once the overlay is gone
    async fn highlight_screen_region(
        &self,
        region: &Region,
        duration: Duration,
        opacity: f64,
    ) -> Result<()>;

    /// Width as reported by the OS (logical, not pixels)
    async fn screen_width(&self) -> Result<u32>;

    /// Height as reported by the OS (logical, not pixels)
    async fn screen_height(&self) -> Result<u32>;

    /// Full screen as a region anchored at the origin
    async fn screen_size(&self) -> Result<Region> {
        let width = self.screen_width().await?;
        let height = self.screen_height().await?;
        Ok(Region::new(0.0, 0.0, width as f64, height as f64))
    }
}

/// Template matching engine
#[async_trait]
pub trait ImageFinder: Send + Sync {
    /// Best match of the needle inside the request's search region
    async fn find_match(&self, request: &ImageMatchRequest) -> Result<MatchResult>;

    /// Every match of the needle inside the request's search region
    async fn find_matches(&self, request: &ImageMatchRequest) -> Result<Vec<MatchResult>>;
}

/// OCR engine
#[async_trait]
pub trait TextReader: Send + Sync {
    /// Full text of an image
    async fn read_text(&self, image: &Image) -> Result<String>;

    /// Word-level results; bounding boxes are relative to `image`
    async fn read_words(&self, image: &Image) -> Result<Vec<OcrResult>>;
}

/// Image persistence
#[async_trait]
pub trait DataSink: Send + Sync {
    /// Write `image` to `path`; missing parent directories are created
    async fn store(&self, image: &Image, path: &Path) -> Result<()>;
}

#[async_trait]
pub trait MouseActionProvider: Send + Sync {
    async fn set_mouse_position(&self, position: Point) -> Result<()>;

    async fn current_mouse_position(&self) -> Result<Point>;

    async fn press_button(&self, button: MouseButton) -> Result<()>;

    async fn release_button(&self, button: MouseButton) -> Result<()>;

    async fn click(&self, button: MouseButton) -> Result<()> {
        self.press_button(button).await?;
        self.release_button(button).await
    }

    /// Scroll by `dx` columns and `dy` rows; positive values scroll right and down
    async fn scroll(&self, dx: i32, dy: i32) -> Result<()>;
}

#[async_trait]
pub trait KeyboardActionProvider: Send + Sync {
    async fn type_text(&self, text: &str) -> Result<()>;

    async fn press_key(&self, key: KeyCode) -> Result<()>;

    async fn release_key(&self, key: KeyCode) -> Result<()>;
}

#[async_trait]
pub trait ClipboardActionProvider: Send + Sync {
    async fn copy(&self, text: &str) -> Result<()>;

    async fn paste(&self) -> Result<String>;
}
