use anyhow::{anyhow, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::geometry::Region;
use crate::matching::{best_text_match, MatchRequest, MatchResult, OcrResult};
use crate::provider::{DataSink, ImageFinder, ImageWriter, ScreenActionProvider, TextReader};
use crate::raster::Image;

/// Bundles every image based collaborator behind one interface
///
/// Screen access and persistence have bundled defaults; a matching engine and
/// an OCR engine have to be attached before image or text searches work.
pub struct VisionAdapter {
    screen: Arc<dyn ScreenActionProvider>,
    finder: Option<Arc<dyn ImageFinder>>,
    reader: Option<Arc<dyn TextReader>>,
    sink: Arc<dyn DataSink>,
}

impl VisionAdapter {
    pub fn new(screen: Arc<dyn ScreenActionProvider>) -> Self {
        Self {
            screen,
            finder: None,
            reader: None,
            sink: Arc::new(ImageWriter::new()),
        }
    }

    pub fn with_finder(mut self, finder: Arc<dyn ImageFinder>) -> Self {
        self.finder = Some(finder);
        self
    }

    pub fn with_text_reader(mut self, reader: Arc<dyn TextReader>) -> Self {
        self.reader = Some(reader);
        self
    }

    pub fn with_data_sink(mut self, sink: Arc<dyn DataSink>) -> Self {
        self.sink = sink;
        self
    }

    fn finder(&self) -> Result<&Arc<dyn ImageFinder>> {
        self.finder
            .as_ref()
            .ok_or_else(|| anyhow!("No image finder configured"))
    }

    fn reader(&self) -> Result<&Arc<dyn TextReader>> {
        self.reader
            .as_ref()
            .ok_or_else(|| anyhow!("No text reader configured"))
    }

    pub async fn grab_screen(&self) -> Result<Image> {
        self.screen.grab_screen().await
    }

    pub async fn grab_screen_region(&self, region: &Region) -> Result<Image> {
        self.screen.grab_screen_region(region).await
    }

    pub async fn highlight_screen_region(
        &self,
        region: &Region,
        duration: Duration,
        opacity: f64,
    ) -> Result<()> {
        self.screen
            .highlight_screen_region(region, duration, opacity)
            .await
    }

    pub async fn screen_width(&self) -> Result<u32> {
        self.screen.screen_width().await
    }

    pub async fn screen_height(&self) -> Result<u32> {
        self.screen.screen_height().await
    }

    pub async fn screen_size(&self) -> Result<Region> {
        self.screen.screen_size().await
    }

    /// Search inside the request's region; the location is relative to that region
    ///
    /// Image requests go to the matching engine. Text requests run word OCR
    /// on the region and yield the best qualifying word, or a zero-confidence
    /// result when no word qualifies.
    pub async fn find_on_screen_region(&self, request: &MatchRequest) -> Result<MatchResult> {
        match request {
            MatchRequest::Image(req) => self.finder()?.find_match(req).await,
            MatchRequest::Text(req) => {
                let region_image = req.haystack.slice(&req.search_region)?;
                let words = self.reader()?.read_words(&region_image).await?;
                Ok(best_text_match(&words, &req.search_text, req.confidence)
                    .map(|word| MatchResult::new(word.bounding_box, word.confidence))
                    .unwrap_or_else(|| MatchResult::new(Region::default(), 0.0)))
            }
        }
    }

    /// Every image match inside the request's region
    pub async fn find_all_on_screen_region(&self, request: &MatchRequest) -> Result<Vec<MatchResult>> {
        match request {
            MatchRequest::Image(req) => self.finder()?.find_matches(req).await,
            MatchRequest::Text(req) => {
                let region_image = req.haystack.slice(&req.search_region)?;
                let words = self.reader()?.read_words(&region_image).await?;
                Ok(words
                    .into_iter()
                    .filter(|w| w.confidence >= req.confidence && w.text.contains(&req.search_text))
                    .map(|w| MatchResult::new(w.bounding_box, w.confidence))
                    .collect())
            }
        }
    }

    pub async fn save_image(&self, image: &Image, path: &Path) -> Result<()> {
        self.sink.store(image, path).await
    }

    pub async fn read_text(&self, image: &Image) -> Result<String> {
        self.reader()?.read_text(image).await
    }

    pub async fn read_words(&self, image: &Image) -> Result<Vec<OcrResult>> {
        self.reader()?.read_words(image).await
    }
}
