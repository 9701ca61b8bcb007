//! Locate-and-act orchestration over the main screen
//!
//! [`Screen`] captures the display, delegates matching and OCR to the
//! [`VisionAdapter`], gates results on confidence, runs registered hooks and
//! translates match locations into screen coordinates.

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::adapter::VisionAdapter;
use crate::config::ScreenConfig;
use crate::error::{AutomationError, Result};
use crate::geometry::Region;
use crate::matching::{best_text_match, ImageMatchRequest, LocationParameters, MatchResult};
use crate::poll;
use crate::raster::CaptureParameters;

/// Callback run after a successful `find`, before it returns
pub type FindHook = Arc<dyn Fn(MatchResult) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

/// Hooks per search reference, in registration order
///
/// References iterate in the order they were first registered; the hooks of
/// one reference iterate in the order they were added. Nothing is deduplicated.
#[derive(Clone, Default)]
pub struct HookRegistry {
    index: HashMap<String, usize>,
    entries: Vec<(String, Vec<FindHook>)>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, target: impl Into<String>, hook: FindHook) {
        let target = target.into();
        match self.index.get(&target) {
            Some(&slot) => self.entries[slot].1.push(hook),
            None => {
                self.index.insert(target.clone(), self.entries.len());
                self.entries.push((target, vec![hook]));
            }
        }
    }

    pub fn hooks_for(&self, target: &str) -> &[FindHook] {
        self.index
            .get(target)
            .map(|&slot| self.entries[slot].1.as_slice())
            .unwrap_or(&[])
    }

    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(target, _)| target.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Access to the content of the main display
pub struct Screen {
    pub config: ScreenConfig,
    vision: Arc<VisionAdapter>,
    hooks: HookRegistry,
}

impl Screen {
    pub fn new(vision: Arc<VisionAdapter>) -> Self {
        Self::with_config(vision, ScreenConfig::default())
    }

    pub fn with_config(vision: Arc<VisionAdapter>, config: ScreenConfig) -> Self {
        Self {
            config,
            vision,
            hooks: HookRegistry::new(),
        }
    }

    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    /// Main screen width as reported by the OS
    ///
    /// High density displays may capture more pixels than this.
    pub async fn width(&self) -> Result<u32> {
        self.vision
            .screen_width()
            .await
            .map_err(|e| AutomationError::io("Querying screen width failed", e))
    }

    /// Main screen height as reported by the OS
    pub async fn height(&self) -> Result<u32> {
        self.vision
            .screen_height()
            .await
            .map_err(|e| AutomationError::io("Querying screen height failed", e))
    }

    fn resolve(&self, template: &str) -> PathBuf {
        self.config.resource_directory.join(template)
    }

    async fn search_region(&self, params: &LocationParameters, context: &str) -> Result<Region> {
        match params.search_region {
            Some(region) => Ok(region),
            None => self
                .vision
                .screen_size()
                .await
                .map_err(|e| AutomationError::io(context, e)),
        }
    }

    /// Search for a template image on the main screen
    ///
    /// `template` is resolved against `config.resource_directory`. Hooks
    /// registered for `template` run in order before the location is returned.
    /// The returned region is in absolute screen coordinates.
    pub async fn find(&self, template: &str, params: Option<&LocationParameters>) -> Result<Region> {
        let params = params.copied().unwrap_or_default();
        let min_match = params.confidence_or(self.config.confidence)?;
        let context = format!("Searching for {} failed", template);
        let search_region = self.search_region(&params, &context).await?;
        let needle = self.resolve(template);

        let screen = self
            .vision
            .grab_screen()
            .await
            .map_err(|e| AutomationError::io(&context, e))?;

        let request = ImageMatchRequest::new(screen, needle, search_region, min_match)
            .with_multiple_scales(params.search_multiple_scales.unwrap_or(true));

        let result = self
            .vision
            .find_on_screen_region(&request.into())
            .await
            .map_err(|e| AutomationError::io(&context, e))?;

        // NaN never qualifies
        if result.confidence.is_nan() || result.confidence < min_match {
            tracing::debug!(
                "Rejecting match for {} at {} ({} < {})",
                template,
                result.location,
                result.confidence,
                min_match
            );
            return Err(AutomationError::NotFound {
                target: template.to_string(),
                required: min_match,
                actual: result.confidence,
            });
        }

        for hook in self.hooks.hooks_for(template) {
            hook.as_ref()(result)
                .await
                .map_err(|e| AutomationError::io(&context, e))?;
        }

        let location = search_region.to_absolute(&result.location);
        tracing::info!(
            "Found {} at {} with confidence {}",
            template,
            location,
            result.confidence
        );

        if self.config.auto_highlight {
            self.highlight(&location).await
        } else {
            Ok(location)
        }
    }

    /// Search for a piece of text on the main screen
    ///
    /// Unlike [`Screen::find`], the returned bounding box is relative to the
    /// search region, not to the screen. It is in pixels of the captured crop,
    /// so on a high density display it is scaled by the capture's pixel density.
    pub async fn find_text(&self, text: &str, params: Option<&LocationParameters>) -> Result<Region> {
        let params = params.copied().unwrap_or_default();
        let min_match = params.confidence_or(self.config.text_confidence)?;
        let context = format!("Searching for text '{}' failed", text);
        let search_region = self.search_region(&params, &context).await?;

        let screen = self
            .vision
            .grab_screen()
            .await
            .map_err(|e| AutomationError::io(&context, e))?;
        let region_image = screen
            .slice(&search_region)
            .map_err(|e| AutomationError::io(&context, e))?;

        let findings = self
            .vision
            .read_words(&region_image)
            .await
            .map_err(|e| AutomationError::io(&context, e))?;
        tracing::debug!("OCR produced {} words in {}", findings.len(), search_region);

        match best_text_match(&findings, text, min_match) {
            Some(word) => Ok(word.bounding_box),
            None => Err(AutomationError::TextNotFound {
                text: text.to_string(),
                required: min_match,
                region: search_region,
            }),
        }
    }

    /// Read all text inside a screen region
    pub async fn read_text(&self, region: &Region) -> Result<String> {
        let context = format!("Reading text from {} failed", region);
        let screen = self
            .vision
            .grab_screen()
            .await
            .map_err(|e| AutomationError::io(&context, e))?;
        let region_image = screen
            .slice(region)
            .map_err(|e| AutomationError::io(&context, e))?;

        let text = self
            .vision
            .read_text(&region_image)
            .await
            .map_err(|e| AutomationError::io(&context, e))?;

        let text = text.trim();
        if text.is_empty() {
            return Err(AutomationError::EmptyResult(*region));
        }
        Ok(text.to_string())
    }

    /// Repeat [`Screen::find`] until it succeeds or `timeout_ms` elapses
    ///
    /// `None` uses `config.wait_timeout_ms`. Attempts are spaced by
    /// `config.poll_interval_ms`.
    pub async fn wait_for(
        &self,
        template: &str,
        timeout_ms: Option<u64>,
        params: Option<&LocationParameters>,
    ) -> Result<Region> {
        let timeout_ms = timeout_ms.unwrap_or(self.config.wait_timeout_ms);
        tracing::debug!("Waiting up to {} ms for {}", timeout_ms, template);
        poll::timeout(
            Duration::from_millis(self.config.poll_interval_ms),
            Duration::from_millis(timeout_ms),
            || self.find(template, params),
        )
        .await
    }

    /// Register a callback to run whenever `template` is found
    pub fn on<F, Fut>(&mut self, template: impl Into<String>, callback: F)
    where
        F: Fn(MatchResult) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let hook: FindHook = Arc::new(move |result| callback(result).boxed());
        self.hooks.register(template, hook);
    }

    /// Save a screenshot of the main screen, returning the written path
    pub async fn capture(&self, file_name: &str, params: &CaptureParameters) -> Result<PathBuf> {
        let output = params.output_path(file_name);
        let context = format!("Capturing screen to {} failed", output.display());

        let screen = self
            .vision
            .grab_screen()
            .await
            .map_err(|e| AutomationError::io(&context, e))?;
        self.vision
            .save_image(&screen, &output)
            .await
            .map_err(|e| AutomationError::io(&context, e))?;

        tracing::info!("Saved screenshot to {}", output.display());
        Ok(output)
    }

    /// Save a screenshot of a screen region, returning the written path
    pub async fn capture_region(
        &self,
        file_name: &str,
        region: &Region,
        params: &CaptureParameters,
    ) -> Result<PathBuf> {
        let output = params.output_path(file_name);
        let context = format!("Capturing {} to {} failed", region, output.display());

        let image = self
            .vision
            .grab_screen_region(region)
            .await
            .map_err(|e| AutomationError::io(&context, e))?;
        self.vision
            .save_image(&image, &output)
            .await
            .map_err(|e| AutomationError::io(&context, e))?;

        tracing::info!("Saved region screenshot to {}", output.display());
        Ok(output)
    }

    /// Overlay `region` for the configured duration and opacity, then return it
    pub async fn highlight(&self, region: &Region) -> Result<Region> {
        self.vision
            .highlight_screen_region(
                region,
                self.config.highlight_duration(),
                self.config.highlight_opacity,
            )
            .await
            .map_err(|e| AutomationError::io(format!("Highlighting {} failed", region), e))?;
        Ok(*region)
    }
}
