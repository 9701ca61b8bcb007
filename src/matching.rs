//! Search requests and their results

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AutomationError, Result};
use crate::geometry::Region;
use crate::raster::Image;

/// Search for a template image inside a haystack
#[derive(Debug, Clone)]
pub struct ImageMatchRequest {
    pub haystack: Image,
    pub path_to_needle: PathBuf,
    pub search_region: Region,
    pub confidence: f64,
    pub search_multiple_scales: bool,
}

impl ImageMatchRequest {
    pub fn new(
        haystack: Image,
        path_to_needle: impl Into<PathBuf>,
        search_region: Region,
        confidence: f64,
    ) -> Self {
        Self {
            haystack,
            path_to_needle: path_to_needle.into(),
            search_region,
            confidence,
            search_multiple_scales: true,
        }
    }

    pub fn with_multiple_scales(mut self, enabled: bool) -> Self {
        self.search_multiple_scales = enabled;
        self
    }
}

/// Search for a piece of text inside a haystack
#[derive(Debug, Clone)]
pub struct TextMatchRequest {
    pub haystack: Image,
    pub search_text: String,
    pub search_region: Region,
    pub confidence: f64,
}

impl TextMatchRequest {
    pub fn new(
        haystack: Image,
        search_text: impl Into<String>,
        search_region: Region,
        confidence: f64,
    ) -> Self {
        Self {
            haystack,
            search_text: search_text.into(),
            search_region,
            confidence,
        }
    }
}

/// What to search for
#[derive(Debug, Clone)]
pub enum MatchRequest {
    Image(ImageMatchRequest),
    Text(TextMatchRequest),
}

impl MatchRequest {
    pub fn search_region(&self) -> &Region {
        match self {
            MatchRequest::Image(req) => &req.search_region,
            MatchRequest::Text(req) => &req.search_region,
        }
    }

    pub fn confidence(&self) -> f64 {
        match self {
            MatchRequest::Image(req) => req.confidence,
            MatchRequest::Text(req) => req.confidence,
        }
    }
}

impl From<ImageMatchRequest> for MatchRequest {
    fn from(req: ImageMatchRequest) -> Self {
        MatchRequest::Image(req)
    }
}

impl From<TextMatchRequest> for MatchRequest {
    fn from(req: TextMatchRequest) -> Self {
        MatchRequest::Text(req)
    }
}

/// A located match, relative to the searched region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub location: Region,
    pub confidence: f64,
}

impl MatchResult {
    pub fn new(location: Region, confidence: f64) -> Self {
        Self {
            location,
            confidence,
        }
    }
}

/// One recognized word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrResult {
    pub text: String,
    pub bounding_box: Region,
    pub confidence: f64,
}

impl OcrResult {
    pub fn new(text: impl Into<String>, bounding_box: Region, confidence: f64) -> Self {
        Self {
            text: text.into(),
            bounding_box,
            confidence,
        }
    }
}

/// Per-call overrides for a search
///
/// Every field left as `None` falls back to the orchestrator's configuration
/// (search region falls back to the full screen, scales to `true`). Merging
/// never writes back into that configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocationParameters {
    pub search_region: Option<Region>,
    pub confidence: Option<f64>,
    pub search_multiple_scales: Option<bool>,
}

impl LocationParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_region(mut self, region: Region) -> Self {
        self.search_region = Some(region);
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_multiple_scales(mut self, enabled: bool) -> Self {
        self.search_multiple_scales = Some(enabled);
        self
    }

    /// Resolve the confidence to use, rejecting overrides outside [0, 1]
    pub fn confidence_or(&self, default: f64) -> Result<f64> {
        match self.confidence {
            Some(c) if !(0.0..=1.0).contains(&c) => Err(AutomationError::InvalidConfidence(c)),
            Some(c) => Ok(c),
            None => Ok(default),
        }
    }
}

/// Pick the best OCR word for a text search
///
/// Candidates must reach `min_confidence` and contain `search_text`. The
/// highest confidence wins; on ties the first encountered is kept.
pub fn best_text_match<'a>(
    findings: &'a [OcrResult],
    search_text: &str,
    min_confidence: f64,
) -> Option<&'a OcrResult> {
    findings
        .iter()
        .filter(|f| !f.confidence.is_nan() && f.confidence >= min_confidence)
        .filter(|f| f.text.contains(search_text))
        .fold(None, |best: Option<&OcrResult>, candidate| match best {
            Some(b) if b.confidence >= candidate.confidence => Some(b),
            _ => Some(candidate),
        })
}
