//! Scripted collaborators shared by the integration tests

#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use deskpilot::{
    DataSink, Image, ImageFinder, ImageMatchRequest, KeyCode, KeyboardActionProvider,
    MatchResult, MouseActionProvider, MouseButton, NativeAdapter, OcrResult, PixelDensity, Point,
    Region, Screen, ScreenActionProvider, ScreenConfig, TextReader, VisionAdapter,
};

pub const SCREEN_WIDTH: u32 = 200;
pub const SCREEN_HEIGHT: u32 = 100;

/// A blank screen of fixed size
#[derive(Default)]
pub struct FakeScreen {
    pub fail_grab: bool,
    pub grabs: AtomicUsize,
    pub highlights: Mutex<Vec<(Region, Duration, f64)>>,
}

impl FakeScreen {
    pub fn failing() -> Self {
        Self {
            fail_grab: true,
            ..Self::default()
        }
    }

    fn frame() -> Image {
        let len = (SCREEN_WIDTH * SCREEN_HEIGHT * 4) as usize;
        Image::new(SCREEN_WIDTH, SCREEN_HEIGHT, vec![0; len], 4, PixelDensity::default())
    }
}

#[async_trait]
impl ScreenActionProvider for FakeScreen {
    async fn grab_screen(&self) -> Result<Image> {
        self.grabs.fetch_add(1, Ordering::SeqCst);
        if self.fail_grab {
            return Err(anyhow!("display unavailable"));
        }
        Ok(Self::frame())
    }

    async fn grab_screen_region(&self, region: &Region) -> Result<Image> {
        self.grab_screen().await?.slice(region)
    }

    async fn highlight_screen_region(
        &self,
        region: &Region,
        duration: Duration,
        opacity: f64,
    ) -> Result<()> {
        self.highlights
            .lock()
            .unwrap()
            .push((*region, duration, opacity));
        Ok(())
    }

    async fn screen_width(&self) -> Result<u32> {
        Ok(SCREEN_WIDTH)
    }

    async fn screen_height(&self) -> Result<u32> {
        Ok(SCREEN_HEIGHT)
    }
}

/// Recorded fields of an image match request
#[derive(Debug, Clone, PartialEq)]
pub struct SeenRequest {
    pub needle: PathBuf,
    pub region: Region,
    pub confidence: f64,
    pub multiple_scales: bool,
}

/// Hands out scripted results in order, repeating the last one
pub struct FakeFinder {
    results: Mutex<VecDeque<MatchResult>>,
    error: Option<String>,
    pub requests: Mutex<Vec<SeenRequest>>,
}

impl FakeFinder {
    pub fn returning(result: MatchResult) -> Self {
        Self::sequence(vec![result])
    }

    pub fn sequence(results: Vec<MatchResult>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            error: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            results: Mutex::new(VecDeque::new()),
            error: Some(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ImageFinder for FakeFinder {
    async fn find_match(&self, request: &ImageMatchRequest) -> Result<MatchResult> {
        self.requests.lock().unwrap().push(SeenRequest {
            needle: request.path_to_needle.clone(),
            region: request.search_region,
            confidence: request.confidence,
            multiple_scales: request.search_multiple_scales,
        });
        if let Some(message) = &self.error {
            return Err(anyhow!(message.clone()));
        }
        let mut results = self.results.lock().unwrap();
        let next = if results.len() > 1 {
            results.pop_front()
        } else {
            results.front().copied()
        };
        next.ok_or_else(|| anyhow!("no scripted result"))
    }

    async fn find_matches(&self, request: &ImageMatchRequest) -> Result<Vec<MatchResult>> {
        Ok(vec![self.find_match(request).await?])
    }
}

/// OCR engine with fixed output
#[derive(Default)]
pub struct FakeReader {
    pub words: Vec<OcrResult>,
    pub text: String,
    pub seen_sizes: Mutex<Vec<(u32, u32)>>,
}

impl FakeReader {
    pub fn with_words(words: Vec<OcrResult>) -> Self {
        Self {
            words,
            ..Self::default()
        }
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }
}

#[async_trait]
impl TextReader for FakeReader {
    async fn read_text(&self, image: &Image) -> Result<String> {
        self.seen_sizes
            .lock()
            .unwrap()
            .push((image.width, image.height));
        Ok(self.text.clone())
    }

    async fn read_words(&self, image: &Image) -> Result<Vec<OcrResult>> {
        self.seen_sizes
            .lock()
            .unwrap()
            .push((image.width, image.height));
        Ok(self.words.clone())
    }
}

/// Remembers where images would have been written
#[derive(Default)]
pub struct RecordingSink {
    pub stored: Mutex<Vec<(PathBuf, u32, u32)>>,
}

#[async_trait]
impl DataSink for RecordingSink {
    async fn store(&self, image: &Image, path: &Path) -> Result<()> {
        self.stored
            .lock()
            .unwrap()
            .push((path.to_path_buf(), image.width, image.height));
        Ok(())
    }
}

/// Collaborators wired into a `Screen`, kept around for inspection
pub struct Harness {
    pub screen: Screen,
    pub display: Arc<FakeScreen>,
    pub finder: Arc<FakeFinder>,
    pub reader: Arc<FakeReader>,
    pub sink: Arc<RecordingSink>,
}

impl Harness {
    pub fn new(finder: FakeFinder) -> Self {
        Self::build(FakeScreen::default(), finder, FakeReader::default())
    }

    pub fn with_reader(reader: FakeReader) -> Self {
        Self::build(
            FakeScreen::default(),
            FakeFinder::failing("unused"),
            reader,
        )
    }

    pub fn build(display: FakeScreen, finder: FakeFinder, reader: FakeReader) -> Self {
        let display = Arc::new(display);
        let finder = Arc::new(finder);
        let reader = Arc::new(reader);
        let sink = Arc::new(RecordingSink::default());

        let vision = VisionAdapter::new(display.clone())
            .with_finder(finder.clone())
            .with_text_reader(reader.clone())
            .with_data_sink(sink.clone());

        let config = ScreenConfig {
            resource_directory: PathBuf::from("/assets"),
            ..ScreenConfig::default()
        };

        Self {
            screen: Screen::with_config(Arc::new(vision), config),
            display,
            finder,
            reader,
            sink,
        }
    }
}

/// Pointer and keyboard that record every call
#[derive(Default)]
pub struct FakeInput {
    pub position: Mutex<Point>,
    pub placements: Mutex<Vec<Point>>,
    pub events: Mutex<Vec<String>>,
    pub fail_after: Option<usize>,
}

impl FakeInput {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: Mutex::new(Point::new(x, y)),
            ..Self::default()
        }
    }

    pub fn placements(&self) -> Vec<Point> {
        self.placements.lock().unwrap().clone()
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl MouseActionProvider for FakeInput {
    async fn set_mouse_position(&self, position: Point) -> Result<()> {
        let mut placements = self.placements.lock().unwrap();
        if self.fail_after.is_some_and(|limit| placements.len() >= limit) {
            return Err(anyhow!("pointer stuck"));
        }
        placements.push(position);
        *self.position.lock().unwrap() = position;
        Ok(())
    }

    async fn current_mouse_position(&self) -> Result<Point> {
        Ok(*self.position.lock().unwrap())
    }

    async fn press_button(&self, button: MouseButton) -> Result<()> {
        self.record(format!("press {:?}", button));
        Ok(())
    }

    async fn release_button(&self, button: MouseButton) -> Result<()> {
        self.record(format!("release {:?}", button));
        Ok(())
    }

    async fn scroll(&self, dx: i32, dy: i32) -> Result<()> {
        self.record(format!("scroll {} {}", dx, dy));
        Ok(())
    }
}

#[async_trait]
impl KeyboardActionProvider for FakeInput {
    async fn type_text(&self, text: &str) -> Result<()> {
        self.record(format!("type {}", text));
        Ok(())
    }

    async fn press_key(&self, key: KeyCode) -> Result<()> {
        self.record(format!("down {:?}", key));
        Ok(())
    }

    async fn release_key(&self, key: KeyCode) -> Result<()> {
        self.record(format!("up {:?}", key));
        Ok(())
    }
}

pub fn native(input: &Arc<FakeInput>) -> Arc<NativeAdapter> {
    Arc::new(NativeAdapter::new(input.clone(), input.clone()))
}
