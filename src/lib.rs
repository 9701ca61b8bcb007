//! Locate-and-act desktop automation
//!
//! Find template images or text on the main screen, wait for them to appear,
//! capture screenshots and drive the pointer along interpolated paths.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use deskpilot::{MovementApi, NativeAdapter, Screen, ScreenCapture, VisionAdapter};
//!
//! let vision = VisionAdapter::new(Arc::new(ScreenCapture::new())).with_finder(my_finder);
//! let mut screen = Screen::new(Arc::new(vision));
//! screen.on("ok_button.png", |found| async move {
//!     tracing::info!("OK button at {}", found.location);
//!     Ok(())
//! });
//!
//! let button = screen.wait_for("ok_button.png", Some(10_000), None).await?;
//!
//! let movement = MovementApi::new(Arc::new(NativeAdapter::enigo()?));
//! movement.straight_to(deskpilot::center_of(&button)).execute().await?;
//! ```

pub mod adapter;
pub mod assert;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod geometry;
pub mod keyboard;
pub mod location;
pub mod matching;
pub mod mouse;
pub mod movement;
pub mod poll;
pub mod provider;
pub mod raster;
pub mod screen;

pub use adapter::{NativeAdapter, VisionAdapter};
pub use assert::Assert;
pub use clipboard::Clipboard;
pub use config::ScreenConfig;
pub use error::{AutomationError, Result};
pub use geometry::{PixelDensity, Point, Region};
pub use keyboard::{Keyboard, KeyboardConfig};
pub use location::{center_of, random_point_in};
pub use matching::{
    ImageMatchRequest, LocationParameters, MatchRequest, MatchResult, OcrResult, TextMatchRequest,
};
pub use mouse::{Mouse, MouseConfig};
pub use movement::{LineHelper, MovementAction, MovementApi, MovementType};
pub use provider::{
    ClipboardActionProvider, DataSink, EnigoInput, ImageFinder, ImageWriter, KeyCode,
    KeyboardActionProvider, MouseActionProvider, MouseButton, ScreenActionProvider, ScreenCapture,
    TextReader,
};
pub use raster::{CaptureParameters, FileType, Image};
pub use screen::{FindHook, HookRegistry, Screen};
