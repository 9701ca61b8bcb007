//! Screen geometry value types
//!
//! Coordinates are logical screen coordinates as reported by the OS. Captured
//! images may carry a denser pixel grid; [`PixelDensity`] converts between the two.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position on screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Offset this point by the given deltas
    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Rectangular sub-area of the screen or of an image
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Region {
    /// Create a region; negative extents are clamped to zero
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.left
            && point.x <= self.left + self.width
            && point.y >= self.top
            && point.y <= self.top + self.height
    }

    /// Translate a region expressed relative to `self` into the coordinate space `self` lives in
    pub fn to_absolute(&self, relative: &Region) -> Region {
        Region::new(
            relative.left + self.left,
            relative.top + self.top,
            relative.width,
            relative.height,
        )
    }

    /// Scale every component into a pixel grid of the given density
    pub fn scaled(&self, density: &PixelDensity) -> Region {
        Region::new(
            self.left * density.scale_x,
            self.top * density.scale_y,
            self.width * density.scale_x,
            self.height * density.scale_y,
        )
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.top, self.width, self.height
        )
    }
}

/// Factors converting a captured image's pixel grid to logical screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelDensity {
    pub scale_x: f64,
    pub scale_y: f64,
}

impl PixelDensity {
    pub fn new(scale_x: f64, scale_y: f64) -> Self {
        Self { scale_x, scale_y }
    }

    /// Density of an image with `pixels` width/height captured from a `logical` sized screen
    pub fn from_sizes(pixels: (u32, u32), logical: (u32, u32)) -> Self {
        let ratio = |p: u32, l: u32| if l == 0 { 1.0 } else { p as f64 / l as f64 };
        Self {
            scale_x: ratio(pixels.0, logical.0),
            scale_y: ratio(pixels.1, logical.1),
        }
    }
}

impl Default for PixelDensity {
    fn default() -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}
