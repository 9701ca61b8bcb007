//! Path interpolation between two screen points

use crate::geometry::Point;

/// Default sampling density: one point per pixel of travelled distance
pub const DEFAULT_PIXELS_PER_STEP: f64 = 1.0;

/// Interpolation curve for pointer movement
#[derive(Debug, Clone, Copy, Default)]
pub enum MovementType {
    /// Constant velocity
    #[default]
    Linear,
    /// Cubic ease-in-out (smooth acceleration and deceleration)
    EaseInOut,
    /// Caller supplied progress function, mapping [0, 1] onto [0, 1]
    Custom(fn(f64) -> f64),
}

impl MovementType {
    /// Progress along the path at `t` in [0, 1]
    pub fn progress(&self, t: f64) -> f64 {
        match self {
            MovementType::Linear => t,
            MovementType::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            MovementType::Custom(f) => f(t),
        }
    }
}

/// Computes movement paths
///
/// Paths exclude the start point and always end exactly on the destination.
/// The number of points grows with the distance travelled; the same input
/// always yields the same path.
#[derive(Debug, Clone, Copy)]
pub struct LineHelper {
    pixels_per_step: f64,
}

impl LineHelper {
    pub fn new() -> Self {
        Self {
            pixels_per_step: DEFAULT_PIXELS_PER_STEP,
        }
    }

    /// Spacing between consecutive samples; non-positive values fall back to the default
    pub fn with_pixels_per_step(mut self, pixels_per_step: f64) -> Self {
        self.pixels_per_step = if pixels_per_step > 0.0 {
            pixels_per_step
        } else {
            DEFAULT_PIXELS_PER_STEP
        };
        self
    }

    pub fn straight_line(&self, from: Point, to: Point, movement: MovementType) -> Vec<Point> {
        let distance = from.distance_to(&to);
        let steps = (distance / self.pixels_per_step).ceil().max(1.0) as usize;

        let dx = to.x - from.x;
        let dy = to.y - from.y;

        let mut path: Vec<Point> = (1..steps)
            .map(|i| {
                let progress = movement.progress(i as f64 / steps as f64);
                Point::new(from.x + dx * progress, from.y + dy * progress)
            })
            .collect();
        path.push(to);
        path
    }
}

impl Default for LineHelper {
    fn default() -> Self {
        Self::new()
    }
}
