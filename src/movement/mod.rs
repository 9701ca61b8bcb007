//! Pointer movement along interpolated paths
//!
//! [`MovementApi`] hands out deferred [`MovementAction`]s. Nothing moves until
//! an action is executed, and every execution starts from wherever the pointer
//! is at that moment, so one action can be reused from different positions.
//!
//! ```rust,ignore
//! let movement = MovementApi::new(native);
//! movement.straight_to(Point::new(400.0, 300.0)).execute().await?;
//! movement.down(50.0).execute().await?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use crate::adapter::NativeAdapter;
use crate::error::{AutomationError, Result};
use crate::geometry::Point;

pub mod line;

pub use line::{LineHelper, MovementType};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Target {
    Absolute(Point),
    Relative { dx: f64, dy: f64 },
}

impl Target {
    fn resolve(&self, current: Point) -> Point {
        match *self {
            Target::Absolute(point) => point,
            Target::Relative { dx, dy } => current.offset(dx, dy),
        }
    }
}

/// Builds deferred pointer movements
#[derive(Clone)]
pub struct MovementApi {
    native: Arc<NativeAdapter>,
    line: LineHelper,
    movement_type: MovementType,
    step_delay: Duration,
}

impl MovementApi {
    pub fn new(native: Arc<NativeAdapter>) -> Self {
        Self {
            native,
            line: LineHelper::new(),
            movement_type: MovementType::Linear,
            step_delay: Duration::ZERO,
        }
    }

    pub fn with_line_helper(mut self, line: LineHelper) -> Self {
        self.line = line;
        self
    }

    pub fn with_movement_type(mut self, movement_type: MovementType) -> Self {
        self.movement_type = movement_type;
        self
    }

    /// Pause between two placements
    pub fn with_step_delay(mut self, step_delay: Duration) -> Self {
        self.step_delay = step_delay;
        self
    }

    fn action(&self, target: Target) -> MovementAction {
        MovementAction {
            native: Arc::clone(&self.native),
            line: self.line,
            movement_type: self.movement_type,
            step_delay: self.step_delay,
            target,
        }
    }

    /// Move in a straight line to `destination`
    pub fn straight_to(&self, destination: Point) -> MovementAction {
        self.action(Target::Absolute(destination))
    }

    pub fn up(&self, distance: f64) -> MovementAction {
        self.action(Target::Relative {
            dx: 0.0,
            dy: -distance,
        })
    }

    pub fn down(&self, distance: f64) -> MovementAction {
        self.action(Target::Relative {
            dx: 0.0,
            dy: distance,
        })
    }

    pub fn left(&self, distance: f64) -> MovementAction {
        self.action(Target::Relative {
            dx: -distance,
            dy: 0.0,
        })
    }

    pub fn right(&self, distance: f64) -> MovementAction {
        self.action(Target::Relative {
            dx: distance,
            dy: 0.0,
        })
    }
}

/// A pointer movement that runs when executed
///
/// Relative movements (`up`, `down`, `left`, `right`) resolve their
/// destination from the pointer position at execution time.
#[derive(Clone)]
pub struct MovementAction {
    native: Arc<NativeAdapter>,
    line: LineHelper,
    movement_type: MovementType,
    step_delay: Duration,
    target: Target,
}

impl MovementAction {
    /// Path from the current pointer position, without moving
    pub async fn path(&self) -> Result<Vec<Point>> {
        let current = self
            .native
            .current_mouse_position()
            .await
            .map_err(|e| AutomationError::io("Querying pointer position failed", e))?;
        let destination = self.target.resolve(current);
        Ok(self
            .line
            .straight_line(current, destination, self.movement_type))
    }

    /// Place the pointer on every point of the path, one after another
    pub async fn execute(&self) -> Result<()> {
        let path = self.path().await?;
        tracing::debug!(
            "Moving pointer along {} points to {:?}",
            path.len(),
            path.last()
        );

        for (i, point) in path.iter().enumerate() {
            if i > 0 && !self.step_delay.is_zero() {
                tokio::time::sleep(self.step_delay).await;
            }
            self.native
                .set_mouse_position(*point)
                .await
                .map_err(|e| AutomationError::io(format!("Moving pointer to {} failed", point), e))?;
        }
        Ok(())
    }
}
