use std::sync::Arc;
use std::time::Duration;

use crate::adapter::NativeAdapter;
use crate::error::{AutomationError, Result};
use crate::geometry::Point;
use crate::movement::MovementAction;
use crate::provider::MouseButton;

#[derive(Debug, Clone)]
pub struct MouseConfig {
    /// Pointer speed in pixels per second when following a path; 0 disables pacing
    pub mouse_speed: f64,
}

impl Default for MouseConfig {
    fn default() -> Self {
        Self {
            mouse_speed: 1000.0,
        }
    }
}

/// High level pointer control
pub struct Mouse {
    pub config: MouseConfig,
    native: Arc<NativeAdapter>,
}

impl Mouse {
    pub fn new(native: Arc<NativeAdapter>) -> Self {
        Self {
            config: MouseConfig::default(),
            native,
        }
    }

    fn step_delay(&self) -> Option<Duration> {
        (self.config.mouse_speed > 0.0)
            .then(|| Duration::from_secs_f64(1.0 / self.config.mouse_speed))
    }

    /// Jump straight to `target`
    pub async fn set_position(&self, target: Point) -> Result<()> {
        self.native
            .set_mouse_position(target)
            .await
            .map_err(|e| AutomationError::io(format!("Setting pointer to {} failed", target), e))
    }

    pub async fn position(&self) -> Result<Point> {
        self.native
            .current_mouse_position()
            .await
            .map_err(|e| AutomationError::io("Querying pointer position failed", e))
    }

    /// Follow `path` point by point, paced by `config.mouse_speed`
    pub async fn move_along(&self, path: &[Point]) -> Result<()> {
        let delay = self.step_delay();
        for (i, point) in path.iter().enumerate() {
            if i > 0 {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
            }
            self.set_position(*point).await?;
        }
        Ok(())
    }

    /// Follow the path of a movement action from the current position
    pub async fn move_to(&self, action: &MovementAction) -> Result<()> {
        let path = action.path().await?;
        self.move_along(&path).await
    }

    async fn click(&self, button: MouseButton) -> Result<()> {
        self.native
            .click(button)
            .await
            .map_err(|e| AutomationError::io(format!("{:?} click failed", button), e))
    }

    pub async fn left_click(&self) -> Result<()> {
        self.click(MouseButton::Left).await
    }

    pub async fn right_click(&self) -> Result<()> {
        self.click(MouseButton::Right).await
    }

    pub async fn middle_click(&self) -> Result<()> {
        self.click(MouseButton::Middle).await
    }

    async fn scroll(&self, dx: i32, dy: i32) -> Result<()> {
        self.native
            .scroll(dx, dy)
            .await
            .map_err(|e| AutomationError::io(format!("Scrolling by ({}, {}) failed", dx, dy), e))
    }

    pub async fn scroll_up(&self, amount: i32) -> Result<()> {
        self.scroll(0, -amount).await
    }

    pub async fn scroll_down(&self, amount: i32) -> Result<()> {
        self.scroll(0, amount).await
    }

    pub async fn scroll_left(&self, amount: i32) -> Result<()> {
        self.scroll(-amount, 0).await
    }

    pub async fn scroll_right(&self, amount: i32) -> Result<()> {
        self.scroll(amount, 0).await
    }

    pub async fn press_button(&self, button: MouseButton) -> Result<()> {
        self.native
            .press_button(button)
            .await
            .map_err(|e| AutomationError::io(format!("Pressing {:?} failed", button), e))
    }

    pub async fn release_button(&self, button: MouseButton) -> Result<()> {
        self.native
            .release_button(button)
            .await
            .map_err(|e| AutomationError::io(format!("Releasing {:?} failed", button), e))
    }

    /// Hold the left button while following `path`
    pub async fn drag(&self, path: &[Point]) -> Result<()> {
        self.press_button(MouseButton::Left).await?;
        let moved = self.move_along(path).await;
        // Release even when the move failed so the button is not left held
        let released = self.release_button(MouseButton::Left).await;
        moved.and(released)
    }
}
