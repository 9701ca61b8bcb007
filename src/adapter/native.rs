use anyhow::{anyhow, Result};
use std::sync::Arc;

use crate::geometry::Point;
use crate::provider::{
    ClipboardActionProvider, EnigoInput, KeyCode, KeyboardActionProvider, MouseActionProvider,
    MouseButton,
};

/// Bundles every native input collaborator behind one interface
pub struct NativeAdapter {
    mouse: Arc<dyn MouseActionProvider>,
    keyboard: Arc<dyn KeyboardActionProvider>,
    clipboard: Option<Arc<dyn ClipboardActionProvider>>,
}

impl NativeAdapter {
    pub fn new(
        mouse: Arc<dyn MouseActionProvider>,
        keyboard: Arc<dyn KeyboardActionProvider>,
    ) -> Self {
        Self {
            mouse,
            keyboard,
            clipboard: None,
        }
    }

    /// Mouse and keyboard through a single enigo worker
    pub fn enigo() -> Result<Self> {
        let input = Arc::new(EnigoInput::spawn()?);
        Ok(Self::new(input.clone(), input))
    }

    pub fn with_clipboard(mut self, clipboard: Arc<dyn ClipboardActionProvider>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    pub async fn set_mouse_position(&self, position: Point) -> Result<()> {
        self.mouse.set_mouse_position(position).await
    }

    pub async fn current_mouse_position(&self) -> Result<Point> {
        self.mouse.current_mouse_position().await
    }

    pub async fn click(&self, button: MouseButton) -> Result<()> {
        self.mouse.click(button).await
    }

    pub async fn press_button(&self, button: MouseButton) -> Result<()> {
        self.mouse.press_button(button).await
    }

    pub async fn release_button(&self, button: MouseButton) -> Result<()> {
        self.mouse.release_button(button).await
    }

    pub async fn scroll(&self, dx: i32, dy: i32) -> Result<()> {
        self.mouse.scroll(dx, dy).await
    }

    pub async fn type_text(&self, text: &str) -> Result<()> {
        self.keyboard.type_text(text).await
    }

    pub async fn press_key(&self, key: KeyCode) -> Result<()> {
        self.keyboard.press_key(key).await
    }

    pub async fn release_key(&self, key: KeyCode) -> Result<()> {
        self.keyboard.release_key(key).await
    }

    pub fn has_clipboard(&self) -> bool {
        self.clipboard.is_some()
    }

    pub async fn copy(&self, text: &str) -> Result<()> {
        self.clipboard()?.copy(text).await
    }

    pub async fn paste(&self) -> Result<String> {
        self.clipboard()?.paste().await
    }

    fn clipboard(&self) -> Result<&Arc<dyn ClipboardActionProvider>> {
        self.clipboard
            .as_ref()
            .ok_or_else(|| anyhow!("No clipboard provider configured"))
    }
}
