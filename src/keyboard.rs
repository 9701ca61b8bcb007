use std::sync::Arc;
use std::time::Duration;

use crate::adapter::NativeAdapter;
use crate::error::{AutomationError, Result};
use crate::provider::KeyCode;

#[derive(Debug, Clone, Default)]
pub struct KeyboardConfig {
    /// Pause between typed characters; 0 types the whole string at once
    pub type_delay_ms: u64,
}

/// High level keyboard control
pub struct Keyboard {
    pub config: KeyboardConfig,
    native: Arc<NativeAdapter>,
}

impl Keyboard {
    pub fn new(native: Arc<NativeAdapter>) -> Self {
        Self {
            config: KeyboardConfig::default(),
            native,
        }
    }

    pub async fn type_text(&self, text: &str) -> Result<()> {
        let fail = |e: anyhow::Error| AutomationError::io(format!("Typing '{}' failed", text), e);

        if self.config.type_delay_ms == 0 {
            return self.native.type_text(text).await.map_err(fail);
        }

        let delay = Duration::from_millis(self.config.type_delay_ms);
        let mut buf = [0u8; 4];
        for (i, c) in text.chars().enumerate() {
            if i > 0 {
                tokio::time::sleep(delay).await;
            }
            self.native
                .type_text(c.encode_utf8(&mut buf))
                .await
                .map_err(fail)?;
        }
        Ok(())
    }

    /// Press and hold `keys` in the given order
    pub async fn press_key(&self, keys: &[KeyCode]) -> Result<()> {
        for key in keys {
            self.native
                .press_key(*key)
                .await
                .map_err(|e| AutomationError::io(format!("Pressing {:?} failed", key), e))?;
        }
        Ok(())
    }

    /// Release `keys` in reverse order
    pub async fn release_key(&self, keys: &[KeyCode]) -> Result<()> {
        for key in keys.iter().rev() {
            self.native
                .release_key(*key)
                .await
                .map_err(|e| AutomationError::io(format!("Releasing {:?} failed", key), e))?;
        }
        Ok(())
    }

    /// Press a key combination, e.g. `[Control, Char('s')]`, then release it
    pub async fn tap(&self, keys: &[KeyCode]) -> Result<()> {
        self.press_key(keys).await?;
        self.release_key(keys).await
    }
}
