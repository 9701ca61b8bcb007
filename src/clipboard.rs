use std::sync::Arc;

use crate::adapter::NativeAdapter;
use crate::error::{AutomationError, Result};

/// System clipboard access; requires a clipboard provider on the adapter
pub struct Clipboard {
    native: Arc<NativeAdapter>,
}

impl Clipboard {
    pub fn new(native: Arc<NativeAdapter>) -> Self {
        Self { native }
    }

    fn ensure_available(&self) -> Result<()> {
        if self.native.has_clipboard() {
            Ok(())
        } else {
            Err(AutomationError::Unavailable(
                "no clipboard provider configured".to_string(),
            ))
        }
    }

    pub async fn copy(&self, text: &str) -> Result<()> {
        self.ensure_available()?;
        self.native
            .copy(text)
            .await
            .map_err(|e| AutomationError::io("Copying to clipboard failed", e))
    }

    pub async fn paste(&self) -> Result<String> {
        self.ensure_available()?;
        self.native
            .paste()
            .await
            .map_err(|e| AutomationError::io("Reading clipboard failed", e))
    }
}
