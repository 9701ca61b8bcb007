use crate::error::{AutomationError, Result};
use crate::matching::LocationParameters;
use crate::screen::Screen;

/// Visibility checks built on [`Screen::find`]
pub struct Assert<'a> {
    screen: &'a Screen,
}

impl<'a> Assert<'a> {
    pub fn new(screen: &'a Screen) -> Self {
        Self { screen }
    }

    /// Fails unless `template` is found
    pub async fn is_visible(&self, template: &str, params: Option<&LocationParameters>) -> Result<()> {
        match self.screen.find(template, params).await {
            Ok(_) => Ok(()),
            Err(e) => Err(AutomationError::AssertionFailed(format!(
                "Element {} not found: {}",
                template, e
            ))),
        }
    }

    /// Fails if `template` is found
    ///
    /// Only a below-threshold match counts as "not visible"; capture or
    /// matching failures are passed through.
    pub async fn not_visible(&self, template: &str, params: Option<&LocationParameters>) -> Result<()> {
        match self.screen.find(template, params).await {
            Ok(location) => Err(AutomationError::AssertionFailed(format!(
                "{} is visible at {}",
                template, location
            ))),
            Err(AutomationError::NotFound { .. }) => Ok(()),
            Err(e) => Err(e),
        }
    }
}
