//! Browser configuration.

use lumen_common::net::FetchConfig;

/// Default viewport width in pixels.
pub const DEFAULT_VIEWPORT_WIDTH: i32 = 800;

/// Default viewport height in pixels.
pub const DEFAULT_VIEWPORT_HEIGHT: i32 = 600;

/// Settings for loading and laying out pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserConfig {
    /// Width the document is laid out at.
    pub viewport_width: i32,
    /// Height of the visible area. Layout does not depend on it.
    pub viewport_height: i32,
    /// Settings passed to the network fetcher.
    pub fetch: FetchConfig,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            fetch: FetchConfig::default(),
        }
    }
}

impl BrowserConfig {
    /// Same settings with a different viewport size.
    #[must_use]
    pub fn with_viewport(mut self, width: i32, height: i32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_viewport() {
        let config = BrowserConfig::default();
        assert_eq!(config.viewport_width, 800);
        assert_eq!(config.viewport_height, 600);
    }

    #[test]
    fn test_with_viewport_keeps_fetch_settings() {
        let config = BrowserConfig::default().with_viewport(320, 480);
        assert_eq!((config.viewport_width, config.viewport_height), (320, 480));
        assert_eq!(config.fetch, FetchConfig::default());
    }
}
