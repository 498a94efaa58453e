//! Driven port that applies the active theme to the presentation layer.
//!
//! The UI store owns the theme value; how it reaches the screen (a CSS class
//! on the document root, a terminal palette, a native appearance setting) is
//! up to the adapter.

use tracing::debug;

use crate::domain::Theme;

/// Side-effect sink for theme changes.
#[cfg_attr(test, mockall::automock)]
pub trait ThemeApplier: Send + Sync {
    /// Make `theme` visible to the user.
    fn apply(&self, theme: Theme);
}

/// Adapter that only records theme changes in the trace log.
///
/// Useful for headless runs and tests where no presentation layer exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingThemeApplier;

impl ThemeApplier for TracingThemeApplier {
    fn apply(&self, theme: Theme) {
        debug!(theme = %theme, "theme applied");
    }
}
