//! Output configuration for the report printer.
//!
//! Honors `NO_COLOR` (disable ANSI colors). Colors stay off until
//! `configure` runs, so library consumers get plain output unless the
//! CLI opts in.

use std::sync::atomic::{AtomicBool, Ordering};

static COLORS_ENABLED: AtomicBool = AtomicBool::new(false);

/// Global output configuration.
pub struct OutputConfig;

impl OutputConfig {
    /// Configure from CLI flags and environment.
    /// Call once at startup after parsing args.
    pub fn configure(no_color: bool) {
        // NO_COLOR: if set and not empty, disable ANSI colors
        let env_no_color = std::env::var("NO_COLOR")
            .map(|v| !v.trim().is_empty())
            .unwrap_or(false);
        COLORS_ENABLED.store(!no_color && !env_no_color, Ordering::Relaxed);
    }

    /// Whether ANSI colors are enabled.
    #[inline]
    pub fn colors_enabled() -> bool {
        COLORS_ENABLED.load(Ordering::Relaxed)
    }
}
