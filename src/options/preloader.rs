use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::Duration;

use super::treatment::millis;
use crate::preloader::PreloaderTimings;

/// First-load preloader step lengths (ms).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Preloader", inline)]
#[serde(default)]
pub struct PreloaderOptions {
    /// Show the preloader at all.
    #[schemars(title = "Enabled")]
    pub enabled: bool,
    /// Logo entrance.
    #[schemars(title = "Logo (ms)", range(min = 0, max = 5000))]
    pub logo_ms: u64,
    /// Wordmark entrance.
    #[schemars(title = "Text (ms)", range(min = 0, max = 5000))]
    pub text_ms: u64,
    /// Wordmark head start over the end of the logo.
    #[schemars(skip)]
    pub text_overlap_ms: u64,
    /// Progress fill.
    #[schemars(title = "Progress (ms)", range(min = 0, max = 10000))]
    pub progress_ms: u64,
    /// Fill head start over the end of the wordmark.
    #[schemars(skip)]
    pub progress_overlap_ms: u64,
    /// Per-piece exit.
    #[schemars(title = "Exit (ms)", range(min = 0, max = 5000))]
    pub exit_ms: u64,
    /// Delay between exiting pieces.
    #[schemars(skip)]
    pub exit_stagger_ms: u64,
    /// Curtain slide.
    #[schemars(title = "Slide (ms)", range(min = 0, max = 5000))]
    pub slide_ms: u64,
}

impl Default for PreloaderOptions {
    fn default() -> Self {
        let t = PreloaderTimings::default();
        Self {
            enabled: true,
            logo_ms: millis(t.logo),
            text_ms: millis(t.text),
            text_overlap_ms: millis(t.text_overlap),
            progress_ms: millis(t.progress),
            progress_overlap_ms: millis(t.progress_overlap),
            exit_ms: millis(t.exit),
            exit_stagger_ms: millis(t.exit_stagger),
            slide_ms: millis(t.slide),
        }
    }
}

impl PreloaderOptions {
    /// Runtime timings.
    #[must_use]
    pub fn timings(&self) -> PreloaderTimings {
        PreloaderTimings {
            logo: Duration::from_millis(self.logo_ms),
            text: Duration::from_millis(self.text_ms),
            text_overlap: Duration::from_millis(self.text_overlap_ms),
            progress: Duration::from_millis(self.progress_ms),
            progress_overlap: Duration::from_millis(self.progress_overlap_ms),
            exit: Duration::from_millis(self.exit_ms),
            exit_stagger: Duration::from_millis(self.exit_stagger_ms),
            slide: Duration::from_millis(self.slide_ms),
        }
    }
}
