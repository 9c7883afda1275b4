use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::Duration;

use super::treatment::{millis, TreatmentOptions};
use crate::navigation::NavTimings;
use crate::util::easing::EasingFunction;

/// Header and mobile overlay behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Navigation", inline)]
#[serde(default)]
pub struct NavigationOptions {
    /// Scroll offset (px) past which the header turns solid.
    #[schemars(title = "Scrolled Threshold", range(min = 0.0, max = 500.0), extend("step" = 5.0))]
    pub scroll_threshold: f32,
    /// Clip reveal length.
    #[schemars(title = "Reveal (ms)", range(min = 0, max = 3000))]
    pub reveal_ms: u64,
    /// Clip dismiss length from full size.
    #[schemars(title = "Dismiss (ms)", range(min = 0, max = 3000))]
    pub dismiss_ms: u64,
    /// Easing of the clip reveal and dismiss.
    #[schemars(skip)]
    pub reveal_easing: EasingFunction,
    /// How far the link entrance overlaps the end of the reveal.
    #[schemars(skip)]
    pub items_overlap_ms: u64,
    /// Link entrance.
    #[schemars(skip)]
    pub items: TreatmentOptions,
}

impl Default for NavigationOptions {
    fn default() -> Self {
        let t = NavTimings::default();
        Self {
            scroll_threshold: t.scroll_threshold,
            reveal_ms: millis(t.reveal),
            dismiss_ms: millis(t.dismiss),
            reveal_easing: t.reveal_easing,
            items_overlap_ms: millis(t.items_overlap),
            items: t.items.into(),
        }
    }
}

impl NavigationOptions {
    /// Runtime timings.
    #[must_use]
    pub fn timings(&self) -> NavTimings {
        NavTimings {
            reveal: Duration::from_millis(self.reveal_ms),
            dismiss: Duration::from_millis(self.dismiss_ms),
            reveal_easing: self.reveal_easing,
            items_overlap: Duration::from_millis(self.items_overlap_ms),
            items: self.items.to_treatment(),
            scroll_threshold: self.scroll_threshold,
        }
    }
}
