use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::animation::{
    Stagger, StaggerOrigin, StaggerSpacing, Treatment, VisualState,
};
use crate::util::easing::EasingFunction;

/// How `stagger_ms` is interpreted.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum StaggerMode {
    /// Delay between consecutive items.
    #[default]
    Each,
    /// Total spread across the batch.
    Amount,
}

/// A batch animation as written in an options file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(inline)]
#[serde(default)]
pub struct TreatmentOptions {
    /// Start state of every item.
    pub from: VisualState,
    /// End state of every item.
    pub to: VisualState,
    /// Per-item duration.
    #[schemars(title = "Duration (ms)", range(min = 0, max = 5000))]
    pub duration_ms: u64,
    /// GSAP-style easing name (`"power2.out"`, `"back.out(1.7)"`).
    #[schemars(title = "Easing", with = "String")]
    pub easing: EasingFunction,
    /// Stagger delay (ms), per item or total depending on `stagger_mode`.
    #[schemars(title = "Stagger (ms)", range(min = 0, max = 2000))]
    pub stagger_ms: u64,
    /// Interpretation of `stagger_ms`.
    pub stagger_mode: StaggerMode,
    /// Which end of the batch moves first.
    pub stagger_from: StaggerOrigin,
}

impl Default for TreatmentOptions {
    fn default() -> Self {
        Self::from(Treatment::default())
    }
}

impl TreatmentOptions {
    /// Build the runtime treatment.
    #[must_use]
    pub fn to_treatment(&self) -> Treatment {
        let spread = Duration::from_millis(self.stagger_ms);
        let mut stagger = match self.stagger_mode {
            StaggerMode::Each => Stagger::each(spread),
            StaggerMode::Amount => Stagger::amount(spread),
        };
        stagger.from = self.stagger_from;
        Treatment::new(
            self.from,
            self.to,
            Duration::from_millis(self.duration_ms),
            self.easing,
        )
        .with_stagger(stagger)
    }
}

impl From<Treatment> for TreatmentOptions {
    fn from(t: Treatment) -> Self {
        let (stagger_mode, spread) = match t.stagger.spacing {
            StaggerSpacing::Each(d) => (StaggerMode::Each, d),
            StaggerSpacing::Amount(d) => (StaggerMode::Amount, d),
        };
        Self {
            from: t.from,
            to: t.to,
            duration_ms: millis(t.duration),
            easing: t.easing,
            stagger_ms: millis(spread),
            stagger_mode,
            stagger_from: t.stagger.from,
        }
    }
}

pub(super) fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
