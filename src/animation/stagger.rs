//! Staggered per-item delays for batch animations.

use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which end of the batch starts first.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum StaggerOrigin {
    /// First item in display order starts first.
    #[default]
    Start,
    /// Last item in display order starts first.
    End,
}

/// How the delay between consecutive items is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaggerSpacing {
    /// Fixed increment between consecutive items.
    Each(Duration),
    /// Total spread across the whole batch, divided evenly.
    Amount(Duration),
}

/// Staggered delays where items animate one after another.
///
/// # Timing
///
/// With an increment `d` and origin [`StaggerOrigin::Start`]:
/// - Item 0: starts at t=0
/// - Item 1: starts at t=d
/// - Item N: starts at t=N*d
///
/// Each item's individual animation lasts the treatment's base duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stagger {
    /// Delay derivation.
    pub spacing: StaggerSpacing,
    /// Which end of the batch leads.
    pub from: StaggerOrigin,
}

impl Stagger {
    /// No stagger: every item starts together.
    pub const NONE: Self = Self {
        spacing: StaggerSpacing::Each(Duration::ZERO),
        from: StaggerOrigin::Start,
    };

    /// Fixed increment, forward display order.
    #[must_use]
    pub const fn each(increment: Duration) -> Self {
        Self {
            spacing: StaggerSpacing::Each(increment),
            from: StaggerOrigin::Start,
        }
    }

    /// Total spread divided across the batch, forward display order.
    #[must_use]
    pub const fn amount(total: Duration) -> Self {
        Self {
            spacing: StaggerSpacing::Amount(total),
            from: StaggerOrigin::Start,
        }
    }

    /// Builder: start from the last item instead.
    #[must_use]
    pub fn reversed(mut self) -> Self {
        self.from = StaggerOrigin::End;
        self
    }

    /// Delay between consecutive items for a batch of `count`.
    #[must_use]
    pub fn increment(&self, count: usize) -> Duration {
        match self.spacing {
            StaggerSpacing::Each(d) => d,
            StaggerSpacing::Amount(total) => {
                if count <= 1 {
                    Duration::ZERO
                } else {
                    total / (count - 1) as u32
                }
            }
        }
    }

    /// Start delay for the item at `index` in a batch of `count`.
    #[must_use]
    pub fn delay_for(&self, index: usize, count: usize) -> Duration {
        if count == 0 {
            return Duration::ZERO;
        }
        let order = match self.from {
            StaggerOrigin::Start => index,
            StaggerOrigin::End => count.saturating_sub(1 + index),
        };
        self.increment(count) * order as u32
    }

    /// Total duration for a batch: `base + (count - 1) * increment`.
    ///
    /// Zero for an empty batch.
    #[must_use]
    pub fn total_duration(&self, base: Duration, count: usize) -> Duration {
        if count == 0 {
            return Duration::ZERO;
        }
        base + self.increment(count) * (count - 1) as u32
    }
}

impl Default for Stagger {
    fn default() -> Self {
        Self::each(Duration::from_millis(80))
    }
}
