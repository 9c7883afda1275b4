//! Animation runner executes a single staggered batch.

use web_time::{Duration, Instant};

use super::treatment::Treatment;
use super::visual::VisualState;

/// Executes one treatment over a batch of `targets` items.
///
/// The runner holds:
/// - The treatment (from/to states, easing, stagger)
/// - The number of targets in the batch
/// - Timing information
pub struct AnimationRunner {
    /// When the animation started.
    start_time: Instant,
    /// What to play.
    treatment: Treatment,
    /// Number of items in the batch.
    targets: usize,
    /// Total duration across the staggered batch.
    total_duration: Duration,
}

impl AnimationRunner {
    /// Start a new animation at `start_time`.
    #[must_use]
    pub fn new(treatment: Treatment, targets: usize, start_time: Instant) -> Self {
        Self {
            start_time,
            treatment,
            targets,
            total_duration: treatment.total_duration(targets),
        }
    }

    /// Total animation duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.total_duration
    }

    /// Number of items in the batch.
    #[must_use]
    pub fn targets(&self) -> usize {
        self.targets
    }

    /// Calculate normalized progress (0.0 to 1.0).
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.start_time);

        if self.total_duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.total_duration.as_secs_f32()).min(1.0)
        }
    }

    /// Whether the longest-running item has finished.
    #[must_use]
    pub fn is_complete(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start_time) >= self.total_duration
    }

    /// Visual state of one target, or `None` if `index` is not in the batch.
    #[must_use]
    pub fn sample(&self, index: usize, now: Instant) -> Option<VisualState> {
        if index >= self.targets {
            return None;
        }
        let elapsed = now.saturating_duration_since(self.start_time);
        Some(self.treatment.sample(elapsed, index, self.targets))
    }
}

impl std::fmt::Debug for AnimationRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationRunner")
            .field("targets", &self.targets)
            .field("duration", &self.total_duration)
            .finish_non_exhaustive()
    }
}
