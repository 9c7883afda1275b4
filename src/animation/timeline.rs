//! Sequenced timeline of labelled steps.
//!
//! Steps are appended one after another; a step may overlap the end of the
//! previous one (GSAP's `"-=0.3"` position parameter). The timeline only
//! computes times, it drives nothing.

use web_time::Duration;

/// One labelled step on a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineStep<L> {
    /// Caller-defined label.
    pub label: L,
    /// Offset from the timeline start.
    pub start: Duration,
    /// Step length.
    pub duration: Duration,
}

impl<L> TimelineStep<L> {
    /// Offset at which this step ends.
    #[must_use]
    pub fn end(&self) -> Duration {
        self.start + self.duration
    }

    /// Local progress 0→1 at `elapsed` into the timeline.
    #[must_use]
    pub fn progress(&self, elapsed: Duration) -> f32 {
        if elapsed <= self.start {
            return if self.duration.is_zero() && elapsed == self.start {
                1.0
            } else {
                0.0
            };
        }
        if self.duration.is_zero() {
            return 1.0;
        }
        ((elapsed - self.start).as_secs_f32() / self.duration.as_secs_f32())
            .min(1.0)
    }
}

/// Ordered steps with overlap-aware placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline<L> {
    steps: Vec<TimelineStep<L>>,
    cursor: Duration,
}

impl<L: Copy + PartialEq> Timeline<L> {
    /// Empty timeline.
    #[must_use]
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            cursor: Duration::ZERO,
        }
    }

    /// Append a step after the end of the previous one.
    #[must_use]
    pub fn then(self, label: L, duration: Duration) -> Self {
        self.overlapping(label, duration, Duration::ZERO)
    }

    /// Append a step that starts `overlap` before the previous one ends.
    #[must_use]
    pub fn overlapping(
        mut self,
        label: L,
        duration: Duration,
        overlap: Duration,
    ) -> Self {
        let start = self.cursor.saturating_sub(overlap);
        self.steps.push(TimelineStep {
            label,
            start,
            duration,
        });
        self.cursor = self.cursor.max(start + duration);
        self
    }

    /// Total length of the timeline.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.cursor
    }

    /// All steps in insertion order.
    #[must_use]
    pub fn steps(&self) -> &[TimelineStep<L>] {
        &self.steps
    }

    /// The step with the given label.
    #[must_use]
    pub fn step(&self, label: L) -> Option<&TimelineStep<L>> {
        self.steps.iter().find(|s| s.label == label)
    }

    /// Progress of the labelled step at `elapsed` (0 for unknown labels).
    #[must_use]
    pub fn step_progress(&self, label: L, elapsed: Duration) -> f32 {
        self.step(label).map_or(0.0, |s| s.progress(elapsed))
    }

    /// The most recently started step at `elapsed`, if the timeline has
    /// begun and not yet finished.
    #[must_use]
    pub fn current(&self, elapsed: Duration) -> Option<L> {
        if elapsed >= self.cursor {
            return None;
        }
        self.steps
            .iter()
            .filter(|s| s.start <= elapsed)
            .max_by_key(|s| s.start)
            .map(|s| s.label)
    }

    /// Whether the whole timeline has played out.
    #[must_use]
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.cursor
    }
}

impl<L: Copy + PartialEq> Default for Timeline<L> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Step {
        A,
        B,
        C,
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_sequential_steps() {
        let tl = Timeline::new().then(Step::A, ms(100)).then(Step::B, ms(50));
        assert_eq!(tl.step(Step::B).map(|s| s.start), Some(ms(100)));
        assert_eq!(tl.total_duration(), ms(150));
    }

    #[test]
    fn test_overlap_pulls_step_earlier() {
        let tl = Timeline::new()
            .then(Step::A, ms(1000))
            .overlapping(Step::B, ms(800), ms(300));
        assert_eq!(tl.step(Step::B).map(|s| s.start), Some(ms(700)));
        assert_eq!(tl.total_duration(), ms(1500));
    }

    #[test]
    fn test_overlap_never_shortens_timeline() {
        let tl = Timeline::new()
            .then(Step::A, ms(1000))
            .overlapping(Step::B, ms(100), ms(500));
        assert_eq!(tl.total_duration(), ms(1000));
    }

    #[test]
    fn test_current_step() {
        let tl = Timeline::new()
            .then(Step::A, ms(100))
            .overlapping(Step::B, ms(100), ms(50))
            .then(Step::C, ms(100));
        assert_eq!(tl.current(ms(0)), Some(Step::A));
        assert_eq!(tl.current(ms(60)), Some(Step::B));
        assert_eq!(tl.current(ms(160)), Some(Step::C));
        assert_eq!(tl.current(ms(250)), None);
        assert!(tl.is_finished(ms(250)));
    }

    #[test]
    fn test_step_progress() {
        let tl = Timeline::new().then(Step::A, ms(100)).then(Step::B, ms(200));
        assert_eq!(tl.step_progress(Step::B, ms(50)), 0.0);
        assert!((tl.step_progress(Step::B, ms(200)) - 0.5).abs() < 1e-6);
        assert_eq!(tl.step_progress(Step::A, ms(500)), 1.0);
        assert_eq!(tl.step_progress(Step::C, ms(500)), 0.0);
    }
}
