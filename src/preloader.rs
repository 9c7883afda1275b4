//! First-load preloader sequence.
//!
//! Logo pops in, the wordmark rises, the progress bar fills with a 0-100%
//! counter, the three pieces leave one after another and the curtain
//! slides up. Page scroll stays locked until the curtain is gone.

use web_time::{Duration, Instant};

use crate::animation::{Stagger, Timeline, Treatment, VisualState};
use crate::util::easing::EasingFunction;

/// Steps of the sequence, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreloaderStep {
    /// Logo scales and spins in.
    Logo,
    /// Wordmark rises in.
    Text,
    /// Progress bar fills.
    Progress,
    /// Logo, text and bar leave.
    Exit,
    /// Curtain slides off the top.
    Slide,
}

/// Pieces animated by the exit step, in stagger order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreloaderPart {
    /// The logo badge.
    Logo,
    /// The wordmark.
    Text,
    /// The progress bar and counter.
    Progress,
}

impl PreloaderPart {
    const ALL: [Self; 3] = [Self::Logo, Self::Text, Self::Progress];

    fn index(self) -> usize {
        match self {
            Self::Logo => 0,
            Self::Text => 1,
            Self::Progress => 2,
        }
    }
}

/// Durations and overlaps of each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreloaderTimings {
    /// Logo entrance.
    pub logo: Duration,
    /// Wordmark entrance.
    pub text: Duration,
    /// How early the wordmark starts before the logo ends.
    pub text_overlap: Duration,
    /// Progress fill.
    pub progress: Duration,
    /// How early the fill starts before the wordmark ends.
    pub progress_overlap: Duration,
    /// Per-piece exit.
    pub exit: Duration,
    /// Delay between exiting pieces.
    pub exit_stagger: Duration,
    /// Curtain slide.
    pub slide: Duration,
}

impl Default for PreloaderTimings {
    fn default() -> Self {
        Self {
            logo: Duration::from_millis(1000),
            text: Duration::from_millis(800),
            text_overlap: Duration::from_millis(300),
            progress: Duration::from_millis(1500),
            progress_overlap: Duration::from_millis(500),
            exit: Duration::from_millis(500),
            exit_stagger: Duration::from_millis(100),
            slide: Duration::from_millis(800),
        }
    }
}

/// Running preloader; `None` from [`PreloaderSequence::phase`] once done.
#[derive(Debug)]
pub struct PreloaderSequence {
    timeline: Timeline<PreloaderStep>,
    started_at: Instant,
    logo: Treatment,
    text: Treatment,
    exit: Treatment,
    fill_easing: EasingFunction,
    slide_easing: EasingFunction,
    finished: bool,
}

impl PreloaderSequence {
    /// Start the sequence at `now`.
    #[must_use]
    pub fn start(timings: PreloaderTimings, now: Instant) -> Self {
        let exit = Treatment::new(
            VisualState::REST,
            VisualState::hidden_at(-50.0),
            timings.exit,
            EasingFunction::PowerIn { exponent: 4 },
        )
        .with_stagger(Stagger::each(timings.exit_stagger));
        let timeline = Timeline::new()
            .then(PreloaderStep::Logo, timings.logo)
            .overlapping(PreloaderStep::Text, timings.text, timings.text_overlap)
            .overlapping(
                PreloaderStep::Progress,
                timings.progress,
                timings.progress_overlap,
            )
            .then(PreloaderStep::Exit, exit.total_duration(PreloaderPart::ALL.len()))
            .then(PreloaderStep::Slide, timings.slide);
        log::debug!(
            "preloader started ({} ms)",
            timeline.total_duration().as_millis()
        );
        Self {
            timeline,
            started_at: now,
            logo: Treatment::new(
                VisualState {
                    opacity: 0.0,
                    scale: 0.0,
                    rotate_y: -180.0,
                    ..VisualState::REST
                },
                VisualState::REST,
                timings.logo,
                EasingFunction::BackOut { overshoot: 1.7 },
            ),
            text: Treatment::new(
                VisualState::hidden_at(50.0),
                VisualState::REST,
                timings.text,
                EasingFunction::PowerOut { exponent: 4 },
            ),
            exit,
            fill_easing: EasingFunction::PowerInOut { exponent: 3 },
            slide_easing: EasingFunction::PowerInOut { exponent: 5 },
            finished: false,
        }
    }

    /// Total sequence length.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.timeline.total_duration()
    }

    /// The latest step to have started at `now`; `None` once the sequence
    /// has played out.
    #[must_use]
    pub fn phase(&self, now: Instant) -> Option<PreloaderStep> {
        self.timeline.current(self.elapsed(now))
    }

    /// Advance; returns `true` exactly once, when the sequence completes.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.finished || !self.timeline.is_finished(self.elapsed(now)) {
            return false;
        }
        self.finished = true;
        log::debug!("preloader finished");
        true
    }

    /// Whether the sequence has completed (the overlay should unmount).
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Whether page scrolling should be disabled.
    #[must_use]
    pub fn scroll_locked(&self) -> bool {
        !self.finished
    }

    /// Linear fill progress in [0, 1].
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        self.timeline
            .step_progress(PreloaderStep::Progress, self.elapsed(now))
    }

    /// Counter value shown next to the bar, 0 to 100.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percent(&self, now: Instant) -> u8 {
        // progress() is in [0, 1], so this lands in 0..=100.
        (self.progress(now) * 100.0).round() as u8
    }

    /// Counter text, e.g. `"42%"`.
    #[must_use]
    pub fn percent_label(&self, now: Instant) -> String {
        format!("{}%", self.percent(now))
    }

    /// Horizontal scale of the bar fill (eased).
    #[must_use]
    pub fn bar_scale(&self, now: Instant) -> f32 {
        self.fill_easing.evaluate(self.progress(now))
    }

    /// Vertical offset of the curtain in percent of its height (0 to -100).
    #[must_use]
    pub fn curtain_offset(&self, now: Instant) -> f32 {
        let t = self
            .timeline
            .step_progress(PreloaderStep::Slide, self.elapsed(now));
        -100.0 * self.slide_easing.evaluate(t)
    }

    /// Visual state of one piece at `now`.
    #[must_use]
    pub fn part_visual(&self, part: PreloaderPart, now: Instant) -> VisualState {
        let elapsed = self.elapsed(now);
        if let Some(exit) = self.timeline.step(PreloaderStep::Exit) {
            if elapsed >= exit.start {
                return self.exit.sample(
                    elapsed - exit.start,
                    part.index(),
                    PreloaderPart::ALL.len(),
                );
            }
        }
        let (step, treatment) = match part {
            PreloaderPart::Logo => (PreloaderStep::Logo, &self.logo),
            PreloaderPart::Text => (PreloaderStep::Text, &self.text),
            PreloaderPart::Progress => return VisualState::REST,
        };
        let t = self.timeline.step_progress(step, elapsed);
        treatment.from.lerp(&treatment.to, treatment.easing.evaluate(t))
    }

    fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn sequence() -> (PreloaderSequence, Instant) {
        let t0 = Instant::now();
        (PreloaderSequence::start(PreloaderTimings::default(), t0), t0)
    }

    #[test]
    fn test_step_layout() {
        let (pre, _) = sequence();
        let start = |step| pre.timeline.step(step).map(|s| s.start);
        assert_eq!(start(PreloaderStep::Text), Some(ms(700)));
        assert_eq!(start(PreloaderStep::Progress), Some(ms(1000)));
        assert_eq!(start(PreloaderStep::Exit), Some(ms(2500)));
        assert_eq!(start(PreloaderStep::Slide), Some(ms(3200)));
        assert_eq!(pre.duration(), ms(4000));
    }

    #[test]
    fn test_phase_progression() {
        let (pre, t0) = sequence();
        assert_eq!(pre.phase(t0), Some(PreloaderStep::Logo));
        assert_eq!(pre.phase(t0 + ms(800)), Some(PreloaderStep::Text));
        assert_eq!(pre.phase(t0 + ms(1200)), Some(PreloaderStep::Progress));
        assert_eq!(pre.phase(t0 + ms(2600)), Some(PreloaderStep::Exit));
        assert_eq!(pre.phase(t0 + ms(3500)), Some(PreloaderStep::Slide));
        assert_eq!(pre.phase(t0 + ms(4000)), None);
    }

    #[test]
    fn test_counter_tracks_progress() {
        let (pre, t0) = sequence();
        assert_eq!(pre.percent(t0 + ms(500)), 0);
        assert_eq!(pre.percent(t0 + ms(1750)), 50);
        assert_eq!(pre.percent_label(t0 + ms(2500)), "100%");
        assert_eq!(pre.percent(t0 + ms(3900)), 100);
    }

    #[test]
    fn test_scroll_unlocks_once_finished() {
        let (mut pre, t0) = sequence();
        assert!(pre.scroll_locked());
        assert!(!pre.tick(t0 + ms(3999)));
        assert!(pre.scroll_locked());
        assert!(pre.tick(t0 + ms(4000)));
        assert!(!pre.scroll_locked());
        assert!(!pre.tick(t0 + ms(5000)));
        assert!(pre.is_finished());
    }

    #[test]
    fn test_parts_leave_in_order() {
        let (pre, t0) = sequence();
        let at = t0 + ms(2600);
        let logo = pre.part_visual(PreloaderPart::Logo, at);
        let bar = pre.part_visual(PreloaderPart::Progress, at);
        assert!(logo.opacity < 1.0);
        assert_eq!(bar, VisualState::REST);

        let gone = t0 + ms(3200);
        for part in PreloaderPart::ALL {
            assert!(pre.part_visual(part, gone).opacity.abs() < f32::EPSILON);
        }
    }

    #[test]
    fn test_curtain_slides_up() {
        let (pre, t0) = sequence();
        assert!(pre.curtain_offset(t0 + ms(3000)).abs() < f32::EPSILON);
        assert!((pre.curtain_offset(t0 + ms(4000)) + 100.0).abs() < 1e-3);
    }

    #[test]
    fn logo_starts_hidden() {
        let (pre, t0) = sequence();
        let logo = pre.part_visual(PreloaderPart::Logo, t0);
        assert!(logo.opacity.abs() < 1e-3);
        assert!(logo.scale.abs() < 1e-3);
    }
}
