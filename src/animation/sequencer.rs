//! Exit-then-enter choreography over an [`AnimationRuntime`].
//!
//! The sequencer owns no domain state. It plays one batch at a time and
//! refuses to start a second while the first is in flight, so "exit fully
//! finishes before enter starts" holds by construction.

use web_time::Instant;

use super::runtime::{AnimationId, AnimationRuntime};
use super::treatment::Treatment;
use super::visual::VisualState;
use crate::error::SiteError;

/// Which half of a transition a batch belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Outgoing items animating away.
    Exit,
    /// Incoming items animating in.
    Enter,
}

/// Completion signal returned by a play call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Nothing to animate (empty batch); already done.
    Immediate,
    /// Running in the runtime; poll for the end.
    Pending(AnimationId),
}

#[derive(Debug, Clone, Copy)]
struct Playing {
    direction: Direction,
    id: AnimationId,
    targets: usize,
}

/// Plays the exit and enter treatments of a category switch.
#[derive(Debug)]
pub struct TransitionSequencer<R: AnimationRuntime> {
    runtime: R,
    exit: Treatment,
    enter: Treatment,
    playing: Option<Playing>,
    /// Visual state items hold when no batch is running.
    settled: VisualState,
}

impl<R: AnimationRuntime> TransitionSequencer<R> {
    /// Create a sequencer with the given exit and enter treatments.
    #[must_use]
    pub fn new(runtime: R, exit: Treatment, enter: Treatment) -> Self {
        Self {
            runtime,
            exit,
            enter,
            playing: None,
            settled: VisualState::REST,
        }
    }

    /// Whether a batch is currently running.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing.is_some()
    }

    /// Direction of the running batch, if any.
    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        self.playing.map(|p| p.direction)
    }

    /// The exit treatment.
    #[must_use]
    pub fn exit_treatment(&self) -> &Treatment {
        &self.exit
    }

    /// The enter treatment.
    #[must_use]
    pub fn enter_treatment(&self) -> &Treatment {
        &self.enter
    }

    /// Access the underlying runtime.
    #[must_use]
    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    /// Animate `count` outgoing items (staggered per the exit treatment).
    ///
    /// # Errors
    ///
    /// [`SiteError::AnimationInFlight`] if a batch is still running.
    pub fn play_exit(
        &mut self,
        count: usize,
        now: Instant,
    ) -> Result<Completion, SiteError> {
        self.play(Direction::Exit, count, now)
    }

    /// Animate `count` incoming items (staggered per the enter treatment).
    ///
    /// # Errors
    ///
    /// [`SiteError::AnimationInFlight`] if a batch is still running, which
    /// includes an exit that has not been polled to completion.
    pub fn play_enter(
        &mut self,
        count: usize,
        now: Instant,
    ) -> Result<Completion, SiteError> {
        self.play(Direction::Enter, count, now)
    }

    fn play(
        &mut self,
        direction: Direction,
        count: usize,
        now: Instant,
    ) -> Result<Completion, SiteError> {
        if self.playing.is_some() {
            return Err(SiteError::AnimationInFlight);
        }
        let treatment = match direction {
            Direction::Exit => self.exit,
            Direction::Enter => self.enter,
        };
        if count == 0 {
            self.settled = treatment.to;
            return Ok(Completion::Immediate);
        }
        let id = self.runtime.start(&treatment, count, now);
        self.playing = Some(Playing {
            direction,
            id,
            targets: count,
        });
        Ok(Completion::Pending(id))
    }

    /// Check the running batch; returns its direction once it finishes.
    ///
    /// The finished batch is released, so the next play may begin.
    pub fn poll(&mut self, now: Instant) -> Option<Direction> {
        let playing = self.playing?;
        if !self.runtime.is_finished(playing.id, now) {
            return None;
        }
        self.runtime.release(playing.id);
        self.playing = None;
        self.settled = match playing.direction {
            Direction::Exit => self.exit.to,
            Direction::Enter => self.enter.to,
        };
        Some(playing.direction)
    }

    /// Visual state for the item at `index` of the currently rendered set.
    ///
    /// While a batch runs this asks the runtime; a runtime that does not
    /// expose visuals yields the treatment's start state. Between batches
    /// items hold the end state of the last one.
    #[must_use]
    pub fn visual(&self, index: usize, now: Instant) -> VisualState {
        match self.playing {
            Some(p) if index < p.targets => self
                .runtime
                .sample(p.id, index, now)
                .unwrap_or(match p.direction {
                    Direction::Exit => self.exit.from,
                    Direction::Enter => self.enter.from,
                }),
            _ => self.settled,
        }
    }

    /// Prepare the incoming set: items render hidden until enter starts.
    pub(crate) fn stage_enter(&mut self) {
        self.settled = self.enter.from;
    }

    /// Abandon the running batch without observing its completion.
    pub fn cancel(&mut self) {
        if let Some(playing) = self.playing.take() {
            log::debug!(
                "cancelling {:?} batch {}",
                playing.direction,
                playing.id.raw()
            );
            self.runtime.release(playing.id);
        }
        self.settled = VisualState::REST;
    }
}

#[cfg(test)]
mod tests {
    use web_time::Duration;

    use super::*;
    use crate::animation::runtime::TweenEngine;

    fn sequencer() -> TransitionSequencer<TweenEngine> {
        TransitionSequencer::new(
            TweenEngine::new(),
            Treatment::menu_exit(),
            Treatment::menu_enter(),
        )
    }

    #[test]
    fn test_enter_refused_while_exit_runs() {
        let mut seq = sequencer();
        let now = Instant::now();
        let exit = seq.play_exit(3, now).unwrap();
        assert!(matches!(exit, Completion::Pending(_)));
        assert!(matches!(
            seq.play_enter(2, now),
            Err(SiteError::AnimationInFlight)
        ));
    }

    #[test]
    fn test_poll_reports_exit_then_allows_enter() {
        let mut seq = sequencer();
        let start = Instant::now();
        let _ = seq.play_exit(3, start).unwrap();

        assert_eq!(seq.poll(start + Duration::from_millis(10)), None);

        let end = start + Treatment::menu_exit().total_duration(3);
        assert_eq!(seq.poll(end), Some(Direction::Exit));
        assert!(!seq.is_playing());
        assert_eq!(seq.runtime().live_count(), 0);

        assert!(matches!(seq.play_enter(2, end), Ok(Completion::Pending(_))));
        assert_eq!(seq.direction(), Some(Direction::Enter));
    }

    #[test]
    fn test_empty_batch_resolves_immediately() {
        let mut seq = sequencer();
        let now = Instant::now();
        assert_eq!(seq.play_enter(0, now).unwrap(), Completion::Immediate);
        assert!(!seq.is_playing());
        assert_eq!(seq.poll(now), None);
    }

    #[test]
    fn test_items_hold_exit_state_until_enter_runs() {
        let mut seq = sequencer();
        let start = Instant::now();
        let _ = seq.play_exit(2, start).unwrap();
        let end = start + Treatment::menu_exit().total_duration(2);
        let _ = seq.poll(end);

        assert_eq!(seq.visual(0, end), Treatment::menu_exit().to);
        seq.stage_enter();
        assert_eq!(seq.visual(0, end), Treatment::menu_enter().from);
    }

    #[test]
    fn test_cancel_releases_runtime_batch() {
        let mut seq = sequencer();
        let now = Instant::now();
        let _ = seq.play_exit(5, now).unwrap();
        seq.cancel();
        assert!(!seq.is_playing());
        assert_eq!(seq.runtime().live_count(), 0);
        assert_eq!(seq.visual(0, now), VisualState::REST);
    }
}
