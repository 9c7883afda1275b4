//! The tweening runtime seam.
//!
//! The interaction core never drives pixels itself. It hands batches to an
//! [`AnimationRuntime`] and polls it for completion. [`TweenEngine`] is the
//! in-process implementation used by the web front end and by tests; a host
//! that owns its own animation library implements the trait over that.

use rustc_hash::FxHashMap;
use web_time::Instant;

use super::runner::AnimationRunner;
use super::treatment::Treatment;
use super::visual::VisualState;

/// Opaque handle to one running batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(u64);

impl AnimationId {
    /// Raw handle value (for logging).
    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// An animation/tweening capability: "animate this batch with this
/// treatment and tell me when the longest item finishes".
pub trait AnimationRuntime {
    /// Begin animating `targets` items with `treatment`.
    fn start(
        &mut self,
        treatment: &Treatment,
        targets: usize,
        now: Instant,
    ) -> AnimationId;

    /// Whether the batch has finished. Unknown or released ids count as
    /// finished.
    fn is_finished(&self, id: AnimationId, now: Instant) -> bool;

    /// Current visual state of one target, if the runtime exposes it.
    ///
    /// Runtimes that write styles directly (e.g. a browser tween library)
    /// return `None`.
    fn sample(
        &self,
        _id: AnimationId,
        _index: usize,
        _now: Instant,
    ) -> Option<VisualState> {
        None
    }

    /// Drop a batch, finished or not. Its completion will never be
    /// observed.
    fn release(&mut self, id: AnimationId);
}

impl<R: AnimationRuntime + ?Sized> AnimationRuntime for Box<R> {
    fn start(
        &mut self,
        treatment: &Treatment,
        targets: usize,
        now: Instant,
    ) -> AnimationId {
        (**self).start(treatment, targets, now)
    }

    fn is_finished(&self, id: AnimationId, now: Instant) -> bool {
        (**self).is_finished(id, now)
    }

    fn sample(
        &self,
        id: AnimationId,
        index: usize,
        now: Instant,
    ) -> Option<VisualState> {
        (**self).sample(id, index, now)
    }

    fn release(&mut self, id: AnimationId) {
        (**self).release(id);
    }
}

/// In-process tween engine: one [`AnimationRunner`] per live batch.
#[derive(Debug, Default)]
pub struct TweenEngine {
    runners: FxHashMap<AnimationId, AnimationRunner>,
    next_id: u64,
}

impl TweenEngine {
    /// Create an empty engine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of batches not yet released.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.runners.len()
    }
}

impl AnimationRuntime for TweenEngine {
    fn start(
        &mut self,
        treatment: &Treatment,
        targets: usize,
        now: Instant,
    ) -> AnimationId {
        let id = AnimationId(self.next_id);
        self.next_id += 1;
        let runner = AnimationRunner::new(*treatment, targets, now);
        log::debug!("tween {} started: {runner:?}", id.raw());
        let _ = self.runners.insert(id, runner);
        id
    }

    fn is_finished(&self, id: AnimationId, now: Instant) -> bool {
        self.runners
            .get(&id)
            .is_none_or(|runner| runner.is_complete(now))
    }

    fn sample(
        &self,
        id: AnimationId,
        index: usize,
        now: Instant,
    ) -> Option<VisualState> {
        self.runners.get(&id)?.sample(index, now)
    }

    fn release(&mut self, id: AnimationId) {
        if self.runners.remove(&id).is_some() {
            log::debug!("tween {} released", id.raw());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_tracks_completion() {
        let mut engine = TweenEngine::new();
        let start = Instant::now();
        let treatment = Treatment::menu_enter();
        let id = engine.start(&treatment, 3, start);

        assert!(!engine.is_finished(id, start));
        let end = start + treatment.total_duration(3);
        assert!(engine.is_finished(id, end));
        assert_eq!(engine.sample(id, 1, end), Some(VisualState::REST));
    }

    #[test]
    fn test_released_ids_count_as_finished() {
        let mut engine = TweenEngine::new();
        let start = Instant::now();
        let id = engine.start(&Treatment::menu_exit(), 4, start);
        engine.release(id);

        assert_eq!(engine.live_count(), 0);
        assert!(engine.is_finished(id, start));
        assert_eq!(engine.sample(id, 0, start), None);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut engine = TweenEngine::new();
        let now = Instant::now();
        let a = engine.start(&Treatment::menu_exit(), 1, now);
        let b = engine.start(&Treatment::menu_exit(), 1, now);
        assert_ne!(a, b);
        assert_eq!(engine.live_count(), 2);
    }
}
