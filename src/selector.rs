//! Category selector: the tab/category switching state machine.
//!
//! ```text
//!            request_switch(k)            exit done: current = k
//!   Idle ───────────────────────▶ Exiting ──────────────────────▶ Entering
//!    ▲                                                               │
//!    └──────────────────────────── enter done ───────────────────────┘
//! ```
//!
//! Requests that arrive while the phase is not `Idle` are dropped, not
//! queued, and an in-flight transition always runs to completion. The
//! rendered item set and `current` agree whenever the phase is `Idle`.

use std::sync::Arc;

use web_time::Instant;

use crate::animation::{
    AnimationRuntime, Completion, Direction, TransitionSequencer, VisualState,
};
use crate::catalog::{Catalog, Category, Item};
use crate::error::SiteError;

/// Where the selector is in the exit → enter hand-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No transition running; switching is allowed.
    #[default]
    Idle,
    /// Outgoing items are animating away.
    Exiting,
    /// Incoming items are animating in.
    Entering,
}

/// Why a valid switch request did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// A transition is already in flight.
    InProgress,
    /// The target is already the current category.
    AlreadyCurrent,
}

/// Result of a [`CategorySelector::request_switch`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// A transition began.
    Started,
    /// The request was dropped.
    Ignored(IgnoreReason),
}

/// State changes reported by [`CategorySelector::tick`] and
/// [`CategorySelector::request_switch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorEvent {
    /// The phase moved from one state to another.
    PhaseChanged {
        /// Previous phase.
        from: Phase,
        /// New phase.
        to: Phase,
    },
    /// `current` changed; the new item set is now rendered.
    Swapped {
        /// Key that was current before.
        from: String,
        /// Key that is current now.
        to: String,
    },
}

/// Owns the current category and drives transitions between categories.
#[derive(Debug)]
pub struct CategorySelector<R: AnimationRuntime> {
    catalog: Arc<Catalog>,
    current: usize,
    target: Option<usize>,
    phase: Phase,
    sequencer: TransitionSequencer<R>,
    events: Vec<SelectorEvent>,
}

impl<R: AnimationRuntime> CategorySelector<R> {
    /// Create a selector showing `default_key`, idle.
    ///
    /// # Errors
    ///
    /// [`SiteError::UnknownCategory`] if `default_key` is not in the catalog.
    pub fn new(
        catalog: Arc<Catalog>,
        default_key: &str,
        sequencer: TransitionSequencer<R>,
    ) -> Result<Self, SiteError> {
        let current = catalog
            .position(default_key)
            .ok_or_else(|| SiteError::UnknownCategory(default_key.to_owned()))?;
        Ok(Self {
            catalog,
            current,
            target: None,
            phase: Phase::Idle,
            sequencer,
            events: Vec::new(),
        })
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a switch request would be accepted right now.
    #[must_use]
    pub fn can_switch(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// The category whose items are rendered.
    #[must_use]
    pub fn current_category(&self) -> &Category {
        // `current` always indexes a validated category.
        &self.catalog.categories()[self.current]
    }

    /// Key of the rendered category.
    #[must_use]
    pub fn current_key(&self) -> &str {
        self.current_category().key()
    }

    /// Key requested by the in-flight transition, if any.
    #[must_use]
    pub fn pending_key(&self) -> Option<&str> {
        self.target
            .and_then(|p| self.catalog.category_at(p))
            .map(Category::key)
    }

    /// All categories, in display order (for the tab bar).
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        self.catalog.categories()
    }

    /// The shared catalog.
    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Items currently rendered, in display order.
    #[must_use]
    pub fn rendered_items(&self) -> &[Item] {
        self.current_category().items()
    }

    /// Visual state of the rendered item at `index`.
    #[must_use]
    pub fn item_visual(&self, index: usize, now: Instant) -> VisualState {
        self.sequencer.visual(index, now)
    }

    /// Ask to switch to `key`.
    ///
    /// Unknown keys fail without touching state. Requests while a
    /// transition is running, or for the current category, are ignored.
    ///
    /// # Errors
    ///
    /// [`SiteError::UnknownCategory`] if `key` is not in the catalog, or
    /// [`SiteError::AnimationInFlight`] if the exit cannot start. Neither
    /// leaves the selector out of `Idle`.
    pub fn request_switch(
        &mut self,
        key: &str,
        now: Instant,
    ) -> Result<SwitchOutcome, SiteError> {
        let Some(target) = self.catalog.position(key) else {
            log::warn!("switch to unknown category `{key}` rejected");
            return Err(SiteError::UnknownCategory(key.to_owned()));
        };
        if self.phase != Phase::Idle {
            log::debug!("switch to `{key}` dropped: {:?} in progress", self.phase);
            return Ok(SwitchOutcome::Ignored(IgnoreReason::InProgress));
        }
        if target == self.current {
            return Ok(SwitchOutcome::Ignored(IgnoreReason::AlreadyCurrent));
        }

        let outgoing = self.rendered_items().len();
        let completion = self.sequencer.play_exit(outgoing, now)?;
        self.target = Some(target);
        self.set_phase(Phase::Exiting);
        if completion == Completion::Immediate {
            if let Err(e) = self.begin_enter(now) {
                self.settle();
                return Err(e);
            }
        }
        Ok(SwitchOutcome::Started)
    }

    /// Advance the transition; call once per animation frame.
    ///
    /// Returns every state change since the last call, including those
    /// made synchronously by `request_switch`.
    pub fn tick(&mut self, now: Instant) -> Vec<SelectorEvent> {
        match self.sequencer.poll(now) {
            Some(Direction::Exit) => {
                if let Err(e) = self.begin_enter(now) {
                    // poll() just released the exit batch, so enter can
                    // always start; settle rather than wedge if it cannot.
                    log::error!("enter animation failed to start: {e}");
                    self.settle();
                }
            }
            Some(Direction::Enter) => self.settle(),
            None => {}
        }
        std::mem::take(&mut self.events)
    }

    /// Tear down: cancel any running animation and snap to idle. A target
    /// that has not been swapped in yet is discarded.
    pub fn unmount(&mut self) {
        self.sequencer.cancel();
        self.target = None;
        if self.phase != Phase::Idle {
            self.set_phase(Phase::Idle);
        }
    }

    fn begin_enter(&mut self, now: Instant) -> Result<(), SiteError> {
        if let Some(target) = self.target.take() {
            let from = self.current_key().to_owned();
            self.current = target;
            let to = self.current_key().to_owned();
            log::debug!("category swapped `{from}` -> `{to}`");
            self.events.push(SelectorEvent::Swapped { from, to });
        }
        self.set_phase(Phase::Entering);
        self.sequencer.stage_enter();
        let incoming = self.rendered_items().len();
        match self.sequencer.play_enter(incoming, now)? {
            Completion::Immediate => self.settle(),
            Completion::Pending(_) => {}
        }
        Ok(())
    }

    fn settle(&mut self) {
        self.set_phase(Phase::Idle);
    }

    fn set_phase(&mut self, to: Phase) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        self.events.push(SelectorEvent::PhaseChanged { from, to });
    }
}

impl<R: AnimationRuntime> Drop for CategorySelector<R> {
    fn drop(&mut self) {
        self.sequencer.cancel();
    }
}
