//! Treatment describes how a batch of cards animates in or out.

use std::time::Duration;

use super::stagger::Stagger;
use super::visual::VisualState;
use crate::util::easing::EasingFunction;

/// A from → to tween applied to every item of a batch, staggered.
///
/// Consumers construct treatments via preset constructors:
/// [`menu_exit()`](Self::menu_exit), [`menu_enter()`](Self::menu_enter),
/// [`gallery_exit()`](Self::gallery_exit),
/// [`gallery_enter()`](Self::gallery_enter),
/// [`nav_items()`](Self::nav_items), or [`new()`](Self::new) for custom
/// ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Treatment {
    /// State every item starts from.
    pub from: VisualState,
    /// State every item ends at.
    pub to: VisualState,
    /// Per-item duration.
    pub duration: Duration,
    /// Per-item easing.
    pub easing: EasingFunction,
    /// Delay policy across the batch.
    pub stagger: Stagger,
}

impl Treatment {
    /// Custom treatment with no stagger.
    #[must_use]
    pub fn new(
        from: VisualState,
        to: VisualState,
        duration: Duration,
        easing: EasingFunction,
    ) -> Self {
        Self {
            from,
            to,
            duration,
            easing,
            stagger: Stagger::NONE,
        }
    }

    /// Menu cards leaving: fade, lift 20px, shrink to 0.97, last card first.
    #[must_use]
    pub fn menu_exit() -> Self {
        Self {
            from: VisualState::REST,
            to: VisualState::hidden_at(-20.0).with_scale(0.97),
            duration: Duration::from_millis(500),
            easing: EasingFunction::PowerIn { exponent: 3 },
            stagger: Stagger::amount(Duration::from_millis(100)).reversed(),
        }
    }

    /// Menu cards arriving: rise 30px, grow from 0.95, tilt back from -10°.
    #[must_use]
    pub fn menu_enter() -> Self {
        Self {
            from: VisualState::hidden_at(30.0)
                .with_scale(0.95)
                .with_rotate_x(-10.0),
            to: VisualState::REST,
            duration: Duration::from_millis(100),
            easing: EasingFunction::PowerOut { exponent: 3 },
            stagger: Stagger::amount(Duration::from_millis(200)),
        }
    }

    /// Gallery tiles leaving: same motion as the menu, faster.
    #[must_use]
    pub fn gallery_exit() -> Self {
        Self {
            duration: Duration::from_millis(350),
            ..Self::menu_exit()
        }
    }

    /// Gallery tiles arriving: rise 100px, grow from 0.8, swing in from 15°.
    #[must_use]
    pub fn gallery_enter() -> Self {
        Self {
            from: VisualState::hidden_at(100.0)
                .with_scale(0.8)
                .with_rotate_y(15.0),
            to: VisualState::REST,
            duration: Duration::from_millis(800),
            easing: EasingFunction::PowerOut { exponent: 4 },
            stagger: Stagger::each(Duration::from_millis(100)),
        }
    }

    /// Mobile navigation links sliding in from the right.
    #[must_use]
    pub fn nav_items() -> Self {
        Self {
            from: VisualState::hidden_at(0.0).with_x(100.0).with_rotate_y(-45.0),
            to: VisualState::REST,
            duration: Duration::from_millis(600),
            easing: EasingFunction::PowerOut { exponent: 4 },
            stagger: Stagger::each(Duration::from_millis(100)),
        }
    }

    /// Builder: replace the stagger policy.
    #[must_use]
    pub fn with_stagger(mut self, stagger: Stagger) -> Self {
        self.stagger = stagger;
        self
    }

    /// Total duration for a batch of `count` items.
    #[must_use]
    pub fn total_duration(&self, count: usize) -> Duration {
        self.stagger.total_duration(self.duration, count)
    }

    /// Local progress (0→1, un-eased) of one item at `elapsed` into the
    /// batch.
    #[must_use]
    pub fn item_progress(
        &self,
        elapsed: Duration,
        index: usize,
        count: usize,
    ) -> f32 {
        let delay = self.stagger.delay_for(index, count);
        if elapsed < delay {
            return 0.0;
        }
        let local = elapsed - delay;
        if self.duration.is_zero() {
            return 1.0;
        }
        (local.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Visual state of one item at `elapsed` into the batch.
    #[must_use]
    pub fn sample(
        &self,
        elapsed: Duration,
        index: usize,
        count: usize,
    ) -> VisualState {
        let t = self.item_progress(elapsed, index, count);
        self.from.lerp(&self.to, self.easing.evaluate(t))
    }
}

impl Default for Treatment {
    fn default() -> Self {
        Self::menu_enter()
    }
}
