//! Animation system for staggered card transitions.
//!
//! A [`Treatment`] describes one from → to tween applied across a batch of
//! cards with a [`Stagger`]. Batches run on an [`AnimationRuntime`]; the
//! [`TransitionSequencer`] chains an exit batch and an enter batch so the
//! two never overlap. [`Timeline`] lays out fixed multi-step sequences such
//! as the preloader.

mod runner;
pub mod runtime;
pub mod sequencer;
pub mod stagger;
pub mod timeline;
pub mod treatment;
pub mod visual;

pub use runner::AnimationRunner;
pub use runtime::{AnimationId, AnimationRuntime, TweenEngine};
pub use sequencer::{Completion, Direction, TransitionSequencer};
pub use stagger::{Stagger, StaggerOrigin, StaggerSpacing};
pub use timeline::{Timeline, TimelineStep};
pub use treatment::Treatment;
pub use visual::VisualState;
