// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Interaction core for the ALDEE'S restaurant site.
//!
//! Everything here is renderer-agnostic state: the hosting page feeds in
//! clicks, keys, scroll offsets and a frame clock, and reads back what to
//! draw. Time is always injected as a [`web_time::Instant`].
//!
//! # Key entry points
//!
//! - [`selector::CategorySelector`] - tab switching with an exit/swap/enter
//!   transition that never overlaps itself
//! - [`section::MenuSection`] / [`section::GallerySection`] - the selector
//!   wired to a card grid (and, for the gallery, a lightbox)
//! - [`viewport::ScrollTriggers`] - scroll-position reveals scoped to a
//!   mounted section
//! - [`options::Options`] - TOML presets for every timing and binding
//!
//! # Architecture
//!
//! Animations run on an [`animation::AnimationRuntime`]; the bundled
//! [`animation::TweenEngine`] samples [`animation::Treatment`]s against the
//! injected clock. The [`animation::TransitionSequencer`] plays one batch at
//! a time and reports completion through `poll`, which the selector turns
//! into phase changes.

pub mod animation;
pub mod carousel;
pub mod catalog;
pub mod contact;
pub mod error;
pub mod grid;
pub mod input;
pub mod navigation;
pub mod options;
pub mod preloader;
pub mod section;
pub mod selector;
pub mod util;
pub mod viewport;

pub use error::SiteError;
pub use options::Options;
