//! Mobile navigation overlay and scroll-aware header.
//!
//! Opening grows a circular clip from the menu button to cover the screen,
//! then slides the links in; closing shrinks the clip from wherever it is.
//! The page scroll is locked while the overlay is open or opening.
//!
//! ```text
//!   Closed ──open──▶ Opening ──timeline done──▶ Open
//!     ▲                 │                         │
//!     └──── Closing ◀───┴─────────close───────────┘
//! ```

use web_time::{Duration, Instant};

use crate::animation::{Timeline, Treatment, VisualState};
use crate::input::KeyAction;
use crate::util::easing::EasingFunction;

/// Clip radius (percent) that covers the whole viewport.
pub const FULL_REVEAL_RADIUS: f32 = 150.0;

/// A header link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    /// Route path.
    pub href: String,
    /// Visible label.
    pub label: String,
}

impl NavLink {
    /// Create a link.
    #[must_use]
    pub fn new(href: &str, label: &str) -> Self {
        Self {
            href: href.to_owned(),
            label: label.to_owned(),
        }
    }

    /// Whether this link points at `path`.
    #[must_use]
    pub fn is_active(&self, path: &str) -> bool {
        self.href == path
    }
}

/// The site's header links.
#[must_use]
pub fn default_links() -> Vec<NavLink> {
    vec![
        NavLink::new("/", "Home"),
        NavLink::new("/gallery", "Gallery"),
        NavLink::new("/contact", "Contact"),
    ]
}

/// Overlay lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavState {
    /// Hidden.
    #[default]
    Closed,
    /// Clip growing and links sliding in.
    Opening,
    /// Fully shown.
    Open,
    /// Clip shrinking.
    Closing,
}

/// Timing of the overlay animations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavTimings {
    /// Clip growth.
    pub reveal: Duration,
    /// Clip shrink from full size.
    pub dismiss: Duration,
    /// Reveal easing (also used for dismiss).
    pub reveal_easing: EasingFunction,
    /// How far the link entrance overlaps the end of the reveal.
    pub items_overlap: Duration,
    /// Link entrance.
    pub items: Treatment,
    /// Scroll offset (px) past which the header turns solid.
    pub scroll_threshold: f32,
}

impl Default for NavTimings {
    fn default() -> Self {
        Self {
            reveal: Duration::from_millis(800),
            dismiss: Duration::from_millis(500),
            reveal_easing: EasingFunction::PowerInOut { exponent: 5 },
            items_overlap: Duration::from_millis(300),
            items: Treatment::nav_items(),
            scroll_threshold: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Reveal,
    Links,
}

/// Mobile menu overlay plus the header's scrolled flag.
#[derive(Debug)]
pub struct NavOverlay {
    timings: NavTimings,
    links: Vec<NavLink>,
    timeline: Timeline<Step>,
    state: NavState,
    started_at: Option<Instant>,
    /// Radius the current dismiss started from.
    dismiss_from: f32,
    scroll_y: f32,
}

impl NavOverlay {
    /// Closed overlay over `links`.
    #[must_use]
    pub fn new(timings: NavTimings, links: Vec<NavLink>) -> Self {
        let timeline = Timeline::new().then(Step::Reveal, timings.reveal).overlapping(
            Step::Links,
            timings.items.total_duration(links.len()),
            timings.items_overlap,
        );
        Self {
            timings,
            links,
            timeline,
            state: NavState::Closed,
            started_at: None,
            dismiss_from: 0.0,
            scroll_y: 0.0,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> NavState {
        self.state
    }

    /// Whether the overlay is open or on its way there.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.state, NavState::Opening | NavState::Open)
    }

    /// Whether page scrolling should be disabled.
    #[must_use]
    pub fn scroll_locked(&self) -> bool {
        self.is_open()
    }

    /// Header links.
    #[must_use]
    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    /// Total opening time for the configured links.
    #[must_use]
    pub fn open_duration(&self) -> Duration {
        self.timeline.total_duration()
    }

    /// Open if closed or closing, close if open or opening.
    pub fn toggle(&mut self, now: Instant) {
        if self.is_open() {
            self.close(now);
        } else {
            self.open(now);
        }
    }

    /// Start opening. The reveal always restarts from an empty clip.
    pub fn open(&mut self, now: Instant) {
        if self.is_open() {
            return;
        }
        log::debug!("navigation overlay opening");
        self.state = NavState::Opening;
        self.started_at = Some(now);
    }

    /// Start closing from the current clip size.
    pub fn close(&mut self, now: Instant) {
        if !self.is_open() {
            return;
        }
        log::debug!("navigation overlay closing");
        self.dismiss_from = self.reveal_radius(now);
        self.state = NavState::Closing;
        self.started_at = Some(now);
    }

    /// Apply a bound key. Returns whether the overlay used it.
    ///
    /// The toggle key always applies; the close key only dismisses an
    /// overlay that is open or opening.
    pub fn handle_key(&mut self, action: KeyAction, now: Instant) -> bool {
        match action {
            KeyAction::ToggleNavigation => {
                self.toggle(now);
                true
            }
            KeyAction::LightboxClose if self.is_open() => {
                self.close(now);
                true
            }
            _ => false,
        }
    }

    /// Advance; returns the new state when it changed.
    pub fn tick(&mut self, now: Instant) -> Option<NavState> {
        let elapsed = self.elapsed(now);
        let next = match self.state {
            NavState::Opening if self.timeline.is_finished(elapsed) => NavState::Open,
            NavState::Closing if elapsed >= self.dismiss_duration() => NavState::Closed,
            _ => return None,
        };
        self.state = next;
        if next == NavState::Closed {
            self.started_at = None;
        }
        Some(next)
    }

    /// Clip-circle radius as a percentage, 0 to [`FULL_REVEAL_RADIUS`].
    #[must_use]
    pub fn reveal_radius(&self, now: Instant) -> f32 {
        let elapsed = self.elapsed(now);
        let ease = self.timings.reveal_easing;
        match self.state {
            NavState::Closed => 0.0,
            NavState::Open => FULL_REVEAL_RADIUS,
            NavState::Opening => {
                let t = self.timeline.step_progress(Step::Reveal, elapsed);
                FULL_REVEAL_RADIUS * ease.evaluate(t)
            }
            NavState::Closing => {
                let duration = self.dismiss_duration();
                let t = if duration.is_zero() {
                    1.0
                } else {
                    (elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0)
                };
                self.dismiss_from * (1.0 - ease.evaluate(t))
            }
        }
    }

    /// CSS `clip-path` for the overlay background.
    #[must_use]
    pub fn clip_path_css(&self, now: Instant) -> String {
        format!(
            "clip-path: circle({:.2}% at calc(100% - 40px) 40px);",
            self.reveal_radius(now)
        )
    }

    /// Visual state of link `index` inside the overlay.
    #[must_use]
    pub fn link_visual(&self, index: usize, now: Instant) -> VisualState {
        let items = &self.timings.items;
        match self.state {
            NavState::Closed => items.from,
            NavState::Open | NavState::Closing => items.to,
            NavState::Opening => {
                let elapsed = self.elapsed(now);
                let start = self
                    .timeline
                    .step(Step::Links)
                    .map_or(Duration::ZERO, |s| s.start);
                match elapsed.checked_sub(start) {
                    Some(local) => items.sample(local, index, self.links.len()),
                    None => items.from,
                }
            }
        }
    }

    /// Record the page scroll offset; returns whether
    /// [`is_scrolled`](Self::is_scrolled) flipped.
    pub fn set_scroll(&mut self, scroll_y: f32) -> bool {
        let before = self.is_scrolled();
        self.scroll_y = scroll_y;
        before != self.is_scrolled()
    }

    /// Whether the header should show its solid, compact style.
    #[must_use]
    pub fn is_scrolled(&self) -> bool {
        self.scroll_y > self.timings.scroll_threshold
    }

    fn elapsed(&self, now: Instant) -> Duration {
        self.started_at
            .map_or(Duration::ZERO, |t| now.saturating_duration_since(t))
    }

    /// Dismiss time scaled by how much of the clip is left to shrink.
    fn dismiss_duration(&self) -> Duration {
        let fraction = (self.dismiss_from / FULL_REVEAL_RADIUS).clamp(0.0, 1.0);
        self.timings.dismiss.mul_f32(fraction)
    }
}

impl Default for NavOverlay {
    fn default() -> Self {
        Self::new(NavTimings::default(), default_links())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_open_timeline_overlaps_links() {
        let nav = NavOverlay::default();
        // Reveal 800, links start at 500 and run 600 + 2 * 100.
        assert_eq!(nav.open_duration(), ms(1300));
    }

    #[test]
    fn test_full_open_close_cycle() {
        let mut nav = NavOverlay::default();
        let t0 = Instant::now();
        assert!(!nav.scroll_locked());

        nav.toggle(t0);
        assert_eq!(nav.state(), NavState::Opening);
        assert!(nav.scroll_locked());
        assert!(nav.reveal_radius(t0).abs() < f32::EPSILON);

        assert_eq!(nav.tick(t0 + ms(1299)), None);
        assert_eq!(nav.tick(t0 + ms(1300)), Some(NavState::Open));
        assert!((nav.reveal_radius(t0 + ms(1300)) - FULL_REVEAL_RADIUS).abs() < f32::EPSILON);

        let t1 = t0 + ms(2000);
        nav.toggle(t1);
        assert_eq!(nav.state(), NavState::Closing);
        assert!(!nav.scroll_locked());
        assert_eq!(nav.tick(t1 + ms(499)), None);
        assert_eq!(nav.tick(t1 + ms(500)), Some(NavState::Closed));
        assert!(nav.reveal_radius(t1 + ms(500)).abs() < f32::EPSILON);
    }

    #[test]
    fn test_reveal_radius_grows_monotonically() {
        let mut nav = NavOverlay::default();
        let t0 = Instant::now();
        nav.open(t0);
        let mut last = 0.0;
        for step in 0..=16 {
            let r = nav.reveal_radius(t0 + ms(step * 50));
            assert!(r >= last);
            last = r;
        }
        assert!((last - FULL_REVEAL_RADIUS).abs() < 1e-3);
    }

    #[test]
    fn test_close_midway_shrinks_from_current_radius() {
        let mut nav = NavOverlay::default();
        let t0 = Instant::now();
        nav.open(t0);
        let mid = t0 + ms(400);
        let radius = nav.reveal_radius(mid);
        assert!(radius > 0.0 && radius < FULL_REVEAL_RADIUS);

        nav.close(mid);
        assert!((nav.reveal_radius(mid) - radius).abs() < 1e-3);
        // Shorter dismiss for a partially grown clip.
        assert!(nav.dismiss_duration() < ms(500));
        let done = mid + nav.dismiss_duration();
        assert_eq!(nav.tick(done), Some(NavState::Closed));
    }

    #[test]
    fn test_reopen_while_closing_restarts_reveal() {
        let mut nav = NavOverlay::default();
        let t0 = Instant::now();
        nav.open(t0);
        let _ = nav.tick(t0 + ms(1300));
        nav.close(t0 + ms(1400));
        nav.open(t0 + ms(1500));
        assert_eq!(nav.state(), NavState::Opening);
        assert!(nav.reveal_radius(t0 + ms(1500)).abs() < f32::EPSILON);
    }

    #[test]
    fn test_links_slide_in_after_overlap() {
        let mut nav = NavOverlay::default();
        let t0 = Instant::now();
        nav.open(t0);
        let hidden = Treatment::nav_items().from;
        assert_eq!(nav.link_visual(0, t0 + ms(499)), hidden);
        assert_ne!(nav.link_visual(0, t0 + ms(700)), hidden);
        // Third link waits two stagger increments.
        assert_eq!(nav.link_visual(2, t0 + ms(700)), hidden);
        let _ = nav.tick(t0 + ms(1300));
        assert_eq!(nav.link_visual(2, t0 + ms(1300)), VisualState::REST);
    }

    #[test]
    fn test_redundant_open_close_are_ignored() {
        let mut nav = NavOverlay::default();
        let t0 = Instant::now();
        nav.close(t0);
        assert_eq!(nav.state(), NavState::Closed);
        nav.open(t0);
        nav.open(t0 + ms(600));
        // Second open did not restart the timeline.
        assert_eq!(nav.tick(t0 + ms(1300)), Some(NavState::Open));
    }

    #[test]
    fn test_close_key_dismisses_open_overlay() {
        let mut nav = NavOverlay::default();
        let t0 = Instant::now();
        assert!(!nav.handle_key(KeyAction::LightboxClose, t0));
        assert_eq!(nav.state(), NavState::Closed);

        assert!(nav.handle_key(KeyAction::ToggleNavigation, t0));
        assert_eq!(nav.state(), NavState::Opening);
        assert!(!nav.handle_key(KeyAction::LightboxNext, t0 + ms(100)));
        assert!(nav.handle_key(KeyAction::LightboxClose, t0 + ms(200)));
        assert_eq!(nav.state(), NavState::Closing);
        assert!(!nav.scroll_locked());
        // Already closing: nothing left to dismiss.
        assert!(!nav.handle_key(KeyAction::LightboxClose, t0 + ms(250)));
    }

    #[test]
    fn test_scrolled_threshold() {
        let mut nav = NavOverlay::default();
        assert!(!nav.set_scroll(50.0));
        assert!(!nav.is_scrolled());
        assert!(nav.set_scroll(51.0));
        assert!(nav.is_scrolled());
        assert!(!nav.set_scroll(400.0));
        assert!(nav.set_scroll(0.0));
    }

    #[test]
    fn active_link_matches_path() {
        let links = default_links();
        let active: Vec<&str> = links
            .iter()
            .filter(|l| l.is_active("/gallery"))
            .map(|l| l.label.as_str())
            .collect();
        assert_eq!(active, ["Gallery"]);
    }
}
