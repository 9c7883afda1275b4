//! Scroll-linked viewport triggers.
//!
//! A [`ScrollTriggers`] registry holds one subscription per element. Each
//! subscription has a start and an end point (`"top 85%"` means "when the
//! element's top reaches 85% down the viewport") and reports crossings as
//! [`TriggerEvent`]s from [`ScrollTriggers::update`]. Subscriptions are
//! made inside a [`ContextId`] so a section can release everything it
//! registered with one [`ScrollTriggers::revert`] on unmount.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::error::SiteError;

/// Opaque handle for a page element (assigned by the renderer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Scope that owns a group of subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId(u32);

/// Handle for one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Edge of the element (or viewport) a trigger point refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Top edge.
    Top,
    /// Vertical midpoint.
    Center,
    /// Bottom edge.
    Bottom,
}

impl Edge {
    fn fraction(self) -> f32 {
        match self {
            Self::Top => 0.0,
            Self::Center => 0.5,
            Self::Bottom => 1.0,
        }
    }

    fn parse(word: &str) -> Option<Self> {
        match word {
            "top" => Some(Self::Top),
            "center" => Some(Self::Center),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }
}

/// Position inside the viewport a trigger point is measured against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportOffset {
    /// Fraction of the viewport height from its top (0.85 for `85%`).
    Fraction(f32),
    /// Pixels from the viewport top.
    Pixels(f32),
}

impl ViewportOffset {
    fn resolve(self, viewport_height: f32) -> f32 {
        match self {
            Self::Fraction(f) => f * viewport_height,
            Self::Pixels(px) => px,
        }
    }
}

/// A point where a trigger starts or ends: `"<element edge> <viewport pos>"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerPoint {
    /// Edge of the element.
    pub element: Edge,
    /// Where in the viewport that edge must be.
    pub viewport: ViewportOffset,
}

impl TriggerPoint {
    /// `"top 85%"`, the usual entrance point.
    pub const ENTRANCE: Self = Self {
        element: Edge::Top,
        viewport: ViewportOffset::Fraction(0.85),
    };

    /// `"bottom top"`: element has scrolled fully past.
    pub const PASSED: Self = Self {
        element: Edge::Bottom,
        viewport: ViewportOffset::Fraction(0.0),
    };

    /// Parse `"top 85%"`, `"top bottom"`, `"center 100px"`.
    ///
    /// # Errors
    ///
    /// [`SiteError::OptionsParse`] for anything else.
    pub fn parse(text: &str) -> Result<Self, SiteError> {
        let bad = || SiteError::OptionsParse(format!("invalid trigger point `{text}`"));
        let mut words = text.split_whitespace();
        let element = words.next().and_then(Edge::parse).ok_or_else(bad)?;
        let viewport_word = words.next().ok_or_else(bad)?;
        if words.next().is_some() {
            return Err(bad());
        }
        let viewport = if let Some(edge) = Edge::parse(viewport_word) {
            ViewportOffset::Fraction(edge.fraction())
        } else if let Some(pct) = viewport_word.strip_suffix('%') {
            let pct: f32 = pct.parse().map_err(|_| bad())?;
            ViewportOffset::Fraction(pct / 100.0)
        } else if let Some(px) = viewport_word.strip_suffix("px") {
            ViewportOffset::Pixels(px.parse().map_err(|_| bad())?)
        } else {
            return Err(bad());
        };
        Ok(Self { element, viewport })
    }

    /// Scroll offset at which this point is reached.
    fn scroll_position(&self, bounds: ElementBounds, viewport_height: f32) -> f32 {
        bounds.top + bounds.height * self.element.fraction()
            - self.viewport.resolve(viewport_height)
    }
}

/// What a crossing asks the attached animation to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    /// Play forward from the current point.
    Play,
    /// Play backward to the start.
    Reverse,
    /// Restart from the beginning.
    Restart,
    /// Jump back to the start state.
    Reset,
    /// Jump to the end state.
    Complete,
    /// Do nothing.
    None,
}

impl ToggleAction {
    fn parse(word: &str) -> Option<Self> {
        match word {
            "play" | "resume" => Some(Self::Play),
            "reverse" => Some(Self::Reverse),
            "restart" => Some(Self::Restart),
            "reset" => Some(Self::Reset),
            "complete" => Some(Self::Complete),
            "none" | "pause" => Some(Self::None),
            _ => None,
        }
    }
}

/// Actions for the four crossings, in `"enter leave enter-back leave-back"`
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleActions {
    /// Scrolling down past the start.
    pub on_enter: ToggleAction,
    /// Scrolling down past the end.
    pub on_leave: ToggleAction,
    /// Scrolling up past the end.
    pub on_enter_back: ToggleAction,
    /// Scrolling up past the start.
    pub on_leave_back: ToggleAction,
}

impl Default for ToggleActions {
    /// `"play none none none"`.
    fn default() -> Self {
        Self {
            on_enter: ToggleAction::Play,
            on_leave: ToggleAction::None,
            on_enter_back: ToggleAction::None,
            on_leave_back: ToggleAction::None,
        }
    }
}

impl ToggleActions {
    /// `"play none none reverse"`: replay on scroll back.
    pub const REPLAYABLE: Self = Self {
        on_enter: ToggleAction::Play,
        on_leave: ToggleAction::None,
        on_enter_back: ToggleAction::None,
        on_leave_back: ToggleAction::Reverse,
    };

    /// Parse four space-separated action words.
    ///
    /// # Errors
    ///
    /// [`SiteError::OptionsParse`] unless there are exactly four known words.
    pub fn parse(text: &str) -> Result<Self, SiteError> {
        let words: Vec<ToggleAction> = text
            .split_whitespace()
            .map(ToggleAction::parse)
            .collect::<Option<_>>()
            .ok_or_else(|| SiteError::OptionsParse(format!("invalid toggle actions `{text}`")))?;
        match words[..] {
            [on_enter, on_leave, on_enter_back, on_leave_back] => Ok(Self {
                on_enter,
                on_leave,
                on_enter_back,
                on_leave_back,
            }),
            _ => Err(SiteError::OptionsParse(format!(
                "toggle actions need four words, got `{text}`"
            ))),
        }
    }

    fn for_crossing(&self, crossing: Crossing) -> ToggleAction {
        match crossing {
            Crossing::Enter => self.on_enter,
            Crossing::Leave => self.on_leave,
            Crossing::EnterBack => self.on_enter_back,
            Crossing::LeaveBack => self.on_leave_back,
        }
    }
}

/// Trigger configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerSpec {
    /// Where the active range begins.
    pub start: TriggerPoint,
    /// Where the active range ends.
    pub end: TriggerPoint,
    /// Release the subscription after the first enter.
    pub once: bool,
    /// Actions per crossing.
    pub actions: ToggleActions,
}

impl TriggerSpec {
    /// Entrance reveal at `start` that fires once.
    #[must_use]
    pub fn reveal(start: TriggerPoint) -> Self {
        Self {
            start,
            end: TriggerPoint::PASSED,
            once: true,
            actions: ToggleActions::default(),
        }
    }

    /// Entrance reveal at `start` that reverses when scrolled back above it.
    #[must_use]
    pub fn replayable(start: TriggerPoint) -> Self {
        Self {
            once: false,
            actions: ToggleActions::REPLAYABLE,
            ..Self::reveal(start)
        }
    }

    /// Parallax range `"top bottom"` → `"bottom top"`, read via progress.
    #[must_use]
    pub fn scrub() -> Self {
        Self {
            start: TriggerPoint {
                element: Edge::Top,
                viewport: ViewportOffset::Fraction(1.0),
            },
            end: TriggerPoint::PASSED,
            once: false,
            actions: ToggleActions {
                on_enter: ToggleAction::None,
                ..ToggleActions::default()
            },
        }
    }
}

/// Element geometry in document coordinates (px).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementBounds {
    /// Distance from the document top to the element top.
    pub top: f32,
    /// Element height.
    pub height: f32,
}

/// Which boundary was crossed, and in which direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    /// Forward past the start.
    Enter,
    /// Forward past the end.
    Leave,
    /// Backward past the end.
    EnterBack,
    /// Backward past the start.
    LeaveBack,
}

/// A crossing reported by [`ScrollTriggers::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerEvent {
    /// Subscription that fired.
    pub subscription: SubscriptionId,
    /// Its element.
    pub element: ElementId,
    /// What happened.
    pub crossing: Crossing,
    /// Configured response.
    pub action: ToggleAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    Before,
    Active,
    After,
}

#[derive(Debug)]
struct Subscription {
    context: ContextId,
    element: ElementId,
    spec: TriggerSpec,
    zone: Zone,
    progress: f32,
}

/// Registry of live scroll triggers.
#[derive(Debug, Default)]
pub struct ScrollTriggers {
    subscriptions: FxHashMap<SubscriptionId, Subscription>,
    by_element: FxHashMap<ElementId, SubscriptionId>,
    next_context: u32,
    next_subscription: u64,
}

impl ScrollTriggers {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new scope for subscriptions.
    pub fn context(&mut self) -> ContextId {
        let id = ContextId(self.next_context);
        self.next_context += 1;
        id
    }

    /// Watch `element` with `spec` inside `context`.
    ///
    /// # Errors
    ///
    /// [`SiteError::DuplicateSubscription`] if `element` already has a live
    /// subscription.
    pub fn subscribe(
        &mut self,
        context: ContextId,
        element: ElementId,
        spec: TriggerSpec,
    ) -> Result<SubscriptionId, SiteError> {
        if self.by_element.contains_key(&element) {
            return Err(SiteError::DuplicateSubscription(element));
        }
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        let _ = self.by_element.insert(element, id);
        let _ = self.subscriptions.insert(
            id,
            Subscription {
                context,
                element,
                spec,
                zone: Zone::Before,
                progress: 0.0,
            },
        );
        Ok(id)
    }

    /// Release one subscription. Returns whether it was live.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        match self.subscriptions.remove(&id) {
            Some(sub) => {
                let _ = self.by_element.remove(&sub.element);
                true
            }
            None => false,
        }
    }

    /// Release everything registered in `context`; returns how many.
    pub fn revert(&mut self, context: ContextId) -> usize {
        let ids: Vec<SubscriptionId> = self
            .subscriptions
            .iter()
            .filter(|(_, sub)| sub.context == context)
            .map(|(id, _)| *id)
            .collect();
        for id in &ids {
            let _ = self.unsubscribe(*id);
        }
        if !ids.is_empty() {
            log::debug!("reverted {} scroll triggers", ids.len());
        }
        ids.len()
    }

    /// Live subscription count.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Whether `element` is currently watched.
    #[must_use]
    pub fn is_watching(&self, element: ElementId) -> bool {
        self.by_element.contains_key(&element)
    }

    /// Progress through the active range as of the last update, in [0, 1].
    #[must_use]
    pub fn progress(&self, id: SubscriptionId) -> Option<f32> {
        self.subscriptions.get(&id).map(|s| s.progress)
    }

    /// Re-evaluate every trigger at `scroll_y`.
    ///
    /// `bounds` maps an element to its current geometry; elements it cannot
    /// resolve are skipped. Events are ordered by subscription id, and a
    /// jump across the whole range reports both crossings.
    pub fn update<F>(
        &mut self,
        scroll_y: f32,
        viewport_height: f32,
        bounds: F,
    ) -> Vec<TriggerEvent>
    where
        F: Fn(ElementId) -> Option<ElementBounds>,
    {
        let mut ids: Vec<SubscriptionId> = self.subscriptions.keys().copied().collect();
        ids.sort_unstable();

        let mut events = Vec::new();
        let mut finished = Vec::new();
        for id in ids {
            let Some(sub) = self.subscriptions.get_mut(&id) else {
                continue;
            };
            let Some(rect) = bounds(sub.element) else {
                continue;
            };
            let start = sub.spec.start.scroll_position(rect, viewport_height);
            let end = sub
                .spec
                .end
                .scroll_position(rect, viewport_height)
                .max(start);
            sub.progress = scrub_progress(scroll_y, start, end);

            let zone = if scroll_y < start {
                Zone::Before
            } else if scroll_y < end || end <= start {
                Zone::Active
            } else {
                Zone::After
            };
            for &crossing in crossings(sub.zone, zone) {
                events.push(TriggerEvent {
                    subscription: id,
                    element: sub.element,
                    crossing,
                    action: sub.spec.actions.for_crossing(crossing),
                });
                if crossing == Crossing::Enter && sub.spec.once {
                    finished.push(id);
                }
            }
            sub.zone = zone;
        }
        for id in finished {
            let _ = self.unsubscribe(id);
        }
        events
    }
}

/// Linear position of `scroll_y` in `[start, end]`, clamped to [0, 1].
#[must_use]
pub fn scrub_progress(scroll_y: f32, start: f32, end: f32) -> f32 {
    if end <= start {
        return if scroll_y >= start { 1.0 } else { 0.0 };
    }
    ((scroll_y - start) / (end - start)).clamp(0.0, 1.0)
}

fn crossings(from: Zone, to: Zone) -> &'static [Crossing] {
    match (from, to) {
        (Zone::Before, Zone::Active) => &[Crossing::Enter],
        (Zone::Before, Zone::After) => &[Crossing::Enter, Crossing::Leave],
        (Zone::Active, Zone::After) => &[Crossing::Leave],
        (Zone::After, Zone::Active) => &[Crossing::EnterBack],
        (Zone::After, Zone::Before) => &[Crossing::EnterBack, Crossing::LeaveBack],
        (Zone::Active, Zone::Before) => &[Crossing::LeaveBack],
        _ => &[],
    }
}
