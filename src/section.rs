//! Page sections composed from the selector, grid, carousel and triggers.
//!
//! Each section owns its interaction state and hands the renderer
//! ready-to-draw [`CardView`]s. Scroll reveals registered through
//! [`MenuSection::mount`] / [`GallerySection::mount`] are released again
//! by the matching `unmount`.

use std::sync::Arc;

use web_time::Instant;

use crate::animation::{AnimationRuntime, TransitionSequencer, VisualState};
use crate::carousel::Carousel;
use crate::catalog::{Catalog, Item, Testimonial};
use crate::error::SiteError;
use crate::grid::{self, CardPlacement, GridLayout, GridStyle};
use crate::input::KeyAction;
use crate::options::{GalleryOptions, MenuOptions};
use crate::selector::{CategorySelector, SelectorEvent, SwitchOutcome};
use crate::viewport::{ContextId, ElementId, ScrollTriggers, TriggerPoint, TriggerSpec};

/// One card as the renderer should draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView<'a> {
    /// Stable element key; changes when the category does.
    pub key: String,
    /// Content.
    pub item: &'a Item,
    /// Grid cell.
    pub placement: CardPlacement,
    /// Animated transform/opacity.
    pub visual: VisualState,
}

/// Scroll-reveal subscriptions owned by one mounted section.
#[derive(Debug, Default)]
struct RevealScope {
    context: Option<ContextId>,
}

impl RevealScope {
    fn mount(
        &mut self,
        triggers: &mut ScrollTriggers,
        elements: &[ElementId],
    ) -> Result<(), SiteError> {
        self.unmount(triggers);
        let context = triggers.context();
        self.context = Some(context);
        for &element in elements {
            if let Err(e) = triggers.subscribe(
                context,
                element,
                TriggerSpec::reveal(TriggerPoint::ENTRANCE),
            ) {
                self.unmount(triggers);
                return Err(e);
            }
        }
        Ok(())
    }

    fn unmount(&mut self, triggers: &mut ScrollTriggers) {
        if let Some(context) = self.context.take() {
            let _ = triggers.revert(context);
        }
    }
}

fn card_views<'a, R: AnimationRuntime>(
    selector: &'a CategorySelector<R>,
    style: GridStyle,
    viewport_width: u32,
    now: Instant,
) -> Vec<CardView<'a>> {
    let items = selector.rendered_items();
    let category = selector.current_key();
    grid::layout(items, style, viewport_width)
        .cards
        .into_iter()
        .zip(items)
        .map(|(placement, item)| CardView {
            key: grid::card_key(category, item),
            item,
            placement,
            visual: selector.item_visual(placement.index, now),
        })
        .collect()
}

/// The menu: category tabs over a card grid.
#[derive(Debug)]
pub struct MenuSection<R: AnimationRuntime> {
    selector: CategorySelector<R>,
    viewport_width: u32,
    dropdown_open: bool,
    reveals: RevealScope,
}

impl<R: AnimationRuntime> MenuSection<R> {
    /// Build the section over `catalog`.
    ///
    /// # Errors
    ///
    /// [`SiteError::UnknownCategory`] if the configured default category is
    /// not in the catalog.
    pub fn new(
        catalog: Arc<Catalog>,
        options: &MenuOptions,
        runtime: R,
    ) -> Result<Self, SiteError> {
        let sequencer = TransitionSequencer::new(
            runtime,
            options.exit.to_treatment(),
            options.enter.to_treatment(),
        );
        Ok(Self {
            selector: CategorySelector::new(catalog, &options.default_category, sequencer)?,
            viewport_width: grid::BREAKPOINT_XL,
            dropdown_open: false,
            reveals: RevealScope::default(),
        })
    }

    /// The tab state machine.
    #[must_use]
    pub fn selector(&self) -> &CategorySelector<R> {
        &self.selector
    }

    /// Tab or dropdown entry click. A switch that starts closes the
    /// dropdown; an ignored one leaves it as it was.
    ///
    /// # Errors
    ///
    /// [`SiteError::UnknownCategory`] for a key not in the catalog.
    pub fn select(&mut self, key: &str, now: Instant) -> Result<SwitchOutcome, SiteError> {
        let outcome = self.selector.request_switch(key, now)?;
        if outcome == SwitchOutcome::Started {
            self.dropdown_open = false;
        }
        Ok(outcome)
    }

    /// Whether the category picker is drawn as a dropdown instead of tabs.
    #[must_use]
    pub fn uses_dropdown(&self) -> bool {
        self.viewport_width < grid::BREAKPOINT_LG
    }

    /// Whether the dropdown list is showing.
    #[must_use]
    pub fn is_dropdown_open(&self) -> bool {
        self.dropdown_open
    }

    /// Dropdown button click.
    pub fn toggle_dropdown(&mut self) {
        self.dropdown_open = !self.dropdown_open;
    }

    /// Click outside the dropdown.
    pub fn dismiss_dropdown(&mut self) {
        self.dropdown_open = false;
    }

    /// Per-frame update.
    pub fn tick(&mut self, now: Instant) -> Vec<SelectorEvent> {
        self.selector.tick(now)
    }

    /// Record the viewport width used for the grid. Growing past the
    /// dropdown breakpoint closes the dropdown.
    pub fn set_viewport_width(&mut self, width: u32) {
        self.viewport_width = width;
        if !self.uses_dropdown() {
            self.dropdown_open = false;
        }
    }

    /// Grid for the rendered items.
    #[must_use]
    pub fn layout(&self) -> GridLayout {
        grid::layout(self.selector.rendered_items(), GridStyle::Menu, self.viewport_width)
    }

    /// Cards to draw at `now`.
    #[must_use]
    pub fn cards(&self, now: Instant) -> Vec<CardView<'_>> {
        card_views(&self.selector, GridStyle::Menu, self.viewport_width, now)
    }

    /// Register entrance reveals for the section's static elements.
    ///
    /// # Errors
    ///
    /// [`SiteError::DuplicateSubscription`] if an element is already
    /// watched; nothing stays registered in that case.
    pub fn mount(
        &mut self,
        triggers: &mut ScrollTriggers,
        elements: &[ElementId],
    ) -> Result<(), SiteError> {
        self.reveals.mount(triggers, elements)
    }

    /// Release reveals and cancel any running transition.
    pub fn unmount(&mut self, triggers: &mut ScrollTriggers) {
        self.reveals.unmount(triggers);
        self.selector.unmount();
    }
}

/// The gallery: photo tabs, feature grid and a lightbox.
#[derive(Debug)]
pub struct GallerySection<R: AnimationRuntime> {
    selector: CategorySelector<R>,
    lightbox: Carousel<Item>,
    viewport_width: u32,
    reveals: RevealScope,
}

impl<R: AnimationRuntime> GallerySection<R> {
    /// Build the section over `catalog`.
    ///
    /// # Errors
    ///
    /// [`SiteError::UnknownCategory`] if the configured default tab is not
    /// in the catalog.
    pub fn new(
        catalog: Arc<Catalog>,
        options: &GalleryOptions,
        runtime: R,
    ) -> Result<Self, SiteError> {
        let sequencer = TransitionSequencer::new(
            runtime,
            options.exit.to_treatment(),
            options.enter.to_treatment(),
        );
        Ok(Self {
            selector: CategorySelector::new(catalog, &options.default_category, sequencer)?,
            lightbox: Carousel::new(),
            viewport_width: grid::BREAKPOINT_XL,
            reveals: RevealScope::default(),
        })
    }

    /// The tab state machine.
    #[must_use]
    pub fn selector(&self) -> &CategorySelector<R> {
        &self.selector
    }

    /// The lightbox.
    #[must_use]
    pub fn lightbox(&self) -> &Carousel<Item> {
        &self.lightbox
    }

    /// Tab click.
    ///
    /// # Errors
    ///
    /// [`SiteError::UnknownCategory`] for a key not in the catalog.
    pub fn select(&mut self, key: &str, now: Instant) -> Result<SwitchOutcome, SiteError> {
        self.selector.request_switch(key, now)
    }

    /// Per-frame update.
    pub fn tick(&mut self, now: Instant) -> Vec<SelectorEvent> {
        self.selector.tick(now)
    }

    /// Record the viewport width used for the grid.
    pub fn set_viewport_width(&mut self, width: u32) {
        self.viewport_width = width;
    }

    /// Grid for the rendered photos.
    #[must_use]
    pub fn layout(&self) -> GridLayout {
        grid::layout(
            self.selector.rendered_items(),
            GridStyle::Gallery,
            self.viewport_width,
        )
    }

    /// Tiles to draw at `now`.
    #[must_use]
    pub fn cards(&self, now: Instant) -> Vec<CardView<'_>> {
        card_views(&self.selector, GridStyle::Gallery, self.viewport_width, now)
    }

    /// Open the lightbox on tile `index` of the rendered tab.
    ///
    /// The lightbox keeps browsing that tab's photos even if the tab
    /// changes while it is open.
    ///
    /// # Errors
    ///
    /// [`SiteError::EmptyCollection`] for an empty tab,
    /// [`SiteError::IndexOutOfRange`] for a bad index.
    pub fn open_lightbox(&mut self, index: usize) -> Result<(), SiteError> {
        let items = self.selector.current_category().shared_items();
        self.lightbox.open(items, index)
    }

    /// Close the lightbox.
    pub fn close_lightbox(&mut self) {
        self.lightbox.close();
    }

    /// Apply a bound key. Returns whether the section used it.
    pub fn handle_key(&mut self, action: KeyAction) -> bool {
        if !self.lightbox.is_open() {
            return false;
        }
        match action {
            KeyAction::LightboxNext => self.lightbox.next().is_some(),
            KeyAction::LightboxPrevious => self.lightbox.previous().is_some(),
            KeyAction::LightboxClose => {
                self.lightbox.close();
                true
            }
            KeyAction::ToggleNavigation => false,
        }
    }

    /// Register entrance reveals for the section's static elements.
    ///
    /// # Errors
    ///
    /// [`SiteError::DuplicateSubscription`] if an element is already
    /// watched; nothing stays registered in that case.
    pub fn mount(
        &mut self,
        triggers: &mut ScrollTriggers,
        elements: &[ElementId],
    ) -> Result<(), SiteError> {
        self.reveals.mount(triggers, elements)
    }

    /// Release reveals, close the lightbox and cancel any transition.
    pub fn unmount(&mut self, triggers: &mut ScrollTriggers) {
        self.reveals.unmount(triggers);
        self.lightbox.close();
        self.selector.unmount();
    }
}

/// Guest quotes with arrow and dot navigation.
#[derive(Debug, Clone)]
pub struct TestimonialSlider {
    carousel: Carousel<Testimonial>,
}

impl TestimonialSlider {
    /// Slider showing the first of `testimonials`.
    ///
    /// # Errors
    ///
    /// [`SiteError::EmptyCollection`] when there is nothing to show.
    pub fn new(testimonials: Vec<Testimonial>) -> Result<Self, SiteError> {
        let mut carousel = Carousel::new();
        carousel.open(testimonials.into(), 0)?;
        Ok(Self { carousel })
    }

    /// The quote on screen.
    #[must_use]
    pub fn current(&self) -> Option<&Testimonial> {
        self.carousel.current()
    }

    /// Position of the quote on screen.
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.carousel.index().unwrap_or(0)
    }

    /// Number of quotes (one dot each).
    #[must_use]
    pub fn len(&self) -> usize {
        self.carousel.len()
    }

    /// Always false; construction rejects an empty list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.carousel.is_empty()
    }

    /// Right arrow.
    pub fn next(&mut self) -> usize {
        self.carousel.next().unwrap_or(0)
    }

    /// Left arrow.
    pub fn previous(&mut self) -> usize {
        self.carousel.previous().unwrap_or(0)
    }

    /// Dot click.
    ///
    /// # Errors
    ///
    /// [`SiteError::IndexOutOfRange`] past the last quote.
    pub fn select(&mut self, index: usize) -> Result<(), SiteError> {
        self.carousel.select(index)
    }
}

#[cfg(test)]
mod tests {
    use web_time::Duration;

    use super::*;
    use crate::animation::{Treatment, TweenEngine};
    use crate::catalog::builtin_testimonials;
    use crate::selector::{IgnoreReason, Phase};

    fn gallery() -> GallerySection<TweenEngine> {
        let catalog = Arc::new(Catalog::builtin_gallery().unwrap());
        GallerySection::new(catalog, &GalleryOptions::default(), TweenEngine::new()).unwrap()
    }

    fn menu() -> MenuSection<TweenEngine> {
        let catalog = Arc::new(Catalog::builtin_menu().unwrap());
        MenuSection::new(catalog, &MenuOptions::default(), TweenEngine::new()).unwrap()
    }

    #[test]
    fn test_menu_cards_follow_switch() {
        let mut section = menu();
        let t0 = Instant::now();
        section.set_viewport_width(1024);
        assert!(section.cards(t0).iter().all(|c| c.key.starts_with("starters-")));
        assert_eq!(section.layout().columns, 3);

        let _ = section.select("burgers", t0).unwrap();
        let mut now = t0;
        while section.selector().phase() != Phase::Idle {
            now += Duration::from_millis(16);
            let _ = section.tick(now);
        }
        let cards = section.cards(now);
        assert!(!cards.is_empty());
        assert!(cards.iter().all(|c| c.key.starts_with("burgers-")));
        assert!(cards.iter().all(|c| c.visual == VisualState::REST));
    }

    #[test]
    fn test_menu_cards_hidden_while_entering() {
        let mut section = menu();
        let t0 = Instant::now();
        let exit = Treatment::menu_exit().total_duration(section.selector().rendered_items().len());
        let _ = section.select("mains", t0).unwrap();
        let _ = section.tick(t0 + exit);
        let cards = section.cards(t0 + exit);
        assert_eq!(cards[1].visual, Treatment::menu_enter().from);
    }

    #[test]
    fn test_dropdown_closes_when_switch_starts() {
        let mut section = menu();
        let t0 = Instant::now();
        section.set_viewport_width(390);
        assert!(section.uses_dropdown());
        assert!(!section.is_dropdown_open());

        section.toggle_dropdown();
        assert!(section.is_dropdown_open());
        // Picking the current category is ignored and keeps the list open.
        assert_eq!(
            section.select("starters", t0).unwrap(),
            SwitchOutcome::Ignored(IgnoreReason::AlreadyCurrent)
        );
        assert!(section.is_dropdown_open());

        assert_eq!(section.select("mains", t0).unwrap(), SwitchOutcome::Started);
        assert!(!section.is_dropdown_open());

        // Mid-transition picks are dropped without touching the list.
        section.toggle_dropdown();
        assert_eq!(
            section.select("burgers", t0).unwrap(),
            SwitchOutcome::Ignored(IgnoreReason::InProgress)
        );
        assert!(section.is_dropdown_open());
    }

    #[test]
    fn test_dropdown_dismiss_and_breakpoint() {
        let mut section = menu();
        section.set_viewport_width(800);
        section.toggle_dropdown();
        section.toggle_dropdown();
        assert!(!section.is_dropdown_open());

        section.toggle_dropdown();
        section.dismiss_dropdown();
        assert!(!section.is_dropdown_open());

        section.toggle_dropdown();
        section.set_viewport_width(grid::BREAKPOINT_LG);
        assert!(!section.uses_dropdown());
        assert!(!section.is_dropdown_open());
    }

    #[test]
    fn test_unknown_default_category() {
        let catalog = Arc::new(Catalog::builtin_menu().unwrap());
        let options = MenuOptions {
            default_category: "brunch".to_owned(),
            ..MenuOptions::default()
        };
        assert!(matches!(
            MenuSection::new(catalog, &options, TweenEngine::new()),
            Err(SiteError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_lightbox_scenario_b() {
        let mut section = gallery();
        section.open_lightbox(5).unwrap();
        assert_eq!(section.lightbox().position_label().as_deref(), Some("6 / 6"));

        assert!(section.handle_key(KeyAction::LightboxNext));
        assert_eq!(section.lightbox().index(), Some(0));
        assert!(section.handle_key(KeyAction::LightboxPrevious));
        assert_eq!(section.lightbox().index(), Some(5));
        assert!(section.handle_key(KeyAction::LightboxClose));
        assert!(!section.lightbox().is_open());
        assert!(!section.handle_key(KeyAction::LightboxNext));
    }

    #[test]
    fn test_lightbox_bad_index_stays_closed() {
        let mut section = gallery();
        assert!(matches!(
            section.open_lightbox(6),
            Err(SiteError::IndexOutOfRange { index: 6, len: 6 })
        ));
        assert!(!section.lightbox().is_open());
    }

    #[test]
    fn test_lightbox_keeps_snapshot_across_tab_switch() {
        let mut section = gallery();
        let t0 = Instant::now();
        section.open_lightbox(0).unwrap();
        let _ = section.select("food", t0).unwrap();
        let _ = section.tick(t0 + Duration::from_secs(5));
        let _ = section.tick(t0 + Duration::from_secs(10));
        assert_eq!(section.selector().current_key(), "food");
        assert_eq!(section.lightbox().len(), 6);
        assert_eq!(section.lightbox().current().map(|i| i.id), Some(1));
    }

    #[test]
    fn test_gallery_feature_tiles() {
        let mut section = gallery();
        section.set_viewport_width(1280);
        let cards = section.cards(Instant::now());
        assert_eq!(cards[0].placement.col_span, 2);
        assert_eq!(cards[5].placement.row_span, 2);
        assert_eq!(cards[1].placement.col_span, 1);
    }

    #[test]
    fn test_mount_unmount_releases_triggers() {
        let mut triggers = ScrollTriggers::new();
        let mut section = gallery();
        section
            .mount(&mut triggers, &[ElementId(1), ElementId(2)])
            .unwrap();
        assert_eq!(triggers.live_count(), 2);

        let t0 = Instant::now();
        let _ = section.select("food", t0).unwrap();
        section.unmount(&mut triggers);
        assert_eq!(triggers.live_count(), 0);
        assert_eq!(section.selector().phase(), Phase::Idle);
    }

    #[test]
    fn test_failed_mount_leaves_nothing_registered() {
        let mut triggers = ScrollTriggers::new();
        let other = triggers.context();
        let _ = triggers
            .subscribe(other, ElementId(2), TriggerSpec::scrub())
            .unwrap();

        let mut section = menu();
        let result = section.mount(&mut triggers, &[ElementId(1), ElementId(2)]);
        assert!(matches!(result, Err(SiteError::DuplicateSubscription(_))));
        assert_eq!(triggers.live_count(), 1);
        assert!(!triggers.is_watching(ElementId(1)));
    }

    #[test]
    fn test_testimonial_slider_wraps() {
        let mut slider = TestimonialSlider::new(builtin_testimonials().unwrap()).unwrap();
        assert_eq!(slider.len(), 4);
        assert_eq!(slider.previous(), 3);
        assert_eq!(slider.next(), 0);
        slider.select(2).unwrap();
        assert_eq!(slider.active_index(), 2);
        assert!(slider.select(4).is_err());
        assert!(matches!(
            TestimonialSlider::new(Vec::new()),
            Err(SiteError::EmptyCollection)
        ));
    }
}
