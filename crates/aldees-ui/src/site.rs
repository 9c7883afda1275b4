//! Page-wide state: every interaction model the page renders, driven by
//! one frame clock.

use std::sync::Arc;

use aldees::{
    animation::TweenEngine,
    catalog::builtin_testimonials,
    contact::ContactForm,
    navigation::{default_links, NavOverlay},
    preloader::PreloaderSequence,
    section::{GallerySection, MenuSection, TestimonialSlider},
    viewport::{ElementBounds, ElementId, ScrollTriggers, ToggleAction, TriggerPoint, TriggerSpec},
    Options, SiteError,
};
use rustc_hash::FxHashSet;
use web_time::Instant;

use crate::bridge;

/// Scroll-revealed section headers.
pub const MENU_HEADER: ElementId = ElementId(1);
pub const GALLERY_HEADER: ElementId = ElementId(2);
pub const TESTIMONIALS_HEADER: ElementId = ElementId(3);
pub const CONTACT_HEADER: ElementId = ElementId(4);

pub struct Site {
    pub options: Options,
    pub now: Instant,
    pub preloader: Option<PreloaderSequence>,
    pub nav: NavOverlay,
    pub menu: MenuSection<TweenEngine>,
    pub gallery: GallerySection<TweenEngine>,
    pub testimonials: TestimonialSlider,
    pub form: ContactForm,
    triggers: ScrollTriggers,
    revealed: FxHashSet<ElementId>,
    scroll_locked: bool,
}

impl Site {
    pub fn load(now: Instant) -> Result<Self, SiteError> {
        let options = Options::builtin()?;
        let menu_catalog = Arc::new(options.catalog.load_menu()?);
        let gallery_catalog = Arc::new(options.catalog.load_gallery()?);

        let mut triggers = ScrollTriggers::new();
        let mut menu = MenuSection::new(menu_catalog, &options.menu, TweenEngine::new())?;
        menu.mount(&mut triggers, &[MENU_HEADER])?;
        let mut gallery =
            GallerySection::new(gallery_catalog, &options.gallery, TweenEngine::new())?;
        gallery.mount(&mut triggers, &[GALLERY_HEADER])?;
        let page = triggers.context();
        for element in [TESTIMONIALS_HEADER, CONTACT_HEADER] {
            let _ = triggers.subscribe(page, element, TriggerSpec::reveal(TriggerPoint::ENTRANCE))?;
        }

        let preloader = options
            .preloader
            .enabled
            .then(|| PreloaderSequence::start(options.preloader.timings(), now));
        Ok(Self {
            nav: NavOverlay::new(options.navigation.timings(), default_links()),
            testimonials: TestimonialSlider::new(builtin_testimonials()?)?,
            form: ContactForm::new(options.contact.submit_delay()),
            options,
            now,
            preloader,
            menu,
            gallery,
            triggers,
            revealed: FxHashSet::default(),
            scroll_locked: false,
        })
    }

    /// Advance every model to `now`.
    pub fn frame(&mut self, now: Instant) {
        self.now = now;
        if let Some(preloader) = &mut self.preloader {
            if preloader.tick(now) {
                self.preloader = None;
                self.on_scroll();
            }
        }
        let _ = self.nav.tick(now);
        for event in self.menu.tick(now) {
            log::debug!("menu: {event:?}");
        }
        for event in self.gallery.tick(now) {
            log::debug!("gallery: {event:?}");
        }
        let _ = self.form.tick(now);
        self.sync_scroll_lock();
    }

    pub fn on_key(&mut self, code: &str) {
        let Some(action) = self.options.keybindings.lookup(code) else {
            return;
        };
        if self.gallery.handle_key(action) {
            return;
        }
        let _ = self.nav.handle_key(action, self.now);
    }

    pub fn on_scroll(&mut self) {
        let (_, viewport_height) = bridge::viewport_size();
        self.scroll_to(bridge::scroll_y(), viewport_height, bridge::element_bounds);
    }

    fn scroll_to<F>(&mut self, scroll_y: f32, viewport_height: f32, bounds: F)
    where
        F: Fn(ElementId) -> Option<ElementBounds>,
    {
        let _ = self.nav.set_scroll(scroll_y);
        for event in self.triggers.update(scroll_y, viewport_height, bounds) {
            match event.action {
                ToggleAction::Play | ToggleAction::Complete | ToggleAction::Restart => {
                    let _ = self.revealed.insert(event.element);
                }
                ToggleAction::Reverse | ToggleAction::Reset => {
                    let _ = self.revealed.remove(&event.element);
                }
                ToggleAction::None => {}
            }
        }
    }

    pub fn on_resize(&mut self) {
        let (width, _) = bridge::viewport_size();
        self.menu.set_viewport_width(width);
        self.gallery.set_viewport_width(width);
        self.on_scroll();
    }

    pub fn is_revealed(&self, element: ElementId) -> bool {
        self.revealed.contains(&element)
    }

    pub fn select_menu(&mut self, key: &str) {
        if let Err(e) = self.menu.select(key, self.now) {
            log::error!("{e}");
        }
    }

    pub fn select_gallery(&mut self, key: &str) {
        if let Err(e) = self.gallery.select(key, self.now) {
            log::error!("{e}");
        }
    }

    pub fn open_lightbox(&mut self, index: usize) {
        if let Err(e) = self.gallery.open_lightbox(index) {
            log::warn!("lightbox: {e}");
        }
    }

    pub fn submit_form(&mut self) {
        if let Err(e) = self.form.submit(self.now) {
            log::info!("form not sent: {e}");
        }
    }

    fn sync_scroll_lock(&mut self) {
        let locked = self.preloader.is_some() || self.nav.scroll_locked();
        if locked != self.scroll_locked {
            self.scroll_locked = locked;
            bridge::set_scroll_locked(locked);
        }
    }
}
