//! Headless walkthrough of the site interactions on a virtual frame clock.
//!
//! `aldees [preset.toml]` plays the preloader, every menu tab, the gallery
//! lightbox, the navigation overlay and a form submit, logging what a
//! renderer would see. `aldees --schema` prints the options JSON Schema.

use std::{
    io::{self, Write},
    path::Path,
    sync::Arc,
};

use aldees::{
    animation::TweenEngine,
    catalog::builtin_testimonials,
    contact::{ContactField, ContactForm},
    navigation::{default_links, NavOverlay},
    preloader::PreloaderSequence,
    section::{GallerySection, MenuSection, TestimonialSlider},
    selector::Phase,
    util::frame_timing::FrameTiming,
    viewport::{ElementBounds, ElementId, ScrollTriggers},
    Options, SiteError,
};
use web_time::{Duration, Instant};

/// Virtual frame clock: advances by one frame interval per step.
struct Clock {
    now: Instant,
    timing: FrameTiming,
}

impl Clock {
    fn new() -> Self {
        let now = Instant::now();
        Self {
            now,
            timing: FrameTiming::new(60, now),
        }
    }

    fn step(&mut self) -> Instant {
        self.now += self.timing.frame_interval();
        if self.timing.should_render(self.now) {
            let _ = self.timing.end_frame(self.now);
        }
        self.now
    }
}

fn run_preloader(
    out: &mut impl Write,
    options: &Options,
    clock: &mut Clock,
) -> io::Result<()> {
    if !options.preloader.enabled {
        return Ok(());
    }
    let mut preloader = PreloaderSequence::start(options.preloader.timings(), clock.now);
    let mut last_phase = None;
    while !preloader.tick(clock.now) {
        let phase = preloader.phase(clock.now);
        if phase != last_phase {
            writeln!(
                out,
                "preloader {:?} at {}",
                phase,
                preloader.percent_label(clock.now)
            )?;
            last_phase = phase;
        }
        let _ = clock.step();
    }
    writeln!(out, "preloader done, scroll unlocked")
}

fn run_menu(
    out: &mut impl Write,
    options: &Options,
    clock: &mut Clock,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Arc::new(options.catalog.load_menu()?);
    let mut menu = MenuSection::new(catalog, &options.menu, TweenEngine::new())?;
    let mut triggers = ScrollTriggers::new();
    menu.mount(&mut triggers, &[ElementId(1)])?;

    let fired = triggers.update(0.0, 800.0, |_| {
        Some(ElementBounds {
            top: 600.0,
            height: 120.0,
        })
    });
    writeln!(out, "menu header reveal: {} trigger(s)", fired.len())?;

    let keys: Vec<String> = menu
        .selector()
        .categories()
        .iter()
        .map(|c| c.key().to_owned())
        .collect();
    for key in keys.iter().skip(1) {
        let outcome = menu.select(key, clock.now)?;
        writeln!(out, "menu select `{key}`: {outcome:?}")?;
        // A second click mid-transition is dropped.
        let again = menu.select(&keys[0], clock.now)?;
        writeln!(out, "  click during transition: {again:?}")?;
        while menu.selector().phase() != Phase::Idle {
            for event in menu.tick(clock.step()) {
                writeln!(out, "  {event:?}")?;
            }
        }
        let layout = menu.layout();
        writeln!(
            out,
            "  {} cards in {} columns",
            layout.cards.len(),
            layout.columns
        )?;
    }
    menu.unmount(&mut triggers);
    Ok(())
}

fn run_gallery(
    out: &mut impl Write,
    options: &Options,
    clock: &mut Clock,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Arc::new(options.catalog.load_gallery()?);
    let mut gallery = GallerySection::new(catalog, &options.gallery, TweenEngine::new())?;
    gallery.open_lightbox(0)?;
    for key in ["ArrowLeft", "ArrowRight", "ArrowRight", "Escape"] {
        let Some(action) = options.keybindings.lookup(key) else {
            continue;
        };
        let used = gallery.handle_key(action);
        writeln!(
            out,
            "lightbox {key} -> {action:?} (used: {used}) {}",
            gallery
                .lightbox()
                .position_label()
                .unwrap_or_else(|| "closed".to_owned())
        )?;
    }
    let _ = gallery.select("food", clock.now)?;
    while gallery.selector().phase() != Phase::Idle {
        let _ = gallery.tick(clock.step());
    }
    writeln!(out, "gallery now on `{}`", gallery.selector().current_key())?;

    let mut slider = TestimonialSlider::new(builtin_testimonials()?)?;
    let _ = slider.previous();
    if let Some(t) = slider.current() {
        writeln!(out, "testimonial {} of {}: {}", slider.active_index() + 1, slider.len(), t.name)?;
    }
    Ok(())
}

fn run_navigation_and_form(
    out: &mut impl Write,
    options: &Options,
    clock: &mut Clock,
) -> io::Result<()> {
    let mut nav = NavOverlay::new(options.navigation.timings(), default_links());
    if let Some(action) = options.keybindings.lookup("KeyM") {
        let _ = nav.handle_key(action, clock.now);
    }
    let open_by = clock.now + nav.open_duration();
    while clock.now < open_by {
        if let Some(state) = nav.tick(clock.step()) {
            writeln!(out, "navigation {state:?}")?;
        }
    }
    match options.keybindings.lookup("Escape") {
        Some(action) if nav.handle_key(action, clock.now) => {}
        _ => nav.close(clock.now),
    }
    for _ in 0..60 {
        if let Some(state) = nav.tick(clock.step()) {
            writeln!(out, "navigation {state:?}")?;
        }
    }
    let _ = nav.set_scroll(120.0);
    writeln!(out, "header scrolled: {}", nav.is_scrolled())?;

    let mut form = ContactForm::new(options.contact.submit_delay());
    if let Err(e) = form.submit(clock.now) {
        writeln!(out, "form: {e}")?;
    }
    form.set(ContactField::Name, "Guest");
    form.set(ContactField::Email, "guest@example.com");
    if let Ok(outcome) = form.submit(clock.now) {
        writeln!(out, "form: {outcome:?}, button `{}`", form.button_label())?;
    }
    let done_by = clock.now + options.contact.submit_delay() + Duration::from_millis(20);
    while clock.now < done_by {
        if form.tick(clock.step()) {
            writeln!(out, "form: sent, button `{}`", form.button_label())?;
        }
    }
    Ok(())
}

fn load_options(arg: Option<&str>) -> Result<Options, SiteError> {
    match arg {
        Some(path) => Options::load(Path::new(path)),
        None => Options::builtin(),
    }
}

fn main() {
    env_logger::init();

    let arg = std::env::args().nth(1);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if arg.as_deref() == Some("--schema") {
        match serde_json::to_string_pretty(&Options::json_schema()) {
            Ok(schema) => {
                if let Err(e) = writeln!(out, "{schema}") {
                    log::error!("{e}");
                }
            }
            Err(e) => log::error!("schema serialization failed: {e}"),
        }
        return;
    }

    let options = match load_options(arg.as_deref()) {
        Ok(options) => options,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let mut clock = Clock::new();
    let result = run_preloader(&mut out, &options, &mut clock)
        .map_err(Into::into)
        .and_then(|()| run_menu(&mut out, &options, &mut clock))
        .and_then(|()| run_gallery(&mut out, &options, &mut clock))
        .and_then(|()| {
            run_navigation_and_form(&mut out, &options, &mut clock).map_err(Into::into)
        });
    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
    log::info!("walkthrough finished at {:.0} fps", clock.timing.fps());
}
