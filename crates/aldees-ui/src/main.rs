//! Dioxus web front end for the ALDEE'S site.
//!
//! Compiled to WASM. All interaction state lives in the `aldees` core; this
//! crate only forwards DOM events into it and renders what it reports.

// `rsx!` and `#[component]` expand to fully qualified paths.
#![allow(unused_qualifications)]

mod bridge;
mod components;
mod site;

use dioxus::prelude::*;
use web_time::Instant;

use crate::components::{ContactView, GalleryView, MenuView, Navigation, Preloader, Testimonials};
use crate::site::Site;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("logger init failed: {e}").into());
    }
    dioxus::launch(app);
}

fn app() -> Element {
    let site = use_hook(|| Site::load(Instant::now()).map(Signal::new).map_err(|e| e.to_string()));

    match site {
        Ok(site) => rsx! { Page { site } },
        Err(e) => {
            log::error!("site failed to load: {e}");
            rsx! {
                div { class: "load-error", "Something went wrong loading the page." }
            }
        }
    }
}

#[component]
fn Page(mut site: Signal<Site>) -> Element {
    // Register DOM listeners and the frame loop once on mount.
    let _ = use_effect(move || {
        bridge::listen_keys(move |code| site.write().on_key(code));
        bridge::listen("scroll", move |_| site.write().on_scroll());
        bridge::listen("resize", move |_| site.write().on_resize());
        site.write().on_resize();
        bridge::start_frame_loop(move || site.write().frame(Instant::now()));
    });

    rsx! {
        Preloader { site }
        Navigation { site }
        main {
            MenuView { site }
            GalleryView { site }
            Testimonials { site }
            ContactView { site }
        }
    }
}
