//! Page sections as Dioxus components.
//!
//! Every component reads the shared [`Site`] signal, so all of them follow
//! the frame loop. Per-card styles come straight from the core models.

use aldees::{
    contact::{guest_label, ContactField, GUEST_OPTIONS},
    input::KeyAction,
    preloader::PreloaderPart,
    section::CardView,
    viewport::ElementId,
};
use dioxus::prelude::*;

use crate::bridge;
use crate::site::{Site, CONTACT_HEADER, GALLERY_HEADER, MENU_HEADER, TESTIMONIALS_HEADER};

struct Card {
    key: String,
    index: usize,
    name: String,
    description: String,
    price: String,
    image: String,
    style: String,
}

fn cards_of(views: Vec<CardView<'_>>) -> Vec<Card> {
    views
        .into_iter()
        .map(|view| Card {
            style: format!(
                "{} {} {}",
                view.placement.grid_area_css(),
                view.placement.aspect.to_css(),
                view.visual.to_css()
            ),
            key: view.key,
            index: view.placement.index,
            name: view.item.name.clone(),
            description: view.item.description.clone(),
            price: view.item.price.clone(),
            image: view.item.image.clone(),
        })
        .collect()
}

fn reveal_class(site: &Site, element: ElementId) -> &'static str {
    if site.is_revealed(element) {
        "reveal revealed"
    } else {
        "reveal"
    }
}

/// Category tabs shared by the menu and the gallery.
struct Tab {
    key: String,
    label: String,
    active: bool,
}

#[component]
pub fn Preloader(site: Signal<Site>) -> Element {
    let s = site.read();
    let Some(pre) = &s.preloader else {
        return rsx! {};
    };
    let now = s.now;
    let logo = pre.part_visual(PreloaderPart::Logo, now).to_css();
    let text = pre.part_visual(PreloaderPart::Text, now).to_css();
    let bar = pre.part_visual(PreloaderPart::Progress, now).to_css();
    let fill = pre.bar_scale(now);
    let offset = pre.curtain_offset(now);
    let label = pre.percent_label(now);

    rsx! {
        div { class: "preloader", style: "transform: translateY({offset}%);",
            div { class: "preloader-logo", style: "{logo}", "A" }
            div { class: "preloader-text", style: "{text}", "ALDEE'S" }
            div { class: "preloader-progress", style: "{bar}",
                div { class: "preloader-bar", style: "transform: scaleX({fill});" }
                span { class: "preloader-percent", "{label}" }
            }
        }
    }
}

#[component]
pub fn Navigation(mut site: Signal<Site>) -> Element {
    let s = site.read();
    let now = s.now;
    let header_class = if s.nav.is_scrolled() { "header scrolled" } else { "header" };
    let clip = s.nav.clip_path_css(now);
    let open = s.nav.is_open();
    let links: Vec<(String, String, String)> = s
        .nav
        .links()
        .iter()
        .enumerate()
        .map(|(i, link)| {
            (
                link.href.clone(),
                link.label.clone(),
                s.nav.link_visual(i, now).to_css(),
            )
        })
        .collect();

    rsx! {
        header { class: "{header_class}",
            a { class: "brand", href: "/", "ALDEE'S" }
            button {
                class: if open { "menu-toggle open" } else { "menu-toggle" },
                onclick: move |_| {
                    let mut s = site.write();
                    let now = s.now;
                    s.nav.toggle(now);
                },
                "Menu"
            }
        }
        nav { class: "nav-overlay", style: "{clip}",
            for (href, label, style) in links {
                a { key: "{href}", href: "{href}", style: "{style}",
                    onclick: move |_| {
                        let mut s = site.write();
                        let now = s.now;
                        s.nav.close(now);
                    },
                    "{label}"
                }
            }
        }
    }
}

#[component]
pub fn MenuView(mut site: Signal<Site>) -> Element {
    let s = site.read();
    let selector = s.menu.selector();
    let tabs: Vec<Tab> = selector
        .categories()
        .iter()
        .map(|c| Tab {
            key: c.key().to_owned(),
            label: format!("{} {}", c.icon(), c.display_name()),
            active: c.key() == selector.current_key(),
        })
        .collect();
    let busy = !selector.can_switch();
    let current = tabs
        .iter()
        .find(|t| t.active)
        .map(|t| t.label.clone())
        .unwrap_or_default();
    let dropdown = s.menu.uses_dropdown();
    let dropdown_open = s.menu.is_dropdown_open();
    let grid_css = s.menu.layout().container_css();
    let cards = cards_of(s.menu.cards(s.now));
    let header = reveal_class(&s, MENU_HEADER);
    let header_id = bridge::reveal_dom_id(MENU_HEADER);

    rsx! {
        section { id: "menu", class: "menu",
            h2 { id: "{header_id}", class: "{header}", "Our Menu" }
            if dropdown {
                div { class: "category-dropdown",
                    if dropdown_open {
                        div {
                            class: "dropdown-backdrop",
                            onclick: move |_| site.write().menu.dismiss_dropdown(),
                        }
                    }
                    button {
                        class: if dropdown_open { "dropdown-toggle open" } else { "dropdown-toggle" },
                        onclick: move |_| site.write().menu.toggle_dropdown(),
                        "{current}"
                    }
                    if dropdown_open {
                        div { class: "dropdown-list",
                            for tab in tabs {
                                button {
                                    key: "{tab.key}",
                                    class: if tab.active { "dropdown-item active" } else { "dropdown-item" },
                                    disabled: busy,
                                    onclick: move |_| site.write().select_menu(&tab.key),
                                    "{tab.label}"
                                }
                            }
                        }
                    }
                }
            } else {
                div { class: "tabs",
                    for tab in tabs {
                        button {
                            key: "{tab.key}",
                            class: if tab.active { "tab active" } else { "tab" },
                            disabled: busy,
                            onclick: move |_| site.write().select_menu(&tab.key),
                            "{tab.label}"
                        }
                    }
                }
            }
            div { class: "menu-grid", style: "{grid_css}",
                for card in cards {
                    article { key: "{card.key}", class: "menu-card", style: "{card.style}",
                        img { src: "{card.image}", alt: "{card.name}" }
                        h3 { "{card.name}" }
                        p { "{card.description}" }
                        span { class: "price", "{card.price}" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn GalleryView(mut site: Signal<Site>) -> Element {
    let s = site.read();
    let selector = s.gallery.selector();
    let tabs: Vec<Tab> = selector
        .categories()
        .iter()
        .map(|c| Tab {
            key: c.key().to_owned(),
            label: c.display_name().to_owned(),
            active: c.key() == selector.current_key(),
        })
        .collect();
    let busy = !selector.can_switch();
    let grid_css = s.gallery.layout().container_css();
    let tiles = cards_of(s.gallery.cards(s.now));
    let header = reveal_class(&s, GALLERY_HEADER);
    let header_id = bridge::reveal_dom_id(GALLERY_HEADER);

    rsx! {
        section { id: "gallery", class: "gallery",
            h2 { id: "{header_id}", class: "{header}", "Gallery" }
            div { class: "tabs",
                for tab in tabs {
                    button {
                        key: "{tab.key}",
                        class: if tab.active { "tab active" } else { "tab" },
                        disabled: busy,
                        onclick: move |_| site.write().select_gallery(&tab.key),
                        "{tab.label}"
                    }
                }
            }
            div { class: "gallery-grid", style: "{grid_css}",
                for tile in tiles {
                    figure {
                        key: "{tile.key}",
                        class: "gallery-tile",
                        style: "{tile.style}",
                        onclick: move |_| site.write().open_lightbox(tile.index),
                        img { src: "{tile.image}", alt: "{tile.name}" }
                        figcaption { "{tile.name}" }
                    }
                }
            }
            Lightbox { site }
        }
    }
}

#[component]
fn Lightbox(mut site: Signal<Site>) -> Element {
    let s = site.read();
    let lightbox = s.gallery.lightbox();
    let (Some(item), Some(label)) = (lightbox.current(), lightbox.position_label()) else {
        return rsx! {};
    };
    let image = item.image.clone();
    let name = item.name.clone();

    rsx! {
        div { class: "lightbox",
            onclick: move |_| {
                let _ = site.write().gallery.handle_key(KeyAction::LightboxClose);
            },
            button { class: "lightbox-prev",
                onclick: move |evt| {
                    evt.stop_propagation();
                    let _ = site.write().gallery.handle_key(KeyAction::LightboxPrevious);
                },
                "<"
            }
            img { src: "{image}", alt: "{name}", onclick: move |evt| evt.stop_propagation() }
            button { class: "lightbox-next",
                onclick: move |evt| {
                    evt.stop_propagation();
                    let _ = site.write().gallery.handle_key(KeyAction::LightboxNext);
                },
                ">"
            }
            p { class: "lightbox-caption", "{name}" }
            span { class: "lightbox-counter", "{label}" }
        }
    }
}

#[component]
pub fn Testimonials(mut site: Signal<Site>) -> Element {
    let s = site.read();
    let slider = &s.testimonials;
    let Some(current) = slider.current() else {
        return rsx! {};
    };
    let active = slider.active_index();
    let count = slider.len();
    let quote = current.quote.clone();
    let name = current.name.clone();
    let role = current.role.clone();
    let stars = "★".repeat(usize::from(current.rating.min(5)));
    let header = reveal_class(&s, TESTIMONIALS_HEADER);
    let header_id = bridge::reveal_dom_id(TESTIMONIALS_HEADER);

    rsx! {
        section { id: "testimonials", class: "testimonials",
            h2 { id: "{header_id}", class: "{header}", "What Guests Say" }
            blockquote { "{quote}" }
            p { class: "stars", "{stars}" }
            p { class: "author", "{name}, {role}" }
            button { onclick: move |_| { let _ = site.write().testimonials.previous(); }, "<" }
            for i in 0..count {
                button {
                    key: "{i}",
                    class: if i == active { "dot active" } else { "dot" },
                    onclick: move |_| {
                        if let Err(e) = site.write().testimonials.select(i) {
                            log::warn!("{e}");
                        }
                    },
                }
            }
            button { onclick: move |_| { let _ = site.write().testimonials.next(); }, ">" }
        }
    }
}

#[component]
pub fn ContactView(mut site: Signal<Site>) -> Element {
    let s = site.read();
    let submitting = s.form.is_submitting();
    let button = s.form.button_label();
    let header = reveal_class(&s, CONTACT_HEADER);
    let header_id = bridge::reveal_dom_id(CONTACT_HEADER);
    let fields: Vec<(ContactField, String)> = ContactField::ALL
        .into_iter()
        .map(|f| (f, s.form.get(f).to_owned()))
        .collect();
    let placeholder = guest_label("");
    let guests: Vec<(&str, String)> =
        GUEST_OPTIONS.into_iter().map(|g| (g, guest_label(g))).collect();

    rsx! {
        section { id: "contact", class: "contact",
            h2 { id: "{header_id}", class: "{header}", "Reserve a Table" }
            form {
                onsubmit: move |evt| {
                    evt.prevent_default();
                    site.write().submit_form();
                },
                for (field, value) in fields {
                    label { key: "{field}",
                        "{field}"
                        {match field {
                            ContactField::Guests => rsx! {
                                select {
                                    value: "{value}",
                                    onchange: move |evt| site.write().form.set(field, evt.value()),
                                    option { value: "", "{placeholder}" }
                                    for (opt, text) in guests.clone() {
                                        option { key: "{opt}", value: "{opt}", "{text}" }
                                    }
                                }
                            },
                            ContactField::Message => rsx! {
                                textarea {
                                    value: "{value}",
                                    oninput: move |evt| site.write().form.set(field, evt.value()),
                                }
                            },
                            _ => rsx! {
                                input {
                                    r#type: input_type(field),
                                    value: "{value}",
                                    required: field.is_required(),
                                    oninput: move |evt| site.write().form.set(field, evt.value()),
                                }
                            },
                        }}
                    }
                }
                button { r#type: "submit", disabled: submitting, "{button}" }
            }
        }
    }
}

fn input_type(field: ContactField) -> &'static str {
    match field {
        ContactField::Email => "email",
        ContactField::Phone => "tel",
        ContactField::Date => "date",
        _ => "text",
    }
}
