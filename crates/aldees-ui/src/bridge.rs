//! DOM glue between the browser and the interaction core.
//!
//! Listeners and the frame loop are registered once and live for the whole
//! page, so their closures are leaked with `forget`.

use std::{cell::RefCell, rc::Rc};

use aldees::viewport::{ElementBounds, ElementId};
use wasm_bindgen::prelude::*;

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// DOM id of the element watched for `element`'s scroll reveal.
pub fn reveal_dom_id(element: ElementId) -> String {
    format!("reveal-{}", element.0)
}

/// Attach `handler` to a `window` event.
pub fn listen(event: &str, handler: impl FnMut(web_sys::Event) + 'static) {
    let Some(window) = web_sys::window() else {
        log::error!("no global window; `{event}` listener not registered");
        return;
    };
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    if let Err(e) = window
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        log::error!("failed to add `{event}` listener: {e:?}");
    }
    closure.forget();
}

/// Attach `handler` to `keydown`, passing the physical key code
/// (`KeyboardEvent.code`).
pub fn listen_keys(mut handler: impl FnMut(&str) + 'static) {
    listen("keydown", move |event| {
        if let Some(key) = event.dyn_ref::<web_sys::KeyboardEvent>() {
            handler(&key.code());
        }
    });
}

/// Call `callback` on every animation frame, forever.
pub fn start_frame_loop(mut callback: impl FnMut() + 'static) {
    let slot: FrameSlot = Rc::new(RefCell::new(None));
    let next = Rc::clone(&slot);
    *slot.borrow_mut() = Some(Closure::new(move |_timestamp: f64| {
        callback();
        request_frame(&next);
    }));
    request_frame(&slot);
}

fn request_frame(slot: &FrameSlot) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let guard = slot.borrow();
    let Some(callback) = guard.as_ref() else {
        return;
    };
    if let Err(e) = window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        log::error!("requestAnimationFrame failed: {e:?}");
    }
}

/// Current vertical scroll offset in px.
pub fn scroll_y() -> f32 {
    web_sys::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0) as f32
}

/// Viewport `(width, height)` in CSS px.
pub fn viewport_size() -> (u32, f32) {
    let Some(window) = web_sys::window() else {
        return (0, 0.0);
    };
    let px = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (
        px(window.inner_width()) as u32,
        px(window.inner_height()) as f32,
    )
}

/// Document-space geometry of a watched element, if it is mounted.
pub fn element_bounds(element: ElementId) -> Option<ElementBounds> {
    let window = web_sys::window()?;
    let node = window.document()?.get_element_by_id(&reveal_dom_id(element))?;
    let rect = node.get_bounding_client_rect();
    let scroll = window.scroll_y().unwrap_or(0.0);
    Some(ElementBounds {
        top: (rect.top() + scroll) as f32,
        height: rect.height() as f32,
    })
}

/// Enable or disable page scrolling.
pub fn set_scroll_locked(locked: bool) {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        return;
    };
    let value = if locked { "hidden" } else { "" };
    if let Err(e) = body.style().set_property("overflow", value) {
        log::warn!("could not update scroll lock: {e:?}");
    }
}
