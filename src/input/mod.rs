//! Keyboard input: bindable site actions.
//!
//! Key strings are DOM `KeyboardEvent.code` values (`"ArrowRight"`,
//! `"Escape"`, `"KeyM"`); the mapping lives in
//! [`KeybindingOptions`](crate::options::KeybindingOptions).

mod keyboard;

pub use keyboard::KeyAction;
