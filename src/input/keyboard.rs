use serde::{Deserialize, Serialize};

/// Site-level actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// lightbox_next = "ArrowRight"
/// lightbox_close = "Escape"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Show the next lightbox photo.
    LightboxNext,
    /// Show the previous lightbox photo.
    LightboxPrevious,
    /// Close the lightbox, or the navigation overlay if it is open.
    LightboxClose,
    /// Open or close the mobile navigation overlay.
    ToggleNavigation,
}
