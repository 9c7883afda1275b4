//! Centralized site options with TOML preset support.
//!
//! All tweakable settings (section transitions, preloader and navigation
//! timings, form behavior, keybindings, catalog overrides) are consolidated
//! here. Options serialize to/from TOML for presets stored in
//! `assets/presets/`.

mod catalog;
mod contact;
mod keybindings;
mod navigation;
mod preloader;
mod section;
mod treatment;

use std::path::Path;

pub use catalog::CatalogOptions;
pub use contact::ContactOptions;
pub use keybindings::KeybindingOptions;
pub use navigation::NavigationOptions;
pub use preloader::PreloaderOptions;
use schemars::JsonSchema;
pub use section::{GalleryOptions, MenuOptions};
use serde::{Deserialize, Serialize};
pub use treatment::{StaggerMode, TreatmentOptions};

use crate::error::SiteError;

const DEFAULT_PRESET: &str = include_str!("../../assets/presets/default.toml");

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[menu]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Menu tabs and card transitions.
    pub menu: MenuOptions,
    /// Gallery tabs and photo transitions.
    pub gallery: GalleryOptions,
    /// First-load preloader timings.
    pub preloader: PreloaderOptions,
    /// Header and mobile overlay.
    pub navigation: NavigationOptions,
    /// Reservation form.
    pub contact: ContactOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
    /// Catalog file overrides.
    #[schemars(skip)]
    pub catalog: CatalogOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`SiteError::OptionsParse`] for malformed TOML or unknown values
    /// (e.g. an unrecognized easing name).
    pub fn from_toml_str(text: &str) -> Result<Self, SiteError> {
        let mut opts: Self = toml::from_str(text)
            .map_err(|e| SiteError::OptionsParse(e.to_string()))?;
        opts.keybindings.rebuild_reverse_map();
        Ok(opts)
    }

    /// The bundled `default` preset.
    ///
    /// # Errors
    ///
    /// Only if the bundled preset fails to parse.
    pub fn builtin() -> Result<Self, SiteError> {
        Self::from_toml_str(DEFAULT_PRESET)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`SiteError::Io`] if the file cannot be read, otherwise see
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: &Path) -> Result<Self, SiteError> {
        let content = std::fs::read_to_string(path).map_err(SiteError::Io)?;
        let opts = Self::from_toml_str(&content)?;
        log::info!("loaded options from {}", path.display());
        Ok(opts)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// [`SiteError::OptionsParse`] if serialization fails,
    /// [`SiteError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), SiteError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SiteError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(SiteError::Io)?;
        }
        std::fs::write(path, content).map_err(SiteError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use web_time::Duration;

    use super::*;
    use crate::animation::Treatment;
    use crate::util::easing::EasingFunction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn builtin_preset_matches_defaults() {
        assert_eq!(Options::builtin().unwrap(), Options::default());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[menu]
default_category = "burgers"

[menu.enter]
duration_ms = 300
easing = "back.out(1.7)"
"#;
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(opts.menu.default_category, "burgers");
        let enter = opts.menu.enter.to_treatment();
        assert_eq!(enter.duration, Duration::from_millis(300));
        assert_eq!(enter.easing, EasingFunction::BackOut { overshoot: 1.7 });
        // Everything else should be default
        assert_eq!(
            opts.menu.exit.to_treatment(),
            Treatment::menu_exit()
        );
        assert_eq!(opts.gallery, GalleryOptions::default());
        assert_eq!(opts.contact.submit_delay(), Duration::from_millis(2000));
    }

    #[test]
    fn keybinding_lookup() {
        use crate::input::KeyAction;
        let opts = Options::default();
        assert_eq!(
            opts.keybindings.lookup("Escape"),
            Some(KeyAction::LightboxClose)
        );
        assert_eq!(
            opts.keybindings.lookup("ArrowRight"),
            Some(KeyAction::LightboxNext)
        );
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn keybindings_rebuilt_after_parse() {
        use crate::input::KeyAction;
        let opts = Options::from_toml_str(
            r#"
[keybindings.bindings]
lightbox_next = "KeyL"
"#,
        )
        .unwrap();
        assert_eq!(opts.keybindings.lookup("KeyL"), Some(KeyAction::LightboxNext));
        // The table replaces the defaults wholesale.
        assert_eq!(opts.keybindings.lookup("Escape"), None);
    }

    #[test]
    fn bad_values_fail_to_parse() {
        assert!(matches!(
            Options::from_toml_str("[menu.exit]\neasing = \"elastic\""),
            Err(SiteError::OptionsParse(_))
        ));
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join("aldees-options-test");
        let path = dir.join("custom.toml");
        let mut opts = Options::default();
        opts.navigation.scroll_threshold = 80.0;
        opts.save(&path).unwrap();

        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        assert!(Options::list_presets(&dir).contains(&"custom".to_owned()));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        // UI-exposed sections should be present
        assert!(props.contains_key("menu"));
        assert!(props.contains_key("gallery"));
        assert!(props.contains_key("preloader"));
        assert!(props.contains_key("navigation"));
        assert!(props.contains_key("contact"));

        // Skipped sections should be absent
        assert!(!props.contains_key("keybindings"));
        assert!(!props.contains_key("catalog"));

        // Preloader should have exposed fields but not skipped ones
        let preloader = &props["preloader"]["properties"];
        assert!(preloader.get("logo_ms").is_some());
        assert!(preloader.get("text_overlap_ms").is_none());
    }
}
