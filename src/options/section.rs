use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::treatment::TreatmentOptions;
use crate::animation::Treatment;

/// Menu section: default tab plus card transitions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Menu", inline)]
#[serde(default)]
pub struct MenuOptions {
    /// Category shown on first render.
    #[schemars(title = "Default Category")]
    pub default_category: String,
    /// Cards leaving on a tab switch.
    pub exit: TreatmentOptions,
    /// Cards arriving on a tab switch.
    pub enter: TreatmentOptions,
}

impl Default for MenuOptions {
    fn default() -> Self {
        Self {
            default_category: "starters".to_owned(),
            exit: Treatment::menu_exit().into(),
            enter: Treatment::menu_enter().into(),
        }
    }
}

/// Gallery section: default tab plus photo transitions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Gallery", inline)]
#[serde(default)]
pub struct GalleryOptions {
    /// Tab shown on first render.
    #[schemars(title = "Default Tab")]
    pub default_category: String,
    /// Photos leaving on a tab switch.
    pub exit: TreatmentOptions,
    /// Photos arriving on a tab switch.
    pub enter: TreatmentOptions,
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self {
            default_category: "ambience".to_owned(),
            exit: Treatment::gallery_exit().into(),
            enter: Treatment::gallery_enter().into(),
        }
    }
}
