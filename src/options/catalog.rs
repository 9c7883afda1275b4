use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::SiteError;

/// Optional catalog files replacing the bundled content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct CatalogOptions {
    /// Menu catalog TOML.
    pub menu_path: Option<PathBuf>,
    /// Gallery catalog TOML.
    pub gallery_path: Option<PathBuf>,
}

impl CatalogOptions {
    /// The configured menu, or the bundled one.
    ///
    /// # Errors
    ///
    /// Whatever [`Catalog::load`] reports for the configured file.
    pub fn load_menu(&self) -> Result<Catalog, SiteError> {
        match &self.menu_path {
            Some(path) => Catalog::load(path),
            None => Catalog::builtin_menu(),
        }
    }

    /// The configured gallery, or the bundled one.
    ///
    /// # Errors
    ///
    /// Whatever [`Catalog::load`] reports for the configured file.
    pub fn load_gallery(&self) -> Result<Catalog, SiteError> {
        match &self.gallery_path {
            Some(path) => Catalog::load(path),
            None => Catalog::builtin_gallery(),
        }
    }
}
