use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Optional dietary badges shown on a menu card.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default,
)]
#[serde(default)]
pub struct ItemTags {
    /// Carries the chili badge.
    pub spicy: bool,
    /// Carries the leaf badge.
    pub vegetarian: bool,
}

/// One menu dish or gallery photo.
///
/// Gallery items use `name` as the caption/alt text and leave the menu-only
/// fields at their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    /// Unique within the owning category.
    pub id: u32,
    /// Display name (card title, image alt text).
    pub name: String,
    /// Short description under the title.
    #[serde(default)]
    pub description: String,
    /// Formatted price label, e.g. `"$14.99"`.
    #[serde(default)]
    pub price: String,
    /// Image path relative to the site root.
    pub image: String,
    /// Dietary badges.
    #[serde(default)]
    pub tags: ItemTags,
    /// Star rating in [0, 5].
    #[serde(default)]
    pub rating: f32,
    /// Preparation time label, e.g. `"15 min"`.
    #[serde(default)]
    pub duration_label: String,
}

/// Category as written in a catalog file, before validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryRecord {
    /// Stable identifier.
    pub key: String,
    /// Human-readable tab label.
    pub display_name: String,
    /// Optional tab icon (emoji or glyph).
    #[serde(default)]
    pub icon: String,
    /// Items in display order.
    #[serde(default, rename = "item")]
    pub items: Vec<Item>,
}

/// A named bucket of items (a menu section or a gallery tab).
///
/// Items are shared behind an `Arc` so a lightbox snapshot is a pointer copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    key: String,
    display_name: String,
    icon: String,
    items: Arc<[Item]>,
}

impl Category {
    pub(super) fn from_record(record: CategoryRecord) -> Self {
        Self {
            key: record.key,
            display_name: record.display_name,
            icon: record.icon,
            items: record.items.into(),
        }
    }

    /// Stable identifier, unique within the catalog.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Human-readable label.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Tab icon; empty when none was configured.
    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    /// Items in display order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Shared handle to the item list.
    #[must_use]
    pub fn shared_items(&self) -> Arc<[Item]> {
        Arc::clone(&self.items)
    }
}
