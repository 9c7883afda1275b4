//! Immutable content catalog: category key → ordered items.
//!
//! Catalogs are TOML files with one `[[category]]` table per tab and one
//! `[[category.item]]` per card. They are validated once at load and never
//! mutated afterwards; share them behind an `Arc`.

mod item;
mod testimonial;

use std::path::Path;

pub use item::{Category, CategoryRecord, Item, ItemTags};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;
pub use testimonial::{builtin_testimonials, Testimonial};

use crate::error::SiteError;

const BUILTIN_MENU: &str = include_str!("../../assets/catalog/menu.toml");
const BUILTIN_GALLERY: &str = include_str!("../../assets/catalog/gallery.toml");

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    category: Vec<CategoryRecord>,
}

/// Validated, ordered set of categories.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    categories: Vec<Category>,
    positions: FxHashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from raw records, validating every category.
    ///
    /// # Errors
    ///
    /// [`SiteError::InvalidCatalog`] when there are no categories, a key is
    /// blank or repeated, an item id repeats within its category, an item
    /// lacks a name or image, or a rating falls outside [0, 5].
    pub fn from_records(records: Vec<CategoryRecord>) -> Result<Self, SiteError> {
        if records.is_empty() {
            return Err(SiteError::InvalidCatalog(
                "catalog has no categories".to_owned(),
            ));
        }

        let mut positions = FxHashMap::default();
        let mut categories = Vec::with_capacity(records.len());
        for record in records {
            validate_record(&record)?;
            let position = categories.len();
            if positions.insert(record.key.clone(), position).is_some() {
                return Err(SiteError::InvalidCatalog(format!(
                    "duplicate category key `{}`",
                    record.key
                )));
            }
            categories.push(Category::from_record(record));
        }

        Ok(Self {
            categories,
            positions,
        })
    }

    /// Parse and validate a catalog from TOML text.
    ///
    /// # Errors
    ///
    /// [`SiteError::CatalogParse`] for malformed TOML, otherwise see
    /// [`from_records`](Self::from_records).
    pub fn from_toml_str(text: &str) -> Result<Self, SiteError> {
        let file: CatalogFile = toml::from_str(text)
            .map_err(|e| SiteError::CatalogParse(e.to_string()))?;
        Self::from_records(file.category)
    }

    /// Load a catalog from a TOML file.
    ///
    /// # Errors
    ///
    /// [`SiteError::Io`] if the file cannot be read, otherwise see
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: &Path) -> Result<Self, SiteError> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&content)?;
        log::info!(
            "loaded catalog {} ({} categories)",
            path.display(),
            catalog.len()
        );
        Ok(catalog)
    }

    /// The menu bundled with the site.
    ///
    /// # Errors
    ///
    /// Only if the bundled file fails validation.
    pub fn builtin_menu() -> Result<Self, SiteError> {
        Self::from_toml_str(BUILTIN_MENU)
    }

    /// The gallery bundled with the site.
    ///
    /// # Errors
    ///
    /// Only if the bundled file fails validation.
    pub fn builtin_gallery() -> Result<Self, SiteError> {
        Self::from_toml_str(BUILTIN_GALLERY)
    }

    /// Categories in display order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Category keys in display order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.categories.iter().map(Category::key)
    }

    /// Number of categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the catalog has no categories (never true once validated).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Display position of a category key.
    #[must_use]
    pub fn position(&self, key: &str) -> Option<usize> {
        self.positions.get(key).copied()
    }

    /// Whether the catalog has a category with this key.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    /// Look up a category by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Category> {
        self.position(key).and_then(|p| self.categories.get(p))
    }

    /// Category at a display position.
    #[must_use]
    pub fn category_at(&self, position: usize) -> Option<&Category> {
        self.categories.get(position)
    }
}

fn validate_record(record: &CategoryRecord) -> Result<(), SiteError> {
    let invalid = |msg: String| Err(SiteError::InvalidCatalog(msg));

    if record.key.trim().is_empty() {
        return invalid("category with blank key".to_owned());
    }
    if record.display_name.trim().is_empty() {
        return invalid(format!("category `{}` has no display name", record.key));
    }

    let mut seen = FxHashSet::default();
    for item in &record.items {
        if !seen.insert(item.id) {
            return invalid(format!(
                "category `{}` repeats item id {}",
                record.key, item.id
            ));
        }
        if item.name.trim().is_empty() {
            return invalid(format!(
                "item {} in `{}` has no name",
                item.id, record.key
            ));
        }
        if item.image.trim().is_empty() {
            return invalid(format!(
                "item {} in `{}` has no image",
                item.id, record.key
            ));
        }
        if !(0.0..=5.0).contains(&item.rating) {
            return invalid(format!(
                "item {} in `{}` has rating {} outside 0-5",
                item.id, record.key, item.rating
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn item(id: u32) -> Item {
        Item {
            id,
            name: format!("Item {id}"),
            description: String::new(),
            price: String::new(),
            image: format!("/item-{id}.jpg"),
            tags: ItemTags::default(),
            rating: 4.5,
            duration_label: String::new(),
        }
    }

    pub(crate) fn record(key: &str, ids: &[u32]) -> CategoryRecord {
        CategoryRecord {
            key: key.to_owned(),
            display_name: key.to_uppercase(),
            icon: String::new(),
            items: ids.iter().copied().map(item).collect(),
        }
    }

    /// `{"starters": [i1, i2, i3], "mains": [i4, i5]}`
    pub(crate) fn starters_and_mains() -> Catalog {
        Catalog::from_records(vec![
            record("starters", &[1, 2, 3]),
            record("mains", &[4, 5]),
        ])
        .unwrap()
    }

    #[test]
    fn builtin_catalogs_validate() {
        let menu = Catalog::builtin_menu().unwrap();
        assert_eq!(menu.category_at(0).map(Category::key), Some("starters"));
        assert!(menu.contains("burgers"));

        let gallery = Catalog::builtin_gallery().unwrap();
        assert_eq!(gallery.keys().collect::<Vec<_>>(), ["ambience", "food"]);
        assert_eq!(gallery.get("ambience").map(|c| c.items().len()), Some(6));
        assert_eq!(gallery.get("food").map(|c| c.items().len()), Some(7));
    }

    #[test]
    fn preserves_display_order() {
        let catalog = starters_and_mains();
        assert_eq!(catalog.position("starters"), Some(0));
        assert_eq!(catalog.position("mains"), Some(1));
        let ids: Vec<u32> = catalog
            .get("mains")
            .unwrap()
            .items()
            .iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, [4, 5]);
    }

    #[test]
    fn rejects_duplicate_keys() {
        let err = Catalog::from_records(vec![
            record("starters", &[1]),
            record("starters", &[2]),
        ]);
        assert!(matches!(err, Err(SiteError::InvalidCatalog(_))));
    }

    #[test]
    fn rejects_duplicate_item_ids_within_category() {
        let err = Catalog::from_records(vec![record("starters", &[1, 1])]);
        assert!(matches!(err, Err(SiteError::InvalidCatalog(_))));

        // Same id in two different categories is fine.
        assert!(Catalog::from_records(vec![
            record("a", &[1]),
            record("b", &[1]),
        ])
        .is_ok());
    }

    #[test]
    fn rejects_missing_display_fields() {
        let mut rec = record("starters", &[1]);
        rec.items[0].image = "  ".to_owned();
        assert!(Catalog::from_records(vec![rec]).is_err());

        let mut rec = record("starters", &[1]);
        rec.items[0].rating = 7.0;
        assert!(Catalog::from_records(vec![rec]).is_err());
    }

    #[test]
    fn rejects_empty_catalog_but_allows_empty_category() {
        assert!(Catalog::from_records(Vec::new()).is_err());
        let catalog = Catalog::from_records(vec![record("empty", &[])]).unwrap();
        assert!(catalog.get("empty").unwrap().items().is_empty());
    }

    #[test]
    fn toml_requires_name_and_image() {
        let text = r#"
[[category]]
key = "starters"
display_name = "Starters"

[[category.item]]
id = 1
name = "Wings"
"#;
        assert!(matches!(
            Catalog::from_toml_str(text),
            Err(SiteError::CatalogParse(_))
        ));
    }

    #[test]
    fn load_reads_file() {
        let path = std::env::temp_dir().join("aldees-catalog-load-test.toml");
        std::fs::write(&path, BUILTIN_GALLERY).unwrap();
        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        let _ = std::fs::remove_file(&path);

        assert!(matches!(
            Catalog::load(Path::new("/nonexistent/aldees.toml")),
            Err(SiteError::Io(_))
        ));
    }
}
