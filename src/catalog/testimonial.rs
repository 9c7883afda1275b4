use serde::{Deserialize, Serialize};

use crate::error::SiteError;

const BUILTIN: &str = include_str!("../../assets/catalog/testimonials.toml");

/// A guest quote shown in the testimonial slider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Testimonial {
    /// Guest name.
    pub name: String,
    /// Short descriptor ("Food Critic").
    pub role: String,
    /// The quote itself.
    pub quote: String,
    /// Star rating out of 5.
    pub rating: u8,
    /// Portrait path.
    pub image: String,
}

#[derive(Deserialize)]
struct TestimonialFile {
    #[serde(default)]
    testimonial: Vec<Testimonial>,
}

/// The testimonials bundled with the site.
///
/// # Errors
///
/// [`SiteError::CatalogParse`] if the bundled file is malformed.
pub fn builtin_testimonials() -> Result<Vec<Testimonial>, SiteError> {
    let file: TestimonialFile = toml::from_str(BUILTIN)
        .map_err(|e| SiteError::CatalogParse(e.to_string()))?;
    Ok(file.testimonial)
}
