//! Crate-level error types.

use std::fmt;

use crate::contact::ContactField;
use crate::viewport::ElementId;

/// Errors produced by the aldees crate.
///
/// Every variant is local and recoverable: the worst outcome of any of them
/// is that the requested change did not happen.
#[derive(Debug)]
pub enum SiteError {
    /// A category key that is not present in the catalog.
    UnknownCategory(String),
    /// A carousel was opened over zero items.
    EmptyCollection,
    /// A carousel index outside `[0, len)`.
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// Length of the collection it was checked against.
        len: usize,
    },
    /// A catalog failed load-time validation.
    InvalidCatalog(String),
    /// Failed to parse a catalog file.
    CatalogParse(String),
    /// A required contact form field was left blank.
    MissingField(ContactField),
    /// An element already holds a live scroll trigger subscription.
    DuplicateSubscription(ElementId),
    /// A sequencer play was requested while another is still running.
    AnimationInFlight,
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for SiteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCategory(key) => write!(f, "unknown category: {key}"),
            Self::EmptyCollection => {
                write!(f, "cannot browse an empty collection")
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for {len} items")
            }
            Self::InvalidCatalog(msg) => write!(f, "invalid catalog: {msg}"),
            Self::CatalogParse(msg) => {
                write!(f, "catalog parse error: {msg}")
            }
            Self::MissingField(field) => {
                write!(f, "required field is empty: {}", field.label())
            }
            Self::DuplicateSubscription(element) => {
                write!(f, "element {element} already has a live trigger")
            }
            Self::AnimationInFlight => {
                write!(f, "an animation is already in flight")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for SiteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SiteError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
