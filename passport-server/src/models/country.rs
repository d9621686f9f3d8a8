//! Country reference data and name lookup
//!
//! Lookups are case-insensitive substring matches against the country name.
//! A fragment can match several countries ("ger" hits Algeria, Germany,
//! Niger and Nigeria), so the lookup returns every candidate and
//! [`CountryMatch::resolve`] decides whether one of them is the answer.

use serde::Serialize;
use sqlx::FromRow;

use super::ValidationError;

/// Maximum length for a country name fragment
const MAX_FRAGMENT_LEN: usize = 128;

/// Country record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Country {
    pub id: i32,
    pub country_code: String,
    pub country_name: String,
}

/// Lowercased, trimmed search text from the add-country form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryFragment(String);

impl CountryFragment {
    /// Create a fragment from form input.
    ///
    /// # Example
    /// ```
    /// use passport_server::models::CountryFragment;
    ///
    /// assert_eq!(CountryFragment::new(" FRANC ").unwrap().as_str(), "franc");
    /// assert!(CountryFragment::new("  ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "country" });
        }

        if trimmed.chars().count() > MAX_FRAGMENT_LEN {
            return Err(ValidationError::TooLong {
                field: "country",
                max: MAX_FRAGMENT_LEN,
            });
        }

        Ok(Self(trimmed.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a country name contains this fragment, ignoring case.
    pub fn matches(&self, country_name: &str) -> bool {
        country_name.to_lowercase().contains(&self.0)
    }
}

/// Outcome of a country name lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountryMatch {
    NotFound,
    Unique(Country),
    /// Several countries match and none is preferred; ordered by name.
    Ambiguous(Vec<Country>),
}

impl CountryMatch {
    /// Resolve the candidates of a substring lookup.
    ///
    /// One candidate is unique. Among several, an exact name match wins,
    /// then a single name starting with the fragment.
    pub fn resolve(fragment: &CountryFragment, mut candidates: Vec<Country>) -> Self {
        if candidates.len() <= 1 {
            return candidates.pop().map_or(Self::NotFound, Self::Unique);
        }

        let exact = candidates
            .iter()
            .position(|c| c.country_name.to_lowercase() == fragment.as_str());
        if let Some(pos) = exact {
            return Self::Unique(candidates.swap_remove(pos));
        }

        let prefixed: Vec<usize> = candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| c.country_name.to_lowercase().starts_with(fragment.as_str()))
            .map(|(i, _)| i)
            .collect();
        if let [pos] = prefixed.as_slice() {
            return Self::Unique(candidates.swap_remove(*pos));
        }

        Self::Ambiguous(candidates)
    }
}
