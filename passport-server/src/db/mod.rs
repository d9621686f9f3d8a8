//! Data access layer - store abstraction, PostgreSQL and in-memory backends
//!
//! # Design Principles
//!
//! - Handlers see only `dyn VisitStore`, injected once at startup
//! - Parameterized queries only
//! - Lookup-then-insert and insert-then-reload run in one transaction

pub mod memory;
pub mod pool;
pub mod postgres;
pub mod repos;

use async_trait::async_trait;

use crate::models::{
    Country, CountryFragment, CountryMatch, User, UserColor, UserName, VisitOutcome, VisitPolicy,
};

pub use memory::MemoryStore;
pub use pool::{create_pool, create_pool_with, create_pool_with_options};
pub use postgres::PgStore;

/// Data access error
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("'{fragment}' matches several countries: {}", candidate_names(.candidates))]
    Ambiguous {
        fragment: String,
        candidates: Vec<Country>,
    },
}

fn candidate_names(candidates: &[Country]) -> String {
    candidates
        .iter()
        .map(|c| c.country_name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl StoreError {
    pub(crate) fn user_not_found(id: i32) -> Self {
        Self::NotFound {
            resource: "user",
            id: id.to_string(),
        }
    }

    pub(crate) fn country_not_found(fragment: &str) -> Self {
        Self::NotFound {
            resource: "country",
            id: fragment.to_owned(),
        }
    }
}

/// Everything the request handlers need from persistence.
///
/// `ping` and the next six methods are single statements. `visit_by_name` and
/// `register_user` are multi-step and atomic.
#[async_trait]
pub trait VisitStore: Send + Sync {
    /// Cheap round trip used by the health check.
    async fn ping(&self) -> Result<(), StoreError>;

    /// All users ordered by id.
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    async fn get_user(&self, id: i32) -> Result<Option<User>, StoreError>;

    /// One code per visited record, so duplicates are repeated.
    async fn list_visited_country_codes(&self, user_id: i32) -> Result<Vec<String>, StoreError>;

    async fn find_country_by_name_fragment(
        &self,
        fragment: &CountryFragment,
    ) -> Result<CountryMatch, StoreError>;

    async fn record_visit(
        &self,
        user_id: i32,
        country_code: &str,
        policy: VisitPolicy,
    ) -> Result<VisitOutcome, StoreError>;

    /// Insert a user and return the generated id.
    async fn create_user(&self, name: &UserName, color: &UserColor) -> Result<i32, StoreError>;

    /// Look up a country by name fragment and record it for the user.
    ///
    /// Fails with `NotFound` for an unknown user or country and with
    /// `Ambiguous` when the fragment names no single country. Nothing is
    /// written on failure.
    async fn visit_by_name(
        &self,
        user_id: i32,
        fragment: &CountryFragment,
        policy: VisitPolicy,
    ) -> Result<VisitOutcome, StoreError>;

    /// Create a user and read it back.
    async fn register_user(&self, name: &UserName, color: &UserColor) -> Result<User, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambiguous_error_lists_candidates() {
        let err = StoreError::Ambiguous {
            fragment: "land".into(),
            candidates: vec![
                Country {
                    id: 1,
                    country_code: "IS".into(),
                    country_name: "Iceland".into(),
                },
                Country {
                    id: 2,
                    country_code: "IE".into(),
                    country_name: "Ireland".into(),
                },
            ],
        };
        assert_eq!(
            err.to_string(),
            "'land' matches several countries: Iceland, Ireland"
        );
    }

    #[test]
    fn not_found_display() {
        assert_eq!(
            StoreError::user_not_found(7).to_string(),
            "not found: user '7'"
        );
    }
}
