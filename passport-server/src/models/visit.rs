//! Visited records and the policy for recording them

use sqlx::FromRow;

/// Join row linking a user to a country they visited
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct VisitedCountry {
    pub id: i32,
    pub user_id: i32,
    pub country_code: String,
}

/// Whether a user may record the same country more than once
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VisitPolicy {
    /// Every submission adds a row; repeat trips count again
    #[default]
    AllowDuplicates,
    /// A country is recorded at most once per user
    Unique,
}

impl VisitPolicy {
    pub fn from_unique_flag(unique: bool) -> Self {
        if unique {
            Self::Unique
        } else {
            Self::AllowDuplicates
        }
    }
}

/// Result of recording a visit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitOutcome {
    Recorded { country_code: String },
    /// Unique policy only: the row already existed, nothing was inserted
    AlreadyVisited { country_code: String },
}

impl VisitOutcome {
    pub fn country_code(&self) -> &str {
        match self {
            Self::Recorded { country_code } | Self::AlreadyVisited { country_code } => country_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_allows_duplicates() {
        assert_eq!(VisitPolicy::default(), VisitPolicy::AllowDuplicates);
        assert_eq!(VisitPolicy::from_unique_flag(true), VisitPolicy::Unique);
        assert_eq!(VisitPolicy::from_unique_flag(false), VisitPolicy::AllowDuplicates);
    }
}
