//! PostgreSQL store
//!
//! Single statements run on the pool. The two composite operations open a
//! transaction so a failure between lookup and insert leaves nothing behind.

use async_trait::async_trait;
use sqlx::PgPool;

use super::repos::{countries, users, visits};
use super::{StoreError, VisitStore};
use crate::models::{
    CountryFragment, CountryMatch, User, UserColor, UserName, VisitOutcome, VisitPolicy,
};

/// Store backed by a PostgreSQL pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VisitStore for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        users::list(&self.pool).await
    }

    async fn get_user(&self, id: i32) -> Result<Option<User>, StoreError> {
        users::get(&self.pool, id).await
    }

    async fn list_visited_country_codes(&self, user_id: i32) -> Result<Vec<String>, StoreError> {
        visits::codes_for_user(&self.pool, user_id).await
    }

    async fn find_country_by_name_fragment(
        &self,
        fragment: &CountryFragment,
    ) -> Result<CountryMatch, StoreError> {
        let candidates = countries::find_by_name_fragment(&self.pool, fragment).await?;
        Ok(CountryMatch::resolve(fragment, candidates))
    }

    async fn record_visit(
        &self,
        user_id: i32,
        country_code: &str,
        policy: VisitPolicy,
    ) -> Result<VisitOutcome, StoreError> {
        visits::insert(&self.pool, user_id, country_code, policy).await
    }

    async fn create_user(&self, name: &UserName, color: &UserColor) -> Result<i32, StoreError> {
        users::insert(&self.pool, name, color).await
    }

    async fn visit_by_name(
        &self,
        user_id: i32,
        fragment: &CountryFragment,
        policy: VisitPolicy,
    ) -> Result<VisitOutcome, StoreError> {
        let mut tx = self.pool.begin().await?;

        if !users::exists(&mut *tx, user_id).await? {
            return Err(StoreError::user_not_found(user_id));
        }

        let candidates = countries::find_by_name_fragment(&mut *tx, fragment).await?;
        let country = match CountryMatch::resolve(fragment, candidates) {
            CountryMatch::Unique(country) => country,
            CountryMatch::NotFound => return Err(StoreError::country_not_found(fragment.as_str())),
            CountryMatch::Ambiguous(candidates) => {
                return Err(StoreError::Ambiguous {
                    fragment: fragment.as_str().to_owned(),
                    candidates,
                })
            }
        };

        let outcome = visits::insert(&mut *tx, user_id, &country.country_code, policy).await?;

        tx.commit().await?;
        Ok(outcome)
    }

    async fn register_user(&self, name: &UserName, color: &UserColor) -> Result<User, StoreError> {
        let mut tx = self.pool.begin().await?;

        let id = users::insert(&mut *tx, name, color).await?;
        let user = users::get(&mut *tx, id)
            .await?
            .ok_or_else(|| StoreError::user_not_found(id))?;

        tx.commit().await?;
        Ok(user)
    }
}
