//! `visited_countries` join table

use sqlx::postgres::PgExecutor;

use crate::db::StoreError;
use crate::models::{VisitOutcome, VisitPolicy};

/// Codes for every visited record of a user, in insertion order.
pub async fn codes_for_user<'e, E>(executor: E, user_id: i32) -> Result<Vec<String>, StoreError>
where
    E: PgExecutor<'e>,
{
    let rows: Vec<(String,)> = sqlx::query_as(
        "SELECT country_code FROM visited_countries WHERE user_id = $1 ORDER BY id",
    )
    .bind(user_id)
    .fetch_all(executor)
    .await?;
    Ok(rows.into_iter().map(|(code,)| code).collect())
}

/// Insert a visited record according to the policy.
///
/// A foreign key violation means the user or country does not exist.
pub async fn insert<'e, E>(
    executor: E,
    user_id: i32,
    country_code: &str,
    policy: VisitPolicy,
) -> Result<VisitOutcome, StoreError>
where
    E: PgExecutor<'e>,
{
    let query = match policy {
        VisitPolicy::AllowDuplicates => sqlx::query(
            "INSERT INTO visited_countries (country_code, user_id) VALUES ($1, $2)",
        ),
        VisitPolicy::Unique => sqlx::query(
            r#"
            INSERT INTO visited_countries (country_code, user_id)
            SELECT $1, $2
            WHERE NOT EXISTS (
                SELECT 1 FROM visited_countries WHERE country_code = $1 AND user_id = $2
            )
            "#,
        ),
    };

    let result = query
        .bind(country_code)
        .bind(user_id)
        .execute(executor)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => StoreError::NotFound {
                resource: "user or country",
                id: format!("{user_id}/{country_code}"),
            },
            other => StoreError::Sqlx(other),
        })?;

    let country_code = country_code.to_owned();
    if result.rows_affected() == 0 {
        Ok(VisitOutcome::AlreadyVisited { country_code })
    } else {
        Ok(VisitOutcome::Recorded { country_code })
    }
}
