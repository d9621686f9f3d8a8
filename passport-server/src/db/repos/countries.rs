//! `countries` reference table (read-only)

use sqlx::postgres::PgExecutor;

use crate::db::StoreError;
use crate::models::{Country, CountryFragment};

/// Countries whose lowercased name contains the fragment, ordered by name.
///
/// `strpos` rather than `LIKE` so `%` and `_` in user input match literally.
pub async fn find_by_name_fragment<'e, E>(
    executor: E,
    fragment: &CountryFragment,
) -> Result<Vec<Country>, StoreError>
where
    E: PgExecutor<'e>,
{
    let countries = sqlx::query_as::<_, Country>(
        r#"
        SELECT id, country_code, country_name
        FROM countries
        WHERE strpos(LOWER(country_name), $1) > 0
        ORDER BY country_name, id
        "#,
    )
    .bind(fragment.as_str())
    .fetch_all(executor)
    .await?;
    Ok(countries)
}
