//! `users` table

use sqlx::postgres::PgExecutor;

use crate::db::StoreError;
use crate::models::{User, UserColor, UserName};

/// All users, oldest first.
pub async fn list<'e, E>(executor: E) -> Result<Vec<User>, StoreError>
where
    E: PgExecutor<'e>,
{
    let users = sqlx::query_as::<_, User>("SELECT id, name, color FROM users ORDER BY id")
        .fetch_all(executor)
        .await?;
    Ok(users)
}

pub async fn get<'e, E>(executor: E, id: i32) -> Result<Option<User>, StoreError>
where
    E: PgExecutor<'e>,
{
    let user = sqlx::query_as::<_, User>("SELECT id, name, color FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(user)
}

pub async fn exists<'e, E>(executor: E, id: i32) -> Result<bool, StoreError>
where
    E: PgExecutor<'e>,
{
    let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
        .bind(id)
        .fetch_one(executor)
        .await?;
    Ok(exists)
}

/// Insert a user, returning the generated id.
pub async fn insert<'e, E>(executor: E, name: &UserName, color: &UserColor) -> Result<i32, StoreError>
where
    E: PgExecutor<'e>,
{
    let (id,): (i32,) =
        sqlx::query_as("INSERT INTO users (name, color) VALUES ($1, $2) RETURNING id")
            .bind(name.as_str())
            .bind(color.as_str())
            .fetch_one(executor)
            .await?;
    Ok(id)
}
