use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::Result, models::UserCategory};

pub async fn get_all(pool: &PgPool) -> Result<Vec<UserCategory>> {
    let links = sqlx::query_as::<_, UserCategory>(
        "SELECT user_id, category_id FROM user_categories ORDER BY category_id ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(links)
}

pub async fn find_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<UserCategory>> {
    let links = sqlx::query_as::<_, UserCategory>(
        "SELECT user_id, category_id FROM user_categories WHERE user_id = $1 ORDER BY category_id ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(links)
}

pub async fn find(pool: &PgPool, user_id: Uuid, category_id: i32) -> Result<Option<UserCategory>> {
    let link = sqlx::query_as::<_, UserCategory>(
        "SELECT user_id, category_id FROM user_categories WHERE user_id = $1 AND category_id = $2",
    )
    .bind(user_id)
    .bind(category_id)
    .fetch_optional(pool)
    .await?;

    Ok(link)
}

pub async fn create(pool: &PgPool, user_id: Uuid, category_id: i32) -> Result<UserCategory> {
    let link = sqlx::query_as::<_, UserCategory>(
        "INSERT INTO user_categories (user_id, category_id) VALUES ($1, $2) RETURNING user_id, category_id",
    )
    .bind(user_id)
    .bind(category_id)
    .fetch_one(pool)
    .await?;

    Ok(link)
}

pub async fn delete(pool: &PgPool, user_id: Uuid, category_id: i32) -> Result<bool> {
    let result = sqlx::query("DELETE FROM user_categories WHERE user_id = $1 AND category_id = $2")
        .bind(user_id)
        .bind(category_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
