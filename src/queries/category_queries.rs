use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::Result,
    models::{Category, CategoryParent, CategoryRequest, CategoryUsage},
};

/// Find category by ID
pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Category>> {
    let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(category)
}

/// Get all categories (flat list)
pub async fn get_all(pool: &PgPool) -> Result<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name ASC, id ASC")
        .fetch_all(pool)
        .await?;

    Ok(categories)
}

/// Direct children of a category
pub async fn find_by_parent(pool: &PgPool, parent_id: i32) -> Result<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>(
        "SELECT * FROM categories WHERE parent_category_id = $1 ORDER BY name ASC, id ASC",
    )
    .bind(parent_id)
    .fetch_all(pool)
    .await?;

    Ok(categories)
}

/// Categories linked to a seller
pub async fn find_by_seller(pool: &PgPool, seller_id: Uuid) -> Result<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>(
        "SELECT c.* FROM categories c
         INNER JOIN user_categories uc ON uc.category_id = c.id
         WHERE uc.user_id = $1
         ORDER BY c.name ASC, c.id ASC",
    )
    .bind(seller_id)
    .fetch_all(pool)
    .await?;

    Ok(categories)
}

/// Parent pointer of every category, for cycle checks
pub async fn get_parent_map(pool: &PgPool) -> Result<HashMap<i32, Option<i32>>> {
    let rows = sqlx::query_as::<_, CategoryParent>("SELECT id, parent_category_id FROM categories")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| (row.id, row.parent_category_id))
        .collect())
}

/// Create a category and link it to the seller who created it
pub async fn create_for_seller(
    pool: &PgPool,
    seller_id: Uuid,
    req: &CategoryRequest,
) -> Result<Category> {
    let mut tx = pool.begin().await?;

    let category = sqlx::query_as::<_, Category>(
        "INSERT INTO categories (name, description, parent_category_id)
         VALUES ($1, $2, $3)
         RETURNING *",
    )
    .bind(req.name.trim())
    .bind(&req.description)
    .bind(req.parent_category_id)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("INSERT INTO user_categories (user_id, category_id) VALUES ($1, $2)")
        .bind(seller_id)
        .bind(category.id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(category)
}

/// Update an existing category
pub async fn update_category(
    pool: &PgPool,
    id: i32,
    req: &CategoryRequest,
) -> Result<Option<Category>> {
    let category = sqlx::query_as::<_, Category>(
        "UPDATE categories
         SET name = $1, description = $2, parent_category_id = $3
         WHERE id = $4
         RETURNING *",
    )
    .bind(req.name.trim())
    .bind(&req.description)
    .bind(req.parent_category_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(category)
}

/// Products and subcategories still hanging off a category
pub async fn get_usage(pool: &PgPool, id: i32) -> Result<CategoryUsage> {
    let usage = sqlx::query_as::<_, CategoryUsage>(
        "SELECT
            (SELECT COUNT(*) FROM products WHERE category_id = $1) AS product_count,
            (SELECT COUNT(*) FROM categories WHERE parent_category_id = $1) AS subcategory_count",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(usage)
}

/// Delete a category
pub async fn delete_category(pool: &PgPool, id: i32) -> Result<bool> {
    let result = sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
