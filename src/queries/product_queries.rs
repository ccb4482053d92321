use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    error::Result,
    models::{Product, ProductRequest, ProductResponse},
};

const PRODUCT_DETAILS: &str = "SELECT p.*, c.name AS category_name, u.username AS seller_username
     FROM products p
     LEFT JOIN categories c ON c.id = p.category_id
     LEFT JOIN users u ON u.id = p.seller_id";

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(product)
}

pub async fn find_details_by_id(pool: &PgPool, id: i32) -> Result<Option<ProductResponse>> {
    let product =
        sqlx::query_as::<_, ProductResponse>(&format!("{} WHERE p.id = $1", PRODUCT_DETAILS))
            .bind(id)
            .fetch_optional(pool)
            .await?;

    Ok(product)
}

pub async fn list_products(
    pool: &PgPool,
    category_id: Option<i32>,
    seller_id: Option<Uuid>,
) -> Result<Vec<ProductResponse>> {
    let mut query: QueryBuilder<Postgres> = QueryBuilder::new(PRODUCT_DETAILS);
    query.push(" WHERE 1=1");

    if let Some(category_id) = category_id {
        query.push(" AND p.category_id = ");
        query.push_bind(category_id);
    }

    if let Some(seller_id) = seller_id {
        query.push(" AND p.seller_id = ");
        query.push_bind(seller_id);
    }

    query.push(" ORDER BY p.created_at DESC, p.id DESC");

    let products = query
        .build_query_as::<ProductResponse>()
        .fetch_all(pool)
        .await?;

    Ok(products)
}

/// Id and name of every product a seller owns
pub async fn find_names_by_seller(pool: &PgPool, seller_id: Uuid) -> Result<Vec<(i32, String)>> {
    let rows = sqlx::query_as::<_, (i32, String)>("SELECT id, name FROM products WHERE seller_id = $1")
        .bind(seller_id)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

pub async fn create_product(pool: &PgPool, seller_id: Uuid, req: &ProductRequest) -> Result<Product> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products (
            name, description, price, category_id, seller_id, is_available, image_data
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(req.name.trim())
    .bind(&req.description)
    .bind(req.price)
    .bind(req.category_id)
    .bind(seller_id)
    .bind(req.is_available)
    .bind(&req.image_data)
    .fetch_one(pool)
    .await?;

    Ok(product)
}

/// Replaces the editable fields; an omitted image keeps the stored one.
pub async fn update_product(pool: &PgPool, id: i32, req: &ProductRequest) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        UPDATE products
        SET
            name = $1,
            description = $2,
            price = $3,
            category_id = $4,
            is_available = $5,
            image_data = COALESCE($6, image_data)
        WHERE id = $7
        RETURNING *
        "#,
    )
    .bind(req.name.trim())
    .bind(&req.description)
    .bind(req.price)
    .bind(req.category_id)
    .bind(req.is_available)
    .bind(&req.image_data)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(product)
}

pub async fn delete_product(pool: &PgPool, id: i32) -> Result<bool> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
