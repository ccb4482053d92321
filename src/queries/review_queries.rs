use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::Result,
    models::{Review, ReviewRequest},
};

pub async fn get_all(pool: &PgPool) -> Result<Vec<Review>> {
    let reviews = sqlx::query_as::<_, Review>("SELECT * FROM reviews ORDER BY created_at DESC, id DESC")
        .fetch_all(pool)
        .await?;

    Ok(reviews)
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Review>> {
    let review = sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(review)
}

pub async fn find_by_product(pool: &PgPool, product_id: i32) -> Result<Vec<Review>> {
    let reviews = sqlx::query_as::<_, Review>(
        "SELECT * FROM reviews WHERE product_id = $1 ORDER BY created_at DESC, id DESC",
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;

    Ok(reviews)
}

/// Reviews left on any product the seller owns
pub async fn find_by_seller(pool: &PgPool, seller_id: Uuid) -> Result<Vec<Review>> {
    let reviews = sqlx::query_as::<_, Review>(
        "SELECT r.* FROM reviews r
         INNER JOIN products p ON p.id = r.product_id
         WHERE p.seller_id = $1
         ORDER BY r.created_at DESC, r.id DESC",
    )
    .bind(seller_id)
    .fetch_all(pool)
    .await?;

    Ok(reviews)
}

pub async fn create_review(pool: &PgPool, buyer_id: Uuid, req: &ReviewRequest) -> Result<Review> {
    let review = sqlx::query_as::<_, Review>(
        "INSERT INTO reviews (product_id, buyer_id, text, rating)
         VALUES ($1, $2, $3, $4)
         RETURNING *",
    )
    .bind(req.product_id)
    .bind(buyer_id)
    .bind(req.text.trim())
    .bind(req.rating)
    .fetch_one(pool)
    .await?;

    Ok(review)
}

pub async fn set_reply(pool: &PgPool, id: i32, reply: &str) -> Result<Option<Review>> {
    let review = sqlx::query_as::<_, Review>(
        "UPDATE reviews SET seller_reply = $1 WHERE id = $2 RETURNING *",
    )
    .bind(reply)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(review)
}
