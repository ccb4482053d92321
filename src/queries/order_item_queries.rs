use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::Result,
    models::{ItemSnapshot, OrderItem, OrderItemStatus, OrderStatus},
    queries::order_queries,
};

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<OrderItem>> {
    let item = sqlx::query_as::<_, OrderItem>("SELECT * FROM order_items WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(item)
}

/// Puts a product snapshot into the buyer's cart
pub async fn add_to_cart(pool: &PgPool, buyer_id: Uuid, item: &ItemSnapshot) -> Result<OrderItem> {
    let item = sqlx::query_as::<_, OrderItem>(
        r#"
        INSERT INTO order_items (
            order_id, product_id, quantity, price, product_name, product_image,
            user_id, seller_id, status
        )
        VALUES (NULL, $1, $2, $3, $4, $5, $6, $7, 'waiting')
        RETURNING *
        "#,
    )
    .bind(item.product_id)
    .bind(item.quantity)
    .bind(item.price)
    .bind(&item.product_name)
    .bind(&item.product_image)
    .bind(buyer_id)
    .bind(item.seller_id)
    .fetch_one(pool)
    .await?;

    Ok(item)
}

pub async fn get_cart(pool: &PgPool, buyer_id: Uuid) -> Result<Vec<OrderItem>> {
    let items = sqlx::query_as::<_, OrderItem>(
        "SELECT * FROM order_items WHERE user_id = $1 AND order_id IS NULL ORDER BY id ASC",
    )
    .bind(buyer_id)
    .fetch_all(pool)
    .await?;

    Ok(items)
}

/// Deletes a cart item only while it is still unordered.
///
/// Returns false when a concurrent checkout claimed the item first.
pub async fn remove_from_cart(pool: &PgPool, id: i32, buyer_id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        "DELETE FROM order_items WHERE id = $1 AND user_id = $2 AND order_id IS NULL",
    )
    .bind(id)
    .bind(buyer_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Items a buyer holds for a product, ordered or not
pub async fn find_for_buyer_and_product(
    pool: &PgPool,
    buyer_id: Uuid,
    product_id: i32,
) -> Result<Vec<OrderItem>> {
    let items = sqlx::query_as::<_, OrderItem>(
        "SELECT * FROM order_items WHERE user_id = $1 AND product_id = $2",
    )
    .bind(buyer_id)
    .bind(product_id)
    .fetch_all(pool)
    .await?;

    Ok(items)
}

/// Sets an item's status and, for ordered items, refreshes the order status
/// in the same transaction.
pub async fn update_status(
    pool: &PgPool,
    id: i32,
    status: OrderItemStatus,
) -> Result<Option<(OrderItem, Option<OrderStatus>)>> {
    let mut tx = pool.begin().await?;

    let item = sqlx::query_as::<_, OrderItem>(
        "UPDATE order_items SET status = $1 WHERE id = $2 RETURNING *",
    )
    .bind(status)
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(item) = item else {
        tx.rollback().await?;
        return Ok(None);
    };

    let order_status = match item.order_id {
        Some(order_id) => {
            // Serializes recomputation across sellers updating items of one order
            sqlx::query("SELECT id FROM orders WHERE id = $1 FOR UPDATE")
                .bind(order_id)
                .execute(&mut *tx)
                .await?;

            order_queries::recalculate_status(&mut *tx, order_id).await?
        }
        None => None,
    };

    tx.commit().await?;
    Ok(Some((item, order_status)))
}
