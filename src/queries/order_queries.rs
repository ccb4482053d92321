use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::{
    error::Result,
    models::{CheckoutRequest, Order, OrderItem, OrderItemStatus, OrderStatus},
    services::order_status::aggregate_status,
};

const ORDER_SELECT: &str = "SELECT o.id, o.buyer_id, o.order_date, o.status, o.shipping_address,
            o.total_amount, u.username AS buyer_username, u.email AS buyer_email
     FROM orders o
     LEFT JOIN users u ON u.id = o.buyer_id";

/// Turns the buyer's cart into an order in a single transaction.
///
/// Checkouts of the same buyer are serialized with an advisory lock, so two
/// concurrent requests can never claim the same cart items. Returns `None`
/// and leaves no order behind when the cart is empty.
pub async fn checkout(
    pool: &PgPool,
    buyer_id: Uuid,
    req: &CheckoutRequest,
) -> Result<Option<(Order, Vec<OrderItem>)>> {
    let mut tx = pool.begin().await?;

    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
        .bind(buyer_id.to_string())
        .execute(&mut *tx)
        .await?;

    let order_id: i32 = sqlx::query_scalar(
        "INSERT INTO orders (buyer_id, status, shipping_address, total_amount)
         VALUES ($1, 'pending', $2, $3)
         RETURNING id",
    )
    .bind(buyer_id)
    .bind(req.shipping_address.trim())
    .bind(req.total_amount)
    .fetch_one(&mut *tx)
    .await?;

    // Seller is re-read from the product; items of deleted products keep their snapshot
    let items = sqlx::query_as::<_, OrderItem>(
        "UPDATE order_items oi
         SET order_id = $1,
             status = 'waiting',
             seller_id = COALESCE(
                 (SELECT p.seller_id FROM products p WHERE p.id = oi.product_id),
                 oi.seller_id
             )
         WHERE oi.user_id = $2 AND oi.order_id IS NULL
         RETURNING oi.*",
    )
    .bind(order_id)
    .bind(buyer_id)
    .fetch_all(&mut *tx)
    .await?;

    if items.is_empty() {
        tx.rollback().await?;
        return Ok(None);
    }

    let order = sqlx::query_as::<_, Order>(&format!("{} WHERE o.id = $1", ORDER_SELECT))
        .bind(order_id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(Some((order, items)))
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(&format!("{} WHERE o.id = $1", ORDER_SELECT))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(order)
}

pub async fn get_buyer_orders(pool: &PgPool, buyer_id: Uuid) -> Result<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(&format!(
        "{} WHERE o.buyer_id = $1 ORDER BY o.order_date DESC, o.id DESC",
        ORDER_SELECT
    ))
    .bind(buyer_id)
    .fetch_all(pool)
    .await?;

    Ok(orders)
}

/// Orders holding at least one item sold by `seller_id`
pub async fn get_seller_orders(pool: &PgPool, seller_id: Uuid) -> Result<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(&format!(
        "{} WHERE EXISTS (
             SELECT 1 FROM order_items oi WHERE oi.order_id = o.id AND oi.seller_id = $1
         )
         ORDER BY o.order_date DESC, o.id DESC",
        ORDER_SELECT
    ))
    .bind(seller_id)
    .fetch_all(pool)
    .await?;

    Ok(orders)
}

pub async fn get_items_for_orders(pool: &PgPool, order_ids: &[i32]) -> Result<Vec<OrderItem>> {
    if order_ids.is_empty() {
        return Ok(Vec::new());
    }

    let items = sqlx::query_as::<_, OrderItem>(
        "SELECT * FROM order_items WHERE order_id = ANY($1) ORDER BY id ASC",
    )
    .bind(order_ids)
    .fetch_all(pool)
    .await?;

    Ok(items)
}

/// Recomputes and stores the aggregate status of an order.
///
/// The caller must hold the order row lock on `conn`.
pub async fn recalculate_status(
    conn: &mut PgConnection,
    order_id: i32,
) -> Result<Option<OrderStatus>> {
    let statuses: Vec<OrderItemStatus> =
        sqlx::query_scalar("SELECT status FROM order_items WHERE order_id = $1")
            .bind(order_id)
            .fetch_all(&mut *conn)
            .await?;

    let Some(status) = aggregate_status(statuses) else {
        return Ok(None);
    };

    sqlx::query("UPDATE orders SET status = $1 WHERE id = $2")
        .bind(status)
        .bind(order_id)
        .execute(&mut *conn)
        .await?;

    Ok(Some(status))
}
