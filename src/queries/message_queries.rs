use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::Result,
    models::{Message, SendMessageRequest},
};

const MESSAGE_SELECT: &str = "SELECT m.*, p.name AS product_name
     FROM messages m
     LEFT JOIN products p ON p.id = m.product_id";

/// Messages exchanged between two users, oldest first, optionally scoped to a product
pub async fn get_conversation(
    pool: &PgPool,
    user_a: Uuid,
    user_b: Uuid,
    product_id: Option<i32>,
) -> Result<Vec<Message>> {
    let messages = sqlx::query_as::<_, Message>(&format!(
        "{} WHERE ((m.sender_id = $1 AND m.receiver_id = $2)
                OR (m.sender_id = $2 AND m.receiver_id = $1))
           AND ($3::int IS NULL OR m.product_id = $3)
         ORDER BY m.sent_at ASC, m.id ASC",
        MESSAGE_SELECT
    ))
    .bind(user_a)
    .bind(user_b)
    .bind(product_id)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}

/// Every product-scoped message sent or received by the user
pub async fn find_product_messages_for(pool: &PgPool, user_id: Uuid) -> Result<Vec<Message>> {
    let messages = sqlx::query_as::<_, Message>(&format!(
        "{} WHERE (m.sender_id = $1 OR m.receiver_id = $1) AND m.product_id IS NOT NULL
         ORDER BY m.sent_at ASC, m.id ASC",
        MESSAGE_SELECT
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}

pub async fn create_message(
    pool: &PgPool,
    sender_id: Uuid,
    req: &SendMessageRequest,
) -> Result<Message> {
    let message = sqlx::query_as::<_, Message>(
        "WITH inserted AS (
             INSERT INTO messages (sender_id, receiver_id, content, product_id)
             VALUES ($1, $2, $3, $4)
             RETURNING *
         )
         SELECT i.*, p.name AS product_name
         FROM inserted i
         LEFT JOIN products p ON p.id = i.product_id",
    )
    .bind(sender_id)
    .bind(req.receiver_id)
    .bind(req.content.trim())
    .bind(req.product_id)
    .fetch_one(pool)
    .await?;

    Ok(message)
}
