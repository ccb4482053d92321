use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i32,
    pub product_id: i32,
    #[serde(rename = "userId")]
    pub buyer_id: Uuid,
    pub text: String,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "reply")]
    pub seller_reply: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub product_id: i32,
    pub text: String,
    pub rating: i32,
}
