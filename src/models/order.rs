use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::OrderItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_status", rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Canceled,
    Processing,
}

// DB models

/// Order row joined with the buyer's username and email.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i32,
    pub buyer_id: Uuid,
    pub order_date: DateTime<Utc>,
    #[serde(rename = "orderStatus")]
    pub status: OrderStatus,
    pub shipping_address: String,
    pub total_amount: Decimal,
    pub buyer_username: Option<String>,
    pub buyer_email: Option<String>,
}

// Request types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub shipping_address: String,
    pub total_amount: Decimal,
}

// Response types

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_exposes_status_and_items() {
        let response = OrderResponse {
            order: Order {
                id: 11,
                buyer_id: Uuid::nil(),
                order_date: Utc::now(),
                status: OrderStatus::Processing,
                shipping_address: "1 Main St".to_string(),
                total_amount: Decimal::new(4250, 2),
                buyer_username: Some("buyer".to_string()),
                buyer_email: None,
            },
            items: vec![],
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["orderStatus"], "Processing");
        assert_eq!(json["shippingAddress"], "1 Main St");
        assert_eq!(json["buyerUsername"], "buyer");
        assert_eq!(json["items"], serde_json::json!([]));
    }
}
