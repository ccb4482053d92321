use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_item_status", rename_all = "lowercase")]
pub enum OrderItemStatus {
    Waiting,
    Confirmed,
    Shipped,
    Completed,
    Canceled,
}

impl OrderItemStatus {
    pub const ALL: [OrderItemStatus; 5] = [
        OrderItemStatus::Waiting,
        OrderItemStatus::Confirmed,
        OrderItemStatus::Shipped,
        OrderItemStatus::Completed,
        OrderItemStatus::Canceled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderItemStatus::Waiting => "Waiting",
            OrderItemStatus::Confirmed => "Confirmed",
            OrderItemStatus::Shipped => "Shipped",
            OrderItemStatus::Completed => "Completed",
            OrderItemStatus::Canceled => "Canceled",
        }
    }
}

impl FromStr for OrderItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown order item status: {}", wanted))
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: i32,
    pub order_id: Option<i32>,
    pub product_id: i32,
    pub quantity: i32,
    pub price: Decimal,
    pub product_name: String,
    #[serde(with = "crate::utils::base64_bytes")]
    pub product_image: Option<Vec<u8>>,
    pub user_id: Uuid,
    pub seller_id: Uuid,
    #[serde(rename = "orderItemStatus")]
    pub status: OrderItemStatus,
}

impl OrderItem {
    pub fn in_cart(&self) -> bool {
        self.order_id.is_none()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: i32,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

/// Values copied from the product when an item is put in the cart.
#[derive(Debug, Clone)]
pub struct ItemSnapshot {
    pub product_id: i32,
    pub quantity: i32,
    pub price: Decimal,
    pub product_name: String,
    pub product_image: Option<Vec<u8>>,
    pub seller_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Shipped", OrderItemStatus::Shipped)]
    #[case("shipped", OrderItemStatus::Shipped)]
    #[case(" COMPLETED ", OrderItemStatus::Completed)]
    #[case("canceled", OrderItemStatus::Canceled)]
    #[case("waiting", OrderItemStatus::Waiting)]
    fn parses_status_case_insensitively(#[case] raw: &str, #[case] expected: OrderItemStatus) {
        assert_eq!(raw.parse::<OrderItemStatus>().unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("Cancelled")]
    #[case("Delivered")]
    #[case("3")]
    fn rejects_unknown_status(#[case] raw: &str) {
        assert!(raw.parse::<OrderItemStatus>().is_err());
    }

    #[test]
    fn serializes_status_under_client_field_name() {
        let item = OrderItem {
            id: 1,
            order_id: None,
            product_id: 2,
            quantity: 3,
            price: Decimal::new(1000, 2),
            product_name: "Mug".to_string(),
            product_image: None,
            user_id: Uuid::nil(),
            seller_id: Uuid::nil(),
            status: OrderItemStatus::Waiting,
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["orderItemStatus"], "Waiting");
        assert!(json["orderId"].is_null());
        assert!(item.in_cart());
    }

    #[test]
    fn add_to_cart_defaults_quantity_to_one() {
        let req: AddToCartRequest = serde_json::from_str(r#"{"productId":4}"#).unwrap();
        assert_eq!(req.quantity, 1);
    }
}
