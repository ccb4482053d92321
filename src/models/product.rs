use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category_id: i32,
    pub seller_id: Uuid,
    #[serde(rename = "creationDate")]
    pub created_at: DateTime<Utc>,
    pub is_available: bool,
    #[serde(with = "crate::utils::base64_bytes")]
    pub image_data: Option<Vec<u8>>,
}

/// Product row joined with its category name and seller username.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub product: Product,
    pub category_name: Option<String>,
    pub seller_username: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    #[serde(default)]
    pub id: Option<i32>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub category_id: i32,
    #[serde(default = "default_available")]
    pub is_available: bool,
    #[serde(with = "crate::utils::base64_bytes", default)]
    pub image_data: Option<Vec<u8>>,
}

fn default_available() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub category_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults_to_available_without_image() {
        let req: ProductRequest = serde_json::from_str(
            r#"{"name":"Lamp","price":19.99,"categoryId":3}"#,
        )
        .unwrap();

        assert!(req.is_available);
        assert!(req.image_data.is_none());
        assert_eq!(req.price, Decimal::new(1999, 2));
        assert_eq!(req.description, "");
    }

    #[test]
    fn response_flattens_product_fields() {
        let response = ProductResponse {
            product: Product {
                id: 7,
                name: "Lamp".to_string(),
                description: String::new(),
                price: Decimal::new(500, 2),
                category_id: 3,
                seller_id: Uuid::nil(),
                created_at: Utc::now(),
                is_available: true,
                image_data: None,
            },
            category_name: Some("Home".to_string()),
            seller_username: Some("seller".to_string()),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["categoryName"], "Home");
        assert_eq!(json["sellerUsername"], "seller");
        assert!(json["creationDate"].is_string());
        assert!(json["imageData"].is_null());
    }
}
