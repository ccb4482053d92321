use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub parent_category_id: Option<i32>,
}

/// Body for both create and update; `id` must match the path on update.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    #[serde(default)]
    pub id: Option<i32>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parent_category_id: Option<i32>,
}

#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct CategoryParent {
    pub id: i32,
    pub parent_category_id: Option<i32>,
}

/// Counts consulted before a category may be removed.
#[derive(Debug, Clone, Copy, Default, sqlx::FromRow)]
pub struct CategoryUsage {
    pub product_count: i64,
    pub subcategory_count: i64,
}
