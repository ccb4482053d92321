pub mod category_queries;
pub mod message_queries;
pub mod order_item_queries;
pub mod order_queries;
pub mod product_queries;
pub mod review_queries;
pub mod user_category_queries;
pub mod user_queries;
