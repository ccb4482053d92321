pub mod access;
pub mod category_tree;
pub mod message_threads;
pub mod order_status;
pub mod order_view;
