use std::collections::HashMap;

use uuid::Uuid;

use crate::models::{Order, OrderItem, OrderResponse};

/// Attaches items to their orders, keeping the order sequence of `orders`.
pub fn assemble_orders(orders: Vec<Order>, items: Vec<OrderItem>) -> Vec<OrderResponse> {
    let mut items_map: HashMap<i32, Vec<OrderItem>> = HashMap::new();
    for item in items {
        if let Some(order_id) = item.order_id {
            items_map.entry(order_id).or_default().push(item);
        }
    }

    orders
        .into_iter()
        .map(|order| {
            let items = items_map.remove(&order.id).unwrap_or_default();
            OrderResponse { order, items }
        })
        .collect()
}

/// Seller-scoped view: only orders holding at least one of the seller's
/// items, each pruned to those items.
pub fn seller_view(
    orders: Vec<Order>,
    items: Vec<OrderItem>,
    seller_id: Uuid,
) -> Vec<OrderResponse> {
    let own_items = items
        .into_iter()
        .filter(|item| item.seller_id == seller_id)
        .collect();

    assemble_orders(orders, own_items)
        .into_iter()
        .filter(|order| !order.items.is_empty())
        .collect()
}
