use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;

use crate::{
    AppState,
    error::{AppError, Result},
    models::{CheckoutRequest, OrderResponse},
    queries::order_queries,
    services::{access, order_view},
    utils::{extractors::extract_principal, jwt::Claims},
};

/// Turns the caller's cart into a Pending order.
///
/// An empty cart is refused with 409 and no order is created, so a repeated
/// or concurrent checkout never produces an order without items.
pub async fn checkout(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<OrderResponse>)> {
    let principal = extract_principal(&claims)?;

    validate_checkout(&payload)?;

    let (order, items) = order_queries::checkout(&state.db, principal.id, &payload)
        .await?
        .ok_or_else(|| AppError::InvalidState("Cart is empty".to_string()))?;

    tracing::info!(
        "Buyer {} placed order {} with {} item(s)",
        principal.id,
        order.id,
        items.len()
    );

    Ok((StatusCode::CREATED, Json(OrderResponse { order, items })))
}

pub async fn get_my_orders(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<OrderResponse>>> {
    let principal = extract_principal(&claims)?;

    let orders = order_queries::get_buyer_orders(&state.db, principal.id).await?;
    let order_ids: Vec<i32> = orders.iter().map(|o| o.id).collect();
    let items = order_queries::get_items_for_orders(&state.db, &order_ids).await?;

    Ok(Json(order_view::assemble_orders(orders, items)))
}

pub async fn get_seller_orders(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<OrderResponse>>> {
    let principal = extract_principal(&claims)?;

    let orders = order_queries::get_seller_orders(&state.db, principal.id).await?;
    let order_ids: Vec<i32> = orders.iter().map(|o| o.id).collect();
    let items = order_queries::get_items_for_orders(&state.db, &order_ids).await?;

    Ok(Json(order_view::seller_view(orders, items, principal.id)))
}

pub async fn get_order(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i32>,
) -> Result<Json<OrderResponse>> {
    let principal = extract_principal(&claims)?;

    let order = order_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

    access::ensure_order_buyer(&principal, &order)?;

    let items = order_queries::get_items_for_orders(&state.db, &[order.id]).await?;

    Ok(Json(OrderResponse { order, items }))
}

fn validate_checkout(payload: &CheckoutRequest) -> Result<()> {
    if payload.shipping_address.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Shipping address is required".to_string(),
        ));
    }

    if payload.total_amount < Decimal::ZERO {
        return Err(AppError::BadRequest(
            "Total amount cannot be negative".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(address: &str, total: Decimal) -> CheckoutRequest {
        CheckoutRequest {
            shipping_address: address.to_string(),
            total_amount: total,
        }
    }

    #[test]
    fn checkout_requires_an_address() {
        assert!(validate_checkout(&request("   ", Decimal::ONE)).is_err());
        assert!(validate_checkout(&request("1 Main St", Decimal::ONE)).is_ok());
    }

    #[test]
    fn checkout_rejects_negative_total() {
        let err = validate_checkout(&request("1 Main St", Decimal::NEGATIVE_ONE)).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(validate_checkout(&request("1 Main St", Decimal::ZERO)).is_ok());
    }
}
