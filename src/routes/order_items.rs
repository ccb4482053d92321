use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{AddToCartRequest, ItemSnapshot, OrderItem, OrderItemStatus},
    queries::{order_item_queries, product_queries},
    services::access,
    utils::{extractors::extract_principal, jwt::Claims},
};

pub async fn get_cart(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<OrderItem>>> {
    let principal = extract_principal(&claims)?;

    let items = order_item_queries::get_cart(&state.db, principal.id).await?;

    Ok(Json(items))
}

pub async fn add_to_cart(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<AddToCartRequest>,
) -> Result<(StatusCode, Json<OrderItem>)> {
    let principal = extract_principal(&claims)?;

    let product = product_queries::find_by_id(&state.db, payload.product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    if payload.quantity <= 0 {
        return Err(AppError::BadRequest(
            "Quantity must be greater than zero".to_string(),
        ));
    }

    if !product.is_available {
        return Err(AppError::BadRequest(
            "Product is not available".to_string(),
        ));
    }

    let snapshot = ItemSnapshot {
        product_id: product.id,
        quantity: payload.quantity,
        price: product.price,
        product_name: product.name,
        product_image: product.image_data,
        seller_id: product.seller_id,
    };

    let item = order_item_queries::add_to_cart(&state.db, principal.id, &snapshot).await?;

    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn remove_from_cart(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    let principal = extract_principal(&claims)?;

    let item = order_item_queries::find_by_id(&state.db, id).await?;
    access::ensure_cart_item_owner(&principal, item.as_ref())?;

    // A checkout may have claimed the item since it was read
    if !order_item_queries::remove_from_cart(&state.db, id, principal.id).await? {
        return Err(AppError::Forbidden("Item is not in your cart".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Body is the bare status name as a JSON string, e.g. `"Shipped"`.
pub async fn update_item_status(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i32>,
    Json(status): Json<String>,
) -> Result<Json<OrderItem>> {
    let principal = extract_principal(&claims)?;

    let item = order_item_queries::find_by_id(&state.db, id).await?;
    access::ensure_item_seller(&principal, item.as_ref())?;

    let status = status
        .parse::<OrderItemStatus>()
        .map_err(AppError::BadRequest)?;

    let (item, order_status) = order_item_queries::update_status(&state.db, id, status)
        .await?
        .ok_or_else(|| AppError::NotFound("Order item not found".to_string()))?;

    if let (Some(order_id), Some(order_status)) = (item.order_id, order_status) {
        tracing::info!(
            "Item {} set to {}; order {} is now {:?}",
            item.id,
            status.as_str(),
            order_id,
            order_status
        );
    }

    Ok(Json(item))
}
