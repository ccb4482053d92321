use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;

use crate::{
    AppState,
    error::{AppError, Result},
    models::{ProductQuery, ProductRequest, ProductResponse},
    queries::{category_queries, product_queries},
    services::access,
    utils::{extractors::extract_principal, jwt::Claims},
};

pub async fn get_products(
    State(state): State<AppState>,
    Query(params): Query<ProductQuery>,
) -> Result<Json<Vec<ProductResponse>>> {
    let products = product_queries::list_products(&state.db, params.category_id, None).await?;

    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductResponse>> {
    let product = product_queries::find_details_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    Ok(Json(product))
}

pub async fn get_my_products(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<ProductResponse>>> {
    let principal = extract_principal(&claims)?;

    let products = product_queries::list_products(&state.db, None, Some(principal.id)).await?;

    Ok(Json(products))
}

pub async fn create_product(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<ProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>)> {
    let principal = extract_principal(&claims)?;

    validate_product(&payload)?;
    ensure_category_exists(&state, payload.category_id).await?;

    let product = product_queries::create_product(&state.db, principal.id, &payload).await?;

    tracing::info!("Seller {} listed product {}", principal.id, product.id);

    let details = product_queries::find_details_by_id(&state.db, product.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    Ok((StatusCode::CREATED, Json(details)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i32>,
    Json(payload): Json<ProductRequest>,
) -> Result<Json<ProductResponse>> {
    let principal = extract_principal(&claims)?;

    if payload.id.is_some_and(|body_id| body_id != id) {
        return Err(AppError::BadRequest("Product id mismatch".to_string()));
    }

    let product = product_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    access::ensure_product_owner(&principal, &product)?;

    validate_product(&payload)?;
    ensure_category_exists(&state, payload.category_id).await?;

    product_queries::update_product(&state.db, id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    let details = product_queries::find_details_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    Ok(Json(details))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    let principal = extract_principal(&claims)?;

    let product = product_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    access::ensure_product_owner(&principal, &product)?;

    if !product_queries::delete_product(&state.db, id).await? {
        return Err(AppError::NotFound("Product not found".to_string()));
    }

    tracing::info!("Seller {} deleted product {}", principal.id, id);

    Ok(StatusCode::NO_CONTENT)
}

async fn ensure_category_exists(state: &AppState, category_id: i32) -> Result<()> {
    category_queries::find_by_id(&state.db, category_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;
    Ok(())
}

fn validate_product(payload: &ProductRequest) -> Result<()> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Product name cannot be empty".to_string(),
        ));
    }

    if payload.price < Decimal::ZERO {
        return Err(AppError::BadRequest(
            "Price cannot be negative".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn request(name: &str, price: Decimal) -> ProductRequest {
        ProductRequest {
            id: None,
            name: name.to_string(),
            description: String::new(),
            price,
            category_id: 1,
            is_available: true,
            image_data: None,
        }
    }

    #[rstest]
    #[case("Lamp", Decimal::ZERO)]
    #[case("Lamp", Decimal::new(1999, 2))]
    fn accepts_free_and_priced_products(#[case] name: &str, #[case] price: Decimal) {
        assert!(validate_product(&request(name, price)).is_ok());
    }

    #[rstest]
    #[case("", Decimal::ONE)]
    #[case("Lamp", Decimal::new(-1, 2))]
    fn rejects_blank_name_or_negative_price(#[case] name: &str, #[case] price: Decimal) {
        assert!(matches!(
            validate_product(&request(name, price)),
            Err(AppError::BadRequest(_))
        ));
    }
}
