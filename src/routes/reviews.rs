use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use crate::{
    AppState,
    error::{AppError, Result},
    models::{MAX_RATING, MIN_RATING, Review, ReviewRequest},
    queries::{order_item_queries, product_queries, review_queries},
    services::access,
    utils::{extractors::extract_principal, jwt::Claims},
};

pub async fn get_reviews(State(state): State<AppState>) -> Result<Json<Vec<Review>>> {
    let reviews = review_queries::get_all(&state.db).await?;

    Ok(Json(reviews))
}

pub async fn get_product_reviews(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> Result<Json<Vec<Review>>> {
    let reviews = review_queries::find_by_product(&state.db, product_id).await?;

    Ok(Json(reviews))
}

pub async fn can_review(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(product_id): Path<i32>,
) -> Result<Json<bool>> {
    let principal = extract_principal(&claims)?;

    let items =
        order_item_queries::find_for_buyer_and_product(&state.db, principal.id, product_id).await?;

    Ok(Json(access::can_review(principal.id, product_id, &items)))
}

pub async fn create_review(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<ReviewRequest>,
) -> Result<(StatusCode, Json<Review>)> {
    let principal = extract_principal(&claims)?;

    validate_review(&payload)?;

    product_queries::find_by_id(&state.db, payload.product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    let items =
        order_item_queries::find_for_buyer_and_product(&state.db, principal.id, payload.product_id)
            .await?;

    if !access::can_review(principal.id, payload.product_id, &items) {
        return Err(AppError::Forbidden(
            "You can only review products from finished orders".to_string(),
        ));
    }

    let review = review_queries::create_review(&state.db, principal.id, &payload).await?;

    tracing::info!(
        "Buyer {} reviewed product {} ({} stars)",
        principal.id,
        review.product_id,
        review.rating
    );

    Ok((StatusCode::CREATED, Json(review)))
}

pub async fn get_seller_reviews(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<Review>>> {
    let principal = extract_principal(&claims)?;

    let reviews = review_queries::find_by_seller(&state.db, principal.id).await?;

    Ok(Json(reviews))
}

/// Body is the reply text as a JSON string.
pub async fn reply_to_review(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i32>,
    Json(reply): Json<String>,
) -> Result<Json<Review>> {
    let principal = extract_principal(&claims)?;

    let reply = reply.trim();
    if reply.is_empty() {
        return Err(AppError::BadRequest("Reply cannot be empty".to_string()));
    }

    let review = review_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;

    let product = product_queries::find_by_id(&state.db, review.product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    access::ensure_product_owner(&principal, &product)?;

    let review = review_queries::set_reply(&state.db, id, reply)
        .await?
        .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;

    Ok(Json(review))
}

fn validate_review(payload: &ReviewRequest) -> Result<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&payload.rating) {
        return Err(AppError::BadRequest(format!(
            "Rating must be between {} and {}",
            MIN_RATING, MAX_RATING
        )));
    }

    if payload.text.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Review text cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(5, true)]
    #[case(6, false)]
    fn rating_bounds(#[case] rating: i32, #[case] valid: bool) {
        let req = ReviewRequest {
            product_id: 1,
            text: "Solid lamp".to_string(),
            rating,
        };
        assert_eq!(validate_review(&req).is_ok(), valid);
    }

    #[test]
    fn blank_text_is_rejected() {
        let req = ReviewRequest {
            product_id: 1,
            text: "  ".to_string(),
            rating: 4,
        };
        assert!(validate_review(&req).is_err());
    }
}
