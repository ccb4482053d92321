use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    AppState,
    error::{AppError, Result},
    models::UserCategory,
    queries::{category_queries, user_category_queries},
    services::access,
    utils::{extractors::extract_principal, jwt::Claims},
};

pub async fn get_links(State(state): State<AppState>) -> Result<Json<Vec<UserCategory>>> {
    let links = user_category_queries::get_all(&state.db).await?;

    Ok(Json(links))
}

pub async fn get_my_links(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<UserCategory>>> {
    let principal = extract_principal(&claims)?;

    let links = user_category_queries::find_by_user(&state.db, principal.id).await?;

    Ok(Json(links))
}

pub async fn get_link(
    State(state): State<AppState>,
    Path((user_id, category_id)): Path<(Uuid, i32)>,
) -> Result<Json<UserCategory>> {
    let link = user_category_queries::find(&state.db, user_id, category_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User category not found".to_string()))?;

    Ok(Json(link))
}

pub async fn create_link(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UserCategory>,
) -> Result<(StatusCode, Json<UserCategory>)> {
    let principal = extract_principal(&claims)?;
    access::ensure_self(&principal, payload.user_id)?;

    category_queries::find_by_id(&state.db, payload.category_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

    if user_category_queries::find(&state.db, payload.user_id, payload.category_id)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "Seller is already linked to this category".to_string(),
        ));
    }

    let link =
        user_category_queries::create(&state.db, payload.user_id, payload.category_id).await?;

    Ok((StatusCode::CREATED, Json(link)))
}

/// The link has no fields beyond its key, so an update only re-checks ownership.
pub async fn update_link(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((user_id, category_id)): Path<(Uuid, i32)>,
    Json(payload): Json<UserCategory>,
) -> Result<Json<UserCategory>> {
    let principal = extract_principal(&claims)?;
    access::ensure_self(&principal, user_id)?;
    access::ensure_self(&principal, payload.user_id)?;

    if payload.category_id != category_id {
        return Err(AppError::Forbidden(
            "Category id does not match the link".to_string(),
        ));
    }

    let link = user_category_queries::find(&state.db, user_id, category_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User category not found".to_string()))?;

    Ok(Json(link))
}

pub async fn delete_link(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((user_id, category_id)): Path<(Uuid, i32)>,
) -> Result<StatusCode> {
    let principal = extract_principal(&claims)?;
    access::ensure_self(&principal, user_id)?;

    if !user_category_queries::delete(&state.db, user_id, category_id).await? {
        return Err(AppError::NotFound("User category not found".to_string()));
    }

    tracing::info!("Seller {} unlinked category {}", user_id, category_id);

    Ok(StatusCode::NO_CONTENT)
}
