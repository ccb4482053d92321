use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    AppState,
    error::{AppError, Result},
    models::{UpdateProfileRequest, UserResponse},
    queries::user_queries,
    services::access,
    utils::{extractors::extract_principal, jwt::Claims},
};

pub async fn get_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>> {
    let principal = extract_principal(&claims)?;
    access::ensure_self(&principal, id)?;

    let user = user_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>> {
    let principal = extract_principal(&claims)?;
    access::ensure_self(&principal, id)?;

    let user = super::account::update_profile(&state, id, &payload).await?;

    Ok(Json(user.into()))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let principal = extract_principal(&claims)?;
    access::ensure_self(&principal, id)?;

    if !user_queries::delete_user(&state.db, id).await? {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    tracing::info!("Deleted user {}", id);

    Ok(StatusCode::NO_CONTENT)
}
