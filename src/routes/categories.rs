use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{Category, CategoryRequest},
    queries::{category_queries, user_category_queries},
    services::{access, category_tree},
    utils::{extractors::extract_principal, jwt::Claims},
};

pub async fn get_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = category_queries::get_all(&state.db).await?;

    Ok(Json(categories))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Category>> {
    let category = category_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

    Ok(Json(category))
}

pub async fn get_subcategories(
    State(state): State<AppState>,
    Path(parent_id): Path<i32>,
) -> Result<Json<Vec<Category>>> {
    let categories = category_queries::find_by_parent(&state.db, parent_id).await?;

    Ok(Json(categories))
}

pub async fn get_seller_categories(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<Category>>> {
    let principal = extract_principal(&claims)?;

    let categories = category_queries::find_by_seller(&state.db, principal.id).await?;

    Ok(Json(categories))
}

pub async fn create_category(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CategoryRequest>,
) -> Result<(StatusCode, Json<Category>)> {
    let principal = extract_principal(&claims)?;

    validate_name(&payload)?;

    if let Some(parent_id) = payload.parent_category_id {
        ensure_parent_exists(&state, parent_id).await?;
    }

    let category = category_queries::create_for_seller(&state.db, principal.id, &payload).await?;

    tracing::info!(
        "Seller {} created category {} ({})",
        principal.id,
        category.id,
        category.name
    );

    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update_category(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i32>,
    Json(payload): Json<CategoryRequest>,
) -> Result<Json<Category>> {
    let principal = extract_principal(&claims)?;

    if payload.id.is_some_and(|body_id| body_id != id) {
        return Err(AppError::BadRequest("Category id mismatch".to_string()));
    }

    validate_name(&payload)?;

    category_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

    let links = user_category_queries::find_by_user(&state.db, principal.id).await?;
    access::ensure_category_link(&principal, &links, id)?;

    if let Some(parent_id) = payload.parent_category_id {
        ensure_parent_exists(&state, parent_id).await?;

        let parents = category_queries::get_parent_map(&state.db).await?;
        if category_tree::would_create_cycle(id, Some(parent_id), &parents) {
            return Err(AppError::InvalidState(
                "A category cannot be placed under itself or its descendants".to_string(),
            ));
        }
    }

    let category = category_queries::update_category(&state.db, id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

    Ok(Json(category))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    let principal = extract_principal(&claims)?;

    category_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

    if state.policy.enforce_category_delete_ownership {
        let links = user_category_queries::find_by_user(&state.db, principal.id).await?;
        access::ensure_category_link(&principal, &links, id)?;
    }

    let usage = category_queries::get_usage(&state.db, id).await?;
    category_tree::ensure_deletable(usage)?;

    if !category_queries::delete_category(&state.db, id).await? {
        return Err(AppError::NotFound("Category not found".to_string()));
    }

    tracing::info!("Seller {} deleted category {}", principal.id, id);

    Ok(StatusCode::NO_CONTENT)
}

async fn ensure_parent_exists(state: &AppState, parent_id: i32) -> Result<()> {
    category_queries::find_by_id(&state.db, parent_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Parent category not found".to_string()))?;
    Ok(())
}

fn validate_name(payload: &CategoryRequest) -> Result<()> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Category name cannot be empty".to_string(),
        ));
    }
    Ok(())
}
