use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{
    AppState,
    error::AppError,
    models::UserRole,
    services::access,
    utils::{
        extractors::extract_principal,
        jwt::{self, Claims},
    },
};

fn bearer_claims(state: &AppState, req: &Request) -> Result<Claims, AppError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid token format".to_string()))?;

    jwt::verify_token(&state.auth, token)
}

/// Accepts any valid token and exposes its claims to the handler.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = bearer_claims(&state, &req)?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

pub async fn buyer_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    role_gate(&state, req, next, UserRole::Buyer).await
}

pub async fn seller_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    role_gate(&state, req, next, UserRole::Seller).await
}

async fn role_gate(
    state: &AppState,
    mut req: Request,
    next: Next,
    role: UserRole,
) -> Result<Response, AppError> {
    let claims = bearer_claims(state, &req)?;
    let principal = extract_principal(&claims)?;

    access::require_role(&principal, role)?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
