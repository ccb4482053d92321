use axum::{Extension, Json, extract::State, http::StatusCode};
use uuid::Uuid;

use crate::{
    AppState,
    error::{AppError, Result},
    models::{
        AuthResponse, ChangePasswordRequest, LoginRequest, MessageResponse, RegisterRequest,
        UpdateProfileRequest, User, UserResponse,
    },
    queries::user_queries,
    utils::{
        extractors::extract_principal,
        jwt::{self, Claims},
    },
};

const MIN_PASSWORD_LEN: usize = 8;

pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    validate_registration(&payload)?;

    let username = payload.username.trim();
    let email = payload.email.trim();

    if user_queries::find_by_username(&state.db, username)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Username already taken".to_string()));
    }

    if user_queries::find_by_email(&state.db, email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = hash_password(&payload.password)?;

    let user =
        user_queries::create_user(&state.db, username, email, &password_hash, payload.role).await?;

    let token = jwt::generate_token(&state.auth, &user)?;

    tracing::info!("Registered {} {} ({})", user.role, user.username, user.id);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}

pub async fn login_user(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let user = user_queries::find_by_username(&state.db, payload.username.trim())
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid username or password".to_string()))?;

    let is_valid = bcrypt::verify(&payload.password, &user.password)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {}", e)))?;

    if !is_valid {
        return Err(AppError::Unauthorized(
            "Invalid username or password".to_string(),
        ));
    }

    let token = jwt::generate_token(&state.auth, &user)?;

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

pub async fn logout_user(Extension(claims): Extension<Claims>) -> Result<Json<MessageResponse>> {
    let principal = extract_principal(&claims)?;

    tracing::info!("User {} logged out", principal.id);

    Ok(Json(MessageResponse::new("Logged out")))
}

pub async fn get_me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<UserResponse>> {
    let principal = extract_principal(&claims)?;

    let user = user_queries::find_by_id(&state.db, principal.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}

pub async fn update_me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>> {
    let principal = extract_principal(&claims)?;

    let user = update_profile(&state, principal.id, &payload).await?;

    Ok(Json(user.into()))
}

/// Applies a profile change for `user_id`, refusing names or emails held by
/// another account.
pub(super) async fn update_profile(
    state: &AppState,
    user_id: Uuid,
    payload: &UpdateProfileRequest,
) -> Result<User> {
    let username = payload
        .user_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty());
    let email = payload
        .email
        .as_deref()
        .map(str::trim)
        .filter(|email| !email.is_empty());

    if let Some(email) = email {
        validate_email(email)?;
    }

    if let Some(username) = username {
        if let Some(existing) = user_queries::find_by_username(&state.db, username).await? {
            if existing.id != user_id {
                return Err(AppError::Conflict("Username already taken".to_string()));
            }
        }
    }

    if let Some(email) = email {
        if let Some(existing) = user_queries::find_by_email(&state.db, email).await? {
            if existing.id != user_id {
                return Err(AppError::Conflict("Email already registered".to_string()));
            }
        }
    }

    user_queries::update_profile(&state.db, user_id, username, email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

pub async fn change_password(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>> {
    let principal = extract_principal(&claims)?;

    validate_password(&payload.new_password)?;

    let user = user_queries::find_by_id(&state.db, principal.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let is_valid = bcrypt::verify(&payload.current_password, &user.password)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {}", e)))?;

    if !is_valid {
        return Err(AppError::BadRequest(
            "Current password is incorrect".to_string(),
        ));
    }

    let password_hash = hash_password(&payload.new_password)?;
    user_queries::update_password(&state.db, user.id, &password_hash).await?;

    tracing::info!("User {} changed password", user.id);

    Ok(Json(MessageResponse::new("Password changed")))
}

fn hash_password(password: &str) -> Result<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))
}

fn validate_registration(payload: &RegisterRequest) -> Result<()> {
    if payload.username.trim().is_empty() {
        return Err(AppError::BadRequest("Username cannot be empty".to_string()));
    }

    validate_email(payload.email.trim())?;
    validate_password(&payload.password)
}

fn validate_email(email: &str) -> Result<()> {
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;
    use rstest::rstest;

    fn request(username: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: UserRole::Buyer,
        }
    }

    #[test]
    fn accepts_valid_registration() {
        assert!(validate_registration(&request("ana", "ana@example.com", "longenough")).is_ok());
    }

    #[rstest]
    #[case("  ", "ana@example.com", "longenough")]
    #[case("ana", "not-an-email", "longenough")]
    #[case("ana", "", "longenough")]
    #[case("ana", "ana@example.com", "short")]
    fn rejects_invalid_registration(
        #[case] username: &str,
        #[case] email: &str,
        #[case] password: &str,
    ) {
        let err = validate_registration(&request(username, email, password)).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn password_length_counts_characters() {
        assert!(validate_password("ñññññññ").is_err());
        assert!(validate_password("ññññññññ").is_ok());
    }
}
