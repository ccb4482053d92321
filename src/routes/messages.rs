use std::collections::HashMap;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    AppState,
    error::{AppError, Result},
    models::{ChatQuery, ConversationQuery, Message, MessageThread, SendMessageRequest},
    queries::{message_queries, product_queries, user_queries},
    services::{access, message_threads},
    utils::{extractors::extract_principal, jwt::Claims},
};

pub async fn get_conversation(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(user_id): Path<Uuid>,
    Query(params): Query<ConversationQuery>,
) -> Result<Json<Vec<Message>>> {
    let principal = extract_principal(&claims)?;

    let messages =
        message_queries::get_conversation(&state.db, principal.id, user_id, params.product_id)
            .await?;

    Ok(Json(messages))
}

pub async fn get_seller_threads(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<MessageThread>>> {
    let principal = extract_principal(&claims)?;

    let products: HashMap<i32, String> = product_queries::find_names_by_seller(&state.db, principal.id)
        .await?
        .into_iter()
        .collect();
    let messages = message_queries::find_product_messages_for(&state.db, principal.id).await?;

    Ok(Json(message_threads::seller_threads(
        principal.id,
        &messages,
        &products,
    )))
}

pub async fn get_chat(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<ChatQuery>,
) -> Result<Json<Vec<Message>>> {
    let principal = extract_principal(&claims)?;
    access::ensure_chat_participant(&principal, params.buyer_id, params.seller_id)?;

    let messages = message_queries::get_conversation(
        &state.db,
        params.buyer_id,
        params.seller_id,
        Some(params.product_id),
    )
    .await?;

    Ok(Json(messages))
}

pub async fn send_message(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<Message>)> {
    let principal = extract_principal(&claims)?;

    if payload.content.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Message cannot be empty".to_string(),
        ));
    }

    user_queries::find_by_id(&state.db, payload.receiver_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Receiver not found".to_string()))?;

    if let Some(product_id) = payload.product_id {
        product_queries::find_by_id(&state.db, product_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;
    }

    let message = message_queries::create_message(&state.db, principal.id, &payload).await?;

    Ok((StatusCode::CREATED, Json(message)))
}
