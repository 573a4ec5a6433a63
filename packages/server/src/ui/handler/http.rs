//! HTTP API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::domain::TopicId;
use crate::infrastructure::dto::http::{ActiveRoomDto, ArchiveResultDto, MessagesResponseDto};
use crate::infrastructure::dto::websocket::MessageDto;

use super::super::state::AppState;

const DEFAULT_MESSAGES_LIMIT: usize = 50;

pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

pub async fn get_active_rooms(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ActiveRoomDto>>, StatusCode> {
    let views = state.active_rooms_usecase.execute().await.map_err(|e| {
        tracing::error!("Active room listing failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(views.iter().map(ActiveRoomDto::from).collect()))
}

#[derive(Debug, Deserialize)]
pub struct MessagesQuery {
    pub limit: Option<usize>,
}

pub async fn get_room_messages(
    State(state): State<Arc<AppState>>,
    Path(topic_id): Path<String>,
    Query(query): Query<MessagesQuery>,
) -> Result<Json<MessagesResponseDto>, StatusCode> {
    let topic_id = TopicId::new(topic_id).map_err(|_| StatusCode::BAD_REQUEST)?;
    let limit = query.limit.unwrap_or(DEFAULT_MESSAGES_LIMIT);

    let messages = state
        .room_store
        .recent_messages(&topic_id, limit)
        .await
        .map_err(|e| {
            tracing::error!("Message listing for '{}' failed: {}", topic_id, e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(MessagesResponseDto {
        topic_id: topic_id.into_string(),
        messages: messages.iter().map(MessageDto::from).collect(),
    }))
}

pub async fn archive_inactive(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ArchiveResultDto>, StatusCode> {
    let archived = state.archive_inactive_usecase.execute().await.map_err(|e| {
        tracing::error!("Archiving inactive rooms failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(ArchiveResultDto { archived }))
}
