//! WebSocket connection handler and event dispatch.
//!
//! Identity binding happens before the upgrade, so a bad durable id is
//! refused with a plain HTTP status instead of a doomed socket. After the
//! upgrade the connection is two tasks: one reads client frames and
//! dispatches them, one drains the pusher channel into the socket. Either
//! side ending tears down the other, and cleanup runs unconditionally.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::domain::Identity;
use crate::infrastructure::dto::websocket::{ClientEvent, MemberDto, MessageDto, ServerEvent};
use crate::usecase::{GatewayError, PresenceView};

use super::super::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub user_id: Option<String>,
}

fn encode(event: &ServerEvent) -> String {
    serde_json::to_string(event).expect("server event serializes")
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let identity = match state.identity_binder.bind(query.user_id.as_deref()).await {
        Ok(identity) => identity,
        Err(GatewayError::IdentityNotFound(user_id)) => {
            tracing::warn!("Rejecting connection for unknown user '{}'", user_id);
            return Err(StatusCode::UNAUTHORIZED);
        }
        Err(e) => {
            tracing::error!("Identity binding failed: {}", e);
            return Err(StatusCode::SERVICE_UNAVAILABLE);
        }
    };

    if state.message_pusher.is_registered(&identity.id).await {
        tracing::warn!(
            "Identity '{}' is already connected. Rejecting connection.",
            identity.id
        );
        return Err(StatusCode::CONFLICT);
    }

    let (tx, rx) = mpsc::unbounded_channel();
    state
        .message_pusher
        .register_client(identity.clone(), tx)
        .await;

    tracing::info!(
        "Client '{}' connected as '{}'",
        identity.id,
        identity.display_name
    );

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, identity, rx)))
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    identity: Identity,
    mut rx: mpsc::UnboundedReceiver<String>,
) {
    let (mut sender, mut receiver) = socket.split();

    let recv_state = state.clone();
    let recv_identity = identity.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error for '{}': {}", recv_identity.id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    if let Err(e) = dispatch(&recv_state, Some(&recv_identity), &text).await {
                        tracing::warn!("Event from '{}' failed: {}", recv_identity.id, e);
                        let error_event = ServerEvent::Error {
                            message: e.user_message(),
                        };
                        if let Err(push_err) = recv_state
                            .message_pusher
                            .push_to(&recv_identity.id, &encode(&error_event))
                            .await
                        {
                            tracing::warn!(
                                "Failed to push error to '{}': {}",
                                recv_identity.id,
                                push_err
                            );
                        }
                    }
                }
                Message::Close(_) => {
                    tracing::info!("Client '{}' requested close", recv_identity.id);
                    break;
                }
                _ => {}
            }
        }
    });

    let mut send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    // if any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // cleanup runs on every exit path, including abrupt socket loss
    if let Some(vacated) = state.disconnect_usecase.execute(&identity).await {
        broadcast_presence(&state, &vacated).await;
    }
}

/// Route one client frame. Public to the crate so the protocol can be
/// exercised without a live socket.
pub(crate) async fn dispatch(
    state: &AppState,
    identity: Option<&Identity>,
    raw: &str,
) -> Result<(), GatewayError> {
    let identity = identity.ok_or(GatewayError::NotAuthenticated)?;

    let event = serde_json::from_str::<ClientEvent>(raw)
        .map_err(|e| GatewayError::Validation(format!("unrecognized event: {}", e)))?;

    match event {
        ClientEvent::JoinRoom { topic_id } => handle_join(state, identity, &topic_id).await,
        ClientEvent::SendMessage { topic_id, content } => {
            handle_send(state, identity, &topic_id, &content).await
        }
    }
}

async fn handle_join(
    state: &AppState,
    identity: &Identity,
    raw_topic: &str,
) -> Result<(), GatewayError> {
    let outcome = state.join_room_usecase.execute(identity, raw_topic).await?;
    let topic = outcome.topic_id.as_str().to_string();

    // the joiner sees the backlog before any presence event
    let history = ServerEvent::MessageHistory {
        topic_id: topic.clone(),
        messages: outcome.history.iter().map(MessageDto::from).collect(),
    };
    state
        .message_pusher
        .push_to(&identity.id, &encode(&history))
        .await
        .map_err(|e| GatewayError::External(e.to_string()))?;

    broadcast_presence(
        state,
        &PresenceView {
            topic_id: outcome.topic_id,
            members: outcome.members,
            count: outcome.count,
        },
    )
    .await;

    if let Some(vacated) = outcome.vacated {
        broadcast_presence(state, &vacated).await;
    }

    Ok(())
}

async fn handle_send(
    state: &AppState,
    identity: &Identity,
    raw_topic: &str,
    raw_content: &str,
) -> Result<(), GatewayError> {
    let outcome = state
        .send_message_usecase
        .execute(identity, raw_topic, raw_content)
        .await?;

    let event = ServerEvent::NewMessage {
        topic_id: outcome.topic_id.as_str().to_string(),
        message: MessageDto::from(&outcome.message),
    };
    if let Err(e) = state
        .message_pusher
        .broadcast(&outcome.targets, &encode(&event))
        .await
    {
        tracing::warn!("Broadcast of new message failed: {}", e);
    }

    Ok(())
}

/// Emit the member list and occupancy of a room to its current members.
async fn broadcast_presence(state: &AppState, view: &PresenceView) {
    let topic = view.topic_id.as_str().to_string();
    let targets: Vec<String> = view.members.iter().map(|m| m.id.clone()).collect();

    let member_list = ServerEvent::MemberList {
        topic_id: topic.clone(),
        members: view.members.iter().map(MemberDto::from).collect(),
    };
    let count = ServerEvent::PresenceCount {
        topic_id: topic,
        count: view.count,
    };

    if let Err(e) = state
        .message_pusher
        .broadcast(&targets, &encode(&member_list))
        .await
    {
        tracing::warn!("Broadcast of member list failed: {}", e);
    }
    if let Err(e) = state
        .message_pusher
        .broadcast(&targets, &encode(&count))
        .await
    {
        tracing::warn!("Broadcast of presence count failed: {}", e);
    }
}
