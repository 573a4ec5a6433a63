//! Server execution logic.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::domain::{MessagePusher, RoomStore};
use crate::usecase::{
    ActiveRoomsUseCase, ArchiveInactiveUseCase, DisconnectUseCase, IdentityBinder,
    JoinRoomUseCase, SendMessageUseCase,
};

use super::{
    handler::{
        archive_inactive, get_active_rooms, get_room_messages, health_check, websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Chat room gateway server.
pub struct Server {
    identity_binder: Arc<IdentityBinder>,
    join_room_usecase: Arc<JoinRoomUseCase>,
    send_message_usecase: Arc<SendMessageUseCase>,
    disconnect_usecase: Arc<DisconnectUseCase>,
    active_rooms_usecase: Arc<ActiveRoomsUseCase>,
    archive_inactive_usecase: Arc<ArchiveInactiveUseCase>,
    message_pusher: Arc<dyn MessagePusher>,
    room_store: Arc<dyn RoomStore>,
}

impl Server {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        identity_binder: Arc<IdentityBinder>,
        join_room_usecase: Arc<JoinRoomUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        disconnect_usecase: Arc<DisconnectUseCase>,
        active_rooms_usecase: Arc<ActiveRoomsUseCase>,
        archive_inactive_usecase: Arc<ArchiveInactiveUseCase>,
        message_pusher: Arc<dyn MessagePusher>,
        room_store: Arc<dyn RoomStore>,
    ) -> Self {
        Self {
            identity_binder,
            join_room_usecase,
            send_message_usecase,
            disconnect_usecase,
            active_rooms_usecase,
            archive_inactive_usecase,
            message_pusher,
            room_store,
        }
    }

    pub fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            identity_binder: self.identity_binder,
            join_room_usecase: self.join_room_usecase,
            send_message_usecase: self.send_message_usecase,
            disconnect_usecase: self.disconnect_usecase,
            active_rooms_usecase: self.active_rooms_usecase,
            archive_inactive_usecase: self.archive_inactive_usecase,
            message_pusher: self.message_pusher,
            room_store: self.room_store,
        });

        Router::new()
            .route("/ws", get(websocket_handler))
            .route("/api/health", get(health_check))
            .route("/api/chat/active", get(get_active_rooms))
            .route("/api/chat/{topic_id}/messages", get(get_room_messages))
            .route("/api/chat/archive-inactive", post(archive_inactive))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(app_state)
    }

    /// Bind and serve until a shutdown signal arrives.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Chat gateway listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
