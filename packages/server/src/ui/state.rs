//! Shared application state.

use std::sync::Arc;

use crate::domain::MessagePusher;
use crate::usecase::{
    ActiveRoomsUseCase, ArchiveInactiveUseCase, DisconnectUseCase, IdentityBinder,
    JoinRoomUseCase, SendMessageUseCase,
};

pub struct AppState {
    pub identity_binder: Arc<IdentityBinder>,
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    pub send_message_usecase: Arc<SendMessageUseCase>,
    pub disconnect_usecase: Arc<DisconnectUseCase>,
    pub active_rooms_usecase: Arc<ActiveRoomsUseCase>,
    pub archive_inactive_usecase: Arc<ArchiveInactiveUseCase>,
    pub message_pusher: Arc<dyn MessagePusher>,
    pub room_store: Arc<dyn crate::domain::RoomStore>,
}
