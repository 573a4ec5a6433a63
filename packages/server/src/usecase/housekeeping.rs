//! Housekeeping: mark long-idle rooms as archived.

use std::sync::Arc;
use std::time::Duration;

use pixelchat_shared::time::Clock;

use crate::domain::{RoomStore, Timestamp};

use super::error::GatewayError;

/// Rooms idle longer than this are archived: 7 days.
const ARCHIVE_AFTER: Duration = Duration::from_secs(7 * 24 * 60 * 60);

pub struct ArchiveInactiveUseCase {
    store: Arc<dyn RoomStore>,
    clock: Arc<dyn Clock>,
}

impl ArchiveInactiveUseCase {
    pub fn new(store: Arc<dyn RoomStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Archive every room idle past the threshold. Returns the number of
    /// rooms archived. Idempotent: already-archived rooms are untouched.
    pub async fn execute(&self) -> Result<usize, GatewayError> {
        let threshold =
            Timestamp::new(self.clock.now_millis() - ARCHIVE_AFTER.as_millis() as i64);
        let archived = self.store.archive_inactive(threshold).await?;
        if archived > 0 {
            tracing::info!("Archived {} inactive room(s)", archived);
        }
        Ok(archived)
    }
}
