//! Membership tracking: which identity occupies which room.
//!
//! One mutex guards both the forward map (room to occupants) and the
//! reverse map (identity to room), so every transition is atomic and an
//! identity is in at most one room at any observable instant.

use std::collections::{HashMap, HashSet};

use tokio::sync::Mutex;

use crate::domain::{Identity, TopicId};

/// A room an identity implicitly left, with its occupancy afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomVacated {
    pub topic_id: TopicId,
    pub remaining: usize,
}

/// Result of a join: the new room's occupancy plus the room vacated by an
/// implicit leave, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinShift {
    pub count: usize,
    pub left: Option<RoomVacated>,
}

/// Presence snapshot of a room, resolved to live identities for emission.
#[derive(Debug, Clone)]
pub struct PresenceView {
    pub topic_id: TopicId,
    pub members: Vec<Identity>,
    pub count: usize,
}

#[derive(Default)]
struct TrackerState {
    rooms: HashMap<TopicId, HashSet<String>>,
    occupant: HashMap<String, TopicId>,
}

/// In-memory membership registry shared across connections.
#[derive(Default)]
pub struct MembershipTracker {
    state: Mutex<TrackerState>,
}

impl MembershipTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move an identity into a room, implicitly leaving its current room.
    ///
    /// Rejoining the current room is a no-op shift (`left` is `None`).
    pub async fn join(&self, topic_id: &TopicId, identity_id: &str) -> JoinShift {
        let mut state = self.state.lock().await;

        let left = match state.occupant.get(identity_id) {
            Some(current) if current == topic_id => None,
            Some(current) => {
                let previous = current.clone();
                let remaining = Self::remove_member(&mut state.rooms, &previous, identity_id);
                Some(RoomVacated {
                    topic_id: previous,
                    remaining,
                })
            }
            None => None,
        };

        state
            .occupant
            .insert(identity_id.to_string(), topic_id.clone());
        let members = state.rooms.entry(topic_id.clone()).or_default();
        members.insert(identity_id.to_string());
        let count = members.len();

        JoinShift { count, left }
    }

    /// Remove an identity from a room. Returns the room's occupancy after
    /// removal. Removing a non-member is a no-op.
    pub async fn leave(&self, topic_id: &TopicId, identity_id: &str) -> usize {
        let mut state = self.state.lock().await;
        if state.occupant.get(identity_id) == Some(topic_id) {
            state.occupant.remove(identity_id);
        }
        Self::remove_member(&mut state.rooms, topic_id, identity_id)
    }

    /// Remove an identity from whatever room it occupies, if any.
    pub async fn leave_current(&self, identity_id: &str) -> Option<RoomVacated> {
        let mut state = self.state.lock().await;
        let topic_id = state.occupant.remove(identity_id)?;
        let remaining = Self::remove_member(&mut state.rooms, &topic_id, identity_id);
        Some(RoomVacated {
            topic_id,
            remaining,
        })
    }

    /// Current occupancy of a room. An unknown room has occupancy zero.
    pub async fn count(&self, topic_id: &TopicId) -> usize {
        let state = self.state.lock().await;
        state.rooms.get(topic_id).map_or(0, HashSet::len)
    }

    /// Identity ids currently in a room.
    pub async fn members(&self, topic_id: &TopicId) -> Vec<String> {
        let state = self.state.lock().await;
        state
            .rooms
            .get(topic_id)
            .map(|members| members.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn remove_member(
        rooms: &mut HashMap<TopicId, HashSet<String>>,
        topic_id: &TopicId,
        identity_id: &str,
    ) -> usize {
        match rooms.get_mut(topic_id) {
            Some(members) => {
                members.remove(identity_id);
                let remaining = members.len();
                if remaining == 0 {
                    rooms.remove(topic_id);
                }
                remaining
            }
            None => 0,
        }
    }
}
