//! Identity binding: resolve a connecting client to a registered identity
//! or synthesize a disposable anonymous one.
//!
//! Runs once per connection, before any room event is processed.

use std::sync::Arc;

use rand::seq::IndexedRandom;
use rand::Rng;
use uuid::Uuid;

use crate::domain::{Identity, UserStore};

use super::error::GatewayError;

const ADJECTIVES: [&str; 10] = [
    "Happy", "Brave", "Swift", "Clever", "Mighty", "Noble", "Wise", "Bold", "Epic", "Pixel",
];

const NOUNS: [&str; 10] = [
    "Gamer", "Knight", "Wizard", "Warrior", "Hunter", "Dragon", "Hero", "Legend", "Master",
    "Player",
];

/// Generate a human-readable anonymous display name.
///
/// Collisions are possible and accepted; the id, not the name, is the
/// identity key.
pub fn generate_display_name() -> String {
    let mut rng = rand::rng();
    let adjective = ADJECTIVES.choose(&mut rng).unwrap_or(&ADJECTIVES[0]);
    let noun = NOUNS.choose(&mut rng).unwrap_or(&NOUNS[0]);
    let number: u16 = rng.random_range(0..1000);
    format!("{}{}{}", adjective, noun, number)
}

/// Resolves connection handshake data to a bound [`Identity`].
pub struct IdentityBinder {
    users: Arc<dyn UserStore>,
}

impl IdentityBinder {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Bind a connection to an identity.
    ///
    /// A supplied durable id must resolve in the user store, otherwise the
    /// connection setup fails with [`GatewayError::IdentityNotFound`]. With
    /// no durable id, a fresh anonymous identity is synthesized.
    pub async fn bind(&self, durable_id: Option<&str>) -> Result<Identity, GatewayError> {
        match durable_id {
            Some(user_id) => {
                let user = self
                    .users
                    .find(user_id)
                    .await?
                    .ok_or_else(|| GatewayError::IdentityNotFound(user_id.to_string()))?;
                Ok(Identity::registered(user.id, user.display_name))
            }
            None => Ok(Identity::anonymous(
                Uuid::new_v4().to_string(),
                generate_display_name(),
            )),
        }
    }
}
