//! In-memory registered-user store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{StoreError, UserRecord, UserStore};

#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<HashMap<String, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: Vec<UserRecord>) -> Self {
        Self {
            users: Mutex::new(
                users
                    .into_iter()
                    .map(|user| (user.id.clone(), user))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find(&self, user_id: &str) -> Result<Option<UserRecord>, StoreError> {
        let users = self.users.lock().await;
        Ok(users.get(user_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_known_and_unknown_users() {
        // given:
        let store = InMemoryUserStore::with_users(vec![UserRecord {
            id: "steam-123".to_string(),
            display_name: "GordonF".to_string(),
        }]);

        // when / then:
        let found = store.find("steam-123").await.unwrap().unwrap();
        assert_eq!(found.display_name, "GordonF");
        assert_eq!(store.find("missing").await.unwrap(), None);
    }
}
