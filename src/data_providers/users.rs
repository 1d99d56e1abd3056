//! In-memory implementation of the user collection interfaces.
use crate::entities::user::{Token, UserId, UserRecord};
use crate::entities::vehicle::WardId;
use crate::result::UserStoreErr;
use crate::use_cases::users::{UserRead, UserReader, UserWrite, UserWriter};

use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: DashMap<UserId, UserRecord>,
}

impl MemoryUserStore {
    /// Creates read and write handles backed by the same store.
    pub fn create() -> (UserRead, UserWrite) {
        let store = Arc::new(Self::default());
        (store.clone(), store)
    }
}

impl UserReader for MemoryUserStore {
    fn tokens_in_ward(&self, ward: &WardId) -> Result<Vec<Token>, UserStoreErr> {
        let mut members: Vec<UserRecord> = self
            .users
            .iter()
            .filter(|entry| entry.ward == *ward)
            .map(|entry| entry.value().clone())
            .collect();
        // map iteration order is unspecified, keep the result deterministic
        members.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(members.into_iter().filter_map(|user| user.token).collect())
    }

    fn users_with_token(&self, token: &Token) -> Result<Vec<UserId>, UserStoreErr> {
        let mut owners: Vec<UserId> = self
            .users
            .iter()
            .filter(|entry| entry.token.as_ref() == Some(token))
            .map(|entry| entry.key().clone())
            .collect();
        owners.sort();
        Ok(owners)
    }
}

impl UserWriter for MemoryUserStore {
    fn register(&self, user: UserRecord) -> Result<(), UserStoreErr> {
        debug!("registering user '{}' in ward '{}'", user.id, user.ward);
        self.users.insert(user.id.clone(), user);
        Ok(())
    }

    fn clear_token(&self, user: &UserId) -> Result<(), UserStoreErr> {
        if let Some(mut entry) = self.users.get_mut(user) {
            entry.token = None;
        }
        Ok(())
    }
}
