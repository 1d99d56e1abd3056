//! Read and write interfaces for the user collection.
use crate::entities::user::{Token, UserId, UserRecord};
use crate::entities::vehicle::WardId;
use crate::result::UserStoreErr;

use std::sync::Arc;

pub type UserRead = Arc<dyn UserReader>;
pub type UserWrite = Arc<dyn UserWriter>;

pub trait UserReader: Send + Sync {
    /// Returns the notification tokens of all users registered in the given ward.
    ///
    /// Users without a token are filtered out. Duplicate tokens present in the source data are
    /// kept. An empty result is a normal outcome, not an error.
    fn tokens_in_ward(&self, ward: &WardId) -> Result<Vec<Token>, UserStoreErr>;

    /// Returns the users owning the given token. Zero matches is a normal outcome.
    fn users_with_token(&self, token: &Token) -> Result<Vec<UserId>, UserStoreErr>;
}

pub trait UserWriter: Send + Sync {
    /// Registers a new user or updates the ward and token of an existing one.
    fn register(&self, user: UserRecord) -> Result<(), UserStoreErr>;

    /// Clears the token field. Clearing a missing user is a silent no-op.
    fn clear_token(&self, user: &UserId) -> Result<(), UserStoreErr>;
}
