//! Removes notification tokens the push provider reported as permanently invalid.
use crate::entities::user::Token;
use crate::use_cases::users::{UserRead, UserWrite};

use tracing::{debug, instrument, warn};

pub struct TokenSanitizer {
    user_read: UserRead,
    user_write: UserWrite,
}

impl TokenSanitizer {
    pub fn new(user_read: UserRead, user_write: UserWrite) -> Self {
        Self {
            user_read,
            user_write,
        }
    }

    /// Clears the token field of every user owning one of the failed tokens.
    ///
    /// Tokens are processed independently: a lookup or update failure is logged and the
    /// remaining tokens are still handled. A token matching zero users is a silent no-op;
    /// the user may have already re-registered with a different token.
    ///
    /// Returns the number of cleared user records.
    #[instrument(skip(self, failed))]
    pub fn sanitize(&self, failed: &[Token]) -> usize {
        let mut cleared = 0;
        for token in failed {
            let owners = match self.user_read.users_with_token(token) {
                Ok(owners) => owners,
                Err(e) => {
                    warn!("token lookup failed: '{}', skipping", e);
                    continue;
                }
            };
            if owners.is_empty() {
                debug!("no user owns token '{}'", token);
                continue;
            }
            for owner in owners {
                match self.user_write.clear_token(&owner) {
                    Ok(()) => {
                        debug!("removed invalid token of user '{}'", owner);
                        cleared += 1;
                    }
                    Err(e) => warn!("failed to clear token of user '{}': '{}'", owner, e),
                }
            }
        }
        cleared
    }
}
