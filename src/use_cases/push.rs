//! Abstraction over the push delivery collaborator.
use crate::entities::notification::Notification;
use crate::entities::user::Token;
use crate::result::PushErr;

use std::sync::Arc;

pub type Push = Arc<dyn PushClient>;

/// Submits one bounded batch of notifications per call.
///
/// The provider limits batch size (see [`crate::use_cases::dispatcher::MAX_BATCH`]); splitting
/// larger inputs is the dispatcher's job, not the client's.
pub trait PushClient: Send + Sync {
    fn send_batch(
        &self,
        batch: &[Token],
        notification: &Notification,
    ) -> Result<BatchResponse, PushErr>;
}

/// Per-recipient outcome of one batch request, aligned with the batch order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResponse {
    pub statuses: Vec<SendStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendStatus {
    Delivered,
    Rejected(String),
}
