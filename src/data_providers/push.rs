//! HTTP implementation of the push delivery interface.
//!
//! Posts one JSON request per batch and decodes the provider's per-recipient results. Transport
//! and non-success responses surface as [`PushErr`]; per-recipient rejections are data.
use crate::entities::notification::Notification;
use crate::entities::user::Token;
use crate::result::PushErr;
use crate::use_cases::push::{BatchResponse, PushClient, SendStatus};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

pub struct HttpPushClient {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpPushClient {
    pub fn new<S: Into<String>>(endpoint: S) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl PushClient for HttpPushClient {
    #[instrument(skip(self, batch, notification))]
    fn send_batch(
        &self,
        batch: &[Token],
        notification: &Notification,
    ) -> Result<BatchResponse, PushErr> {
        debug!("sending batch of {} notifications", batch.len());
        let request = SendRequest {
            messages: batch
                .iter()
                .map(|token| Message {
                    token: token.clone(),
                    notification: notification.clone(),
                })
                .collect(),
        };
        let response = self.client.post(&self.endpoint).json(&request).send()?;
        if !response.status().is_success() {
            return Err(PushErr::Status(response.status().as_u16()));
        }
        let body: SendResponse = response.json()?;
        Ok(to_batch_response(body))
    }
}

fn to_batch_response(body: SendResponse) -> BatchResponse {
    BatchResponse {
        statuses: body
            .results
            .into_iter()
            .map(|result| {
                if result.success {
                    SendStatus::Delivered
                } else {
                    SendStatus::Rejected(result.error.unwrap_or_else(|| "unknown".into()))
                }
            })
            .collect(),
    }
}

#[derive(Debug, Serialize)]
struct SendRequest {
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    token: Token,
    notification: Notification,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    results: Vec<RecipientResult>,
}

#[derive(Debug, Deserialize)]
struct RecipientResult {
    success: bool,
    error: Option<String>,
}
