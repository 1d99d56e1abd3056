//! User record as seen by the core.
//!
//! Users are owned by an external registration system. The core reads the ward and token fields
//! and may clear the token when the push provider reports it permanently invalid.
use crate::entities::vehicle::WardId;

use fake::Dummy;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize, Dummy)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Notification address registered by the push provider on the user's device.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize, Dummy)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn new<S: Into<String>>(token: S) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Dummy)]
pub struct UserRecord {
    pub id: UserId,
    pub ward: WardId,
    pub token: Option<Token>,
}

impl UserRecord {
    pub fn new<I, W>(id: I, ward: W, token: Option<Token>) -> Self
    where
        I: Into<String>,
        W: Into<String>,
    {
        Self {
            id: UserId::new(id),
            ward: WardId::new(ward),
            token,
        }
    }
}
