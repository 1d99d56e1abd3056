use rocket::http::{ContentType, Status};
use rocket::response::Responder;
use rocket::{Request, Response};
use std::io::Cursor;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BusErr {
    #[error("generic bus error: '{0}'")]
    Generic(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum ReceiverErr {
    #[error("change stream closed: '{0}'")]
    Closed(#[from] std::sync::mpsc::RecvError),
}

#[derive(Debug, Error)]
pub enum TrackerErr {
    #[error("failed to access status record: '{0}'")]
    Store(String),
}

#[derive(Debug, Error)]
pub enum UserStoreErr {
    #[error("failed to access user records: '{0}'")]
    Store(String),
}

#[derive(Debug, Error)]
pub enum VehicleStoreErr {
    #[error("failed to access vehicle records: '{0}'")]
    Store(String),
}

#[derive(Debug, Error)]
pub enum PushErr {
    #[error("failed to reach push service: '{0}'")]
    Transport(#[from] reqwest::Error),

    #[error("push service responded with status '{0}'")]
    Status(u16),
}

#[derive(Debug, Error)]
pub enum ConfigurationErr {
    #[error("failed to create or write config file: '{0}'")]
    Io(#[from] std::io::Error),

    #[error("error when deserializing from toml: '{0}'")]
    Deserialization(#[from] toml::de::Error),

    #[error("error when serializing to toml: '{0}'")]
    Serialization(#[from] toml::ser::Error),

    #[error("invalid config path: '{0}'")]
    InvalidPath(String),
}

#[derive(Debug, Error)]
pub enum SetupErr {
    #[error("failed to create bus: '{0}'")]
    Bus(#[from] BusErr),

    #[error("failed to create thread pool: '{0}'")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to handle configuration: '{0}'")]
    Configuration(#[from] ConfigurationErr),
}

/// Error surfaced through the administrative HTTP endpoints.
///
/// Malformed input maps to 400 with a descriptive message, everything else to a generic 500.
#[derive(Debug, Error)]
pub enum ApiErr {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("internal error: '{0}'")]
    Internal(#[from] anyhow::Error),
}

impl<'r, 'o> Responder<'r, 'o> for ApiErr
where
    'o: 'r,
{
    fn respond_to(self, _request: &'r Request<'_>) -> rocket::response::Result<'o> {
        let status = match &self {
            ApiErr::InvalidInput(_) => Status::BadRequest,
            ApiErr::Internal(_) => Status::InternalServerError,
        };
        let body = self.to_string();
        Response::build()
            .status(status)
            .header(ContentType::Plain)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}
