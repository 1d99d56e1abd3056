//! Interface for loading and saving the [`Config`] structure.
//!
//! The actual place where the config is saved to or read from is not tied to this interface
//! and it's considered to be implementation detail.
use crate::result::ConfigurationErr;

use serde::{Deserialize, Serialize};
use std::path::Path;

pub type CfgResolver = Box<dyn ConfigResolver>;

pub type CfgLoader = Box<dyn ConfigLoader>;

/// Responsible for reading/saving the configuration from/to some medium.
pub trait ConfigLoader: Send {
    fn load(&self, path: &Path) -> Result<Config, ConfigurationErr>;

    fn store(&self, path: &Path, cfg: &Config) -> Result<(), ConfigurationErr>;
}

/// Handles config override.
///
/// When user specifies configuration path during startup, this interface handles this case.
pub trait ConfigResolver: Send {
    /// Loads the [`Config`] using specified path.
    ///
    /// If the path is `None`, then no override takes place and configuration is loaded from the
    /// default path.
    fn handle_config(&self, path_override: Option<String>) -> Result<Config, ConfigurationErr>;
}

#[derive(Debug, PartialEq, Eq, Deserialize, Serialize, Clone)]
pub struct Config {
    pub push_endpoint: String,
    pub notification_title: String,
    pub notification_body: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            push_endpoint: "http://localhost:8787/send".into(),
            notification_title: "Trash Pickup Alert".into(),
            notification_body:
                "Don't miss today's waste pickup in your ward! Please ensure your garbage is placed at the collection point."
                    .into(),
        }
    }
}

impl AsRef<Config> for Config {
    fn as_ref(&self) -> &Config {
        self
    }
}
