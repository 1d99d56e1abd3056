//! Filesystem implementation of the configuration interfaces.
use crate::result::ConfigurationErr;
use crate::use_cases::config::{CfgLoader, Config, ConfigLoader, ConfigResolver};

use std::fs::{create_dir_all, read_to_string, File};
use std::io::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

pub struct FsConfigLoader;

/// Loads configuration file.
///
/// It reads a toml file from the filesystem and decodes it into [`Config`] structure.
impl ConfigLoader for FsConfigLoader {
    #[instrument(skip(self))]
    fn load(&self, path: &Path) -> Result<Config, ConfigurationErr> {
        Ok(toml::from_str(&read_to_string(path)?)?)
    }

    #[instrument(skip(self))]
    fn store(&self, path: &Path, cfg: &Config) -> Result<(), ConfigurationErr> {
        let config_dir = path.parent().ok_or_else(|| {
            ConfigurationErr::InvalidPath("Can't use '/' as a configuration path".into())
        })?;
        create_dir_all(config_dir)?;
        let mut file = File::create(path)?;
        file.write_all(toml::to_string(cfg)?.as_bytes())?;
        Ok(())
    }
}

/// Handles configuration override.
///
/// When the config file exists it's loaded; otherwise the defaults are stored under the resolved
/// path and used. The priority order is:
/// 1. Config override passed as an argument.
/// 2. Default configuration path. See [`config_path`].
pub struct FsConfigResolver {
    config_loader: CfgLoader,
}

impl FsConfigResolver {
    pub fn new(config_loader: CfgLoader) -> Self {
        Self { config_loader }
    }
}

impl ConfigResolver for FsConfigResolver {
    #[instrument(skip(self))]
    fn handle_config(&self, path_override: Option<String>) -> Result<Config, ConfigurationErr> {
        let config_path = path_override.map_or_else(config_path, PathBuf::from);
        if config_path.exists() {
            debug!("loading config from '{:?}'", config_path);
            self.config_loader.load(&config_path)
        } else {
            debug!("config path '{:?}' doesn't exist, storing defaults", config_path);
            let cfg = Config::default();
            self.config_loader.store(&config_path, &cfg)?;
            Ok(cfg)
        }
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .expect("failed to read system config directory")
        .join("wardcast/wardcast.toml")
}

#[cfg(test)]
mod test {
    use super::*;

    use anyhow::Result;
    use std::fs::read_to_string;
    use tempfile::tempdir;

    #[test]
    fn test_load_config() -> Result<()> {
        // given
        let tmp_cfg = tempdir()?;
        let cfg_path = tmp_cfg.path().join("wardcast.toml");
        create_config(
            &cfg_path,
            r#"
            push_endpoint = "http://push.example.com/send"
            notification_title = "Pickup Alert"
            notification_body = "The pickup vehicle is on its way."
            "#,
        )?;
        let expected = Config {
            push_endpoint: "http://push.example.com/send".into(),
            notification_title: "Pickup Alert".into(),
            notification_body: "The pickup vehicle is on its way.".into(),
        };
        let loader = FsConfigLoader;

        // when
        let read_cfg = loader.load(&cfg_path)?;

        // then
        assert_eq!(expected, read_cfg);

        Ok(())
    }

    #[test]
    #[should_panic(expected = "missing field `push_endpoint`")]
    fn test_load_config_when_missing_push_endpoint() {
        // given
        let tmp_cfg = tempdir().unwrap();
        let cfg_path = tmp_cfg.path().join("wardcast.toml");
        create_config(
            &cfg_path,
            r#"
            notification_title = "Pickup Alert"
            notification_body = "The pickup vehicle is on its way."
            "#,
        )
        .unwrap();
        let loader = FsConfigLoader;

        // then
        loader.load(&cfg_path).unwrap(); // should panic
    }

    #[test]
    fn test_store_config() -> Result<()> {
        // given
        let tmp_cfg = tempdir()?;
        let cfg_path = tmp_cfg.path().join("wardcast.toml");
        let cfg = Config {
            push_endpoint: "http://push.example.com/send".into(),
            notification_title: "Pickup Alert".into(),
            notification_body: "The pickup vehicle is on its way.".into(),
        };
        let loader = FsConfigLoader;

        // when
        loader.store(&cfg_path, &cfg)?;

        // then
        assert_eq!(
            read_to_string(&cfg_path)?,
            r#"push_endpoint = "http://push.example.com/send"
notification_title = "Pickup Alert"
notification_body = "The pickup vehicle is on its way."
"#
        );

        Ok(())
    }

    #[test]
    fn resolver_stores_defaults_when_config_is_missing() -> Result<()> {
        // given
        let tmp_cfg = tempdir()?;
        let cfg_path = tmp_cfg.path().join("wardcast.toml");
        let resolver = FsConfigResolver::new(Box::new(FsConfigLoader));

        // when
        let cfg = resolver.handle_config(Some(cfg_path.to_string_lossy().into()))?;

        // then
        assert_eq!(cfg, Config::default());
        assert!(cfg_path.exists());

        Ok(())
    }

    #[test]
    fn resolver_prefers_existing_config() -> Result<()> {
        // given
        let tmp_cfg = tempdir()?;
        let cfg_path = tmp_cfg.path().join("wardcast.toml");
        create_config(
            &cfg_path,
            r#"
            push_endpoint = "http://push.example.com/send"
            notification_title = "Pickup Alert"
            notification_body = "The pickup vehicle is on its way."
            "#,
        )?;
        let resolver = FsConfigResolver::new(Box::new(FsConfigLoader));

        // when
        let cfg = resolver.handle_config(Some(cfg_path.to_string_lossy().into()))?;

        // then
        assert_eq!(cfg.push_endpoint, "http://push.example.com/send");

        Ok(())
    }

    fn create_config<S: Into<String>, A: AsRef<Path>>(path: A, content: S) -> Result<()> {
        let path = path.as_ref();
        let mut cfg_file = File::create(path)?;
        cfg_file.write_all(content.into().as_bytes())?;
        Ok(())
    }
}
