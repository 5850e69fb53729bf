//! Typed producer configuration.
//!
//! Loads once at startup and fails fast if any required value is missing.
//! A readable `.env` in the working directory means local development;
//! otherwise the Docker Swarm secrets mount is used.

pub mod secrets;

use crate::error::{Error, Result};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Local developer env file, relative to the working directory.
pub const LOCAL_ENV_PATH: &str = ".env";

/// Where Docker Swarm mounts the producer's secrets.
pub const SWARM_SECRETS_PATH: &str = "/run/secrets/kafka-producer-secrets";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub app_env: String,
    pub broker_addresses: Vec<String>,
    pub log_file_path: PathBuf,
    pub log_level: String,
    pub message_limit: u64,
    #[serde(serialize_with = "serialize_millis")]
    pub sleep_timeout: Duration,
    pub topic_name: String,
}

/// Names of the [`Config`] fields, used to report which one failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    AppEnv,
    BrokerAddresses,
    LogFilePath,
    LogLevel,
    MessageLimit,
    SleepTimeout,
    TopicName,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::AppEnv => "AppEnv",
            Field::BrokerAddresses => "BrokerAddresses",
            Field::LogFilePath => "LogFilePath",
            Field::LogLevel => "LogLevel",
            Field::MessageLimit => "MessageLimit",
            Field::SleepTimeout => "SleepTimeout",
            Field::TopicName => "TopicName",
        };
        f.write_str(name)
    }
}

/// Where the configuration values came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// `.env` file, with the process environment taking precedence.
    Local,
    /// Docker Swarm secrets file.
    Orchestrated,
}

impl Source {
    fn broker_key(self) -> &'static str {
        match self {
            Source::Local => "LOCAL_BROKER_ADDRESSES",
            Source::Orchestrated => "DOCKER_BROKER_ADDRESSES",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Local => f.write_str("local"),
            Source::Orchestrated => f.write_str("orchestrated"),
        }
    }
}

/// The two files the loader may read.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub env_file: PathBuf,
    pub secrets_file: PathBuf,
}

impl Default for ConfigPaths {
    fn default() -> Self {
        Self {
            env_file: PathBuf::from(LOCAL_ENV_PATH),
            secrets_file: PathBuf::from(SWARM_SECRETS_PATH),
        }
    }
}

/// Raw string values for one source.
struct Values {
    source: Source,
    entries: HashMap<String, String>,
}

impl Values {
    fn local(path: &Path) -> Result<Self> {
        let env_file_err = |source: dotenvy::Error| Error::EnvFile {
            path: path.to_path_buf(),
            source,
        };

        let mut entries = HashMap::new();
        for item in dotenvy::from_path_iter(path).map_err(env_file_err)? {
            let (key, value) = item.map_err(env_file_err)?;
            entries.insert(key, value);
        }

        Ok(Self {
            source: Source::Local,
            entries,
        })
    }

    fn orchestrated(path: &Path) -> Result<Self> {
        let raw = secrets::read_secrets(path)?;
        Ok(Self {
            source: Source::Orchestrated,
            entries: secrets::parse_secrets(&raw)?,
        })
    }

    fn get(&self, key: &str) -> String {
        match self.source {
            Source::Local => std::env::var(key)
                .ok()
                .or_else(|| self.entries.get(key).cloned())
                .unwrap_or_default(),
            Source::Orchestrated => self.entries.get(key).cloned().unwrap_or_default(),
        }
    }

    fn get_u64(&self, key: &str) -> u64 {
        let raw = self.get(key);
        if !raw.is_empty() && raw.parse::<u64>().is_err() {
            tracing::warn!(key, "value is not a base-10 integer, treating as unset");
        }
        parse_u64_or_zero(&raw)
    }

    fn into_config(self) -> Config {
        Config {
            app_env: self.get("APP_ENV"),
            broker_addresses: split_addresses(&self.get(self.source.broker_key())),
            log_file_path: PathBuf::from(self.get("LOG_FILE_PATH")),
            log_level: self.get("LOG_LEVEL"),
            message_limit: self.get_u64("MESSAGE_LIMIT"),
            sleep_timeout: Duration::from_millis(self.get_u64("SLEEP_TIMEOUT")),
            topic_name: self.get("TOPIC_NAME"),
        }
    }
}

impl Config {
    /// Load configuration from `.env` or the Docker Swarm secrets mount.
    ///
    /// Does not modify the process environment, but variables already set
    /// there override the `.env` file the way dotenv loading does.
    pub fn load() -> Result<Self> {
        Self::load_from(&ConfigPaths::default())
    }

    /// Load configuration from explicit file locations.
    ///
    /// # Errors
    ///
    /// - [`Error::EnvFile`] if the env file exists but cannot be parsed.
    /// - [`Error::SecretsUnreadable`] if there is no env file and the
    ///   secrets file cannot be read.
    /// - [`Error::MalformedLine`] for a secrets line without `=`.
    /// - [`Error::MissingField`] for the first field left empty or zero.
    pub fn load_from(paths: &ConfigPaths) -> Result<Self> {
        Self::load_with_source(paths).map(|(config, _)| config)
    }

    /// Like [`Config::load_from`], also reporting which source was used.
    pub fn load_with_source(paths: &ConfigPaths) -> Result<(Self, Source)> {
        let source = detect_source(&paths.env_file);
        let values = match source {
            Source::Local => {
                tracing::info!(path = %paths.env_file.display(), "loading local env file");
                Values::local(&paths.env_file)?
            }
            Source::Orchestrated => {
                tracing::info!(path = %paths.secrets_file.display(), "loading docker swarm secrets");
                Values::orchestrated(&paths.secrets_file)?
            }
        };

        let config = values.into_config();
        config.validate()?;
        tracing::info!(%source, app_env = %config.app_env, "configuration loaded");
        Ok((config, source))
    }

    /// Check that no field holds its zero value.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            (Field::AppEnv, self.app_env.is_empty()),
            (Field::BrokerAddresses, self.broker_addresses.is_empty()),
            (Field::LogFilePath, self.log_file_path.as_os_str().is_empty()),
            (Field::LogLevel, self.log_level.is_empty()),
            (Field::MessageLimit, self.message_limit == 0),
            (Field::SleepTimeout, self.sleep_timeout.is_zero()),
            (Field::TopicName, self.topic_name.is_empty()),
        ];

        match checks.into_iter().find(|(_, missing)| *missing) {
            Some((field, _)) => Err(Error::MissingField(field)),
            None => Ok(()),
        }
    }
}

/// Decide the source by trying to read the env file. Any read failure,
/// not only absence, means orchestrated.
pub fn detect_source(env_file: &Path) -> Source {
    if std::fs::read(env_file).is_ok() {
        Source::Local
    } else {
        Source::Orchestrated
    }
}

/// Base-10 conversion where anything unparsable becomes 0.
///
/// Unsigned, so a negative value also becomes 0 and fails validation.
pub fn parse_u64_or_zero(s: &str) -> u64 {
    s.parse().unwrap_or(0)
}

fn split_addresses(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|addr| !addr.is_empty())
        .map(String::from)
        .collect()
}

fn serialize_millis<S: Serializer>(d: &Duration, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}
