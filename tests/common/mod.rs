//! Shared fixtures for config tests.

#![allow(dead_code)]

use kafka_producer::config::ConfigPaths;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const LOCAL_ENV: &str = "APP_ENV=prod
LOCAL_BROKER_ADDRESSES=host1:9092,host2:9092
LOG_LEVEL=info
LOG_FILE_PATH=/var/log/app.log
MESSAGE_LIMIT=100
SLEEP_TIMEOUT=500
TOPIC_NAME=events
";

pub const SWARM_SECRETS: &str = "APP_ENV=production
DOCKER_BROKER_ADDRESSES=kafka1:9092,kafka2:9092,kafka3:9092
LOG_LEVEL=debug
LOG_FILE_PATH=/var/log/producer.log
MESSAGE_LIMIT=250
SLEEP_TIMEOUT=1500
TOPIC_NAME=orders
";

/// Scratch directory with paths for `.env` and the secrets file.
/// Neither file exists until written.
pub fn scratch() -> (TempDir, ConfigPaths) {
    let dir = tempfile::tempdir().expect("tempdir");
    let paths = ConfigPaths {
        env_file: dir.path().join(".env"),
        secrets_file: dir.path().join("kafka-producer-secrets"),
    };
    (dir, paths)
}

pub fn write(path: &Path, contents: &str) {
    std::fs::write(path, contents).expect("write fixture");
}

/// Replace one `KEY=...` line in a fixture.
pub fn with_value(fixture: &str, key: &str, value: &str) -> String {
    fixture
        .lines()
        .map(|line| {
            if line.split_once('=').is_some_and(|(k, _)| k == key) {
                format!("{key}={value}")
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Drop one `KEY=...` line from a fixture.
pub fn without_key(fixture: &str, key: &str) -> String {
    fixture
        .lines()
        .filter(|line| !line.split_once('=').is_some_and(|(k, _)| k == key))
        .collect::<Vec<_>>()
        .join("\n")
}

/// In-memory log sink shared between a subscriber and the test.
#[derive(Clone, Default)]
pub struct Capture(Arc<Mutex<Vec<u8>>>);

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` under a thread-local subscriber and return what it logged.
pub fn captured<T>(f: impl FnOnce() -> T) -> (T, String) {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&capture.0.lock().unwrap()).into_owned();
    (out, logs)
}
