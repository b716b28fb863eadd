//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables. It provides
//! thread-safe access and mutation for testing or overrides in runtime environments.

use std::env;
use std::sync::{OnceLock, RwLock};

/// Represents the complete application configuration loaded from environment variables.
///
/// Every value has a default matching the reference deployment (docker-compose
/// service names for the store and broker), so the process starts without a
/// `.env` file when running alongside those containers.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub host: String,
    pub port: u16,
    pub mongodb_uri: String,
    pub mongodb_database: String,
    pub mongodb_collection: String,
    pub mqtt_host: String,
    pub mqtt_port: u16,
    pub mqtt_client_id: String,
    pub mqtt_topic: String,
    pub sample_interval_seconds: u64,
    pub store_timeout_seconds: u64,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
            project_name: env::var("PROJECT_NAME").unwrap_or_else(|_| "resource-monitor".into()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "api=info".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "api.log".into()),
            log_to_stdout: env::var("LOG_TO_STDOUT").unwrap_or_else(|_| "false".into()) == "true",
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .expect("PORT must be a valid port number"),
            mongodb_uri: env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://mongodb:27017".into()),
            mongodb_database: env::var("MONGODB_DATABASE")
                .unwrap_or_else(|_| "resource-monitor".into()),
            mongodb_collection: env::var("MONGODB_COLLECTION")
                .unwrap_or_else(|_| "measurements".into()),
            mqtt_host: env::var("MQTT_HOST").unwrap_or_else(|_| "mqtt-broker".into()),
            mqtt_port: env::var("MQTT_PORT")
                .unwrap_or_else(|_| "1883".into())
                .parse()
                .expect("MQTT_PORT must be a valid port number"),
            mqtt_client_id: env::var("MQTT_CLIENT_ID").unwrap_or_else(|_| "mqtt-client".into()),
            mqtt_topic: env::var("MQTT_TOPIC").unwrap_or_else(|_| "my-topic".into()),
            sample_interval_seconds: env::var("SAMPLE_INTERVAL_SECONDS")
                .unwrap_or_else(|_| "10".into())
                .parse()
                .expect("SAMPLE_INTERVAL_SECONDS must be a number"),
            store_timeout_seconds: env::var("STORE_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| "10".into())
                .parse()
                .expect("STORE_TIMEOUT_SECONDS must be a number"),
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock cannot be acquired.
    pub fn global() -> std::sync::RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock.write().unwrap();
            *guard = AppConfig::from_env();
        }
    }

    /// Generic internal setter for any field in the config.
    ///
    /// Used by public per-field setter methods.
    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock
            .write()
            .expect("Failed to acquire AppConfig write lock");
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    pub fn set_env(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.env = value.into());
    }

    pub fn set_project_name(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.project_name = value.into());
    }

    pub fn set_log_level(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_level = value.into());
    }

    pub fn set_log_file(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_file = value.into());
    }

    pub fn set_log_to_stdout(value: bool) {
        AppConfig::set_field(|cfg| cfg.log_to_stdout = value);
    }

    pub fn set_host(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.host = value.into());
    }

    pub fn set_port(value: u16) {
        AppConfig::set_field(|cfg| cfg.port = value);
    }

    pub fn set_mongodb_uri(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.mongodb_uri = value.into());
    }

    pub fn set_mongodb_database(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.mongodb_database = value.into());
    }

    pub fn set_mongodb_collection(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.mongodb_collection = value.into());
    }

    pub fn set_mqtt_host(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.mqtt_host = value.into());
    }

    pub fn set_mqtt_port(value: u16) {
        AppConfig::set_field(|cfg| cfg.mqtt_port = value);
    }

    pub fn set_mqtt_client_id(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.mqtt_client_id = value.into());
    }

    pub fn set_mqtt_topic(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.mqtt_topic = value.into());
    }

    pub fn set_sample_interval_seconds(value: u64) {
        AppConfig::set_field(|cfg| cfg.sample_interval_seconds = value);
    }

    pub fn set_store_timeout_seconds(value: u64) {
        AppConfig::set_field(|cfg| cfg.store_timeout_seconds = value);
    }
}

// --- Free-function accessors for call sites that read single values ---

pub fn env() -> String {
    AppConfig::global().env.clone()
}

pub fn project_name() -> String {
    AppConfig::global().project_name.clone()
}

pub fn log_level() -> String {
    AppConfig::global().log_level.clone()
}

pub fn log_file() -> String {
    AppConfig::global().log_file.clone()
}

pub fn log_to_stdout() -> bool {
    AppConfig::global().log_to_stdout
}

pub fn host() -> String {
    AppConfig::global().host.clone()
}

pub fn port() -> u16 {
    AppConfig::global().port
}

pub fn mongodb_uri() -> String {
    AppConfig::global().mongodb_uri.clone()
}

pub fn mongodb_database() -> String {
    AppConfig::global().mongodb_database.clone()
}

pub fn mongodb_collection() -> String {
    AppConfig::global().mongodb_collection.clone()
}

pub fn mqtt_host() -> String {
    AppConfig::global().mqtt_host.clone()
}

pub fn mqtt_port() -> u16 {
    AppConfig::global().mqtt_port
}

pub fn mqtt_client_id() -> String {
    AppConfig::global().mqtt_client_id.clone()
}

pub fn mqtt_topic() -> String {
    AppConfig::global().mqtt_topic.clone()
}

pub fn sample_interval_seconds() -> u64 {
    AppConfig::global().sample_interval_seconds
}

pub fn store_timeout_seconds() -> u64 {
    AppConfig::global().store_timeout_seconds
}

#[cfg(test)]
mod tests {
    use super::AppConfig;

    /// Defaults must match the reference deployment so the service can start
    /// with no configuration at all.
    #[test]
    fn from_env_falls_back_to_reference_defaults() {
        let cfg = AppConfig::from_env();

        assert_eq!(cfg.mongodb_uri, "mongodb://mongodb:27017");
        assert_eq!(cfg.mongodb_collection, "measurements");
        assert_eq!(cfg.mqtt_port, 1883);
        assert_eq!(cfg.mqtt_topic, "my-topic");
        assert_eq!(cfg.sample_interval_seconds, 10);
        assert_eq!(cfg.store_timeout_seconds, 10);
    }

    #[test]
    fn setters_override_the_global_instance() {
        AppConfig::set_mqtt_topic("sensors/readings");
        assert_eq!(super::mqtt_topic(), "sensors/readings");

        AppConfig::set_sample_interval_seconds(1);
        assert_eq!(super::sample_interval_seconds(), 1);

        AppConfig::reset();
    }
}
