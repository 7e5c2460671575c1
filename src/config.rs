use std::time::Duration;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const DATABASE_NAME: &str = "car_rental";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Mongo,
    Memory,
}

/// Runtime settings, read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongo_uri: Option<String>,
    pub database_name: String,
    pub storage: StorageBackend,
    pub request_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| HOST.to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("Invalid PORT '{}', using {}", raw, PORT);
                PORT
            }),
            None => PORT,
        };

        let storage = match lookup("STORAGE").as_deref() {
            None | Some("mongo") => StorageBackend::Mongo,
            Some("memory") => StorageBackend::Memory,
            Some(other) => {
                log::warn!("Unknown STORAGE '{}', using mongo", other);
                StorageBackend::Mongo
            }
        };

        let timeout_secs = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    log::warn!(
                        "Invalid REQUEST_TIMEOUT_SECS '{}', using {}",
                        raw,
                        REQUEST_TIMEOUT_SECS
                    );
                    REQUEST_TIMEOUT_SECS
                }
            },
            None => REQUEST_TIMEOUT_SECS,
        };

        Self {
            host,
            port,
            mongo_uri: lookup("MONGODB_URI").filter(|uri| !uri.is_empty()),
            database_name: lookup("DATABASE_NAME").unwrap_or_else(|| DATABASE_NAME.to_string()),
            storage,
            request_timeout: Duration::from_secs(timeout_secs),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
