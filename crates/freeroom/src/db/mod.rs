/// Persisted user-configuration store
use crate::vacancy::UserConfig;
use rusqlite::{Connection, OptionalExtension};
use std::sync::Mutex;
use thiserror::Error;
use tracing::warn;

const SCHEMA_SQL: &str = include_str!("../../../../sql/init_config.sql");

/// Key under which the serialized [`UserConfig`] is stored.
const USER_CONFIG_KEY: &str = "user_config";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config store error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Stored config is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Key-value store backing the persisted configuration.
pub struct ConfigDbManager {
    db: Mutex<Connection>,
}

impl ConfigDbManager {
    /// Opens (or creates) the store at `db_path` and initializes the schema.
    pub fn new(db_path: &str) -> Result<Self, ConfigError> {
        let conn = Connection::open(db_path)?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            db: Mutex::new(conn),
        })
    }

    /// Opens an in-memory store (tests, ephemeral runs).
    pub fn in_memory() -> Result<Self, ConfigError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            db: Mutex::new(conn),
        })
    }

    /// Loads the persisted user config, `None` if nothing was stored yet.
    pub fn load_user_config(&self) -> Result<Option<UserConfig>, ConfigError> {
        let db = self.db.lock().unwrap();
        let raw: Option<String> = db
            .query_row(
                "SELECT value FROM user_config WHERE key = ?1",
                [USER_CONFIG_KEY],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Loads the persisted user config, falling back to the default on a
    /// corrupt payload. Store-level failures still propagate.
    pub fn load_or_default(&self) -> Result<UserConfig, ConfigError> {
        match self.load_user_config() {
            Ok(Some(config)) => Ok(config),
            Ok(None) => Ok(UserConfig::default()),
            Err(ConfigError::Corrupt(e)) => {
                warn!(error = %e, "Stored user config is corrupt, starting from defaults");
                Ok(UserConfig::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Persists the whole user config, replacing any previous value.
    pub fn save_user_config(&self, config: &UserConfig) -> Result<(), ConfigError> {
        let json = serde_json::to_string(config)?;
        let db = self.db.lock().unwrap();
        db.execute(
            "INSERT INTO user_config (key, value, updated_at)
             VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            (USER_CONFIG_KEY, &json),
        )?;
        Ok(())
    }
}
