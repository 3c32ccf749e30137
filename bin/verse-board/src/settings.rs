//! Runtime settings, layered from defaults and `VERSE_BOARD_*` environment
//! variables (a `.env` file is loaded first when present).

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// e.g. `sqlite:verse_board.db` or `sqlite::memory:`
    pub database_url: String,
    pub max_connections: u32,
    /// Limit for `/api/top200subverses`. Unset keeps the listing unbounded.
    pub top_subverses_cap: Option<i64>,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::with_prefix("VERSE_BOARD").try_parsing(true))
    }

    fn from_environment(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 8080)?
            .set_default("database_url", "sqlite:verse_board.db")?
            .set_default("max_connections", 5)?
            .add_source(env)
            .build()?
            .try_deserialize()
    }
}
