//! Process configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is read first when present, so a
//! deployment can keep the store location and seed account out of the
//! shell profile.

use std::time::Duration;

pub const DEFAULT_DB_PATH: &str = "./data/petgroom.db";
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite connection URL, e.g. `sqlite://./data/petgroom.db`.
    pub database_url: String,
    pub acquire_timeout: Duration,
    pub seed_account: Option<SeedAccount>,
}

/// Staff account created on first start when no user with that email exists.
#[derive(Clone)]
pub struct SeedAccount {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for SeedAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedAccount")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database_url = non_empty("DATABASE_URL").unwrap_or_else(|| {
            let path = non_empty("PETGROOM_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
            format!("sqlite://{path}")
        });

        let acquire_timeout = non_empty("PETGROOM_DB_ACQUIRE_TIMEOUT_SECS")
            .and_then(|value| value.trim().parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS));

        let seed_account = match (non_empty("PETGROOM_SEED_EMAIL"), lookup("PETGROOM_SEED_PASSWORD")) {
            (Some(email), Some(password)) => Some(SeedAccount {
                full_name: non_empty("PETGROOM_SEED_NAME").unwrap_or_else(|| "Front Desk".to_string()),
                email,
                password,
            }),
            _ => None,
        };

        Self {
            database_url,
            acquire_timeout,
            seed_account,
        }
    }
}
