use std::{fs, path::Path, str::FromStr};

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

use crate::{
    config::{AppConfig, SeedAccount},
    error::GatewayError,
    gateway::PersistenceGateway,
};

const SCHEMA: [&str; 3] = [
    r#"CREATE TABLE IF NOT EXISTS appointments (
           id TEXT PRIMARY KEY,
           client_name TEXT NOT NULL,
           contact TEXT NOT NULL,
           date TEXT NOT NULL,
           pet_name TEXT NOT NULL,
           pet_breed TEXT NOT NULL,
           service TEXT NOT NULL
       )"#,
    r#"CREATE TABLE IF NOT EXISTS payments (
           id TEXT PRIMARY KEY,
           client_name TEXT NOT NULL,
           contact TEXT NOT NULL,
           total_paid TEXT NOT NULL,
           status TEXT NOT NULL CHECK (status IN ('Paid', 'Downpayment'))
       )"#,
    r#"CREATE TABLE IF NOT EXISTS users (
           id TEXT PRIMARY KEY,
           full_name TEXT NOT NULL,
           email TEXT NOT NULL UNIQUE,
           password_hash TEXT NOT NULL,
           created_at TEXT NOT NULL
       )"#,
];

pub fn ensure_sqlite_dir(db_url: &str) -> std::io::Result<()> {
    let path = if let Some(path) = db_url.strip_prefix("sqlite://") {
        Some(path)
    } else if let Some(path) = db_url.strip_prefix("sqlite:") {
        Some(path)
    } else {
        None
    };

    let Some(path) = path else {
        return Ok(());
    };

    let path = path.split('?').next().unwrap_or(path);
    if path == ":memory:" || path.is_empty() {
        return Ok(());
    }

    let path = path.strip_prefix("file:").unwrap_or(path);
    let db_path = Path::new(path);
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Opens the one connection the process works through.
///
/// The pool never grows past a single connection and never retires it while
/// healthy; a connection found broken on acquire is replaced.
pub async fn connect(config: &AppConfig) -> Result<SqlitePool, sqlx::Error> {
    let connect_options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .test_before_acquire(true)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(connect_options)
        .await
}

pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

pub async fn seed_defaults(
    gateway: &PersistenceGateway,
    config: &AppConfig,
) -> Result<(), GatewayError> {
    match &config.seed_account {
        Some(seed) => seed_account(gateway, seed).await,
        None => Ok(()),
    }
}

async fn seed_account(gateway: &PersistenceGateway, seed: &SeedAccount) -> Result<(), GatewayError> {
    if gateway.user_exists(&seed.email).await? {
        return Ok(());
    }

    if seed.password.len() < 8 {
        log::warn!(
            "PETGROOM_SEED_PASSWORD is shorter than 8 characters. Set a stronger password for {}.",
            seed.email
        );
    }

    gateway
        .try_register_user(&seed.full_name, &seed.email, &seed.password)
        .await?;
    log::info!("Seeded staff account {}", seed.email);
    Ok(())
}
