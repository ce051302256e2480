use chrono::Utc;

use super::{report, PersistenceGateway};
use crate::{
    auth::{hash_password, new_id, verify_password},
    error::GatewayError,
    models::{require, UserAccount, UserRow},
};

impl PersistenceGateway {
    pub async fn register_user(&self, full_name: &str, email: &str, password: &str) -> bool {
        report(
            "register_user",
            self.try_register_user(full_name, email, password).await,
        )
        .is_some()
    }

    /// Stores a new account with an Argon2 hash of `password`. A second
    /// account with the same email fails with `ConstraintViolation`.
    pub async fn try_register_user(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserAccount, GatewayError> {
        require("full name", full_name)?;
        require("email", email)?;
        if password.is_empty() {
            return Err(GatewayError::invalid("password is required"));
        }

        let password_hash = hash_password(password)?;
        let row = UserRow {
            id: new_id(),
            full_name: full_name.to_string(),
            email: email.to_string(),
            password_hash,
            created_at: Utc::now().to_rfc3339(),
        };

        sqlx::query(
            r#"INSERT INTO users (id, full_name, email, password_hash, created_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(&row.id)
        .bind(&row.full_name)
        .bind(&row.email)
        .bind(&row.password_hash)
        .bind(&row.created_at)
        .execute(&self.pool)
        .await?;

        log::info!("Registered user {}", row.email);
        Ok(row.into())
    }

    pub async fn validate_user(&self, email: &str, password: &str) -> bool {
        report("validate_user", self.try_validate_user(email, password).await).is_some()
    }

    /// Succeeds only when exactly one account has `email` and its stored hash
    /// verifies `password`.
    pub async fn try_validate_user(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserAccount, GatewayError> {
        let mut rows = sqlx::query_as::<_, UserRow>(
            r#"SELECT id, full_name, email, password_hash, created_at
               FROM users
               WHERE email = ?"#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        if rows.len() != 1 {
            return Err(GatewayError::InvalidCredentials);
        }
        let user = rows.remove(0);

        if !verify_password(password, &user.password_hash) {
            return Err(GatewayError::InvalidCredentials);
        }
        Ok(user.into())
    }

    pub async fn user_exists(&self, email: &str) -> Result<bool, GatewayError> {
        let existing = sqlx::query_as::<_, (String,)>("SELECT id FROM users WHERE email = ? LIMIT 1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(existing.is_some())
    }
}
