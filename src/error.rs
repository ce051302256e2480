use rust_decimal::Decimal;

/// Failure of a gateway or front desk operation.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The store could not be reached or the statement failed for a reason
    /// other than a constraint.
    #[error("storage unavailable: {0}")]
    Connectivity(#[source] sqlx::Error),

    #[error("constraint violated: {0}")]
    ConstraintViolation(String),

    #[error("no {entity} matches {key}")]
    NoMatchingRow { entity: &'static str, key: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("email or password is incorrect")]
    InvalidCredentials,

    #[error("insufficient cash: {cash} tendered, {due} due")]
    InsufficientFunds { due: Decimal, cash: Decimal },

    #[error("password hashing failed: {0}")]
    PasswordHash(String),
}

/// Category of a [`GatewayError`], for callers that only branch on the cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Connectivity,
    ConstraintViolation,
    NoMatchingRow,
    InvalidInput,
    InvalidCredentials,
    InsufficientFunds,
    Internal,
}

impl GatewayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::Connectivity(_) => ErrorKind::Connectivity,
            GatewayError::ConstraintViolation(_) => ErrorKind::ConstraintViolation,
            GatewayError::NoMatchingRow { .. } => ErrorKind::NoMatchingRow,
            GatewayError::InvalidInput(_) => ErrorKind::InvalidInput,
            GatewayError::InvalidCredentials => ErrorKind::InvalidCredentials,
            GatewayError::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            GatewayError::PasswordHash(_) => ErrorKind::Internal,
        }
    }

    pub(crate) fn no_match(entity: &'static str, key: impl Into<String>) -> Self {
        GatewayError::NoMatchingRow {
            entity,
            key: key.into(),
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        GatewayError::InvalidInput(message.into())
    }
}

impl From<sqlx::Error> for GatewayError {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind as DbKind;

        if let sqlx::Error::Database(db_err) = &err {
            match db_err.kind() {
                DbKind::UniqueViolation
                | DbKind::ForeignKeyViolation
                | DbKind::NotNullViolation
                | DbKind::CheckViolation => {
                    return GatewayError::ConstraintViolation(db_err.message().to_string());
                }
                _ => {}
            }
        }
        GatewayError::Connectivity(err)
    }
}

impl From<argon2::password_hash::Error> for GatewayError {
    fn from(err: argon2::password_hash::Error) -> Self {
        GatewayError::PasswordHash(err.to_string())
    }
}
