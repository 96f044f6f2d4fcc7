// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A storage-boundary invariant was broken at write time, e.g. a
    /// non-positive compensation or a missing required foreign key.
    /// Not retried; surfaced to the caller as a rejected write.
    ConstraintViolation {
        /// The violated constraint kind (check, foreign key, not null, unique).
        constraint: String,
        /// The storage engine's message.
        message: String,
    },
    /// The target row was absent for an update or delete by id.
    NotFound {
        /// The entity kind, e.g. `"worker"`.
        entity: &'static str,
        /// The missing identifier.
        id: i64,
    },
    /// A filter or sort key does not name a known column. Caller error,
    /// never silently ignored.
    InvalidQuery {
        /// The entity the query was composed against.
        entity: &'static str,
        /// The offending key.
        key: String,
    },
    /// The requested strategy/filter combination is not expressible.
    /// Caller programming error, detected before any statement executes.
    UnsupportedLoadStrategy {
        /// Why the combination is rejected.
        reason: String,
    },
    /// A relationship was accessed after its owning unit of work closed.
    /// The access is never satisfied by silently reopening a connection.
    DetachedAccess {
        /// The association that was read, e.g. `"worker.resumes"`.
        association: &'static str,
    },
    /// No pooled connection became available within the configured wait.
    /// The one transient condition; callers may retry with backoff.
    PoolExhausted(String),
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConstraintViolation {
                constraint,
                message,
            } => {
                write!(f, "Constraint violation ({constraint}): {message}")
            }
            Self::NotFound { entity, id } => write!(f, "No {entity} with id {id}"),
            Self::InvalidQuery { entity, key } => {
                write!(f, "Invalid query against {entity}: unknown key '{key}'")
            }
            Self::UnsupportedLoadStrategy { reason } => {
                write!(f, "Unsupported load strategy: {reason}")
            }
            Self::DetachedAccess { association } => {
                write!(
                    f,
                    "Relationship '{association}' accessed outside its unit of work"
                )
            }
            Self::PoolExhausted(msg) => write!(f, "Connection pool exhausted: {msg}"),
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::DatabaseErrorKind;

        match err {
            diesel::result::Error::DatabaseError(kind, info) => {
                let constraint = match kind {
                    DatabaseErrorKind::CheckViolation => "check",
                    DatabaseErrorKind::ForeignKeyViolation => "foreign key",
                    DatabaseErrorKind::NotNullViolation => "not null",
                    DatabaseErrorKind::UniqueViolation => "unique",
                    _ => return Self::DatabaseError(info.message().to_string()),
                };
                Self::ConstraintViolation {
                    constraint: constraint.to_string(),
                    message: info.message().to_string(),
                }
            }
            // Read paths use `.optional()` and construct a typed NotFound
            // themselves; this arm is a safety net.
            diesel::result::Error::NotFound => {
                Self::DatabaseError(String::from("Record not found"))
            }
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}
