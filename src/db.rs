use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;

use crate::config::AppConfig;

/// Failure of a store operation, shared by every repository trait.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique index rejected the write. Carries the conflicting field.
    #[error("duplicate {0}")]
    Duplicate(&'static str),

    /// The row points at a user that no longer exists.
    #[error("referenced user does not exist")]
    UnknownUser,

    #[error("store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

pub async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("connect to database")
}

pub async fn migrate(db: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(db)
        .await
        .context("run migrations")?;
    Ok(())
}

/// Maps constraint violations on writes: a unique index becomes
/// [`StoreError::Duplicate`], naming the field via `fields` (constraint name →
/// field), and a foreign key becomes [`StoreError::UnknownUser`]. Anything
/// else stays a store fault.
pub(crate) fn map_constraint_violation(
    err: sqlx::Error,
    fields: &[(&str, &'static str)],
) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let field = db_err
                .constraint()
                .and_then(|c| fields.iter().find(|(name, _)| *name == c))
                .map(|(_, field)| *field)
                .unwrap_or("record");
            return StoreError::Duplicate(field);
        }
        if db_err.is_foreign_key_violation() {
            return StoreError::UnknownUser;
        }
    }
    StoreError::Unavailable(err)
}

#[cfg(test)]
mod tests {
    use std::{borrow::Cow, error::Error as StdError, fmt};

    use sqlx::error::{DatabaseError, ErrorKind};

    use super::*;

    #[derive(Debug)]
    struct PgViolation {
        kind: ErrorKind,
        constraint: &'static str,
    }

    impl fmt::Display for PgViolation {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "violates constraint {}", self.constraint)
        }
    }

    impl StdError for PgViolation {}

    impl DatabaseError for PgViolation {
        fn message(&self) -> &str {
            "constraint violation"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            match self.kind {
                ErrorKind::UniqueViolation => Some("23505".into()),
                ErrorKind::ForeignKeyViolation => Some("23503".into()),
                _ => None,
            }
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn constraint(&self) -> Option<&str> {
            Some(self.constraint)
        }

        fn kind(&self) -> ErrorKind {
            match self.kind {
                ErrorKind::UniqueViolation => ErrorKind::UniqueViolation,
                ErrorKind::ForeignKeyViolation => ErrorKind::ForeignKeyViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    fn violation(kind: ErrorKind, constraint: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(PgViolation { kind, constraint }))
    }

    const FIELDS: &[(&str, &str)] = &[
        ("users_email_key", "email"),
        ("users_username_key", "username"),
    ];

    #[test]
    fn unique_violation_names_the_field() {
        let err = violation(ErrorKind::UniqueViolation, "users_username_key");
        assert!(matches!(
            map_constraint_violation(err, FIELDS),
            StoreError::Duplicate("username")
        ));
    }

    #[test]
    fn unlisted_unique_constraint_is_still_a_duplicate() {
        let err = violation(ErrorKind::UniqueViolation, "some_other_key");
        assert!(matches!(
            map_constraint_violation(err, FIELDS),
            StoreError::Duplicate("record")
        ));
    }

    #[test]
    fn foreign_key_violation_is_unknown_user() {
        let err = violation(ErrorKind::ForeignKeyViolation, "reviews_user_id_fkey");
        assert!(matches!(
            map_constraint_violation(err, &[]),
            StoreError::UnknownUser
        ));
    }

    #[test]
    fn other_errors_stay_store_faults() {
        assert!(matches!(
            map_constraint_violation(sqlx::Error::PoolTimedOut, FIELDS),
            StoreError::Unavailable(_)
        ));
    }
}
