//! Mapping of sqlx errors into [`AppError`].

use unitrack_core::error::{AppError, ErrorKind};

/// Map a sqlx error, turning unique-constraint violations into conflicts.
///
/// `conflict` is the caller-facing message used for the conflict case.
pub(crate) fn map_write_error(
    context: &str,
    conflict: impl FnOnce() -> String,
    err: sqlx::Error,
) -> AppError {
    let unique = matches!(&err, sqlx::Error::Database(db) if db.is_unique_violation());
    if unique {
        AppError::with_source(ErrorKind::Conflict, conflict(), err)
    } else {
        AppError::with_source(ErrorKind::Database, format!("{context}: {err}"), err)
    }
}

/// Map a sqlx error from a read or a write that cannot conflict.
pub(crate) fn map_error(context: &str, err: sqlx::Error) -> AppError {
    AppError::with_source(ErrorKind::Database, format!("{context}: {err}"), err)
}
