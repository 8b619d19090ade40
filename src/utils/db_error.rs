//! Helpers for classifying database errors.

/// Returns the violated constraint name if `e` is a unique violation.
///
/// Returns `Some("")` when the driver reports a unique violation without
/// naming the constraint.
pub fn unique_violation(e: &sqlx::Error) -> Option<&str> {
    let db_err = e.as_database_error()?;

    if !db_err.is_unique_violation() {
        return None;
    }

    Some(db_err.constraint().unwrap_or_default())
}
