use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl CatalogError {
    /// Classifies a storage failure. Constraint failures raised by SQLite keep their
    /// own kind; everything else is reported as an unavailable store.
    pub fn from_store(err: anyhow::Error) -> Self {
        let constraint = err.chain().find_map(|cause| {
            match cause.downcast_ref::<rusqlite::Error>() {
                Some(rusqlite::Error::SqliteFailure(failure, message))
                    if failure.code == rusqlite::ffi::ErrorCode::ConstraintViolation =>
                {
                    Some(message.clone().unwrap_or_else(|| failure.to_string()))
                }
                _ => None,
            }
        });

        match constraint {
            Some(message) => CatalogError::ConstraintViolation(message),
            None => CatalogError::StoreUnavailable(format!("{err:#}")),
        }
    }
}
