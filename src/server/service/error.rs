use derive_more::{Display, Error};

#[derive(Debug, Display, Error)]
pub(crate) enum OrderError {
    /// malformed or inconsistent request
    #[display("{_0}")]
    InvalidInput(#[error(not(source))] String),
    /// referenced entity is absent
    #[display("{_0}")]
    NotFound(#[error(not(source))] String),
    /// storage or unexpected failure, the cause is kept for diagnostics
    #[display("Server error")]
    Internal(#[error(not(source))] anyhow::Error),
}

impl OrderError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}
