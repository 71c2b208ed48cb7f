use crate::error::Error;

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;
