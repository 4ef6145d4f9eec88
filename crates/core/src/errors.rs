use thiserror::Error;

#[derive(Error, Debug)]
pub enum CampusError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Assistant gateway error: {0}")]
    Gateway(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type CampusResult<T> = Result<T, CampusError>;

/// Rejects a blank (empty or whitespace-only) required field.
pub fn require_field(value: &str, field: &str) -> CampusResult<()> {
    if value.trim().is_empty() {
        return Err(CampusError::Validation(format!("{} is required", field)));
    }
    Ok(())
}
