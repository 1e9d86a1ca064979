use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid bcrypt cost {actual}: expected {min}..={max}")]
    InvalidCost { min: u32, max: u32, actual: u32 },
}
