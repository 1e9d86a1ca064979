use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Provides one-way credential hashing (internally uses bcrypt).
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Work factor used when none is configured.
    pub const DEFAULT_COST: u32 = 10;
    /// Lowest accepted work factor.
    pub const MIN_COST: u32 = 10;
    /// Highest work factor bcrypt supports.
    pub const MAX_COST: u32 = 31;

    /// Create a new password hasher with the default work factor.
    pub fn new() -> Self {
        Self {
            cost: Self::DEFAULT_COST,
        }
    }

    /// Create a password hasher with an explicit work factor.
    ///
    /// # Errors
    /// * `InvalidCost` - Cost is outside `MIN_COST..=MAX_COST`
    pub fn with_cost(cost: u32) -> Result<Self, PasswordError> {
        if !(Self::MIN_COST..=Self::MAX_COST).contains(&cost) {
            return Err(PasswordError::InvalidCost {
                min: Self::MIN_COST,
                max: Self::MAX_COST,
                actual: cost,
            });
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password.
    ///
    /// Uses bcrypt with a random salt, so hashing the same password twice
    /// yields different strings.
    ///
    /// # Returns
    /// Modular crypt format hash (`$2b$<cost>$<salt+hash>`)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        bcrypt::hash(password, self.cost).map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Malformed hashes (including legacy plaintext credentials) never match.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or(false)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("wrong_password", &hash));
    }

    #[test]
    fn test_hash_uses_bcrypt_format_and_random_salt() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("p@ss").expect("Failed to hash password");
        let second = hasher.hash("p@ss").expect("Failed to hash password");

        assert!(first.starts_with("$2b$10$"));
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_malformed_hash_is_false() {
        let hasher = PasswordHasher::new();

        assert!(!hasher.verify("password", "invalid_hash"));
        assert!(!hasher.verify("password", "password"));
        assert!(!hasher.verify("password", ""));
        assert!(!hasher.verify("password", "$2b$10$truncated"));
    }

    #[test]
    fn test_with_cost_bounds() {
        assert!(PasswordHasher::with_cost(9).is_err());
        assert!(PasswordHasher::with_cost(32).is_err());
        assert_eq!(PasswordHasher::with_cost(11).unwrap().cost(), 11);
    }
}
