/// Prefixes of the bcrypt variants a stored credential may carry.
const BCRYPT_PREFIXES: [&str; 3] = ["$2a$", "$2b$", "$2y$"];

/// Check whether a stored credential is already a bcrypt hash.
///
/// Structural check only: anything without a recognised prefix is treated as
/// a legacy plaintext password awaiting migration.
pub fn is_hashed(credential: &str) -> bool {
    BCRYPT_PREFIXES
        .iter()
        .any(|prefix| credential.starts_with(prefix))
}
