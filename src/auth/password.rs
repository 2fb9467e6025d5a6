use bcrypt::{hash, verify, BcryptError};

/// Fixed bcrypt work factor. Raising it invalidates nothing, existing
/// hashes keep their embedded cost.
const HASH_COST: u32 = 10;

/// Hash a plain-text password for storage.
pub fn hash_password(password: &str) -> Result<String, BcryptError> {
    hash(password, HASH_COST)
}

/// Verify a plain-text password against a stored hash.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, BcryptError> {
    verify(password, password_hash)
}
