use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHasher};

use crate::domain::repository::PasswordHasherPort;
use crate::error::HrServiceError;

/// Argon2id with the crate's default parameters, encoded as a PHC string.
#[derive(Clone, Default)]
pub struct Argon2Hasher;

impl PasswordHasherPort for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, HrServiceError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("hash password: {e}"))?;
        Ok(hash.to_string())
    }
}
