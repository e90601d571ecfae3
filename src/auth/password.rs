use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use lazy_static::lazy_static;

use crate::errors::AppError;

lazy_static! {
    /// Configured Argon2 instance with explicit parameters for consistent hashing
    /// Parameters: memory=19456 KiB, iterations=2, parallelism=1
    static ref ARGON2: Argon2<'static> = Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(19456, 2, 1, None).expect("Invalid Argon2 params")
    );
}

/// Hash a password using Argon2id
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    ARGON2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::InternalError(format!("Failed to hash password: {e}")))
}

/// Verify a password against a stored hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::InternalError(format!("Invalid password hash: {e}")))?;
    Ok(ARGON2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_well_formed_phc_string() {
        let hash = hash_password("secure_password123").expect("Should hash password");

        let parsed = PasswordHash::new(&hash).expect("PHC string should round-trip the parser");
        assert_eq!(parsed.algorithm.as_str(), "argon2id");
        assert!(parsed.salt.is_some(), "Hash should embed a salt");
        // The configured parameters must travel with the hash
        assert!(hash.contains("m=19456,t=2,p=1"), "got: {hash}");
    }

    #[test]
    fn test_same_password_hashes_with_fresh_salts() {
        let hash1 = hash_password("same_password").expect("Should hash password");
        let hash2 = hash_password("same_password").expect("Should hash password");

        let salt1 = PasswordHash::new(&hash1).unwrap().salt.unwrap().to_string();
        let salt2 = PasswordHash::new(&hash2).unwrap().salt.unwrap().to_string();
        assert_ne!(salt1, salt2, "Each hash should get its own salt");

        // Both still verify despite differing salts
        assert!(verify_password("same_password", &hash1).unwrap());
        assert!(verify_password("same_password", &hash2).unwrap());
    }

    #[test]
    fn test_verify_accepts_only_the_matching_password() {
        let hash = hash_password("correct_password").expect("Should hash password");

        assert!(verify_password("correct_password", &hash).unwrap());
        assert!(!verify_password("wrong_password", &hash).unwrap());
        assert!(!verify_password("", &hash).unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        let result = verify_password("password", "not_a_hash");
        assert!(result.is_err(), "Invalid hash should return error");
    }
}
