//! Admin password hashing with Argon2id.
//!
//! Hashes are stored as PHC strings, which carry their own salt and
//! parameters.

use argon2::{
    Argon2, PasswordHasher, PasswordVerifier,
    password_hash::{Error as PasswordHashError, PasswordHash, SaltString},
};
use rand::{RngCore, rngs::OsRng};

const SALT_BYTES: usize = 16;

/// Hash `password` under a fresh random salt.
///
/// # Errors
///
/// Returns an error when Argon2 rejects the input or parameters.
pub fn hash_password(password: &str) -> Result<String, PasswordHashError> {
    let mut salt = [0_u8; SALT_BYTES];

    OsRng.fill_bytes(&mut salt);

    let salt = SaltString::encode_b64(&salt)?;

    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Check `password` against a stored PHC string.
///
/// Malformed stored hashes never verify.
#[must_use]
pub fn verify_password(phc: &str, password: &str) -> bool {
    PasswordHash::new(phc).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn matching_password_verifies() -> TestResult {
        let phc = hash_password("hunter2")?;

        assert!(verify_password(&phc, "hunter2"), "correct password");
        assert!(!verify_password(&phc, "hunter3"), "wrong password");

        Ok(())
    }

    #[test]
    fn hashes_are_salted_argon2id_phc_strings() -> TestResult {
        let first = hash_password("secret")?;
        let second = hash_password("secret")?;

        assert!(first.starts_with("$argon2id$"), "unexpected format {first}");
        assert_ne!(first, second, "each hash gets its own salt");

        Ok(())
    }

    #[test]
    fn malformed_stored_hash_never_verifies() {
        assert!(!verify_password("not-a-phc-string", "secret"), "garbage hash");
        assert!(!verify_password("", ""), "empty hash");
    }
}
