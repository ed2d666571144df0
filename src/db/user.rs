use std::num::NonZeroU32;

use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use ring::digest::SHA256_OUTPUT_LEN;
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use super::DbError;

const PBKDF2_ALGORITHM: &str = "pbkdf2_sha256";
const PBKDF2_ITERATIONS: u32 = 260_000;
const SALT_BYTES: usize = 16;
const UNUSABLE_PASSWORD_PREFIX: &str = "!";

#[derive(Debug, Clone)]
pub struct NewSuperuser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Encoded as `pbkdf2_sha256$<iterations>$<salt>$<base64 hash>`.
    pub password: String,
    pub is_staff: bool,
    pub is_active: bool,
    pub is_superuser: bool,
    pub date_joined: String,
}

impl User {
    /// Replaces the stored hash. Call [`super::AdminStore::save_user`] to persist it.
    ///
    /// # Errors
    /// Returns an error if no salt can be generated.
    pub fn set_password(&mut self, raw: &str) -> Result<(), DbError> {
        self.password = hash_password(raw)?;
        Ok(())
    }

    #[must_use]
    pub fn check_password(&self, raw: &str) -> bool {
        verify_password(raw, &self.password)
    }

    #[must_use]
    pub fn has_usable_password(&self) -> bool {
        !self.password.starts_with(UNUSABLE_PASSWORD_PREFIX)
    }
}

/// Hashes `raw` with PBKDF2-HMAC-SHA256 and a random salt.
///
/// # Errors
/// Returns [`DbError::PasswordHash`] if the system RNG fails.
pub(super) fn hash_password(raw: &str) -> Result<String, DbError> {
    let mut salt = [0u8; SALT_BYTES];
    SystemRandom::new()
        .fill(&mut salt)
        .map_err(|_| DbError::PasswordHash)?;
    let salt = URL_SAFE_NO_PAD.encode(salt);
    let iterations = NonZeroU32::new(PBKDF2_ITERATIONS).ok_or(DbError::PasswordHash)?;
    let mut hash = [0u8; SHA256_OUTPUT_LEN];
    pbkdf2::derive(
        pbkdf2::PBKDF2_HMAC_SHA256,
        iterations,
        salt.as_bytes(),
        raw.as_bytes(),
        &mut hash,
    );
    Ok(format!(
        "{PBKDF2_ALGORITHM}${iterations}${salt}${}",
        STANDARD.encode(hash)
    ))
}

/// Checks `raw` against an encoded hash. Unknown formats never match.
#[must_use]
pub(super) fn verify_password(raw: &str, encoded: &str) -> bool {
    let mut parts = encoded.splitn(4, '$');
    let (Some(algorithm), Some(iterations), Some(salt), Some(hash)) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    if algorithm != PBKDF2_ALGORITHM {
        return false;
    }
    let Some(iterations) = iterations.parse::<u32>().ok().and_then(NonZeroU32::new) else {
        return false;
    };
    let Ok(expected) = STANDARD.decode(hash) else {
        return false;
    };
    pbkdf2::verify(
        pbkdf2::PBKDF2_HMAC_SHA256,
        iterations,
        salt.as_bytes(),
        raw.as_bytes(),
        &expected,
    )
    .is_ok()
}

pub(super) fn unusable_password() -> String {
    format!(
        "{UNUSABLE_PASSWORD_PREFIX}{}",
        uuid::Uuid::new_v4().simple()
    )
}

pub(super) fn joined_now() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let encoded = hash_password("s3cret").unwrap();
        assert!(encoded.starts_with("pbkdf2_sha256$260000$"));
        assert!(verify_password("s3cret", &encoded));
        assert!(!verify_password("wrong", &encoded));
    }

    #[test]
    fn test_hashes_are_salted() {
        assert_ne!(hash_password("same").unwrap(), hash_password("same").unwrap());
    }

    #[test]
    fn test_verify_rejects_unusable_and_malformed() {
        assert!(!verify_password("anything", &unusable_password()));
        assert!(!verify_password("anything", "md5$1$salt$hash"));
        assert!(!verify_password("anything", "pbkdf2_sha256$0$salt$hash"));
        assert!(!verify_password("anything", ""));
    }
}
