//! Encryption of secrets stored in instance config files.
//!
//! Values are encrypted with RSA PKCS#1 v1.5 against the instance's public
//! key and stored as standard base64 so they can live inside JSON strings.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use thiserror::Error;

/// Errors raised while encrypting or decrypting stored secrets.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The public key is neither an SPKI nor a PKCS#1 RSA PEM document.
    #[error("public key is not a valid RSA PEM key")]
    InvalidPublicKey,
    /// The private key is neither a PKCS#8 nor a PKCS#1 RSA PEM document.
    #[error("private key is not a valid RSA PEM key")]
    InvalidPrivateKey,
    #[error("RSA encryption failed: {0}")]
    Encrypt(#[source] rsa::Error),
    #[error("RSA decryption failed: {0}")]
    Decrypt(#[source] rsa::Error),
    #[error("ciphertext is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("decrypted value is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Parses an RSA public key from PEM (`PUBLIC KEY` or `RSA PUBLIC KEY`).
///
/// # Errors
/// Returns [`CryptoError::InvalidPublicKey`] if the document cannot be parsed.
pub fn parse_public_key(pem: &str) -> Result<RsaPublicKey, CryptoError> {
    let pem = pem.trim();
    RsaPublicKey::from_public_key_pem(pem)
        .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
        .map_err(|_| CryptoError::InvalidPublicKey)
}

/// Parses an RSA private key from PEM (`PRIVATE KEY` or `RSA PRIVATE KEY`).
///
/// # Errors
/// Returns [`CryptoError::InvalidPrivateKey`] if the document cannot be parsed.
pub fn parse_private_key(pem: &str) -> Result<RsaPrivateKey, CryptoError> {
    let pem = pem.trim();
    RsaPrivateKey::from_pkcs8_pem(pem)
        .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
        .map_err(|_| CryptoError::InvalidPrivateKey)
}

/// Encrypts `plaintext` with the PEM encoded public key and returns base64.
///
/// # Errors
/// Returns an error if the key is malformed or the plaintext is longer than
/// the key's modulus allows.
pub fn encrypt(plaintext: &str, public_key_pem: &str) -> Result<String, CryptoError> {
    let key = parse_public_key(public_key_pem)?;
    let mut rng = rand::thread_rng();
    let ciphertext = key
        .encrypt(&mut rng, Pkcs1v15Encrypt, plaintext.as_bytes())
        .map_err(CryptoError::Encrypt)?;
    Ok(STANDARD.encode(ciphertext))
}

/// Decrypts a base64 value produced by [`encrypt`].
///
/// # Errors
/// Returns an error if the key is malformed, the value is not base64, or the
/// ciphertext was not produced for this key.
pub fn decrypt(ciphertext: &str, private_key_pem: &str) -> Result<String, CryptoError> {
    let key = parse_private_key(private_key_pem)?;
    let raw = STANDARD.decode(ciphertext.trim())?;
    let plaintext = key
        .decrypt(Pkcs1v15Encrypt, &raw)
        .map_err(CryptoError::Decrypt)?;
    Ok(String::from_utf8(plaintext)?)
}
