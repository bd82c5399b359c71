use super::ValidationError;
use rand::RngCore;
use secrecy::{ExposeSecret, Secret};
use sha2::{Digest, Sha256};

/// A freshly generated invite or reset secret. Only ever leaves the process
/// inside an email; the store holds nothing but its hash.
#[derive(Debug, Clone)]
pub struct PlaintextToken(Secret<String>);

impl PlaintextToken {
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(Secret::new(hex::encode(bytes)))
    }

    pub fn parse(s: Secret<String>) -> Result<Self, ValidationError> {
        if s.expose_secret().is_empty() {
            return Err(ValidationError::new("Token is missing".to_string()));
        }
        Ok(Self(s))
    }
}

impl PartialEq for PlaintextToken {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl AsRef<Secret<String>> for PlaintextToken {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

/// One-way SHA-256 digest of a [`PlaintextToken`], hex-encoded. This is the
/// only token form that may be persisted or used for lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenHash(String);

impl TokenHash {
    pub fn of(token: &PlaintextToken) -> Self {
        let digest = Sha256::digest(token.as_ref().expose_secret().as_bytes());
        Self(hex::encode(digest))
    }

    pub fn parse(s: String) -> Result<Self, ValidationError> {
        if s.len() != 64 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValidationError::new(
                "Invalid token hash".to_string(),
            ));
        }
        Ok(Self(s))
    }
}

impl AsRef<str> for TokenHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
