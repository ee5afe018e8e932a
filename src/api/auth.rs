use crate::error::{MeteoError, MeteoResult};
use sha2::{Digest, Sha256};

/// Static bearer-token check. Tokens are held and compared as SHA-256 digests.
#[derive(Debug, Clone, Default)]
pub struct TokenGuard {
    digest: Option<Vec<u8>>,
}

impl TokenGuard {
    pub fn new(token: Option<&str>) -> Self {
        Self {
            digest: token.map(digest),
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.digest.is_some()
    }

    /// Checks an `Authorization` header value.
    pub fn verify(&self, authorization: Option<&str>) -> MeteoResult<()> {
        let Some(expected) = &self.digest else {
            return Ok(());
        };

        let token = authorization
            .and_then(|value| value.split_once(' '))
            .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
            .map(|(_, token)| token.trim())
            .ok_or(MeteoError::Unauthorized)?;

        if digest(token) == *expected {
            Ok(())
        } else {
            Err(MeteoError::Unauthorized)
        }
    }
}

fn digest(token: &str) -> Vec<u8> {
    Sha256::digest(token.as_bytes()).to_vec()
}
