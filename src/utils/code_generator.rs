//! Short code generation.
//!
//! [`crate::application::services::LinkService`] only depends on the
//! [`CodeGenerator`] trait, so the alphabet, length and randomness source can
//! change without touching request handling. Collision avoidance against
//! stored codes is done by the service.

use crate::error::AppError;
use base64::Engine as _;
use serde_json::json;

/// Number of random bytes per code. Six bytes encode to eight characters.
pub const DEFAULT_CODE_BYTES: usize = 6;

/// Produces candidate short codes.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Returns a fresh candidate code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when no randomness is available.
    fn generate(&self) -> Result<String, AppError>;
}

/// Cryptographically random codes encoded as URL-safe base64 without padding.
#[derive(Debug, Clone, Copy)]
pub struct RandomCodeGenerator {
    byte_len: usize,
}

impl RandomCodeGenerator {
    /// Creates a generator drawing `byte_len` random bytes per code.
    pub fn new(byte_len: usize) -> Self {
        Self { byte_len }
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_BYTES)
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> Result<String, AppError> {
        let mut buffer = vec![0u8; self.byte_len];

        getrandom::fill(&mut buffer).map_err(|e| {
            tracing::error!(error = %e, "System random source failed");
            AppError::internal("Internal server error", json!({}))
        })?;

        Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
    }
}
