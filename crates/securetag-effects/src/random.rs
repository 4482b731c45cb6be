//! Random effect handler
//!
//! This module legitimately uses `rand::thread_rng()` as it implements the
//! `RandomEffects` trait; this is where actual system randomness is provided.

// Allow disallowed methods in effect handler implementations
#![allow(clippy::disallowed_methods)]

use async_trait::async_trait;
use rand::RngCore;
use securetag_core::RandomEffects;

/// Real random handler using a cryptographically secure thread-local RNG
#[derive(Debug, Clone, Default)]
pub struct RealRandomHandler;

impl RealRandomHandler {
    /// Create a new real random handler
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RandomEffects for RealRandomHandler {
    async fn random_bytes(&self, len: usize) -> Vec<u8> {
        let mut bytes = vec![0u8; len];
        rand::thread_rng().fill_bytes(&mut bytes);
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_random_lengths() {
        let handler = RealRandomHandler::new();
        assert_eq!(handler.random_bytes(8).await.len(), 8);
        assert_eq!(handler.random_hex(32).await.len(), 64);
        assert_ne!(handler.random_bytes(32).await, handler.random_bytes(32).await);
    }
}
