//! Seeded randomness for deterministic testing

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use securetag_core::RandomEffects;
use std::collections::VecDeque;
use std::sync::Arc;

/// Deterministic random handler.
///
/// Scripted byte strings are handed out first, in order, one per call;
/// afterwards bytes come from a ChaCha20 stream seeded at construction.
#[derive(Debug, Clone)]
pub struct SeededRandomHandler {
    rng: Arc<Mutex<ChaCha20Rng>>,
    script: Arc<Mutex<VecDeque<Vec<u8>>>>,
}

impl SeededRandomHandler {
    /// Create a handler seeded with `seed`
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Arc::new(Mutex::new(ChaCha20Rng::seed_from_u64(seed))),
            script: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Queue byte strings to return from the next calls, in order
    pub fn with_script(self, script: impl IntoIterator<Item = Vec<u8>>) -> Self {
        self.script.lock().extend(script);
        self
    }
}

impl Default for SeededRandomHandler {
    fn default() -> Self {
        Self::new(0x5ec7_7a9)
    }
}

#[async_trait]
impl RandomEffects for SeededRandomHandler {
    async fn random_bytes(&self, len: usize) -> Vec<u8> {
        if let Some(scripted) = self.script.lock().pop_front() {
            return scripted;
        }
        let mut bytes = vec![0u8; len];
        self.rng.lock().fill_bytes(&mut bytes);
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_same_seed_same_bytes() {
        let a = SeededRandomHandler::new(7);
        let b = SeededRandomHandler::new(7);
        assert_eq!(a.random_bytes(16).await, b.random_bytes(16).await);
    }

    #[tokio::test]
    async fn test_script_is_served_first() {
        let handler = SeededRandomHandler::new(7).with_script([vec![1, 2], vec![3]]);
        assert_eq!(handler.random_bytes(8).await, vec![1, 2]);
        assert_eq!(handler.random_bytes(8).await, vec![3]);
        assert_eq!(handler.random_bytes(8).await.len(), 8);
    }
}
