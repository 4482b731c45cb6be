//! Randomness effect used for tag identifiers and secure tokens.

use async_trait::async_trait;

/// Source of random bytes
#[async_trait]
pub trait RandomEffects: Send + Sync {
    /// Fill a fresh buffer of `len` random bytes
    async fn random_bytes(&self, len: usize) -> Vec<u8>;

    /// Random bytes rendered as lowercase hex (`2 * len` characters)
    async fn random_hex(&self, len: usize) -> String {
        hex::encode(self.random_bytes(len).await)
    }
}

/// Blanket implementation for Arc<T> where T: RandomEffects
#[async_trait]
impl<T: RandomEffects + ?Sized> RandomEffects for std::sync::Arc<T> {
    async fn random_bytes(&self, len: usize) -> Vec<u8> {
        (**self).random_bytes(len).await
    }
}
