use crate::models::{CompanyProfile, SimilarityOptions, SimilarityScore};
use moka::future::Cache;
use sha2::{Digest, Sha256};
use std::time::Duration;

/// Memoises pair scores for the HTTP layer.
///
/// Scores are a pure function of `(target, candidate, options)`, so the
/// SHA-256 of that triple's JSON is a stable key. Values are stored together
/// with a checksum and re-validated on read; a corrupted entry is treated as
/// a miss and recomputed.
#[derive(Clone)]
pub struct ScoreCache {
    inner: Cache<String, String>,
}

/// Serialized score plus its SHA-256 checksum.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ValidatedCacheEntry {
    /// The cached score as a JSON string.
    pub data: String,
    /// SHA-256 checksum of `data` (hex encoded).
    pub checksum: String,
}

impl ValidatedCacheEntry {
    pub fn new(data: String) -> Self {
        let checksum = sha256_hex(data.as_bytes());
        Self { data, checksum }
    }

    /// Returns true if the checksum matches, false if tampered.
    pub fn is_valid(&self) -> bool {
        sha256_hex(self.data.as_bytes()) == self.checksum
    }

    pub fn serialize(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Returns the payload if the entry parses and its checksum matches.
    pub fn deserialize_and_validate(serialized: &str) -> Option<String> {
        let entry: ValidatedCacheEntry = serde_json::from_str(serialized).ok()?;

        if entry.is_valid() {
            Some(entry.data)
        } else {
            tracing::warn!(
                "Score cache checksum mismatch ({} bytes of data)",
                entry.data.len()
            );
            None
        }
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Stable cache key for a scoring request.
pub fn fingerprint(
    target: &CompanyProfile,
    candidate: &CompanyProfile,
    options: &SimilarityOptions,
) -> String {
    let payload = serde_json::to_vec(&(target, candidate, options)).unwrap_or_default();
    sha256_hex(&payload)
}

impl ScoreCache {
    pub fn new(ttl: Duration, capacity: u64) -> Self {
        Self {
            inner: Cache::builder()
                .time_to_live(ttl)
                .max_capacity(capacity)
                .build(),
        }
    }

    pub async fn get(&self, key: &str) -> Option<SimilarityScore> {
        let cached = self.inner.get(key).await?;
        let score = ValidatedCacheEntry::deserialize_and_validate(&cached)
            .and_then(|data| serde_json::from_str(&data).ok());
        if score.is_none() {
            tracing::warn!("Evicting corrupted score cache entry {}", key);
            self.inner.invalidate(key).await;
        }
        score
    }

    pub async fn insert(&self, key: String, score: &SimilarityScore) {
        match serde_json::to_string(score) {
            Ok(json) => {
                let entry = ValidatedCacheEntry::new(json);
                self.inner.insert(key, entry.serialize()).await;
            }
            Err(e) => tracing::warn!("Failed to serialize score for cache: {}", e),
        }
    }

    /// Test hook for writing a raw entry.
    #[cfg(test)]
    async fn insert_raw(&self, key: String, raw: String) {
        self.inner.insert(key, raw).await;
    }
}
