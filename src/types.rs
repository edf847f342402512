//! Content identity types for page-level deduplication

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Exact content hash using SHA256 (64-character hex string)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash(pub String);

impl ContentHash {
    /// Compute SHA256 hash of content
    pub fn compute(content: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        let result = hasher.finalize();
        ContentHash(hex::encode(result))
    }

    /// Get the underlying string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ContentHash> for String {
    fn from(hash: ContentHash) -> Self {
        hash.0
    }
}

/// Minhash signature: one 32-bit minimum per hash band.
///
/// The fraction of positions at which two signatures agree estimates the
/// Jaccard similarity of the underlying shingle sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinhashSignature {
    values: Vec<u32>,
}

impl MinhashSignature {
    /// Compute the signature of a shingle set under `num_bands` hash bands.
    ///
    /// Returns `None` for an empty shingle set: there is nothing to
    /// fingerprint, and a signature of placeholder values would spuriously
    /// match other empty pages.
    pub fn compute<'a, I>(shingles: I, num_bands: usize) -> Option<Self>
    where
        I: IntoIterator<Item = &'a str> + Clone,
    {
        let mut values = Vec::with_capacity(num_bands);
        for band in 0..num_bands {
            let minimum = shingles
                .clone()
                .into_iter()
                .map(|shingle| Self::band_hash(band, shingle))
                .min()?;
            values.push(minimum);
        }
        Some(Self { values })
    }

    /// Number of bands in this signature
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the signature has no bands
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fraction of positions at which two signatures agree.
    ///
    /// Signatures of different lengths come from incompatible configurations
    /// and are treated as entirely dissimilar.
    pub fn similarity(&self, other: &MinhashSignature) -> f64 {
        if self.values.len() != other.values.len() || self.values.is_empty() {
            return 0.0;
        }
        let matching = self
            .values
            .iter()
            .zip(other.values.iter())
            .filter(|(a, b)| a == b)
            .count();
        matching as f64 / self.values.len() as f64
    }

    /// Band-specific hash of a shingle, reduced to 32 bits.
    ///
    /// SHA256 over the band index's decimal form followed by the shingle
    /// bytes, keeping the low 32 bits of the digest. The reduction matches
    /// interpreting the full digest as an integer modulo 2^32.
    fn band_hash(band: usize, shingle: &str) -> u32 {
        let mut hasher = Sha256::new();
        hasher.update(band.to_string().as_bytes());
        hasher.update(shingle.as_bytes());
        let digest = hasher.finalize();
        u32::from_be_bytes([digest[28], digest[29], digest[30], digest[31]])
    }
}

/// Combined fingerprint of a page's normalized text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentFingerprint {
    /// Exact content hash for exact-duplicate detection
    pub hash: ContentHash,
    /// Minhash signature for near-duplicate detection; absent when the text
    /// has too few words to form a single shingle
    pub signature: Option<MinhashSignature>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_hash_compute() {
        let hash = ContentHash::compute("hello world");
        // SHA256 of "hello world"
        assert_eq!(
            hash.as_str(),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );

        let hash2 = ContentHash::compute("hello world");
        assert_eq!(hash, hash2);
    }

    #[test]
    fn test_content_hash_differs_for_different_content() {
        assert_ne!(
            ContentHash::compute("hello world"),
            ContentHash::compute("hello world!")
        );
    }

    #[test]
    fn test_signature_fixed_length() {
        let shingles = ["a b c", "b c d", "c d e"];
        let sig = MinhashSignature::compute(shingles.iter().copied(), 64).unwrap();
        assert_eq!(sig.len(), 64);
    }

    #[test]
    fn test_signature_deterministic() {
        let shingles = ["one two three", "two three four"];
        let sig1 = MinhashSignature::compute(shingles.iter().copied(), 32).unwrap();
        let sig2 = MinhashSignature::compute(shingles.iter().copied(), 32).unwrap();
        assert_eq!(sig1, sig2);
        assert_eq!(sig1.similarity(&sig2), 1.0);
    }

    #[test]
    fn test_signature_order_independent() {
        let forward = ["a b c", "b c d", "c d e"];
        let reversed = ["c d e", "b c d", "a b c"];
        let sig1 = MinhashSignature::compute(forward.iter().copied(), 16).unwrap();
        let sig2 = MinhashSignature::compute(reversed.iter().copied(), 16).unwrap();
        assert_eq!(sig1, sig2, "band minima do not depend on iteration order");
    }

    #[test]
    fn test_signature_empty_shingle_set() {
        let shingles: [&str; 0] = [];
        assert!(MinhashSignature::compute(shingles.iter().copied(), 64).is_none());
    }

    #[test]
    fn test_similarity_mismatched_lengths() {
        let shingles = ["x y z"];
        let sig32 = MinhashSignature::compute(shingles.iter().copied(), 32).unwrap();
        let sig64 = MinhashSignature::compute(shingles.iter().copied(), 64).unwrap();
        assert_eq!(sig32.similarity(&sig64), 0.0);
    }

    #[test]
    fn test_similarity_disjoint_sets_is_low() {
        let a = ["alpha beta gamma", "beta gamma delta"];
        let b = ["red green blue", "green blue yellow"];
        let sig_a = MinhashSignature::compute(a.iter().copied(), 64).unwrap();
        let sig_b = MinhashSignature::compute(b.iter().copied(), 64).unwrap();
        assert!(
            sig_a.similarity(&sig_b) < 0.2,
            "disjoint shingle sets should rarely collide, got {}",
            sig_a.similarity(&sig_b)
        );
    }
}
