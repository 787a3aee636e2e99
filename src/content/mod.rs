//! Deterministic payload content
//!
//! File content is a sequence of `file_bytes / 8` signed 64-bit integers
//! drawn from a seeded PRNG and stored in native byte order. A given seed
//! always yields the same stream, across runs and platforms, which is what
//! makes cross-run deduplication tests meaningful.
//!
//! # Performance
//!
//! Uses the xoshiro256++ PRNG. Generation happens outside the timed write
//! region, but for per-file modes it still dominates CPU time on small files.
//!
//! # Example
//!
//! ```
//! use dirpulse::content::ContentGenerator;
//!
//! let mut a = ContentGenerator::new(12345);
//! let mut b = ContentGenerator::new(12345);
//!
//! assert_eq!(a.next_payload(64).unwrap(), b.next_payload(64).unwrap());
//! ```

pub mod source;

pub use source::PayloadSource;

use crate::error::ConfigError;
use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Width of one payload value in bytes
pub const VALUE_BYTES: u64 = 8;

/// Seeded generator of payload values
///
/// Owns its PRNG state; every call to [`next_payload`](Self::next_payload)
/// advances the stream.
#[derive(Debug, Clone)]
pub struct ContentGenerator {
    seed: u64,
    rng: Xoshiro256PlusPlus,
}

impl ContentGenerator {
    /// Create a generator positioned at the start of the stream for `seed`
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Rewind to the start of the stream
    pub fn reseed(&mut self) {
        self.rng = Xoshiro256PlusPlus::seed_from_u64(self.seed);
    }

    /// Draw the next payload of `n` bytes
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::FileSizeNotMultipleOf8` if `n` is not a multiple
    /// of 8. The request is never truncated or padded.
    pub fn next_payload(&mut self, n: u64) -> Result<Payload, ConfigError> {
        check_payload_size(n)?;
        Ok(self.draw((n / VALUE_BYTES) as usize))
    }

    /// Draw `count` values; size has been checked by the caller
    fn draw(&mut self, count: usize) -> Payload {
        let values = (0..count).map(|_| self.next_value()).collect();
        Payload { values }
    }

    /// Draw `count` values straight into `buf` in native byte order
    ///
    /// Same stream as [`draw`](Self::draw) followed by
    /// [`Payload::to_ne_bytes`], without the intermediate value vector.
    /// `buf` is cleared first and its allocation reused.
    pub(crate) fn fill_ne_bytes(&mut self, count: usize, buf: &mut Vec<u8>) {
        buf.clear();
        buf.reserve(count * VALUE_BYTES as usize);
        for _ in 0..count {
            buf.extend_from_slice(&self.next_value().to_ne_bytes());
        }
    }

    #[inline]
    fn next_value(&mut self) -> i64 {
        self.rng.gen_range(-i64::MAX..i64::MAX)
    }
}

/// Reject payload sizes that are not whole values
pub fn check_payload_size(n: u64) -> Result<(), ConfigError> {
    if n % VALUE_BYTES != 0 {
        return Err(ConfigError::FileSizeNotMultipleOf8(n));
    }
    Ok(())
}

/// One file's worth of content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    values: Vec<i64>,
}

impl Payload {
    /// Payload values in write order
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Size of the serialized payload in bytes
    pub fn byte_len(&self) -> usize {
        self.values.len() * VALUE_BYTES as usize
    }

    /// Serialize in native byte order with no header or delimiter
    pub fn to_ne_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.byte_len());
        for value in &self.values {
            bytes.extend_from_slice(&value.to_ne_bytes());
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_length() {
        let mut generator = ContentGenerator::new(12345);
        let payload = generator.next_payload(1024).unwrap();

        assert_eq!(payload.values().len(), 128);
        assert_eq!(payload.byte_len(), 1024);
        assert_eq!(payload.to_ne_bytes().len(), 1024);
    }

    #[test]
    fn test_zero_length_payload() {
        let mut generator = ContentGenerator::new(12345);
        let payload = generator.next_payload(0).unwrap();
        assert!(payload.values().is_empty());
    }

    #[test]
    fn test_rejects_unaligned_size() {
        let mut generator = ContentGenerator::new(12345);
        assert_eq!(
            generator.next_payload(1001),
            Err(ConfigError::FileSizeNotMultipleOf8(1001))
        );
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut gen1 = ContentGenerator::new(12345);
        let mut gen2 = ContentGenerator::new(12345);

        for _ in 0..10 {
            assert_eq!(gen1.next_payload(256).unwrap(), gen2.next_payload(256).unwrap());
        }
    }

    #[test]
    fn test_different_seed_different_stream() {
        let mut gen1 = ContentGenerator::new(1);
        let mut gen2 = ContentGenerator::new(2);
        assert_ne!(gen1.next_payload(64).unwrap(), gen2.next_payload(64).unwrap());
    }

    #[test]
    fn test_stream_does_not_repeat() {
        let mut generator = ContentGenerator::new(12345);
        let mut previous = generator.next_payload(64).unwrap();

        for _ in 0..1000 {
            let next = generator.next_payload(64).unwrap();
            assert_ne!(previous, next);
            previous = next;
        }
    }

    #[test]
    fn test_reseed_rewinds() {
        let mut generator = ContentGenerator::new(12345);
        let first = generator.next_payload(128).unwrap();
        generator.next_payload(128).unwrap();

        generator.reseed();
        assert_eq!(generator.next_payload(128).unwrap(), first);
        assert_eq!(generator.seed(), 12345);
    }

    #[test]
    fn test_values_in_range() {
        let mut generator = ContentGenerator::new(42);
        let payload = generator.next_payload(8 * 1000).unwrap();
        assert!(payload.values().iter().all(|&v| v > i64::MIN));
    }

    #[test]
    fn test_fill_matches_payload_bytes() {
        let mut drawn = ContentGenerator::new(99);
        let mut filled = ContentGenerator::new(99);
        let mut buf = vec![0xAAu8; 4096];

        for _ in 0..3 {
            filled.fill_ne_bytes(16, &mut buf);
            assert_eq!(buf, drawn.next_payload(128).unwrap().to_ne_bytes());
        }
    }

    #[test]
    fn test_native_byte_order() {
        let mut generator = ContentGenerator::new(7);
        let payload = generator.next_payload(16).unwrap();
        let bytes = payload.to_ne_bytes();

        let first = i64::from_ne_bytes(bytes[0..8].try_into().unwrap());
        let second = i64::from_ne_bytes(bytes[8..16].try_into().unwrap());
        assert_eq!(&[first, second], payload.values());
    }
}
