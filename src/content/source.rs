//! Payload selection per duplication mode
//!
//! [`PayloadSource`] owns the generator and hands the write loop the bytes
//! for each file. Depending on the mode it reseeds at directory boundaries,
//! reuses a previously serialized payload, or draws a fresh one.

use super::{check_payload_size, ContentGenerator, VALUE_BYTES};
use crate::config::DuplicationMode;
use crate::error::ConfigError;

/// Serialized payloads for the write loop
#[derive(Debug)]
pub struct PayloadSource {
    generator: ContentGenerator,
    mode: DuplicationMode,
    values_per_file: usize,
    current: Vec<u8>,
    has_current: bool,
}

impl PayloadSource {
    /// Create a source for files of `file_bytes` bytes
    ///
    /// In `GlobalFixed` mode the single shared payload is drawn here, from
    /// the start of the seeded stream.
    pub fn new(mode: DuplicationMode, seed: u64, file_bytes: u64) -> Result<Self, ConfigError> {
        check_payload_size(file_bytes)?;

        let mut source = Self {
            generator: ContentGenerator::new(seed),
            mode,
            values_per_file: (file_bytes / VALUE_BYTES) as usize,
            current: Vec::new(),
            has_current: false,
        };

        if mode == DuplicationMode::GlobalFixed {
            source.refill();
        }

        Ok(source)
    }

    /// Duplication mode in effect
    pub fn mode(&self) -> DuplicationMode {
        self.mode
    }

    /// Mark the start of a new directory
    pub fn begin_directory(&mut self) {
        if self.mode.reseeds_per_directory() {
            self.generator.reseed();
        }

        // A reseeded fixed-mode directory regenerates its single payload,
        // which comes out identical to every other directory's.
        if self.mode == DuplicationMode::PerDirectoryFixed {
            self.refill();
        }
    }

    /// Bytes to write for the next file
    pub fn payload_for_file(&mut self) -> &[u8] {
        if self.mode.varies_file_content() || !self.has_current {
            self.refill();
        }
        &self.current
    }

    fn refill(&mut self) {
        self.generator.fill_ne_bytes(self.values_per_file, &mut self.current);
        self.has_current = true;
    }
}
