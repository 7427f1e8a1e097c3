/*!
 * Safe file content reading with binary detection and encoding fallback
 *
 * Oversized files are skipped without reading their bytes. Binary content is
 * detected by sampling the leading bytes. Text decoding tries BOM-tagged
 * UTF-16, then strict UTF-8, and finally a permissive UTF-8 decode that emits
 * replacement characters, so malformed encodings never fail a run.
 */

use std::fs;

use crate::types::Node;

/// Leading bytes sampled for the binary heuristic
const SAMPLE_LEN: usize = 1024;

/// Fraction of control bytes in the sample above which a file is binary
const BINARY_RATIO: f32 = 0.1;

/// Why a file's content was left out of the digest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Size exceeds the configured per-file cap
    TooLarge,
    /// Leading bytes look like binary data
    Binary,
    /// The file could not be read
    Unreadable,
}

impl SkipReason {
    /// Stable label for logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TooLarge => "too_large",
            Self::Binary => "binary",
            Self::Unreadable => "unreadable",
        }
    }
}

/// Outcome of reading one file node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Decoded text; `lossy` marks a fallback decode with replacement chars
    Text { text: String, lossy: bool },
    /// Content omitted for the given reason
    Skipped(SkipReason),
}

/// Reader for individual file nodes
pub struct ContentReader;

impl ContentReader {
    /// Read and decode the content of a file node
    ///
    /// Never fails: per-file anomalies come back as [`FileContent::Skipped`]
    /// and the node itself is not mutated.
    pub fn read(node: &Node, max_file_size_bytes: u64) -> FileContent {
        if node.size_bytes > max_file_size_bytes {
            return FileContent::Skipped(SkipReason::TooLarge);
        }

        let bytes = match fs::read(&node.path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(path = %node.path.display(), error = %e, "read failed");
                return FileContent::Skipped(SkipReason::Unreadable);
            }
        };

        // BOM-tagged UTF-16 would trip the null-byte check, so handle it first.
        if bytes.len() >= 2 && (bytes[..2] == [0xFF, 0xFE] || bytes[..2] == [0xFE, 0xFF]) {
            return decode_utf16(&bytes);
        }

        if looks_binary(&bytes) {
            return FileContent::Skipped(SkipReason::Binary);
        }

        match String::from_utf8(bytes) {
            Ok(text) => FileContent::Text { text, lossy: false },
            Err(e) => {
                tracing::warn!(
                    path = %node.path.display(),
                    "not valid UTF-8, decoding with replacement characters"
                );
                let text = String::from_utf8_lossy(e.as_bytes()).into_owned();
                FileContent::Text { text, lossy: true }
            }
        }
    }
}

/// Heuristic over the leading bytes: a null byte or a high ratio of control
/// bytes marks the file as binary. An empty file is text.
fn looks_binary(bytes: &[u8]) -> bool {
    if bytes.is_empty() {
        return false;
    }
    let sample = &bytes[..bytes.len().min(SAMPLE_LEN)];
    if sample.contains(&0) {
        return true;
    }
    let control = sample
        .iter()
        .filter(|&&b| b < 9 || (b > 13 && b < 32))
        .count();
    control as f32 / sample.len() as f32 >= BINARY_RATIO
}

fn decode_utf16(bytes: &[u8]) -> FileContent {
    let little_endian = bytes[..2] == [0xFF, 0xFE];
    let units: Vec<u16> = bytes[2..]
        .chunks_exact(2)
        .map(|pair| {
            if little_endian {
                u16::from_le_bytes([pair[0], pair[1]])
            } else {
                u16::from_be_bytes([pair[0], pair[1]])
            }
        })
        .collect();

    match String::from_utf16(&units) {
        Ok(text) => FileContent::Text { text, lossy: false },
        Err(_) => FileContent::Text {
            text: String::from_utf16_lossy(&units),
            lossy: true,
        },
    }
}
