/*!
 * DigestFS - Generate a single text digest of a directory tree for LLM context
 *
 * This library walks a resolved root directory, filters entries through
 * layered glob rules and size limits, and assembles one text artifact: an
 * annotated directory listing plus the concatenated contents of the selected
 * files, with summary statistics and a token-count estimate.
 */

pub mod assembler;
pub mod config;
pub mod error;
pub mod estimator;
pub mod ingest;
pub mod patterns;
pub mod reader;
pub mod report;
pub mod serialize;
pub mod types;
pub mod utils;
pub mod walker;

#[cfg(test)]
mod tests;

// Re-export main components for easier access
pub use assembler::DigestAssembler;
pub use config::{IngestConfig, PatternMode};
pub use error::{DigestError, Result};
pub use estimator::TokenEstimator;
pub use ingest::{ingest, ingest_async};
pub use patterns::PatternMatcher;
pub use reader::ContentReader;
pub use types::{Digest, Node, NodeKind, Summary};
pub use walker::TreeWalker;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
