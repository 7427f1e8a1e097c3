/*!
 * Engine entry points
 *
 * One ingestion call builds its own private tree and digest; no shared
 * mutable state crosses calls. The blocking contract may block on file IO,
 * so the async wrapper offloads it to a blocking task.
 */

use std::path::{Path, PathBuf};

use crate::assembler::DigestAssembler;
use crate::config::IngestConfig;
use crate::error::{DigestError, Result};
use crate::types::Digest;
use crate::walker::TreeWalker;

/// Ingest a materialized local directory into a digest
///
/// Fails with a typed error for structural problems (invalid root, malformed
/// pattern, traversal ceiling); per-file anomalies are absorbed into the
/// summary instead. A successful call always yields a complete digest.
pub fn ingest(root_path: &Path, config: &IngestConfig) -> Result<Digest> {
    let root = TreeWalker::build(root_path, config)?;
    Ok(DigestAssembler::new(config).assemble(&root))
}

/// Non-blocking wrapper around [`ingest`] with identical semantics
pub async fn ingest_async(root_path: PathBuf, config: IngestConfig) -> Result<Digest> {
    tokio::task::spawn_blocking(move || ingest(&root_path, &config))
        .await
        .map_err(|e| DigestError::Unexpected(format!("ingestion task failed: {}", e)))?
}
