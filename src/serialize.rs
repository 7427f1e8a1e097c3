/*!
 * Download-format rendering of a digest
 */

use clap::ValueEnum;

use crate::error::Result;
use crate::estimator::TokenEstimator;
use crate::types::Digest;

/// Serialization format for a digest
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DownloadFormat {
    /// Plain text: summary header, tree listing, file contents
    Txt,
    /// Pretty-printed JSON of the whole digest
    Json,
}

/// Render a digest in the requested format
pub fn render(digest: &Digest, format: DownloadFormat) -> Result<String> {
    match format {
        DownloadFormat::Txt => Ok(to_text(digest)),
        DownloadFormat::Json => to_json(digest),
    }
}

/// Plain-text rendition: summary lines, then tree, then content
pub fn to_text(digest: &Digest) -> String {
    let summary = &digest.summary;
    format!(
        "Directory: {}\nFiles analyzed: {}\nEstimated tokens: {}\n\n{}\n{}",
        digest.root_path,
        summary.file_count,
        TokenEstimator::humanize(summary.token_count),
        digest.tree_text,
        digest.content_text
    )
}

/// JSON rendition of the whole digest
pub fn to_json(digest: &Digest) -> Result<String> {
    Ok(serde_json::to_string_pretty(digest)?)
}
