/*!
 * Core types and data structures for the digestfs engine
 */

use std::path::PathBuf;

use serde::Serialize;

/// Kind of a filesystem entry in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Regular file
    File,
    /// Directory containing other entries
    Directory,
    /// Symbolic link, always a leaf regardless of target kind
    Symlink,
}

/// One filesystem entry in the in-memory tree
///
/// A directory node exclusively owns its children; the tree is rooted at
/// depth 0 and `relative_path` is unique across the whole tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// Absolute filesystem path
    pub path: PathBuf,
    /// Path relative to the root, POSIX-style separators; `.` for the root
    pub relative_path: String,
    /// Base name of the entry
    pub name: String,
    /// Entry kind
    pub kind: NodeKind,
    /// Distance from the root, which sits at 0
    pub depth: usize,
    /// Size in bytes (files only, 0 otherwise)
    pub size_bytes: u64,
    /// Ordered children (directories only)
    pub children: Vec<Node>,
    /// Whether pattern rules filtered this entry out
    pub excluded: bool,
    /// Why the entry was excluded, when it was
    pub exclusion_reason: Option<String>,
    /// Raw link target (symlinks only, never resolved)
    pub symlink_target: Option<String>,
}

impl Node {
    /// Whether this node is a directory
    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }
}

/// Aggregate statistics for one ingestion call
///
/// Recomputed fresh per run, never cached across runs. `file_count` and
/// `total_size_bytes` cover only files whose content made it into the digest;
/// `truncated_file_count` covers files skipped for size, binary content, or
/// read failures; `dir_count` covers every directory seen below the root,
/// excluded or not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Files whose content was emitted
    pub file_count: usize,
    /// Directories encountered below the root
    pub dir_count: usize,
    /// Total bytes of emitted file content
    pub total_size_bytes: u64,
    /// Files skipped for size, binary content, or read errors
    pub truncated_file_count: usize,
    /// Estimated prompt tokens for the content text
    pub token_count: usize,
}

/// The combined tree-listing-plus-content artifact of one ingestion call
#[derive(Debug, Clone, Serialize)]
pub struct Digest {
    /// Resolved absolute path of the ingested root
    pub root_path: String,
    /// Annotated directory tree listing
    pub tree_text: String,
    /// Concatenated file contents with per-file headers
    pub content_text: String,
    /// Aggregate statistics
    pub summary: Summary,
}
