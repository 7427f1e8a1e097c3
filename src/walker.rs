/*!
 * Depth-first directory traversal producing the node tree
 *
 * Ordering is deterministic: directories before files, each group sorted
 * case-insensitively by name, so output is stable across runs on the same
 * input. Symlinks are recorded as leaves and never followed.
 */

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::IngestConfig;
use crate::error::{DigestError, Result};
use crate::patterns::{Decision, PatternMatcher};
use crate::types::{Node, NodeKind};

/// Ceiling on total entries visited in one traversal
pub const MAX_NODES: usize = 100_000;

/// Ceiling on directory nesting below the root
pub const MAX_DEPTH: usize = 64;

/// Traversal ceilings, a safety bound against pathological trees
#[derive(Debug, Clone, Copy)]
pub(crate) struct Limits {
    pub max_nodes: usize,
    pub max_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_nodes: MAX_NODES,
            max_depth: MAX_DEPTH,
        }
    }
}

/// Walker that builds the in-memory tree for one ingestion call
pub struct TreeWalker {
    matcher: PatternMatcher,
    limits: Limits,
    node_count: usize,
    /// Canonical paths of directories already entered, a guard against
    /// revisiting the same directory through hard links or mount loops.
    visited: HashSet<PathBuf>,
}

impl TreeWalker {
    /// Build the node tree rooted at `root_path`
    ///
    /// Fails with [`DigestError::InvalidRoot`] if the path does not exist or
    /// is not a readable directory, and [`DigestError::TreeTooLarge`] if the
    /// traversal ceilings are exceeded.
    pub fn build(root_path: &Path, config: &IngestConfig) -> Result<Node> {
        Self::build_with_limits(root_path, config, Limits::default())
    }

    pub(crate) fn build_with_limits(
        root_path: &Path,
        config: &IngestConfig,
        limits: Limits,
    ) -> Result<Node> {
        let abs = fs::canonicalize(root_path)
            .map_err(|e| DigestError::InvalidRoot(format!("{}: {}", root_path.display(), e)))?;
        if !abs.is_dir() {
            return Err(DigestError::InvalidRoot(format!(
                "{}: not a directory",
                abs.display()
            )));
        }

        let matcher = PatternMatcher::new(config)?;

        let name = abs
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "/".to_string());

        // The root is never excludable, regardless of patterns.
        let mut root = Node {
            path: abs.clone(),
            relative_path: ".".to_string(),
            name,
            kind: NodeKind::Directory,
            depth: 0,
            size_bytes: 0,
            children: Vec::new(),
            excluded: false,
            exclusion_reason: None,
            symlink_target: None,
        };

        let mut walker = Self {
            matcher,
            limits,
            node_count: 1,
            visited: HashSet::from([abs]),
        };
        walker.walk_into(&mut root)?;

        Ok(root)
    }

    fn walk_into(&mut self, dir: &mut Node) -> Result<()> {
        let mut entries: Vec<walkdir::DirEntry> = WalkDir::new(&dir.path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(e) => Some(e),
                Err(e) => {
                    tracing::warn!(dir = %dir.path.display(), error = %e, "skipping unreadable entry");
                    None
                }
            })
            .collect();

        entries.sort_by(|a, b| {
            let a_dir = a.file_type().is_dir();
            let b_dir = b.file_type().is_dir();
            b_dir.cmp(&a_dir).then_with(|| {
                a.file_name()
                    .to_string_lossy()
                    .to_lowercase()
                    .cmp(&b.file_name().to_string_lossy().to_lowercase())
            })
        });

        for entry in entries {
            self.node_count += 1;
            if self.node_count > self.limits.max_nodes {
                return Err(DigestError::TreeTooLarge(format!(
                    "more than {} entries under the root",
                    self.limits.max_nodes
                )));
            }

            let file_type = entry.file_type();
            let kind = if file_type.is_symlink() {
                NodeKind::Symlink
            } else if file_type.is_dir() {
                NodeKind::Directory
            } else if file_type.is_file() {
                NodeKind::File
            } else {
                // Sockets, fifos and other special files are not representable
                tracing::debug!(path = %entry.path().display(), "skipping special file");
                continue;
            };

            let name = entry.file_name().to_string_lossy().into_owned();
            let relative_path = if dir.relative_path == "." {
                name.clone()
            } else {
                format!("{}/{}", dir.relative_path, name)
            };

            let size_bytes = if kind == NodeKind::File {
                entry.metadata().map(|m| m.len()).unwrap_or_else(|e| {
                    tracing::warn!(path = %entry.path().display(), error = %e, "stat failed");
                    0
                })
            } else {
                0
            };

            let mut node = Node {
                path: entry.path().to_path_buf(),
                relative_path,
                name,
                kind,
                depth: dir.depth + 1,
                size_bytes,
                children: Vec::new(),
                excluded: false,
                exclusion_reason: None,
                symlink_target: None,
            };

            if kind == NodeKind::Symlink {
                node.symlink_target = fs::read_link(entry.path())
                    .ok()
                    .map(|t| t.to_string_lossy().into_owned());
            }

            match self
                .matcher
                .decide(&node.relative_path, kind == NodeKind::Directory)
            {
                Decision::Exclude(reason) => {
                    // Recorded and shown in the tree, but the subtree is
                    // never visited and no content or size is counted.
                    node.excluded = true;
                    node.exclusion_reason = Some(reason.as_str().to_string());
                }
                Decision::Include => {
                    if kind == NodeKind::Directory {
                        if node.depth > self.limits.max_depth {
                            return Err(DigestError::TreeTooLarge(format!(
                                "nesting deeper than {} levels at {}",
                                self.limits.max_depth, node.relative_path
                            )));
                        }
                        // Never drop a directory from the listing: one the
                        // walk cannot descend into stays as a marked leaf.
                        match fs::canonicalize(&node.path) {
                            Ok(canonical) => {
                                if self.visited.insert(canonical) {
                                    self.walk_into(&mut node)?;
                                } else {
                                    tracing::warn!(
                                        path = %node.path.display(),
                                        "directory already visited, not descending"
                                    );
                                    node.excluded = true;
                                    node.exclusion_reason =
                                        Some("already visited".to_string());
                                }
                            }
                            Err(e) => {
                                tracing::warn!(path = %node.path.display(), error = %e, "cannot resolve directory");
                                node.excluded = true;
                                node.exclusion_reason = Some("unresolvable".to_string());
                            }
                        }
                    }
                }
            }

            dir.children.push(node);
        }

        Ok(())
    }
}
