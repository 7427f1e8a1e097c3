/*!
 * Digest assembly: tree rendering, content concatenation, summary totals
 *
 * The tree listing shows every recorded node, with excluded entries marked
 * rather than omitted, so the user can see what was filtered. Content is
 * emitted for included, readable text files in the same deterministic order
 * as the tree.
 */

use crate::config::IngestConfig;
use crate::estimator::TokenEstimator;
use crate::reader::{ContentReader, FileContent};
use crate::types::{Digest, Node, NodeKind, Summary};

/// Delimiter line between file sections in the content text
pub const SEPARATOR: &str = "================================================";

/// Marker appended to excluded entries in the tree listing
const EXCLUDED_MARKER: &str = " (excluded)";

/// Assembler turning a node tree into the final digest
pub struct DigestAssembler<'a> {
    config: &'a IngestConfig,
}

impl<'a> DigestAssembler<'a> {
    /// Create an assembler for one ingestion call
    pub fn new(config: &'a IngestConfig) -> Self {
        Self { config }
    }

    /// Render the tree, concatenate file contents, and compute the summary
    pub fn assemble(&self, root: &Node) -> Digest {
        let mut tree_text = String::from("Directory structure:\n");
        render_tree(root, "", true, &mut tree_text);

        let mut content_text = String::new();
        let mut summary = Summary::default();
        self.collect(root, &mut content_text, &mut summary);

        summary.token_count = TokenEstimator::estimate(&content_text);

        Digest {
            root_path: root.path.display().to_string(),
            tree_text,
            content_text,
            summary,
        }
    }

    fn collect(&self, node: &Node, out: &mut String, summary: &mut Summary) {
        match node.kind {
            NodeKind::Directory => {
                if node.depth > 0 {
                    summary.dir_count += 1;
                }
                if node.excluded {
                    return;
                }
                for child in &node.children {
                    self.collect(child, out, summary);
                }
            }
            NodeKind::File => {
                if node.excluded {
                    return;
                }
                match ContentReader::read(node, self.config.max_file_size_bytes) {
                    FileContent::Text { text, .. } => {
                        summary.file_count += 1;
                        summary.total_size_bytes += node.size_bytes;
                        out.push_str(SEPARATOR);
                        out.push('\n');
                        out.push_str("FILE: ");
                        out.push_str(&node.relative_path);
                        out.push('\n');
                        out.push_str(SEPARATOR);
                        out.push('\n');
                        out.push_str(&text);
                        out.push_str("\n\n");
                    }
                    FileContent::Skipped(reason) => {
                        summary.truncated_file_count += 1;
                        tracing::debug!(
                            path = %node.relative_path,
                            reason = reason.as_str(),
                            "content omitted"
                        );
                    }
                }
            }
            // Symlinks never contribute bytes to the content
            NodeKind::Symlink => {}
        }
    }
}

fn render_tree(node: &Node, prefix: &str, is_last: bool, out: &mut String) {
    let connector = if is_last { "└── " } else { "├── " };

    let mut display = node.name.clone();
    match node.kind {
        NodeKind::Directory => display.push('/'),
        NodeKind::Symlink => {
            if let Some(target) = &node.symlink_target {
                display.push_str(" -> ");
                display.push_str(target);
            }
        }
        NodeKind::File => {}
    }
    if node.excluded {
        display.push_str(EXCLUDED_MARKER);
    }

    if node.depth == 0 {
        out.push_str(connector);
    } else {
        out.push_str(prefix);
        out.push_str(connector);
    }
    out.push_str(&display);
    out.push('\n');

    if node.kind == NodeKind::Directory && !node.excluded {
        let child_prefix = if node.depth == 0 {
            String::new()
        } else {
            format!("{}{}", prefix, if is_last { "    " } else { "│   " })
        };
        let last_index = node.children.len().saturating_sub(1);
        for (i, child) in node.children.iter().enumerate() {
            render_tree(child, &child_prefix, i == last_index, out);
        }
    }
}
