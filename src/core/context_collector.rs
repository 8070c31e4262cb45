// Gathers the text of the user's context folders into one bounded blob
//
// Folders go in settings order, children in tree order, depth first. When the
// blob grows past the budget only its tail survives.

use crate::error::Result;
use crate::vault::{normalize_path, FileNode, NoteTree, TreeNode};

/// Character budget for collected context
pub const MAX_CONTEXT_CHARS: usize = 10_000;

/// Prepended when earlier context had to be dropped
pub const TRUNCATION_MARKER: &str = "[...earlier context truncated...]\n";

/// Extensions treated as plain-text notes
const TEXT_NOTE_EXTENSIONS: &[&str] = &["md", "txt"];

pub struct ContextCollector<'a> {
    tree: &'a dyn NoteTree,
}

impl<'a> ContextCollector<'a> {
    pub fn new(tree: &'a dyn NoteTree) -> Self {
        Self { tree }
    }

    /// Collect every text note under `folders`
    ///
    /// Paths that do not resolve to a folder are skipped. A failed read
    /// fails the whole collection.
    pub async fn collect(&self, folders: &[String]) -> Result<String> {
        let mut blob = String::new();

        for raw in folders {
            let Ok(path) = normalize_path(raw) else {
                tracing::debug!(path = %raw, "skipping unusable context path");
                continue;
            };
            let Some(TreeNode::Folder(folder)) = self.tree.resolve(&path).await? else {
                tracing::debug!(path = %raw, "context folder no longer exists, skipping");
                continue;
            };

            let mut stack = vec![TreeNode::Folder(folder)];
            while let Some(node) = stack.pop() {
                match node {
                    TreeNode::Folder(folder) => {
                        let mut children = self.tree.children(&folder).await?;
                        // Reverse so the first child is popped first
                        children.reverse();
                        stack.extend(children);
                    }
                    TreeNode::File(file) if is_text_note(&file) => {
                        let content = self.tree.read(&file).await?;
                        append_note(&mut blob, &file.path, &content);
                    }
                    TreeNode::File(_) => {}
                }
            }
        }

        tracing::debug!(chars = blob.chars().count(), "collected context");
        Ok(truncate_context(blob))
    }
}

fn is_text_note(file: &FileNode) -> bool {
    TEXT_NOTE_EXTENSIONS.contains(&file.extension.as_str())
}

fn append_note(blob: &mut String, path: &str, content: &str) {
    blob.push_str("--- ");
    blob.push_str(path);
    blob.push_str(" ---\n");
    blob.push_str(content);
    blob.push_str("\n\n");
}

/// Keep the last `MAX_CONTEXT_CHARS` characters behind the marker
pub fn truncate_context(blob: String) -> String {
    let total = blob.chars().count();
    if total <= MAX_CONTEXT_CHARS {
        return blob;
    }

    let skip = total - MAX_CONTEXT_CHARS;
    let start = blob
        .char_indices()
        .nth(skip)
        .map(|(idx, _)| idx)
        .unwrap_or(blob.len());
    tracing::warn!(dropped = skip, "context over budget, dropping earliest content");

    format!("{}{}", TRUNCATION_MARKER, &blob[start..])
}
