/// Vault tree abstraction
///
/// The four operations the rest of the crate needs from a notes vault:
/// resolve a path, list a folder, read a note, create a note. Nodes carry
/// an explicit kind tag instead of being told apart by type inspection.

use crate::error::{CreatorError, Result};
use async_trait::async_trait;

/// Kind tag carried by every tree entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Folder,
    File,
}

/// A folder in the vault. The root folder has an empty path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderNode {
    pub path: String,
    pub name: String,
}

impl FolderNode {
    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Path as shown to the user; the root reads as "/"
    pub fn display_path(&self) -> &str {
        if self.is_root() {
            "/"
        } else {
            &self.path
        }
    }

    /// Vault path of a direct child with the given file name
    pub fn child_path(&self, file_name: &str) -> String {
        if self.is_root() {
            file_name.to_string()
        } else {
            format!("{}/{}", self.path, file_name)
        }
    }
}

/// A file in the vault
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    pub path: String,
    pub name: String,
    /// Lowercased extension without the dot, empty when there is none
    pub extension: String,
}

impl FileNode {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or_default().to_string();
        let extension = match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => ext.to_lowercase(),
            _ => String::new(),
        };
        Self {
            path,
            name,
            extension,
        }
    }
}

/// Any entry in the vault tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    Folder(FolderNode),
    File(FileNode),
}

impl TreeNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            TreeNode::Folder(_) => NodeKind::Folder,
            TreeNode::File(_) => NodeKind::File,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            TreeNode::Folder(f) => &f.path,
            TreeNode::File(f) => &f.path,
        }
    }

    /// Narrow to a folder, or None for files
    pub fn into_folder(self) -> Option<FolderNode> {
        match self {
            TreeNode::Folder(f) => Some(f),
            TreeNode::File(_) => None,
        }
    }
}

/// Host tree accessor
#[async_trait]
pub trait NoteTree: Send + Sync {
    /// Look up a path. Ok(None) when nothing lives there.
    async fn resolve(&self, path: &str) -> Result<Option<TreeNode>>;

    /// Direct children of a folder, in the order the tree exposes them
    async fn children(&self, folder: &FolderNode) -> Result<Vec<TreeNode>>;

    /// Full text content of a file
    async fn read(&self, file: &FileNode) -> Result<String>;

    /// Create a new file. Fails if anything already exists at `path`.
    async fn create(&self, path: &str, content: &str) -> Result<FileNode>;
}

/// Normalize a user-supplied vault path
///
/// Accepts `/` or `\` separators, strips leading/trailing separators and
/// empty or `.` segments. Rejects `..` so nothing resolves outside the vault.
pub fn normalize_path(raw: &str) -> Result<String> {
    let mut parts = Vec::new();
    for segment in raw.split(['/', '\\']) {
        match segment {
            "" | "." => continue,
            ".." => return Err(CreatorError::InvalidPath(raw.to_string())),
            _ => parts.push(segment),
        }
    }
    Ok(parts.join("/"))
}

/// Resolve a path that must be a folder
pub async fn resolve_folder(tree: &dyn NoteTree, path: &str) -> Result<FolderNode> {
    match tree.resolve(path).await? {
        Some(TreeNode::Folder(folder)) => Ok(folder),
        _ => Err(CreatorError::NotAFolder(path.to_string())),
    }
}

/// Every folder in the vault, root excluded, in depth-first pre-order
pub async fn list_folders(tree: &dyn NoteTree) -> Result<Vec<FolderNode>> {
    let root = resolve_folder(tree, "").await?;
    let mut folders = Vec::new();
    let mut stack = vec![root];

    while let Some(folder) = stack.pop() {
        let mut subfolders: Vec<FolderNode> = tree
            .children(&folder)
            .await?
            .into_iter()
            .filter_map(TreeNode::into_folder)
            .collect();
        if !folder.is_root() {
            folders.push(folder);
        }
        // Reverse so the first child is popped first
        subfolders.reverse();
        stack.extend(subfolders);
    }

    Ok(folders)
}
