// Directory-backed vault
//
// Maps vault paths onto a root directory. Hidden entries (dot-prefixed, like
// our own settings folder) and symlinks are invisible to the tree, so every
// walk stays inside the root and terminates.

use crate::error::{CreatorError, Result};
use crate::vault::tree::{normalize_path, FileNode, FolderNode, NoteTree, TreeNode};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(CreatorError::Config(format!(
                "vault root {} is not a directory",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    fn is_hidden(name: &str) -> bool {
        name.starts_with('.')
    }

    // Vault path -> filesystem path. None for paths that escape the vault or
    // walk through hidden entries.
    fn full_path(&self, vault_path: &str) -> Option<(String, PathBuf)> {
        let normalized = normalize_path(vault_path).ok()?;
        if normalized.split('/').any(Self::is_hidden) {
            return None;
        }
        let mut full = self.root.clone();
        for segment in normalized.split('/').filter(|s| !s.is_empty()) {
            full.push(segment);
        }
        Some((normalized, full))
    }

    // True if any existing component below the root is a symlink
    async fn through_symlink(&self, normalized: &str) -> Result<bool> {
        let mut current = self.root.clone();
        for segment in normalized.split('/').filter(|s| !s.is_empty()) {
            current.push(segment);
            match fs::symlink_metadata(&current).await {
                Ok(meta) if meta.file_type().is_symlink() => return Ok(true),
                Ok(_) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
                Err(e) => return Err(e.into()),
            }
        }
        Ok(false)
    }

    fn node_for(path: String, is_dir: bool) -> TreeNode {
        if is_dir {
            let name = path.rsplit('/').next().unwrap_or_default().to_string();
            TreeNode::Folder(FolderNode { path, name })
        } else {
            TreeNode::File(FileNode::new(path))
        }
    }
}

#[async_trait]
impl NoteTree for FsVault {
    async fn resolve(&self, path: &str) -> Result<Option<TreeNode>> {
        let Some((normalized, full)) = self.full_path(path) else {
            return Ok(None);
        };
        if self.through_symlink(&normalized).await? {
            tracing::debug!(path = %normalized, "not resolving through symlink");
            return Ok(None);
        }
        match fs::metadata(&full).await {
            Ok(meta) => Ok(Some(Self::node_for(normalized, meta.is_dir()))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn children(&self, folder: &FolderNode) -> Result<Vec<TreeNode>> {
        let Some((normalized, full)) = self.full_path(&folder.path) else {
            return Err(CreatorError::InvalidPath(folder.path.clone()));
        };
        if self.through_symlink(&normalized).await? {
            return Err(CreatorError::InvalidPath(folder.path.clone()));
        }

        let mut nodes = Vec::new();
        let mut entries = fs::read_dir(&full).await?;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().to_string();
            if Self::is_hidden(&name) {
                continue;
            }
            let file_type = entry.file_type().await?;
            if file_type.is_symlink() {
                continue;
            }
            nodes.push(Self::node_for(folder.child_path(&name), file_type.is_dir()));
        }

        Ok(nodes)
    }

    async fn read(&self, file: &FileNode) -> Result<String> {
        let Some((normalized, full)) = self.full_path(&file.path) else {
            return Err(CreatorError::InvalidPath(file.path.clone()));
        };
        if self.through_symlink(&normalized).await? {
            return Err(CreatorError::InvalidPath(file.path.clone()));
        }
        Ok(fs::read_to_string(&full).await?)
    }

    async fn create(&self, path: &str, content: &str) -> Result<FileNode> {
        let Some((normalized, full)) = self.full_path(path) else {
            return Err(CreatorError::InvalidPath(path.to_string()));
        };
        if normalized.is_empty() || self.through_symlink(&normalized).await? {
            return Err(CreatorError::InvalidPath(path.to_string()));
        }

        // create_new never clobbers an existing note
        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&full)
            .await
        {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(CreatorError::NoteExists(normalized));
            }
            Err(e) => return Err(e.into()),
        };
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;

        Ok(FileNode::new(normalized))
    }
}
