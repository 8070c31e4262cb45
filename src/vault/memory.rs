/// In-memory vault used by tests
///
/// Keeps entries in insertion order so traversal order is predictable.

use crate::error::{CreatorError, Result};
use crate::vault::tree::{FileNode, FolderNode, NoteTree, TreeNode};
use async_trait::async_trait;
use std::sync::Mutex;

enum Entry {
    Folder,
    File(String),
}

#[derive(Default)]
pub struct MemoryVault {
    entries: Mutex<Vec<(String, Entry)>>,
}

fn parent_of(path: &str) -> &str {
    path.rsplit_once('/').map(|(parent, _)| parent).unwrap_or("")
}

fn name_of(path: &str) -> String {
    path.rsplit('/').next().unwrap_or_default().to_string()
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_folder(&self, path: &str) {
        let parent = parent_of(path);
        if !parent.is_empty() {
            self.add_folder(parent);
        }
        let mut entries = self.entries.lock().unwrap();
        if !entries.iter().any(|(p, _)| p == path) {
            entries.push((path.to_string(), Entry::Folder));
        }
    }

    pub fn add_file(&self, path: &str, content: &str) {
        let parent = parent_of(path);
        if !parent.is_empty() {
            self.add_folder(parent);
        }
        self.entries
            .lock()
            .unwrap()
            .push((path.to_string(), Entry::File(content.to_string())));
    }

    /// Content of a file, if one exists at `path`
    pub fn content(&self, path: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .find_map(|(p, entry)| match entry {
                Entry::File(content) if p == path => Some(content.clone()),
                _ => None,
            })
    }

    pub fn file_count(&self) -> usize {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, entry)| matches!(entry, Entry::File(_)))
            .count()
    }

    fn node(path: &str, entry: &Entry) -> TreeNode {
        match entry {
            Entry::Folder => TreeNode::Folder(FolderNode {
                path: path.to_string(),
                name: name_of(path),
            }),
            Entry::File(_) => TreeNode::File(FileNode::new(path)),
        }
    }
}

#[async_trait]
impl NoteTree for MemoryVault {
    async fn resolve(&self, path: &str) -> Result<Option<TreeNode>> {
        if path.is_empty() {
            return Ok(Some(TreeNode::Folder(FolderNode {
                path: String::new(),
                name: String::new(),
            })));
        }
        let entries = self.entries.lock().unwrap();
        Ok(entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(p, entry)| Self::node(p, entry)))
    }

    async fn children(&self, folder: &FolderNode) -> Result<Vec<TreeNode>> {
        let entries = self.entries.lock().unwrap();
        Ok(entries
            .iter()
            .filter(|(p, _)| parent_of(p) == folder.path)
            .map(|(p, entry)| Self::node(p, entry))
            .collect())
    }

    async fn read(&self, file: &FileNode) -> Result<String> {
        self.content(&file.path).ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, file.path.clone()).into()
        })
    }

    async fn create(&self, path: &str, content: &str) -> Result<FileNode> {
        let mut entries = self.entries.lock().unwrap();
        if entries.iter().any(|(p, _)| p == path) {
            return Err(CreatorError::NoteExists(path.to_string()));
        }
        let parent = parent_of(path);
        let parent_is_folder = parent.is_empty()
            || entries
                .iter()
                .any(|(p, entry)| p == parent && matches!(entry, Entry::Folder));
        if !parent_is_folder {
            return Err(CreatorError::NotAFolder(parent.to_string()));
        }
        entries.push((path.to_string(), Entry::File(content.to_string())));
        Ok(FileNode::new(path))
    }
}
