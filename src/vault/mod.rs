/// Vault access
///
/// The note tree the tool reads context from and writes characters into.

pub mod fs_vault;
#[cfg(test)]
pub mod memory;
pub mod tree;

pub use fs_vault::FsVault;
#[cfg(test)]
pub use memory::MemoryVault;
pub use tree::{
    list_folders, normalize_path, resolve_folder, FileNode, FolderNode, NodeKind, NoteTree,
    TreeNode,
};
