//! Filtered file tree representation.
//!
//! The walker produces one [`DirectoryNode`] per traversed directory; the
//! renderer consumes the finished tree without ever touching the
//! filesystem again. At every level directories come before files and each
//! group is sorted case-insensitively by name, which is also the order the
//! contents section uses.

use std::path::PathBuf;

/// One included file.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// File name without directory components.
    pub name: String,
    /// Path relative to the source root.
    pub rel_path: PathBuf,
    /// Absolute path, used for content reads.
    pub path: PathBuf,
    /// Size in bytes at discovery time.
    pub size: u64,
    /// Lowercased extension including the leading dot, if any.
    pub extension: Option<String>,
}

/// One traversed directory and its included children.
#[derive(Debug, Clone)]
pub struct DirectoryNode {
    /// Directory name without path components.
    pub name: String,
    /// Path relative to the source root; empty for the root itself.
    pub rel_path: PathBuf,
    dirs: Vec<DirectoryNode>,
    files: Vec<FileEntry>,
}

impl DirectoryNode {
    /// Create an empty directory node.
    pub fn new(name: impl Into<String>, rel_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            rel_path: rel_path.into(),
            dirs: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Attach a subdirectory.
    pub fn add_dir(&mut self, dir: DirectoryNode) {
        self.dirs.push(dir);
    }

    /// Attach a file.
    pub fn add_file(&mut self, file: FileEntry) {
        self.files.push(file);
    }

    /// Child directories, in render order once sorted.
    pub fn dirs(&self) -> &[DirectoryNode] {
        &self.dirs
    }

    /// Child files, in render order once sorted.
    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    /// Sort the whole subtree: directories before files, names
    /// case-insensitively ascending within each group.
    pub fn sort(&mut self) {
        self.dirs.sort_by_key(|d| d.name.to_lowercase());
        self.files.sort_by_key(|f| f.name.to_lowercase());
        for dir in &mut self.dirs {
            dir.sort();
        }
    }

    /// Total included files in this subtree.
    pub fn file_count(&self) -> usize {
        self.files.len() + self.dirs.iter().map(|d| d.file_count()).sum::<usize>()
    }

    /// Total directories in this subtree, this node included.
    pub fn directory_count(&self) -> usize {
        1 + self.dirs.iter().map(|d| d.directory_count()).sum::<usize>()
    }

    /// All files of the subtree in tree order (subdirectories first, then
    /// this node's own files). The contents section relies on this matching
    /// the rendered tree exactly.
    pub fn files_in_order(&self) -> Vec<&FileEntry> {
        let mut out = Vec::with_capacity(self.file_count());
        self.collect_files(&mut out);
        out
    }

    fn collect_files<'a>(&'a self, out: &mut Vec<&'a FileEntry>) {
        for dir in &self.dirs {
            dir.collect_files(out);
        }
        for file in &self.files {
            out.push(file);
        }
    }
}
