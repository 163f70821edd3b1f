//! Transaction support for descriptor edits
//!
//! Scaffolding touches more than one file: a new module descriptor is
//! created and its parent descriptor is edited. A [`Transaction`] records
//! what was created and backs up what will be modified, so a failure
//! halfway leaves the project as it was.
//!
//! ## Usage
//!
//! ```ignore
//! let mut transaction = Transaction::new();
//! transaction.backup_file(parent.file())?;
//! transaction.create_dir_all(&bundle_dir)?;
//!
//! // Perform operations...
//! transaction.track_file_created(bundle_dir.join("pom.xml"));
//!
//! // On success:
//! transaction.commit();
//!
//! // On error (automatic via Drop if not committed):
//! // rollback happens automatically
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{self, Result};

/// Original content of a file modified during the transaction
#[derive(Debug, Clone)]
struct FileBackup {
    path: PathBuf,
    content: Vec<u8>,
}

/// A transaction for multi-file descriptor operations
#[derive(Debug, Default)]
pub struct Transaction {
    /// Files modified during this transaction (with original content)
    backups: Vec<FileBackup>,

    /// Files created during this transaction
    created_files: HashSet<PathBuf>,

    /// Directories created during this transaction
    created_dirs: HashSet<PathBuf>,

    /// Whether the transaction has been committed
    committed: bool,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back up a file that is about to be modified
    ///
    /// Missing files are ignored; each path is backed up at most once.
    pub fn backup_file(&mut self, path: &Path) -> Result<()> {
        if !path.exists() || self.backups.iter().any(|b| b.path == path) {
            return Ok(());
        }
        let content = fs::read(path)
            .map_err(|e| error::fs::read_failed(path.display().to_string(), e.to_string()))?;
        self.backups.push(FileBackup {
            path: path.to_path_buf(),
            content,
        });
        Ok(())
    }

    /// Create a directory and its missing ancestors, tracking each one
    pub fn create_dir_all(&mut self, path: &Path) -> Result<()> {
        let missing: Vec<PathBuf> = path
            .ancestors()
            .take_while(|dir| !dir.as_os_str().is_empty() && !dir.exists())
            .map(Path::to_path_buf)
            .collect();

        fs::create_dir_all(path)
            .map_err(|e| error::fs::write_failed(path.display().to_string(), e.to_string()))?;
        self.created_dirs.extend(missing);
        Ok(())
    }

    /// Track a file that was created during this transaction
    pub fn track_file_created(&mut self, path: impl Into<PathBuf>) {
        self.created_files.insert(path.into());
    }

    /// Commit the transaction (prevent rollback)
    pub fn commit(mut self) {
        self.committed = true;
    }

    /// Undo everything recorded so far
    pub fn rollback(&mut self) {
        if self.committed {
            return;
        }

        for path in &self.created_files {
            if path.exists() {
                let _ = fs::remove_file(path);
            }
        }

        for backup in &self.backups {
            if let Err(e) = fs::write(&backup.path, &backup.content) {
                warn!("Failed to restore {}: {}", backup.path.display(), e);
            }
        }

        // Deepest first so parents are empty by the time they are removed
        let mut dirs: Vec<_> = self.created_dirs.iter().collect();
        dirs.sort_by_key(|d| std::cmp::Reverse(d.components().count()));
        for path in dirs {
            let empty = fs::read_dir(path)
                .map(|mut entries| entries.next().is_none())
                .unwrap_or(false);
            if empty {
                let _ = fs::remove_dir(path);
            }
        }

        self.committed = true;
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        if !self.committed {
            self.rollback();
        }
    }
}
