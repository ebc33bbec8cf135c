//! Local filesystem backend: drive enumeration, directory scans with the
//! synthetic parent entry, and traversal.

use std::fs;
use std::path::PathBuf;

use crate::error::{AppError, Result};

use super::backend::Backend;

/// Backend over the local filesystem.
///
/// "Drives" are a fixed set of root directories chosen at startup; the
/// scan state (entry list + subdirectory count) always describes the most
/// recent `scan_dir`.
pub struct LocalBackend {
    drives: Vec<PathBuf>,
    active_drive: usize,
    active_path: PathBuf,
    entries: Vec<PathBuf>,
    sub_dir_count: usize,
}

impl LocalBackend {
    /// Build a backend over explicit root directories.
    pub fn with_roots(roots: Vec<PathBuf>) -> Result<Self> {
        let mut drives = Vec::new();
        for root in roots {
            let canonical = root.canonicalize().map_err(|_| {
                AppError::InvalidPath(format!("{} does not exist", root.display()))
            })?;
            if !canonical.is_dir() {
                return Err(AppError::InvalidPath(format!(
                    "{} is not a directory",
                    canonical.display()
                )));
            }
            drives.push(canonical);
        }
        if drives.is_empty() {
            return Err(AppError::InvalidPath("no root directories".into()));
        }
        Ok(Self {
            active_path: drives[0].clone(),
            drives,
            active_drive: 0,
            entries: Vec::new(),
            sub_dir_count: 0,
        })
    }

    /// Build a backend over the platform's detected drives.
    pub fn detect() -> Result<Self> {
        Self::with_roots(detect_roots())
    }

    /// Drive identifiers for the boot handshake, trailing separator
    /// stripped (`C:\` → `C:`).
    pub fn drive_names(&self) -> Vec<String> {
        self.drives
            .iter()
            .map(|drive| {
                let name = drive.display().to_string();
                let trimmed = name.trim_end_matches(['/', '\\']);
                if trimmed.is_empty() {
                    name
                } else {
                    trimmed.to_string()
                }
            })
            .collect()
    }

    /// The synthetic parent for the current path. A drive root is its own
    /// parent, so traversal never escapes the chosen roots upward.
    fn parent_entry(&self) -> PathBuf {
        let root = &self.drives[self.active_drive];
        if &self.active_path == root {
            return self.active_path.clone();
        }
        self.active_path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| self.active_path.clone())
    }
}

#[cfg(windows)]
fn detect_roots() -> Vec<PathBuf> {
    (b'A'..=b'Z')
        .map(|letter| PathBuf::from(format!("{}:\\", letter as char)))
        .filter(|drive| drive.is_dir())
        .collect()
}

#[cfg(not(windows))]
fn detect_roots() -> Vec<PathBuf> {
    vec![PathBuf::from("/")]
}

impl Backend for LocalBackend {
    fn change_drive(&mut self, requested: usize) -> Result<usize> {
        // Out-of-range requests fall back to the first drive.
        let confirmed = if requested < self.drives.len() {
            requested
        } else {
            0
        };
        let root = self
            .drives
            .get(confirmed)
            .ok_or_else(|| AppError::Backend("no drives enumerated".into()))?;
        self.active_drive = confirmed;
        self.active_path = root.clone();
        tracing::debug!(requested, confirmed, path = %self.active_path.display(), "drive changed");
        Ok(confirmed)
    }

    fn change_dir(&mut self, entry: usize) -> Result<usize> {
        if entry >= self.sub_dir_count {
            return Err(AppError::Backend(format!(
                "entry {entry} is not a directory"
            )));
        }
        let path = self
            .entries
            .get(entry)
            .ok_or_else(|| AppError::Backend(format!("no entry at index {entry}")))?;
        if !path.is_dir() {
            return Err(AppError::Backend(format!(
                "{} is not traversable",
                path.display()
            )));
        }
        self.active_path = path.clone();
        tracing::debug!(entry, path = %self.active_path.display(), "directory changed");
        Ok(entry)
    }

    fn scan_dir(&mut self) -> Result<Vec<PathBuf>> {
        let mut dirs = Vec::new();
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.active_path)? {
            // Unreadable entries are skipped, not fatal.
            let Ok(entry) = entry else { continue };
            let Ok(metadata) = entry.metadata() else {
                continue;
            };
            if metadata.is_dir() {
                dirs.push(entry.path());
            } else {
                files.push(entry.path());
            }
        }
        // The synthetic parent counts as a directory.
        self.sub_dir_count = dirs.len() + 1;
        dirs.sort();
        files.sort();
        let mut entries = dirs;
        entries.append(&mut files);
        entries.push(self.parent_entry());
        entries.rotate_right(1);
        self.entries = entries.clone();
        Ok(entries)
    }

    fn count_sub_dir(&mut self) -> Result<usize> {
        Ok(self.sub_dir_count)
    }
}
