use crate::graph::Project;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[cfg(unix)]
use std::os::unix::io::AsRawFd;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error on line {line}: {source}")]
    Json {
        line: usize,
        source: serde_json::Error,
    },
    #[error("Lock error: {0}")]
    Lock(String),
}

/// RAII guard for file locks - automatically releases lock on drop
struct FileLock {
    #[cfg(unix)]
    file: File,
}

impl FileLock {
    /// Acquire an exclusive lock on a lock file
    #[cfg(unix)]
    fn acquire<P: AsRef<Path>>(lock_path: P) -> Result<Self, StoreError> {
        if let Some(parent) = lock_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        // Blocks until available
        let ret = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX) };
        if ret != 0 {
            return Err(StoreError::Lock(format!(
                "Failed to acquire lock on {:?}: {}",
                lock_path.as_ref(),
                std::io::Error::last_os_error()
            )));
        }

        Ok(FileLock { file })
    }

    #[cfg(not(unix))]
    fn acquire<P: AsRef<Path>>(_lock_path: P) -> Result<Self, StoreError> {
        Ok(FileLock {})
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        #[cfg(unix)]
        {
            // Best effort; nothing useful to do with an error on drop
            unsafe {
                libc::flock(self.file.as_raw_fd(), libc::LOCK_UN);
            }
        }
    }
}

fn get_lock_path<P: AsRef<Path>>(project_path: P) -> PathBuf {
    match project_path.as_ref().parent() {
        Some(parent) => parent.join("project.lock"),
        None => PathBuf::from("project.lock"),
    }
}

/// Load a project snapshot (a JSON array of root nodes).
///
/// An empty file is an empty project. Duplicate node ids are loaded as-is
/// and reported with a warning.
pub fn load_project<P: AsRef<Path>>(path: P) -> Result<Project, StoreError> {
    let _lock = FileLock::acquire(get_lock_path(&path))?;

    let mut content = String::new();
    File::open(&path)?.read_to_string(&mut content)?;
    if content.trim().is_empty() {
        return Ok(Project::default());
    }

    let project: Project = serde_json::from_str(&content).map_err(|e| StoreError::Json {
        line: e.line(),
        source: e,
    })?;

    for id in project.duplicate_ids() {
        tracing::warn!(id, path = %path.as_ref().display(), "duplicate node id in snapshot");
    }
    Ok(project)
}

/// Save a project snapshot.
///
/// Writes a temp file in the same directory and renames it over the target,
/// so a crash mid-write leaves the previous snapshot intact.
pub fn save_project<P: AsRef<Path>>(project: &Project, path: P) -> Result<(), StoreError> {
    let path = path.as_ref();
    let _lock = FileLock::acquire(get_lock_path(path))?;

    let parent = path.parent().unwrap_or(Path::new("."));
    let tmp_path = parent.join(format!(".project.tmp.{}", std::process::id()));

    let result = (|| -> Result<(), StoreError> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&tmp_path)?;

        let json = serde_json::to_string_pretty(project)
            .map_err(|e| StoreError::Json { line: 0, source: e })?;
        writeln!(file, "{}", json)?;
        file.flush()?;
        file.sync_all()?;
        Ok(())
    })();

    if result.is_ok() {
        std::fs::rename(&tmp_path, path)?;
        tracing::debug!(path = %path.display(), nodes = project.len(), "saved project");
    } else {
        let _ = std::fs::remove_file(&tmp_path);
    }

    result
}
