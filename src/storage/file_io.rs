//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use uuid::Uuid;

use crate::error::{EnvcryptError, EnvcryptResult};

/// Resolve a path against the current working directory
pub fn resolve_path<P: AsRef<Path>>(path: P) -> EnvcryptResult<PathBuf> {
    let path = path.as_ref();
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    let cwd = std::env::current_dir()
        .map_err(|e| EnvcryptError::io("resolve working directory for", path, e))?;
    Ok(cwd.join(path))
}

/// Check if a path points at an existing directory
pub fn is_directory<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().is_dir()
}

/// Read a UTF-8 text file
pub fn read_text<P: AsRef<Path>>(path: P) -> EnvcryptResult<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| EnvcryptError::io("read", path, e))
}

/// Get the last-modified timestamp of a file
pub fn modified_time<P: AsRef<Path>>(path: P) -> EnvcryptResult<SystemTime> {
    let path = path.as_ref();
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map_err(|e| EnvcryptError::io("read modification time of", path, e))
}

/// Write text to a file atomically (write to temp, then rename)
///
/// This ensures that the file is either completely written or not modified at all,
/// preventing corruption on crashes or power failures.
pub fn write_text_atomic<P: AsRef<Path>>(path: P, content: &str) -> EnvcryptResult<()> {
    let path = path.as_ref();

    // Ensure parent directory exists
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| EnvcryptError::io("create directory", parent, e))?;
    }

    // Temp file lives in the same directory so the rename stays atomic.
    // The random suffix keeps concurrent writers to one target apart.
    let file_name = path
        .file_name()
        .ok_or_else(|| EnvcryptError::Config(format!("Not a file path: {}", path.display())))?;
    let temp_path = path.with_file_name(format!(
        ".{}.{}.tmp",
        file_name.to_string_lossy(),
        Uuid::new_v4().simple()
    ));

    let file = File::create(&temp_path)
        .map_err(|e| EnvcryptError::io("create temp file", &temp_path, e))?;

    // Carry the target's mode over so a 0600 secret file stays private.
    if let Ok(meta) = fs::metadata(path) {
        if let Err(e) = file.set_permissions(meta.permissions()) {
            let _ = fs::remove_file(&temp_path);
            return Err(EnvcryptError::io("set permissions on", &temp_path, e));
        }
    }

    let mut writer = BufWriter::new(file);
    let written = writer
        .write_all(content.as_bytes())
        .and_then(|_| writer.flush())
        .and_then(|_| writer.get_ref().sync_all());

    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(EnvcryptError::io("write", &temp_path, e));
    }
    drop(writer);

    fs::rename(&temp_path, path).map_err(|e| {
        // Try to clean up temp file if rename fails
        let _ = fs::remove_file(&temp_path);
        EnvcryptError::io("rename temp file to", path, e)
    })?;

    Ok(())
}
