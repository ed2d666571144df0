use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Component, Path, PathBuf};

use anyhow::Result;

const KEY_FILE_MODE: u32 = 0o600;

/// Returns whether `path` is a directory with no entries.
///
/// # Errors
/// Returns an error if the directory cannot be read.
pub fn is_empty_dir(path: &Path) -> Result<bool> {
    let mut entries = fs::read_dir(path)
        .map_err(|e| anyhow::anyhow!("Failed to read dir {}: {e}", path.display()))?;
    Ok(entries.next().is_none())
}

/// Creates each directory in order without creating missing parents.
///
/// An already existing path is an error. Directories created before a
/// failure are left in place.
///
/// # Errors
/// Returns the first creation error.
pub fn create_dirs<P: AsRef<Path>>(paths: &[P]) -> Result<()> {
    for path in paths {
        let path = path.as_ref();
        fs::create_dir(path)
            .map_err(|e| anyhow::anyhow!("Failed to create dir {}: {e}", path.display()))?;
    }
    Ok(())
}

/// Checks that `path` is a regular file that can be opened for reading.
///
/// # Errors
/// Returns an error if the file is missing, is not a regular file, or cannot be opened.
pub fn ensure_readable_file(path: &Path) -> Result<()> {
    let metadata = fs::metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to stat {}: {e}", path.display()))?;
    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }
    fs::File::open(path)
        .map_err(|e| anyhow::anyhow!("Failed to open {}: {e}", path.display()))?;
    Ok(())
}

/// Copies `source` to `target` byte for byte.
///
/// # Errors
/// Returns an error if the source cannot be read or the target cannot be written.
pub fn copy_file(source: &Path, target: &Path) -> Result<u64> {
    fs::copy(source, target).map_err(|e| {
        anyhow::anyhow!(
            "Failed to copy {} to {}: {e}",
            source.display(),
            target.display()
        )
    })
}

/// Applies restrictive permissions to a private key file.
///
/// # Errors
/// Returns an error if permissions cannot be set.
pub fn set_key_permissions(path: &Path) -> Result<()> {
    fs::set_permissions(path, fs::Permissions::from_mode(KEY_FILE_MODE))
        .map_err(|e| anyhow::anyhow!("Failed to set key file permissions: {e}"))?;
    Ok(())
}

/// Lexically removes `.` and `..` components without touching the filesystem.
///
/// `..` at the root stays at the root. Symlinks are not resolved.
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                ) {
                    normalized.pop();
                } else if !normalized.has_root() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}
