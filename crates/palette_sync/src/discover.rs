//! Locating the directory that holds the generated sources.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SyncError};
use crate::render::SWIFTUI_SOURCE;
use crate::util::ensure_exists;

/// An explicit directory must exist. Without one, the first directory under
/// `search_root` containing the generated SwiftUI module is used.
pub fn resolve_output_dir(explicit: Option<&Path>, search_root: &Path) -> Result<PathBuf> {
    if let Some(path) = explicit {
        ensure_exists(path)?;
        return Ok(path.to_path_buf());
    }

    ensure_exists(search_root)?;
    find_file_dir(search_root, SWIFTUI_SOURCE.file_name)?.ok_or_else(|| {
        SyncError::SourceNotFound {
            root: search_root.to_path_buf(),
            file: SWIFTUI_SOURCE.file_name.to_string(),
        }
    })
}

/// Depth-first walk in sorted entry order. Symlinked directories are not
/// followed.
pub fn find_file_dir(root: &Path, file_name: &str) -> Result<Option<PathBuf>> {
    let mut entries = fs::read_dir(root)?.collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(fs::DirEntry::file_name);

    for entry in &entries {
        if entry.file_type()?.is_file() && entry.file_name() == file_name {
            return Ok(Some(root.to_path_buf()));
        }
    }

    for entry in entries {
        if entry.file_type()?.is_dir()
            && let Some(found) = find_file_dir(&entry.path(), file_name)?
        {
            return Ok(Some(found));
        }
    }

    Ok(None)
}
