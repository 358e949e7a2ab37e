use anyhow::{Context, Result, anyhow};
use log::trace;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Maps `file` under `src_root` to the same relative path under `dst_root`.
pub fn mirrored_path(src_root: &Path, dst_root: &Path, file: &Path) -> Result<PathBuf> {
    let rel = file.strip_prefix(src_root).map_err(|_| {
        anyhow!("{} is not under source root {}", file.display(), src_root.display())
    })?;
    Ok(dst_root.join(rel))
}

/// Writes `text` to `path`, creating missing parent directories first.
pub fn write_output(path: &Path, text: &str) -> Result<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }
    trace!("Writing {} bytes to {}", text.len(), path.display());
    fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
}
