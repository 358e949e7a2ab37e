use ignore::WalkBuilder;
use log::{debug, trace, warn};
use std::path::{Path, PathBuf};

use crate::policy::ResolvePolicy;

/// Collects every source file under `root`, sorted by path.
///
/// Hidden files and ignore files are not filtered and symlinked directories
/// are followed: the output tree mirrors the input completely. Anything under `skip` (typically the output root
/// when it sits inside the input) is left out. Unreadable entries are
/// logged and skipped.
pub fn collect_sources(root: &Path, policy: &ResolvePolicy, skip: Option<&Path>) -> Vec<PathBuf> {
    debug!("Collecting source files");
    debug!("Walking directory tree from root: {}", root.display());
    let mut files: Vec<PathBuf> = Vec::new();
    let walker = WalkBuilder::new(root).standard_filters(false).follow_links(true).build();

    for res in walker {
        let dent = match res {
            Ok(dent) => dent,
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };
        let p = dent.path();
        if skip.is_some_and(|s| p.starts_with(s)) {
            trace!("Skipping file under output root: {}", p.display());
            continue;
        }
        if !p.is_file() {
            continue;
        }

        if policy.is_source_file(p) {
            trace!("Found source file: {}", p.display());
            files.push(p.to_path_buf());
        }
    }
    files.sort();
    debug!("Collected {} source files", files.len());
    files
}
