use dashmap::DashMap;
use log::trace;
use path_clean::PathClean;
use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

/// A suffixed variant of a base path that exists as a regular file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeHit {
    /// The matching file, lexically cleaned
    pub path: PathBuf,
    /// The suffix that was appended to the base path (may be empty)
    pub suffix: String,
}

/// Probe results keyed by the candidate base path as spelled. Keys are raw
/// strings because `Path` equality treats `dir/.` and `dir` as the same path.
pub type ProbeCache = DashMap<OsString, Option<ProbeHit>>;

/// Returns the first `base + suffix` that names a regular file.
///
/// Directories never match, even when the candidate path exists.
pub fn probe<S: AsRef<str>>(base: &Path, suffixes: &[S]) -> Option<ProbeHit> {
    for suffix in suffixes {
        let suffix = suffix.as_ref();
        let candidate = with_suffix(base, suffix);
        if is_regular_file(&candidate) {
            trace!("Probe hit: {}", candidate.display());
            return Some(ProbeHit { path: candidate.clean(), suffix: suffix.to_string() });
        }
        trace!("Probe miss: {}", candidate.display());
    }
    None
}

/// Appends `suffix` to the final component without touching separators,
/// so `dir/.` with `.ts` probes `dir/..ts`, matching the specifier text.
pub(crate) fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut s: OsString = base.as_os_str().to_os_string();
    s.push(suffix);
    PathBuf::from(s)
}

pub(crate) fn is_regular_file(p: &Path) -> bool {
    fs::metadata(p).map(|m| m.is_file()).unwrap_or(false)
}
