use log::{debug, trace};
use path_clean::PathClean;
use std::path::{Path, PathBuf};

use crate::{
    policy::ResolvePolicy,
    probe::{ProbeCache, ProbeHit, is_regular_file, probe},
    types::{Resolution, SpecifierClass},
};

/// Base path to probe for `specifier`, or `None` for external specifiers.
///
/// The join is not cleaned: suffixes are appended to exactly what the
/// specifier spells, so `.` stays `dir/.` rather than collapsing to `dir`.
pub fn base_path(specifier: &str, from_dir: &Path) -> Option<PathBuf> {
    match SpecifierClass::of(specifier) {
        SpecifierClass::LocalAbsolute => Some(PathBuf::from(specifier)),
        SpecifierClass::LocalRelative => Some(from_dir.join(specifier)),
        SpecifierClass::External => None,
    }
}

/// Resolves `specifier`, written in a file located in `from_dir`.
///
/// Local specifiers get the first suffix (per `policy`) that names a real
/// file appended to their text. Specifiers with no match are returned
/// unchanged as [`Resolution::Unresolved`]; reporting them is up to the
/// caller, which knows the referencing file.
pub fn resolve(
    policy: &ResolvePolicy,
    from_dir: &Path,
    specifier: &str,
    cache: &ProbeCache,
) -> Resolution {
    let Some(base) = base_path(specifier, from_dir) else {
        trace!("Leaving external specifier '{}' untouched", specifier);
        return Resolution::Untouched(specifier.to_string());
    };

    let key = base.as_os_str().to_os_string();
    let cached = cache.get(&key).map(|v| v.value().clone());
    let hit = if let Some(hit) = cached {
        trace!("Cache hit for probe: {}", base.display());
        hit
    } else {
        trace!("Probing '{}' at {}", specifier, base.display());
        let hit = probe(&base, policy.suffixes()).or_else(|| probe_index(&base, policy));
        cache.insert(key, hit.clone());
        hit
    };

    match hit {
        Some(ProbeHit { suffix, path }) => {
            debug!("Resolved '{}' to {}", specifier, path.display());
            Resolution::Resolved(append_suffix(specifier, &suffix))
        }
        None => {
            debug!("No file matches '{}' from {}", specifier, from_dir.display());
            Resolution::Unresolved(specifier.to_string())
        }
    }
}

/// Directory-style lookup: `./dir` -> `./dir/index.ts`
fn probe_index(base: &Path, policy: &ResolvePolicy) -> Option<ProbeHit> {
    for index_file in policy.index_files() {
        let candidate = base.join(index_file);
        if is_regular_file(&candidate) {
            trace!("Resolved directory import to {}", candidate.display());
            return Some(ProbeHit {
                path: candidate.clean(),
                suffix: format!("/{}", index_file),
            });
        }
    }
    None
}

fn append_suffix(specifier: &str, suffix: &str) -> String {
    if suffix.starts_with('/') && specifier.ends_with('/') {
        format!("{}{}", specifier, &suffix[1..])
    } else {
        format!("{}{}", specifier, suffix)
    }
}
