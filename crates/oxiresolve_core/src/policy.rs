use std::path::Path;

use crate::constants::{INDEX_FILES, PROBE_SUFFIXES, SOURCE_EXTENSIONS};

/// Suffix and file-set policy shared by the collector and the resolver.
///
/// The suffix list is tried first-match-wins. The exact path (empty suffix)
/// is always the first candidate, whatever the caller passes in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvePolicy {
    suffixes: Vec<String>,
    index_files: Vec<String>,
    source_extensions: Vec<String>,
}

impl Default for ResolvePolicy {
    fn default() -> Self {
        Self {
            suffixes: PROBE_SUFFIXES.iter().map(|s| s.to_string()).collect(),
            index_files: Vec::new(),
            source_extensions: SOURCE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ResolvePolicy {
    /// Build a policy from an ordered suffix list, e.g. `[".ts", ".js"]`.
    pub fn with_suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ordered = vec![String::new()];
        for suffix in suffixes {
            let suffix = suffix.into();
            if !ordered.contains(&suffix) {
                ordered.push(suffix);
            }
        }
        self.suffixes = ordered;
        self
    }

    /// Enable directory-style resolution with the given index file names.
    pub fn with_index_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.index_files = files.into_iter().map(Into::into).collect();
        self
    }

    /// Enable directory-style resolution with [`INDEX_FILES`].
    pub fn with_default_index_files(self) -> Self {
        self.with_index_files(INDEX_FILES.iter().copied())
    }

    pub fn with_source_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source_extensions = extensions
            .into_iter()
            .map(|e| e.into().trim_start_matches('.').to_string())
            .collect();
        self
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    pub fn index_files(&self) -> &[String] {
        &self.index_files
    }

    pub fn source_extensions(&self) -> &[String] {
        &self.source_extensions
    }

    /// Whether `path` carries one of the collected source extensions
    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.source_extensions.iter().any(|s| s == ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = ResolvePolicy::default();
        assert_eq!(policy.suffixes(), ["", ".ts", ".js"]);
        assert!(policy.index_files().is_empty());
        assert_eq!(policy.source_extensions(), ["ts", "js"]);
    }

    #[test]
    fn test_with_suffixes_keeps_exact_match_first() {
        let policy = ResolvePolicy::default().with_suffixes([".js", "", ".ts", ".js"]);
        assert_eq!(policy.suffixes(), ["", ".js", ".ts"]);
    }

    #[test]
    fn test_with_default_index_files() {
        let policy = ResolvePolicy::default().with_default_index_files();
        assert_eq!(policy.index_files(), ["index.ts", "index.js"]);
    }

    #[test]
    fn test_is_source_file() {
        let policy = ResolvePolicy::default();
        assert!(policy.is_source_file(Path::new("src/a.ts")));
        assert!(policy.is_source_file(Path::new("src/b.js")));
        assert!(!policy.is_source_file(Path::new("src/c.tsx")));
        assert!(!policy.is_source_file(Path::new("README.md")));
        assert!(!policy.is_source_file(Path::new("Makefile")));
    }

    #[test]
    fn test_with_source_extensions_strips_dot() {
        let policy = ResolvePolicy::default().with_source_extensions([".mts", "mjs"]);
        assert_eq!(policy.source_extensions(), ["mts", "mjs"]);
        assert!(policy.is_source_file(Path::new("a.mts")));
        assert!(!policy.is_source_file(Path::new("a.ts")));
    }
}
