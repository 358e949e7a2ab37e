use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The file could not be read or parsed; it was skipped
    ParseFailure,
    /// A local specifier matched no file; it was left as written
    UnresolvedSpecifier,
    /// The output file could not be written
    WriteFailure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub file: PathBuf,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, file: &Path, message: impl Into<String>) -> Self {
        Self { kind, file: file.to_path_buf(), message: message.into() }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub files_found: usize,
    pub files_written: usize,
    pub specifiers_rewritten: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl RunSummary {
    pub fn merge(&mut self, other: RunSummary) {
        self.files_found += other.files_found;
        self.files_written += other.files_written;
        self.specifiers_rewritten += other.specifiers_rewritten;
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.of_kind(kind).count()
    }
}
