use anyhow::{Context, Result, anyhow};
use log::{debug, trace};
use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_parser::{Parser as OxcParser, ParserReturn};
use oxc_span::SourceType;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// A parsed source file, annotated with the path it was read from.
///
/// The program lives in the caller's arena and borrows `source`; one tree is
/// built per file and never shared between files.
pub struct SourceTree<'a> {
    pub path: PathBuf,
    pub source: &'a str,
    pub program: Program<'a>,
}

impl SourceTree<'_> {
    /// Directory used to resolve relative specifiers of this file
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

pub fn read_source(file: &Path) -> Result<String> {
    fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
}

/// Parses `source` as the contents of `file`.
///
/// Any syntax error makes the whole file unparseable: the rewritten output is
/// spliced from the original text, so it must come from a clean parse.
pub fn parse_source<'a>(
    allocator: &'a Allocator,
    file: &Path,
    source: &'a str,
) -> Result<SourceTree<'a>> {
    trace!("Parsing file: {}", file.display());
    let st = source_type_for(file);
    let ParserReturn { program, errors, panicked, .. } =
        OxcParser::new(allocator, source, st).parse();

    if panicked || !errors.is_empty() {
        let detail = errors
            .first()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "parser aborted".to_string());
        return Err(anyhow!(
            "Failed to parse {} ({} error(s)): {}",
            file.display(),
            errors.len(),
            detail
        ));
    }

    debug!("Parsed {} top-level statements in {}", program.body.len(), file.display());
    Ok(SourceTree { path: file.to_path_buf(), source, program })
}

fn source_type_for(path: &Path) -> SourceType {
    let ext = path.extension().and_then(|e| e.to_str());

    // import/export declarations require module goal
    SourceType::default()
        .with_module(true)
        .with_jsx(matches!(ext, Some("tsx") | Some("jsx")))
        .with_typescript(matches!(ext, Some("ts") | Some("tsx") | Some("mts") | Some("cts")))
}
