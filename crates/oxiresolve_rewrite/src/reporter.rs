use std::{
    collections::BTreeMap,
    io::{self, Write},
    path::Path,
};

use colored::Colorize;
use log::{debug, trace};

use crate::types::{Diagnostic, DiagnosticKind, RunSummary};

pub fn print_usage<W: Write>(writer: &mut W, command_name: &str) -> io::Result<()> {
    writeln!(writer, "usage: {} SRC_DIR DST_DIR", command_name)?;
    writer.flush()
}

/// Prints diagnostics grouped by input file, paths shown relative to `root`.
pub fn print_diagnostics_tree<W: Write>(
    writer: &mut W,
    summary: &RunSummary,
    root: &Path,
) -> io::Result<()> {
    if summary.diagnostics.is_empty() {
        return Ok(());
    }
    debug!("Printing diagnostics tree for {} diagnostics", summary.diagnostics.len());

    let mut by_file: BTreeMap<&Path, Vec<&Diagnostic>> = BTreeMap::new();
    for d in &summary.diagnostics {
        by_file.entry(d.file.as_path()).or_default().push(d);
    }

    writeln!(
        writer,
        "{} {} file(s) need attention\n",
        "⚠".yellow().bold(),
        by_file.len().to_string().yellow()
    )?;

    for (file, diagnostics) in by_file {
        trace!("Processing file: {} with {} diagnostics", file.display(), diagnostics.len());
        let display_path = file.strip_prefix(root).unwrap_or(file).display().to_string();
        writeln!(writer, "{}", display_path.bright_white().bold())?;

        for (idx, d) in diagnostics.iter().enumerate() {
            let prefix = if idx == diagnostics.len() - 1 { "└──" } else { "├──" };
            let line = match d.kind {
                DiagnosticKind::UnresolvedSpecifier => {
                    format!("{} '{}'", "unresolved".yellow(), d.message)
                }
                DiagnosticKind::ParseFailure => format!("{} {}", "skipped".red(), d.message),
                DiagnosticKind::WriteFailure => format!("{} {}", "not written".red(), d.message),
            };
            writeln!(writer, "{}  {}", prefix.dimmed(), line)?;
        }
        writeln!(writer)?;
    }
    writer.flush()
}

pub fn print_summary<W: Write>(
    writer: &mut W,
    summary: &RunSummary,
    elapsed_ms: u128,
    num_threads: usize,
) -> io::Result<()> {
    writeln!(writer, "{}", "─".repeat(60).dimmed())?;
    writeln!(writer, "{}", "Summary".bold())?;
    writeln!(
        writer,
        "  Specifiers rewritten: {}",
        summary.specifiers_rewritten.to_string().green().bold()
    )?;
    let unresolved = summary.count(DiagnosticKind::UnresolvedSpecifier);
    if unresolved > 0 {
        writeln!(writer, "  Unresolved specifiers: {}", unresolved.to_string().yellow().bold())?;
    }
    let skipped = summary.count(DiagnosticKind::ParseFailure);
    if skipped > 0 {
        writeln!(writer, "  Skipped files: {}", skipped.to_string().red().bold())?;
    }
    let failed = summary.count(DiagnosticKind::WriteFailure);
    if failed > 0 {
        writeln!(writer, "  Write failures: {}", failed.to_string().red().bold())?;
    }

    writeln!(
        writer,
        "\n{} Finished in {}ms on {} files (using {} threads).",
        "●".bright_blue(),
        elapsed_ms.to_string().cyan(),
        summary.files_found.to_string().cyan(),
        num_threads.to_string().cyan()
    )?;
    writer.flush()
}
