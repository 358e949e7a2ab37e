//! Import specifier rewriting for JavaScript/TypeScript source trees.
//!
//! This crate walks the import and re-export declarations of every source
//! file under a directory, resolves extensionless local specifiers against the
//! file system and writes the rewritten files to a mirrored output tree
//! (`./util` becomes `./util.ts` when `util.ts` sits next to the importer).
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use oxiresolve_rewrite::{Config, DiagnosticKind, run};
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = Config::new("src", "dist");
//! let summary = run(&cfg)?;
//!
//! for d in summary.of_kind(DiagnosticKind::UnresolvedSpecifier) {
//!     eprintln!("{}: {}", d.file.display(), d.message);
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod pipeline;
mod printer;
mod reporter;
mod rewriter;
mod types;
mod writer;

// Re-export public API
pub use config::Config;
pub use pipeline::run;
pub use printer::print;
pub use reporter::{print_diagnostics_tree, print_summary, print_usage};
pub use rewriter::{
    DeclKind, LiteralEdit, RewrittenSource, rewrite, specifier_site, walk_declarations,
};
pub use types::{Diagnostic, DiagnosticKind, RunSummary};
pub use writer::{mirrored_path, write_output};
