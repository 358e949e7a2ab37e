//! Core utilities for oxiresolve.
//!
//! This crate provides the leaf components of the specifier rewriter:
//! - Probing the file system for a suffixed variant of a module path
//! - Resolving import/export specifiers against the referencing file
//! - Collecting source files under an input root
//! - Parsing JS/TS files into a syntax tree annotated with its path

mod collector;
mod constants;
mod parser;
mod policy;
mod probe;
mod resolver;
mod types;

// Re-export public API
pub use collector::collect_sources;
pub use constants::{INDEX_FILES, PROBE_SUFFIXES, SOURCE_EXTENSIONS};
pub use parser::{SourceTree, parse_source, read_source};
pub use policy::ResolvePolicy;
pub use probe::{ProbeCache, ProbeHit, probe};
pub use resolver::{base_path, resolve};
pub use types::{Resolution, SpecifierClass};
