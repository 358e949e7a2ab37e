//! Default suffix tables used by [`ResolvePolicy::default`](crate::ResolvePolicy).
//!
//! Probe order is the tie-break when several files share a stem: with
//! `util.ts` and `util.js` side by side, `./util` becomes `./util.ts`.

/// Extensions (without the dot) of files collected from the input root
pub const SOURCE_EXTENSIONS: &[&str] = &[
    "ts", // TypeScript
    "js", // JavaScript
];

/// Suffixes appended to a module base path, in priority order.
/// The empty suffix (exact path) always comes first.
pub const PROBE_SUFFIXES: &[&str] = &["", ".ts", ".js"];

/// Index file names tried for directory-style imports when enabled
pub const INDEX_FILES: &[&str] = &["index.ts", "index.js"];
