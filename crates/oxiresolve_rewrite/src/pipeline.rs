use anyhow::Result;
use log::{debug, info, warn};
use oxc_allocator::Allocator;
use rayon::prelude::*;
use std::{path::Path, thread};

use oxiresolve_core::{ProbeCache, ResolvePolicy, collect_sources, parse_source, read_source};

use crate::{
    config::Config,
    rewriter::rewrite,
    types::{Diagnostic, DiagnosticKind, RunSummary},
    writer::{mirrored_path, write_output},
};

/// Rewrites every source file under `cfg.src_dir` into the mirrored tree at
/// `cfg.dst_dir`.
///
/// Fails only when the source root is not an existing directory, before any
/// file is touched. Per-file problems (unparseable input, unresolved
/// specifiers, write errors) are logged, recorded in the returned summary and
/// never stop the batch.
pub fn run(cfg: &Config) -> Result<RunSummary> {
    info!("Starting specifier rewrite");
    cfg.validate()?;

    let src_root = cfg.src_dir.canonicalize().unwrap_or_else(|_| cfg.src_dir.clone());
    info!("Using source root: {}", src_root.display());

    // Leave out a destination nested inside the source root
    let skip =
        cfg.dst_dir.canonicalize().ok().filter(|d| d.starts_with(&src_root) && *d != src_root);
    if let Some(skip) = &skip {
        debug!("Excluding output root from collection: {}", skip.display());
    }

    let policy = cfg.policy();
    debug!("Probe suffixes: {:?}, index files: {:?}", policy.suffixes(), policy.index_files());

    let files = collect_sources(&src_root, &policy, skip.as_deref());
    info!("Found {} source files", files.len());

    let cache = ProbeCache::new();
    let mut summary = files
        .par_iter()
        .map(|file| {
            debug!("Thread {:?} processing: {}", thread::current().id(), file.display());
            process_file(file, &src_root, &cfg.dst_dir, &policy, &cache)
        })
        .reduce(RunSummary::default, |mut acc, one| {
            acc.merge(one);
            acc
        });
    summary.files_found = files.len();
    summary.diagnostics.sort_by(|a, b| a.file.cmp(&b.file));

    info!(
        "Rewrite complete. Wrote {} of {} files, rewrote {} specifiers",
        summary.files_written, summary.files_found, summary.specifiers_rewritten
    );
    debug!("Probe cache entries: {}", cache.len());
    Ok(summary)
}

fn process_file(
    file: &Path,
    src_root: &Path,
    dst_root: &Path,
    policy: &ResolvePolicy,
    cache: &ProbeCache,
) -> RunSummary {
    let mut summary = RunSummary::default();

    let source = match read_source(file) {
        Ok(source) => source,
        Err(e) => {
            warn!("Skipping {}: {:#}", file.display(), e);
            summary.diagnostics.push(Diagnostic::new(
                DiagnosticKind::ParseFailure,
                file,
                format!("{:#}", e),
            ));
            return summary;
        }
    };

    let allocator = Allocator::default();
    let tree = match parse_source(&allocator, file, &source) {
        Ok(tree) => tree,
        Err(e) => {
            warn!("Skipping {}: {:#}", file.display(), e);
            summary.diagnostics.push(Diagnostic::new(
                DiagnosticKind::ParseFailure,
                file,
                format!("{:#}", e),
            ));
            return summary;
        }
    };

    let rewritten = rewrite(&tree, policy, cache);
    summary.specifiers_rewritten = rewritten.rewritten_count();
    for edit in rewritten.unresolved() {
        summary.diagnostics.push(Diagnostic::new(
            DiagnosticKind::UnresolvedSpecifier,
            file,
            edit.resolution.specifier(),
        ));
    }
    let text = rewritten.print();

    let written = mirrored_path(src_root, dst_root, file).and_then(|dest| {
        debug!("Writing {} -> {}", file.display(), dest.display());
        write_output(&dest, &text)
    });
    match written {
        Ok(()) => summary.files_written = 1,
        Err(e) => {
            warn!("Output error: {:#}", e);
            summary.diagnostics.push(Diagnostic::new(
                DiagnosticKind::WriteFailure,
                file,
                format!("{:#}", e),
            ));
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, path::PathBuf};
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    #[test]
    fn test_end_to_end() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in");
        let output = temp_dir.path().join("out");
        create_test_file(&input, "src/index.ts", "import {x} from \"./util\";\nconsole.log(x);\n");
        create_test_file(&input, "src/util.ts", "export const x = 1;\n");

        let summary = run(&Config::new(&input, &output)).unwrap();
        assert_eq!(summary.files_found, 2);
        assert_eq!(summary.files_written, 2);
        assert_eq!(summary.specifiers_rewritten, 1);
        assert!(summary.diagnostics.is_empty());

        assert_eq!(
            fs::read_to_string(output.join("src/index.ts")).unwrap(),
            "import {x} from \"./util.ts\";\nconsole.log(x);\n"
        );
        assert_eq!(fs::read_to_string(output.join("src/util.ts")).unwrap(), "export const x = 1;\n");
    }

    #[test]
    fn test_missing_module_still_written() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in");
        let output = temp_dir.path().join("out");
        create_test_file(&input, "a.ts", "import { m } from './missing';\n");

        let summary = run(&Config::new(&input, &output)).unwrap();
        assert_eq!(summary.files_written, 1);
        assert_eq!(summary.count(DiagnosticKind::UnresolvedSpecifier), 1);
        let diag = summary.of_kind(DiagnosticKind::UnresolvedSpecifier).next().unwrap();
        assert_eq!(diag.message, "./missing");
        assert!(diag.file.ends_with("a.ts"));
        assert_eq!(
            fs::read_to_string(output.join("a.ts")).unwrap(),
            "import { m } from './missing';\n"
        );
    }

    #[test]
    fn test_ts_wins_over_js_stably() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in");
        create_test_file(&input, "a.ts", "import { b } from './b';\n");
        create_test_file(&input, "b.ts", "export const b = 1;\n");
        create_test_file(&input, "b.js", "export const b = 1;\n");

        for round in 0..3 {
            let output = temp_dir.path().join(format!("out{}", round));
            run(&Config::new(&input, &output)).unwrap();
            assert_eq!(
                fs::read_to_string(output.join("a.ts")).unwrap(),
                "import { b } from './b.ts';\n"
            );
        }
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in");
        let first = temp_dir.path().join("first");
        let second = temp_dir.path().join("second");
        create_test_file(&input, "lib/a.ts", "export * from './b';\nimport c from '../c';\n");
        create_test_file(&input, "lib/b.ts", "export const b = 1;\n");
        create_test_file(&input, "c.js", "export default 3;\n");

        run(&Config::new(&input, &first)).unwrap();
        let summary = run(&Config::new(&first, &second)).unwrap();
        assert_eq!(summary.specifiers_rewritten, 0);

        let once = fs::read_to_string(first.join("lib/a.ts")).unwrap();
        assert_eq!(once, "export * from './b.ts';\nimport c from '../c.js';\n");
        assert_eq!(fs::read_to_string(second.join("lib/a.ts")).unwrap(), once);
    }

    #[test]
    fn test_unparseable_file_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in");
        let output = temp_dir.path().join("out");
        create_test_file(&input, "broken.ts", "import { from './x';\n");
        create_test_file(&input, "ok.ts", "export const ok = true;\n");

        let summary = run(&Config::new(&input, &output)).unwrap();
        assert_eq!(summary.files_found, 2);
        assert_eq!(summary.files_written, 1);
        assert_eq!(summary.count(DiagnosticKind::ParseFailure), 1);
        assert!(!output.join("broken.ts").exists());
        assert!(output.join("ok.ts").exists());
    }

    #[test]
    fn test_write_failure_does_not_abort() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in");
        let output = temp_dir.path().join("out");
        create_test_file(&input, "blocked/a.ts", "export const a = 1;\n");
        create_test_file(&input, "free/b.ts", "export const b = 1;\n");
        // A regular file where the output directory should go
        create_test_file(&output, "blocked", "");

        let summary = run(&Config::new(&input, &output)).unwrap();
        assert_eq!(summary.files_written, 1);
        assert_eq!(summary.count(DiagnosticKind::WriteFailure), 1);
        assert!(output.join("free/b.ts").exists());
    }

    #[test]
    fn test_missing_source_root_fails_without_output() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out");

        assert!(run(&Config::new(temp_dir.path().join("nope"), &output)).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_dynamic_import_untouched_end_to_end() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in");
        let output = temp_dir.path().join("out");
        let src = "const which = 'lazy';\nexport async function load() {\n  return import('./' + which);\n}\n";
        create_test_file(&input, "main.js", src);
        create_test_file(&input, "lazy.js", "export default 1;\n");

        run(&Config::new(&input, &output)).unwrap();
        assert_eq!(fs::read_to_string(output.join("main.js")).unwrap(), src);
    }

    #[test]
    fn test_index_resolution_flag() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in");
        create_test_file(&input, "main.ts", "import { c } from './components';\n");
        create_test_file(&input, "components/index.ts", "export const c = 1;\n");

        let plain = temp_dir.path().join("plain");
        let summary = run(&Config::new(&input, &plain)).unwrap();
        assert_eq!(summary.count(DiagnosticKind::UnresolvedSpecifier), 1);

        let indexed = temp_dir.path().join("indexed");
        let mut cfg = Config::new(&input, &indexed);
        cfg.index_resolution = true;
        run(&cfg).unwrap();
        assert_eq!(
            fs::read_to_string(indexed.join("main.ts")).unwrap(),
            "import { c } from './components/index.ts';\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_is_mirrored() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in");
        let output = temp_dir.path().join("out");
        create_test_file(&input, "a.ts", "import { lib } from './vendor/lib';\n");
        create_test_file(temp_dir.path(), "shared/lib.ts", "export * from './other';\n");
        create_test_file(temp_dir.path(), "shared/other.ts", "export const lib = 1;\n");
        std::os::unix::fs::symlink(temp_dir.path().join("shared"), input.join("vendor")).unwrap();

        let summary = run(&Config::new(&input, &output)).unwrap();
        assert_eq!(summary.files_found, 3);
        assert_eq!(summary.files_written, 3);
        assert_eq!(
            fs::read_to_string(output.join("a.ts")).unwrap(),
            "import { lib } from './vendor/lib.ts';\n"
        );
        assert_eq!(
            fs::read_to_string(output.join("vendor/lib.ts")).unwrap(),
            "export * from './other.ts';\n"
        );
        assert!(output.join("vendor/other.ts").is_file());
    }

    #[test]
    fn test_output_inside_input_is_not_reprocessed() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in");
        create_test_file(&input, "a.ts", "import './b';\n");
        create_test_file(&input, "b.ts", "export {};\n");
        let output = input.join("dist");

        run(&Config::new(&input, &output)).unwrap();
        let summary = run(&Config::new(&input, &output)).unwrap();
        assert_eq!(summary.files_found, 2);
        assert!(!output.join("dist").exists());
    }
}
