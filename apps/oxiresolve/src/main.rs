use anyhow::Result;
use clap::{Parser, error::ErrorKind};
use log::{debug, info};
use oxiresolve_rewrite::Config;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

fn command_name() -> String {
    std::env::args()
        .next()
        .as_deref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "oxiresolve".to_string())
}

fn main() -> Result<()> {
    // Warnings (unresolved specifiers, skipped files) are part of the output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let cfg = match Config::try_parse() {
        Ok(cfg) => cfg,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            debug!("Invalid invocation: {}", e);
            oxiresolve_rewrite::print_usage(&mut stdout, &command_name())?;
            std::process::exit(1);
        }
    };
    debug!("Parsed CLI arguments: {:?}", cfg);

    if let Err(e) = cfg.validate() {
        debug!("Invalid source root: {:#}", e);
        oxiresolve_rewrite::print_usage(&mut stdout, &command_name())?;
        std::process::exit(1);
    }

    let start = Instant::now();
    let num_threads = rayon::current_num_threads();
    info!(
        "Rewriting {} into {} (using {} threads)",
        cfg.src_dir.display(),
        cfg.dst_dir.display(),
        num_threads
    );

    let summary = oxiresolve_rewrite::run(&cfg)?;
    debug!("Collected {} diagnostics", summary.diagnostics.len());

    if !cfg.quiet {
        let root = cfg.src_dir.canonicalize().unwrap_or_else(|_| cfg.src_dir.clone());
        oxiresolve_rewrite::print_diagnostics_tree(&mut stdout, &summary, &root)?;
        oxiresolve_rewrite::print_summary(
            &mut stdout,
            &summary,
            start.elapsed().as_millis(),
            num_threads,
        )?;
    }
    stdout.flush()?;

    // Per-file problems never fail the run
    Ok(())
}
