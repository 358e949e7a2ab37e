use anyhow::{Result, anyhow};
use clap::Parser;
use log::debug;
use std::path::PathBuf;

use oxiresolve_core::ResolvePolicy;

#[derive(Debug, Clone, Parser)]
#[command(name = "oxiresolve")]
#[command(version)]
#[command(about = "Rewrite JS/TS import specifiers to name the file they resolve to")]
pub struct Config {
    /// Directory containing the sources to rewrite
    #[arg(value_name = "SRC_DIR")]
    pub src_dir: PathBuf,

    /// Directory receiving the mirrored output tree
    #[arg(value_name = "DST_DIR")]
    pub dst_dir: PathBuf,

    /// Also resolve directory imports to their index file (`./dir` -> `./dir/index.ts`)
    #[arg(long)]
    pub index_resolution: bool,

    /// Do not print the summary to stdout
    #[arg(long, short)]
    pub quiet: bool,
}

impl Config {
    pub fn new(src_dir: impl Into<PathBuf>, dst_dir: impl Into<PathBuf>) -> Self {
        Self {
            src_dir: src_dir.into(),
            dst_dir: dst_dir.into(),
            index_resolution: false,
            quiet: false,
        }
    }

    /// Check that the source root is an existing directory
    pub fn validate(&self) -> Result<()> {
        if !self.src_dir.is_dir() {
            debug!("Source root is not a directory: {:?}", self.src_dir);
            return Err(anyhow!("{} is not an existing directory", self.src_dir.display()));
        }
        Ok(())
    }

    pub fn policy(&self) -> ResolvePolicy {
        let policy = ResolvePolicy::default();
        if self.index_resolution { policy.with_default_index_files() } else { policy }
    }
}
