//! `pushstate docs`

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use pushstate_core::Method;

#[derive(Debug, Args)]
pub struct DocsArgs {
    /// JSON comment AST produced by a dox-style parser
    pub ast: PathBuf,

    /// Source file name used to prefix method uids (defaults to the AST file name)
    #[arg(long)]
    pub filename: Option<String>,
}

pub fn run(args: DocsArgs) -> Result<()> {
    let methods = extract(&args.ast, args.filename.as_deref())?;
    println!("{}", serde_json::to_string_pretty(&methods)?);
    Ok(())
}

pub fn extract(path: &Path, filename: Option<&str>) -> Result<Vec<Method>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading comment AST {}", path.display()))?;

    let filename = match filename {
        Some(name) => name.to_string(),
        None => path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };

    pushstate_core::parse_json(&content, &filename)
        .with_context(|| format!("parsing comment AST {}", path.display()))
}
