// Declare modules
pub mod cli;
pub mod collector;
pub mod config;
pub mod defaults;
pub mod languages;
pub mod models;
pub mod writer;

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use self::cli::Cli;
use self::collector::{Collector, DirectoryCollector};
use self::config::resolve_config;
use self::writer::{DocumentWriter, MarkdownWriter};

/// Initializes components and orchestrates data flow.
pub fn run(args: Cli) -> Result<()> {
    // 1. Resolve the project root
    let root = fs::canonicalize(&args.project_path)
        .with_context(|| format!("Project path {} not found", args.project_path.display()))?;
    if !root.is_dir() {
        bail!("Project path {} is not a directory", root.display());
    }
    let project_name = root.file_name().and_then(|n| n.to_str());

    // 2. Resolve configuration
    let exclusions = resolve_config(&args, project_name)?;

    // 3. Prepare the output location
    let output_dir = args.output_dir.as_deref().unwrap_or(root.as_path());
    let output = output_path(output_dir, &root)?;

    // 4. Collect, keeping the document itself out of its own listing
    let exclusions = exclusions.with_excluded_path(output.clone());
    let collection = DirectoryCollector::new(args.gitignore).collect(&root, &exclusions);

    // 5. Write
    MarkdownWriter.write(&output, &collection, &root)?;

    println!("✅ Done! Project structure saved to: {}", output.display());
    println!("📊 Files processed: {}", collection.files.len());

    Ok(())
}

/// Creates `output_dir` if needed and returns the document path inside it.
fn output_path(output_dir: &Path, root: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;
    let output_dir = fs::canonicalize(output_dir)
        .with_context(|| format!("Failed to resolve output directory {}", output_dir.display()))?;

    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "root".to_string());

    Ok(output_dir.join(format!("project_{}_structure.md", name)))
}
