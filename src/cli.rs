use crate::generator::{DocGenerator, OutputTarget};
use crate::importer::import_module;
use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};
use std::io::{self, Write};
use std::path::PathBuf;

/// docmd - Generate Markdown API docs from module docstrings
#[derive(Parser, Debug)]
#[command(name = "docmd")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Dotted name of the module to document
    #[arg(value_name = "MODULE")]
    pub module: String,

    /// Base URL for "view source" links
    #[arg(short = 'u', long = "url", value_name = "URL")]
    pub source_url: Option<String>,

    /// Directory to write one Markdown file per module (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Directory or file to search for introspection snapshots
    #[arg(short = 'p', long = "search-path", value_name = "PATH", default_value = ".")]
    pub search_path: PathBuf,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if args.module.trim().is_empty() {
        anyhow::bail!("Module name must not be empty");
    }

    if !args.search_path.exists() {
        anyhow::bail!(
            "Search path does not exist: {}",
            args.search_path.display()
        );
    }

    if let Some(ref output_dir) = args.output_dir {
        if output_dir.exists() && !output_dir.is_dir() {
            anyhow::bail!(
                "Output path is not a directory: {}",
                output_dir.display()
            );
        }
        info!("Output directory: {}", output_dir.display());
    } else {
        info!("Output: stdout");
    }
    info!("Module: {}", args.module);
    info!("Search path: {}", args.search_path.display());

    Ok(args)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    let imported = import_module(&args.search_path, &args.module)
        .with_context(|| format!("Failed to import module {}", args.module))?;

    let generator = DocGenerator::new(args.source_url.clone());

    let generated = match &args.output_dir {
        Some(dir) => generator
            .generate(
                &imported.namespace,
                &imported.id,
                OutputTarget::Directory(dir.clone()),
            )
            .with_context(|| format!("Failed to write documentation to {}", dir.display()))?,
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            let generated = generator
                .generate(
                    &imported.namespace,
                    &imported.id,
                    OutputTarget::Stream(&mut handle),
                )
                .context("Failed to write documentation to stdout")?;
            handle.flush()?;
            generated
        }
    };

    match generated {
        Some(name) => info!("Documentation generated for {}", name),
        None => warn!("{} is excluded from documentation, nothing generated", args.module),
    }

    Ok(())
}
