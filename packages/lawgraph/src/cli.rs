//! Command-line interface for the law graph compiler.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::compiler::load_rows;
use crate::config::{CompileOptions, Namespaces, DEFAULT_DEFINITIONS_BASE, DEFAULT_INSTANCE_BASE};
use crate::error::{LawGraphError, Result};
use crate::graph::compile;
use crate::render::{save_outputs, OutputFormat};

/// SFS law graph compiler - turn flattened Swedish statutes into a graph.
#[derive(Parser)]
#[command(name = "sfs-lawgraph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a flat JSON file into Cypher and/or Turtle.
    Compile {
        /// Flat JSON input file (an array of row objects)
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory (default: the input file's directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output form
        #[arg(short, long, value_enum, default_value = "both")]
        format: OutputFormat,

        /// Place chapterless rows under an auto-generated chapter
        #[arg(long)]
        synthetic_context: bool,

        /// Base IRI for the inst: prefix
        #[arg(long, default_value = DEFAULT_INSTANCE_BASE)]
        instance_base: String,

        /// Base IRI for the def: prefix
        #[arg(long, default_value = DEFAULT_DEFINITIONS_BASE)]
        definitions_prefix: String,

        /// Law label to use when no row carries one
        #[arg(long)]
        law_label: Option<String>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            input,
            output,
            format,
            synthetic_context,
            instance_base,
            definitions_prefix,
            law_label,
        } => {
            let mut options = CompileOptions::new().with_synthetic_context(synthetic_context);
            if law_label.is_some() {
                options = options.with_fallback_law_label(law_label);
            }
            let namespaces = Namespaces::new(instance_base, definitions_prefix);
            compile_command(&input, output.as_deref(), format, &options, &namespaces)
        }
    }
}

/// Resolve the output directory: explicit, else the input's parent.
fn output_dir_for(input: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        Some(dir) => dir.to_path_buf(),
        None => match input.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        },
    }
}

/// Execute the compile command.
fn compile_command(
    input: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    options: &CompileOptions,
    namespaces: &Namespaces,
) -> Result<()> {
    // Validate paths before reading anything
    if !input.is_file() {
        return Err(LawGraphError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Input file does not exist: {}", input.display()),
        )));
    }
    let output_dir = output_dir_for(input, output);
    if !output_dir.is_dir() {
        return Err(LawGraphError::InvalidOutputDir(format!(
            "{} is not an existing directory",
            output_dir.display()
        )));
    }
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "lawgraph".to_string());

    println!(
        "{} {}",
        style("Compiling").bold(),
        style(input.display()).cyan()
    );
    println!();

    // Create progress spinner
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    pb.set_message("Reading flat JSON...");
    let graph = match load_rows(input).and_then(|rows| {
        pb.set_message("Assembling graph...");
        compile(&rows, options)
    }) {
        Ok(graph) => graph,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Writing output...");
    let serializers = format.serializers(namespaces);
    let written = match save_outputs(&graph, &serializers, &output_dir, &stem) {
        Ok(paths) => paths,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    let stats = graph.stats();
    println!("  Law: {}", style(&graph.law().label).green());
    println!(
        "  Rows: {} processed, {} skipped of {}",
        stats.processed, stats.skipped, stats.source_rows
    );
    if stats.skipped > 0 {
        println!("  Skipped rows: {}", style(stats.skipped).yellow().bold());
    }
    println!("  Nodes: {}", graph.node_count());
    println!("  Edges: {}", graph.edges().len());
    println!("  Synthetic context: {}", stats.synthetic_context);

    println!();
    for path in &written {
        println!("{} {}", style("Saved to:").green().bold(), path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_compile_defaults() {
        let cli = Cli::parse_from(["sfs-lawgraph", "compile", "-i", "sfb.json"]);

        let Commands::Compile {
            input,
            output,
            format,
            synthetic_context,
            instance_base,
            definitions_prefix,
            law_label,
        } = cli.command;
        assert_eq!(input, PathBuf::from("sfb.json"));
        assert!(output.is_none());
        assert_eq!(format, OutputFormat::Both);
        assert!(!synthetic_context);
        assert_eq!(instance_base, DEFAULT_INSTANCE_BASE);
        assert_eq!(definitions_prefix, DEFAULT_DEFINITIONS_BASE);
        assert!(law_label.is_none());
    }

    #[test]
    fn test_cli_parse_compile_all_options() {
        let cli = Cli::parse_from([
            "sfs-lawgraph",
            "compile",
            "--input",
            "sfb.json",
            "--output",
            "out",
            "--format",
            "turtle",
            "--synthetic-context",
            "--instance-base",
            "https://example.org/i/",
            "--law-label",
            "Okänd lag",
        ]);

        let Commands::Compile {
            output,
            format,
            synthetic_context,
            instance_base,
            law_label,
            ..
        } = cli.command;
        assert_eq!(output, Some(PathBuf::from("out")));
        assert_eq!(format, OutputFormat::Turtle);
        assert!(synthetic_context);
        assert_eq!(instance_base, "https://example.org/i/");
        assert_eq!(law_label.as_deref(), Some("Okänd lag"));
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        let result = Cli::try_parse_from(["sfs-lawgraph", "compile", "-i", "x.json", "-f", "xml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_output_dir_for() {
        assert_eq!(
            output_dir_for(Path::new("data/sfb.json"), None),
            PathBuf::from("data")
        );
        assert_eq!(output_dir_for(Path::new("sfb.json"), None), PathBuf::from("."));
        assert_eq!(
            output_dir_for(Path::new("data/sfb.json"), Some(Path::new("out"))),
            PathBuf::from("out")
        );
    }
}
