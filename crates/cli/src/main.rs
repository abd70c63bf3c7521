//! gridwire binary.
//!
//! Compiles a topology document and prints the resulting descriptors.

mod cli;
mod report;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, OutputFormat};
use gridwire_compiler::Compiler;
use gridwire_document::Document;
use tracing::info;

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	setup_tracing(cli.verbose);

	let document = Document::from_path(&cli.file).with_context(|| format!("failed to load {}", cli.file.display()))?;
	let topology = Compiler::default()
		.compile_document(&document, cli.compile_options())
		.with_context(|| format!("failed to compile {}", cli.file.display()))?;

	info!(descriptors = topology.len(), warnings = topology.warnings().len(), "topology compiled");

	match cli.format {
		OutputFormat::Summary => println!("{}", report::summary(&topology)),
		OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&topology)?),
	}

	if cli.wire {
		let (wiring, healthy) = report::wiring(&topology);
		println!("{wiring}");
		if !healthy {
			anyhow::bail!("one or more caches failed to initialize");
		}
	}

	Ok(())
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("gridwire_compiler=trace,debug")
		} else {
			EnvFilter::new("warn")
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(verbose)
		.init();
}
