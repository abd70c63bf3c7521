//! CLI schema for the gridwire binary.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use gridwire_compiler::CompileOptions;

/// How the compiled topology is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	/// One line per descriptor followed by the warnings
	#[default]
	Summary,
	/// The full topology as JSON
	Json,
}

#[derive(Parser, Debug)]
#[command(name = "gridwire")]
#[command(about = "Compile a declarative cache topology into component descriptors")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Topology document (KDL)
	#[arg(value_name = "FILE")]
	pub file: PathBuf,

	/// Ambient lazy-init default, overriding the document's `default-lazy-init`
	#[arg(long, value_name = "BOOL")]
	pub lazy_init: Option<bool>,

	/// Skip unknown tags with a warning instead of failing
	#[arg(long)]
	pub lenient: bool,

	/// Output format
	#[arg(long, short = 'f', value_enum, default_value_t)]
	pub format: OutputFormat,

	/// Wire the compiled caches and report their readiness
	#[arg(long)]
	pub wire: bool,

	/// Verbose logging
	#[arg(short, long)]
	pub verbose: bool,
}

impl Cli {
	/// Compile options selected by the flags.
	pub fn compile_options(&self) -> CompileOptions {
		CompileOptions {
			default_lazy_init: self.lazy_init,
			strict: !self.lenient,
		}
	}
}
