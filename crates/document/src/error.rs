//! Error types for document loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a configuration document.
#[derive(Debug, Error)]
pub enum DocumentError {
	/// Error parsing KDL syntax.
	#[error("KDL parse error: {0}")]
	Kdl(#[from] ::kdl::KdlError),

	/// Error reading a document file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The document contains no top-level node.
	#[error("document has no root element")]
	Empty,
}

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, DocumentError>;
