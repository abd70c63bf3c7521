//! Compile errors and non-fatal diagnostics.

use gridwire_document::DocumentError;
use thiserror::Error;

/// Fatal errors that abort a compile pass.
///
/// There is no partial-success mode: the first error aborts the whole pass and no
/// topology is produced.
#[derive(Debug, Error)]
pub enum CompileError {
	/// The document shape does not match what the schema expects.
	#[error("{location}: {message}")]
	Structural {
		/// Breadcrumb of the offending node.
		location: String,
		/// What went wrong.
		message: String,
	},

	/// A tag with no schema handler was found while compiling strictly.
	#[error("{location}: unknown tag '{tag}'{}", suggestion.as_ref().map(|s| format!(" (did you mean '{s}'?)")).unwrap_or_default())]
	UnknownTag {
		/// Breadcrumb of the enclosing node.
		location: String,
		/// The unrecognized tag.
		tag: String,
		/// A known tag that is close enough, if any.
		suggestion: Option<String>,
	},

	/// A mandatory property had neither a path match nor a default.
	#[error("{location}: missing required property '{property}'")]
	MissingProperty {
		/// Breadcrumb of the node whose descriptor is incomplete.
		location: String,
		/// The property that was never assigned.
		property: &'static str,
	},

	/// No child tag of an enumeration element matched any candidate.
	#[error("{location}: cannot parse value for tag '{tag}'")]
	UnresolvableEnum {
		/// Breadcrumb of the enumeration element.
		location: String,
		/// Tag of the enumeration element.
		tag: String,
	},

	/// Duration, size or integer text failed numeric parsing.
	#[error("{location}: malformed {kind} value '{text}'")]
	MalformedScalar {
		/// Breadcrumb of the node carrying the text.
		location: String,
		/// The offending text.
		text: String,
		/// Which scalar flavour was expected ("duration", "size", "integer").
		kind: &'static str,
	},

	/// Two structurally distinct descriptors were assigned the same identity.
	#[error("descriptor name clash for '{id}': existing {existing}, incoming {incoming}")]
	NameClash {
		/// The contested identity.
		id: String,
		/// Kind of the descriptor already registered under `id`.
		existing: String,
		/// Kind of the descriptor that tried to take `id`.
		incoming: String,
	},

	/// The compile pass was cancelled through its cancellation token.
	#[error("compile cancelled")]
	Cancelled,

	/// Loading the source document failed.
	#[error(transparent)]
	Document(#[from] DocumentError),
}

/// Result type for compile operations.
pub type Result<T> = std::result::Result<T, CompileError>;

/// Non-fatal diagnostic collected during a compile pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileWarning {
	/// A service construct ended up lazily initialized.
	LazyService {
		/// Identity of the service descriptor.
		id: String,
		/// Breadcrumb of the service element.
		location: String,
	},
	/// An unknown tag was skipped in lenient mode.
	UnknownTagSkipped {
		/// The skipped tag.
		tag: String,
		/// Breadcrumb of the enclosing node.
		location: String,
	},
}

impl std::fmt::Display for CompileWarning {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			CompileWarning::LazyService { id, location } => {
				write!(f, "{location}: service '{id}' is defined as lazy, this is discouraged")
			}
			CompileWarning::UnknownTagSkipped { tag, location } => {
				write!(f, "{location}: unknown tag '{tag}' skipped")
			}
		}
	}
}
