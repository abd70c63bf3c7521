//! Compile options and the per-pass compile context.

use gridwire_document::Element;
use tokio_util::sync::CancellationToken;

use crate::error::{CompileError, CompileWarning, Result};
use crate::registry::DescriptorRegistry;
use crate::schema::Schema;

/// Root attribute carrying the ambient lazy-init default.
pub const DEFAULT_LAZY_INIT_ATTR: &str = "default-lazy-init";

/// Per-element lazy-init override.
pub const LAZY_INIT_ATTR: &str = "lazy-init";

/// Caller-controlled settings for a compile pass.
#[derive(Debug, Clone)]
pub struct CompileOptions {
	/// Ambient lazy-init default. `None` defers to the document root attribute, then to
	/// lazy.
	pub default_lazy_init: Option<bool>,
	/// Reject unknown tags instead of skipping them with a warning.
	pub strict: bool,
}

impl Default for CompileOptions {
	fn default() -> Self {
		Self {
			default_lazy_init: None,
			strict: true,
		}
	}
}

impl CompileOptions {
	/// Fills unset options from the document root's attributes.
	pub fn with_root_defaults(mut self, root: &Element) -> Self {
		if self.default_lazy_init.is_none() {
			self.default_lazy_init = root.attribute(DEFAULT_LAZY_INIT_ATTR).and_then(parse_flag);
		}
		self
	}

	pub fn ambient_lazy_init(&self) -> bool {
		self.default_lazy_init.unwrap_or(true)
	}
}

/// Parses `true`/`false` case-insensitively.
pub(crate) fn parse_flag(text: &str) -> Option<bool> {
	match text.trim().to_ascii_lowercase().as_str() {
		"true" => Some(true),
		"false" => Some(false),
		_ => None,
	}
}

/// State threaded through every call of one compile pass.
///
/// Owns the descriptor registry, the ambient defaults and the collected warnings. Nothing
/// here outlives the pass.
pub struct CompileContext<'s> {
	schema: &'s Schema,
	options: CompileOptions,
	registry: DescriptorRegistry,
	warnings: Vec<CompileWarning>,
	cancel: CancellationToken,
	trail: Vec<String>,
}

impl<'s> CompileContext<'s> {
	pub fn new(schema: &'s Schema, options: CompileOptions, cancel: CancellationToken) -> Self {
		Self {
			schema,
			options,
			registry: DescriptorRegistry::new(),
			warnings: Vec::new(),
			cancel,
			trail: Vec::new(),
		}
	}

	pub fn schema(&self) -> &'s Schema {
		self.schema
	}

	pub fn options(&self) -> &CompileOptions {
		&self.options
	}

	pub fn registry(&self) -> &DescriptorRegistry {
		&self.registry
	}

	pub fn registry_mut(&mut self) -> &mut DescriptorRegistry {
		&mut self.registry
	}

	/// Identity for `node`: its `id` attribute, or a generated one for `kind`.
	pub fn identity_for(&mut self, node: &Element, kind: &str) -> String {
		match node.attribute("id") {
			Some(id) => id.to_string(),
			None => self.registry.generate_id(kind),
		}
	}

	/// Records a diagnostic and logs it.
	pub fn warn(&mut self, warning: CompileWarning) {
		tracing::warn!("{warning}");
		self.warnings.push(warning);
	}

	pub fn warnings(&self) -> &[CompileWarning] {
		&self.warnings
	}

	/// Pushes `node` onto the location trail after checking for cancellation.
	pub(crate) fn enter(&mut self, node: &Element) -> Result<()> {
		if self.cancel.is_cancelled() {
			return Err(CompileError::Cancelled);
		}
		let crumb = match node.attribute("id") {
			Some(id) => format!("{}#{id}", node.tag()),
			None => node.tag().to_string(),
		};
		self.trail.push(crumb);
		Ok(())
	}

	pub(crate) fn leave(&mut self) {
		self.trail.pop();
	}

	/// Runs `f` with `node` on the location trail.
	pub(crate) fn within<T>(&mut self, node: &Element, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
		self.enter(node)?;
		let result = f(self);
		self.leave();
		result
	}

	/// Breadcrumb of the element currently being compiled.
	pub fn location(&self) -> String {
		if self.trail.is_empty() {
			"<document>".to_string()
		} else {
			self.trail.join(" > ")
		}
	}

	pub(crate) fn structural(&self, message: impl Into<String>) -> CompileError {
		CompileError::Structural {
			location: self.location(),
			message: message.into(),
		}
	}

	pub(crate) fn into_parts(self) -> (DescriptorRegistry, Vec<CompileWarning>) {
		(self.registry, self.warnings)
	}
}
