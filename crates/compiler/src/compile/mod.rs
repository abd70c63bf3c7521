//! Compile driver.
//!
//! Walks a document, dispatching every element to its schema [`Handler`], and collects
//! the registered descriptors into a [`Topology`]. Nested elements (property values,
//! listener definitions, collection members) go through
//! [`CompileContext::compile_nested`], which also understands the generic `bean`, `ref`
//! and `value` elements.

mod bean;

use std::sync::Arc;

use gridwire_document::{Document, Element};
use tokio_util::sync::CancellationToken;

use crate::context::{CompileContext, CompileOptions};
use crate::descriptor::{Descriptor, Holder, Value};
use crate::error::{CompileError, CompileWarning, Result};
use crate::schema::{Handler, Schema};
use crate::topology::Topology;

/// Generic component with an explicit kind.
pub const BEAN_TAG: &str = "bean";
/// By-name reference to another component.
pub const REF_TAG: &str = "ref";
/// Literal text value.
pub const VALUE_TAG: &str = "value";

/// Compiles documents against a schema. The schema is shared read-only by every pass.
#[derive(Debug)]
pub struct Compiler {
	schema: Schema,
}

impl Default for Compiler {
	fn default() -> Self {
		Self::new(Schema::coherence())
	}
}

impl Compiler {
	pub fn new(schema: Schema) -> Self {
		Self { schema }
	}

	pub fn schema(&self) -> &Schema {
		&self.schema
	}

	/// Compiles the tree under `root` in one pass.
	pub fn compile(&self, root: &Element, options: CompileOptions) -> Result<Topology> {
		self.compile_with_cancel(root, options, CancellationToken::new())
	}

	/// Like [`Compiler::compile`], aborting with [`CompileError::Cancelled`] once `cancel`
	/// fires.
	pub fn compile_with_cancel(
		&self,
		root: &Element,
		options: CompileOptions,
		cancel: CancellationToken,
	) -> Result<Topology> {
		self.compile_nodes(std::slice::from_ref(root), options, cancel)
	}

	/// Compiles every top-level node of `document` in one pass. The first node supplies the
	/// root defaults.
	pub fn compile_document(&self, document: &Document, options: CompileOptions) -> Result<Topology> {
		document.require_root()?;
		self.compile_nodes(document.nodes(), options, CancellationToken::new())
	}

	fn compile_nodes(&self, nodes: &[Element], options: CompileOptions, cancel: CancellationToken) -> Result<Topology> {
		let options = match nodes.first() {
			Some(root) => options.with_root_defaults(root),
			None => options,
		};
		let mut ctx = CompileContext::new(&self.schema, options, cancel);
		for node in nodes {
			ctx.compile_top_level(node)?;
		}

		let (registry, warnings) = ctx.into_parts();
		let parts = registry.into_parts();
		tracing::info!(
			descriptors = parts.entries.len(),
			globals = parts.globals.len(),
			warnings = warnings.len(),
			"compiled topology"
		);
		Ok(Topology::new(parts, warnings))
	}
}

/// Parses KDL source and compiles it against the default schema.
pub fn compile_str(input: &str, options: CompileOptions) -> Result<Topology> {
	let document = Document::parse(input)?;
	Compiler::default().compile_document(&document, options)
}

impl CompileContext<'_> {
	/// Compiles `node` as a top-level element and registers what it produces under its
	/// identity.
	pub(crate) fn compile_top_level(&mut self, node: &Element) -> Result<()> {
		let holder = if node.tag() == BEAN_TAG {
			Some(self.within(node, |ctx| bean::compile(node, ctx))?)
		} else {
			match self.schema().handler(node.tag()) {
				Some(handler) => self.compile_component(node, handler)?,
				None => return self.unknown_tag(node),
			}
		};
		if let Some(holder) = holder {
			self.registry_mut().register(holder.id, holder.descriptor)?;
		}
		Ok(())
	}

	/// Compiles an element nested inside a property value.
	///
	/// Returns `None` when the element was skipped (unknown tag in lenient mode).
	pub(crate) fn compile_nested(&mut self, element: &Element) -> Result<Option<Value>> {
		match element.tag() {
			REF_TAG => match element.attribute(BEAN_TAG) {
				Some(name) => Ok(Some(Value::Ref(name.to_string()))),
				None => Err(self.structural("'ref' requires a 'bean' attribute")),
			},
			VALUE_TAG => Ok(Some(Value::Text(element.text_content()))),
			BEAN_TAG => {
				let holder = self.within(element, |ctx| bean::compile(element, ctx))?;
				Ok(Some(Value::Inline(holder)))
			}
			tag => match self.schema().handler(tag) {
				Some(Handler::Delegate) => Err(self.structural(format!("'{tag}' cannot be nested"))),
				Some(handler) => Ok(self.compile_component(element, handler)?.map(Value::Inline)),
				None => self.unknown_tag(element).map(|()| None),
			},
		}
	}

	fn compile_component(&mut self, node: &Element, handler: &Handler) -> Result<Option<Holder>> {
		self.within(node, |ctx| {
			let (id, descriptor) = match handler {
				Handler::Delegate => {
					for child in node.children() {
						ctx.compile_top_level(child)?;
					}
					return Ok(None);
				}
				Handler::Factory(factory) => {
					let Some(bean) = node.attribute(factory.attribute) else {
						return Err(ctx.structural(format!(
							"'{}' requires attribute '{}'",
							node.tag(),
							factory.attribute
						)));
					};
					let id = ctx.identity_for(node, factory.kind);
					let descriptor = Descriptor::new(factory.kind)
						.with_factory(bean, factory.method)
						.with_lazy_init(true);
					(id, descriptor)
				}
				Handler::Template(template) => {
					let id = ctx.identity_for(node, template.kind());
					(id, template.compile(node, ctx)?)
				}
				Handler::Composite(composite) => {
					let id = ctx.identity_for(node, composite.service().kind());
					let descriptor = composite.compile(node, &id, ctx)?;
					(id, descriptor)
				}
			};
			tracing::debug!(id = %id, kind = descriptor.kind(), lazy = descriptor.lazy_init(), "compiled component");
			Ok(Some(Holder::new(id, Arc::new(descriptor))))
		})
	}

	/// Rejects `node` in strict mode, otherwise records a warning and skips it.
	fn unknown_tag(&mut self, node: &Element) -> Result<()> {
		let tag = node.tag().to_string();
		if self.options().strict {
			return Err(CompileError::UnknownTag {
				location: self.location(),
				suggestion: self.schema().suggest(&tag).map(str::to_string),
				tag,
			});
		}
		let location = self.location();
		self.warn(CompileWarning::UnknownTagSkipped { tag, location });
		Ok(())
	}
}

#[cfg(test)]
mod tests;
