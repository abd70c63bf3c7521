//! Component templates: schema bindings that compile one element into one descriptor.
//!
//! A [`Template`] maps property paths to (property, parser) pairs and carries defaults for
//! properties the document leaves unset. Compiling runs four phases:
//!
//! 1. children whose tag starts no bound path are rejected in strict mode and skipped
//!    with a warning otherwise,
//! 2. every binding resolves its path against the element; matches are parsed and
//!    assigned, misses are left for the next phase,
//! 3. unset properties with a registered default receive it (default sub-descriptors are
//!    instantiated fresh per compile),
//! 4. required properties are checked.
//!
//! Lazy-init is resolved from the element's `lazy-init` attribute, then the template's
//! [`LazyPolicy`], then the ambient default.

mod composite;

use std::sync::Arc;

use gridwire_document::Element;
use indexmap::IndexMap;

pub use self::composite::{CONFIG_SUFFIX, CONFIGURATION_PROPERTY, CompositeTemplate};
use crate::context::{CompileContext, LAZY_INIT_ATTR, parse_flag};
use crate::descriptor::{Descriptor, Holder, Value};
use crate::error::{CompileError, CompileWarning, Result};
use crate::path::{PropertyPath, Target};
use crate::schema::closest;
use crate::value::PropertyParser;

/// Lazy-init policy applied when the element does not say.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LazyPolicy {
	/// Follow the ambient default of the compile pass.
	#[default]
	Ambient,
	/// Always eager unless the element explicitly asks otherwise.
	Eager,
}

/// A pass-wide descriptor that defaults refer to by name. It is registered as a global the
/// first time a default needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharedDefault {
	pub id: &'static str,
	pub kind: &'static str,
	pub alias: Option<&'static str>,
}

impl SharedDefault {
	fn ensure(&self, ctx: &mut CompileContext<'_>) -> Result<Value> {
		let registry = ctx.registry_mut();
		if !registry.contains(self.id) {
			registry.register_global(self.id, Arc::new(Descriptor::new(self.kind)))?;
			if let Some(alias) = self.alias {
				registry.register_alias(alias, self.id);
			}
		}
		Ok(Value::Ref(self.id.to_string()))
	}
}

#[derive(Debug, Clone)]
pub enum DefaultValue {
	Value(Value),
	/// Prototype copied into a fresh inline descriptor on every compile.
	Descriptor(Descriptor),
	Shared(SharedDefault),
}

#[derive(Debug, Clone)]
struct Binding {
	path: PropertyPath,
	property: &'static str,
	parser: PropertyParser,
}

impl Binding {
	fn resolve<'a>(&self, node: &'a Element) -> Option<Target<'a>> {
		if self.parser.is_repeatable() {
			self.path.resolve_repeatable(node)
		} else {
			self.path.resolve(node)
		}
	}
}

/// Bindings and defaults for one component kind. Templates are assembled by the schema.
#[derive(Debug, Clone)]
pub struct Template {
	kind: &'static str,
	bindings: IndexMap<String, Binding>,
	defaults: IndexMap<&'static str, DefaultValue>,
	required: Vec<&'static str>,
	lazy: LazyPolicy,
}

impl Template {
	pub(crate) fn new(kind: &'static str) -> Self {
		Self {
			kind,
			bindings: IndexMap::new(),
			defaults: IndexMap::new(),
			required: Vec::new(),
			lazy: LazyPolicy::default(),
		}
	}

	pub(crate) fn lazy_policy(mut self, policy: LazyPolicy) -> Self {
		self.lazy = policy;
		self
	}

	/// Binds `path` to `property`. Rebinding a path replaces the earlier binding.
	///
	/// # Panics
	///
	/// If the parser cannot read what the path selects (an attribute or an element).
	pub(crate) fn property(mut self, path: &str, property: &'static str, parser: PropertyParser) -> Self {
		let path = PropertyPath::parse(path);
		let readable = if path.selects_attribute() {
			parser.accepts_attribute()
		} else {
			parser.accepts_element()
		};
		assert!(readable, "{}: parser for '{path}' cannot read what the path selects", self.kind);
		self.bindings.insert(
			path.as_str().to_string(),
			Binding {
				path,
				property,
				parser,
			},
		);
		self
	}

	pub(crate) fn default_value(mut self, property: &'static str, value: Value) -> Self {
		self.defaults.insert(property, DefaultValue::Value(value));
		self
	}

	pub(crate) fn default_descriptor(mut self, property: &'static str, prototype: Descriptor) -> Self {
		self.defaults.insert(property, DefaultValue::Descriptor(prototype));
		self
	}

	pub(crate) fn default_shared(mut self, property: &'static str, shared: SharedDefault) -> Self {
		self.defaults.insert(property, DefaultValue::Shared(shared));
		self
	}

	/// Marks `property` as mandatory: compiling fails if neither a binding nor a default
	/// provides it.
	pub(crate) fn require(mut self, property: &'static str) -> Self {
		self.required.push(property);
		self
	}

	pub fn kind(&self) -> &'static str {
		self.kind
	}

	pub fn lazy(&self) -> LazyPolicy {
		self.lazy
	}

	/// Paths bound by this template.
	pub fn paths(&self) -> impl Iterator<Item = &str> {
		self.bindings.keys().map(String::as_str)
	}

	/// Tags of the children this template reads.
	pub fn heads(&self) -> impl Iterator<Item = &str> {
		self.bindings.values().filter_map(|binding| binding.path.head())
	}

	/// Compiles `node` into a descriptor. The caller places `node` on the location trail.
	pub fn compile(&self, node: &Element, ctx: &mut CompileContext<'_>) -> Result<Descriptor> {
		check_children(node, &[self], ctx)?;
		self.compile_bound(node, ctx)
	}

	/// Compiles `node` without checking for unbound children.
	fn compile_bound(&self, node: &Element, ctx: &mut CompileContext<'_>) -> Result<Descriptor> {
		let mut descriptor = Descriptor::new(self.kind).with_lazy_init(self.resolve_lazy(node, ctx));

		for binding in self.bindings.values() {
			if binding.parser.is_repeatable() && descriptor.contains(binding.property) {
				tracing::trace!(path = %binding.path, property = binding.property, "property already resolved");
				continue;
			}
			let Some(target) = binding.resolve(node) else {
				continue;
			};
			tracing::trace!(path = %binding.path, property = binding.property, "binding matched");
			for (property, value) in binding.parser.parse(target, binding.property, ctx)? {
				descriptor.set(property, value);
			}
		}

		self.fill_defaults(&mut descriptor, ctx)?;

		if let Some(missing) = self.required.iter().copied().find(|p| !descriptor.contains(p)) {
			return Err(CompileError::MissingProperty {
				location: ctx.location(),
				property: missing,
			});
		}
		Ok(descriptor)
	}

	fn fill_defaults(&self, descriptor: &mut Descriptor, ctx: &mut CompileContext<'_>) -> Result<()> {
		for (&property, default) in &self.defaults {
			if descriptor.contains(property) {
				continue;
			}
			let value = match default {
				DefaultValue::Value(value) => value.clone(),
				DefaultValue::Descriptor(prototype) => {
					let id = ctx.registry_mut().generate_id(prototype.kind());
					Value::Inline(Holder::new(id, Arc::new(prototype.clone())))
				}
				DefaultValue::Shared(shared) => shared.ensure(ctx)?,
			};
			descriptor.set(property, value);
		}
		Ok(())
	}

	fn resolve_lazy(&self, node: &Element, ctx: &CompileContext<'_>) -> bool {
		if let Some(explicit) = node.attribute(LAZY_INIT_ATTR).and_then(parse_flag) {
			return explicit;
		}
		match self.lazy {
			LazyPolicy::Eager => false,
			LazyPolicy::Ambient => ctx.options().ambient_lazy_init(),
		}
	}
}

/// Rejects, or in lenient mode skips with a warning, every child of `node` that none of
/// `templates` reads.
fn check_children(node: &Element, templates: &[&Template], ctx: &mut CompileContext<'_>) -> Result<()> {
	for child in node.children() {
		let tag = child.tag();
		if templates.iter().any(|t| t.heads().any(|head| head == tag)) {
			continue;
		}
		if ctx.options().strict {
			return Err(CompileError::UnknownTag {
				location: ctx.location(),
				suggestion: closest(tag, templates.iter().flat_map(|t| t.heads())).map(str::to_string),
				tag: tag.to_string(),
			});
		}
		let location = ctx.location();
		ctx.warn(CompileWarning::UnknownTagSkipped {
			tag: tag.to_string(),
			location,
		});
	}
	Ok(())
}
