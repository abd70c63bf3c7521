//! Nested-reference parsers and their schema-specific flavours.

use std::sync::Arc;

use gridwire_document::Element;

use super::Assignments;
use crate::context::CompileContext;
use crate::descriptor::{Descriptor, Holder, Value};
use crate::error::{CompileError, Result};

/// Kind synthesized for `java-map` elements.
pub const CONCURRENT_MAP_KIND: &str = "ConcurrentHashMap";

/// Kind synthesized for the `binary` unit calculator.
pub const BINARY_CALCULATOR_KIND: &str = "BinaryMemoryCalculator";

/// How a nested-reference binding treats its child elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NestedFlavor {
	/// Every child compiles as a nested component.
	Plain,
	/// Like [`NestedFlavor::CacheMap`], but inline maps are registered globally and the
	/// property receives a by-name reference.
	BackTier,
	/// `java-map` synthesizes a concurrent map; anything else compiles as nested.
	CacheMap,
	/// `local` is ignored; anything else compiles as nested.
	Service,
	/// `java-map` is stored under the bound property, anything else (or bare text) under
	/// `policy_property`.
	EvictionPolicy { policy_property: &'static str },
	/// `binary` synthesizes a memory calculator, `factor` stores an integer under
	/// `factor_property`, anything else compiles as nested.
	UnitCalculator { factor_property: &'static str },
}

impl NestedFlavor {
	pub(super) fn parse(self, element: &Element, property: &'static str, ctx: &mut CompileContext<'_>) -> Result<Assignments> {
		let mut out = Assignments::new();

		if let Self::EvictionPolicy { policy_property } = self
			&& element.children().is_empty()
			&& let Some(text) = element.text().map(str::trim).filter(|t| !t.is_empty())
		{
			out.push((policy_property, Value::Text(text.to_string())));
			return Ok(out);
		}

		for child in element.children() {
			let tag = child.tag().to_lowercase();
			match self {
				Self::Plain => {
					if let Some(value) = ctx.compile_nested(child)? {
						out.push((property, value));
					}
				}
				Self::BackTier => {
					if let Some(value) = cache_map(child, ctx)? {
						out.push((property, back_tier_reference(value, ctx)?));
					}
				}
				Self::CacheMap => {
					if let Some(value) = cache_map(child, ctx)? {
						out.push((property, value));
					}
				}
				Self::Service => {
					if tag == "local" {
						continue;
					}
					if let Some(value) = ctx.compile_nested(child)? {
						out.push((property, value));
					}
				}
				Self::EvictionPolicy { policy_property } => {
					if tag == "java-map" {
						out.push((property, synthesize(CONCURRENT_MAP_KIND, ctx)));
					} else if let Some(value) = ctx.compile_nested(child)? {
						out.push((policy_property, value));
					}
				}
				Self::UnitCalculator { factor_property } => match tag.as_str() {
					"binary" => out.push((property, synthesize(BINARY_CALCULATOR_KIND, ctx))),
					"factor" => {
						let text = child.text_content();
						let factor = ctx.within(child, |ctx| {
							text.parse::<i64>().map_err(|_| CompileError::MalformedScalar {
								location: ctx.location(),
								text: text.clone(),
								kind: "integer",
							})
						})?;
						out.push((factor_property, Value::Integer(factor)));
					}
					_ => {
						if let Some(value) = ctx.compile_nested(child)? {
							out.push((property, value));
						}
					}
				},
			}
		}
		Ok(out)
	}
}

fn cache_map(child: &Element, ctx: &mut CompileContext<'_>) -> Result<Option<Value>> {
	if child.tag().eq_ignore_ascii_case("java-map") {
		return Ok(Some(synthesize(CONCURRENT_MAP_KIND, ctx)));
	}
	ctx.compile_nested(child)
}

/// Back-tier maps must be globally addressable: inline definitions are registered under
/// their identity, which may already hold the very same definition.
fn back_tier_reference(value: Value, ctx: &mut CompileContext<'_>) -> Result<Value> {
	match value {
		Value::Ref(name) => Ok(Value::Ref(name)),
		Value::Inline(holder) => {
			let id = ctx.registry_mut().register(holder.id, holder.descriptor)?;
			Ok(Value::Ref(id))
		}
		_ => Err(ctx.structural("back tier must be a map reference or a map definition")),
	}
}

/// A fresh anonymous descriptor of `kind` with a generated identity.
fn synthesize(kind: &str, ctx: &mut CompileContext<'_>) -> Value {
	let id = ctx.registry_mut().generate_id(kind);
	Value::Inline(Holder::new(id, Arc::new(Descriptor::new(kind))))
}
