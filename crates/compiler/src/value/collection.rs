//! Cardinality-sensitive listener sets and homogeneous collections.

use std::sync::Arc;

use gridwire_document::Element;

use crate::context::CompileContext;
use crate::descriptor::{Descriptor, Holder, Value};
use crate::error::Result;
use crate::path::Located;

/// Exactly one listener element resolves to its value directly; several same-tag
/// siblings are wrapped, in document order, into a `collection_kind` descriptor.
pub(super) fn parse_listeners(located: Located<'_>, collection_kind: &str, ctx: &mut CompileContext<'_>) -> Result<Value> {
	let tag = located.element.tag();
	let siblings: Vec<&Element> = located.parent.children_named(tag).collect();

	if let [single] = siblings.as_slice() {
		return ctx.within(single, |ctx| listener(single, ctx));
	}

	let mut members = Vec::with_capacity(siblings.len());
	for sibling in siblings {
		members.push(ctx.within(sibling, |ctx| listener(sibling, ctx))?);
	}
	Ok(wrap(collection_kind, members, ctx))
}

/// Every `element_tag` child of `element` is compiled and wrapped in a list descriptor,
/// even when there is only one.
pub(super) fn parse_collection(
	element: &Element,
	element_tag: &str,
	list_kind: &str,
	ctx: &mut CompileContext<'_>,
) -> Result<Value> {
	let mut members = Vec::new();
	for child in element.children_named(element_tag) {
		if let Some(value) = ctx.compile_nested(child)? {
			members.push(value);
		}
	}
	Ok(wrap(list_kind, members, ctx))
}

/// A listener element holds one nested definition, or names the listener kind as text.
fn listener(element: &Element, ctx: &mut CompileContext<'_>) -> Result<Value> {
	match element.children() {
		[definition] => ctx
			.compile_nested(definition)?
			.ok_or_else(|| ctx.structural("listener has no usable definition")),
		[] => match element.text().map(str::trim).filter(|t| !t.is_empty()) {
			Some(kind) => {
				let id = ctx.registry_mut().generate_id(kind);
				Ok(Value::Inline(Holder::new(id, Arc::new(Descriptor::new(kind)))))
			}
			None => Err(ctx.structural(format!("empty listener '{}'", element.tag()))),
		},
		_ => Err(ctx.structural(format!(
			"listener '{}' must contain exactly one definition",
			element.tag()
		))),
	}
}

fn wrap(kind: &str, members: Vec<Value>, ctx: &mut CompileContext<'_>) -> Value {
	let id = ctx.registry_mut().generate_id(kind);
	let descriptor = Descriptor::new(kind).with_constructor_arg(Value::List(members));
	Value::Inline(Holder::new(id, Arc::new(descriptor)))
}
