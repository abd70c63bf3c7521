//! Generic `bean` elements.
//!
//! ```kdl
//! bean class="PartitionListener" id="audit" {
//!     property name="topic" value="partitions"
//!     property name="sink" ref="auditSink"
//!     constructor-arg { value "primary" }
//! }
//! ```

use std::sync::Arc;

use gridwire_document::Element;

use crate::context::{CompileContext, LAZY_INIT_ATTR, parse_flag};
use crate::descriptor::{Descriptor, Holder, Value};
use crate::error::Result;

const CLASS_ATTR: &str = "class";
const PROPERTY_TAG: &str = "property";
const CONSTRUCTOR_ARG_TAG: &str = "constructor-arg";

/// Compiles a `bean` element into an inline descriptor. The caller places `element` on the
/// location trail.
///
/// Beans are eager unless the element or the document default says otherwise.
pub(super) fn compile(element: &Element, ctx: &mut CompileContext<'_>) -> Result<Holder> {
	let Some(kind) = element.attribute(CLASS_ATTR) else {
		return Err(ctx.structural("bean requires a 'class' attribute"));
	};
	let lazy = element
		.attribute(LAZY_INIT_ATTR)
		.and_then(parse_flag)
		.or(ctx.options().default_lazy_init)
		.unwrap_or(false);
	let id = ctx.identity_for(element, kind);
	let mut descriptor = Descriptor::new(kind).with_lazy_init(lazy);

	for child in element.children() {
		match child.tag() {
			PROPERTY_TAG => {
				let Some(name) = child.attribute("name") else {
					return Err(ctx.structural("bean property requires a 'name' attribute"));
				};
				let value = ctx.within(child, |ctx| argument(child, ctx))?;
				descriptor.set(name, value);
			}
			CONSTRUCTOR_ARG_TAG => {
				let value = ctx.within(child, |ctx| argument(child, ctx))?;
				descriptor.push_constructor_arg(value);
			}
			other => return Err(ctx.structural(format!("unexpected '{other}' inside bean"))),
		}
	}

	tracing::debug!(id = %id, kind, "compiled bean");
	Ok(Holder::new(id, Arc::new(descriptor)))
}

/// Value of a `property` or `constructor-arg`: a `value` or `ref` attribute, nested
/// elements (several become a list), or the element text.
fn argument(element: &Element, ctx: &mut CompileContext<'_>) -> Result<Value> {
	if let Some(value) = element.attribute("value") {
		return Ok(Value::Text(value.to_string()));
	}
	if let Some(name) = element.attribute("ref") {
		return Ok(Value::Ref(name.to_string()));
	}

	let mut values = Vec::new();
	for child in element.children() {
		if let Some(value) = ctx.compile_nested(child)? {
			values.push(value);
		}
	}
	match values.len() {
		0 => match element.text().map(str::trim).filter(|t| !t.is_empty()) {
			Some(text) => Ok(Value::Text(text.to_string())),
			None => Err(ctx.structural(format!("'{}' has no value", element.tag()))),
		},
		1 => Ok(values.remove(0)),
		_ => Ok(Value::List(values)),
	}
}
