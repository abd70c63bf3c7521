use gridwire_document::Element;

use crate::context::CompileContext;
use crate::descriptor::Value;
use crate::error::{CompileError, Result};

/// Returns the first candidate matching a child tag, scanning children in document order.
pub(super) fn parse(candidates: &'static [&'static str], element: &Element, ctx: &CompileContext<'_>) -> Result<Value> {
	element
		.children()
		.iter()
		.find_map(|child| {
			let tag = child.tag().to_lowercase();
			candidates.iter().find(|c| c.to_lowercase() == tag).copied()
		})
		.map(Value::Enum)
		.ok_or_else(|| CompileError::UnresolvableEnum {
			location: ctx.location(),
			tag: element.tag().to_string(),
		})
}
