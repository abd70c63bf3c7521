//! Property value parsers.
//!
//! Every parser turns either an attribute string or an element subtree into one or more
//! property assignments. Which input shapes a parser accepts is explicit in
//! [`PropertyParser`]: templates dispatch on whether the bound path ends in an `@attr`
//! selector, and reject bindings whose parser cannot read that shape when the schema is
//! built.

mod collection;
mod enumeration;
mod nested;
mod scalar;

pub use nested::NestedFlavor;
pub use scalar::{parse_duration_secs, parse_size};

use crate::context::CompileContext;
use crate::descriptor::Value;
use crate::error::Result;
use crate::path::{Located, Target};

/// Property assignments produced by one parser invocation, applied in order.
pub type Assignments = Vec<(&'static str, Value)>;

/// A parser together with the input shapes it accepts.
#[derive(Debug, Clone)]
pub enum PropertyParser {
	/// Reads attribute strings only.
	Attribute(AttributeParser),
	/// Reads element subtrees only.
	Element(ElementParser),
	/// Reads attribute strings and element text alike.
	Both(ScalarParser),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeParser {
	/// The attribute names another descriptor.
	Reference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarParser {
	/// Verbatim text.
	Text,
	/// Unit-suffixed duration normalized to whole seconds.
	Duration,
	/// Unit-suffixed byte size.
	Size,
}

#[derive(Debug, Clone)]
pub enum ElementParser {
	/// Compiles each child element as a nested component.
	Nested(NestedFlavor),
	/// Matches child tags against a fixed candidate set.
	Enum(&'static [&'static str]),
	/// One listener yields a direct value; several are wrapped in a collection descriptor.
	Listeners { collection_kind: &'static str },
	/// Every child with `element_tag` is wrapped in a list descriptor.
	Collection {
		element_tag: &'static str,
		list_kind: &'static str,
	},
}

impl PropertyParser {
	pub const fn text() -> Self {
		Self::Both(ScalarParser::Text)
	}

	pub const fn duration() -> Self {
		Self::Both(ScalarParser::Duration)
	}

	pub const fn size() -> Self {
		Self::Both(ScalarParser::Size)
	}

	pub const fn reference() -> Self {
		Self::Attribute(AttributeParser::Reference)
	}

	pub const fn bean() -> Self {
		Self::Element(ElementParser::Nested(NestedFlavor::Plain))
	}

	pub const fn nested(flavor: NestedFlavor) -> Self {
		Self::Element(ElementParser::Nested(flavor))
	}

	pub const fn enumeration(candidates: &'static [&'static str]) -> Self {
		Self::Element(ElementParser::Enum(candidates))
	}

	pub const fn listeners(collection_kind: &'static str) -> Self {
		Self::Element(ElementParser::Listeners { collection_kind })
	}

	pub const fn collection(element_tag: &'static str, list_kind: &'static str) -> Self {
		Self::Element(ElementParser::Collection {
			element_tag,
			list_kind,
		})
	}

	pub fn accepts_attribute(&self) -> bool {
		matches!(self, Self::Attribute(_) | Self::Both(_))
	}

	pub fn accepts_element(&self) -> bool {
		matches!(self, Self::Element(_) | Self::Both(_))
	}

	/// Cardinality-sensitive parsers see the first of several same-tag siblings and
	/// handle the rest themselves. Once such a property is set, later bindings targeting
	/// it are skipped.
	pub fn is_repeatable(&self) -> bool {
		matches!(self, Self::Element(ElementParser::Listeners { .. }))
	}

	pub fn parse(&self, target: Target<'_>, property: &'static str, ctx: &mut CompileContext<'_>) -> Result<Assignments> {
		match (self, target) {
			(Self::Attribute(AttributeParser::Reference), Target::Attribute(text)) => {
				Ok(vec![(property, Value::Ref(text.trim().to_string()))])
			}
			(Self::Both(scalar), Target::Attribute(text)) => Ok(vec![(property, scalar.parse(text, ctx)?)]),
			(Self::Both(scalar), Target::Element(located)) => {
				let text = located.element.text_content();
				let value = ctx.within(located.element, |ctx| scalar.parse(&text, ctx))?;
				Ok(vec![(property, value)])
			}
			// listener sets enter each sibling themselves
			(Self::Element(parser @ ElementParser::Listeners { .. }), Target::Element(located)) => {
				parser.parse(located, property, ctx)
			}
			(Self::Element(parser), Target::Element(located)) => {
				ctx.within(located.element, |ctx| parser.parse(located, property, ctx))
			}
			(Self::Attribute(_), Target::Element(located)) => Err(ctx.structural(format!(
				"property '{property}' expects an attribute, found element '{}'",
				located.element.tag()
			))),
			(Self::Element(_), Target::Attribute(_)) => Err(ctx.structural(format!(
				"property '{property}' expects an element, found an attribute value"
			))),
		}
	}
}

impl ElementParser {
	fn parse(&self, located: Located<'_>, property: &'static str, ctx: &mut CompileContext<'_>) -> Result<Assignments> {
		match self {
			Self::Nested(flavor) => flavor.parse(located.element, property, ctx),
			Self::Enum(candidates) => Ok(vec![(property, enumeration::parse(*candidates, located.element, ctx)?)]),
			Self::Listeners { collection_kind } => {
				Ok(vec![(property, collection::parse_listeners(located, collection_kind, ctx)?)])
			}
			Self::Collection { element_tag, list_kind } => Ok(vec![(
				property,
				collection::parse_collection(located.element, element_tag, list_kind, ctx)?,
			)]),
		}
	}
}
