//! Slash-separated paths into element trees.
//!
//! A path has the form `seg1/seg2/.../segN[@attr]`. Each segment selects a direct child by
//! exact tag name. A segment that is missing, or that names more than one child, makes the
//! whole path resolve to nothing: an ambiguous optional fragment counts as "not specified"
//! and the template falls back to its defaults.

use gridwire_document::Element;

/// A parsed property path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPath {
	raw: String,
	segments: Vec<String>,
	attribute: Option<String>,
}

/// An element matched by a path, together with the element it was found under.
#[derive(Debug, Clone, Copy)]
pub struct Located<'a> {
	pub element: &'a Element,
	pub parent: &'a Element,
}

/// What a path resolved to.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
	/// Non-empty attribute text of the final element.
	Attribute(&'a str),
	/// The final element itself.
	Element(Located<'a>),
}

impl PropertyPath {
	pub fn parse(raw: &str) -> Self {
		let (elements, attribute) = match raw.split_once('@') {
			Some((elements, attr)) => (elements, Some(attr.to_string())),
			None => (raw, None),
		};
		let segments = elements
			.split('/')
			.filter(|s| !s.is_empty())
			.map(str::to_string)
			.collect();
		Self {
			raw: raw.to_string(),
			segments,
			attribute,
		}
	}

	pub fn as_str(&self) -> &str {
		&self.raw
	}

	pub fn selects_attribute(&self) -> bool {
		self.attribute.is_some()
	}

	/// Tag of the first element segment, if the path descends at all.
	pub fn head(&self) -> Option<&str> {
		self.segments.first().map(String::as_str)
	}

	/// Resolves the path requiring every segment to match exactly one child.
	pub fn resolve<'a>(&self, node: &'a Element) -> Option<Target<'a>> {
		self.resolve_with(node, false)
	}

	/// Like [`PropertyPath::resolve`], but the last segment may repeat; the first
	/// occurrence is returned so that cardinality-sensitive parsers can inspect its
	/// siblings.
	pub fn resolve_repeatable<'a>(&self, node: &'a Element) -> Option<Target<'a>> {
		self.resolve_with(node, true)
	}

	fn resolve_with<'a>(&self, node: &'a Element, repeatable_tail: bool) -> Option<Target<'a>> {
		let mut parent = node;
		let mut current = node;
		let last = self.segments.len().saturating_sub(1);

		for (i, segment) in self.segments.iter().enumerate() {
			let mut matches = current.children_named(segment);
			let first = matches.next()?;
			let repeated = matches.next().is_some();
			if repeated && !(repeatable_tail && i == last) {
				tracing::trace!(path = %self.raw, segment = %segment, "ambiguous path segment, treating as absent");
				return None;
			}
			parent = current;
			current = first;
		}

		match &self.attribute {
			Some(attr) => current.attribute(attr).map(Target::Attribute),
			None if self.segments.is_empty() => None,
			None => Some(Target::Element(Located {
				element: current,
				parent,
			})),
		}
	}
}

impl std::fmt::Display for PropertyPath {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.raw)
	}
}

#[cfg(test)]
mod tests;
