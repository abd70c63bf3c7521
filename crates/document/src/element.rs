//! Owned, read-only element tree.

use indexmap::IndexMap;

/// A tag-named document node with attributes, optional text and ordered children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
	tag: String,
	attributes: IndexMap<String, String>,
	text: Option<String>,
	children: Vec<Element>,
}

impl Element {
	/// Creates an empty element with the given tag.
	pub fn new(tag: impl Into<String>) -> Self {
		Self {
			tag: tag.into(),
			..Self::default()
		}
	}

	/// Adds (or replaces) an attribute.
	pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attributes.insert(name.into(), value.into());
		self
	}

	/// Sets the element's own text.
	pub fn with_text(mut self, text: impl Into<String>) -> Self {
		self.text = Some(text.into());
		self
	}

	/// Appends a child element.
	pub fn with_child(mut self, child: Element) -> Self {
		self.children.push(child);
		self
	}

	/// Appends several child elements in order.
	pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
		self.children.extend(children);
		self
	}

	pub fn tag(&self) -> &str {
		&self.tag
	}

	/// Returns the attribute value, treating an empty or whitespace-only value as absent.
	pub fn attribute(&self, name: &str) -> Option<&str> {
		self.attributes
			.get(name)
			.map(String::as_str)
			.filter(|v| !v.trim().is_empty())
	}

	pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
		self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// The element's own text, if any.
	pub fn text(&self) -> Option<&str> {
		self.text.as_deref()
	}

	/// Own text followed by the text of all descendants in document order, trimmed.
	pub fn text_content(&self) -> String {
		let mut out = String::new();
		self.collect_text(&mut out);
		out.trim().to_string()
	}

	fn collect_text(&self, out: &mut String) {
		if let Some(text) = &self.text {
			out.push_str(text);
		}
		for child in &self.children {
			child.collect_text(out);
		}
	}

	pub fn children(&self) -> &[Element] {
		&self.children
	}

	/// Direct children whose tag equals `tag`, in document order.
	pub fn children_named<'a>(&'a self, tag: &str) -> impl Iterator<Item = &'a Element> {
		self.children.iter().filter(move |c| c.tag == tag)
	}

	pub fn count_children_named(&self, tag: &str) -> usize {
		self.children_named(tag).count()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_attribute_is_absent() {
		let el = Element::new("scheme").with_attr("id", "").with_attr("name", " x ");
		assert_eq!(el.attribute("id"), None);
		assert_eq!(el.attribute("name"), Some(" x "));
		assert_eq!(el.attribute("missing"), None);
	}

	#[test]
	fn text_content_concatenates_descendants() {
		let el = Element::new("outer")
			.with_text(" a")
			.with_child(Element::new("inner").with_text("b"))
			.with_child(Element::new("inner").with_text("c "));
		assert_eq!(el.text_content(), "abc");
		assert_eq!(el.count_children_named("inner"), 2);
	}
	#[test]
	fn named_children_outlive_the_tag_borrow() {
		fn first_named<'a>(el: &'a Element, tag: &str) -> Option<&'a Element> {
			el.children_named(tag).next()
		}

		let el = Element::new("outer").with_child(Element::new("inner").with_text("b"));
		let found = {
			let tag = String::from("inner");
			first_named(&el, &tag)
		};
		assert_eq!(found.and_then(Element::text), Some("b"));
	}
}
