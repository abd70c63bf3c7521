//! KDL front-end: builds [`Element`] trees from KDL source.

use std::path::Path;

use ::kdl::{KdlDocument, KdlNode, KdlValue};

use crate::element::Element;
use crate::error::{DocumentError, Result};

/// A parsed configuration document: the ordered list of top-level elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
	nodes: Vec<Element>,
}

impl Document {
	/// Parse KDL source into a [`Document`].
	pub fn parse(input: &str) -> Result<Self> {
		let doc: KdlDocument = input.parse()?;
		Ok(Self {
			nodes: doc.nodes().iter().map(convert_node).collect(),
		})
	}

	/// Read and parse a KDL file.
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|error| DocumentError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::parse(&content)
	}

	/// The first top-level element.
	pub fn root(&self) -> Option<&Element> {
		self.nodes.first()
	}

	/// Like [`Document::root`], but an empty document is an error.
	pub fn require_root(&self) -> Result<&Element> {
		self.root().ok_or(DocumentError::Empty)
	}

	pub fn nodes(&self) -> &[Element] {
		&self.nodes
	}
}

fn convert_node(node: &KdlNode) -> Element {
	let mut element = Element::new(node.name().value());
	let mut text = None;

	for entry in node.entries() {
		match entry.name() {
			Some(name) => element = element.with_attr(name.value(), scalar_text(entry.value())),
			None if text.is_none() => text = Some(scalar_text(entry.value())),
			None => {}
		}
	}
	if let Some(text) = text {
		element = element.with_text(text);
	}

	if let Some(children) = node.children() {
		element = element.with_children(children.nodes().iter().map(convert_node));
	}
	element
}

fn scalar_text(value: &KdlValue) -> String {
	if let Some(s) = value.as_string() {
		return s.to_string();
	}
	if let Some(b) = value.as_bool() {
		return b.to_string();
	}
	value.to_string()
}
