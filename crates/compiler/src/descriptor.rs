//! Compiled component descriptors.
//!
//! A [`Descriptor`] is the declarative description of one object the consuming runtime
//! will construct: a component kind, resolved properties, optional constructor arguments,
//! a factory reference and a lazy-init flag. Descriptors are mutable only while their
//! template runs; afterwards they are shared as `Arc<Descriptor>` and compared by
//! pointer identity.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;

/// A resolved property value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
	Text(String),
	Integer(i64),
	/// One of the candidates of an enumeration parser.
	Enum(&'static str),
	/// By-name reference to a descriptor resolved by the consuming runtime.
	Ref(String),
	/// Nested descriptor carried inline together with its identity.
	Inline(Holder),
	List(Vec<Value>),
}

impl Value {
	pub fn as_text(&self) -> Option<&str> {
		match self {
			Value::Text(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_integer(&self) -> Option<i64> {
		match self {
			Value::Integer(i) => Some(*i),
			_ => None,
		}
	}

	pub fn as_ref_name(&self) -> Option<&str> {
		match self {
			Value::Ref(name) => Some(name),
			_ => None,
		}
	}

	pub fn as_inline(&self) -> Option<&Holder> {
		match self {
			Value::Inline(holder) => Some(holder),
			_ => None,
		}
	}

	pub fn as_list(&self) -> Option<&[Value]> {
		match self {
			Value::List(items) => Some(items),
			_ => None,
		}
	}
}

/// An identity paired with a shared descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Holder {
	pub id: String,
	pub descriptor: Arc<Descriptor>,
}

impl Holder {
	pub fn new(id: impl Into<String>, descriptor: Arc<Descriptor>) -> Self {
		Self {
			id: id.into(),
			descriptor,
		}
	}
}

/// Factory indirection: the runtime obtains the object by calling `method` on `bean`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactoryRef {
	pub bean: String,
	pub method: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Descriptor {
	kind: String,
	properties: IndexMap<String, Value>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	constructor_args: Vec<Value>,
	#[serde(skip_serializing_if = "Option::is_none")]
	factory: Option<FactoryRef>,
	lazy_init: bool,
}

impl Descriptor {
	/// Creates an empty, eagerly initialized descriptor of the given kind.
	pub fn new(kind: impl Into<String>) -> Self {
		Self {
			kind: kind.into(),
			properties: IndexMap::new(),
			constructor_args: Vec::new(),
			factory: None,
			lazy_init: false,
		}
	}

	pub fn with_lazy_init(mut self, lazy: bool) -> Self {
		self.lazy_init = lazy;
		self
	}

	pub fn with_factory(mut self, bean: impl Into<String>, method: &'static str) -> Self {
		self.factory = Some(FactoryRef {
			bean: bean.into(),
			method,
		});
		self
	}

	pub fn with_constructor_arg(mut self, value: Value) -> Self {
		self.constructor_args.push(value);
		self
	}

	pub fn kind(&self) -> &str {
		&self.kind
	}

	pub fn lazy_init(&self) -> bool {
		self.lazy_init
	}

	/// Assigns a property, replacing any previous value.
	pub fn set(&mut self, name: impl Into<String>, value: Value) {
		self.properties.insert(name.into(), value);
	}

	pub fn get(&self, name: &str) -> Option<&Value> {
		self.properties.get(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.properties.contains_key(name)
	}

	pub fn properties(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.properties.iter().map(|(k, v)| (k.as_str(), v))
	}

	pub fn constructor_args(&self) -> &[Value] {
		&self.constructor_args
	}

	pub fn push_constructor_arg(&mut self, value: Value) {
		self.constructor_args.push(value);
	}

	pub fn factory(&self) -> Option<&FactoryRef> {
		self.factory.as_ref()
	}
}
