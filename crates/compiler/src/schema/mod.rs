//! Tag handlers of the topology schema.
//!
//! The schema is built once and shared read-only by every compile pass. Each tag maps to
//! a [`Handler`]: pure delegation to the children, a factory indirection, a plain
//! [`Template`] or a service [`CompositeTemplate`].

mod caches;
mod services;

use rustc_hash::FxHashMap;

use crate::template::{CompositeTemplate, Template};

pub use self::caches::{
	CLUSTERED_CACHE_KIND, LOCAL_CACHE_KIND, LOCAL_CACHE_SCHEME, NAMED_CACHE_SCHEME, NEAR_CACHE_SCHEME,
	READ_WRITE_BACKING_MAP_SCHEME, SOCKET_ADDRESS,
};
pub use self::services::{
	BACKING_MAP_LOOKUP_STRATEGY, DISTRIBUTED_SERVICE_SCHEME, INVOCATION_SERVICE_SCHEME, OPTIMISTIC_SERVICE_SCHEME,
	PROXY_SERVICE_SCHEME, REMOTE_CACHE_SERVICE_SCHEME, REMOTE_INVOCATION_SERVICE_SCHEME, REPLICATED_SERVICE_SCHEME,
};

/// Root element; compiles its children and yields nothing itself.
pub const COHERENCE_CONFIG: &str = "coherence-config";
pub const NAMED_CACHE: &str = "named-cache";
pub const SERVICE_INSTANCE: &str = "service-instance";

/// Descriptor obtained by calling a factory method on a named bean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactoryTag {
	pub kind: &'static str,
	/// Attribute naming the factory bean.
	pub attribute: &'static str,
	pub method: &'static str,
}

#[derive(Debug, Clone)]
pub enum Handler {
	/// Compiles every child, produces no descriptor.
	Delegate,
	Factory(FactoryTag),
	Template(Template),
	Composite(CompositeTemplate),
}

#[derive(Debug, Default)]
pub struct Schema {
	handlers: FxHashMap<&'static str, Handler>,
}

impl Schema {
	/// An empty schema.
	pub fn new() -> Self {
		Self::default()
	}

	/// The cache-cluster topology schema.
	pub fn coherence() -> Self {
		let mut schema = Self::new();
		schema.insert(COHERENCE_CONFIG, Handler::Delegate);
		schema.insert(
			NAMED_CACHE,
			Handler::Factory(FactoryTag {
				kind: "NamedCache",
				attribute: "cache-name",
				method: "getCache",
			}),
		);
		schema.insert(
			SERVICE_INSTANCE,
			Handler::Factory(FactoryTag {
				kind: "Service",
				attribute: "scheme-name",
				method: "getCoherenceService",
			}),
		);
		services::register(&mut schema);
		caches::register(&mut schema);
		schema
	}

	/// Registers `handler` for `tag`, replacing any previous handler.
	pub fn insert(&mut self, tag: &'static str, handler: Handler) {
		self.handlers.insert(tag, handler);
	}

	pub fn handler(&self, tag: &str) -> Option<&Handler> {
		self.handlers.get(tag)
	}

	pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.handlers.keys().copied()
	}

	/// Closest known tag to `tag`, if any is within a small edit distance.
	pub fn suggest(&self, tag: &str) -> Option<&'static str> {
		closest(tag, self.tags())
	}
}

/// Candidate within edit distance 3 of `tag`, nearest first, ties broken alphabetically.
pub(crate) fn closest<'a>(tag: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
	candidates
		.into_iter()
		.map(|known| (strsim::levenshtein(tag, known), known))
		.min()
		.filter(|(distance, _)| *distance <= 3)
		.map(|(_, known)| known)
}
