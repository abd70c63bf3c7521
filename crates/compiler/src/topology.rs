//! Compile output: the descriptor graph of one document.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;

use crate::deferred::{CacheWiring, DeferredCache};
use crate::descriptor::Descriptor;
use crate::error::CompileWarning;
use crate::registry::RegistryParts;
use crate::schema::CLUSTERED_CACHE_KIND;

/// Every externally addressable descriptor of a compiled document, in registration order.
///
/// Pass-wide shared descriptors injected by schema defaults are kept apart as globals:
/// [`get`](Self::get) finds them, [`len`](Self::len) and [`iter`](Self::iter) do not count
/// them.
#[derive(Debug, Serialize)]
pub struct Topology {
	descriptors: IndexMap<String, Arc<Descriptor>>,
	#[serde(skip_serializing_if = "IndexMap::is_empty")]
	globals: IndexMap<String, Arc<Descriptor>>,
	aliases: IndexMap<String, String>,
	#[serde(skip)]
	warnings: Vec<CompileWarning>,
}

impl Topology {
	pub(crate) fn new(parts: RegistryParts, warnings: Vec<CompileWarning>) -> Self {
		Self {
			descriptors: parts.entries,
			globals: parts.globals,
			aliases: parts.aliases,
			warnings,
		}
	}

	/// Looks up a descriptor or global by identity or alias.
	pub fn get(&self, name: &str) -> Option<&Arc<Descriptor>> {
		self.lookup(name)
			.or_else(|| self.aliases.get(name).and_then(|id| self.lookup(id)))
	}

	fn lookup(&self, id: &str) -> Option<&Arc<Descriptor>> {
		self.descriptors.get(id).or_else(|| self.globals.get(id))
	}

	pub fn len(&self) -> usize {
		self.descriptors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.descriptors.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<Descriptor>)> {
		self.descriptors.iter().map(|(id, d)| (id.as_str(), d))
	}

	pub fn globals(&self) -> impl Iterator<Item = (&str, &Arc<Descriptor>)> {
		self.globals.iter().map(|(id, d)| (id.as_str(), d))
	}

	pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
		self.aliases.iter().map(|(alias, id)| (alias.as_str(), id.as_str()))
	}

	pub fn warnings(&self) -> &[CompileWarning] {
		&self.warnings
	}

	pub fn of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = (&'a str, &'a Arc<Descriptor>)> + 'a {
		self.iter().filter(move |(_, d)| d.kind() == kind)
	}

	/// Creates one pending [`DeferredCache`] per cache definition. Accessors block until
	/// [`CacheWiring::wire`] opens the gates, or fail once its canceller fires.
	pub fn prepare_caches(&self) -> CacheWiring {
		let pending = self
			.of_kind(CLUSTERED_CACHE_KIND)
			.map(|(id, descriptor)| {
				let (cache, init) = DeferredCache::pending(id);
				(Arc::clone(descriptor), cache, init)
			})
			.collect();
		CacheWiring::new(pending)
	}
}
