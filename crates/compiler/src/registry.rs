//! Per-pass descriptor registry.
//!
//! Holds every externally addressable descriptor produced by one compile pass: top-level
//! components, service configuration descriptors and globally shared back-tier maps.
//! Pass-wide defaults the schema injects (such as the backing map lookup strategy) live
//! in a separate globals table: they share the identity namespace but are not components
//! of the document. Registration is idempotent for the same `Arc<Descriptor>` and fails
//! for a different descriptor under a taken identity.
//!
//! A registry belongs to exactly one pass. Reusing it across passes would report
//! legitimately re-declared names as clashes.

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use crate::descriptor::Descriptor;
use crate::error::{CompileError, Result};

#[derive(Debug, Default)]
pub struct DescriptorRegistry {
	entries: IndexMap<String, Arc<Descriptor>>,
	globals: IndexMap<String, Arc<Descriptor>>,
	aliases: IndexMap<String, String>,
	counters: FxHashMap<String, usize>,
}

/// Everything a finished pass registered.
#[derive(Debug)]
pub(crate) struct RegistryParts {
	pub entries: IndexMap<String, Arc<Descriptor>>,
	pub globals: IndexMap<String, Arc<Descriptor>>,
	pub aliases: IndexMap<String, String>,
}

impl DescriptorRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `descriptor` under `id` and returns the identity.
	///
	/// Re-registering the same descriptor (pointer-equal) is a no-op. A different
	/// descriptor under an existing identity is a [`CompileError::NameClash`].
	pub fn register(&mut self, id: impl Into<String>, descriptor: Arc<Descriptor>) -> Result<String> {
		let id = id.into();
		if self.check_vacant(&id, &descriptor)? {
			tracing::debug!(id = %id, kind = descriptor.kind(), "registered descriptor");
			self.entries.insert(id.clone(), descriptor);
		}
		Ok(id)
	}

	/// Registers a pass-wide shared descriptor. Same rules as [`register`](Self::register).
	pub fn register_global(&mut self, id: impl Into<String>, descriptor: Arc<Descriptor>) -> Result<String> {
		let id = id.into();
		if self.check_vacant(&id, &descriptor)? {
			tracing::debug!(id = %id, kind = descriptor.kind(), "registered global descriptor");
			self.globals.insert(id.clone(), descriptor);
		}
		Ok(id)
	}

	/// `Ok(true)` when `id` is free, `Ok(false)` when it already holds `descriptor`.
	fn check_vacant(&self, id: &str, descriptor: &Arc<Descriptor>) -> Result<bool> {
		match self.lookup(id) {
			None => Ok(true),
			Some(existing) if Arc::ptr_eq(existing, descriptor) => Ok(false),
			Some(existing) => Err(CompileError::NameClash {
				existing: existing.kind().to_string(),
				incoming: descriptor.kind().to_string(),
				id: id.to_string(),
			}),
		}
	}

	fn lookup(&self, id: &str) -> Option<&Arc<Descriptor>> {
		self.entries.get(id).or_else(|| self.globals.get(id))
	}

	pub fn register_alias(&mut self, alias: impl Into<String>, id: impl Into<String>) {
		self.aliases.insert(alias.into(), id.into());
	}

	/// Generates a fresh `<kind>#<n>` identity not used by any registered descriptor.
	pub fn generate_id(&mut self, kind: &str) -> String {
		let counter = self.counters.entry(kind.to_string()).or_default();
		loop {
			let id = format!("{kind}#{counter}");
			*counter += 1;
			if !self.entries.contains_key(&id) && !self.globals.contains_key(&id) {
				return id;
			}
		}
	}

	pub fn contains(&self, id: &str) -> bool {
		self.lookup(id).is_some()
	}

	/// Looks up a descriptor or global by identity or alias.
	pub fn get(&self, id: &str) -> Option<&Arc<Descriptor>> {
		self.lookup(id)
			.or_else(|| self.aliases.get(id).and_then(|target| self.lookup(target)))
	}

	/// Number of registered components, globals excluded.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub(crate) fn into_parts(self) -> RegistryParts {
		RegistryParts {
			entries: self.entries,
			globals: self.globals,
			aliases: self.aliases,
		}
	}
}

#[cfg(test)]
mod tests;
