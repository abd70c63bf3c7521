use std::sync::Arc;

use super::{AccessResult, BackTier, BackingResource, CacheHandle, CacheInit, Canceller, DeferredCache};
use crate::descriptor::{Descriptor, Value};

/// Pending caches of a topology awaiting their property assignment.
///
/// Accessors handed out through [`CacheWiring::caches`] block until [`CacheWiring::wire`]
/// settles them, or until a [`WiringCanceller`] fires. Dropping the wiring unsettled fails
/// every remaining cache with `Abandoned`.
#[derive(Debug)]
pub struct CacheWiring {
	pending: Vec<(Arc<Descriptor>, Arc<DeferredCache>, CacheInit)>,
	canceller: WiringCanceller,
}

impl CacheWiring {
	pub(crate) fn new(pending: Vec<(Arc<Descriptor>, Arc<DeferredCache>, CacheInit)>) -> Self {
		let gates = pending.iter().map(|(_, _, init)| init.canceller()).collect();
		Self {
			pending,
			canceller: WiringCanceller { gates: Arc::new(gates) },
		}
	}

	pub fn caches(&self) -> impl Iterator<Item = &Arc<DeferredCache>> {
		self.pending.iter().map(|(_, cache, _)| cache)
	}

	pub fn cache(&self, name: &str) -> Option<Arc<DeferredCache>> {
		self.caches().find(|cache| cache.name() == name).cloned()
	}

	/// A handle that cancels every still-pending cache from any thread.
	pub fn canceller(&self) -> WiringCanceller {
		self.canceller.clone()
	}

	/// Assigns every cache its service, front tier and back tier from its descriptor, then
	/// settles its gate.
	///
	/// Back tier names that `resolve` knows become resources validated now; the rest are
	/// resolved on access. Caches cancelled beforehand are skipped. Every gate settles even
	/// when some fail; the first failure is returned.
	pub fn wire(self, mut resolve: impl FnMut(&str) -> Option<BackingResource>) -> AccessResult<()> {
		let mut first_error = None;
		for (descriptor, cache, mut init) in self.pending {
			if init.is_cancelled() {
				tracing::debug!(cache = cache.name(), "wiring cancelled");
				continue;
			}
			if let Some(service) = descriptor.get("service").and_then(component_name) {
				init.set_service(service);
			}
			if let Some(front_tier) = descriptor.get("frontTier").and_then(component_name) {
				init.set_front_tier(front_tier);
			}
			if let Some(name) = descriptor.get("backTier").and_then(component_name) {
				let back_tier = match resolve(name) {
					Some(resource) => BackTier::Resource(resource),
					None => BackTier::Named(name.to_string()),
				};
				init.set_back_tier(back_tier);
			}
			if let Err(error) = init.after_properties_set() {
				tracing::warn!(cache = cache.name(), %error, "cache initialization failed");
				first_error.get_or_insert(error);
			}
		}
		first_error.map_or(Ok(()), Err)
	}

	/// Releases every waiter with `Cancelled`.
	pub fn cancel(self) {
		self.canceller.cancel();
	}
}

/// Cancels the pending caches of one [`CacheWiring`]. Waiters are woken immediately; caches
/// that already settled keep their outcome.
#[derive(Debug, Clone)]
pub struct WiringCanceller {
	gates: Arc<Vec<Canceller<CacheHandle>>>,
}

impl WiringCanceller {
	/// Returns how many caches this call cancelled.
	pub fn cancel(&self) -> usize {
		let cancelled = self.gates.iter().filter(|gate| gate.cancel()).count();
		tracing::debug!(cancelled, "cache wiring cancelled");
		cancelled
	}

	pub fn is_cancelled(&self) -> bool {
		self.gates.iter().any(Canceller::is_cancelled)
	}
}

/// Name of the component a property value points at.
fn component_name(value: &Value) -> Option<&str> {
	match value {
		Value::Ref(name) => Some(name),
		Value::Inline(holder) => Some(&holder.id),
		_ => None,
	}
}
