//! Deferred runtime counterpart of a cache definition.

use std::sync::Arc;
use std::time::Duration;

use super::{AccessResult, Canceller, DeferredAccessError, Initializer, ReadyCell};
use crate::descriptor::Descriptor;
use crate::schema::LOCAL_CACHE_KIND;

/// A live resource a cache can be backed by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackingResource {
	Map { name: String },
	MapProvider { name: String },
	BackingMapProvider { name: String },
	/// Anything else. Rejected when the cache is initialized.
	Other { name: String, kind: String },
}

impl BackingResource {
	/// Classifies a compiled map descriptor by its kind.
	pub fn from_descriptor(name: impl Into<String>, descriptor: &Descriptor) -> Self {
		let name = name.into();
		match descriptor.kind() {
			"ConcurrentHashMap" | "HashMap" => Self::Map { name },
			LOCAL_CACHE_KIND | "NearCacheDecorator" => Self::MapProvider { name },
			"ReadWriteBackingMapDefinition" => Self::BackingMapProvider { name },
			kind => Self::Other {
				name,
				kind: kind.to_string(),
			},
		}
	}

	pub fn name(&self) -> &str {
		match self {
			Self::Map { name } | Self::MapProvider { name } | Self::BackingMapProvider { name } | Self::Other { name, .. } => {
				name
			}
		}
	}
}

/// Where a cache's back tier comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackTier {
	/// Resolved on access through a caller-provided lookup.
	Named(String),
	/// Supplied during initialization and validated then.
	Resource(BackingResource),
}

/// Fully configured view of a cache, shared by every accessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheHandle {
	pub name: String,
	pub service: String,
	pub front_tier: Option<String>,
	pub back_tier: Option<BackTier>,
}

/// A cache whose accessors block until its properties have been assigned.
#[derive(Debug)]
pub struct DeferredCache {
	name: String,
	cell: Arc<ReadyCell<CacheHandle>>,
}

impl DeferredCache {
	/// Creates the shared cache and the initializer that completes it.
	pub fn pending(name: impl Into<String>) -> (Arc<Self>, CacheInit) {
		let name = name.into();
		let (cell, init) = ReadyCell::pending();
		let cache = Arc::new(Self {
			name: name.clone(),
			cell,
		});
		let init = CacheInit {
			name,
			service: None,
			front_tier: None,
			back_tier: None,
			init,
		};
		(cache, init)
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Blocks until the cache is initialized.
	pub fn cache(&self) -> AccessResult<Arc<CacheHandle>> {
		self.cell.wait()
	}

	pub fn cache_timeout(&self, timeout: Duration) -> AccessResult<Arc<CacheHandle>> {
		self.cell.wait_timeout(timeout)
	}

	/// Blocks until initialized, then returns the back tier resource. Named back tiers are
	/// resolved through `lookup`.
	pub fn backend_instance(&self, lookup: impl FnOnce(&str) -> Option<BackingResource>) -> AccessResult<BackingResource> {
		let handle = self.cell.wait()?;
		match &handle.back_tier {
			None => Err(DeferredAccessError::NoBackingMap {
				cache: self.name.clone(),
			}),
			Some(BackTier::Resource(resource)) => Ok(resource.clone()),
			Some(BackTier::Named(name)) => lookup(name).ok_or_else(|| DeferredAccessError::BackingNotFound {
				cache: self.name.clone(),
				name: name.clone(),
			}),
		}
	}

	pub fn is_ready(&self) -> bool {
		matches!(self.cell.try_get(), Some(Ok(_)))
	}

	pub fn is_terminal(&self) -> bool {
		self.cell.is_terminal()
	}
}

/// Property assignment phase of a [`DeferredCache`].
#[derive(Debug)]
pub struct CacheInit {
	name: String,
	service: Option<String>,
	front_tier: Option<String>,
	back_tier: Option<BackTier>,
	init: Initializer<CacheHandle>,
}

impl CacheInit {
	pub fn set_service(&mut self, service: impl Into<String>) {
		self.service = Some(service.into());
	}

	pub fn set_front_tier(&mut self, front_tier: impl Into<String>) {
		self.front_tier = Some(front_tier.into());
	}

	pub fn set_back_tier(&mut self, back_tier: BackTier) {
		self.back_tier = Some(back_tier);
	}

	/// Validates the assigned properties and settles the gate. On failure every accessor
	/// observes the returned error.
	pub fn after_properties_set(self) -> AccessResult<()> {
		let Self {
			name,
			service,
			front_tier,
			back_tier,
			init,
		} = self;

		if let Some(BackTier::Resource(BackingResource::Other { name: resource, kind })) = &back_tier {
			let error = DeferredAccessError::InvalidBackingResource {
				cache: name,
				resource: resource.clone(),
				kind: kind.clone(),
			};
			init.fail(error.clone());
			return Err(error);
		}
		let Some(service) = service else {
			let error = DeferredAccessError::MissingService { cache: name };
			init.fail(error.clone());
			return Err(error);
		};

		tracing::debug!(cache = %name, service = %service, "cache ready");
		init.open(CacheHandle {
			name,
			service,
			front_tier,
			back_tier,
		});
		Ok(())
	}

	/// Settles the gate with [`DeferredAccessError::Cancelled`].
	pub fn cancel(self) {
		self.init.cancel();
	}

	pub fn is_cancelled(&self) -> bool {
		self.init.is_cancelled()
	}

	pub fn canceller(&self) -> Canceller<CacheHandle> {
		self.init.canceller()
	}
}
