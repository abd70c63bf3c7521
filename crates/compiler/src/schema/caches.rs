//! Cache scheme and configuration fragment tags.

use super::{Handler, Schema};
use crate::descriptor::Descriptor;
use crate::template::Template;
use crate::value::{NestedFlavor, PropertyParser as P};

pub const NAMED_CACHE_SCHEME: &str = "named-cache-scheme";
pub const NEAR_CACHE_SCHEME: &str = "near-cache-scheme";
pub const LOCAL_CACHE_SCHEME: &str = "local-cache-scheme";
pub const READ_WRITE_BACKING_MAP_SCHEME: &str = "read-write-backing-map-scheme";
pub const SOCKET_ADDRESS: &str = "socket-address";

/// Kind of the descriptors backing deferred caches at runtime.
pub const CLUSTERED_CACHE_KIND: &str = "ClusteredCacheDefinition";
pub const LOCAL_CACHE_KIND: &str = "LocalCacheDefinition";

const INVALIDATION_STRATEGY: &[&str] = &["none", "present", "all", "auto"];

pub(super) fn register(schema: &mut Schema) {
	schema.insert(NAMED_CACHE_SCHEME, Handler::Template(named_cache()));
	schema.insert(NEAR_CACHE_SCHEME, Handler::Template(near_cache()));
	schema.insert(LOCAL_CACHE_SCHEME, Handler::Template(local_cache()));
	schema.insert(READ_WRITE_BACKING_MAP_SCHEME, Handler::Template(read_write_backing_map()));
	schema.insert(
		SOCKET_ADDRESS,
		Handler::Template(
			Template::new("SocketAddressConfig")
				.property("address", "host", P::text())
				.property("port", "port", P::text()),
		),
	);
}

/// Default map for tiers left unspecified.
fn lazy_local_cache() -> Descriptor {
	Descriptor::new(LOCAL_CACHE_KIND).with_lazy_init(true)
}

fn named_cache() -> Template {
	Template::new(CLUSTERED_CACHE_KIND)
		.property("front-tier", "frontTier", P::bean())
		.property("back-tier", "backTier", P::nested(NestedFlavor::BackTier))
		// `service` element wins over the attribute shorthand
		.property("@service-ref", "service", P::reference())
		.property("service", "service", P::nested(NestedFlavor::Service))
		.require("service")
}

fn near_cache() -> Template {
	Template::new("NearCacheDecorator")
		.property("front-scheme", "frontMap", P::nested(NestedFlavor::CacheMap))
		.property("invalidation-strategy", "invalidationStrategy", P::enumeration(INVALIDATION_STRATEGY))
		.default_descriptor("frontMap", lazy_local_cache())
}

fn local_cache() -> Template {
	Template::new(LOCAL_CACHE_KIND)
		.property(
			"eviction-policy",
			"evictionMap",
			P::nested(NestedFlavor::EvictionPolicy {
				policy_property: "evictionPolicy",
			}),
		)
		.property("high-units", "highUnits", P::size())
		.property("low-units", "lowUnits", P::size())
		.property(
			"unit-calculator",
			"unitCalculator",
			P::nested(NestedFlavor::UnitCalculator {
				factor_property: "unitFactor",
			}),
		)
		.property("expiry-delay", "expiryDelayMillis", P::duration())
		.property("flush-delay", "flushDelayMillis", P::duration())
}

fn read_write_backing_map() -> Template {
	Template::new("ReadWriteBackingMapDefinition")
		.property("cachestore", "cachestore", P::bean())
		.property("cachestore-timeout", "cachestoreTimeout", P::duration())
		.property("internal-cache-scheme", "internalMap", P::nested(NestedFlavor::CacheMap))
		.property("miss-cache-scheme", "missMap", P::nested(NestedFlavor::CacheMap))
		.property("write-delay", "writeDelay", P::duration())
		.property("write-batch-factor", "writeBatchFactor", P::text())
		.property("write-requeue-threshold", "writeRequeueThreshold", P::text())
		.property("refresh-ahead-factor", "refreshAheadFactor", P::text())
		.default_descriptor("internalMap", lazy_local_cache())
}
