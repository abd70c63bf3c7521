use std::sync::Arc;

use super::*;

fn map(kind: &str) -> Arc<Descriptor> {
	Arc::new(Descriptor::new(kind))
}

#[test]
fn same_descriptor_registers_idempotently() {
	let mut registry = DescriptorRegistry::new();
	let backing = map("ReadWriteBackingMapDefinition");

	let first = registry.register("orders-backing", backing.clone()).unwrap();
	let second = registry.register("orders-backing", backing).unwrap();

	assert_eq!(first, "orders-backing");
	assert_eq!(first, second);
	assert_eq!(registry.len(), 1);
}

/// Structural equality is not enough: only the same instance may share an identity.
#[test]
fn distinct_descriptor_under_same_identity_clashes() {
	let mut registry = DescriptorRegistry::new();
	registry.register("orders-backing", map("LocalCacheDefinition")).unwrap();

	let err = registry.register("orders-backing", map("LocalCacheDefinition")).unwrap_err();
	match err {
		CompileError::NameClash { id, existing, incoming } => {
			assert_eq!(id, "orders-backing");
			assert_eq!(existing, "LocalCacheDefinition");
			assert_eq!(incoming, "LocalCacheDefinition");
		}
		other => panic!("expected NameClash, got {other:?}"),
	}
}

#[test]
fn generated_ids_count_per_kind_and_skip_taken_names() {
	let mut registry = DescriptorRegistry::new();
	registry.register("ConcurrentHashMap#1", map("ConcurrentHashMap")).unwrap();

	assert_eq!(registry.generate_id("ConcurrentHashMap"), "ConcurrentHashMap#0");
	assert_eq!(registry.generate_id("ConcurrentHashMap"), "ConcurrentHashMap#2");
	assert_eq!(registry.generate_id("ArrayList"), "ArrayList#0");
}

#[test]
fn aliases_resolve_to_their_target() {
	let mut registry = DescriptorRegistry::new();
	let strategy = map("ByNameBackingMapLookupStrategy");
	registry.register("default-strategy", strategy.clone()).unwrap();
	registry.register_alias("BackingMapLookupStrategy", "default-strategy");

	let found = registry.get("BackingMapLookupStrategy").unwrap();
	assert!(Arc::ptr_eq(found, &strategy));
	assert!(registry.get("unknown").is_none());
	assert!(!registry.contains("BackingMapLookupStrategy"));
}

#[test]
fn globals_share_the_identity_namespace() {
	let mut registry = DescriptorRegistry::new();
	let strategy = map("ByNameBackingMapLookupStrategy");
	registry.register_global("default-strategy", strategy.clone()).unwrap();
	registry.register_global("default-strategy", strategy).unwrap();

	assert_eq!(registry.len(), 0);
	assert!(registry.contains("default-strategy"));
	let err = registry.register("default-strategy", map("LocalCacheDefinition")).unwrap_err();
	assert!(matches!(err, CompileError::NameClash { .. }), "{err:?}");

	let parts = registry.into_parts();
	assert_eq!(parts.globals.len(), 1);
	assert!(parts.entries.is_empty());
}
