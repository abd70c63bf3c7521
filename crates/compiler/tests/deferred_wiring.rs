use std::sync::Arc;
use std::thread;
use std::time::Duration;

use gridwire_compiler::deferred::{BackingResource, DeferredAccessError};
use gridwire_compiler::{CompileOptions, Topology, compile_str};

fn topology(back_tier: &str) -> Topology {
	let source = format!(
		r#"
		coherence-config {{
			distributed-service-scheme id="dist"
			named-cache-scheme id="orders" {{
				back-tier {{
					{back_tier}
				}}
				service {{
					ref bean="dist"
				}}
			}}
		}}
		"#
	);
	compile_str(&source, CompileOptions::default()).expect("document compiles")
}

fn resolver(topology: &Topology) -> impl FnMut(&str) -> Option<BackingResource> + '_ {
	move |name| topology.get(name).map(|d| BackingResource::from_descriptor(name, d))
}

#[test]
fn wiring_releases_accessors_blocked_before_it() {
	let topology = topology(r#"local-cache-scheme id="orders-map""#);
	let wiring = topology.prepare_caches();
	let cache = wiring.cache("orders").expect("pending cache");

	let waiters: Vec<_> = (0..4)
		.map(|_| {
			let cache = Arc::clone(&cache);
			thread::spawn(move || cache.cache())
		})
		.collect();

	wiring.wire(resolver(&topology)).unwrap();

	let handles: Vec<_> = waiters
		.into_iter()
		.map(|w| w.join().expect("waiter thread").expect("cache ready"))
		.collect();
	assert!(handles.iter().all(|h| Arc::ptr_eq(h, &handles[0])));
	assert_eq!(handles[0].service, "dist");

	let backend = cache.backend_instance(|_| None).unwrap();
	assert_eq!(
		backend,
		BackingResource::MapProvider {
			name: "orders-map".into()
		}
	);
}

#[test]
fn invalid_backing_resource_fails_every_accessor() {
	let topology = topology(r#"bean id="orders-store" class="OrdersStore""#);
	let wiring = topology.prepare_caches();
	let cache = wiring.cache("orders").expect("pending cache");
	let waiter = {
		let cache = Arc::clone(&cache);
		thread::spawn(move || cache.cache())
	};

	let err = wiring.wire(resolver(&topology)).unwrap_err();
	assert!(matches!(err, DeferredAccessError::InvalidBackingResource { .. }), "{err:?}");
	assert_eq!(waiter.join().expect("waiter thread").unwrap_err(), err);
	assert_eq!(cache.cache().unwrap_err(), err);
}

#[test]
fn unresolved_back_tier_is_looked_up_on_access() {
	let topology = topology(r#"ref bean="external-map""#);
	let wiring = topology.prepare_caches();
	let cache = wiring.cache("orders").expect("pending cache");
	wiring.wire(resolver(&topology)).unwrap();

	let backend = cache
		.backend_instance(|name| Some(BackingResource::Map { name: name.to_string() }))
		.unwrap();
	assert_eq!(backend.name(), "external-map");
}

#[test]
fn cancelling_wiring_releases_waiters() {
	let topology = topology(r#"ref bean="external-map""#);
	let wiring = topology.prepare_caches();
	let cache = wiring.cache("orders").expect("pending cache");
	let waiter = {
		let cache = Arc::clone(&cache);
		thread::spawn(move || cache.cache())
	};

	wiring.cancel();

	assert_eq!(waiter.join().expect("waiter thread").unwrap_err(), DeferredAccessError::Cancelled);
	assert!(cache.is_terminal());
}

#[test]
fn canceller_releases_waiters_while_wiring_is_held() {
	let topology = topology(r#"ref bean="external-map""#);
	let wiring = topology.prepare_caches();
	let canceller = wiring.canceller();
	let cache = wiring.cache("orders").expect("pending cache");
	let waiter = {
		let cache = Arc::clone(&cache);
		thread::spawn(move || cache.cache_timeout(Duration::from_secs(30)))
	};

	let remote = thread::spawn(move || canceller.cancel());
	assert_eq!(remote.join().expect("canceller thread"), 1);

	assert_eq!(waiter.join().expect("waiter thread").unwrap_err(), DeferredAccessError::Cancelled);
	assert!(wiring.canceller().is_cancelled());

	// wiring after cancellation leaves the cancelled gate untouched
	wiring.wire(resolver(&topology)).unwrap();
	assert_eq!(cache.cache().unwrap_err(), DeferredAccessError::Cancelled);
}

#[test]
fn dropping_wiring_abandons_caches() {
	let topology = topology(r#"ref bean="external-map""#);
	let wiring = topology.prepare_caches();
	let cache = wiring.cache("orders").expect("pending cache");
	drop(wiring);
	assert_eq!(cache.cache().unwrap_err(), DeferredAccessError::Abandoned);
}
