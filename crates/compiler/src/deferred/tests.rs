use std::sync::Barrier;
use std::thread;
use std::time::Duration;

use super::*;

#[test]
fn open_releases_every_waiter_with_the_same_value() {
	const WAITERS: usize = 8;
	let (cell, init) = ReadyCell::<String>::pending();
	let barrier = Arc::new(Barrier::new(WAITERS + 1));

	let handles: Vec<_> = (0..WAITERS)
		.map(|_| {
			let cell = Arc::clone(&cell);
			let barrier = Arc::clone(&barrier);
			thread::spawn(move || {
				barrier.wait();
				cell.wait()
			})
		})
		.collect();

	barrier.wait();
	assert!(!cell.is_terminal());
	init.open("orders".to_string());

	let values: Vec<Arc<String>> = handles
		.into_iter()
		.map(|h| h.join().expect("waiter thread").expect("cell opened"))
		.collect();
	let reference = cell.try_get().expect("terminal").expect("ready");
	assert!(values.iter().all(|v| Arc::ptr_eq(v, &reference)));
}

#[test]
fn access_after_open_does_not_block() {
	let (cell, init) = ReadyCell::pending();
	init.open(42_u32);
	assert_eq!(*cell.wait_timeout(Duration::ZERO).unwrap(), 42);
	assert_eq!(*cell.wait().unwrap(), 42);
}

#[test]
fn failure_reaches_blocked_and_later_callers() {
	let (cell, init) = ReadyCell::<u32>::pending();
	let waiter = {
		let cell = Arc::clone(&cell);
		thread::spawn(move || cell.wait())
	};
	init.fail(DeferredAccessError::MissingService { cache: "orders".into() });

	let expected = DeferredAccessError::MissingService { cache: "orders".into() };
	assert_eq!(waiter.join().expect("waiter thread").unwrap_err(), expected);
	assert_eq!(cell.wait().unwrap_err(), expected);
}

#[test]
fn dropped_initializer_abandons_the_cell() {
	let (cell, init) = ReadyCell::<u32>::pending();
	drop(init);
	assert_eq!(cell.wait().unwrap_err(), DeferredAccessError::Abandoned);
}

#[test]
fn canceller_wakes_blocked_waiters() {
	let (cell, init) = ReadyCell::<u32>::pending();
	let canceller = init.canceller();
	let waiter = {
		let cell = Arc::clone(&cell);
		thread::spawn(move || cell.wait())
	};

	assert!(canceller.cancel());
	assert_eq!(waiter.join().expect("waiter thread").unwrap_err(), DeferredAccessError::Cancelled);
	assert!(init.is_cancelled());

	// the initializer can no longer change the outcome
	init.open(7);
	assert_eq!(cell.wait().unwrap_err(), DeferredAccessError::Cancelled);
	assert!(!canceller.cancel());
}

#[test]
fn canceller_leaves_settled_cell_alone() {
	let (cell, init) = ReadyCell::pending();
	let canceller = init.canceller();
	init.open(1_u8);
	assert!(!canceller.cancel());
	assert!(!canceller.is_cancelled());
	assert_eq!(*cell.wait().unwrap(), 1);
}

#[test]
fn unbounded_timeout_waits_for_settlement() {
	let (cell, init) = ReadyCell::<u32>::pending();
	let waiter = {
		let cell = Arc::clone(&cell);
		thread::spawn(move || cell.wait_timeout(Duration::MAX))
	};
	init.open(5);
	assert_eq!(*waiter.join().expect("waiter thread").unwrap(), 5);
	assert_eq!(*cell.wait_timeout(Duration::MAX).unwrap(), 5);
}

#[test]
fn pending_cell_times_out() {
	let (cell, _init) = ReadyCell::<u32>::pending();
	assert_eq!(
		cell.wait_timeout(Duration::from_millis(10)).unwrap_err(),
		DeferredAccessError::TimedOut
	);
	assert!(cell.try_get().is_none());
}

#[test]
fn cache_validates_backing_resource() {
	let (cache, mut init) = DeferredCache::pending("orders");
	init.set_service("dist");
	init.set_back_tier(BackTier::Resource(BackingResource::Other {
		name: "orders-store".into(),
		kind: "CacheStore".into(),
	}));

	let err = init.after_properties_set().unwrap_err();
	assert!(matches!(err, DeferredAccessError::InvalidBackingResource { .. }));
	assert_eq!(cache.cache().unwrap_err(), err);
	assert!(cache.is_terminal());
	assert!(!cache.is_ready());
}

#[test]
fn cache_requires_service() {
	let (cache, init) = DeferredCache::pending("orders");
	assert_eq!(
		init.after_properties_set().unwrap_err(),
		DeferredAccessError::MissingService { cache: "orders".into() }
	);
	assert!(cache.cache().is_err());
}

#[test]
fn backend_instance_resolves_named_back_tier() {
	let (cache, mut init) = DeferredCache::pending("orders");
	init.set_service("dist");
	init.set_back_tier(BackTier::Named("orders-map".into()));
	init.after_properties_set().unwrap();

	let resource = cache
		.backend_instance(|name| Some(BackingResource::Map { name: name.to_string() }))
		.unwrap();
	assert_eq!(resource.name(), "orders-map");

	let missing = cache.backend_instance(|_| None).unwrap_err();
	assert_eq!(
		missing,
		DeferredAccessError::BackingNotFound {
			cache: "orders".into(),
			name: "orders-map".into(),
		}
	);
}

#[test]
fn backend_instance_without_back_tier_fails() {
	let (cache, mut init) = DeferredCache::pending("orders");
	init.set_service("dist");
	init.after_properties_set().unwrap();
	assert!(matches!(
		cache.backend_instance(|_| None),
		Err(DeferredAccessError::NoBackingMap { .. })
	));
}

#[test]
fn accessor_blocked_before_wiring_sees_the_handle() {
	let (cache, mut init) = DeferredCache::pending("orders");
	let waiter = {
		let cache = Arc::clone(&cache);
		thread::spawn(move || cache.cache())
	};
	init.set_service("dist");
	init.set_front_tier("front");
	init.after_properties_set().unwrap();

	let handle = waiter.join().expect("waiter thread").expect("cache ready");
	assert_eq!(handle.service, "dist");
	assert_eq!(handle.front_tier.as_deref(), Some("front"));
	assert!(cache.is_ready());
}

#[test]
fn cache_init_cancel_fails_accessors() {
	let (cache, init) = DeferredCache::pending("orders");
	let canceller = init.canceller();
	init.cancel();
	assert!(canceller.is_cancelled());
	assert_eq!(
		cache.cache_timeout(Duration::ZERO).unwrap_err(),
		DeferredAccessError::Cancelled
	);
}
