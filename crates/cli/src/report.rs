//! Renders a compiled topology for the terminal.

use std::fmt::Write as _;

use gridwire_compiler::deferred::BackingResource;
use gridwire_compiler::{Topology, Value};

/// One line per descriptor in registration order, then globals, aliases and warnings.
pub fn summary(topology: &Topology) -> String {
	let mut out = String::new();
	let width = topology.iter().map(|(id, _)| id.len()).max().unwrap_or(0);

	for (id, descriptor) in topology.iter() {
		let mut line = format!("{id:<width$}  {}", descriptor.kind());
		if descriptor.lazy_init() {
			line.push_str(" (lazy)");
		}
		if let Some(factory) = descriptor.factory() {
			let _ = write!(line, " via {}.{}()", factory.bean, factory.method);
		}
		let links: Vec<&str> = descriptor.properties().filter_map(|(_, v)| v.as_ref_name()).collect();
		if !links.is_empty() {
			let _ = write!(line, " -> {}", links.join(", "));
		}
		let _ = writeln!(out, "{line}");
	}

	for (id, descriptor) in topology.globals() {
		let _ = writeln!(out, "global {id}  {}", descriptor.kind());
	}
	for (alias, target) in topology.aliases() {
		let _ = writeln!(out, "alias {alias} = {target}");
	}
	for warning in topology.warnings() {
		let _ = writeln!(out, "warning: {warning}");
	}
	let _ = write!(
		out,
		"{} descriptor(s), {} global(s), {} inline",
		topology.len(),
		topology.globals().count(),
		topology
			.iter()
			.flat_map(|(_, d)| d.properties().map(|(_, v)| count_inline(v)))
			.sum::<usize>()
	);
	out
}

/// Inline descriptors carried by `value`, counting nested ones.
fn count_inline(value: &Value) -> usize {
	match value {
		Value::Inline(holder) => {
			let descriptor = &holder.descriptor;
			1 + descriptor.properties().map(|(_, v)| count_inline(v)).sum::<usize>()
				+ descriptor.constructor_args().iter().map(count_inline).sum::<usize>()
		}
		Value::List(items) => items.iter().map(count_inline).sum(),
		_ => 0,
	}
}

/// Wires every cache definition against the topology itself and reports each gate.
///
/// Returns the report and whether every cache opened.
pub fn wiring(topology: &Topology) -> (String, bool) {
	let wiring = topology.prepare_caches();
	let caches: Vec<_> = wiring.caches().cloned().collect();
	let resolve = |name: &str| topology.get(name).map(|d| BackingResource::from_descriptor(name, d));
	let healthy = wiring.wire(resolve).is_ok();

	let mut out = String::new();
	for cache in &caches {
		match cache.cache() {
			Ok(handle) => {
				let backend = cache.backend_instance(resolve).map_or_else(
					|err| format!("unresolved ({err})"),
					|resource| resource.name().to_string(),
				);
				let _ = writeln!(out, "{}: ready on {} backed by {backend}", cache.name(), handle.service);
			}
			Err(err) => {
				let _ = writeln!(out, "{}: {err}", cache.name());
			}
		}
	}
	let _ = write!(out, "{} cache(s) wired", caches.len());
	(out, healthy)
}
