use gridwire_document::Element;
use proptest::prelude::*;

use super::*;

fn acceptor() -> Element {
	Element::new("proxy-service-scheme").with_child(
		Element::new("acceptor-config").with_child(
			Element::new("tcp-acceptor")
				.with_child(Element::new("local-address").with_attr("host", "10.0.0.1"))
				.with_child(Element::new("reuse-address").with_text("true")),
		),
	)
}

#[test]
fn nested_segments_resolve_to_element_and_parent() {
	let root = acceptor();
	let path = PropertyPath::parse("acceptor-config/tcp-acceptor/reuse-address");
	let Some(Target::Element(located)) = path.resolve(&root) else {
		panic!("expected element target");
	};
	assert_eq!(located.element.text(), Some("true"));
	assert_eq!(located.parent.tag(), "tcp-acceptor");
}

#[test]
fn attribute_suffix_reads_final_element() {
	let root = acceptor();
	let path = PropertyPath::parse("acceptor-config/tcp-acceptor/local-address@host");
	assert!(path.selects_attribute());
	assert!(matches!(path.resolve(&root), Some(Target::Attribute("10.0.0.1"))));

	let missing = PropertyPath::parse("acceptor-config/tcp-acceptor/local-address@port");
	assert!(missing.resolve(&root).is_none());
}

#[test]
fn attribute_of_the_node_itself() {
	let root = Element::new("scheme").with_attr("service-ref", "dist");
	let path = PropertyPath::parse("@service-ref");
	assert!(matches!(path.resolve(&root), Some(Target::Attribute("dist"))));
}

#[test]
fn missing_segment_stops_resolution() {
	let root = acceptor();
	assert!(PropertyPath::parse("acceptor-config/http-acceptor/reuse-address").resolve(&root).is_none());
	assert!(PropertyPath::parse("initiator-config").resolve(&root).is_none());
}

#[test]
fn repeatable_tail_returns_first_occurrence() {
	let root = Element::new("service")
		.with_child(Element::new("member-listener").with_text("a"))
		.with_child(Element::new("member-listener").with_text("b"));
	let path = PropertyPath::parse("member-listener");

	assert!(path.resolve(&root).is_none());
	let Some(Target::Element(located)) = path.resolve_repeatable(&root) else {
		panic!("expected element target");
	};
	assert_eq!(located.element.text(), Some("a"));
	assert_eq!(located.parent.count_children_named("member-listener"), 2);
}

#[test]
fn repeatable_tail_still_rejects_ambiguous_prefix() {
	let root = Element::new("service")
		.with_child(Element::new("listeners").with_child(Element::new("member-listener")))
		.with_child(Element::new("listeners").with_child(Element::new("member-listener")));
	assert!(PropertyPath::parse("listeners/member-listener").resolve_repeatable(&root).is_none());
}

fn arb_segments() -> impl Strategy<Value = Vec<String>> {
	prop::collection::vec("[a-z]{1,6}(-[a-z]{1,6})?", 1..5)
}

/// Builds a chain following `segments`, duplicating the element at `dup` `copies` times.
fn chain(segments: &[String], dup: usize, copies: usize) -> Element {
	fn build(segments: &[String], depth: usize, dup: usize, copies: usize) -> Vec<Element> {
		let Some((head, rest)) = segments.split_first() else {
			return Vec::new();
		};
		let mut el = Element::new(head.clone()).with_text("leaf");
		el = el.with_children(build(rest, depth + 1, dup, copies));
		let n = if depth == dup { copies } else { 1 };
		vec![el; n]
	}
	Element::new("root").with_children(build(segments, 0, dup, copies))
}

proptest! {
	/// Any path whose segment names more than one child resolves to nothing.
	#[test]
	fn prop_ambiguous_segment_is_absent(
		segments in arb_segments(),
		dup_seed in any::<prop::sample::Index>(),
		copies in 2usize..4,
	) {
		let dup = dup_seed.index(segments.len());
		let root = chain(&segments, dup, copies);
		let path = PropertyPath::parse(&segments.join("/"));
		prop_assert!(path.resolve(&root).is_none());
	}

	/// The same chain without duplicates always resolves to its deepest element.
	#[test]
	fn prop_unique_chain_resolves(segments in arb_segments()) {
		let root = chain(&segments, usize::MAX, 1);
		let path = PropertyPath::parse(&segments.join("/"));
		let resolved = path.resolve(&root);
		prop_assert!(
			matches!(resolved, Some(Target::Element(l)) if l.element.tag() == segments[segments.len() - 1])
		);
	}
}
