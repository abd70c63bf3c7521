use gridwire_document::Element;
use pretty_assertions::assert_eq;

use super::*;

fn root(children: impl IntoIterator<Item = Element>) -> Element {
	Element::new("coherence-config").with_children(children)
}

fn lenient() -> CompileOptions {
	CompileOptions {
		strict: false,
		..CompileOptions::default()
	}
}

#[test]
fn generic_bean_compiles_properties_and_arguments() {
	let doc = root([Element::new("bean")
		.with_attr("class", "AuditListener")
		.with_attr("id", "audit")
		.with_child(Element::new("property").with_attr("name", "topic").with_attr("value", "partitions"))
		.with_child(Element::new("property").with_attr("name", "sink").with_attr("ref", "auditSink"))
		.with_child(Element::new("constructor-arg").with_child(Element::new("value").with_text("primary")))]);

	let topology = Compiler::default().compile(&doc, CompileOptions::default()).unwrap();
	let audit = topology.get("audit").expect("bean registered");

	assert_eq!(audit.kind(), "AuditListener");
	assert!(!audit.lazy_init());
	assert_eq!(audit.get("topic"), Some(&Value::Text("partitions".into())));
	assert_eq!(audit.get("sink"), Some(&Value::Ref("auditSink".into())));
	assert_eq!(audit.constructor_args(), [Value::Text("primary".into())]);
}

#[test]
fn bean_without_class_is_structural() {
	let doc = root([Element::new("bean").with_attr("id", "x")]);
	let err = Compiler::default().compile(&doc, CompileOptions::default()).unwrap_err();
	match err {
		CompileError::Structural { location, .. } => assert_eq!(location, "coherence-config > bean#x"),
		other => panic!("unexpected error: {other:?}"),
	}
}

#[test]
fn factory_tags_are_lazy_factory_descriptors() {
	let doc = root([
		Element::new("named-cache").with_attr("id", "orders").with_attr("cache-name", "ordersFactory"),
		Element::new("service-instance").with_attr("scheme-name", "dist"),
	]);
	let topology = Compiler::default().compile(&doc, CompileOptions::default()).unwrap();

	let orders = topology.get("orders").expect("named cache");
	assert!(orders.lazy_init());
	let factory = orders.factory().expect("factory reference");
	assert_eq!((factory.bean.as_str(), factory.method), ("ordersFactory", "getCache"));

	let (id, service) = topology.of_kind("Service").next().expect("service instance");
	assert_eq!(id, "Service#0");
	assert_eq!(service.factory().map(|f| f.method), Some("getCoherenceService"));
}

#[test]
fn factory_tag_requires_its_attribute() {
	let doc = root([Element::new("named-cache")]);
	let err = Compiler::default().compile(&doc, CompileOptions::default()).unwrap_err();
	assert!(matches!(err, CompileError::Structural { .. }), "{err:?}");
}

#[test]
fn unknown_tag_is_rejected_with_suggestion() {
	let doc = root([Element::new("local-cache-schem")]);
	let err = Compiler::default().compile(&doc, CompileOptions::default()).unwrap_err();
	match &err {
		CompileError::UnknownTag { tag, suggestion, .. } => {
			assert_eq!(tag, "local-cache-schem");
			assert_eq!(suggestion.as_deref(), Some("local-cache-scheme"));
		}
		other => panic!("unexpected error: {other:?}"),
	}
	assert!(err.to_string().contains("did you mean 'local-cache-scheme'?"));
}

#[test]
fn unknown_tag_is_skipped_when_lenient() {
	let doc = root([
		Element::new("mystery-scheme"),
		Element::new("local-cache-scheme").with_attr("id", "local"),
	]);
	let topology = Compiler::default().compile(&doc, lenient()).unwrap();

	assert_eq!(topology.len(), 1);
	assert_eq!(
		topology.warnings(),
		[CompileWarning::UnknownTagSkipped {
			tag: "mystery-scheme".into(),
			location: "coherence-config".into(),
		}]
	);
}

#[test]
fn unnamed_top_level_components_get_generated_identities() {
	let doc = root([Element::new("local-cache-scheme"), Element::new("local-cache-scheme")]);
	let topology = Compiler::default().compile(&doc, CompileOptions::default()).unwrap();
	let ids: Vec<&str> = topology.iter().map(|(id, _)| id).collect();
	assert_eq!(ids, ["LocalCacheDefinition#0", "LocalCacheDefinition#1"]);
}

#[test]
fn duplicate_identity_clashes() {
	let doc = root([
		Element::new("local-cache-scheme").with_attr("id", "cache"),
		Element::new("near-cache-scheme").with_attr("id", "cache"),
	]);
	let err = Compiler::default().compile(&doc, CompileOptions::default()).unwrap_err();
	assert!(matches!(err, CompileError::NameClash { ref id, .. } if id == "cache"), "{err:?}");
}

#[test]
fn root_cannot_be_nested() {
	let doc = root([Element::new("near-cache-scheme")
		.with_child(Element::new("front-scheme").with_child(Element::new("coherence-config")))]);
	let err = Compiler::default().compile(&doc, CompileOptions::default()).unwrap_err();
	assert!(matches!(err, CompileError::Structural { .. }), "{err:?}");
}

#[test]
fn cancelled_pass_aborts() {
	let token = CancellationToken::new();
	token.cancel();
	let doc = root([Element::new("local-cache-scheme")]);
	let err = Compiler::default()
		.compile_with_cancel(&doc, CompileOptions::default(), token)
		.unwrap_err();
	assert!(matches!(err, CompileError::Cancelled));
}

#[test]
fn root_default_lazy_init_is_ambient() {
	let doc = root([Element::new("local-cache-scheme").with_attr("id", "local")]).with_attr("default-lazy-init", "false");
	let topology = Compiler::default().compile(&doc, CompileOptions::default()).unwrap();
	assert!(!topology.get("local").expect("local cache").lazy_init());

	let forced = CompileOptions {
		default_lazy_init: Some(true),
		..CompileOptions::default()
	};
	let topology = Compiler::default().compile(&doc, forced).unwrap();
	assert!(topology.get("local").expect("local cache").lazy_init());
}

#[test]
fn compile_str_reports_document_errors() {
	assert!(matches!(
		compile_str("coherence-config {", CompileOptions::default()),
		Err(CompileError::Document(_))
	));
	assert!(matches!(
		compile_str("", CompileOptions::default()),
		Err(CompileError::Document(_))
	));
}
