//! Service templates: one element, two linked descriptors.

use std::sync::Arc;

use gridwire_document::Element;

use super::{LazyPolicy, Template, check_children};
use crate::context::CompileContext;
use crate::descriptor::{Descriptor, Value};
use crate::error::{CompileWarning, Result};

/// Appended to the service identity to name its configuration descriptor.
pub const CONFIG_SUFFIX: &str = "#CONFIG";

/// Service property linking to the configuration descriptor.
pub const CONFIGURATION_PROPERTY: &str = "configuration";

/// Pairs a service template with the template of its configuration component. Both are
/// compiled from the same element; services default to eager initialization.
#[derive(Debug, Clone)]
pub struct CompositeTemplate {
	service: Template,
	configuration: Template,
}

impl CompositeTemplate {
	pub fn new(service: Template, configuration: Template) -> Self {
		Self {
			service: service.lazy_policy(LazyPolicy::Eager),
			configuration: configuration.lazy_policy(LazyPolicy::Eager),
		}
	}

	pub fn service(&self) -> &Template {
		&self.service
	}

	pub fn configuration(&self) -> &Template {
		&self.configuration
	}

	/// Compiles the configuration descriptor, registers it as `<identity>#CONFIG` and
	/// returns the service descriptor linked to it. The caller registers the service.
	pub fn compile(&self, node: &Element, identity: &str, ctx: &mut CompileContext<'_>) -> Result<Descriptor> {
		check_children(node, &[&self.service, &self.configuration], ctx)?;
		let configuration = Arc::new(self.configuration.compile_bound(node, ctx)?);
		let config_id = ctx
			.registry_mut()
			.register(format!("{identity}{CONFIG_SUFFIX}"), configuration)?;

		let mut service = self.service.compile_bound(node, ctx)?;
		service.set(CONFIGURATION_PROPERTY, Value::Ref(config_id));

		if service.lazy_init() {
			let location = ctx.location();
			ctx.warn(CompileWarning::LazyService {
				id: identity.to_string(),
				location,
			});
		}
		Ok(service)
	}
}
