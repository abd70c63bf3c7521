//! Service scheme tags. Every service compiles to a service descriptor and a linked
//! configuration descriptor.

use super::{Handler, Schema};
use crate::template::{CompositeTemplate, SharedDefault, Template};
use crate::value::PropertyParser as P;

pub const DISTRIBUTED_SERVICE_SCHEME: &str = "distributed-service-scheme";
pub const REPLICATED_SERVICE_SCHEME: &str = "replicated-service-scheme";
pub const OPTIMISTIC_SERVICE_SCHEME: &str = "optimistic-service-scheme";
pub const INVOCATION_SERVICE_SCHEME: &str = "invocation-service-scheme";
pub const PROXY_SERVICE_SCHEME: &str = "proxy-service-scheme";
pub const REMOTE_CACHE_SERVICE_SCHEME: &str = "remote-cache-service-scheme";
pub const REMOTE_INVOCATION_SERVICE_SCHEME: &str = "remote-invocation-service-scheme";

const CLUSTERED_CACHE_SERVICE_KIND: &str = "ClusteredCacheServiceBean";
const CLUSTERED_SERVICE_KIND: &str = "ClusteredServiceBean";
const CACHE_SERVICE_KIND: &str = "CacheServiceBean";

/// Lookup strategy shared by every clustered cache service of a pass.
pub const BACKING_MAP_LOOKUP_STRATEGY: SharedDefault = SharedDefault {
	id: "default-backing-map-lookup-strategy",
	kind: "ByNameBackingMapLookupStrategy",
	alias: Some("BackingMapLookupStrategy"),
};

const LEASE_GRANULARITY: &[&str] = &["thread", "member"];

pub(super) fn register(schema: &mut Schema) {
	let services = [
		(DISTRIBUTED_SERVICE_SCHEME, CLUSTERED_CACHE_SERVICE_KIND, distributed_config()),
		(REPLICATED_SERVICE_SCHEME, CLUSTERED_CACHE_SERVICE_KIND, replicated_config()),
		(OPTIMISTIC_SERVICE_SCHEME, CLUSTERED_CACHE_SERVICE_KIND, optimistic_config()),
		(INVOCATION_SERVICE_SCHEME, CLUSTERED_SERVICE_KIND, invocation_config()),
		(PROXY_SERVICE_SCHEME, CLUSTERED_SERVICE_KIND, proxy_config()),
		(REMOTE_CACHE_SERVICE_SCHEME, CACHE_SERVICE_KIND, remote_config("RemoteCacheServiceConfiguration")),
		(
			REMOTE_INVOCATION_SERVICE_SCHEME,
			CLUSTERED_SERVICE_KIND,
			remote_config("RemoteInvocationServiceConfiguration"),
		),
	];
	for (tag, kind, configuration) in services {
		schema.insert(tag, Handler::Composite(CompositeTemplate::new(service(kind), configuration)));
	}
}

fn service(kind: &'static str) -> Template {
	let template = Template::new(kind)
		.property("service-name", "serviceName", P::text())
		.property("autostart", "autostart", P::text())
		.property("member-listener", "memberListener", P::listeners("MemberListenerCollection"))
		.property("service-listener", "serviceListener", P::listeners("ServiceListenerCollection"));
	if kind == CLUSTERED_CACHE_SERVICE_KIND {
		template.default_shared("backingMapLookupStrategy", BACKING_MAP_LOOKUP_STRATEGY)
	} else {
		template
	}
}

fn task_timing(template: Template) -> Template {
	template
		.property("thread-count", "threadCount", P::text())
		.property("task-hung-threshold", "taskHungThreshold", P::duration())
		.property("task-timeout", "taskTimeout", P::duration())
		.property("request-timeout", "requestTimeout", P::duration())
}

fn distributed_config() -> Template {
	let template = Template::new("DistributedCacheServiceConfiguration")
		.property("serializer", "serializer", P::bean())
		.property("partition-count", "partitionCount", P::text())
		.property("key-associator", "keyAssociator", P::bean())
		.property("key-partitioning", "keyPartitioning", P::bean())
		.property("partition-listener", "partitionListener", P::listeners("PartitionListenerCollection"))
		.property("backup-count", "backupCount", P::text())
		.property("backup-count-after-writebehind", "backupCountAfterWritebehind", P::text())
		.property("lease-granularity", "leaseGranularity", P::enumeration(LEASE_GRANULARITY))
		.property("transfer-threshold", "transferThreshold", P::size())
		.property("local-storage", "localStorage", P::text());
	task_timing(template)
}

fn replicated_config() -> Template {
	Template::new("ReplicatedCacheServiceConfiguration")
		.property("serializer", "serializer", P::bean())
		.property("standard-lease-milliseconds", "standardLeaseMilliseconds", P::text())
		.property("lease-granularity", "leaseGranularity", P::enumeration(LEASE_GRANULARITY))
		.property("mobile-issues", "mobileIssues", P::text())
}

fn optimistic_config() -> Template {
	Template::new("OptimisticCacheServiceConfiguration").property("serializer", "serializer", P::bean())
}

fn invocation_config() -> Template {
	task_timing(Template::new("InvocationServiceConfiguration").property("serializer", "serializer", P::bean()))
}

fn proxy_config() -> Template {
	const TCP: &str = "acceptor-config/tcp-acceptor";
	const HANDLER: &str = "acceptor-config/outgoing-message-handler";

	Template::new("ProxyServiceConfiguration")
		.property("thread-count", "threadCount", P::text())
		.property("task-hung-threshold", "taskHungThresholdMillis", P::duration())
		.property("task-timeout", "taskTimeoutMillis", P::duration())
		.property("request-timeout", "requestTimeout", P::duration())
		.property("acceptor-config/connection-limit", "connectionLimit", P::text())
		.property("acceptor-config/serializer", "acceptorSerializer", P::bean())
		.property("acceptor-config/filter", "acceptorConnectionFilter", P::bean())
		.property(&format!("{HANDLER}/heartbeat-interval"), "acceptorHeartbeatInterval", P::duration())
		.property(&format!("{HANDLER}/heartbeat-timeout"), "acceptorHeartbeatTimeout", P::duration())
		.property(&format!("{HANDLER}/request-timeout"), "acceptorRequestTimeout", P::duration())
		.property(&format!("{TCP}/local-address/address"), "acceptorLocalHost", P::text())
		.property(&format!("{TCP}/local-address/port"), "acceptorLocalPort", P::text())
		.property(&format!("{TCP}/address-provider"), "addressProvider", P::bean())
		.property(&format!("{TCP}/socket-provider"), "acceptorSocketProviderConfig", P::text())
		.property(&format!("{TCP}/reuse-address"), "acceptorReuseAddress", P::text())
		.property(&format!("{TCP}/keep-alive-enabled"), "acceptorKeepAliveEnabled", P::text())
		.property(&format!("{TCP}/tcp-delay-enabled"), "acceptorTcpDelayEnabled", P::text())
		.property(&format!("{TCP}/receive-buffer-size"), "acceptorReceiveBufferSizeBytes", P::size())
		.property(&format!("{TCP}/send-buffer-size"), "acceptorSendBufferSizeBytes", P::size())
		.property(&format!("{TCP}/listen-backlog"), "acceptorListenBacklog", P::text())
		.property(&format!("{TCP}/linger-timeout"), "acceptorLingerTimeoutMillis", P::duration())
		.property(&format!("{TCP}/authorized-hosts/host-address"), "authorizedHostAddress", P::text())
		.property(&format!("{TCP}/authorized-hosts/host-range"), "authorizedHostRange", P::text())
		.property(&format!("{TCP}/authorized-hosts/host-filter"), "authorizedHostFilter", P::bean())
		.property(&format!("{TCP}/suspect-protocol-enabled"), "acceptorSuspectProtocolEnabled", P::text())
		.property(&format!("{TCP}/suspect-buffer-size"), "acceptorSuspectBufferSizeBytes", P::size())
		.property(&format!("{TCP}/suspect-buffer-length"), "acceptorSuspectBufferLength", P::text())
		.property(&format!("{TCP}/nominal-buffer-size"), "acceptorNominalBufferSizeBytes", P::size())
		.property(&format!("{TCP}/nominal-buffer-length"), "acceptorNominalBufferLength", P::text())
		.property(&format!("{TCP}/limit-buffer-size"), "acceptorLimitBufferSizeBytes", P::size())
		.property(&format!("{TCP}/limit-buffer-length"), "acceptorLimitBufferLength", P::text())
		.property("proxy-config/cache-service-proxy/enabled", "cacheProxyEnabled", P::text())
		.property("proxy-config/cache-service-proxy/lock-enabled", "cacheProxyLockEnabled", P::text())
		.property("proxy-config/cache-service-proxy/read-only", "cacheProxyReadOnly", P::text())
		.property("proxy-config/cache-service-proxy/class-name", "cacheProxyClassName", P::text())
		.property("proxy-config/cache-service-proxy/cache-lookup-strategy", "cacheLookupStrategy", P::bean())
		.property("proxy-config/invocation-service-proxy/enabled", "invocationProxyEnabled", P::text())
		.property("proxy-config/invocation-service-proxy/class-name", "invocationProxyClassName", P::text())
}

fn remote_config(kind: &'static str) -> Template {
	const TCP: &str = "initiator-config/tcp-initiator";
	const HANDLER: &str = "initiator-config/outgoing-message-handler";

	Template::new(kind)
		.property(&format!("{HANDLER}/heartbeat-interval"), "initiatorHeartbeatInterval", P::duration())
		.property(&format!("{HANDLER}/heartbeat-timeout"), "initiatorHeartbeatTimeout", P::duration())
		.property(&format!("{HANDLER}/request-timeout"), "initiatorRequestTimeout", P::duration())
		.property("initiator-config/serializer", "initiatorSerializer", P::bean())
		.property("initiator-config/filter", "initiatorConnectionFilter", P::bean())
		.property(&format!("{TCP}/local-address/address"), "initiatorLocalHost", P::text())
		.property(&format!("{TCP}/local-address/port"), "initiatorLocalPort", P::text())
		.property(
			&format!("{TCP}/remote-addresses"),
			"remoteAddresses",
			P::collection(super::SOCKET_ADDRESS, "ArrayList"),
		)
		.property(&format!("{TCP}/remote-addresses/address-provider"), "addressProvider", P::bean())
		.property(&format!("{TCP}/socket-provider"), "initiatorSocketProviderConfig", P::text())
		.property(&format!("{TCP}/reuse-address"), "initiatorReuseAddress", P::text())
		.property(&format!("{TCP}/keep-alive-enabled"), "initiatorKeepAliveEnabled", P::text())
		.property(&format!("{TCP}/tcp-delay-enabled"), "initiatorTcpDelayEnabled", P::text())
		.property(&format!("{TCP}/receive-buffer-size"), "initiatorReceiveBufferSize", P::size())
		.property(&format!("{TCP}/send-buffer-size"), "initiatorSendBufferSize", P::size())
		.property(&format!("{TCP}/linger-timeout"), "initiatorLingerTimeout", P::duration())
		.property(&format!("{TCP}/connect-timeout"), "initiatorConnectTimeout", P::duration())
}
