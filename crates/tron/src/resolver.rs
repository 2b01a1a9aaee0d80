//! Pluggable name resolution for node channels.
//!
//! A channel target has the form `scheme:///endpoint`. The scheme picks a [`ResolverBuilder`]
//! from a [`ResolverRegistry`]; the built [`Resolver`] pushes the endpoint's addresses to the
//! channel's load-balancing policy through [`ClientConn`].

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::Arc;

pub const STATIC_SCHEME: &str = "static";
pub const PASSTHROUGH_SCHEME: &str = "passthrough";

/// A parsed `scheme:///endpoint` channel target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub scheme: String,
    pub endpoint: String,
}

impl Target {
    pub fn parse(s: &str) -> Result<Self> {
        let (scheme, rest) = s
            .split_once("://")
            .ok_or_else(|| Error::InvalidTarget(s.to_string()))?;
        // The authority part is unused; `static:///name` and `static://host/name` both resolve
        // `name`.
        let endpoint = rest.split_once('/').map(|(_, e)| e).unwrap_or_default();
        if scheme.is_empty() || endpoint.is_empty() {
            return Err(Error::InvalidTarget(s.to_string()));
        }
        Ok(Self {
            scheme: scheme.to_string(),
            endpoint: endpoint.to_string(),
        })
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:///{}", self.scheme, self.endpoint)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAddress {
    pub addr: String,
}

/// Resolution result pushed to the load-balancing policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverState {
    pub addresses: Vec<ResolvedAddress>,
}

/// Receiver side of resolution, implemented by the channel's load-balancing policy.
pub trait ClientConn: Send + Sync {
    fn update_state(&self, state: ResolverState);
}

pub trait Resolver: Send + Sync {
    /// Hint that the channel wants fresh addresses.
    fn resolve_now(&self);
    /// Releases resolver resources. Idempotent.
    fn close(&mut self);
}

pub trait ResolverBuilder: Send + Sync {
    fn scheme(&self) -> &str;
    fn build(&self, target: &Target, conn: Arc<dyn ClientConn>) -> Result<Box<dyn Resolver>>;
}

/// Logical endpoint name -> ordered node addresses (`host:port` or URLs).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct NodeEndpointSet(BTreeMap<String, Vec<String>>);

impl NodeEndpointSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the addresses of `name`.
    pub fn insert(&mut self, name: impl Into<String>, addrs: Vec<String>) {
        self.0.insert(name.into(), addrs);
    }

    pub fn with(mut self, name: impl Into<String>, addrs: Vec<String>) -> Self {
        self.insert(name, addrs);
        self
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverPhase {
    Unbuilt,
    Built,
    Closed,
}

/// Builds [`StaticResolver`]s over a fixed address table.
#[derive(Debug, Clone)]
pub struct StaticResolverBuilder {
    addrs: Arc<NodeEndpointSet>,
}

impl StaticResolverBuilder {
    pub fn new(addrs: NodeEndpointSet) -> Self {
        Self {
            addrs: Arc::new(addrs),
        }
    }
}

impl ResolverBuilder for StaticResolverBuilder {
    fn scheme(&self) -> &str {
        STATIC_SCHEME
    }

    fn build(&self, target: &Target, conn: Arc<dyn ClientConn>) -> Result<Box<dyn Resolver>> {
        let mut r = StaticResolver {
            target: target.clone(),
            conn: Some(conn),
            addrs: Arc::clone(&self.addrs),
            phase: ResolverPhase::Unbuilt,
        };
        r.start();
        Ok(Box::new(r))
    }
}

/// Resolves a logical endpoint once, from the table it was built with.
///
/// There is no re-resolution: `resolve_now` does nothing and membership changes require building
/// a new resolver from a new table.
pub struct StaticResolver {
    target: Target,
    conn: Option<Arc<dyn ClientConn>>,
    addrs: Arc<NodeEndpointSet>,
    phase: ResolverPhase,
}

impl StaticResolver {
    fn start(&mut self) {
        let addresses: Vec<ResolvedAddress> = self
            .addrs
            .get(&self.target.endpoint)
            .unwrap_or_default()
            .iter()
            .map(|a| ResolvedAddress { addr: a.clone() })
            .collect();
        if addresses.is_empty() {
            tracing::warn!(channel_target = %self.target, "no addresses registered for endpoint");
        } else {
            tracing::debug!(
                channel_target = %self.target,
                addresses = addresses.len(),
                "static resolve"
            );
        }
        if let Some(conn) = &self.conn {
            conn.update_state(ResolverState { addresses });
        }
        self.phase = ResolverPhase::Built;
    }

    pub fn phase(&self) -> ResolverPhase {
        self.phase
    }
}

impl Resolver for StaticResolver {
    fn resolve_now(&self) {}

    fn close(&mut self) {
        self.conn = None;
        self.phase = ResolverPhase::Closed;
    }
}

/// Treats the target endpoint itself as the only address (`passthrough:///127.0.0.1:50051`).
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughResolverBuilder;

struct PassthroughResolver;

impl Resolver for PassthroughResolver {
    fn resolve_now(&self) {}
    fn close(&mut self) {}
}

impl ResolverBuilder for PassthroughResolverBuilder {
    fn scheme(&self) -> &str {
        PASSTHROUGH_SCHEME
    }

    fn build(&self, target: &Target, conn: Arc<dyn ClientConn>) -> Result<Box<dyn Resolver>> {
        conn.update_state(ResolverState {
            addresses: vec![ResolvedAddress {
                addr: target.endpoint.clone(),
            }],
        });
        Ok(Box::new(PassthroughResolver))
    }
}

/// Scheme -> resolver builder.
#[derive(Clone, Default)]
pub struct ResolverRegistry {
    builders: HashMap<String, Arc<dyn ResolverBuilder>>,
}

impl ResolverRegistry {
    /// Registry with only the passthrough scheme.
    pub fn new() -> Self {
        let mut r = Self::default();
        r.register(PassthroughResolverBuilder);
        r
    }

    /// Registers `builder` under its scheme, replacing any previous builder for that scheme.
    pub fn register(&mut self, builder: impl ResolverBuilder + 'static) {
        self.builders
            .insert(builder.scheme().to_string(), Arc::new(builder));
    }

    pub fn get(&self, scheme: &str) -> Option<Arc<dyn ResolverBuilder>> {
        self.builders.get(scheme).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingConn {
        updates: Mutex<Vec<ResolverState>>,
    }

    impl ClientConn for RecordingConn {
        fn update_state(&self, state: ResolverState) {
            self.updates.lock().unwrap().push(state);
        }
    }

    fn addrs(state: &ResolverState) -> Vec<&str> {
        state.addresses.iter().map(|a| a.addr.as_str()).collect()
    }

    fn table() -> NodeEndpointSet {
        NodeEndpointSet::new().with("node", vec!["a:1".to_string(), "b:2".to_string()])
    }

    #[test]
    fn target_parse_extracts_scheme_and_endpoint() {
        let t = Target::parse("static:///tron_node").unwrap();
        assert_eq!(t.scheme, "static");
        assert_eq!(t.endpoint, "tron_node");
        assert_eq!(t.to_string(), "static:///tron_node");

        assert!(Target::parse("tron_node").is_err());
        assert!(Target::parse("static:///").is_err());
        assert!(Target::parse(":///x").is_err());
    }

    #[test]
    fn build_pushes_registered_addresses_in_order() {
        let conn = Arc::new(RecordingConn::default());
        let builder = StaticResolverBuilder::new(table());
        let target = Target::parse("static:///node").unwrap();

        let _r = builder.build(&target, conn.clone()).unwrap();

        let updates = conn.updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(addrs(&updates[0]), vec!["a:1", "b:2"]);
    }

    #[test]
    fn unknown_endpoint_resolves_to_empty_set() {
        let conn = Arc::new(RecordingConn::default());
        let builder = StaticResolverBuilder::new(table());
        let target = Target::parse("static:///missing").unwrap();

        let _r = builder.build(&target, conn.clone()).unwrap();

        let updates = conn.updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        assert!(updates[0].addresses.is_empty());
    }

    #[test]
    fn resolver_phases_and_idempotent_close() {
        let conn: Arc<dyn ClientConn> = Arc::new(RecordingConn::default());
        let mut r = StaticResolver {
            target: Target::parse("static:///node").unwrap(),
            conn: Some(conn),
            addrs: Arc::new(table()),
            phase: ResolverPhase::Unbuilt,
        };
        assert_eq!(r.phase(), ResolverPhase::Unbuilt);
        r.start();
        assert_eq!(r.phase(), ResolverPhase::Built);

        r.resolve_now();
        assert_eq!(r.phase(), ResolverPhase::Built);

        r.close();
        r.close();
        assert_eq!(r.phase(), ResolverPhase::Closed);
    }

    #[test]
    fn resolve_now_does_not_push_again() {
        let conn = Arc::new(RecordingConn::default());
        let builder = StaticResolverBuilder::new(table());
        let r = builder
            .build(&Target::parse("static:///node").unwrap(), conn.clone())
            .unwrap();
        r.resolve_now();
        r.resolve_now();
        assert_eq!(conn.updates.lock().unwrap().len(), 1);
    }

    #[test]
    fn registry_dispatches_by_scheme() {
        let mut registry = ResolverRegistry::new();
        registry.register(StaticResolverBuilder::new(table()));

        assert_eq!(registry.get("static").unwrap().scheme(), STATIC_SCHEME);
        assert_eq!(registry.get("passthrough").unwrap().scheme(), PASSTHROUGH_SCHEME);
        assert!(registry.get("dns").is_none());
    }

    #[test]
    fn passthrough_uses_endpoint_as_address() {
        let conn = Arc::new(RecordingConn::default());
        let target = Target::parse("passthrough:///127.0.0.1:50051").unwrap();
        let _r = PassthroughResolverBuilder.build(&target, conn.clone()).unwrap();
        assert_eq!(addrs(&conn.updates.lock().unwrap()[0]), vec!["127.0.0.1:50051"]);
    }

    #[test]
    fn endpoint_set_deserializes_from_json_table() {
        let set: NodeEndpointSet =
            serde_json::from_str(r#"{"tron_node":["a:1","b:2"]}"#).unwrap();
        assert_eq!(set.get("tron_node").unwrap(), ["a:1", "b:2"]);
        assert!(set.get("other").is_none());
    }
}
