use crate::error::{Error, Result};
use crate::resolver::{ClientConn, Resolver, ResolverRegistry, ResolverState, Target};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;
use tonic::transport::{Channel, Endpoint};

#[derive(Debug, Clone, Copy)]
pub struct ChannelOptions {
    pub connect_timeout: Duration,
}

impl Default for ChannelOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// A lazily connected channel to one resolved node address.
#[derive(Debug, Clone)]
pub struct Subchannel {
    addr: String,
    channel: Channel,
}

impl Subchannel {
    pub fn addr(&self) -> &str {
        &self.addr
    }

    pub fn channel(&self) -> Channel {
        self.channel.clone()
    }
}

fn endpoint_uri(addr: &str) -> String {
    if addr.contains("://") {
        addr.to_string()
    } else {
        format!("http://{addr}")
    }
}

/// Round-robin policy over the addresses last pushed by the resolver.
///
/// Subchannels connect on first use, so a state update never blocks on the network.
#[derive(Debug)]
pub struct RoundRobin {
    options: ChannelOptions,
    subchannels: RwLock<Vec<Subchannel>>,
    next: AtomicUsize,
}

impl RoundRobin {
    pub fn new(options: ChannelOptions) -> Self {
        Self {
            options,
            subchannels: RwLock::new(Vec::new()),
            next: AtomicUsize::new(0),
        }
    }

    /// Current addresses in resolver order.
    pub fn addresses(&self) -> Vec<String> {
        self.subchannels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|s| s.addr.clone())
            .collect()
    }

    pub fn pick(&self) -> Result<Subchannel> {
        let subs = self
            .subchannels
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        if subs.is_empty() {
            return Err(Error::Unavailable("no usable address".to_string()));
        }
        let i = self.next.fetch_add(1, Ordering::Relaxed) % subs.len();
        Ok(subs[i].clone())
    }

    fn connect_lazy(&self, addr: &str) -> Result<Channel, tonic::transport::Error> {
        Ok(Endpoint::from_shared(endpoint_uri(addr))?
            .connect_timeout(self.options.connect_timeout)
            .connect_lazy())
    }
}

impl ClientConn for RoundRobin {
    fn update_state(&self, state: ResolverState) {
        let mut subs = Vec::with_capacity(state.addresses.len());
        for a in state.addresses {
            match self.connect_lazy(&a.addr) {
                Ok(channel) => subs.push(Subchannel {
                    addr: a.addr,
                    channel,
                }),
                Err(err) => tracing::warn!(addr = %a.addr, %err, "skipping unusable node address"),
            }
        }
        *self
            .subchannels
            .write()
            .unwrap_or_else(PoisonError::into_inner) = subs;
    }
}

/// Long-lived channel to a node group, shared by all calls.
///
/// Built from a `scheme:///endpoint` target: the scheme's resolver feeds addresses to a
/// [`RoundRobin`] policy and each call picks the next subchannel.
#[derive(Clone)]
pub struct NodeChannel {
    inner: Arc<Inner>,
}

struct Inner {
    target: Target,
    balancer: Arc<RoundRobin>,
    resolver: Mutex<Box<dyn Resolver>>,
}

impl NodeChannel {
    /// Resolves `target` and sets up lazily connected subchannels. Must run inside a tokio runtime.
    pub fn dial(
        target: &str,
        registry: &ResolverRegistry,
        options: ChannelOptions,
    ) -> Result<Self> {
        let target = Target::parse(target)?;
        let builder = registry
            .get(&target.scheme)
            .ok_or_else(|| Error::UnknownScheme(target.scheme.clone()))?;

        let balancer = Arc::new(RoundRobin::new(options));
        let resolver = builder.build(&target, balancer.clone())?;
        tracing::info!(
            channel_target = %target,
            addresses = ?balancer.addresses(),
            "node channel ready"
        );

        Ok(Self {
            inner: Arc::new(Inner {
                target,
                balancer,
                resolver: Mutex::new(resolver),
            }),
        })
    }

    pub fn target(&self) -> &Target {
        &self.inner.target
    }

    pub fn addresses(&self) -> Vec<String> {
        self.inner.balancer.addresses()
    }

    /// Next subchannel in round-robin order; fails `Unavailable` when nothing resolved.
    pub fn pick(&self) -> Result<Subchannel> {
        self.inner.balancer.pick()
    }

    pub fn resolve_now(&self) {
        self.inner
            .resolver
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .resolve_now();
    }

    pub fn close(&self) {
        self.inner
            .resolver
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .close();
    }
}
