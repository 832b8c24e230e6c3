//! DNS-backed discovery.
//!
//! The target `host:port[/path]` is resolved with `tokio::net::lookup_host`;
//! every returned IP becomes `ip:port[/path]`. Addresses are served
//! round-robin from the last successful snapshot, so `next_address` never
//! touches the network.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use endpointkit_core::{ConfigError, EndpointProvider, ProviderError};

/// Parsed `host:port[/path]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsTarget {
    pub host: String,
    pub port: u16,
    /// Includes the leading `/`, or empty.
    pub path: String,
}

impl DnsTarget {
    pub fn parse(target: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidAddress {
            address: target.to_string(),
            reason: reason.to_string(),
        };

        let (authority, path) = match target.find('/') {
            Some(i) => target.split_at(i),
            None => (target, ""),
        };
        let (host, port) = authority
            .rsplit_once(':')
            .ok_or_else(|| invalid("missing port"))?;
        let host = host.trim_start_matches('[').trim_end_matches(']');
        if host.is_empty() {
            return Err(invalid("missing host"));
        }
        let port = port.parse::<u16>().map_err(|_| invalid("bad port"))?;

        Ok(Self {
            host: host.to_string(),
            port,
            path: path.to_string(),
        })
    }

    fn render(&self, addr: SocketAddr) -> String {
        format!("{addr}{}", self.path)
    }
}

/// Discovery-backed provider fed by DNS lookups.
///
/// Call [`refresh`](Self::refresh) once before use, and optionally
/// [`spawn_refresh`](Self::spawn_refresh) to keep the snapshot current.
#[derive(Debug)]
pub struct DnsEndpoints {
    target: DnsTarget,
    name: String,
    snapshot: RwLock<Vec<String>>,
    /// Most recent refresh failure, cleared by the next success.
    last_error: RwLock<Option<ProviderError>>,
    cursor: AtomicUsize,
}

impl DnsEndpoints {
    /// Create a provider with an empty snapshot.
    pub fn new(target: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            target: DnsTarget::parse(target)?,
            name: format!("dns:{target}"),
            snapshot: RwLock::new(Vec::new()),
            last_error: RwLock::new(None),
            cursor: AtomicUsize::new(0),
        })
    }

    pub fn target(&self) -> &DnsTarget {
        &self.target
    }

    /// Current resolved addresses.
    pub fn snapshot(&self) -> Vec<String> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Failure of the latest refresh, if it failed.
    pub fn last_error(&self) -> Option<ProviderError> {
        self.last_error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Re-resolve the target. On failure the previous snapshot is kept.
    ///
    /// Returns the number of addresses now in the snapshot.
    pub async fn refresh(&self) -> Result<usize, ProviderError> {
        let result = self.lookup().await;
        *self.last_error.write().unwrap_or_else(PoisonError::into_inner) =
            result.as_ref().err().cloned();
        result
    }

    async fn lookup(&self) -> Result<usize, ProviderError> {
        let lookup = tokio::net::lookup_host((self.target.host.as_str(), self.target.port)).await;
        let mut addrs: Vec<SocketAddr> = match lookup {
            Ok(iter) => iter.collect(),
            Err(e) => {
                tracing::warn!(dns = %self.name, error = %e, "DNS lookup failed");
                return Err(ProviderError::Discovery(e.to_string()));
            }
        };
        addrs.sort();
        addrs.dedup();

        if addrs.is_empty() {
            tracing::warn!(dns = %self.name, "DNS lookup returned no addresses");
            return Err(ProviderError::Discovery(format!(
                "no addresses for {}",
                self.target.host
            )));
        }

        let fresh: Vec<String> = addrs.into_iter().map(|a| self.target.render(a)).collect();
        let count = fresh.len();
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = fresh;
        tracing::debug!(dns = %self.name, count, "DNS snapshot refreshed");
        Ok(count)
    }

    /// Refresh every `every` on the current Tokio runtime.
    ///
    /// The task holds only a weak reference and exits once the provider is
    /// dropped.
    pub fn spawn_refresh(self: &Arc<Self>, every: Duration) -> JoinHandle<()> {
        let weak: Weak<Self> = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(this) = weak.upgrade() else {
                    break;
                };
                // Failures are logged inside `refresh`; the old snapshot stays.
                let _ = this.refresh().await;
            }
        })
    }
}

impl EndpointProvider for DnsEndpoints {
    fn next_address(&self) -> Result<String, ProviderError> {
        let snapshot = self.snapshot.read().unwrap_or_else(PoisonError::into_inner);
        if snapshot.is_empty() {
            // Surface why discovery came up empty, not just that it did.
            return Err(self.last_error().unwrap_or(ProviderError::EmptyPool));
        }
        let idx = self.cursor.fetch_add(1, Ordering::Relaxed) % snapshot.len();
        Ok(snapshot[idx].clone())
    }

    fn pool_size(&self) -> Result<usize, ProviderError> {
        Ok(self
            .snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
