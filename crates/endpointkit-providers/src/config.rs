//! Serde-loadable provider selection.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use endpointkit_core::{ConfigError, EndpointProvider};

use crate::dns::DnsEndpoints;
use crate::fixed::FixedEndpoint;
use crate::round_robin::RoundRobinEndpoints;

/// Which provider to build, as read from a config file.
///
/// ```json
/// { "kind": "round_robin", "addresses": ["10.0.0.1:8000", "10.0.0.2:8000"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProviderConfig {
    Fixed {
        address: String,
    },
    RoundRobin {
        addresses: Vec<String>,
    },
    Dns {
        target: String,
        /// Background refresh period; `None` resolves once.
        #[serde(default)]
        refresh_secs: Option<u64>,
    },
}

impl ProviderConfig {
    /// Build the provider. DNS providers are resolved once before returning.
    ///
    /// Without a refresh period a failed first lookup is an error. With one,
    /// it is logged and left to the refresh task; until a lookup succeeds the
    /// provider reports the lookup failure from `next_address`.
    pub async fn build(&self) -> Result<Arc<dyn EndpointProvider>, ConfigError> {
        match self {
            Self::Fixed { address } => Ok(Arc::new(FixedEndpoint::new(address.clone()))),
            Self::RoundRobin { addresses } => {
                Ok(Arc::new(RoundRobinEndpoints::new(addresses.iter().cloned())))
            }
            Self::Dns {
                target,
                refresh_secs,
            } => {
                let provider = Arc::new(DnsEndpoints::new(target)?);
                let first = provider.refresh().await;
                match (first, refresh_secs.filter(|s| *s > 0)) {
                    (Err(source), None) => {
                        return Err(ConfigError::Discovery {
                            target: target.clone(),
                            source,
                        });
                    }
                    (Err(e), Some(secs)) => {
                        tracing::warn!(dns = %target, error = %e, "initial DNS refresh failed");
                        provider.spawn_refresh(Duration::from_secs(secs));
                    }
                    (Ok(_), Some(secs)) => {
                        provider.spawn_refresh(Duration::from_secs(secs));
                    }
                    (Ok(_), None) => {}
                }
                Ok(provider)
            }
        }
    }
}
