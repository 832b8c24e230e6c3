//! Error types for providers, resolution and configuration.

use thiserror::Error;

/// Errors a provider reports when it cannot produce an address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The provider returned an empty address string.
    #[error("provider returned an empty address")]
    EmptyAddress,

    /// The provider currently knows no addresses at all.
    #[error("provider has no addresses")]
    EmptyPool,

    /// Discovery backend (DNS, registry) failed.
    #[error("discovery failed: {0}")]
    Discovery(String),

    /// An unexpected provider failure.
    #[error("{0}")]
    Other(String),
}

/// Errors returned by [`Resolver::get_endpoint`](crate::Resolver::get_endpoint).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The provider broke its contract (empty output or an internal failure).
    /// Never retried.
    #[error("invalid output from provider {provider}: {source}")]
    InvalidProviderOutput {
        provider: String,
        #[source]
        source: ProviderError,
    },

    /// No acceptable address within the attempt budget.
    #[error("failed to get endpoint address after trying {attempts} times")]
    ResolutionExhausted { attempts: u32 },
}

impl ResolveError {
    /// Returns `true` if the attempt budget ran out.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::ResolutionExhausted { .. })
    }

    /// Returns `true` if the supplied provider is at fault.
    pub fn is_provider_fault(&self) -> bool {
        matches!(self, Self::InvalidProviderOutput { .. })
    }
}

/// Invalid configuration for a resolver or provider.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `max_attempts` is zero; the resolver needs at least one query.
    #[error("max_attempts must be at least 1")]
    ZeroAttempts,

    /// A provider address or target could not be parsed.
    #[error("invalid address {address:?}: {reason}")]
    InvalidAddress { address: String, reason: String },

    /// A discovery-backed provider could not resolve its target at startup.
    #[error("discovery for {target} failed: {source}")]
    Discovery {
        target: String,
        #[source]
        source: ProviderError,
    },

    /// The config file could not be read or parsed.
    #[error("config file {path}: {reason}")]
    File { path: String, reason: String },
}
