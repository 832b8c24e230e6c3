//! Anti-duplication resolver with a bounded retry budget.
//!
//! Per `get_endpoint` call:
//! ```text
//! Start → Querying ─┬─ accepted ─────────────→ Accepted
//!                   ├─ repeat, budget left ──→ Querying
//!                   ├─ repeat, budget spent ─→ Exhausted
//!                   └─ empty / provider err ─→ InvalidOutput
//! ```
//! A candidate is accepted if it differs from the last returned address, or
//! the provider reports a pool of fewer than two addresses.

use std::sync::{Arc, Mutex, PoisonError};

use crate::config::ResolverConfig;
use crate::error::{ConfigError, ProviderError, ResolveError};
use crate::provider::EndpointProvider;

/// Wraps a provider and remembers the last address it handed out.
///
/// `get_endpoint` takes `&mut self`, so a single owner is serialized by the
/// borrow checker. Use [`SharedResolver`] to share one resolver between
/// concurrent callers.
pub struct Resolver {
    provider: Arc<dyn EndpointProvider>,
    last_result: String,
    max_attempts: u32,
}

impl Resolver {
    /// Create a resolver with the default attempt budget.
    pub fn new(provider: Arc<dyn EndpointProvider>) -> Self {
        Self {
            provider,
            last_result: String::new(),
            max_attempts: ResolverConfig::default().max_attempts,
        }
    }

    /// Create a resolver from a validated config.
    pub fn with_config(
        provider: Arc<dyn EndpointProvider>,
        config: ResolverConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            provider,
            last_result: String::new(),
            max_attempts: config.max_attempts,
        })
    }

    /// Return an address in `host:port[/path]` form.
    ///
    /// Never returns the previous address twice in a row unless the provider
    /// reports a pool smaller than two.
    pub fn get_endpoint(&mut self) -> Result<String, ResolveError> {
        for attempt in 1..=self.max_attempts {
            let candidate = self
                .provider
                .next_address()
                .map_err(|e| self.invalid_output(e))?;
            if candidate.is_empty() {
                return Err(self.invalid_output(ProviderError::EmptyAddress));
            }

            if candidate != self.last_result || self.pool_size()? < 2 {
                tracing::trace!(
                    provider = self.provider.name(),
                    attempt,
                    endpoint = %candidate,
                    "endpoint accepted"
                );
                self.last_result.clone_from(&candidate);
                return Ok(candidate);
            }

            tracing::debug!(
                provider = self.provider.name(),
                attempt,
                endpoint = %candidate,
                "provider repeated last endpoint, retrying"
            );
        }

        tracing::warn!(
            provider = self.provider.name(),
            attempts = self.max_attempts,
            last = %self.last_result,
            "endpoint resolution exhausted"
        );
        Err(ResolveError::ResolutionExhausted {
            attempts: self.max_attempts,
        })
    }

    /// The last address returned, or `""` if none yet.
    pub fn last_result(&self) -> &str {
        &self.last_result
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn provider(&self) -> &Arc<dyn EndpointProvider> {
        &self.provider
    }

    fn pool_size(&self) -> Result<usize, ResolveError> {
        self.provider
            .pool_size()
            .map_err(|e| self.invalid_output(e))
    }

    fn invalid_output(&self, source: ProviderError) -> ResolveError {
        ResolveError::InvalidProviderOutput {
            provider: self.provider.name().to_string(),
            source,
        }
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("provider", &self.provider.name())
            .field("last_result", &self.last_result)
            .field("max_attempts", &self.max_attempts)
            .finish()
    }
}

/// Thread-safe handle to one [`Resolver`].
///
/// The lock is held for the whole `get_endpoint` call, so the
/// read-compare-update of the last address is never interleaved.
#[derive(Clone, Debug)]
pub struct SharedResolver {
    inner: Arc<Mutex<Resolver>>,
}

impl SharedResolver {
    pub fn new(resolver: Resolver) -> Self {
        Self {
            inner: Arc::new(Mutex::new(resolver)),
        }
    }

    pub fn get_endpoint(&self) -> Result<String, ResolveError> {
        // A panic inside a provider leaves `last_result` untouched.
        let mut resolver = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        resolver.get_endpoint()
    }

    pub fn last_result(&self) -> String {
        let resolver = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        resolver.last_result().to_string()
    }
}

impl From<Resolver> for SharedResolver {
    fn from(resolver: Resolver) -> Self {
        Self::new(resolver)
    }
}
