//! Round-robin rotation over a static address list.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use endpointkit_core::{EndpointProvider, ProviderError};

/// Rotates through a list of addresses, one per call.
///
/// `pool_size` counts distinct entries: `["a:1", "a:1"]` is a pool of one.
#[derive(Debug)]
pub struct RoundRobinEndpoints {
    addresses: Vec<String>,
    distinct: usize,
    cursor: AtomicUsize,
}

impl RoundRobinEndpoints {
    pub fn new<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let addresses: Vec<String> = addresses.into_iter().map(Into::into).collect();
        let distinct = addresses.iter().collect::<HashSet<_>>().len();
        Self {
            addresses,
            distinct,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Number of entries, duplicates included.
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

impl EndpointProvider for RoundRobinEndpoints {
    fn next_address(&self) -> Result<String, ProviderError> {
        if self.addresses.is_empty() {
            return Err(ProviderError::EmptyPool);
        }
        let idx = self.cursor.fetch_add(1, Ordering::Relaxed) % self.addresses.len();
        Ok(self.addresses[idx].clone())
    }

    fn pool_size(&self) -> Result<usize, ProviderError> {
        Ok(self.distinct)
    }

    fn name(&self) -> &str {
        "round-robin"
    }
}
