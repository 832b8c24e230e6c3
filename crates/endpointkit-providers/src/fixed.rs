//! Single fixed address.

use endpointkit_core::{EndpointProvider, ProviderError};

/// Always hands out the same address. Reports a pool of one, so the
/// resolver never treats the repeat as stale.
#[derive(Debug, Clone)]
pub struct FixedEndpoint {
    address: String,
}

impl FixedEndpoint {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

impl EndpointProvider for FixedEndpoint {
    fn next_address(&self) -> Result<String, ProviderError> {
        Ok(self.address.clone())
    }

    fn pool_size(&self) -> Result<usize, ProviderError> {
        Ok(1)
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_same_address() {
        let p = FixedEndpoint::new("localhost:8000");
        assert_eq!(p.next_address().unwrap(), "localhost:8000");
        assert_eq!(p.next_address().unwrap(), "localhost:8000");
        assert_eq!(p.pool_size().unwrap(), 1);
    }
}
