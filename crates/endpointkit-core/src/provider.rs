//! The `EndpointProvider` trait — the source of candidate addresses.

use crate::error::ProviderError;

/// A source of endpoint addresses (`host:port[/path]`).
///
/// Variants range from a single fixed address to a rotating list or a
/// discovery-backed pool. The [`Resolver`](crate::Resolver) layers the
/// anti-duplication policy on top; providers only hand out candidates.
///
/// # Contract
/// - `next_address` never returns an empty string. The resolver treats an
///   empty string, like an `Err`, as a fatal fault of the provider.
/// - `pool_size` is the number of distinct addresses the provider can
///   currently produce. A value below 2 tells the resolver that repeating
///   the previous address is expected.
///
/// # Thread Safety
/// Methods take `&self`; implementations keep their cursor or snapshot
/// behind interior mutability and must be `Send + Sync`.
///
/// # Object Safety
/// The trait is object-safe and can be stored as `Arc<dyn EndpointProvider>`.
pub trait EndpointProvider: Send + Sync + 'static {
    /// Produce the next candidate address.
    fn next_address(&self) -> Result<String, ProviderError>;

    /// Number of distinct addresses the provider currently knows about.
    fn pool_size(&self) -> Result<usize, ProviderError>;

    /// Identifier used in errors and log fields.
    fn name(&self) -> &str {
        "provider"
    }
}
