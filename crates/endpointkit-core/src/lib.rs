//! endpointkit-core — endpoint resolution for networked clients.
//!
//! # Overview
//!
//! A client asks for "the address to use for the next call" before every
//! outbound request. This crate answers that question and nothing more:
//!
//! - [`EndpointProvider`] — the trait every address source implements
//! - [`Resolver`] — wraps a provider and refuses to hand out the same address
//!   twice in a row, retrying within a bounded budget
//! - [`SharedResolver`] — a lock-protected resolver for concurrent callers
//! - [`ResolveError`] / [`ProviderError`] / [`ConfigError`] — error types
//! - [`ResolverConfig`] — attempt budget
//!
//! # Example
//! ```rust
//! use std::sync::Arc;
//! use endpointkit_core::{EndpointProvider, ProviderError, Resolver};
//!
//! struct Localhost;
//!
//! impl EndpointProvider for Localhost {
//!     fn next_address(&self) -> Result<String, ProviderError> {
//!         Ok("localhost:8000".into())
//!     }
//!     fn pool_size(&self) -> Result<usize, ProviderError> {
//!         Ok(1)
//!     }
//! }
//!
//! let mut resolver = Resolver::new(Arc::new(Localhost));
//! assert_eq!(resolver.get_endpoint().unwrap(), "localhost:8000");
//! ```

pub mod config;
pub mod error;
pub mod provider;
pub mod resolver;

pub use config::{ResolverConfig, DEFAULT_MAX_ATTEMPTS};
pub use error::{ConfigError, ProviderError, ResolveError};
pub use provider::EndpointProvider;
pub use resolver::{Resolver, SharedResolver};
