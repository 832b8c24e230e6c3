//! endpointkit-providers — ready-made [`EndpointProvider`] implementations.
//!
//! - [`FixedEndpoint`] — one static address
//! - [`RoundRobinEndpoints`] — rotation over a static list
//! - [`DnsEndpoints`] — addresses discovered by DNS, refreshed on an interval
//! - [`ProviderConfig`] — pick one of the above from a config file
//!
//! # Quick start
//! ```rust
//! use std::sync::Arc;
//! use endpointkit_core::Resolver;
//! use endpointkit_providers::RoundRobinEndpoints;
//!
//! let provider = Arc::new(RoundRobinEndpoints::new(["10.0.0.1:8000", "10.0.0.2:8000"]));
//! let mut resolver = Resolver::new(provider);
//! assert_eq!(resolver.get_endpoint().unwrap(), "10.0.0.1:8000");
//! assert_eq!(resolver.get_endpoint().unwrap(), "10.0.0.2:8000");
//! ```
//!
//! [`EndpointProvider`]: endpointkit_core::EndpointProvider

pub mod config;
pub mod dns;
pub mod fixed;
pub mod round_robin;

pub use config::ProviderConfig;
pub use dns::{DnsEndpoints, DnsTarget};
pub use fixed::FixedEndpoint;
pub use round_robin::RoundRobinEndpoints;
