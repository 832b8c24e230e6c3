//! Behavioural tests for `Resolver` against scripted providers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use endpointkit_core::{
    EndpointProvider, ProviderError, ResolveError, Resolver, ResolverConfig, SharedResolver,
    DEFAULT_MAX_ATTEMPTS,
};

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// Cycles through `addresses` forever and counts calls.
struct Cycle {
    addresses: Vec<&'static str>,
    pool: usize,
    cursor: AtomicUsize,
}

impl Cycle {
    fn new(pool: usize, addresses: &[&'static str]) -> Arc<Self> {
        Arc::new(Self {
            addresses: addresses.to_vec(),
            pool,
            cursor: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.cursor.load(Ordering::SeqCst)
    }
}

impl EndpointProvider for Cycle {
    fn next_address(&self) -> Result<String, ProviderError> {
        let i = self.cursor.fetch_add(1, Ordering::SeqCst);
        Ok(self.addresses[i % self.addresses.len()].to_string())
    }

    fn pool_size(&self) -> Result<usize, ProviderError> {
        Ok(self.pool)
    }

    fn name(&self) -> &str {
        "cycle"
    }
}

/// Returns whatever the test pushes; `Err` once drained.
struct Queue {
    items: Mutex<Vec<Result<String, ProviderError>>>,
    pool: Result<usize, ProviderError>,
    calls: AtomicUsize,
}

impl Queue {
    fn new(
        pool: Result<usize, ProviderError>,
        mut items: Vec<Result<String, ProviderError>>,
    ) -> Arc<Self> {
        items.reverse();
        Arc::new(Self {
            items: Mutex::new(items),
            pool,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl EndpointProvider for Queue {
    fn next_address(&self) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.items
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(ProviderError::Other("queue drained".into())))
    }

    fn pool_size(&self) -> Result<usize, ProviderError> {
        self.pool.clone()
    }
}

fn ok(s: &str) -> Result<String, ProviderError> {
    Ok(s.to_string())
}

// ─── Single-address pools ─────────────────────────────────────────────────────

#[test]
fn static_address_returned_every_call_on_first_attempt() {
    let provider = Cycle::new(1, &["localhost:8000"]);
    let mut resolver = Resolver::new(provider.clone());
    for n in 1..=100 {
        assert_eq!(resolver.get_endpoint().unwrap(), "localhost:8000");
        assert_eq!(provider.calls(), n);
    }
}

#[test]
fn zero_pool_is_exempt_from_freshness_check() {
    let provider = Cycle::new(0, &["a:1"]);
    let mut resolver = Resolver::new(provider);
    assert_eq!(resolver.get_endpoint().unwrap(), "a:1");
    assert_eq!(resolver.get_endpoint().unwrap(), "a:1");
}

// ─── Rotating pools ───────────────────────────────────────────────────────────

#[test]
fn alternating_provider_never_repeats() {
    let provider = Cycle::new(2, &["a:1", "b:2"]);
    let mut resolver = Resolver::new(provider.clone());
    let mut previous = String::new();
    for _ in 0..50 {
        let endpoint = resolver.get_endpoint().unwrap();
        assert_ne!(endpoint, previous);
        previous = endpoint;
    }
    assert_eq!(provider.calls(), 50);
}

#[test]
fn retries_past_adjacent_repeats() {
    let provider = Cycle::new(3, &["A", "A", "A", "B", "A", "B", "B"]);
    let mut resolver = Resolver::new(provider.clone());
    assert_eq!(resolver.get_endpoint().unwrap(), "A");
    assert_eq!(resolver.get_endpoint().unwrap(), "B");
    assert_eq!(provider.calls(), 4);
    assert_eq!(resolver.get_endpoint().unwrap(), "A");
    assert_eq!(resolver.get_endpoint().unwrap(), "B");
    assert_eq!(resolver.last_result(), "B");
}

#[test]
fn path_is_passed_through_untouched() {
    let provider = Cycle::new(2, &["10.0.0.1:8000/v2/models", "10.0.0.2:8000/v2/models"]);
    let mut resolver = Resolver::new(provider);
    assert_eq!(resolver.get_endpoint().unwrap(), "10.0.0.1:8000/v2/models");
    assert_eq!(resolver.get_endpoint().unwrap(), "10.0.0.2:8000/v2/models");
}

// ─── Exhaustion ───────────────────────────────────────────────────────────────

#[test]
fn stuck_provider_exhausts_after_exact_budget_every_call() {
    let provider = Cycle::new(2, &["A"]);
    let mut resolver = Resolver::new(provider.clone());
    assert_eq!(resolver.get_endpoint().unwrap(), "A");
    assert_eq!(provider.calls(), 1);

    for round in 1..=3 {
        let err = resolver.get_endpoint().unwrap_err();
        assert_eq!(
            err,
            ResolveError::ResolutionExhausted {
                attempts: DEFAULT_MAX_ATTEMPTS
            }
        );
        assert_eq!(provider.calls(), 1 + round * DEFAULT_MAX_ATTEMPTS as usize);
        assert_eq!(resolver.last_result(), "A");
    }
}

#[test]
fn configured_budget_is_honoured() {
    let provider = Cycle::new(5, &["A"]);
    let mut resolver =
        Resolver::with_config(provider.clone(), ResolverConfig { max_attempts: 2 }).unwrap();
    resolver.get_endpoint().unwrap();
    assert!(resolver.get_endpoint().unwrap_err().is_exhausted());
    assert_eq!(provider.calls(), 3);
}

#[test]
fn recovers_after_exhaustion_when_provider_moves_on() {
    let mut script = vec![ok("A")];
    script.extend((0..10).map(|_| ok("A")));
    script.push(ok("B"));
    let provider = Queue::new(Ok(2), script);
    let mut resolver = Resolver::new(provider.clone());

    assert_eq!(resolver.get_endpoint().unwrap(), "A");
    assert!(resolver.get_endpoint().unwrap_err().is_exhausted());
    assert_eq!(resolver.get_endpoint().unwrap(), "B");
    assert_eq!(provider.calls(), 12);
}

// ─── Invalid provider output ──────────────────────────────────────────────────

#[test]
fn empty_address_fails_immediately() {
    let provider = Queue::new(Ok(3), vec![ok(""), ok("A")]);
    let mut resolver = Resolver::new(provider.clone());
    let err = resolver.get_endpoint().unwrap_err();
    assert!(err.is_provider_fault());
    assert!(matches!(
        err,
        ResolveError::InvalidProviderOutput {
            source: ProviderError::EmptyAddress,
            ..
        }
    ));
    assert_eq!(provider.calls(), 1);
    assert_eq!(resolver.last_result(), "");
}

#[test]
fn empty_address_after_repeats_stops_retrying() {
    let provider = Queue::new(Ok(3), vec![ok("A"), ok("A"), ok(""), ok("B")]);
    let mut resolver = Resolver::new(provider.clone());
    resolver.get_endpoint().unwrap();
    assert!(resolver.get_endpoint().unwrap_err().is_provider_fault());
    assert_eq!(provider.calls(), 3);
    assert_eq!(resolver.last_result(), "A");
}

#[test]
fn provider_error_is_surfaced_not_retried() {
    let provider = Queue::new(
        Ok(2),
        vec![Err(ProviderError::Discovery("registry down".into())), ok("A")],
    );
    let mut resolver = Resolver::new(provider.clone());
    let err = resolver.get_endpoint().unwrap_err();
    assert_eq!(
        err,
        ResolveError::InvalidProviderOutput {
            provider: "provider".into(),
            source: ProviderError::Discovery("registry down".into()),
        }
    );
    assert_eq!(provider.calls(), 1);
}

#[test]
fn pool_size_failure_is_provider_fault() {
    let provider = Queue::new(Err(ProviderError::EmptyPool), vec![ok("A"), ok("A")]);
    let mut resolver = Resolver::new(provider.clone());
    // First candidate differs from "", so pool size is not consulted.
    assert_eq!(resolver.get_endpoint().unwrap(), "A");
    let err = resolver.get_endpoint().unwrap_err();
    assert!(matches!(
        err,
        ResolveError::InvalidProviderOutput {
            source: ProviderError::EmptyPool,
            ..
        }
    ));
    assert_eq!(provider.calls(), 2);
}

// ─── Concurrency ──────────────────────────────────────────────────────────────

#[test]
fn shared_resolver_serializes_concurrent_callers() {
    let provider = Cycle::new(2, &["a:1", "b:2"]);
    let shared = SharedResolver::new(Resolver::new(provider.clone()));

    std::thread::scope(|s| {
        for _ in 0..8 {
            let shared = shared.clone();
            s.spawn(move || {
                for _ in 0..100 {
                    shared.get_endpoint().unwrap();
                }
            });
        }
    });

    // Every call was accepted on its first attempt: no caller observed a
    // stale `last_result`.
    assert_eq!(provider.calls(), 800);
}
