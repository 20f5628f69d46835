//! Shared endpoint accumulator.

use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

use crate::endpoint::Endpoint;

/// Collects endpoints from several call sites before generation.
///
/// Registration order is preserved and is the order operations are built in.
///
/// ```rust
/// use apidoc::{Endpoint, EndpointRegistry, RestMethod};
///
/// let registry = EndpointRegistry::new();
/// registry.register(Endpoint::new(RestMethod::Get, "/health"));
/// registry.register_all([
///     Endpoint::new(RestMethod::Get, "/widgets"),
///     Endpoint::new(RestMethod::Post, "/widgets"),
/// ]);
///
/// assert_eq!(registry.len(), 3);
/// assert_eq!(registry.snapshot()[1].path, "/widgets");
/// ```
#[derive(Debug, Default)]
pub struct EndpointRegistry {
    endpoints: Mutex<Vec<Endpoint>>,
}

impl EndpointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A poisoned lock still holds a consistent list (every mutation is a
    /// single push, extend, or clear), so the guard is recovered.
    fn lock(&self) -> MutexGuard<'_, Vec<Endpoint>> {
        self.endpoints.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn register(&self, endpoint: Endpoint) {
        debug!(method = %endpoint.method, path = %endpoint.path, "Registering endpoint");
        self.lock().push(endpoint);
    }

    pub fn register_all(&self, endpoints: impl IntoIterator<Item = Endpoint>) {
        self.lock().extend(endpoints);
    }

    /// A copy of the registered endpoints, in registration order.
    pub fn snapshot(&self) -> Vec<Endpoint> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::RestMethod;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_empty_registry() {
        let registry = EndpointRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.snapshot().is_empty());
    }

    #[test]
    fn test_clear() {
        let registry = EndpointRegistry::new();
        registry.register(Endpoint::new(RestMethod::Get, "/a"));
        registry.clear();
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_concurrent_registration() {
        let registry = Arc::new(EndpointRegistry::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    registry.register(Endpoint::new(RestMethod::Get, format!("/items/{i}")));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.len(), 8);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let registry = EndpointRegistry::new();
        registry.register(Endpoint::new(RestMethod::Get, "/a"));
        let snapshot = registry.snapshot();
        registry.register(Endpoint::new(RestMethod::Get, "/b"));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(registry.len(), 2);
    }
}
