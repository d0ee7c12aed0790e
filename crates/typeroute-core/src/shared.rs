//! Shared router
//!
//! Wraps a `MethodRouter` in `Arc<RwLock<_>>` so several owners or threads can
//! scan and dispatch through one table. Scans take the write lock. Dispatch
//! resolves under the read lock and runs the method after releasing it, so a
//! method may call back into the router.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::class::ClassDef;
use crate::config::RouterConfig;
use crate::error::RouteError;
use crate::router::{invoke, log_dropped, MethodRouter};
use crate::types::{RoutingTable, ScanMode};

/// Thread-safe handle to a method router
pub struct SharedRouter<T, P> {
    inner: Arc<RwLock<MethodRouter<T, P>>>,
}

impl<T, P> SharedRouter<T, P> {
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    pub fn with_config(config: RouterConfig) -> Self {
        Self::from_router(MethodRouter::with_config(config))
    }

    pub fn from_router(router: MethodRouter<T, P>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(router)),
        }
    }

    pub fn marker(&self) -> String {
        self.inner.read().marker().to_string()
    }

    pub fn set_marker(&self, marker: impl Into<String>) {
        self.inner.write().set_marker(marker);
    }

    pub fn scan_mode(&self) -> ScanMode {
        self.inner.read().scan_mode()
    }

    /// Set the scan mode used by subsequent scans
    pub fn set_scan_mode(&self, mode: ScanMode) {
        self.inner.write().set_scan_mode(mode);
    }

    /// Snapshot of the routing table
    pub fn methods_for_routing(&self) -> RoutingTable {
        self.inner.read().methods_for_routing()
    }

    pub fn reset(&self) {
        self.inner.write().reset();
    }

    pub fn construct_routes<S: AsRef<str>>(&self, type_tags: &[S], class: &ClassDef<T, P>) -> usize {
        self.inner.write().construct_routes(type_tags, class)
    }

    pub fn dispatch(
        &self,
        receiver: &mut T,
        route_name: &str,
        type_key: &str,
        type_value: &str,
        param: P,
    ) -> Result<(), RouteError> {
        let (selector, method) = self.inner.read().resolve(route_name, type_key, type_value)?;
        invoke(&selector, &method, receiver, param);
        Ok(())
    }

    /// Best-effort dispatch: misses are logged and otherwise ignored
    pub fn call_routed(
        &self,
        receiver: &mut T,
        route_name: &str,
        type_key: &str,
        type_value: &str,
        param: P,
    ) {
        if let Err(e) = self.dispatch(receiver, route_name, type_key, type_value, param) {
            log_dropped(route_name, type_key, type_value, &e);
        }
    }
}

impl<T, P> Clone for SharedRouter<T, P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, P> Default for SharedRouter<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[derive(Default)]
    struct Counter {
        total: i64,
    }

    fn counter_class() -> ClassDef<Counter, i64> {
        ClassDef::new("Counter")
            .method("add_i64", |c: &mut Counter, n: i64| c.total += n)
            .method("sub_i64", |c: &mut Counter, n: i64| c.total -= n)
    }

    #[test]
    fn test_clones_share_table() {
        let router = SharedRouter::new();
        let other = router.clone();
        router.construct_routes(&["i64"], &counter_class());

        assert!(other.methods_for_routing().contains_key("i64"));
        other.reset();
        assert!(router.methods_for_routing().is_empty());
    }

    #[test]
    fn test_marker_and_scan_mode() {
        let router = SharedRouter::new();
        assert_eq!(router.marker(), "_");
        assert_eq!(router.scan_mode(), ScanMode::Replace);

        let class = ClassDef::new("Verbose")
            .method("addWithi64", |c: &mut Counter, n: i64| c.total += n)
            .method("mul_u8", |c: &mut Counter, n: i64| c.total *= n);
        router.set_marker("With");
        router.set_scan_mode(ScanMode::Accumulate);
        router.construct_routes(&["i64"], &class);
        router.construct_routes(&["i64"], &counter_class());

        // Accumulate keeps the first scan's methods; the marker applies to both scans
        let mut counter = Counter::default();
        router.dispatch(&mut counter, "add", "i64", "i64", 5).unwrap();
        assert_eq!(counter.total, 5);
        assert_eq!(router.marker(), "With");
        assert_eq!(router.scan_mode(), ScanMode::Accumulate);
        assert_eq!(router.methods_for_routing().len(), 1);
    }

    #[test]
    fn test_dispatch_across_threads() {
        let router = SharedRouter::new();
        router.construct_routes(&["i64"], &counter_class());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let router = router.clone();
                thread::spawn(move || {
                    let mut counter = Counter::default();
                    for _ in 0..10 {
                        router.dispatch(&mut counter, "add", "i64", "i64", 2).unwrap();
                    }
                    counter.total
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 20);
        }
    }

    #[test]
    fn test_method_can_reenter_router() {
        struct Relay {
            router: SharedRouter<Relay, i64>,
            seen: Vec<i64>,
        }

        let router: SharedRouter<Relay, i64> = SharedRouter::new();
        let class = ClassDef::new("Relay")
            .method("forward_i64", |r: &mut Relay, n: i64| {
                let router = r.router.clone();
                router.call_routed(r, "record", "i64", "i64", n * 10);
            })
            .method("record_i64", |r: &mut Relay, n: i64| r.seen.push(n));
        router.construct_routes(&["i64"], &class);

        let mut relay = Relay { router: router.clone(), seen: vec![] };
        router.dispatch(&mut relay, "forward", "i64", "i64", 4).unwrap();
        assert_eq!(relay.seen, vec![40]);
    }
}
