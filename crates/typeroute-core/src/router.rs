//! Method Router
//!
//! Indexes a class's suffix-tagged methods by type key and dispatches calls by
//! rebuilding the method name from a route name and a type value.
//!
//! # Naming Scheme
//!
//! ```text
//! describe  _  NSString
//! └──┬───┘ └┬┘ └──┬───┘
//! base name marker type suffix
//! ```
//!
//! A scan with tags `["NSString", "NSNumber"]` records every own method of the
//! class ending in `marker + tag` under the key `tag`. A dispatch with route
//! `describe`, key `NSString` and value `NSString` invokes `describe_NSString`.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::class::{ClassDef, MethodFn};
use crate::config::RouterConfig;
use crate::error::RouteError;
use crate::routed::TypeTagged;
use crate::types::{RoutingTable, ScanMode};

/// Strip `marker + tag` from the end of `name`, yielding the base name
fn strip_route_suffix<'a>(name: &'a str, marker: &str, tag: &str) -> Option<&'a str> {
    name.strip_suffix(tag)?.strip_suffix(marker)
}

/// Run a resolved method on `receiver`
pub(crate) fn invoke<T, P>(selector: &str, method: &MethodFn<T, P>, receiver: &mut T, param: P) {
    trace!(method = selector, "Dispatching routed call");
    method(receiver, param);
}

/// Log a routed call that best-effort dispatch dropped
pub(crate) fn log_dropped(route_name: &str, type_key: &str, type_value: &str, error: &RouteError) {
    debug!(route = route_name, type_key, type_value, error = %error, "Routed call dropped");
}

/// Type-keyed method router
pub struct MethodRouter<T, P> {
    marker: String,
    scan_mode: ScanMode,
    table: RoutingTable,
    /// Methods invocable by full name, collected from scanned class chains
    methods: HashMap<String, MethodFn<T, P>>,
}

impl<T, P> MethodRouter<T, P> {
    /// Create with the default config (`_` marker, replacing scans)
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    /// Create with custom config
    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            marker: config.marker,
            scan_mode: config.scan_mode,
            table: RoutingTable::new(),
            methods: HashMap::new(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Set the route marker. Takes effect for subsequent scans and dispatches.
    pub fn set_marker(&mut self, marker: impl Into<String>) {
        self.marker = marker.into();
    }

    pub fn scan_mode(&self) -> ScanMode {
        self.scan_mode
    }

    pub fn set_scan_mode(&mut self, mode: ScanMode) {
        self.scan_mode = mode;
    }

    /// Borrow the routing table
    pub fn table(&self) -> &RoutingTable {
        &self.table
    }

    /// Copy of the routing table
    pub fn methods_for_routing(&self) -> RoutingTable {
        self.table.clone()
    }

    /// Whether a method with this full name was collected by a scan
    pub fn responds_to(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Drop every routing entry and collected method
    pub fn reset(&mut self) {
        self.table.clear();
        self.methods.clear();
    }

    /// Scan the methods declared directly on `class` and index those whose
    /// name ends with `marker + tag` for one of `type_tags`.
    ///
    /// Empty tags are skipped. Returns the number of (method, tag) matches.
    pub fn construct_routes<S: AsRef<str>>(&mut self, type_tags: &[S], class: &ClassDef<T, P>) -> usize {
        if self.scan_mode == ScanMode::Replace {
            self.reset();
        }

        let mut matched = 0;
        for name in class.method_names() {
            for tag in type_tags {
                let tag: &str = tag.as_ref();
                if tag.is_empty() {
                    continue;
                }
                let Some(base_name) = strip_route_suffix(name, &self.marker, tag) else {
                    continue;
                };
                self.table.record(tag, base_name);
                matched += 1;
                trace!(method = name, tag, base_name, "Indexed routed method");
            }
        }

        for (name, method) in class.visible_methods() {
            self.methods.insert(name.to_string(), Arc::clone(method));
        }

        debug!(
            class = class.name(),
            matched,
            keys = self.table.len(),
            mode = %self.scan_mode,
            "Constructed routing table"
        );
        matched
    }

    /// Resolve the method a routed call would invoke
    pub fn resolve(
        &self,
        route_name: &str,
        type_key: &str,
        type_value: &str,
    ) -> Result<(String, MethodFn<T, P>), RouteError> {
        let entry = self
            .table
            .get(type_key)
            .ok_or_else(|| RouteError::UnknownKey(type_key.to_string()))?;

        if !entry.contains_suffix(type_value) {
            return Err(RouteError::UnknownVariant {
                key: type_key.to_string(),
                value: type_value.to_string(),
            });
        }

        let selector = format!("{}{}{}", route_name, self.marker, type_value);
        match self.methods.get(&selector) {
            Some(method) => Ok((selector, Arc::clone(method))),
            None => Err(RouteError::MethodNotFound(selector)),
        }
    }

    /// Invoke `route_name + marker + type_value` on `receiver` with `param`
    pub fn dispatch(
        &self,
        receiver: &mut T,
        route_name: &str,
        type_key: &str,
        type_value: &str,
        param: P,
    ) -> Result<(), RouteError> {
        let (selector, method) = self.resolve(route_name, type_key, type_value)?;
        invoke(&selector, &method, receiver, param);
        Ok(())
    }

    /// Like `dispatch`, with the type value taken from the parameter itself
    pub fn dispatch_tagged(
        &self,
        receiver: &mut T,
        route_name: &str,
        type_key: &str,
        param: P,
    ) -> Result<(), RouteError>
    where
        P: TypeTagged,
    {
        let type_value = param.type_tag().into_owned();
        self.dispatch(receiver, route_name, type_key, &type_value, param)
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

impl<T, P> Default for MethodRouter<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P> Clone for MethodRouter<T, P> {
    fn clone(&self) -> Self {
        Self {
            marker: self.marker.clone(),
            scan_mode: self.scan_mode,
            table: self.table.clone(),
            methods: self.methods.clone(),
        }
    }
}

impl<T, P> fmt::Debug for MethodRouter<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<_> = self.methods.keys().collect();
        methods.sort();
        f.debug_struct("MethodRouter")
            .field("marker", &self.marker)
            .field("scan_mode", &self.scan_mode)
            .field("table", &self.table)
            .field("methods", &methods)
            .finish()
    }
}
