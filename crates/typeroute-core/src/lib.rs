//! Typeroute - Type-Keyed Method Routing
//!
//! Picks one method out of a family of type-suffixed methods based on the
//! runtime type name of a value.
//!
//! # Architecture
//!
//! ```text
//! ClassDef (declared methods)
//!     │   describe_NSString, describe_NSNumber, ...
//!     ▼
//! ┌─────────────────────────┐
//! │   construct_routes      │  type tags + marker → RoutingTable
//! └───────────┬─────────────┘
//!             │
//!             ▼
//! ┌─────────────────────────┐
//! │   dispatch / call_routed│  route + key + value → method(receiver, param)
//! └─────────────────────────┘
//! ```
//!
//! # Failure Policy
//!
//! - `dispatch` / `try_call_routed_method` return a `RouteError` on a miss
//! - `call_routed` / `call_routed_method` swallow misses (logged at debug)
//!
//! # Example
//!
//! ```rust
//! use typeroute_core::{ClassDef, MethodRouter};
//!
//! let class = ClassDef::new("Printer")
//!     .method("show_NSString", |out: &mut Vec<String>, p: String| out.push(p))
//!     .method("show_NSNumber", |out: &mut Vec<String>, p: String| out.push(format!("#{}", p)));
//!
//! let mut router = MethodRouter::new();
//! router.construct_routes(&["NSString", "NSNumber"], &class);
//!
//! let mut out = Vec::new();
//! router.call_routed(&mut out, "show", "NSNumber", "NSNumber", "42".to_string());
//! assert_eq!(out, vec!["#42"]);
//! ```

// Core modules
mod class;
mod config;
mod error;
mod types;

// Routers
mod routed;
mod router;
mod shared;

// Re-exports: Error types
pub use error::RouteError;

// Re-exports: Core types
pub use class::{ClassDef, MethodFn};
pub use config::RouterConfig;
pub use types::{RouteEntry, RoutingTable, ScanMode, DEFAULT_ROUTE_MARKER};

// Re-exports: Routers
pub use routed::{RouteMethods, TypeTagged};
pub use router::MethodRouter;
pub use shared::SharedRouter;
