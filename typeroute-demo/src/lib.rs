//! Typeroute Demo - JSON value describer
//!
//! The describer routes each JSON value to a `describe` method picked by the
//! value's kind:
//! - `describe_String`, `describe_Number`, `describe_Array`, `describe_Object`
//! - `Null` and `Bool` have no method and are skipped

use serde_json::Value;
use tracing::info;
use typeroute_core::{ClassDef, MethodRouter, RouteMethods, RouterConfig, TypeTagged};

/// Type tags the describer routes on
pub const JSON_KINDS: [&str; 4] = ["String", "Number", "Array", "Object"];

/// Collects one line per routed value
pub struct Describer {
    lines: Vec<String>,
    router: MethodRouter<Describer, Value>,
}

impl Describer {
    /// Create a describer and index its methods
    pub fn new(config: RouterConfig) -> Self {
        let mut describer = Self {
            lines: Vec::new(),
            router: MethodRouter::with_config(config),
        };

        let class = Self::class(describer.route_marker());
        let matched = describer.construct_methods_list_for_routing(&JSON_KINDS, &class);
        info!(
            marker = %describer.route_marker(),
            matched,
            "Creating describer"
        );

        describer
    }

    /// Method declarations, named with the configured marker
    fn class(marker: &str) -> ClassDef<Describer, Value> {
        ClassDef::new("Describer")
            .method(format!("describe{}String", marker), |d: &mut Describer, v: Value| {
                let text = v.as_str().unwrap_or_default();
                d.lines.push(format!("text of {} chars", text.chars().count()));
            })
            .method(format!("describe{}Number", marker), |d: &mut Describer, v: Value| {
                d.lines.push(format!("number {}", v));
            })
            .method(format!("describe{}Array", marker), |d: &mut Describer, v: Value| {
                let len = v.as_array().map(Vec::len).unwrap_or_default();
                d.lines.push(format!("list of {} items", len));
            })
            .method(format!("describe{}Object", marker), |d: &mut Describer, v: Value| {
                let keys: Vec<_> = v
                    .as_object()
                    .map(|o| o.keys().cloned().collect())
                    .unwrap_or_default();
                d.lines.push(format!("object with keys [{}]", keys.join(", ")));
            })
    }

    /// Route `value` by its kind; kinds without a method are ignored
    pub fn describe(&mut self, value: Value) {
        let kind = value.type_tag().into_owned();
        self.call_routed_method("describe", &kind, &kind, value);
    }

    /// Lines produced so far
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl RouteMethods for Describer {
    type Param = Value;

    fn method_router(&self) -> &MethodRouter<Self, Value> {
        &self.router
    }

    fn method_router_mut(&mut self) -> &mut MethodRouter<Self, Value> {
        &mut self.router
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_describer_routes_by_kind() {
        let mut describer = Describer::new(RouterConfig::default());
        describer.describe(json!("héllo"));
        describer.describe(json!(12));
        describer.describe(json!(null));
        describer.describe(json!([1, 2, 3]));
        describer.describe(json!({"a": 1, "b": 2}));

        assert_eq!(
            describer.lines(),
            &[
                "text of 5 chars".to_string(),
                "number 12".to_string(),
                "list of 3 items".to_string(),
                "object with keys [a, b]".to_string(),
            ]
        );
    }

    #[test]
    fn test_describer_with_custom_marker() {
        let mut describer = Describer::new(RouterConfig::with_marker("For"));
        assert!(describer.methods_for_routing().contains_key("Number"));

        describer.describe(json!(1.5));
        assert_eq!(describer.lines(), &["number 1.5".to_string()]);
    }
}
