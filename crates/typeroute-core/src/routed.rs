//! Receivers that carry their own router
//!
//! `RouteMethods` is implemented by a type that owns a `MethodRouter` over
//! itself. The routing state then lives exactly as long as the receiver, and
//! routed calls land on the receiver that made them.

use std::borrow::Cow;

use crate::class::ClassDef;
use crate::error::RouteError;
use crate::router::{invoke, log_dropped, MethodRouter};
use crate::types::RoutingTable;

/// Extension trait for receivers embedding a `MethodRouter`
pub trait RouteMethods: Sized {
    /// Parameter type passed to routed methods
    type Param;

    fn method_router(&self) -> &MethodRouter<Self, Self::Param>;

    fn method_router_mut(&mut self) -> &mut MethodRouter<Self, Self::Param>;

    fn route_marker(&self) -> &str {
        self.method_router().marker()
    }

    fn set_route_marker(&mut self, marker: impl Into<String>) {
        self.method_router_mut().set_marker(marker);
    }

    /// Copy of the receiver's routing table
    fn methods_for_routing(&self) -> RoutingTable {
        self.method_router().methods_for_routing()
    }

    /// Index the routed methods of `class` for the given type tags
    fn construct_methods_list_for_routing<S: AsRef<str>>(
        &mut self,
        type_tags: &[S],
        class: &ClassDef<Self, Self::Param>,
    ) -> usize {
        self.method_router_mut().construct_routes(type_tags, class)
    }

    /// Invoke the routed method on `self`, reporting why nothing ran on a miss
    fn try_call_routed_method(
        &mut self,
        route_name: &str,
        type_key: &str,
        type_value: &str,
        param: Self::Param,
    ) -> Result<(), RouteError> {
        let (selector, method) = self.method_router().resolve(route_name, type_key, type_value)?;
        invoke(&selector, &method, self, param);
        Ok(())
    }

    /// Invoke the routed method on `self`; misses do nothing
    fn call_routed_method(
        &mut self,
        route_name: &str,
        type_key: &str,
        type_value: &str,
        param: Self::Param,
    ) {
        if let Err(e) = self.try_call_routed_method(route_name, type_key, type_value, param) {
            log_dropped(route_name, type_key, type_value, &e);
        }
    }
}

/// Runtime type name of a value, used as the type value of a routed call
pub trait TypeTagged {
    fn type_tag(&self) -> Cow<'_, str>;
}

macro_rules! impl_type_tag {
    ($($ty:ty => $tag:literal),* $(,)?) => {
        $(
            impl TypeTagged for $ty {
                fn type_tag(&self) -> Cow<'_, str> {
                    Cow::Borrowed($tag)
                }
            }
        )*
    };
}

impl_type_tag!(
    String => "String",
    str => "str",
    bool => "bool",
    char => "char",
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    i128 => "i128",
    isize => "isize",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    u128 => "u128",
    usize => "usize",
    f32 => "f32",
    f64 => "f64",
);

impl<T> TypeTagged for Vec<T> {
    fn type_tag(&self) -> Cow<'_, str> {
        Cow::Borrowed("Vec")
    }
}

/// `Some` takes the tag of its content
impl<T: TypeTagged> TypeTagged for Option<T> {
    fn type_tag(&self) -> Cow<'_, str> {
        match self {
            Some(value) => value.type_tag(),
            None => Cow::Borrowed("None"),
        }
    }
}

impl<T: TypeTagged + ?Sized> TypeTagged for &T {
    fn type_tag(&self) -> Cow<'_, str> {
        (**self).type_tag()
    }
}

impl<T: TypeTagged + ?Sized> TypeTagged for Box<T> {
    fn type_tag(&self) -> Cow<'_, str> {
        (**self).type_tag()
    }
}

/// JSON values are tagged by kind
impl TypeTagged for serde_json::Value {
    fn type_tag(&self) -> Cow<'_, str> {
        use serde_json::Value;

        Cow::Borrowed(match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
        })
    }
}
