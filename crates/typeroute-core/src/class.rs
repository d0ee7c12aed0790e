//! Declared classes
//!
//! A `ClassDef` is an explicit list of named single-argument methods on a
//! receiver type `T`. It stands in for runtime reflection: scanning reads
//! `method_names()` (own methods only), while invocation by name resolves
//! through the superclass chain.

use std::fmt;
use std::sync::Arc;

/// A type-erased method taking the receiver and one parameter
pub type MethodFn<T, P> = Arc<dyn Fn(&mut T, P) + Send + Sync>;

struct Method<T, P> {
    name: String,
    func: MethodFn<T, P>,
}

/// A named set of methods with an optional superclass
pub struct ClassDef<T, P> {
    name: String,
    methods: Vec<Method<T, P>>,
    superclass: Option<Arc<ClassDef<T, P>>>,
}

impl<T, P> ClassDef<T, P> {
    /// Create an empty class
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
            superclass: None,
        }
    }

    /// Set the superclass
    pub fn with_superclass(mut self, superclass: Arc<ClassDef<T, P>>) -> Self {
        self.superclass = Some(superclass);
        self
    }

    /// Add a method (builder form)
    pub fn method<F>(mut self, name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&mut T, P) + Send + Sync + 'static,
    {
        self.add_method(name, func);
        self
    }

    /// Add a method, replacing the body of an existing one with the same name.
    ///
    /// Returns true when the name was new to this class.
    pub fn add_method<F>(&mut self, name: impl Into<String>, func: F) -> bool
    where
        F: Fn(&mut T, P) + Send + Sync + 'static,
    {
        let name = name.into();
        let func: MethodFn<T, P> = Arc::new(func);

        if let Some(existing) = self.methods.iter_mut().find(|m| m.name == name) {
            existing.func = func;
            return false;
        }
        self.methods.push(Method { name, func });
        true
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn superclass(&self) -> Option<&Arc<ClassDef<T, P>>> {
        self.superclass.as_ref()
    }

    /// Names of the methods declared directly on this class, in declaration order
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.iter().map(|m| m.name.as_str())
    }

    /// Resolve a method by name, searching this class before its ancestors
    pub fn lookup(&self, name: &str) -> Option<&MethodFn<T, P>> {
        let mut class = Some(self);
        while let Some(current) = class {
            if let Some(method) = current.methods.iter().find(|m| m.name == name) {
                return Some(&method.func);
            }
            class = current.superclass.as_deref();
        }
        None
    }

    /// Whether a method with this name is invocable on instances of the class
    pub fn responds_to(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Every method visible on the class, own methods shadowing inherited ones
    pub(crate) fn visible_methods(&self) -> Vec<(&str, &MethodFn<T, P>)> {
        let mut visible: Vec<(&str, &MethodFn<T, P>)> = Vec::new();
        let mut class = Some(self);
        while let Some(current) = class {
            for method in &current.methods {
                if !visible.iter().any(|(name, _)| *name == method.name) {
                    visible.push((method.name.as_str(), &method.func));
                }
            }
            class = current.superclass.as_deref();
        }
        visible
    }

    /// Number of methods declared directly on this class
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl<T, P> fmt::Debug for ClassDef<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDef")
            .field("name", &self.name)
            .field("methods", &self.method_names().collect::<Vec<_>>())
            .field("superclass", &self.superclass.as_ref().map(|s| s.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Log = Vec<String>;

    fn base() -> Arc<ClassDef<Log, &'static str>> {
        Arc::new(
            ClassDef::new("Base")
                .method("greet_String", |log: &mut Log, p: &'static str| log.push(format!("base:{}", p)))
                .method("inherited_String", |log: &mut Log, p: &'static str| log.push(format!("inherited:{}", p))),
        )
    }

    #[test]
    fn test_method_names_are_own_only() {
        let class = ClassDef::new("Child")
            .with_superclass(base())
            .method("greet_String", |log: &mut Log, p| log.push(format!("child:{}", p)));

        let names: Vec<_> = class.method_names().collect();
        assert_eq!(names, vec!["greet_String"]);
        assert!(class.responds_to("inherited_String"));
        assert!(!class.responds_to("missing"));
    }

    #[test]
    fn test_lookup_prefers_own_method() {
        let class = ClassDef::new("Child")
            .with_superclass(base())
            .method("greet_String", |log: &mut Log, p| log.push(format!("child:{}", p)));

        let mut log = Log::new();
        let method = class.lookup("greet_String").unwrap().clone();
        method(&mut log, "hi");
        assert_eq!(log, vec!["child:hi"]);
    }

    #[test]
    fn test_add_method_replaces_body() {
        let mut class: ClassDef<Log, &'static str> = ClassDef::new("Replace");
        assert!(class.add_method("run_String", |log: &mut Log, _| log.push("old".into())));
        assert!(!class.add_method("run_String", |log: &mut Log, _| log.push("new".into())));
        assert_eq!(class.len(), 1);

        let mut log = Log::new();
        (class.lookup("run_String").unwrap())(&mut log, "x");
        assert_eq!(log, vec!["new"]);
    }

    #[test]
    fn test_visible_methods_shadowing() {
        let class = ClassDef::new("Child")
            .with_superclass(base())
            .method("greet_String", |_: &mut Log, _| {});

        let visible: Vec<_> = class.visible_methods().into_iter().map(|(n, _)| n).collect();
        assert_eq!(visible, vec!["greet_String", "inherited_String"]);
    }
}
