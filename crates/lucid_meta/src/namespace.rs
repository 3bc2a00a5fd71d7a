//! # Namespace Registrar
//!
//! Installs values at dotted paths (`"LUCID.math"`) inside a global object,
//! creating the intermediate objects on demand.
//!
//! ```rust,ignore
//! let global = GlobalObject::with_alias("window");
//!
//! let lucid = global.define_once("LUCID", || PropertyBag::new().into())?;
//! let again = global.define_once("window.LUCID", || unreachable!())?;
//! assert_eq!(lucid, again);
//! ```
//!
//! ## Rules
//!
//! 1. Existing nodes are reused, never replaced. Only `Undefined` and `Null`
//!    nodes are filled with a fresh object; any other non-object node,
//!    including `0`, `false` and `""`, is a `NotAnObject` error rather than
//!    being silently overwritten.
//! 2. The factory runs only when the leaf is unassigned.
//! 3. The root itself is never reassigned: when the global object carries a
//!    self-alias, that segment resolves to the root.
//!
//! ## Thread Safety
//!
//! Objects are lock-protected, but the check-then-create step is not atomic.
//! Register namespaces from a single initializer thread.

use std::fmt;
use std::str::FromStr;

use crate::error::{MetaError, MetaResult};
use crate::object::{ObjectRef, PropertyBag, WeakObjectRef};
use crate::value::Value;

/// A parsed dotted path. The leaf segment is never empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NamespacePath {
    segments: Vec<String>,
}

impl NamespacePath {
    /// Splits `path` on `.`.
    ///
    /// # Errors
    ///
    /// `InvalidNamespace` if the last segment is empty.
    pub fn parse(path: &str) -> MetaResult<Self> {
        let segments: Vec<String> = path.split('.').map(str::to_owned).collect();

        if segments.last().map_or(true, String::is_empty) {
            return Err(MetaError::InvalidNamespace {
                path: path.to_owned(),
            });
        }

        Ok(Self { segments })
    }

    /// The segment the value is stored under.
    #[must_use]
    pub fn leaf(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }

    /// Every segment before the leaf.
    #[must_use]
    pub fn nodes(&self) -> &[String] {
        &self.segments[..self.segments.len() - 1]
    }

    /// All segments, leaf included.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl FromStr for NamespacePath {
    type Err = MetaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for NamespacePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// The host's global object.
#[derive(Clone, Debug, Default)]
pub struct GlobalObject {
    root: ObjectRef,
    alias: Option<String>,
}

impl GlobalObject {
    /// Creates an empty global object with no self-alias.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty global object that refers to itself as `alias`.
    #[must_use]
    pub fn with_alias(alias: impl Into<String>) -> Self {
        Self {
            root: ObjectRef::default(),
            alias: Some(alias.into()),
        }
    }

    /// Wraps an existing root object.
    #[must_use]
    pub fn from_root(root: ObjectRef, alias: Option<String>) -> Self {
        Self { root, alias }
    }

    /// The root object.
    #[must_use]
    pub const fn root(&self) -> &ObjectRef {
        &self.root
    }

    /// The root's self-alias, if any.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// A non-owning handle, for functions stored inside the global itself.
    #[must_use]
    pub fn downgrade(&self) -> WeakGlobal {
        WeakGlobal {
            root: self.root.downgrade(),
            alias: self.alias.clone(),
        }
    }

    fn is_self_reference(&self, context: &ObjectRef, segment: &str) -> bool {
        self.alias.as_deref() == Some(segment) && context.ptr_eq(&self.root)
    }

    /// Ensures a value exists at `path`, building it with `factory` if needed.
    ///
    /// Returns the value stored at the leaf: the existing one, or the
    /// factory's result.
    ///
    /// # Errors
    ///
    /// - `InvalidNamespace` if the leaf segment is empty.
    /// - `NotAnObject` if a node segment holds a non-object value.
    pub fn define_once<F>(&self, path: &str, factory: F) -> MetaResult<Value>
    where
        F: FnOnce() -> Value,
    {
        self.try_define_once(path, || Ok(factory()))
    }

    /// Like [`define_once`](Self::define_once), with a fallible factory.
    pub fn try_define_once<F>(&self, path: &str, factory: F) -> MetaResult<Value>
    where
        F: FnOnce() -> MetaResult<Value>,
    {
        let path = NamespacePath::parse(path)?;
        let context = self.descend(&path)?;
        let leaf = path.leaf();

        if self.is_self_reference(&context, leaf) {
            return Ok(Value::Object(self.root.clone()));
        }

        let current = context.get(leaf)?;
        if current.is_assigned() {
            tracing::debug!("namespace {} already defined, reusing", path);
            return Ok(current);
        }

        context.set(leaf, factory()?)?;
        tracing::debug!("namespace {} defined", path);

        context.get(leaf)
    }

    /// Ensures an object exists at `path`, building it with `factory` if needed.
    ///
    /// # Errors
    ///
    /// As [`try_define_once`](Self::try_define_once), plus `NotAnObject` if
    /// the leaf already holds something other than an object.
    pub fn define_object_once<F>(&self, path: &str, factory: F) -> MetaResult<ObjectRef>
    where
        F: FnOnce() -> MetaResult<PropertyBag>,
    {
        let value = self.try_define_once(path, || factory().map(Value::from))?;

        match value {
            Value::Object(object) => Ok(object),
            other => Err(MetaError::NotAnObject {
                segment: NamespacePath::parse(path)?.leaf().to_owned(),
                path: path.to_owned(),
                found: other.type_name(),
            }),
        }
    }

    /// Reads the value at `path` without creating anything.
    ///
    /// Missing nodes, and nodes that are not objects, read as `Undefined`.
    pub fn resolve(&self, path: &str) -> MetaResult<Value> {
        let path = NamespacePath::parse(path)?;
        let mut context = self.root.clone();

        for segment in path.nodes() {
            if self.is_self_reference(&context, segment) {
                continue;
            }
            match context.get(segment)? {
                Value::Object(node) => context = node,
                _ => return Ok(Value::Undefined),
            }
        }

        if self.is_self_reference(&context, path.leaf()) {
            return Ok(Value::Object(self.root.clone()));
        }
        context.get(path.leaf())
    }

    /// Walks the node segments of `path`, creating empty objects where nothing
    /// is assigned.
    fn descend(&self, path: &NamespacePath) -> MetaResult<ObjectRef> {
        let mut context = self.root.clone();

        for segment in path.nodes() {
            if self.is_self_reference(&context, segment) {
                continue;
            }

            context = match context.get(segment)? {
                Value::Object(node) => node,
                value if value.is_assigned() => {
                    return Err(MetaError::NotAnObject {
                        segment: segment.clone(),
                        path: path.to_string(),
                        found: value.type_name(),
                    });
                }
                _ => {
                    let node = ObjectRef::default();
                    context.set(segment, node.clone())?;
                    tracing::debug!("namespace node {} created for {}", segment, path);
                    node
                }
            };
        }

        Ok(context)
    }
}

/// Weak counterpart of [`GlobalObject`].
#[derive(Clone, Debug, Default)]
pub struct WeakGlobal {
    root: WeakObjectRef,
    alias: Option<String>,
}

impl WeakGlobal {
    /// The global object, if it is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<GlobalObject> {
        self.root.upgrade().map(|root| GlobalObject {
            root,
            alias: self.alias.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_parse_rejects_empty_leaf() {
        for path in ["", "A.", "A.B."] {
            assert_eq!(
                NamespacePath::parse(path),
                Err(MetaError::InvalidNamespace { path: path.into() })
            );
        }
    }

    #[test]
    fn test_parse_splits_nodes_and_leaf() {
        let path: NamespacePath = "A.B.C".parse().unwrap();
        assert_eq!(path.nodes(), ["A", "B"]);
        assert_eq!(path.leaf(), "C");
        assert_eq!(path.to_string(), "A.B.C");

        let single = NamespacePath::parse("A").unwrap();
        assert!(single.nodes().is_empty());
        assert_eq!(single.leaf(), "A");
    }

    #[test]
    fn test_factory_runs_once() {
        let global = GlobalObject::new();
        let calls = Cell::new(0);

        let make = || {
            calls.set(calls.get() + 1);
            Value::from(PropertyBag::new())
        };

        let first = global.define_once("A.B.C", make).unwrap();
        let second = global
            .define_once("A.B.C", || {
                calls.set(calls.get() + 1);
                Value::from(1)
            })
            .unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(first, second);
        assert!(first.as_object().is_some());
    }

    #[test]
    fn test_intermediate_nodes_are_created_and_reused() {
        let global = GlobalObject::new();

        global.define_once("A.B.x", || Value::from(1)).unwrap();
        let b = global.resolve("A.B").unwrap();
        global.define_once("A.B.y", || Value::from(2)).unwrap();

        assert_eq!(global.resolve("A.B").unwrap(), b);
        assert_eq!(global.resolve("A.B.x").unwrap(), Value::from(1));
        assert_eq!(global.resolve("A.B.y").unwrap(), Value::from(2));
    }

    #[test]
    fn test_invalid_namespace_does_not_touch_root() {
        let global = GlobalObject::new();

        assert!(matches!(
            global.define_once("A.", || Value::from(1)),
            Err(MetaError::InvalidNamespace { .. })
        ));
        assert!(global.root().keys().is_empty());
    }

    #[test]
    fn test_non_object_node_is_an_error() {
        let global = GlobalObject::new();
        global.define_once("A", || Value::from(5)).unwrap();

        let err = global.define_once("A.B", || Value::from(1)).unwrap_err();
        assert_eq!(
            err,
            MetaError::NotAnObject {
                segment: "A".into(),
                path: "A.B".into(),
                found: "number",
            }
        );
    }

    #[test]
    fn test_falsy_node_is_kept_and_rejected() {
        for (falsy, found) in [
            (Value::from(0), "number"),
            (Value::from(false), "boolean"),
            (Value::from(""), "string"),
        ] {
            let global = GlobalObject::new();
            global.root().set("A", falsy.clone()).unwrap();

            let err = global.define_once("A.B", || Value::from(1)).unwrap_err();
            assert!(matches!(err, MetaError::NotAnObject { found: f, .. } if f == found));
            assert_eq!(global.root().get("A").unwrap(), falsy);
        }
    }

    #[test]
    fn test_null_node_is_replaced_with_object() {
        let global = GlobalObject::new();
        global.root().set("A", Value::Null).unwrap();

        global.define_once("A.B", || Value::from(1)).unwrap();
        assert!(global.root().get("A").unwrap().as_object().is_some());
        assert_eq!(global.resolve("A.B").unwrap(), Value::from(1));
    }

    #[test]
    fn test_null_leaf_is_replaced() {
        let global = GlobalObject::new();
        global.root().set("A", Value::Null).unwrap();

        let value = global.define_once("A", || Value::from(3)).unwrap();
        assert_eq!(value, Value::from(3));
    }

    #[test]
    fn test_alias_resolves_to_root() {
        let global = GlobalObject::with_alias("window");

        let lucid = global.define_once("window.LUCID", || Value::from("lucid")).unwrap();

        assert_eq!(global.resolve("LUCID").unwrap(), lucid);
        assert_eq!(global.resolve("window.window.LUCID").unwrap(), lucid);
        assert!(!global.root().has("window"));

        let root = global.define_once("window", || Value::from(0)).unwrap();
        assert_eq!(root, Value::Object(global.root().clone()));
    }

    #[test]
    fn test_alias_only_applies_at_root() {
        let global = GlobalObject::with_alias("window");
        global.define_once("A.window.B", || Value::from(1)).unwrap();

        assert!(global.resolve("A.window").unwrap().as_object().is_some());
        assert_eq!(global.resolve("A.window.B").unwrap(), Value::from(1));
    }

    #[test]
    fn test_define_object_once() {
        let global = GlobalObject::new();
        let object = global
            .define_object_once("A.B", || Ok([("k", 1)].into_iter().collect()))
            .unwrap();
        let again = global
            .define_object_once("A.B", || Ok(PropertyBag::new()))
            .unwrap();

        assert!(object.ptr_eq(&again));
        assert_eq!(again.get("k").unwrap(), Value::from(1));

        global.define_once("N", || Value::from(1)).unwrap();
        assert!(matches!(
            global.define_object_once("N", || Ok(PropertyBag::new())),
            Err(MetaError::NotAnObject { .. })
        ));
    }

    #[test]
    fn test_failing_factory_leaves_leaf_unassigned() {
        let global = GlobalObject::new();

        let err = global
            .try_define_once("A.B", || Err(MetaError::ReadOnly { key: "x".into() }))
            .unwrap_err();
        assert_eq!(err, MetaError::ReadOnly { key: "x".into() });
        assert_eq!(global.resolve("A.B").unwrap(), Value::Undefined);

        let value = global.define_once("A.B", || Value::from(1)).unwrap();
        assert_eq!(value, Value::from(1));
    }

    #[test]
    fn test_weak_global() {
        let global = GlobalObject::with_alias("self");
        let weak = global.downgrade();

        let upgraded = weak.upgrade().unwrap();
        assert!(upgraded.root().ptr_eq(global.root()));
        assert_eq!(upgraded.alias(), Some("self"));

        drop(upgraded);
        drop(global);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_locked_leaf_is_returned_not_rebuilt() {
        let global = GlobalObject::new();
        global.root().define_constant("K", 9).unwrap();

        let value = global.define_once("K", || Value::from(1)).unwrap();
        assert_eq!(value, Value::from(9));
    }
}
