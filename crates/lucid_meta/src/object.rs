//! # Property Bags
//!
//! Plain objects with two kinds of own properties:
//!
//! - **Data** properties hold a value and may be writable or read-only.
//! - **Accessor** properties run a getter on read and an optional setter on
//!   assignment.
//!
//! A property that is not configurable can never be removed or replaced.
//! Constants are data properties that are neither writable nor configurable.
//!
//! ## Assignment Rules
//!
//! | Property | `set` | `delete` |
//! |---|---|---|
//! | absent | creates a writable data property | no-op |
//! | writable data | replaces the value | removes it |
//! | constant | `ReadOnly` error | `NonConfigurable` error |
//! | accessor with setter | calls the setter | `NonConfigurable` error |
//! | accessor without setter | `ReadOnly` error | `NonConfigurable` error |

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::{RwLock, RwLockReadGuard};

use crate::error::{MetaError, MetaResult};
use crate::value::Value;

/// Getter half of an accessor.
pub type Getter = Arc<dyn Fn() -> MetaResult<Value> + Send + Sync>;

/// Setter half of an accessor.
pub type Setter = Arc<dyn Fn(Value) -> MetaResult<()> + Send + Sync>;

/// A getter with an optional setter.
#[derive(Clone)]
pub struct Accessor {
    get: Getter,
    set: Option<Setter>,
}

impl Accessor {
    /// Creates a read-only accessor.
    pub fn new<G>(get: G) -> Self
    where
        G: Fn() -> MetaResult<Value> + Send + Sync + 'static,
    {
        Self {
            get: Arc::new(get),
            set: None,
        }
    }

    /// Adds a setter.
    #[must_use]
    pub fn with_setter<S>(mut self, set: S) -> Self
    where
        S: Fn(Value) -> MetaResult<()> + Send + Sync + 'static,
    {
        self.set = Some(Arc::new(set));
        self
    }

    /// Runs the getter.
    pub fn get(&self) -> MetaResult<Value> {
        (self.get)()
    }

    /// Returns the setter, if any.
    #[must_use]
    pub fn setter(&self) -> Option<&Setter> {
        self.set.as_ref()
    }

    /// Returns true if assignment goes through a setter.
    #[inline]
    #[must_use]
    pub const fn has_setter(&self) -> bool {
        self.set.is_some()
    }

    fn same_functions(&self, other: &Self) -> bool {
        let same_setter = match (&self.set, &other.set) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        Arc::ptr_eq(&self.get, &other.get) && same_setter
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("has_setter", &self.has_setter())
            .finish_non_exhaustive()
    }
}

/// An own property of a [`PropertyBag`].
#[derive(Clone, Debug)]
pub enum Property {
    /// Stored value.
    Data {
        /// The stored value.
        value: Value,
        /// Whether plain assignment may replace the value.
        writable: bool,
        /// Whether the property may be deleted or redefined.
        configurable: bool,
    },
    /// Getter/setter pair.
    Accessor {
        /// The functions backing the property.
        accessor: Accessor,
        /// Whether the property may be deleted or redefined.
        configurable: bool,
    },
}

impl Property {
    /// An ordinary writable, configurable data property.
    #[must_use]
    pub const fn data(value: Value) -> Self {
        Self::Data {
            value,
            writable: true,
            configurable: true,
        }
    }

    /// A non-writable, non-configurable data property.
    #[must_use]
    pub const fn constant(value: Value) -> Self {
        Self::Data {
            value,
            writable: false,
            configurable: false,
        }
    }

    /// A non-configurable accessor property.
    #[must_use]
    pub const fn accessor(accessor: Accessor) -> Self {
        Self::Accessor {
            accessor,
            configurable: false,
        }
    }

    /// Whether the property may be deleted or redefined.
    #[must_use]
    pub const fn is_configurable(&self) -> bool {
        match self {
            Self::Data { configurable, .. } | Self::Accessor { configurable, .. } => *configurable,
        }
    }

    /// Whether this is a writable data property.
    #[must_use]
    pub const fn is_writable(&self) -> bool {
        match self {
            Self::Data { writable, .. } => *writable,
            Self::Accessor { .. } => false,
        }
    }

    /// Whether this is a non-writable, non-configurable data property.
    #[must_use]
    pub const fn is_constant(&self) -> bool {
        matches!(
            self,
            Self::Data {
                writable: false,
                configurable: false,
                ..
            }
        )
    }

    /// Whether this is an accessor property.
    #[must_use]
    pub const fn is_accessor(&self) -> bool {
        matches!(self, Self::Accessor { .. })
    }

    /// The stored value of a data property.
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::Data { value, .. } => Some(value),
            Self::Accessor { .. } => None,
        }
    }

    /// Reads the property: the stored value, or the getter's result.
    pub fn read(&self) -> MetaResult<Value> {
        match self {
            Self::Data { value, .. } => Ok(value.clone()),
            Self::Accessor { accessor, .. } => accessor.get(),
        }
    }

    /// Whether redefining a non-configurable property as `other` changes nothing.
    fn is_identical_redefinition(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Data {
                    value: a,
                    writable: wa,
                    ..
                },
                Self::Data {
                    value: b,
                    writable: wb,
                    configurable: false,
                },
            ) => wa == wb && a.same_value(b),
            (
                Self::Accessor { accessor: a, .. },
                Self::Accessor {
                    accessor: b,
                    configurable: false,
                },
            ) => a.same_functions(b),
            _ => false,
        }
    }
}

/// Outcome of an assignment that may have to run user code.
pub(crate) enum Assignment {
    /// The value was stored in the bag.
    Stored,
    /// The property is an accessor; run this setter once no lock is held.
    Deferred(Setter, Value),
}

/// Returns true if the key reads the same upper-cased.
#[inline]
#[must_use]
pub fn is_constant_key(key: &str) -> bool {
    key == key.to_uppercase()
}

/// A plain object.
#[derive(Clone, Debug, Default)]
pub struct PropertyBag {
    properties: BTreeMap<String, Property>,
}

impl PropertyBag {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of own properties.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns true if the bag has no properties.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Returns true if `key` is an own property.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Own property keys, in key order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// The descriptor of an own property.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&Property> {
        self.properties.get(key)
    }

    /// Reads a property. Missing keys read as `Undefined`.
    pub fn get(&self, key: &str) -> MetaResult<Value> {
        self.properties
            .get(key)
            .map_or(Ok(Value::Undefined), Property::read)
    }

    /// Plain assignment.
    ///
    /// # Errors
    ///
    /// `ReadOnly` for constants and setter-less accessors.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> MetaResult<()> {
        match self.assign(key, value.into())? {
            Assignment::Stored => Ok(()),
            Assignment::Deferred(setter, value) => setter(value),
        }
    }

    pub(crate) fn assign(&mut self, key: &str, value: Value) -> MetaResult<Assignment> {
        match self.properties.get_mut(key) {
            None => {
                self.properties.insert(key.to_owned(), Property::data(value));
                Ok(Assignment::Stored)
            }
            Some(Property::Data {
                value: slot,
                writable: true,
                ..
            }) => {
                *slot = value;
                Ok(Assignment::Stored)
            }
            Some(Property::Accessor { accessor, .. }) => match accessor.setter() {
                Some(setter) => Ok(Assignment::Deferred(Arc::clone(setter), value)),
                None => Err(MetaError::ReadOnly { key: key.to_owned() }),
            },
            Some(Property::Data { .. }) => Err(MetaError::ReadOnly { key: key.to_owned() }),
        }
    }

    /// Removes an own property.
    ///
    /// Returns `Ok(false)` if there was nothing to remove.
    ///
    /// # Errors
    ///
    /// `NonConfigurable` if the property is locked.
    pub fn delete(&mut self, key: &str) -> MetaResult<bool> {
        match self.properties.get(key) {
            None => Ok(false),
            Some(property) if !property.is_configurable() => {
                Err(MetaError::NonConfigurable { key: key.to_owned() })
            }
            Some(_) => {
                self.properties.remove(key);
                Ok(true)
            }
        }
    }

    /// Defines (or redefines) an own property from a full descriptor.
    ///
    /// A non-configurable property only accepts a redefinition that changes
    /// nothing.
    ///
    /// # Errors
    ///
    /// `NonConfigurable` on any other redefinition of a locked property.
    pub fn define(&mut self, key: &str, property: Property) -> MetaResult<()> {
        if let Some(current) = self.properties.get(key) {
            if !current.is_configurable() {
                if current.is_identical_redefinition(&property) {
                    return Ok(());
                }
                return Err(MetaError::NonConfigurable { key: key.to_owned() });
            }
        }
        self.properties.insert(key.to_owned(), property);
        Ok(())
    }

    /// Installs `value` as a constant and returns it.
    pub fn define_constant(&mut self, key: &str, value: impl Into<Value>) -> MetaResult<Value> {
        let value = value.into();
        self.define(key, Property::constant(value.clone()))?;
        tracing::trace!("constant defined: {}", key);
        Ok(value)
    }

    /// Installs a getter and optional setter at `key`.
    pub fn define_accessor(&mut self, key: &str, accessor: Accessor) -> MetaResult<()> {
        self.define(key, Property::accessor(accessor))
    }

    /// Turns every upper-case key into a constant holding its current value.
    ///
    /// Keys that are not all upper-case stay ordinary properties.
    pub fn lock_constants(&mut self) -> MetaResult<&mut Self> {
        let mut current = Vec::new();
        for (key, property) in &self.properties {
            if is_constant_key(key) {
                current.push((key.clone(), property.read()?));
            }
        }

        for (key, value) in current {
            self.define_constant(&key, value)?;
        }

        Ok(self)
    }
}

impl<K, V> FromIterator<(K, V)> for PropertyBag
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let properties = iter
            .into_iter()
            .map(|(key, value)| (key.into(), Property::data(value.into())))
            .collect();
        Self { properties }
    }
}

/// Shared, interior-mutable reference to a [`PropertyBag`].
///
/// Getters and setters are always invoked after the lock is released, so
/// they may freely read or write the object they are installed on.
#[derive(Clone, Default)]
pub struct ObjectRef(Arc<RwLock<PropertyBag>>);

impl ObjectRef {
    /// Wraps a bag.
    #[must_use]
    pub fn new(bag: PropertyBag) -> Self {
        Self(Arc::new(RwLock::new(bag)))
    }

    /// Returns true if both references point at the same object.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// A non-owning handle, for closures stored inside the object graph.
    #[must_use]
    pub fn downgrade(&self) -> WeakObjectRef {
        WeakObjectRef(Arc::downgrade(&self.0))
    }

    /// Read access to the underlying bag for inspection.
    ///
    /// Do not call back into this object while holding the guard.
    pub fn read(&self) -> RwLockReadGuard<'_, PropertyBag> {
        self.0.read()
    }

    /// Returns true if `key` is an own property.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.0.read().has(key)
    }

    /// Own property keys, in key order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.0.read().keys().map(str::to_owned).collect()
    }

    /// See [`PropertyBag::get`].
    pub fn get(&self, key: &str) -> MetaResult<Value> {
        let property = self.0.read().property(key).cloned();
        property.map_or(Ok(Value::Undefined), |p| p.read())
    }

    /// See [`PropertyBag::set`].
    pub fn set(&self, key: &str, value: impl Into<Value>) -> MetaResult<()> {
        let assignment = self.0.write().assign(key, value.into())?;
        match assignment {
            Assignment::Stored => Ok(()),
            Assignment::Deferred(setter, value) => setter(value),
        }
    }

    /// See [`PropertyBag::delete`].
    pub fn delete(&self, key: &str) -> MetaResult<bool> {
        self.0.write().delete(key)
    }

    /// See [`PropertyBag::define`].
    pub fn define(&self, key: &str, property: Property) -> MetaResult<()> {
        self.0.write().define(key, property)
    }

    /// See [`PropertyBag::define_constant`].
    pub fn define_constant(&self, key: &str, value: impl Into<Value>) -> MetaResult<Value> {
        self.0.write().define_constant(key, value)
    }

    /// See [`PropertyBag::define_accessor`].
    pub fn define_accessor(&self, key: &str, accessor: Accessor) -> MetaResult<()> {
        self.0.write().define_accessor(key, accessor)
    }

    /// See [`PropertyBag::lock_constants`]. Returns the same object.
    pub fn lock_constants(&self) -> MetaResult<Self> {
        let candidates: Vec<(String, Property)> = self
            .0
            .read()
            .properties
            .iter()
            .filter(|(key, _)| is_constant_key(key))
            .map(|(key, property)| (key.clone(), property.clone()))
            .collect();

        let mut current = Vec::with_capacity(candidates.len());
        for (key, property) in candidates {
            current.push((key, property.read()?));
        }

        let mut bag = self.0.write();
        for (key, value) in current {
            bag.define_constant(&key, value)?;
        }
        tracing::trace!("constants locked on object with {} properties", bag.len());

        Ok(self.clone())
    }
}

/// Weak counterpart of [`ObjectRef`].
#[derive(Clone, Debug, Default)]
pub struct WeakObjectRef(Weak<RwLock<PropertyBag>>);

impl WeakObjectRef {
    /// The object, if it is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<ObjectRef> {
        self.0.upgrade().map(ObjectRef)
    }
}

impl From<PropertyBag> for ObjectRef {
    fn from(bag: PropertyBag) -> Self {
        Self::new(bag)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_read() {
            Some(bag) => f.debug_set().entries(bag.keys()).finish(),
            None => f.write_str("[object (locked)]"),
        }
    }
}
