//! # Dynamic Values
//!
//! The values stored in property bags and namespace nodes.
//!
//! `Undefined` and `Null` are the two "absent" sentinels; everything else is
//! considered assigned. Functions and objects are shared references and
//! compare by identity.

use std::fmt;
use std::sync::Arc;

use crate::error::MetaResult;
use crate::object::{ObjectRef, PropertyBag};

/// Signature of a native function body.
type Callback = dyn Fn(&[Value]) -> MetaResult<Value> + Send + Sync;

/// A callable value backed by a Rust closure.
///
/// Cloning is cheap and preserves identity: two clones are the "same"
/// function for [`Value::same_value`].
#[derive(Clone)]
pub struct NativeFunction {
    name: Arc<str>,
    callback: Arc<Callback>,
}

impl NativeFunction {
    /// Wraps a closure as a named function.
    pub fn new<F>(name: &str, callback: F) -> Self
    where
        F: Fn(&[Value]) -> MetaResult<Value> + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name),
            callback: Arc::new(callback),
        }
    }

    /// The name the function was created with.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invokes the function.
    pub fn call(&self, args: &[Value]) -> MetaResult<Value> {
        (self.callback)(args)
    }

    /// Returns true if both handles refer to the same closure.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.callback, &other.callback)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[function {}]", self.name)
    }
}

/// Parses a trimmed, non-empty numeric string.
fn parse_numeric_literal(s: &str) -> f64 {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let negative = s.starts_with('-');

    if unsigned == "Infinity" {
        return if negative { f64::NEG_INFINITY } else { f64::INFINITY };
    }

    let radix = match unsigned.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &unsigned[2..];
        if unsigned.len() != s.len() || digits.is_empty() {
            return f64::NAN;
        }
        return digits
            .chars()
            .try_fold(0.0, |acc, c| {
                c.to_digit(radix)
                    .map(|d| acc * f64::from(radix) + f64::from(d))
            })
            .unwrap_or(f64::NAN);
    }

    let decimal = unsigned
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if decimal {
        s.parse().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

/// A dynamically typed value.
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// No value at all.
    #[default]
    Undefined,
    /// Explicit "no object".
    Null,
    /// Boolean.
    Bool(bool),
    /// IEEE-754 double.
    Number(f64),
    /// Immutable string.
    String(Arc<str>),
    /// Native callable.
    Function(NativeFunction),
    /// Shared reference to a property bag.
    Object(ObjectRef),
}

impl Value {
    /// Short type name used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Function(_) => "function",
            Self::Object(_) => "object",
        }
    }

    /// Returns true for anything except `Undefined` and `Null`.
    #[inline]
    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        !matches!(self, Self::Undefined | Self::Null)
    }

    /// Returns the number if this is a `Number`.
    #[inline]
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string slice if this is a `String`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the object reference if this is an `Object`.
    #[must_use]
    pub const fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Returns the function if this is a `Function`.
    #[must_use]
    pub const fn as_function(&self) -> Option<&NativeFunction> {
        match self {
            Self::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Numeric coercion.
    ///
    /// `Undefined`, functions, objects and unparsable strings become NaN;
    /// `Null` and the empty string become 0; booleans become 0 or 1.
    /// Strings accept decimal literals with an optional sign and exponent,
    /// `Infinity` (case-sensitive, optionally signed) and unsigned
    /// `0x`/`0o`/`0b` integers. Other spellings such as `inf` or `nan` are NaN.
    #[must_use]
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Null => 0.0,
            Self::Bool(b) => f64::from(u8::from(*b)),
            Self::Number(n) => *n,
            Self::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    0.0
                } else {
                    parse_numeric_literal(s)
                }
            }
            Self::Undefined | Self::Function(_) | Self::Object(_) => f64::NAN,
        }
    }

    /// Identity comparison used when redefining constants.
    ///
    /// Unlike `==`, NaN is the same as NaN and `0.0` differs from `-0.0`.
    #[must_use]
    pub fn same_value(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => {
                (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
            }
            _ => self == other,
        }
    }
}

/// Strict equality: numbers by IEEE `==`, functions and objects by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => a.ptr_eq(b),
            (Self::Object(a), Self::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(Arc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(Arc::from(s))
    }
}

impl From<NativeFunction> for Value {
    fn from(f: NativeFunction) -> Self {
        Self::Function(f)
    }
}

impl From<ObjectRef> for Value {
    fn from(o: ObjectRef) -> Self {
        Self::Object(o)
    }
}

impl From<PropertyBag> for Value {
    fn from(bag: PropertyBag) -> Self {
        Self::Object(ObjectRef::new(bag))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Undefined, Into::into)
    }
}
