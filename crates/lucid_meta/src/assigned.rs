//! Assignment checks over "maybe absent" values.

use crate::value::Value;

/// Types that have an absent state.
pub trait Assigned {
    /// Returns true if the value is present.
    fn is_assigned(&self) -> bool;
}

impl Assigned for Value {
    #[inline]
    fn is_assigned(&self) -> bool {
        Value::is_assigned(self)
    }
}

impl<T> Assigned for Option<T> {
    #[inline]
    fn is_assigned(&self) -> bool {
        self.is_some()
    }
}

impl<T: Assigned + ?Sized> Assigned for &T {
    #[inline]
    fn is_assigned(&self) -> bool {
        (**self).is_assigned()
    }
}

/// Returns true if `value` is neither absent nor null.
#[inline]
pub fn is_assigned<T: Assigned + ?Sized>(value: &T) -> bool {
    value.is_assigned()
}

/// Returns the first assigned value.
///
/// If none of the values are assigned the last one is returned, and an empty
/// sequence yields `T::default()` (the absent sentinel for [`Value`] and
/// `Option`).
pub fn first_assigned<I, T>(values: I) -> T
where
    I: IntoIterator<Item = T>,
    T: Assigned + Default,
{
    let mut last = None;

    for value in values {
        if value.is_assigned() {
            return value;
        }
        last = Some(value);
    }

    last.unwrap_or_default()
}
