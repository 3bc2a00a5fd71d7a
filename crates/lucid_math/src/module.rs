//! # Math Module Object
//!
//! Packages the constants and helpers as a property bag so they can be
//! installed under a namespace (`LUCID.math`). Arguments are coerced with
//! [`Value::to_number`]; missing arguments read as NaN.
//!
//! `TAU`, `PI` and `HALF_PI` are locked as constants. The functions stay
//! ordinary properties.

use lucid_meta::{MetaResult, NativeFunction, ObjectRef, PropertyBag, Value};

use crate::constants::{HALF_PI, PI, TAU};
use crate::random::{random_angle_radians, random_integer, random_number, SharedRng};
use crate::scalar::{
    clamp, degrees_to_radians, euclidean_mod, is_between, is_between_inclusive, lerp, max_of,
    min_of, normalize, radians_to_degrees, remap,
};

fn arg(args: &[Value], index: usize) -> f64 {
    args.get(index).map_or(f64::NAN, Value::to_number)
}

fn numbers(args: &[Value]) -> Vec<f64> {
    args.iter().map(Value::to_number).collect()
}

fn function<F>(name: &'static str, body: F) -> (&'static str, Value)
where
    F: Fn(&[Value]) -> Value + Send + Sync + 'static,
{
    (name, NativeFunction::new(name, move |args| Ok(body(args))).into())
}

fn extremum(args: &[Value], pick: fn(&[f64]) -> f64) -> Value {
    if args.is_empty() {
        Value::Undefined
    } else {
        Value::from(pick(&numbers(args)))
    }
}

/// Builds the `math` module object and locks its constants.
///
/// The random helpers draw from `rng`.
pub fn math_module(rng: SharedRng) -> MetaResult<ObjectRef> {
    let angle_rng = rng.clone();
    let number_rng = rng.clone();
    let integer_rng = rng;

    let bag: PropertyBag = [
        ("TAU", Value::from(TAU)),
        ("PI", Value::from(PI)),
        ("HALF_PI", Value::from(HALF_PI)),
        function("min_of", |args| extremum(args, min_of)),
        function("max_of", |args| extremum(args, max_of)),
        function("euclidean_mod", |args| {
            euclidean_mod(arg(args, 0), arg(args, 1)).into()
        }),
        function("is_between", |args| {
            is_between(arg(args, 0), arg(args, 1), arg(args, 2)).into()
        }),
        function("is_between_inclusive", |args| {
            is_between_inclusive(arg(args, 0), arg(args, 1), arg(args, 2)).into()
        }),
        function("clamp", |args| {
            clamp(arg(args, 0), arg(args, 1), arg(args, 2)).into()
        }),
        function("normalize", |args| {
            normalize(arg(args, 0), arg(args, 1), arg(args, 2)).into()
        }),
        function("lerp", |args| lerp(arg(args, 0), arg(args, 1), arg(args, 2)).into()),
        function("remap", |args| {
            remap(arg(args, 0), arg(args, 1), arg(args, 2), arg(args, 3), arg(args, 4)).into()
        }),
        function("random_angle_radians", move |_| {
            random_angle_radians(&mut angle_rng.clone()).into()
        }),
        function("random_number", move |args| {
            random_number(&mut number_rng.clone(), arg(args, 0), arg(args, 1)).into()
        }),
        function("random_integer", move |args| {
            random_integer(&mut integer_rng.clone(), arg(args, 0), arg(args, 1)).into()
        }),
        function("radians_to_degrees", |args| radians_to_degrees(arg(args, 0)).into()),
        function("degrees_to_radians", |args| degrees_to_radians(arg(args, 0)).into()),
    ]
    .into_iter()
    .collect();

    let math = ObjectRef::new(bag);
    math.lock_constants()?;
    tracing::debug!("math module built with {} members", math.keys().len());

    Ok(math)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lucid_meta::MetaError;

    fn call(math: &ObjectRef, name: &str, args: &[f64]) -> Value {
        let args: Vec<Value> = args.iter().copied().map(Value::from).collect();
        math.get(name)
            .unwrap()
            .as_function()
            .unwrap()
            .call(&args)
            .unwrap()
    }

    fn sample() -> ObjectRef {
        math_module(SharedRng::from_seed(42)).unwrap()
    }

    #[test]
    fn test_constants_are_locked() {
        let math = sample();

        for key in ["TAU", "PI", "HALF_PI"] {
            assert!(math.read().property(key).unwrap().is_constant(), "{key}");
        }
        assert_eq!(
            math.set("PI", 3.0),
            Err(MetaError::ReadOnly { key: "PI".into() })
        );
        assert_eq!(math.get("PI").unwrap(), Value::from(PI));
    }

    #[test]
    fn test_functions_stay_writable() {
        let math = sample();
        assert!(math.read().property("clamp").unwrap().is_writable());
    }

    #[test]
    fn test_calls() {
        let math = sample();

        assert_eq!(call(&math, "min_of", &[3.0, 1.0, 2.0]), Value::from(1.0));
        assert_eq!(call(&math, "max_of", &[3.0, 1.0, 2.0]), Value::from(3.0));
        assert_eq!(call(&math, "min_of", &[]), Value::Undefined);
        assert_eq!(call(&math, "euclidean_mod", &[-1.0, 5.0]), Value::from(4.0));
        assert_eq!(call(&math, "is_between", &[5.0, 0.0, 10.0]), Value::from(true));
        assert_eq!(
            call(&math, "is_between_inclusive", &[10.0, 0.0, 10.0]),
            Value::from(true)
        );
        assert_eq!(call(&math, "clamp", &[15.0, 0.0, 10.0]), Value::from(10.0));
        assert_eq!(call(&math, "normalize", &[5.0, 0.0, 10.0]), Value::from(0.5));
        assert_eq!(call(&math, "lerp", &[0.5, 0.0, 10.0]), Value::from(5.0));
        assert_eq!(
            call(&math, "remap", &[5.0, 0.0, 10.0, 0.0, 100.0]),
            Value::from(50.0)
        );
        assert_eq!(
            call(&math, "radians_to_degrees", &[PI]),
            Value::from(180.0)
        );
        assert_eq!(
            call(&math, "degrees_to_radians", &[90.0]),
            Value::from(HALF_PI)
        );
    }

    #[test]
    fn test_missing_arguments_are_nan() {
        let math = sample();
        let value = call(&math, "lerp", &[]);
        assert!(value.as_number().unwrap().is_nan());
    }

    #[test]
    fn test_random_functions() {
        let math = sample();

        for _ in 0..1000 {
            assert_eq!(call(&math, "random_integer", &[1.0, 1.0]), Value::from(1.0));

            let x = call(&math, "random_number", &[2.0, 3.0]).as_number().unwrap();
            assert!((2.0..3.0).contains(&x));

            let angle = call(&math, "random_angle_radians", &[]).as_number().unwrap();
            assert!((0.0..TAU).contains(&angle));
        }
    }

    #[test]
    fn test_random_integer_keeps_fractional_bounds() {
        let math = sample();
        let mut seen = Vec::new();

        for _ in 0..5000 {
            let n = call(&math, "random_integer", &[1.5, 3.5]).as_number().unwrap();
            assert!((1.0..=4.0).contains(&n), "{n} out of range");
            if !seen.contains(&n) {
                seen.push(n);
            }
        }

        seen.sort_by(f64::total_cmp);
        assert_eq!(seen, [1.0, 2.0, 3.0, 4.0]);
    }
}
