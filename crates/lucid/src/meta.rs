//! # Meta Module Object
//!
//! The meta helpers as callable values, installed as `LUCID.meta`:
//!
//! | Member | Arguments | Returns |
//! |---|---|---|
//! | `is_assigned` | value | boolean |
//! | `first_assigned` | values... | first assigned value, else the last one |
//! | `define_global_once` | path, factory | the value at `path` |
//! | `define_constant` | object, key, value | value |
//! | `define_accessor` | object, key, `{ get, set? }` | undefined |
//! | `lock_constants` | object | the same object |

use lucid_meta::{
    first_assigned, Accessor, GlobalObject, MetaError, MetaResult, NativeFunction, ObjectRef,
    PropertyBag, Value,
};

fn arg(args: &[Value], index: usize) -> Value {
    args.get(index).cloned().unwrap_or_default()
}

/// Property key from a primitive argument.
///
/// Strings are used as-is. Numbers use Rust's shortest round-trip form, except
/// that non-finite values read `NaN`, `Infinity` and `-Infinity`. Large
/// magnitudes are written out in full (`1e21` becomes 22 digits).
fn key_arg(args: &[Value], index: usize) -> MetaResult<String> {
    match arg(args, index) {
        Value::String(s) => Ok(s.to_string()),
        Value::Number(n) if n.is_nan() => Ok("NaN".to_owned()),
        Value::Number(n) if n.is_infinite() => {
            Ok(if n > 0.0 { "Infinity" } else { "-Infinity" }.to_owned())
        }
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok("null".to_owned()),
        Value::Undefined => Ok("undefined".to_owned()),
        other @ (Value::Function(_) | Value::Object(_)) => Err(MetaError::InvalidKey {
            found: other.type_name(),
        }),
    }
}

fn object_arg(args: &[Value], index: usize, what: &str) -> MetaResult<ObjectRef> {
    match arg(args, index) {
        Value::Object(object) => Ok(object),
        other => Err(MetaError::NotAnObject {
            segment: what.to_owned(),
            path: String::new(),
            found: other.type_name(),
        }),
    }
}

fn function_arg(value: Value, what: &str) -> MetaResult<NativeFunction> {
    match value {
        Value::Function(function) => Ok(function),
        other => Err(MetaError::NotCallable {
            what: what.to_owned(),
            found: other.type_name(),
        }),
    }
}

/// Turns `{ get, set? }` into an [`Accessor`].
fn accessor_from_settings(settings: &ObjectRef) -> MetaResult<Accessor> {
    let get = function_arg(settings.get("get")?, "accessor getter")?;
    let accessor = Accessor::new(move || get.call(&[]));

    match settings.get("set")? {
        set if !set.is_assigned() => Ok(accessor),
        set => {
            let set = function_arg(set, "accessor setter")?;
            Ok(accessor.with_setter(move |value| set.call(&[value]).map(drop)))
        }
    }
}

/// Builds the `meta` module object.
///
/// `define_global_once` registers into `global`. The module only keeps a weak
/// handle, so installing it inside `global` does not create a cycle.
pub fn meta_module(global: &GlobalObject) -> MetaResult<ObjectRef> {
    let weak_global = global.downgrade();

    let bag: PropertyBag = [
        NativeFunction::new("is_assigned", |args| {
            Ok(Value::from(arg(args, 0).is_assigned()))
        }),
        NativeFunction::new("first_assigned", |args| {
            Ok(first_assigned(args.iter().cloned()))
        }),
        NativeFunction::new("define_global_once", move |args| {
            let Some(global) = weak_global.upgrade() else {
                return Ok(Value::Undefined);
            };
            let path = arg(args, 0);
            let factory = function_arg(arg(args, 1), "namespace factory")?;
            global.try_define_once(path.as_str().unwrap_or_default(), || factory.call(&[]))
        }),
        NativeFunction::new("define_constant", |args| {
            let object = object_arg(args, 0, "define_constant target")?;
            object.define_constant(&key_arg(args, 1)?, arg(args, 2))
        }),
        NativeFunction::new("define_accessor", |args| {
            let object = object_arg(args, 0, "define_accessor target")?;
            let settings = object_arg(args, 2, "accessor settings")?;
            object.define_accessor(&key_arg(args, 1)?, accessor_from_settings(&settings)?)?;
            Ok(Value::Undefined)
        }),
        NativeFunction::new("lock_constants", |args| {
            let object = object_arg(args, 0, "lock_constants target")?;
            Ok(Value::Object(object.lock_constants()?))
        }),
    ]
    .into_iter()
    .map(|function| (function.name().to_owned(), Value::from(function)))
    .collect();

    Ok(ObjectRef::new(bag))
}
