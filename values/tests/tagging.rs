use bumpalo::Bump;
use pretty_assertions::assert_eq;
use rtt_values::{RttError, Runtime, RuntimeOptions, Value, ValueBuilder};

#[test]
fn primitives_map_to_native_descriptors() {
    let types = Bump::new();
    let rt = Runtime::new(RuntimeOptions::default(), &types);
    let values = Bump::new();
    let b = ValueBuilder::new(&values);

    let numbers = Value::array(&b, [1.0, 2.0, 3.0].map(Value::Number));

    assert_eq!(rt.get_type_info(Value::Number(42.0)), rt.number_type());
    assert_eq!(rt.get_type_info(Value::Number(42.0)).type_key(), "Number");
    assert_eq!(rt.get_type_info(numbers), rt.array_type());
    assert_eq!(rt.get_type_info(numbers).type_key(), "Array");
    assert_eq!(rt.get_type_info(Value::str(&b, "s")).type_key(), "String");
    assert_eq!(rt.get_type_info(Value::Bool(true)).type_key(), "Boolean");
}

#[test]
fn untagged_object_is_placeholder() {
    let types = Bump::new();
    let rt = Runtime::new(RuntimeOptions::default(), &types);
    let values = Bump::new();
    let b = ValueBuilder::new(&values);

    let obj = Value::object(&b, [("a", Value::Null)]);
    assert_eq!(rt.get_type_info(obj), rt.registry().placeholder());
}

#[test]
fn tag_overrides_inference() {
    let types = Bump::new();
    let rt = Runtime::new(RuntimeOptions::default(), &types);
    let values = Bump::new();
    let b = ValueBuilder::new(&values);
    let reg = rt.registry();

    let string = reg.class("String", None);
    let list_string = reg.class("List", Some(&[string]));
    let list = rt.set_type_info(Value::array(&b, [Value::str(&b, "a")]), list_string);

    assert_eq!(rt.get_type_info(list), list_string);
    assert_eq!(list.tag().and_then(|tag| tag.get()), Some(list_string));
}

#[test]
fn tag_can_be_overwritten_and_removed() {
    let types = Bump::new();
    let rt = Runtime::new(RuntimeOptions::default(), &types);
    let values = Bump::new();
    let b = ValueBuilder::new(&values);
    let reg = rt.registry();

    let first = reg.class("First", None);
    let second = reg.class("Second", None);
    let obj = rt.set_type_info(Value::object(&b, []), first);

    rt.set_type_info(obj, second);
    assert_eq!(rt.get_type_info(obj), second);

    rt.remove_type_info(obj);
    assert_eq!(rt.get_type_info(obj), reg.placeholder());

    let array = rt.set_type_info(Value::array(&b, []), first);
    rt.remove_type_info(array);
    assert_eq!(rt.get_type_info(array), rt.array_type());
}

#[test]
fn remove_on_primitive_is_a_no_op() {
    let types = Bump::new();
    let rt = Runtime::new(RuntimeOptions::default(), &types);
    rt.remove_type_info(Value::Number(1.0));
    assert_eq!(rt.get_type_info(Value::Number(1.0)), rt.number_type());
}

#[test]
fn functions_default_to_callable() {
    let types = Bump::new();
    let rt = Runtime::new(RuntimeOptions::default(), &types);
    let values = Bump::new();
    let b = ValueBuilder::new(&values);
    let reg = rt.registry();

    let host_fn = Value::function(&b, "print", 1);
    assert_eq!(rt.get_type_info(host_fn), reg.function());

    let int = reg.class("int", None);
    let sig = reg.function_type(int, &[int]);
    let closure = rt.set_type_info(Value::function(&b, "inc", 1), sig);
    assert_eq!(rt.get_type_info(closure), sig);

    rt.remove_type_info(closure);
    assert_eq!(rt.get_type_info(closure), reg.function());
}

#[test]
fn type_args_for_declared_interface() {
    let types = Bump::new();
    let rt = Runtime::new(RuntimeOptions::default(), &types);
    let values = Bump::new();
    let b = ValueBuilder::new(&values);
    let reg = rt.registry();

    let string = reg.class("String", None);
    let list_string = reg.class("List", Some(&[string]));
    let list = rt.set_type_info(Value::array(&b, [Value::str(&b, "x")]), list_string);

    assert_eq!(rt.get_type_args_for(list, "List"), Ok(&[string][..]));
    assert_eq!(rt.get_type_args_for(list, "Object"), Ok(&[][..]));
}

#[test]
fn type_args_for_undeclared_interface_is_internal_error() {
    let types = Bump::new();
    let rt = Runtime::new(RuntimeOptions::default(), &types);
    let values = Bump::new();
    let b = ValueBuilder::new(&values);

    let numbers = Value::array(&b, [Value::Number(1.0), Value::Number(2.0)]);
    let err = rt.get_type_args_for(numbers, "Map").unwrap_err();

    assert_eq!(
        err,
        RttError::MissingImplementedType {
            class_key: "Map".into(),
            value: "[1, 2]".into(),
        }
    );
    assert_eq!(
        err.to_string(),
        "internal error: `[1, 2]` does not implement `Map`"
    );
}
