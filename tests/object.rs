use kitbag::lang::{Object, Value};
use kitbag::object::{omit, pick};

fn obj<const N: usize>(props: [(&str, Value); N]) -> Object {
    props.into_iter().collect()
}

#[test_log::test]
fn omit_excluded_props_and_leave_the_rest() {
    let source = obj([("a", 1.into()), ("b", 2.into())]);
    assert_eq!(omit(&source, &["a"]), obj([("b", 2.into())]));

    let nested = obj([
        ("a", 1.into()),
        ("b", 2.into()),
        ("c", Value::object([("d", 4)])),
    ]);
    assert_eq!(omit(&nested, &["b", "c"]), obj([("a", 1.into())]));
}

#[test_log::test]
fn pick_included_props_in_source_order() {
    let source = obj([("a", 1.into()), ("b", 2.into()), ("c", 3.into())]);
    let picked = pick(&source, &["c", "a"]);
    assert_eq!(picked.keys().collect::<Vec<_>>(), ["a", "c"]);
    assert_eq!(picked.get("c"), Some(&Value::from(3)));
}

#[test_log::test]
fn unknown_keys_are_ignored() {
    let source = obj([("a", 1.into())]);
    assert_eq!(pick(&source, &["x", "y"]), Object::new());
    assert_eq!(omit(&source, &["x"]), source);
}

#[test_log::test]
fn source_is_not_modified() {
    let source = obj([("a", 1.into()), ("b", 2.into())]);
    let before = source.clone();
    let _ = pick(&source, &["a"]);
    let _ = omit(&source, &["a"]);
    assert_eq!(source, before);
}

#[test_log::test]
fn keys_can_be_owned_strings() {
    let source = obj([("a", 1.into()), ("b", 2.into())]);
    let keys = vec![String::from("b")];
    assert_eq!(pick(&source, &keys), obj([("b", 2.into())]));
}

#[test_log::test]
fn null_prototype_objects_project_to_plain_objects() {
    let mut source = Object::with_null_proto();
    source.insert("a", 1);
    let picked = pick(&source, &["a"]);
    assert_eq!(picked, obj([("a", 1.into())]));
}
