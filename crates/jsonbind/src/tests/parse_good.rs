use rstest::rstest;

use crate::{Map, ParserOptions, Value, parse, parse_with_options, write};

fn obj<const N: usize>(members: [(&str, Value); N]) -> Value {
    members.into_iter().collect()
}

#[test]
fn literals_decode() {
    let v = parse("[6, 7, true, \"my cat\\nis black\"]").unwrap();
    assert_eq!(
        v,
        Value::Array(vec![
            Value::Integer(6),
            Value::Integer(7),
            Value::Boolean(true),
            Value::String("my cat\nis black".into()),
        ])
    );
}

#[rstest]
#[case("42", Value::Integer(42))]
#[case("-3.5", Value::Double(-3.5))]
#[case("42.0", Value::Double(42.0))]
#[case("0", Value::Integer(0))]
#[case("-0", Value::Integer(0))]
#[case("null", Value::Null)]
#[case("false", Value::Boolean(false))]
#[case("\"\"", Value::String(String::new()))]
#[case("[]", Value::Array(vec![]))]
#[case("{}", Value::Object(Map::new()))]
#[case(" \r\n\t[ ]\t", Value::Array(vec![]))]
fn scalars_and_empty_containers(#[case] input: &str, #[case] expected: Value) {
    assert_eq!(parse(input).unwrap(), expected);
}

#[test]
fn numeric_kinds_stay_distinct() {
    assert!(matches!(parse("42").unwrap(), Value::Integer(42)));
    assert!(matches!(parse("-3.5").unwrap(), Value::Double(d) if d == -3.5));
    assert_ne!(parse("1").unwrap(), parse("1.0").unwrap());
}

#[test]
fn duplicate_keys_last_wins() {
    let v = parse(r#"{"a":1,"a":2}"#).unwrap();
    assert_eq!(v, obj([("a", Value::Integer(2))]));
}

#[test]
fn nested_members() {
    let v = parse(r#"{"product": {"id": "p1", "prices": [12, 12.5], "stock": null}}"#).unwrap();
    let expected = obj([(
        "product",
        obj([
            ("id", Value::from("p1")),
            (
                "prices",
                Value::Array(vec![Value::Integer(12), Value::Double(12.5)]),
            ),
            ("stock", Value::Null),
        ]),
    )]);
    assert_eq!(v, expected);
}

#[test]
fn deep_nesting_roundtrips() {
    const DEPTH: usize = 50;
    let text = format!("{}{}", "[".repeat(DEPTH), "]".repeat(DEPTH));
    let v = parse(&text).unwrap();
    assert_eq!(write(&v).unwrap(), text);

    let mut depth = 0;
    let mut cursor = &v;
    while let Value::Array(items) = cursor {
        depth += 1;
        match items.first() {
            Some(inner) => cursor = inner,
            None => break,
        }
    }
    assert_eq!(depth, DEPTH);

    let text = format!("{}1{}", r#"{"k":"#.repeat(DEPTH), "}".repeat(DEPTH));
    let v = parse(&text).unwrap();
    assert_eq!(write(&v).unwrap(), text);
}

#[test]
fn depth_limit_admits_exact_depth() {
    let options = ParserOptions {
        max_depth: Some(3),
        ..ParserOptions::default()
    };
    assert!(parse_with_options("[[[1]]]", options).is_ok());
    assert!(parse_with_options(r#"{"a":[{}]}"#, options).is_ok());
}

#[rstest]
#[case(r#""Aé中""#, "Aé中")]
#[case(r#""😀""#, "\u{1F600}")]
#[case(r#""tab\there""#, "tab\there")]
#[case("\"raw é\"", "raw é")]
fn string_escapes(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(parse(input).unwrap(), Value::String(expected.into()));
}

#[test]
fn serde_json_agrees_on_supported_inputs() {
    let inputs = [
        r#"{"a":[1,2.5,"x",null,true],"b":{"c":{}}}"#,
        r#"[-1,-0.25,"é\/\"",[[]]]"#,
        r#"{"z":1,"a":2}"#,
    ];
    for input in inputs {
        let ours = write(&parse(input).unwrap()).unwrap();
        let theirs: serde_json::Value = serde_json::from_str(input).unwrap();
        let reparsed: serde_json::Value = serde_json::from_str(&ours).unwrap();
        assert_eq!(reparsed, theirs, "{input}");
    }
}
