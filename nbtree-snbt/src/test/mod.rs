use nbtree::{compound, list, ByteArray, Compound, IntArray, List, LongArray, Tag, Value};

use crate::parse;


#[test]
fn booleans_are_bytes() {
    let value = parse("{a:true,b:false}").unwrap();
    let c = value.as_compound().unwrap();
    assert_eq!(c.get("a"), Some(&Value::Byte(1)));
    assert_eq!(c.get("b"), Some(&Value::Byte(0)));
}

#[test]
fn empty_and_invalid_input() {
    assert_eq!(parse(""), None);
    assert_eq!(parse("   \n"), None);
    assert_eq!(parse("{a:1"), None);
    assert_eq!(parse("{a:1}}"), None);
    assert_eq!(parse("[1,]"), None);
    assert_eq!(parse("\"unterminated"), None);
    assert_eq!(parse("a b"), None);
}

#[test]
fn suffixed_numbers() {
    assert_eq!(parse("1b"), Some(Value::Byte(1)));
    assert_eq!(parse("-2B"), Some(Value::Byte(-2)));
    assert_eq!(parse("3s"), Some(Value::Short(3)));
    assert_eq!(parse("4l"), Some(Value::Long(4)));
    assert_eq!(parse("4L"), Some(Value::Long(4)));
    assert_eq!(parse("1.5f"), Some(Value::Float(1.5)));
    assert_eq!(parse("2F"), Some(Value::Float(2.0)));
    assert_eq!(parse("2.5d"), Some(Value::Double(2.5)));
    assert_eq!(parse("1e3d"), Some(Value::Double(1000.0)));
}

#[test]
fn unsuffixed_numbers() {
    assert_eq!(parse("12"), Some(Value::Int(12)));
    assert_eq!(parse("+12"), Some(Value::Int(12)));
    assert_eq!(parse("-2147483648"), Some(Value::Int(i32::MIN)));
    assert_eq!(parse("2147483648"), Some(Value::Long(2147483648)));
    assert_eq!(parse("0.5"), Some(Value::Double(0.5)));
    assert_eq!(parse(".5"), Some(Value::Double(0.5)));
    assert_eq!(parse("1e2"), Some(Value::Double(100.0)));
}

#[test]
fn out_of_range_numbers_are_words() {
    assert_eq!(parse("300b"), Some(Value::from("300b")));
    assert_eq!(parse("1.5b"), Some(Value::from("1.5b")));
    assert_eq!(
        parse("99999999999999999999"),
        Some(Value::from("99999999999999999999"))
    );
}

#[test]
fn bare_words_are_strings() {
    assert_eq!(parse("stone"), Some(Value::from("stone")));
    assert_eq!(parse("minecraft.stone_1"), Some(Value::from("minecraft.stone_1")));
    assert_eq!(parse("12ab"), Some(Value::from("12ab")));
    assert_eq!(parse("-"), Some(Value::from("-")));
}

#[test]
fn quoted_strings_and_escapes() {
    assert_eq!(parse(r#""hello world""#), Some(Value::from("hello world")));
    assert_eq!(parse("'single'"), Some(Value::from("single")));
    assert_eq!(parse(r#""say \"hi\"""#), Some(Value::from(r#"say "hi""#)));
    assert_eq!(parse(r#"'it\'s'"#), Some(Value::from("it's")));
    assert_eq!(parse(r#""a\\b""#), Some(Value::from(r"a\b")));
    assert_eq!(parse(r#""a\nb""#), Some(Value::from(r"a\nb")));
    assert_eq!(parse(r#""""#), Some(Value::from("")));
    assert_eq!(parse(r#"'"'"#), Some(Value::from("\"")));
}

#[test]
fn compounds() {
    let value = parse(r#"{ id : "minecraft:chest", "Custom Name": 'box', nested: {x: 1s} }"#);
    let expected = compound! {
        "id" => "minecraft:chest",
        "Custom Name" => "box",
        "nested" => compound! { "x" => 1i16 },
    };
    assert_eq!(value, Some(Value::from(expected)));
    assert_eq!(parse("{}"), Some(Value::from(Compound::new())));
}

#[test]
fn compound_keeps_first_duplicate() {
    let value = parse("{a:1,b:2,a:3}").unwrap();
    let c = value.as_compound().unwrap();
    assert_eq!(c.len(), 2);
    assert_eq!(c.get_as::<i32>("a"), Some(1));
    assert_eq!(c.names().collect::<Vec<_>>(), ["a", "b"]);
}

#[test]
fn typed_arrays() {
    assert_eq!(
        parse("[B;1b,-1b]"),
        Some(Value::from(ByteArray::new(vec![1, -1])))
    );
    assert_eq!(parse("[I; 1, 2]"), Some(Value::from(IntArray::new(vec![1, 2]))));
    assert_eq!(parse("[L;1L,2]"), Some(Value::from(LongArray::new(vec![1, 2]))));
    assert_eq!(parse("[I;]"), Some(Value::from(IntArray::default())));
    assert_eq!(parse("[B;1]"), None);
    assert_eq!(parse("[I;1L]"), None);
}

#[test]
fn bare_brackets_coerce_to_arrays() {
    assert_eq!(parse("[1,2,3]"), Some(Value::from(IntArray::new(vec![1, 2, 3]))));
    assert_eq!(parse("[1,2L]"), Some(Value::from(LongArray::new(vec![1, 2]))));
    assert_eq!(parse("[3L]"), Some(Value::from(LongArray::new(vec![3]))));
}

#[test]
fn bare_brackets_of_one_kind_are_lists() {
    assert_eq!(parse("[]"), Some(Value::from(List::new())));
    assert_eq!(parse("[a, b]"), Some(Value::from(list!["a", "b"])));
    assert_eq!(parse("[1b,2b]"), Some(Value::from(list![1i8, 2i8])));

    let value = parse("[{a:1},{b:2}]").unwrap();
    let l = value.as_list().unwrap();
    assert_eq!(l.kind(), Some(Tag::Compound));
    assert_eq!(l.len(), 2);
}

#[test]
fn mixed_kinds_are_rejected() {
    assert_eq!(parse("[1,a]"), None);
    assert_eq!(parse("[1b,2s]"), None);
    assert_eq!(parse("{list:[1.5f,2d]}"), None);
}

#[test]
fn deep_nesting_is_rejected() {
    let deep = format!("{}{}", "[".repeat(1000), "]".repeat(1000));
    assert_eq!(parse(&deep), None);

    let shallow = format!("{}{}", "[".repeat(10), "]".repeat(10));
    assert!(parse(&shallow).is_some());
}
