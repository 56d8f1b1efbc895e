use nbtree::{ByteArray, Compound, IntArray, List, LongArray, Tag, Value};
use nom::branch::alt;
use nom::bytes::complete::take_while1;
use nom::character::complete::{char, digit0, digit1, multispace0, one_of};
use nom::combinator::{map, opt, recognize};
use nom::error::{Error, ErrorKind, ParseError};
use nom::multi::separated_list0;
use nom::sequence::{delimited, pair, separated_pair, terminated, tuple};
use nom::IResult;

/// Nesting beyond this is rejected rather than risking the stack.
const MAX_DEPTH: usize = 128;

pub(crate) fn parse_complete(text: &str) -> Option<Value> {
    let (rest, value) = delimited(multispace0, |i| value(i, 0), multispace0)(text).ok()?;
    rest.is_empty().then_some(value)
}

fn value(input: &str, depth: usize) -> IResult<&str, Value> {
    if depth > MAX_DEPTH {
        return Err(nom::Err::Failure(Error::from_error_kind(
            input,
            ErrorKind::TooLarge,
        )));
    }
    alt((
        map(|i| compound(i, depth + 1), Value::Compound),
        |i| bracketed(i, depth + 1),
        map(parse_quoted, Value::String),
        map(bare_word, word_value),
    ))(input)
}

fn ws<'a, O>(
    inner: impl FnMut(&'a str) -> IResult<&'a str, O>,
) -> impl FnMut(&'a str) -> IResult<&'a str, O> {
    delimited(multispace0, inner, multispace0)
}

fn compound(input: &str, depth: usize) -> IResult<&str, Compound> {
    let entry = separated_pair(parse_name, ws(char(':')), |i| value(i, depth));
    let (input, entries) = delimited(
        pair(char('{'), multispace0),
        separated_list0(ws(char(',')), entry),
        pair(multispace0, char('}')),
    )(input)?;

    // Collecting keeps the first value of a repeated name.
    Ok((input, entries.into_iter().collect()))
}

fn parse_name(input: &str) -> IResult<&str, String> {
    alt((parse_quoted, map(bare_word, str::to_owned)))(input)
}

/// Anything in square brackets: typed arrays, and lists which may turn out
/// to be arrays.
fn bracketed(input: &str, depth: usize) -> IResult<&str, Value> {
    let (input, _) = pair(char('['), multispace0)(input)?;
    let (input, prefix) = opt(terminated(one_of("BIL"), ws(char(';'))))(input)?;
    let (rest, items) = terminated(
        separated_list0(ws(char(',')), |i| value(i, depth)),
        pair(multispace0, char(']')),
    )(input)?;

    let value = match prefix {
        Some(prefix) => typed_array(prefix, &items),
        None => coerce_list(items),
    };
    match value {
        Some(value) => Ok((rest, value)),
        None => Err(nom::Err::Failure(Error::from_error_kind(
            input,
            ErrorKind::Verify,
        ))),
    }
}

fn typed_array(prefix: char, items: &[Value]) -> Option<Value> {
    Some(match prefix {
        'B' => Value::ByteArray(ByteArray::new(
            items.iter().map(Value::as_i8).collect::<Option<_>>()?,
        )),
        'I' => Value::IntArray(IntArray::new(
            items.iter().map(Value::as_i32).collect::<Option<_>>()?,
        )),
        _ => Value::LongArray(LongArray::new(
            items.iter().map(as_long).collect::<Option<_>>()?,
        )),
    })
}

fn as_long(value: &Value) -> Option<i64> {
    match *value {
        Value::Int(v) => Some(v as i64),
        Value::Long(v) => Some(v),
        _ => None,
    }
}

/// Bare brackets of ints are an int array, of ints and longs a long array.
/// Anything else must share one tag to be a list.
fn coerce_list(items: Vec<Value>) -> Option<Value> {
    let first = match items.first() {
        Some(first) => first.tag(),
        None => return Some(Value::List(List::new())),
    };

    let integral = items
        .iter()
        .all(|v| matches!(v.tag(), Tag::Int | Tag::Long));
    if integral {
        return Some(if items.iter().all(|v| v.tag() == Tag::Int) {
            Value::IntArray(items.iter().filter_map(Value::as_i32).collect())
        } else {
            Value::LongArray(items.iter().filter_map(as_long).collect())
        });
    }

    if items.iter().any(|v| v.tag() != first) {
        return None;
    }
    Some(Value::List(List::from_values(items)))
}

fn is_bare_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+')
}

fn bare_word(input: &str) -> IResult<&str, &str> {
    take_while1(is_bare_char)(input)
}

/// A bare word is a boolean, a number if the whole word is one, or else a
/// string.
fn word_value(word: &str) -> Value {
    match word {
        "true" => Value::Byte(1),
        "false" => Value::Byte(0),
        _ => number(word).unwrap_or_else(|| Value::String(word.to_owned())),
    }
}

fn number(word: &str) -> Option<Value> {
    let (suffix, digits) = numeric(word).ok()?;
    let integral = !digits.contains(|c: char| matches!(c, '.' | 'e' | 'E'));

    match suffix {
        "" if integral => digits
            .parse()
            .map(Value::Int)
            .or_else(|_| digits.parse().map(Value::Long))
            .ok(),
        "" => digits.parse().map(Value::Double).ok(),
        "b" | "B" if integral => digits.parse().map(Value::Byte).ok(),
        "s" | "S" if integral => digits.parse().map(Value::Short).ok(),
        "l" | "L" if integral => digits.parse().map(Value::Long).ok(),
        "f" | "F" => digits.parse().map(Value::Float).ok(),
        "d" | "D" => digits.parse().map(Value::Double).ok(),
        _ => None,
    }
}

/// Sign, digits, an optional fraction and an optional exponent.
fn numeric(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        opt(one_of("+-")),
        alt((
            recognize(pair(digit1, opt(pair(char('.'), digit0)))),
            recognize(pair(char('.'), digit1)),
        )),
        opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
    )))(input)
}

fn parse_quoted(input: &str) -> IResult<&str, String> {
    alt((
        delimited(char('"'), parse_escaped('"'), char('"')),
        delimited(char('\''), parse_escaped('\''), char('\'')),
    ))(input)
}

/// The body of a quoted string, up to but not including the closing quote.
/// Only quotes and backslashes are escapes; any other backslash is kept.
fn parse_escaped<'a>(surround: char) -> impl FnMut(&'a str) -> IResult<&'a str, String> {
    move |input: &'a str| {
        let mut owned = String::new();
        let mut chars = input.char_indices();
        while let Some((i, c)) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some((_, e @ ('"' | '\'' | '\\'))) => owned.push(e),
                    Some((_, e)) => {
                        owned.push('\\');
                        owned.push(e);
                    }
                    None => break,
                },
                c if c == surround => return Ok((&input[i..], owned)),
                c => owned.push(c),
            }
        }
        Err(nom::Err::Error(Error::from_error_kind(input, ErrorKind::Char)))
    }
}
