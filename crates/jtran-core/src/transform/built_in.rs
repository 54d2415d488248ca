//! Built-in keyword handlers
//!
//! Range keywords share one argument grammar: an empty argument covers the
//! whole string, otherwise `start,end` with `start` clamped to zero and `end`
//! clamped to the string's byte length.
//!
//! Two indexing families exist and are kept apart on purpose:
//!
//! - `substring`, `trim`, `truncate`, `padleft` and `padright` count bytes.
//!   A range that does not fall on character boundaries is rejected.
//! - `capitalize`, `lowercase`, `uppercase`, `title`, `redact` and `reverse`
//!   index characters, with `end` additionally clamped to the character
//!   count.
//!
//! For ASCII input the two families agree.
//!
//! Copyright (c) 2025 Jtran Team
//! Licensed under the Apache-2.0 license

use super::resolver::resolve_field;
use super::types::{value_kind, KeywordContext, KeywordError, KeywordResult};
use serde_json::Value;

/// Signature of a stock keyword handler
pub type StockHandler = fn(Value, &mut KeywordContext<'_>, &str) -> KeywordResult;

/// Every stock keyword, by name
pub const STOCK_KEYWORDS: &[(&str, StockHandler)] = &[
    ("capitalize", capitalize),
    ("foreach", foreach),
    ("join", join),
    ("lowercase", lowercase),
    ("padleft", padleft),
    ("padright", padright),
    ("redact", redact),
    ("replace", replace),
    ("reverse", reverse),
    ("snakecase", snakecase),
    ("split", split),
    ("substring", substring),
    ("title", title),
    ("trim", trim),
    ("truncate", truncate),
    ("uppercase", uppercase),
];

fn expect_string(keyword: &str, value: Value) -> Result<String, KeywordError> {
    match value {
        Value::String(s) => Ok(s),
        _ => Err(KeywordError::type_mismatch(keyword, "a string value")),
    }
}

/// Parse a `start,end` range argument against a string of `max_len` bytes
///
/// Returns the clamped bounds; `end` may still be smaller than `start`.
pub fn parse_range(keyword: &str, argument: &str, max_len: usize) -> Result<(usize, usize), KeywordError> {
    if argument.is_empty() {
        return Ok((0, max_len));
    }

    let parts: Vec<&str> = argument.split(',').collect();
    let [start, end] = parts.as_slice() else {
        return Err(KeywordError::invalid_argument(
            keyword,
            "invalid input range, expected two comma-separated values",
        ));
    };

    let start: i64 = start
        .parse()
        .map_err(|e| KeywordError::invalid_argument(keyword, format!("invalid start index: {e}")))?;
    let end: i64 = end
        .parse()
        .map_err(|e| KeywordError::invalid_argument(keyword, format!("invalid end index: {e}")))?;

    let start = usize::try_from(start).unwrap_or(0);
    let end = usize::try_from(end).unwrap_or(0).min(max_len);
    Ok((start, end))
}

/// Resolve a range into byte offsets that are safe to slice with
fn byte_range(keyword: &str, s: &str, argument: &str) -> Result<(usize, usize), KeywordError> {
    let (start, end) = parse_range(keyword, argument, s.len())?;
    if start > end {
        return Err(KeywordError::invalid_argument(
            keyword,
            format!("start index {start} is past end index {end}"),
        ));
    }
    if !s.is_char_boundary(start) || !s.is_char_boundary(end) {
        return Err(KeywordError::invalid_argument(
            keyword,
            format!("range {start}..{end} splits a multi-byte character"),
        ));
    }
    Ok((start, end))
}

/// Apply `f` to the characters of `s` inside the range argument
fn with_char_range<F>(keyword: &str, value: Value, argument: &str, f: F) -> KeywordResult
where
    F: FnOnce(&mut [char]),
{
    let s = expect_string(keyword, value)?;
    let (start, end) = parse_range(keyword, argument, s.len())?;

    let mut chars: Vec<char> = s.chars().collect();
    let end = end.min(chars.len());
    if start < end {
        f(&mut chars[start..end]);
    }
    Ok(Value::String(chars.into_iter().collect()))
}

#[derive(Debug, Clone, Copy)]
enum Case {
    Upper,
    Lower,
    Title,
}

impl Case {
    fn full(self, c: char) -> String {
        match self {
            Case::Upper | Case::Title => c.to_uppercase().collect(),
            Case::Lower => c.to_lowercase().collect(),
        }
    }

    /// Keep only the first byte of the converted character
    ///
    /// Matches the historical output: ASCII converts correctly, multi-byte
    /// results collapse to their lead byte read as a Latin-1 character.
    fn first_byte(self, c: char) -> char {
        self.full(c).bytes().next().map(char::from).unwrap_or(c)
    }
}

fn convert_case(keyword: &str, case: Case, value: Value, ctx: &KeywordContext<'_>, argument: &str) -> KeywordResult {
    if !ctx.options().unicode_casing {
        return with_char_range(keyword, value, argument, |chars| {
            for c in chars.iter_mut() {
                *c = case.first_byte(*c);
            }
        });
    }

    let s = expect_string(keyword, value)?;
    let (start, end) = parse_range(keyword, argument, s.len())?;
    let mut out = String::with_capacity(s.len());
    for (i, c) in s.chars().enumerate() {
        if i >= start && i < end {
            out.push_str(&case.full(c));
        } else {
            out.push(c);
        }
    }
    Ok(Value::String(out))
}

/// Single-character case mapping; characters whose mapping expands are kept
fn simple_upper(c: char) -> char {
    let mut mapped = c.to_uppercase();
    match (mapped.next(), mapped.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

fn simple_lower(c: char) -> char {
    let mut mapped = c.to_lowercase();
    match (mapped.next(), mapped.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// Circled and squared Latin letters; alphabetic and cased, but symbols
const SYMBOL_LETTERS: &[(char, char)] = &[
    ('\u{24B6}', '\u{24E9}'),
    ('\u{1F130}', '\u{1F149}'),
    ('\u{1F150}', '\u{1F169}'),
    ('\u{1F170}', '\u{1F189}'),
];

fn is_symbol_letter(c: char) -> bool {
    SYMBOL_LETTERS.iter().any(|&(lo, hi)| (lo..=hi).contains(&c))
}

/// Letter test for word capitalization
///
/// Letter numbers (`Ⅻ`) and symbol letters (`Ⓐ`) are excluded. Combining
/// marks that carry the Alphabetic property still count as letters.
fn is_letter(c: char) -> bool {
    c.is_alphabetic() && !c.is_numeric() && !is_symbol_letter(c)
}

/// Upper-case letter test, limited to the `Lu` category
fn is_upper_letter(c: char) -> bool {
    c.is_uppercase() && !c.is_numeric() && !is_symbol_letter(c)
}

pub fn capitalize(value: Value, _ctx: &mut KeywordContext<'_>, argument: &str) -> KeywordResult {
    with_char_range("capitalize", value, argument, |chars| {
        let mut capitalize_next = true;
        for c in chars.iter_mut() {
            if capitalize_next && is_letter(*c) {
                *c = simple_upper(*c);
                capitalize_next = false;
            } else if c.is_whitespace() {
                capitalize_next = true;
            }
        }
    })
}

pub fn lowercase(value: Value, ctx: &mut KeywordContext<'_>, argument: &str) -> KeywordResult {
    convert_case("lowercase", Case::Lower, value, ctx, argument)
}

pub fn uppercase(value: Value, ctx: &mut KeywordContext<'_>, argument: &str) -> KeywordResult {
    convert_case("uppercase", Case::Upper, value, ctx, argument)
}

/// Title-case each character individually, not each word
pub fn title(value: Value, ctx: &mut KeywordContext<'_>, argument: &str) -> KeywordResult {
    convert_case("title", Case::Title, value, ctx, argument)
}

pub fn redact(value: Value, _ctx: &mut KeywordContext<'_>, argument: &str) -> KeywordResult {
    with_char_range("redact", value, argument, |chars| chars.fill('*'))
}

pub fn reverse(value: Value, _ctx: &mut KeywordContext<'_>, argument: &str) -> KeywordResult {
    with_char_range("reverse", value, argument, |chars| chars.reverse())
}

pub fn trim(value: Value, _ctx: &mut KeywordContext<'_>, argument: &str) -> KeywordResult {
    let s = expect_string("trim", value)?;
    let (start, end) = byte_range("trim", &s, argument)?;
    let trimmed = s[start..end].trim();
    Ok(Value::String(format!("{}{}{}", &s[..start], trimmed, &s[end..])))
}

pub fn substring(value: Value, _ctx: &mut KeywordContext<'_>, argument: &str) -> KeywordResult {
    let s = expect_string("substring", value)?;
    let (start, end) = byte_range("substring", &s, argument)?;
    Ok(Value::String(s[start..end].to_string()))
}

pub fn truncate(value: Value, _ctx: &mut KeywordContext<'_>, argument: &str) -> KeywordResult {
    let s = expect_string("truncate", value)?;
    let length: i64 = argument
        .parse()
        .map_err(|_| KeywordError::invalid_argument("truncate", "invalid length"))?;

    let length = match usize::try_from(length) {
        Ok(length) if length <= s.len() => length,
        _ => return Err(KeywordError::invalid_argument("truncate", "length out of bounds")),
    };

    match s.get(..length) {
        Some(prefix) => Ok(Value::String(prefix.to_string())),
        None => Err(KeywordError::invalid_argument(
            "truncate",
            format!("length {length} splits a multi-byte character"),
        )),
    }
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Left,
    Right,
}

fn pad(keyword: &str, side: Side, value: Value, argument: &str) -> KeywordResult {
    let s = expect_string(keyword, value)?;

    let parts: Vec<&str> = argument.split(',').collect();
    let [pad_char, length] = parts.as_slice() else {
        return Err(KeywordError::invalid_argument(
            keyword,
            "invalid input format, expected 'char,length'",
        ));
    };
    let length: i64 = length
        .parse()
        .map_err(|_| KeywordError::invalid_argument(keyword, "invalid length"))?;

    let count = usize::try_from(length)
        .ok()
        .and_then(|length| length.checked_sub(s.len()))
        .unwrap_or(0);
    if count == 0 || pad_char.is_empty() {
        return Ok(Value::String(s));
    }

    let out_of_bounds = || KeywordError::invalid_argument(keyword, "length out of bounds");
    let padding_len = count.checked_mul(pad_char.len()).ok_or_else(out_of_bounds)?;
    let mut padding = String::new();
    padding.try_reserve_exact(padding_len).map_err(|_| out_of_bounds())?;
    padding.extend(std::iter::repeat(*pad_char).take(count));

    Ok(Value::String(match side {
        Side::Left => padding + &s,
        Side::Right => s + &padding,
    }))
}

pub fn padleft(value: Value, _ctx: &mut KeywordContext<'_>, argument: &str) -> KeywordResult {
    pad("padleft", Side::Left, value, argument)
}

pub fn padright(value: Value, _ctx: &mut KeywordContext<'_>, argument: &str) -> KeywordResult {
    pad("padright", Side::Right, value, argument)
}

pub fn replace(value: Value, _ctx: &mut KeywordContext<'_>, argument: &str) -> KeywordResult {
    let s = expect_string("replace", value)?;
    let (old, new) = argument.split_once(',').ok_or_else(|| {
        KeywordError::invalid_argument("replace", "invalid input format, expected 'old,new'")
    })?;
    Ok(Value::String(s.replace(old, new)))
}

pub fn split(value: Value, _ctx: &mut KeywordContext<'_>, argument: &str) -> KeywordResult {
    let s = expect_string("split", value)?;
    if argument.is_empty() {
        return Ok(Value::Array(vec![Value::String(s)]));
    }
    Ok(Value::Array(
        s.split(argument).map(|part| Value::String(part.to_string())).collect(),
    ))
}

pub fn join(value: Value, _ctx: &mut KeywordContext<'_>, argument: &str) -> KeywordResult {
    let Value::Array(items) = value else {
        return Err(KeywordError::type_mismatch("join", "an array of strings"));
    };

    let parts = items
        .iter()
        .map(|item| item.as_str().ok_or_else(|| KeywordError::type_mismatch("join", "an array of strings")))
        .collect::<Result<Vec<&str>, _>>()?;
    Ok(Value::String(parts.join(argument)))
}

/// Insert `_` before each upper-case letter after the first character and lower-case everything
pub fn snakecase(value: Value, _ctx: &mut KeywordContext<'_>, _argument: &str) -> KeywordResult {
    let s = expect_string("snakecase", value)?;
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && is_upper_letter(c) {
            out.push('_');
        }
        out.push(simple_lower(c));
    }
    Ok(Value::String(out))
}

/// Collect the string at sub-field path `argument` from every element
pub fn foreach(value: Value, _ctx: &mut KeywordContext<'_>, argument: &str) -> KeywordResult {
    let Value::Array(items) = value else {
        return Err(KeywordError::type_mismatch("foreach", "an array of values"));
    };

    let mut results = Vec::with_capacity(items.len());
    for item in &items {
        if !item.is_object() {
            return Err(KeywordError::type_mismatch("foreach", "an array of objects"));
        }
        match resolve_field(argument, item) {
            Some(Value::String(s)) => results.push(Value::String(s.clone())),
            other => {
                let found = other.map_or("null", value_kind);
                return Err(KeywordError::invalid_argument(
                    "foreach",
                    format!("expected string subfield but got {found}"),
                ));
            }
        }
    }
    Ok(Value::Array(results))
}
