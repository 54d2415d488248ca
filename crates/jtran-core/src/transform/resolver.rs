//! Field path resolution against the input tree
//!
//! A field path is either a plain key looked up directly on the root object,
//! or a `->`-separated chain of segments. Each segment is a property name,
//! `key[index]` for array access, or `key[field=value]` to select the first
//! array element whose `field` renders as `value`.
//!
//! Resolution never fails: any missing key, type mismatch, out-of-range index
//! or unmatched filter yields `None`.
//!
//! Copyright (c) 2025 Jtran Team
//! Licensed under the Apache-2.0 license

use serde_json::Value;

/// Separator between path segments
pub const PATH_SEPARATOR: &str = "->";

/// A single parsed path segment
#[derive(Debug, Clone, PartialEq)]
pub enum Segment<'p> {
    /// Object property access
    Property(&'p str),
    /// Integer array access (`key[3]`); negative indices never match
    Index { key: &'p str, index: i64 },
    /// First array element whose `field` equals `value` (`key[field=value]`)
    Filter {
        key: &'p str,
        field: &'p str,
        value: &'p str,
    },
    /// Bracketed selector that is neither an integer nor `field=value`
    Invalid,
}

impl<'p> Segment<'p> {
    /// Parse one `->`-delimited segment
    pub fn parse(segment: &'p str) -> Self {
        let (Some(open), true) = (segment.find('['), segment.ends_with(']')) else {
            return Segment::Property(segment);
        };

        let key = &segment[..open];
        let selector = &segment[open + 1..segment.len() - 1];

        if let Ok(index) = selector.parse::<i64>() {
            return Segment::Index { key, index };
        }

        match selector.split_once('=') {
            Some((field, value)) => Segment::Filter { key, field, value },
            None => Segment::Invalid,
        }
    }

    fn select<'a>(&self, current: &'a Value) -> Option<&'a Value> {
        match *self {
            Segment::Property(key) => current.as_object()?.get(key),
            Segment::Index { key, index } => {
                let array = current.as_object()?.get(key)?.as_array()?;
                let index = usize::try_from(index).ok()?;
                array.get(index)
            }
            Segment::Filter { key, field, value } => {
                let array = current.as_object()?.get(key)?.as_array()?;
                array.iter().find(|item| {
                    item.as_object()
                        .and_then(|obj| obj.get(field))
                        .is_some_and(|candidate| filter_text(candidate) == value)
                })
            }
            Segment::Invalid => None,
        }
    }
}

/// Resolve `path` against `data`
///
/// Paths without `->` are a single direct key lookup, so brackets in them are
/// part of the key name.
pub fn resolve_field<'a>(path: &str, data: &'a Value) -> Option<&'a Value> {
    if !path.contains(PATH_SEPARATOR) {
        return data.as_object()?.get(path);
    }

    path.split(PATH_SEPARATOR)
        .map(Segment::parse)
        .try_fold(data, |current, segment| segment.select(current))
}

/// Text used when comparing a filter value against an element field
fn filter_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
