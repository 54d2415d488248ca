//! Core types for the keyword transformation system
//!
//! This module defines the handler signature, the per-string execution
//! context handed to handlers, engine options, and the keyword error type.
//!
//! Copyright (c) 2025 Jtran Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;

/// Context key holding the field path (or bare base text) being transformed
pub const CURRENT_KEY: &str = "currentKey";

/// Errors reported by keyword handlers
#[derive(Error, Debug)]
pub enum KeywordError {
    /// Handler was given the wrong kind of value
    #[error("{keyword} keyword expects {expected}")]
    TypeMismatch { keyword: String, expected: String },

    /// Argument text could not be parsed or is out of range
    #[error("{keyword} keyword: {message}")]
    InvalidArgument { keyword: String, message: String },

    /// Failure raised by a user-registered handler
    #[error(transparent)]
    Custom(#[from] anyhow::Error),
}

impl KeywordError {
    pub fn type_mismatch(keyword: &str, expected: &str) -> Self {
        KeywordError::TypeMismatch {
            keyword: keyword.to_string(),
            expected: expected.to_string(),
        }
    }

    pub fn invalid_argument(keyword: &str, message: impl Into<String>) -> Self {
        KeywordError::InvalidArgument {
            keyword: keyword.to_string(),
            message: message.into(),
        }
    }
}

/// Result returned by every keyword handler
pub type KeywordResult = std::result::Result<Value, KeywordError>;

/// A keyword handler: `(value, context, argument) -> value`
///
/// The argument is the raw text between the parentheses of `name(argument)`
/// (or after the colon of `name:argument`); each handler defines its own
/// micro-syntax for it.
pub type KeywordHandler =
    Arc<dyn Fn(Value, &mut KeywordContext<'_>, &str) -> KeywordResult + Send + Sync>;

/// Options controlling engine behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformOptions {
    /// Fail on unknown keywords instead of skipping them
    pub strict: bool,
    /// Maximum schema nesting depth
    pub max_depth: usize,
    /// Use full Unicode case mapping in `uppercase`, `lowercase` and `title`
    pub unicode_casing: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            strict: false,
            max_depth: 128,
            unicode_casing: false,
        }
    }
}

/// Mutable context shared by all keyword invocations of one schema string
///
/// `currentKey` is overwritten by every placeholder in the string, so
/// handlers only see the value for the placeholder they run in.
#[derive(Debug, Clone)]
pub struct KeywordContext<'a> {
    data: &'a Value,
    options: &'a TransformOptions,
    values: Map<String, Value>,
}

impl<'a> KeywordContext<'a> {
    pub fn new(data: &'a Value, options: &'a TransformOptions) -> Self {
        Self {
            data,
            options,
            values: Map::new(),
        }
    }

    /// The input tree being transformed
    pub fn data(&self) -> &'a Value {
        self.data
    }

    pub fn options(&self) -> &'a TransformOptions {
        self.options
    }

    /// Field path or bare base text currently being transformed
    pub fn current_key(&self) -> Option<&str> {
        self.values.get(CURRENT_KEY).and_then(Value::as_str)
    }

    pub fn set_current_key(&mut self, key: &str) {
        self.values
            .insert(CURRENT_KEY.to_string(), Value::String(key.to_string()));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Store a value for later handlers in the same string
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(key.into(), value)
    }
}

/// Name used in error messages for the kind of a value
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Render a value as text the way placeholders substitute it
///
/// Null becomes the empty string, strings are emitted raw, and everything
/// else uses its compact JSON text.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
