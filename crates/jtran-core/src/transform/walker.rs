//! Recursive schema traversal
//!
//! Copyright (c) 2025 Jtran Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use super::template::TemplateExpander;
use serde_json::{Map, Value};

/// Walks a schema object, expanding every key and string value
#[derive(Debug, Clone, Copy)]
pub struct SchemaWalker<'a> {
    expander: TemplateExpander<'a>,
    max_depth: usize,
}

impl<'a> SchemaWalker<'a> {
    pub fn new(expander: TemplateExpander<'a>, max_depth: usize) -> Self {
        Self { expander, max_depth }
    }

    /// Transform a top-level schema object
    pub fn walk(&self, schema: &Map<String, Value>) -> Result<Map<String, Value>> {
        self.walk_object(schema, 1)
    }

    fn walk_object(&self, schema: &Map<String, Value>, depth: usize) -> Result<Map<String, Value>> {
        if depth > self.max_depth {
            return Err(Error::DepthExceeded { limit: self.max_depth });
        }

        let mut transformed = Map::with_capacity(schema.len());
        for (key, value) in schema {
            let key = self.resolve_key(key)?;
            let value = self.walk_value(&key, value, depth)?;
            transformed.insert(key, value);
        }
        Ok(transformed)
    }

    fn resolve_key(&self, key: &str) -> Result<String> {
        let resolved = self.expander.expand(key).map_err(|source| Error::KeyResolution {
            key: key.to_string(),
            source: Box::new(source),
        })?;

        match resolved {
            Value::String(resolved) => Ok(resolved),
            _ => Err(Error::NonStringKey { key: key.to_string() }),
        }
    }

    fn walk_value(&self, key: &str, value: &Value, depth: usize) -> Result<Value> {
        match value {
            Value::String(text) => self.expander.expand(text).map_err(|source| Error::Value {
                key: key.to_string(),
                source: Box::new(source),
            }),
            Value::Object(nested) => self
                .walk_object(nested, depth + 1)
                .map(Value::Object)
                .map_err(|source| Error::Nested {
                    key: key.to_string(),
                    source: Box::new(source),
                }),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    self.walk_item(item, depth).map_err(|source| Error::ArrayItem {
                        key: key.to_string(),
                        index,
                        source: Box::new(source),
                    })
                })
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            Value::Null | Value::Bool(_) | Value::Number(_) => Ok(value.clone()),
        }
    }

    fn walk_item(&self, item: &Value, depth: usize) -> Result<Value> {
        match item {
            Value::String(text) => self.expander.expand(text),
            Value::Object(nested) => self.walk_object(nested, depth + 1).map(Value::Object),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::Array(_) => Ok(item.clone()),
        }
    }
}
