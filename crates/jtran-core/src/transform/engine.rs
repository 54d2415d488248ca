//! Transformation entry point
//!
//! Copyright (c) 2025 Jtran Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use super::pipeline::Pipeline;
use super::registry::KeywordRegistry;
use super::template::TemplateExpander;
use super::types::{value_kind, KeywordContext, KeywordHandler, KeywordResult, TransformOptions};
use super::walker::SchemaWalker;
use serde_json::Value;

/// Schema-driven transformer owning its keyword registry and options
///
/// Registration needs `&mut self` while [`transform`](Self::transform) only
/// borrows, so a configured transformer can be shared freely (for example
/// behind an `Arc`) once setup is done.
#[derive(Debug, Clone, Default)]
pub struct Transformer {
    registry: KeywordRegistry,
    options: TransformOptions,
}

impl Transformer {
    /// Transformer with the stock keywords and default options
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: TransformOptions) -> Self {
        Self {
            registry: KeywordRegistry::new(),
            options,
        }
    }

    pub(crate) fn from_parts(registry: KeywordRegistry, options: TransformOptions) -> Self {
        Self { registry, options }
    }

    /// Install or override a keyword for all later transformations
    pub fn register_keyword<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(Value, &mut KeywordContext<'_>, &str) -> KeywordResult + Send + Sync + 'static,
    {
        self.registry.register(name, handler);
    }

    pub fn register_handler(&mut self, name: impl Into<String>, handler: KeywordHandler) {
        self.registry.register_handler(name, handler);
    }

    pub fn registry(&self) -> &KeywordRegistry {
        &self.registry
    }

    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Transform `data` into the shape described by `schema`
    ///
    /// The schema must be an object. Any error aborts the whole transform.
    pub fn transform(&self, schema: &Value, data: &Value) -> Result<Value> {
        let Value::Object(schema) = schema else {
            return Err(Error::InvalidSchema {
                found: value_kind(schema).to_string(),
            });
        };

        let span = tracing::debug_span!("transform", keys = schema.len());
        let _guard = span.enter();

        let pipeline = Pipeline::new(&self.registry, self.options.strict);
        let expander = TemplateExpander::new(pipeline, data, &self.options);
        SchemaWalker::new(expander, self.options.max_depth)
            .walk(schema)
            .map(Value::Object)
    }

    /// Expand a single schema string the way the walker expands values
    pub fn expand(&self, text: &str, data: &Value) -> Result<Value> {
        let pipeline = Pipeline::new(&self.registry, self.options.strict);
        TemplateExpander::new(pipeline, data, &self.options).expand(text)
    }
}

/// Transform with the stock keywords and default options
pub fn transform(schema: &Value, data: &Value) -> Result<Value> {
    Transformer::new().transform(schema, data)
}
