//! Builder for configuring a transformer
//!
//! This module provides a fluent builder API for assembling a [`Transformer`]
//! with custom keywords and engine options.
//!
//! Copyright (c) 2025 Jtran Team
//! Licensed under the Apache-2.0 license

use super::engine::Transformer;
use super::registry::KeywordRegistry;
use super::types::{KeywordContext, KeywordHandler, KeywordResult, TransformOptions};
use serde_json::Value;

/// Builder for creating transformers
#[derive(Debug, Default)]
pub struct TransformerBuilder {
    registry: KeywordRegistry,
    options: TransformOptions,
}

impl TransformerBuilder {
    /// Create a new builder with the stock keywords and default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom keyword
    pub fn keyword<F>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Value, &mut KeywordContext<'_>, &str) -> KeywordResult + Send + Sync + 'static,
    {
        self.registry.register(name, handler);
        self
    }

    /// Register an already shared handler
    pub fn handler(mut self, name: impl Into<String>, handler: KeywordHandler) -> Self {
        self.registry.register_handler(name, handler);
        self
    }

    /// Replace all options at once
    pub fn options(mut self, options: TransformOptions) -> Self {
        self.options = options;
        self
    }

    /// Fail on unknown keywords
    pub fn strict(mut self, strict: bool) -> Self {
        self.options.strict = strict;
        self
    }

    /// Set the maximum schema nesting depth
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.options.max_depth = max_depth;
        self
    }

    /// Use full Unicode case mapping
    pub fn unicode_casing(mut self, enabled: bool) -> Self {
        self.options.unicode_casing = enabled;
        self
    }

    /// Build the transformer
    pub fn build(self) -> Transformer {
        Transformer::from_parts(self.registry, self.options)
    }
}
