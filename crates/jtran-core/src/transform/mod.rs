//! Schema-driven transformation of JSON values
//!
//! A schema is a JSON object whose keys and string values may embed
//! placeholders referencing fields of the input, each optionally piped
//! through keywords:
//!
//! ```text
//! ${field}                      direct lookup
//! ${user->address->city}        nested traversal
//! ${orders[0]->id}              array index
//! ${orders[status=open]->id}    first element whose field matches
//! ${name|trim|uppercase(0,1)}   keyword pipeline
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Handler signature, keyword context, options and keyword errors
//! - [`resolver`] - Field path resolution
//! - [`pipeline`] - Keyword step parsing and execution
//! - [`registry`] - Two-tier user/stock keyword lookup
//! - [`built_in`] - Stock keywords
//! - [`template`] - Placeholder expansion and the bare-pipeline path
//! - [`walker`] - Recursive schema traversal
//! - [`engine`] - The [`Transformer`] entry point
//! - [`builder`] - Fluent builder API for transformers
//!
//! # Examples
//!
//! ```
//! use jtran_core::TransformerBuilder;
//! use serde_json::json;
//!
//! let transformer = TransformerBuilder::new()
//!     .keyword("exclaim", |value, _ctx, _arg| {
//!         Ok(json!(format!("{}!", value.as_str().unwrap_or_default())))
//!     })
//!     .build();
//!
//! let schema = json!({"greeting": "Hello ${name|exclaim}"});
//! let data = json!({"name": "Ada"});
//! let output = transformer.transform(&schema, &data).unwrap();
//! assert_eq!(output, json!({"greeting": "Hello Ada!"}));
//! ```
//!
//! Copyright (c) 2025 Jtran Team
//! Licensed under the Apache-2.0 license

// Core types and error definitions
pub mod types;

pub mod resolver;
pub mod pipeline;
pub mod registry;

// Stock keywords
pub mod built_in;

pub mod template;
pub mod walker;
pub mod engine;
pub mod builder;

#[cfg(test)]
mod tests;


pub use types::{
    stringify, KeywordContext, KeywordError, KeywordHandler, KeywordResult, TransformOptions,
    CURRENT_KEY,
};
pub use resolver::resolve_field;
pub use pipeline::{KeywordStep, Pipeline};
pub use registry::KeywordRegistry;
pub use template::TemplateExpander;
pub use walker::SchemaWalker;
pub use engine::{transform, Transformer};
pub use builder::TransformerBuilder;
