//! Template expansion for schema strings
//!
//! A schema string may embed placeholders of the form
//! `${field-path|keyword|keyword(argument)}`. Each placeholder is resolved
//! against the input tree, piped through its keywords and substituted back as
//! text. A pipeline failure inside a placeholder is rendered inline as
//! `Error: <message>` and does not stop the rest of the string.
//!
//! Strings without placeholders but with a `|` take the bare-pipeline path:
//! the text before the first `|` is the literal starting value and the
//! pipeline result is returned as-is, which lets `split` feed `join`.
//!
//! Copyright (c) 2025 Jtran Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use super::pipeline::Pipeline;
use super::resolver::resolve_field;
use super::types::{stringify, KeywordContext, TransformOptions};
use regex::{Captures, Regex};
use serde_json::Value;
use std::sync::OnceLock;

static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();

/// Pattern for `${field}` and `${field|pipeline}`
pub fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\$\{([^|}]+)(\|[^}]*)?\}").expect("placeholder pattern is valid")
    })
}

/// Expands schema strings against one input tree
#[derive(Debug, Clone, Copy)]
pub struct TemplateExpander<'a> {
    pipeline: Pipeline<'a>,
    data: &'a Value,
    options: &'a TransformOptions,
}

impl<'a> TemplateExpander<'a> {
    pub fn new(pipeline: Pipeline<'a>, data: &'a Value, options: &'a TransformOptions) -> Self {
        Self { pipeline, data, options }
    }

    /// Resolve one schema string into its output value
    ///
    /// Every call gets a fresh keyword context shared by all placeholders in
    /// `text`.
    pub fn expand(&self, text: &str) -> Result<Value> {
        let mut ctx = KeywordContext::new(self.data, self.options);
        let regex = placeholder_regex();

        if let Some(caps) = regex.captures(text) {
            if let Some(value) = self.expand_whole(&caps, text, &mut ctx) {
                return Ok(value);
            }

            let expanded = regex.replace_all(text, |caps: &Captures<'_>| {
                let field = &caps[1];
                let pipeline = pipeline_text(caps);
                match self.evaluate(field, pipeline, &mut ctx) {
                    Ok(value) => stringify(&value),
                    Err(err) => render_inline(field, &err),
                }
            });
            return Ok(Value::String(expanded.into_owned()));
        }

        match text.split_once('|') {
            Some((base, pipeline)) => {
                ctx.set_current_key(base);
                self.pipeline
                    .run(Value::String(base.to_string()), pipeline, &mut ctx)
            }
            None => Ok(Value::String(text.to_string())),
        }
    }

    /// A string that is exactly one piped placeholder keeps an array result
    fn expand_whole(&self, caps: &Captures<'_>, text: &str, ctx: &mut KeywordContext<'_>) -> Option<Value> {
        let whole = caps.get(0)?;
        let pipeline = pipeline_text(caps);
        if whole.start() != 0 || whole.end() != text.len() || pipeline.is_empty() {
            return None;
        }

        let field = &caps[1];
        Some(match self.evaluate(field, pipeline, ctx) {
            Ok(value @ Value::Array(_)) => value,
            Ok(value) => Value::String(stringify(&value)),
            Err(err) => Value::String(render_inline(field, &err)),
        })
    }

    fn evaluate(&self, field: &str, pipeline: &str, ctx: &mut KeywordContext<'_>) -> Result<Value> {
        ctx.set_current_key(field);
        let value = resolve_field(field, self.data).cloned().unwrap_or(Value::Null);
        self.pipeline.run(value, pipeline, ctx)
    }
}

/// Pipeline text of a placeholder without its leading `|`
fn pipeline_text<'t>(caps: &Captures<'t>) -> &'t str {
    caps.get(2).map_or("", |m| &m.as_str()[1..])
}

fn render_inline(field: &str, err: &Error) -> String {
    let message = match err {
        Error::Keyword { source, .. } => source.to_string(),
        other => other.to_string(),
    };
    log::warn!("Placeholder '{}' failed: {}", field, message);
    format!("Error: {message}")
}
