//! Keyword pipeline execution
//!
//! A pipeline is `|`-separated keyword steps applied left to right. Each step
//! is `name`, `name(argument)` or `name:argument`; the argument is handed to
//! the handler as raw text.
//!
//! Copyright (c) 2025 Jtran Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use super::registry::KeywordRegistry;
use super::types::KeywordContext;
use serde_json::Value;

/// A parsed pipeline step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordStep<'s> {
    pub name: &'s str,
    pub argument: &'s str,
}

impl<'s> KeywordStep<'s> {
    /// Parse a single step
    ///
    /// The parenthesised form wins when the step contains `(` and ends with
    /// `)`: the name is everything before the first `(` and the argument runs
    /// to the final character. Otherwise the first `:` separates name and
    /// argument, so `uppercase:foo` runs `uppercase` with argument `foo`
    /// rather than being an unknown keyword. [`parse_steps`] checks the
    /// whole step against the registry first, which keeps keywords whose
    /// names contain `:` callable.
    pub fn parse(step: &'s str) -> Self {
        if let (Some(open), true) = (step.find('('), step.ends_with(')')) {
            return Self {
                name: &step[..open],
                argument: &step[open + 1..step.len() - 1],
            };
        }

        match step.split_once(':') {
            Some((name, argument)) => Self { name, argument },
            None => Self { name: step, argument: "" },
        }
    }
}

/// Split pipeline text into trimmed steps
///
/// A step that exactly names a registered keyword is taken whole.
pub fn parse_steps<'s, 'r>(
    pipeline: &'s str,
    registry: &'r KeywordRegistry,
) -> impl Iterator<Item = KeywordStep<'s>> + 'r
where
    's: 'r,
{
    pipeline.split('|').map(str::trim).map(move |step| {
        if registry.contains(step) {
            KeywordStep { name: step, argument: "" }
        } else {
            KeywordStep::parse(step)
        }
    })
}

/// Runs keyword pipelines against a registry
#[derive(Debug, Clone, Copy)]
pub struct Pipeline<'r> {
    registry: &'r KeywordRegistry,
    strict: bool,
}

impl<'r> Pipeline<'r> {
    pub fn new(registry: &'r KeywordRegistry, strict: bool) -> Self {
        Self { registry, strict }
    }

    /// Apply every step of `pipeline` to `value`
    ///
    /// Unknown keywords pass the value through unchanged unless the pipeline
    /// is strict. The first failing handler aborts the remaining steps.
    pub fn run(&self, mut value: Value, pipeline: &str, ctx: &mut KeywordContext<'_>) -> Result<Value> {
        if pipeline.is_empty() {
            return Ok(value);
        }

        for step in parse_steps(pipeline, self.registry) {
            let Some(handler) = self.registry.get(step.name) else {
                if self.strict {
                    return Err(Error::UnknownKeyword {
                        keyword: step.name.to_string(),
                    });
                }
                log::debug!("Skipping unknown keyword '{}'", step.name);
                continue;
            };

            value = handler
                .call(value, ctx, step.argument)
                .map_err(|source| Error::Keyword {
                    keyword: step.name.to_string(),
                    source,
                })?;
        }

        Ok(value)
    }
}
