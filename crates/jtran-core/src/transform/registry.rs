//! Two-tier keyword handler registry
//!
//! User-registered handlers shadow the stock handlers from [`built_in`].
//! The stock table is built once per process and never changes; the user
//! table belongs to each registry instance, so independent configurations
//! can coexist.
//!
//! Copyright (c) 2025 Jtran Team
//! Licensed under the Apache-2.0 license

use super::built_in::{self, StockHandler};
use super::types::{KeywordContext, KeywordHandler, KeywordResult};
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::{Arc, OnceLock};

static STOCK_HANDLERS: OnceLock<HashMap<&'static str, StockHandler>> = OnceLock::new();

fn stock_handlers() -> &'static HashMap<&'static str, StockHandler> {
    STOCK_HANDLERS.get_or_init(|| built_in::STOCK_KEYWORDS.iter().copied().collect())
}

/// Handler found by a registry lookup
pub enum Handler<'r> {
    User(&'r KeywordHandler),
    Stock(StockHandler),
}

impl Handler<'_> {
    pub fn call(&self, value: Value, ctx: &mut KeywordContext<'_>, argument: &str) -> KeywordResult {
        match self {
            Handler::User(handler) => handler(value, ctx, argument),
            Handler::Stock(handler) => handler(value, ctx, argument),
        }
    }

    pub fn is_stock(&self) -> bool {
        matches!(self, Handler::Stock(_))
    }
}

/// Keyword registry consulted by the pipeline
#[derive(Clone, Default)]
pub struct KeywordRegistry {
    user: HashMap<String, KeywordHandler>,
}

impl KeywordRegistry {
    /// Create a registry holding only the stock keywords
    pub fn new() -> Self {
        Self::default()
    }

    /// Install or replace a user keyword; overrides a stock keyword of the same name
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(Value, &mut KeywordContext<'_>, &str) -> KeywordResult + Send + Sync + 'static,
    {
        self.register_handler(name, Arc::new(handler));
    }

    /// Install an already shared handler
    pub fn register_handler(&mut self, name: impl Into<String>, handler: KeywordHandler) {
        let name = name.into();
        if self.user.insert(name.clone(), handler).is_some() {
            log::debug!("Replaced user keyword '{}'", name);
        }
    }

    /// Look up a keyword, user handlers first
    pub fn get(&self, name: &str) -> Option<Handler<'_>> {
        if let Some(handler) = self.user.get(name) {
            return Some(Handler::User(handler));
        }
        stock_handlers().get(name).copied().map(Handler::Stock)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.user.contains_key(name) || stock_handlers().contains_key(name)
    }

    /// All keyword names visible through this registry, sorted
    pub fn keyword_names(&self) -> Vec<String> {
        let names: BTreeSet<&str> = self
            .user
            .keys()
            .map(String::as_str)
            .chain(stock_handlers().keys().copied())
            .collect();
        names.into_iter().map(str::to_string).collect()
    }
}

impl fmt::Debug for KeywordRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut user: Vec<&str> = self.user.keys().map(String::as_str).collect();
        user.sort_unstable();
        f.debug_struct("KeywordRegistry")
            .field("user", &user)
            .field("stock", &stock_handlers().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::types::TransformOptions;
    use serde_json::json;

    #[test]
    fn test_stock_lookup() {
        let registry = KeywordRegistry::new();
        for name in [
            "capitalize", "foreach", "join", "lowercase", "padleft", "padright", "redact",
            "replace", "reverse", "snakecase", "split", "substring", "title", "trim",
            "truncate", "uppercase",
        ] {
            let handler = registry.get(name).unwrap_or_else(|| panic!("missing {name}"));
            assert!(handler.is_stock());
        }
        assert!(registry.get("nope").is_none());
        assert!(!registry.contains("nope"));
    }

    #[test]
    fn test_user_handler_overrides_stock() {
        let mut registry = KeywordRegistry::new();
        registry.register("uppercase", |_, _, _| Ok(json!("overridden")));

        let data = json!({});
        let options = TransformOptions::default();
        let mut ctx = KeywordContext::new(&data, &options);
        let handler = registry.get("uppercase").unwrap();
        assert!(!handler.is_stock());
        assert_eq!(handler.call(json!("abc"), &mut ctx, "").unwrap(), json!("overridden"));
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = KeywordRegistry::new();
        registry.register("greet", |_, _, _| Ok(json!("first")));
        registry.register("greet", |_, _, _| Ok(json!("second")));

        let data = json!({});
        let options = TransformOptions::default();
        let mut ctx = KeywordContext::new(&data, &options);
        let result = registry.get("greet").unwrap().call(Value::Null, &mut ctx, "");
        assert_eq!(result.unwrap(), json!("second"));
    }

    #[test]
    fn test_registries_are_independent() {
        let mut first = KeywordRegistry::new();
        first.register("shout", |v, _, _| Ok(v));
        let second = KeywordRegistry::new();

        assert!(first.contains("shout"));
        assert!(!second.contains("shout"));
    }

    #[test]
    fn test_keyword_names() {
        let mut registry = KeywordRegistry::new();
        registry.register("zzz", |v, _, _| Ok(v));
        registry.register("trim", |v, _, _| Ok(v));

        let names = registry.keyword_names();
        assert_eq!(names.len(), 17);
        assert_eq!(names.first().map(String::as_str), Some("capitalize"));
        assert_eq!(names.last().map(String::as_str), Some("zzz"));
    }
}
