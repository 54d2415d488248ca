//! jtran Core - schema-driven JSON transformation engine
//!
//! This crate rewrites an input JSON tree into a new tree described by a
//! schema whose strings embed field placeholders and keyword pipelines.
//!
//! # Main Components
//!
//! - **Error Handling**: Engine errors using `thiserror`, keyword errors that
//!   accept `anyhow` failures from custom handlers
//! - **Field Resolution**: `->` paths with index and `field=value` selectors
//! - **Keyword Pipelines**: Stock keywords plus user-registered handlers
//! - **Schema Walking**: Recursive expansion of every key and value
//!
//! # Example
//!
//! ```
//! use jtran_core::{transform, Result};
//! use serde_json::json;
//!
//! fn example() -> Result<()> {
//!     let data = json!({"first_name": "John", "last_name": "Doe"});
//!     let schema = json!({"full_name": "${first_name} ${last_name|uppercase}"});
//!
//!     let output = transform(&schema, &data)?;
//!     assert_eq!(output, json!({"full_name": "John DOE"}));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod error;
pub mod transform;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use transform::{
    resolve_field, transform, KeywordContext, KeywordError, KeywordHandler, KeywordRegistry,
    KeywordResult, TransformOptions, Transformer, TransformerBuilder,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
