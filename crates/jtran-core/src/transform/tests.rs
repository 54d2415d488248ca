//! Tests for the transformation engine
//!
//! End-to-end checks through [`Transformer`], covering keyword registration,
//! options and error propagation.
//!
//! Copyright (c) 2025 Jtran Team
//! Licensed under the Apache-2.0 license

#[cfg(test)]
mod tests {
    use super::super::{
        engine::{transform, Transformer},
        builder::TransformerBuilder,
        types::{KeywordContext, KeywordError, KeywordResult, TransformOptions},
    };
    use crate::error::Error;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn order_data() -> Value {
        json!({
            "customer": {
                "first_name": "ada",
                "last_name": "lovelace",
                "email": "ada@example.com"
            },
            "orders": [
                {"id": "A-1", "status": "shipped", "total": 12.5},
                {"id": "B-2", "status": "pending", "total": 40}
            ],
            "tags": "vip,early,beta"
        })
    }

    #[test]
    fn test_transform_nested_schema() {
        let schema = json!({
            "name": "${customer->first_name|capitalize} ${customer->last_name|capitalize}",
            "contact": {
                "email": "${customer->email|redact(1,3)}"
            },
            "latest_pending": "${orders[status=pending]->id}",
            "first_total": "${orders[0]->total}"
        });

        let output = transform(&schema, &order_data()).unwrap();
        assert_eq!(output, json!({
            "name": "Ada Lovelace",
            "contact": {"email": "a**@example.com"},
            "latest_pending": "B-2",
            "first_total": "12.5"
        }));
    }

    #[test]
    fn test_transform_rejects_non_object_schema() {
        let err = transform(&json!(["a"]), &json!({})).unwrap_err();
        assert_eq!(err.to_string(), "schema must be an object, found array");
    }

    #[test]
    fn test_whole_placeholder_array_result() {
        let schema = json!({"tags": "${tags|split(,)}", "tag_line": "${tags|split(,)|join( & )}"});
        let output = transform(&schema, &order_data()).unwrap();
        assert_eq!(output, json!({"tags": ["vip", "early", "beta"], "tag_line": "vip & early & beta"}));
    }

    #[test]
    fn test_foreach_over_filtered_field() {
        let schema = json!({"ids": "${orders|foreach(id)|join(,)}"});
        let output = transform(&schema, &order_data()).unwrap();
        assert_eq!(output, json!({"ids": "A-1,B-2"}));
    }

    #[test]
    fn test_registered_keyword_overrides_stock() {
        let mut transformer = Transformer::new();
        transformer.register_keyword("uppercase", |value, _, _| {
            Ok(json!(format!("<{}>", value.as_str().unwrap_or_default())))
        });

        let output = transformer
            .transform(&json!({"x": "${customer->first_name|uppercase}"}), &order_data())
            .unwrap();
        assert_eq!(output, json!({"x": "<ada>"}));

        // Other transformers keep the stock behavior
        let output = transform(&json!({"x": "${customer->first_name|uppercase}"}), &order_data()).unwrap();
        assert_eq!(output, json!({"x": "ADA"}));
    }

    #[test]
    fn test_custom_keyword_resolves_fields() {
        let transformer = TransformerBuilder::new()
            .keyword("lookup", |_, ctx, argument| {
                Ok(crate::resolve_field(argument, ctx.data()).cloned().unwrap_or(Value::Null))
            })
            .build();

        let output = transformer
            .transform(&json!({"mail": "${anything|lookup(customer->email)}"}), &order_data())
            .unwrap();
        assert_eq!(output, json!({"mail": "ada@example.com"}));
    }

    #[test]
    fn test_custom_keyword_with_anyhow_error() {
        let transformer = TransformerBuilder::new()
            .keyword("fail", |_, _, argument| {
                Err(KeywordError::from(anyhow::anyhow!("refused: {}", argument)))
            })
            .build();

        let output = transformer
            .transform(&json!({"x": "${tags|fail(now)}"}), &order_data())
            .unwrap();
        assert_eq!(output, json!({"x": "Error: refused: now"}));

        let err = transformer
            .transform(&json!({"x": "tags|fail(now)"}), &order_data())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to apply keywords to value of key 'x': error applying keyword 'fail': refused: now"
        );
    }

    #[test]
    fn test_context_values_persist_within_one_string() {
        let transformer = TransformerBuilder::new()
            .keyword("remember", |value, ctx, _| {
                ctx.insert("remembered", value.clone());
                Ok(value)
            })
            .keyword("recall", |_, ctx, _| Ok(ctx.get("remembered").cloned().unwrap_or(Value::Null)))
            .build();

        let output = transformer
            .transform(
                &json!({"same": "${tags|remember}/${x|recall}", "other": "${x|recall}"}),
                &order_data(),
            )
            .unwrap();
        assert_eq!(output, json!({"same": "vip,early,beta/vip,early,beta", "other": ""}));
    }

    #[test]
    fn test_shared_handler() {
        let handler: crate::KeywordHandler = Arc::new(
            |_: Value, _: &mut KeywordContext<'_>, _: &str| -> KeywordResult { Ok(json!("shared")) },
        );
        let transformer = TransformerBuilder::new().handler("a", handler.clone()).handler("b", handler).build();

        let output = transformer.transform(&json!({"x": "${q|a}${q|b}"}), &json!({})).unwrap();
        assert_eq!(output, json!({"x": "sharedshared"}));
    }

    #[test]
    fn test_strict_mode() {
        let transformer = TransformerBuilder::new().strict(true).build();

        let output = transformer
            .transform(&json!({"x": "${tags|nope}"}), &order_data())
            .unwrap();
        assert_eq!(output, json!({"x": "Error: unknown keyword 'nope'"}));

        let err = transformer
            .transform(&json!({"x": "text|nope"}), &order_data())
            .unwrap_err();
        assert!(matches!(err.root_cause(), Error::UnknownKeyword { keyword } if keyword == "nope"));
    }

    #[test]
    fn test_unicode_casing_option() {
        let data = json!({"city": "zürich"});
        let schema = json!({"city": "${city|uppercase}"});

        let quirky = transform(&schema, &data).unwrap();
        assert_eq!(quirky, json!({"city": "Z\u{c3}RICH"}));

        let transformer = TransformerBuilder::new().unicode_casing(true).build();
        assert_eq!(transformer.transform(&schema, &data).unwrap(), json!({"city": "ZÜRICH"}));
    }

    #[test]
    fn test_options_from_config() {
        let options: TransformOptions =
            serde_json::from_value(json!({"max_depth": 2, "strict": false})).unwrap();
        let transformer = TransformerBuilder::new().options(options).build();
        assert_eq!(transformer.options().max_depth, 2);

        let err = transformer
            .transform(&json!({"a": {"b": {"c": "deep"}}}), &json!({}))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to transform nested schema for key 'a': \
             failed to transform nested schema for key 'b': \
             schema nesting exceeds the maximum depth of 2"
        );
    }

    #[test]
    fn test_key_error_aborts_transform() {
        let err = transform(&json!({"ok": "fine", "bad|truncate(x)": "v"}), &json!({})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to apply keywords to key 'bad|truncate(x)': \
             error applying keyword 'truncate': truncate keyword: invalid length"
        );
    }

    #[test]
    fn test_oversized_pad_length_renders_error() {
        let output = transform(
            &json!({"y": "${x|padleft(ab,9223372036854775807)}"}),
            &json!({"x": "ab"}),
        )
        .unwrap();
        assert_eq!(output, json!({"y": "Error: padleft keyword: length out of bounds"}));
    }

    #[test]
    fn test_expand_single_string() {
        let transformer = Transformer::new();
        let value = transformer
            .expand("${customer->last_name|uppercase(0,1)}", &order_data())
            .unwrap();
        assert_eq!(value, json!("Lovelace"));
    }

    #[test]
    fn test_output_is_idempotent_without_placeholders() {
        let schema = json!({
            "name": "${customer->first_name}",
            "list": ["${customer->last_name}", 1, {"n": "${orders[1]->total}"}]
        });
        let output = transform(&schema, &order_data()).unwrap();
        assert_eq!(transform(&output, &order_data()).unwrap(), output);
    }
}
