/// Property-based tests for parsing, arena storage and canonical text.
///
/// Documents are generated as `serde_json::Value`s and rendered with
/// `serde_json::to_string`, so the input text is whatever a standard JSON
/// writer produces. Checked properties:
///
/// - parsing into the arena and converting back yields the generated value
/// - the `ValueFactory` path agrees with `serde_json::from_str`
/// - canonical text is a fixed point: render → parse → render is stable
/// - duplicate keys collapse to their first occurrence
/// - list indices address children in source order, and one past the end is
///   the documented out-of-range failure
///
/// Strings are drawn from characters whose escaped form the lexer accepts
/// (serde_json writes other control characters as `\u` escapes, which are
/// outside the escape table).
use json_arena::{parse, parse_value, ParseOptions, QueryError};
use proptest::prelude::*;
use serde_json::{Map, Number, Value};

// ============================================================================
// Strategies
// ============================================================================

fn arb_key() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z_][a-zA-Z0-9_ ]{0,10}").unwrap()
}

fn arb_json_string() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,20}",
        prop::string::string_regex("[a-zA-Z0-9:,\\[\\]{}\\-\\. \"\\\\\n\t\r]{0,20}").unwrap(),
        Just(String::new()),
        Just("true".to_string()),
        Just("null".to_string()),
        Just("-1".to_string()),
        Just("caf\u{00e9}".to_string()),
        Just("\u{4f60}\u{597d}".to_string()),
        Just("say \"hi\"".to_string()),
        Just("path\\to\\file".to_string()),
    ]
}

fn arb_json_integer() -> impl Strategy<Value = Value> {
    prop_oneof![
        (-1_000_000i64..1_000_000i64).prop_map(Value::from),
        Just(Value::from(i64::MAX)),
        Just(Value::from(i64::MIN)),
    ]
}

/// Floats built as mantissa / 10^n so they have a short decimal form.
fn arb_json_float() -> impl Strategy<Value = Value> {
    (-100_000_000i64..100_000_000i64, 0u32..6u32).prop_filter_map(
        "must be a finite float",
        |(mantissa, decimals)| {
            let f = mantissa as f64 / 10f64.powi(decimals as i32);
            Number::from_f64(f).map(Value::Number)
        },
    )
}

fn arb_primitive() -> impl Strategy<Value = Value> {
    prop_oneof![
        1 => arb_json_string().prop_map(Value::String),
        3 => arb_json_integer(),
        1 => arb_json_float(),
        1 => any::<bool>().prop_map(Value::Bool),
        1 => Just(Value::Null),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_primitive().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((arb_key(), inner), 0..6)
                .prop_map(|pairs| Value::Object(pairs.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

/// A document always has an object root.
fn arb_document() -> impl Strategy<Value = Value> {
    prop::collection::vec((arb_key(), arb_value()), 0..8)
        .prop_map(|pairs| Value::Object(pairs.into_iter().collect::<Map<_, _>>()))
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn arena_preserves_generated_documents(doc in arb_document()) {
        let text = serde_json::to_string(&doc).unwrap();
        let arena = parse(&text).unwrap();
        prop_assert_eq!(arena.result_set().to_value(), doc);
    }

    #[test]
    fn value_factory_agrees_with_serde_json(doc in arb_document()) {
        let text = serde_json::to_string(&doc).unwrap();
        let ours = parse_value(&text, &ParseOptions::default()).unwrap();
        let theirs: Value = serde_json::from_str(&text).unwrap();
        prop_assert_eq!(ours, theirs);
    }

    #[test]
    fn canonical_text_is_a_fixed_point(doc in arb_document()) {
        let text = serde_json::to_string(&doc).unwrap();
        let first_arena = parse(&text).unwrap();
        let first = first_arena.result_set().to_string();

        let second_arena = parse(&first).unwrap();
        let second = second_arena.result_set().to_string();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(second_arena.result_set().to_value(), doc);
    }

    #[test]
    fn serde_serialization_matches_the_document(doc in arb_document()) {
        let text = serde_json::to_string(&doc).unwrap();
        let arena = parse(&text).unwrap();
        let rendered = serde_json::to_string(&arena.result_set()).unwrap();
        let reparsed: Value = serde_json::from_str(&rendered).unwrap();
        prop_assert_eq!(reparsed, doc);
    }

    #[test]
    fn duplicate_keys_keep_first_occurrence(
        pairs in prop::collection::vec(("[abc]", -100i64..100), 1..12)
    ) {
        let body: Vec<String> = pairs
            .iter()
            .map(|(key, value)| format!("\"{key}\":{value}"))
            .collect();
        let text = format!("{{{}}}", body.join(","));
        let arena = parse(&text).unwrap();
        let root = arena.result_set();

        let mut first: Vec<(&str, i64)> = Vec::new();
        for (key, value) in &pairs {
            if !first.iter().any(|(seen, _)| seen == key) {
                first.push((key.as_str(), *value));
            }
        }

        prop_assert_eq!(root.len(), first.len());
        prop_assert_eq!(root.keys().collect::<Vec<_>>(), first.iter().map(|(k, _)| *k).collect::<Vec<_>>());
        for (key, value) in first {
            prop_assert_eq!(root.at(key).as_integer(), Some(value));
        }
    }

    #[test]
    fn list_indices_address_children_in_order(
        items in prop::collection::vec(any::<i64>(), 0..20)
    ) {
        let text = format!("{{\"l\":{}}}", serde_json::to_string(&items).unwrap());
        let arena = parse(&text).unwrap();
        let list = arena.result_set().at("l");

        prop_assert_eq!(list.len(), items.len());
        for (i, expected) in items.iter().enumerate() {
            prop_assert_eq!(list.at(i).as_integer(), Some(*expected));
        }
        prop_assert!(list.at(items.len()).is_nil());
        prop_assert_eq!(
            list.try_at(items.len()).unwrap_err(),
            QueryError::IndexOutOfRange { index: items.len(), len: items.len() }
        );
    }
}
