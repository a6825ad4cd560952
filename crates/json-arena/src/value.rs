//! A second tree representation: build `serde_json::Value` straight from
//! the grammar, skipping both the syntax tree and the arena.

use crate::error::Result;
use crate::homonumeric::Homonumeric;
use crate::options::ParseOptions;
use crate::parser::{Parser, TreeFactory};
use serde_json::{Map, Number, Value};

/// [`TreeFactory`] producing `serde_json::Value` nodes. Duplicate keys keep
/// their first value and an absent (`null`) child becomes `Value::Null`,
/// matching what the arena stores.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueFactory;

impl TreeFactory for ValueFactory {
    type Node = Value;

    fn new_object(&mut self, keys: Vec<String>, values: Vec<Option<Value>>) -> Value {
        let mut map = Map::new();
        for (key, value) in keys.into_iter().zip(values) {
            map.entry(key).or_insert(value.unwrap_or(Value::Null));
        }
        Value::Object(map)
    }

    fn new_list(&mut self, values: Vec<Option<Value>>) -> Value {
        Value::Array(
            values
                .into_iter()
                .map(|value| value.unwrap_or(Value::Null))
                .collect(),
        )
    }

    fn new_string(&mut self, text: String) -> Value {
        Value::String(text)
    }

    fn new_numeric(&mut self, value: Homonumeric) -> Value {
        match value {
            Homonumeric::Boolean(b) => Value::Bool(b),
            Homonumeric::Integer(n) => Value::from(n),
            // Lexed floats are always finite.
            Homonumeric::Float(x) => Number::from_f64(x).map_or(Value::Null, Value::Number),
        }
    }
}

/// Parse `text` directly into a `serde_json::Value`.
///
/// ```
/// use json_arena::{parse_value, ParseOptions};
///
/// let value = parse_value(r#"{"a":[1,2.5,true]}"#, &ParseOptions::default()).unwrap();
/// assert_eq!(value, serde_json::json!({"a": [1, 2.5, true]}));
/// ```
pub fn parse_value(text: &str, options: &ParseOptions) -> Result<Value> {
    let value = Parser::from_text(text, ValueFactory, *options).parse()?;
    Ok(value.unwrap_or(Value::Null))
}
