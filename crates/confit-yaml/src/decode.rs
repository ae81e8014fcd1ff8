//! Decoding nodes into serde-deserializable shapes.

use crate::{Error, Result, YamlNode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};
use yaml_rust2::Yaml;

/// Decode a node into any `serde`-deserializable shape.
///
/// The node is bridged through `serde_json::Value`, so the target shape uses
/// ordinary `#[derive(Deserialize)]` definitions. Decode failures carry the
/// line of the node being decoded.
///
/// # Example
///
/// ```rust
/// #[derive(serde::Deserialize)]
/// struct Config {
///     greeting: String,
/// }
///
/// let node = confit_yaml::parse("greeting: hello").unwrap();
/// let config: Config = confit_yaml::decode(&node).unwrap();
/// assert_eq!(config.greeting, "hello");
/// ```
pub fn decode<T: DeserializeOwned>(node: &YamlNode) -> Result<T> {
    let line = node.span().line;
    let value = to_json(node.value(), line)?;
    serde_json::from_value(value).map_err(|e| Error::Decode {
        message: e.to_string(),
        line,
    })
}

fn to_json(yaml: &Yaml, line: usize) -> Result<Value> {
    let value = match yaml {
        Yaml::Null | Yaml::BadValue | Yaml::Alias(_) => Value::Null,
        Yaml::Boolean(b) => Value::Bool(*b),
        Yaml::Integer(i) => Value::Number(Number::from(*i)),
        Yaml::String(s) => Value::String(s.clone()),
        Yaml::Real(r) => {
            let f: f64 = r.parse().map_err(|_| Error::Decode {
                message: format!("invalid number {r:?}"),
                line,
            })?;
            let n = Number::from_f64(f).ok_or_else(|| Error::Decode {
                message: format!("number {r:?} is not representable"),
                line,
            })?;
            Value::Number(n)
        }
        Yaml::Array(items) => {
            let items = items
                .iter()
                .map(|item| to_json(item, line))
                .collect::<Result<Vec<_>>>()?;
            Value::Array(items)
        }
        Yaml::Hash(hash) => {
            let mut map = Map::with_capacity(hash.len());
            for (key, value) in hash {
                let key = scalar_key(key).ok_or_else(|| Error::Decode {
                    message: "mapping key is not a scalar".to_string(),
                    line,
                })?;
                map.insert(key, to_json(value, line)?);
            }
            Value::Object(map)
        }
    };
    Ok(value)
}

fn scalar_key(key: &Yaml) -> Option<String> {
    match key {
        Yaml::String(s) => Some(s.clone()),
        Yaml::Integer(i) => Some(i.to_string()),
        Yaml::Real(r) => Some(r.clone()),
        Yaml::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}
