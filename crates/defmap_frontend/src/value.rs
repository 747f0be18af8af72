use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::Node;

/// The constants defined by a program, in definition order. Redefining a
/// name replaces its value but keeps its original position.
pub type Environment = IndexMap<String, Value>;

/// A fully resolved value.
///
/// References are substituted while parsing, so a value never points back
/// into the environment it was built from; records own their fields
/// exclusively and cycles cannot occur.
#[derive(Node!)]
pub enum Value {
    Integer(i64),
    Text(String),
    Record(IndexMap<String, Value>),
}

/// Values serialize into their JSON equivalents (number, string, object in
/// field order) rather than as tagged enum variants.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Integer(n) => serializer.serialize_i64(*n),
            Value::Text(text) => serializer.serialize_str(text),
            Value::Record(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (name, value) in fields {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
        }
    }
}
