use crate::value::Value;
use serde::{Deserialize, Deserializer};

///
/// FilterSpec
///
/// Tagged shape of a filter document. Decoding happens once at the API
/// boundary; the compiler dispatches on these tags instead of inspecting
/// runtime types.
///
/// - `Fields`: field-name-or-operator-symbol entries, order preserved
/// - `List`: sub-filters, valid only under `$and`/`$or`
/// - `Literal`: scalar, valid only as the value of a field/operator pair
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FilterSpec {
    Literal(Value),
    Fields(Vec<(String, FilterSpec)>),
    List(Vec<FilterSpec>),
}

impl FilterSpec {
    /// Decode a JSON document into its tagged shape.
    ///
    /// Total: objects become `Fields` (entry order preserved), arrays
    /// become `List`, scalars become `Literal`. Shape errors surface
    /// later, during compilation, where the expected shape is known.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(entries) => Self::Fields(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), Self::from_json(value)))
                    .collect(),
            ),
            serde_json::Value::Array(elems) => {
                Self::List(elems.iter().map(Self::from_json).collect())
            }
            scalar => Self::Literal(Value::from_json(scalar).unwrap_or(Value::Null)),
        }
    }

    /// Empty field map; compiles to a vacuously true predicate.
    #[must_use]
    pub const fn empty() -> Self {
        Self::Fields(Vec::new())
    }
}

impl From<&serde_json::Value> for FilterSpec {
    fn from(value: &serde_json::Value) -> Self {
        Self::from_json(value)
    }
}

impl<'de> Deserialize<'de> for FilterSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;

        Ok(Self::from_json(&raw))
    }
}
