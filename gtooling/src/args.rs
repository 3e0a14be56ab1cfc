//! Typed argument access and coercion against a tool's declared schema.
//!
//! Detected calls carry raw string parameters. Before a tool runs, the
//! runtime coerces those strings into [`ArgValue`]s using the schema the
//! tool published, so handlers read typed values instead of re-parsing
//! text.

use std::collections::BTreeMap;

use crate::error::ToolError;
use crate::types::{ParameterSchema, ParameterSpec, ParameterType};

/// A single argument after coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Text(String),
    Integer(i64),
    Number(f64),
}

impl ArgValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ArgValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ArgValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Numeric view of the value. Integers widen to `f64`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ArgValue::Number(value) => Some(*value),
            ArgValue::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }
}

/// Coerced arguments handed to a tool's `invoke`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArgs {
    values: BTreeMap<String, ArgValue>,
}

impl ToolArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion of a text argument, mostly for tests and
    /// hand-constructed calls.
    pub fn with_text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), ArgValue::Text(value.into()));
        self
    }

    pub fn with_integer(mut self, name: impl Into<String>, value: i64) -> Self {
        self.values.insert(name.into(), ArgValue::Integer(value));
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ArgValue) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(ArgValue::as_text)
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        self.values.get(name).and_then(ArgValue::as_integer)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.values.get(name).and_then(ArgValue::as_number)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Coerces raw string parameters against `schema`.
///
/// Declared parameters parse into their declared type; a failed parse or a
/// missing required parameter is an `invalid_arguments` error. Parameters
/// the schema does not declare pass through as text.
pub fn coerce_arguments(
    schema: &ParameterSchema,
    raw: &BTreeMap<String, String>,
) -> Result<ToolArgs, ToolError> {
    let mut args = ToolArgs::new();

    for spec in schema.params() {
        match raw.get(&spec.name) {
            Some(value) => args.insert(spec.name.clone(), coerce_value(spec, value)?),
            None if spec.required => {
                return Err(ToolError::invalid_arguments(format!(
                    "missing required parameter '{}'",
                    spec.name
                )));
            }
            None => {}
        }
    }

    for (key, value) in raw {
        if schema.spec(key).is_none() {
            args.insert(key.clone(), ArgValue::Text(value.clone()));
        }
    }

    Ok(args)
}

fn coerce_value(spec: &ParameterSpec, raw: &str) -> Result<ArgValue, ToolError> {
    match spec.ty {
        ParameterType::Text => Ok(ArgValue::Text(raw.to_string())),
        ParameterType::Integer => raw.trim().parse::<i64>().map(ArgValue::Integer).map_err(|_| {
            ToolError::invalid_arguments(format!(
                "parameter '{}' expects an integer, got '{raw}'",
                spec.name
            ))
        }),
        ParameterType::Number => raw.trim().parse::<f64>().map(ArgValue::Number).map_err(|_| {
            ToolError::invalid_arguments(format!(
                "parameter '{}' expects a number, got '{raw}'",
                spec.name
            ))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToolErrorKind;

    fn schema() -> ParameterSchema {
        ParameterSchema::new(vec![
            ParameterSpec::required("city", ParameterType::Text),
            ParameterSpec::optional("days", ParameterType::Integer),
            ParameterSpec::optional("threshold", ParameterType::Number),
        ])
    }

    fn raw(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn declared_parameters_coerce_to_declared_types() {
        let args = coerce_arguments(
            &schema(),
            &raw(&[("city", "Paris"), ("days", " 3 "), ("threshold", "0.5")]),
        )
        .expect("coercion should succeed");

        assert_eq!(args.text("city"), Some("Paris"));
        assert_eq!(args.integer("days"), Some(3));
        assert_eq!(args.number("threshold"), Some(0.5));
    }

    #[test]
    fn missing_required_parameter_is_rejected() {
        let error = coerce_arguments(&schema(), &raw(&[("days", "2")]))
            .expect_err("city is required");

        assert_eq!(error.kind, ToolErrorKind::InvalidArguments);
        assert!(error.message.contains("city"));
    }

    #[test]
    fn unparseable_integer_is_rejected() {
        let error = coerce_arguments(&schema(), &raw(&[("city", "Paris"), ("days", "soon")]))
            .expect_err("'soon' is not an integer");

        assert_eq!(error.kind, ToolErrorKind::InvalidArguments);
        assert!(error.message.contains("days"));
    }

    #[test]
    fn undeclared_parameters_pass_through_as_text() {
        let args = coerce_arguments(&schema(), &raw(&[("city", "Paris"), ("mood", "sunny")]))
            .expect("extra parameters are allowed");

        assert_eq!(args.text("mood"), Some("sunny"));
    }

    #[test]
    fn integers_widen_when_read_as_numbers() {
        let args = ToolArgs::new().with_integer("days", 4);
        assert_eq!(args.number("days"), Some(4.0));
        assert_eq!(args.text("days"), None);
    }
}
