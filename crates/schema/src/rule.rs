//! Composable field rules.

use regex::Regex;
use std::sync::LazyLock;

/// One predicate in a field's check chain.
///
/// Checks run in order and the chain stops at the first failure, so a field
/// reports at most one message.
#[derive(Debug, Clone)]
pub enum Check {
    /// JSON string.
    String,
    /// Non-blank string (after trimming) or non-empty array.
    NotEmpty,
    /// String length in characters, bounds inclusive.
    Length {
        min: Option<usize>,
        max: Option<usize>,
    },
    /// String fully matching `regex`; `format` is shown in the message.
    Pattern {
        regex: &'static LazyLock<Regex>,
        format: &'static str,
    },
    /// String equal to one of the listed values.
    OneOf(&'static [&'static str]),
    /// JSON number.
    Number,
    /// JSON number or a string that parses as one.
    Numeric,
    /// JSON integer.
    Integer,
    /// JSON integer or a string of decimal digits.
    IntegerLike,
    /// Numeric value `>=` the bound.
    Min(f64),
    /// Numeric value `<=` the bound.
    Max(f64),
    /// Nested object validated against its own schema.
    Object(Schema),
    /// Array whose every element is an object validated against the schema.
    ListOf(Schema),
    /// Array with at least one element.
    NonEmptyList,
    /// Passes when any one of the chains passes.
    AnyOf(Vec<Vec<Check>>),
}

impl Check {
    #[must_use]
    pub fn len(min: usize, max: usize) -> Self {
        Self::Length {
            min: Some(min),
            max: Some(max),
        }
    }

    #[must_use]
    pub fn max_len(max: usize) -> Self {
        Self::Length {
            min: None,
            max: Some(max),
        }
    }

    #[must_use]
    pub fn exact_len(n: usize) -> Self {
        Self::len(n, n)
    }
}

/// A named field and the checks applied to it.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub name: &'static str,
    /// Required fields must be present and non-null. Optional fields that are
    /// absent or `null` are skipped entirely.
    pub required: bool,
    pub checks: Vec<Check>,
}

impl FieldRule {
    #[must_use]
    pub fn required(name: &'static str, checks: Vec<Check>) -> Self {
        Self {
            name,
            required: true,
            checks,
        }
    }

    #[must_use]
    pub fn optional(name: &'static str, checks: Vec<Check>) -> Self {
        Self {
            name,
            required: false,
            checks,
        }
    }
}

/// Ordered list of field rules for one payload shape.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<FieldRule>,
}

impl Schema {
    #[must_use]
    pub fn new(fields: Vec<FieldRule>) -> Self {
        Self { fields }
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldRule] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of the fields that must be present.
    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter(|f| f.required).map(|f| f.name)
    }
}
