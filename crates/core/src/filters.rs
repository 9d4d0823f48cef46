// Listing filter schema and boundary validation

use crate::error::FilterError;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// How a filter field is interpreted at the boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Property category: a string or a one-element list of strings, capitalized
    Category,
    /// Number, boolean, or a string that coerces to a number
    Number,
    /// Free text passed through for upstream partial matching
    Text,
    /// One of a fixed set of strings
    Choice(&'static [&'static str]),
}

/// What an empty string means for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyPolicy {
    /// Treat as absent
    Omit,
    /// Reject as invalid
    Reject,
}

/// One entry of the declarative filter schema
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub description: &'static str,
    pub empty: EmptyPolicy,
}

const fn field(
    name: &'static str,
    kind: FieldKind,
    description: &'static str,
    empty: EmptyPolicy,
) -> FieldSpec {
    FieldSpec {
        name,
        kind,
        description,
        empty,
    }
}

/// Every filter accepted by the listing search, in query-string order.
pub const LISTING_FILTERS: &[FieldSpec] = &[
    field("property_for", FieldKind::Category, "Filter by property type (e.g., Sale, Rent)", EmptyPolicy::Omit),
    field("price_max", FieldKind::Number, "Maximum price for sale properties", EmptyPolicy::Omit),
    field("rent_max", FieldKind::Number, "Maximum rent for rental properties", EmptyPolicy::Omit),
    field("beds_min", FieldKind::Number, "Minimum number of bedrooms", EmptyPolicy::Omit),
    field("baths_min", FieldKind::Number, "Minimum number of bathrooms", EmptyPolicy::Omit),
    field("lot_size_min", FieldKind::Number, "Minimum lot size in square meters", EmptyPolicy::Omit),
    field("contact_phone", FieldKind::Text, "Filter by contact phone (partial match)", EmptyPolicy::Omit),
    field("contact_realtor", FieldKind::Text, "Filter by contact realtor (partial match)", EmptyPolicy::Omit),
    field("contact_email", FieldKind::Text, "Filter by contact email (partial match)", EmptyPolicy::Omit),
    field("year_built_min", FieldKind::Number, "Minimum year built", EmptyPolicy::Omit),
    field("year_built_max", FieldKind::Number, "Maximum year built", EmptyPolicy::Omit),
    field("land_use", FieldKind::Text, "Filter by land use (partial match)", EmptyPolicy::Omit),
    field("building_size_min", FieldKind::Number, "Minimum building size in square meters", EmptyPolicy::Omit),
    field("building_size_max", FieldKind::Number, "Maximum building size in square meters", EmptyPolicy::Omit),
    field("msl", FieldKind::Text, "Filter by MLS number (partial match)", EmptyPolicy::Omit),
    field("sort", FieldKind::Text, "Field to sort the results by (e.g., price, created_at)", EmptyPolicy::Omit),
    field("order", FieldKind::Choice(&["asc", "desc"]), "Sort order (asc or desc), requires sort", EmptyPolicy::Reject),
];

/// Normalized property category ("Sale", "Rent", ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyCategory(String);

impl PropertyCategory {
    /// Capitalize as first character upper-case, remainder lower-case.
    /// Returns `None` for an empty input.
    pub fn normalize(raw: &str) -> Option<Self> {
        let mut chars = raw.chars();
        let first = chars.next()?;
        let mut value: String = first.to_uppercase().collect();
        value.push_str(&chars.as_str().to_lowercase());
        Some(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Raw wire shape of `property_for` before normalization
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CategoryInput {
    One(String),
    Many(Vec<String>),
}

impl CategoryInput {
    fn into_scalar(self) -> Option<String> {
        match self {
            CategoryInput::One(value) => Some(value),
            CategoryInput::Many(values) => {
                if values.len() > 1 {
                    tracing::debug!(count = values.len(), "property_for has several values, using the first");
                }
                values.into_iter().next()
            }
        }
    }
}

/// A validated filter value
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Category(PropertyCategory),
    Number(f64),
    Text(String),
}

impl FilterValue {
    /// String form placed in the query string, before encoding
    pub fn to_query_value(&self) -> String {
        match self {
            FilterValue::Category(category) => category.as_str().to_string(),
            FilterValue::Number(n) => format_number(*n),
            FilterValue::Text(text) => text.clone(),
        }
    }
}

/// Render a number the way `String(Number)` does: shortest round-trip digits,
/// plain notation for decimal exponents -6 through 20, `e` notation otherwise.
fn format_number(n: f64) -> String {
    if n == 0.0 {
        // also covers -0.0
        return "0".to_string();
    }

    let sign = if n < 0.0 { "-" } else { "" };
    let scientific = format!("{:e}", n.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return n.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return n.to_string();
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    // decimal point position relative to the digit string
    let point = exponent + 1;

    let body = if k <= point && point <= 21 {
        format!("{}{}", digits, "0".repeat((point - k) as usize))
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        format!("{}.{}", int, frac)
    } else if -6 < point && point <= 0 {
        format!("0.{}{}", "0".repeat((-point) as usize), digits)
    } else {
        let (first, rest) = digits.split_at(1);
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        if rest.is_empty() {
            format!("{}e{}{}", first, exp_sign, exponent.abs())
        } else {
            format!("{}.{}e{}{}", first, rest, exp_sign, exponent.abs())
        }
    };
    format!("{}{}", sign, body)
}

/// Numeric coercion of a string: surrounding whitespace is ignored, an empty
/// remainder is zero, and `0x`/`0o`/`0b` prefixes select the radix.
fn coerce_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if trimmed.is_empty() {
        return Some(0.0);
    }

    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &trimmed[2..];
        if digits.is_empty() {
            return None;
        }
        return digits.chars().try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
        });
    }

    // reject the spellings f64::from_str accepts beyond decimal literals
    let plain = trimmed.trim_start_matches(['+', '-']);
    match plain {
        "Infinity" => Some(if trimmed.starts_with('-') { f64::NEG_INFINITY } else { f64::INFINITY }),
        _ if plain.starts_with(|c: char| c.is_ascii_digit() || c == '.') => trimmed.parse().ok(),
        _ => None,
    }
}

/// Validated set of listing filters, ordered as in [`LISTING_FILTERS`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    // keyed by position in LISTING_FILTERS
    values: BTreeMap<usize, FilterValue>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate tool-call arguments against the schema.
    ///
    /// Unknown keys are ignored. Absent, `null` and empty values are dropped
    /// according to each field's [`EmptyPolicy`].
    pub fn from_arguments(arguments: &Value) -> Result<Self, FilterError> {
        let object = match arguments {
            Value::Object(object) => object,
            Value::Null => return Ok(Self::default()),
            _ => return Err(FilterError::NotAnObject),
        };

        for key in object.keys() {
            if !LISTING_FILTERS.iter().any(|spec| spec.name == key) {
                tracing::debug!(field = %key, "Ignoring unknown filter");
            }
        }

        let mut filters = Self::default();
        for (index, spec) in LISTING_FILTERS.iter().enumerate() {
            if let Some(raw) = object.get(spec.name) {
                if let Some(value) = parse_field(spec, raw)? {
                    filters.values.insert(index, value);
                }
            }
        }
        Ok(filters)
    }

    /// Set a single filter, applying the same validation as [`FilterSet::from_arguments`].
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Result<Self, FilterError> {
        let (index, spec) = LISTING_FILTERS
            .iter()
            .enumerate()
            .find(|(_, spec)| spec.name == name)
            .ok_or_else(|| FilterError::UnknownField(name.to_string()))?;

        match parse_field(spec, &value.into())? {
            Some(value) => {
                self.values.insert(index, value);
            }
            None => {
                self.values.remove(&index);
            }
        }
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn get(&self, name: &str) -> Option<&FilterValue> {
        self.iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    pub fn category(&self) -> Option<&PropertyCategory> {
        self.values.values().find_map(|value| match value {
            FilterValue::Category(category) => Some(category),
            _ => None,
        })
    }

    /// Present filters as `(name, value)` in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FilterValue)> + '_ {
        self.values
            .iter()
            .map(|(index, value)| (LISTING_FILTERS[*index].name, value))
    }
}

fn parse_field(spec: &FieldSpec, raw: &Value) -> Result<Option<FilterValue>, FilterError> {
    let empty = match raw {
        Value::Null => return Ok(None),
        Value::String(s) => s.is_empty(),
        _ => false,
    };
    if empty {
        return match spec.empty {
            EmptyPolicy::Omit => Ok(None),
            EmptyPolicy::Reject => Err(not_allowed(spec, "")),
        };
    }

    match spec.kind {
        FieldKind::Category => {
            let input: CategoryInput =
                serde_json::from_value(raw.clone()).map_err(|_| FilterError::InvalidType {
                    field: spec.name,
                    expected: "a string or a list of strings",
                })?;
            Ok(input
                .into_scalar()
                .and_then(|value| PropertyCategory::normalize(&value))
                .map(FilterValue::Category))
        }
        FieldKind::Number => {
            let number = match raw {
                Value::Number(n) => n.as_f64(),
                Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
                Value::String(s) => coerce_number(s),
                _ => {
                    return Err(FilterError::InvalidType {
                        field: spec.name,
                        expected: "a number",
                    })
                }
            };
            match number {
                Some(n) if n.is_finite() => Ok(Some(FilterValue::Number(n))),
                _ => Err(FilterError::NotANumber {
                    field: spec.name,
                    value: raw_display(raw),
                }),
            }
        }
        FieldKind::Text => match raw {
            Value::String(s) => Ok(Some(FilterValue::Text(s.clone()))),
            _ => Err(FilterError::InvalidType {
                field: spec.name,
                expected: "a string",
            }),
        },
        FieldKind::Choice(allowed) => match raw {
            Value::String(s) if allowed.contains(&s.as_str()) => {
                Ok(Some(FilterValue::Text(s.clone())))
            }
            Value::String(s) => Err(not_allowed(spec, s)),
            _ => Err(FilterError::InvalidType {
                field: spec.name,
                expected: "a string",
            }),
        },
    }
}

fn not_allowed(spec: &FieldSpec, value: &str) -> FilterError {
    let allowed = match spec.kind {
        FieldKind::Choice(allowed) => allowed.join(", "),
        _ => "a non-empty value".to_string(),
    };
    FilterError::NotAllowed {
        field: spec.name,
        allowed,
        value: value.to_string(),
    }
}

fn raw_display(raw: &Value) -> String {
    match raw {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
