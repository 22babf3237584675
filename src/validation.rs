//! Declarative field validation
//!
//! Validates string maps (form submissions, parsed query strings) against a
//! schema of per-field rules. Errors are aggregated: every failing field gets
//! exactly one message, keyed by field name.
//!
//! # Example
//! ```
//! use std::collections::BTreeMap;
//! use vix_utils::validation::{num_range, required, validate_map, Schema};
//!
//! let mut data = BTreeMap::new();
//! data.insert("name".to_string(), "Ada".to_string());
//! data.insert("age".to_string(), "21".to_string());
//!
//! let mut schema = Schema::new();
//! schema.insert("name".to_string(), required("Name"));
//! schema.insert("age".to_string(), num_range(18, 120, "Age"));
//!
//! assert!(validate_map(&data, &schema).is_ok());
//! ```

use crate::core::error::{Result, VixError};
use regex::Regex;
use std::collections::BTreeMap;

/// Field-wise error messages, keyed by field name.
pub type FieldErrors = BTreeMap<String, String>;

/// A schema maps field names to their rules.
pub type Schema = BTreeMap<String, Rule>;

/// Validation rule for a single field.
///
/// The first failing constraint produces the field's error message; later
/// constraints are not evaluated for that field.
#[derive(Debug, Clone, Default)]
pub struct Rule {
    /// Field must be present and non-empty.
    pub required: bool,
    /// Minimum string length, inclusive.
    pub min_len: Option<usize>,
    /// Maximum string length, inclusive.
    pub max_len: Option<usize>,
    /// Minimum numeric value (base 10), inclusive.
    pub min: Option<i64>,
    /// Maximum numeric value (base 10), inclusive.
    pub max: Option<i64>,
    /// Full-match pattern.
    pub pattern: Option<Regex>,
    /// Human-friendly name used in messages; the field key when empty.
    pub label: String,
}

/// Rule: field must be present and non-empty.
pub fn required(label: impl Into<String>) -> Rule {
    Rule {
        required: true,
        label: label.into(),
        ..Rule::default()
    }
}

/// Rule: string length within `[min, max]`.
pub fn len(min: usize, max: usize, label: impl Into<String>) -> Rule {
    Rule {
        required: true,
        min_len: Some(min),
        max_len: Some(max),
        label: label.into(),
        ..Rule::default()
    }
}

/// Rule: base-10 integer within `[min, max]`.
pub fn num_range(min: i64, max: i64, label: impl Into<String>) -> Rule {
    Rule {
        required: true,
        min: Some(min),
        max: Some(max),
        label: label.into(),
        ..Rule::default()
    }
}

/// Rule: value must fully match `pattern`.
///
/// Fails with a configuration error when the pattern does not compile, so a
/// bad schema surfaces at build time rather than as a per-request mystery.
pub fn matches(pattern: &str, label: impl Into<String>) -> Result<Rule> {
    let anchored = format!("^(?:{})$", pattern);
    let compiled = Regex::new(&anchored)
        .map_err(|e| VixError::config("validation", format!("bad pattern '{}': {}", pattern, e)))?;
    Ok(Rule {
        required: true,
        pattern: Some(compiled),
        label: label.into(),
        ..Rule::default()
    })
}

fn check_field(field: &str, value: Option<&String>, rule: &Rule) -> Option<String> {
    let label = if rule.label.is_empty() {
        field
    } else {
        rule.label.as_str()
    };

    let value = match value {
        Some(v) if !v.is_empty() => v,
        _ => {
            return rule
                .required
                .then(|| format!("{} is required", label));
        }
    };

    if let Some(min_len) = rule.min_len {
        if value.chars().count() < min_len {
            return Some(format!("{} must be at least {} characters", label, min_len));
        }
    }
    if let Some(max_len) = rule.max_len {
        if value.chars().count() > max_len {
            return Some(format!("{} must be at most {} characters", label, max_len));
        }
    }

    if rule.min.is_some() || rule.max.is_some() {
        let Ok(n) = value.trim().parse::<i64>() else {
            return Some(format!("{} must be a number", label));
        };
        if let Some(min) = rule.min {
            if n < min {
                return Some(format!("{} must be at least {}", label, min));
            }
        }
        if let Some(max) = rule.max {
            if n > max {
                return Some(format!("{} must be at most {}", label, max));
            }
        }
    }

    if let Some(pattern) = &rule.pattern {
        if !pattern.is_match(value) {
            return Some(format!("{} has invalid format", label));
        }
    }

    None
}

/// Validate `data` against `schema`, aggregating every field failure.
pub fn validate_map(
    data: &BTreeMap<String, String>,
    schema: &Schema,
) -> std::result::Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    for (field, rule) in schema {
        if let Some(message) = check_field(field, data.get(field), rule) {
            errors.insert(field.clone(), message);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
