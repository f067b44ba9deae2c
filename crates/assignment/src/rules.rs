//! Rule engine: named validators evaluated against submitted fields.
//!
//! Rule codes are hyphen-delimited (`validate-zero-or-greater`); the validator
//! is looked up under the camel-cased name (`validateZeroOrGreater`). Codes
//! without a registered validator are skipped.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::submission::FieldMap;

/// A single validation rule over a submitted value.
pub type Validator = Arc<dyn Fn(&str) -> bool + Send + Sync>;

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-?\d*(\.\d*)?\s*$").expect("valid regex"));
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$")
        .expect("valid regex")
});
static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i)(https?|ftp)://[^\s/$.?#][^\s]*$").expect("valid regex"));
static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(/)?\w+[^>]*>").expect("valid regex"));

/// Derive the validator name of a rule code: segments joined in camel case.
pub fn rule_name(code: &str) -> String {
    let mut name = String::with_capacity(code.len());
    for part in code.split('-') {
        if name.is_empty() {
            name.push_str(part);
            continue;
        }
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.push_str(chars.as_str());
        }
    }
    name
}

fn parse_number(value: &str) -> Option<f64> {
    if !NUMBER.is_match(value) {
        return None;
    }
    value.trim().parse::<f64>().ok()
}

/// Lookup table of validators keyed by validator name.
#[derive(Clone, Default)]
pub struct RuleRegistry {
    validators: HashMap<String, Validator>,
}

impl core::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut names: Vec<&String> = self.validators.keys().collect();
        names.sort();
        f.debug_struct("RuleRegistry").field("validators", &names).finish()
    }
}

impl RuleRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with the storefront's standard validators.
    ///
    /// Apart from `required-entry`, every validator accepts the empty string;
    /// presence is the required-field check's job.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry
            .register("required-entry", |v| !v.trim().is_empty())
            .register("validate-number", |v| v.is_empty() || parse_number(v).is_some())
            .register("validate-digits", |v| v.chars().all(|c| c.is_ascii_digit()))
            .register("validate-zero-or-greater", |v| {
                v.is_empty() || parse_number(v).is_some_and(|n| n >= 0.0)
            })
            .register("validate-not-negative-number", |v| {
                v.is_empty() || parse_number(v).is_some_and(|n| n >= 0.0)
            })
            .register("validate-greater-than-zero", |v| {
                v.is_empty() || parse_number(v).is_some_and(|n| n > 0.0)
            })
            .register("validate-alpha", |v| v.chars().all(|c| c.is_ascii_alphabetic()))
            .register("validate-alphanum", |v| v.chars().all(|c| c.is_ascii_alphanumeric()))
            .register("validate-email", |v| v.is_empty() || EMAIL.is_match(v))
            .register("validate-url", |v| v.is_empty() || URL.is_match(v))
            .register("validate-no-html-tags", |v| !HTML_TAG.is_match(v));
        registry
    }

    /// Register `validator` for a rule code (stored under its derived name).
    pub fn register<F>(&mut self, code: &str, validator: F) -> &mut Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.validators.insert(rule_name(code), Arc::new(validator));
        self
    }

    pub fn resolve(&self, code: &str) -> Option<&Validator> {
        self.validators.get(&rule_name(code))
    }
}

/// Which rules apply to which field, and which fields must be present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldRules {
    /// Field name -> rule codes, evaluated in order.
    pub rules: BTreeMap<String, Vec<String>>,
    /// Required field names; the first missing one is reported.
    pub required: Vec<String>,
}

impl FieldRules {
    pub fn rule(mut self, field: &str, code: &str) -> Self {
        self.rules
            .entry(field.to_string())
            .or_default()
            .push(code.to_string());
        self
    }

    pub fn require(mut self, field: &str) -> Self {
        self.required.push(field.to_string());
        self
    }
}

/// Outcome of a validation request.
///
/// Serialises to the flat shape the storefront expects:
/// `{"error": bool, "msg": "...", "<field>": {"<rule-code>": bool}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub error: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub msg: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, BTreeMap<String, bool>>,
}

impl ValidationReport {
    pub fn failure(msg: impl Into<String>) -> Self {
        Self {
            error: true,
            msg: msg.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        !self.error
    }

    pub fn rule_result(&self, field: &str, code: &str) -> Option<bool> {
        self.fields.get(field)?.get(code).copied()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

fn required_message(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => format!("{}{} is required field", first.to_uppercase(), chars.as_str()),
        None => "Field is required field".to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct RuleEngine {
    registry: RuleRegistry,
    field_rules: FieldRules,
}

impl RuleEngine {
    pub fn new(registry: RuleRegistry, field_rules: FieldRules) -> Self {
        Self {
            registry,
            field_rules,
        }
    }

    pub fn field_rules(&self) -> &FieldRules {
        &self.field_rules
    }

    /// Validate submitted fields.
    ///
    /// A missing required field short-circuits: only the first one (in
    /// required-field order) is reported and no rule runs.
    pub fn validate(&self, fields: &FieldMap) -> ValidationReport {
        if let Some(missing) = self
            .field_rules
            .required
            .iter()
            .find(|name| !fields.contains_key(name.as_str()))
        {
            return ValidationReport::failure(required_message(missing));
        }

        let mut report = ValidationReport::default();
        for (field, value) in fields {
            let Some(codes) = self.field_rules.rules.get(field) else {
                continue;
            };
            for code in codes {
                let Some(validator) = self.registry.resolve(code) else {
                    tracing::debug!(field = %field, rule = %code, "no validator registered, skipping");
                    continue;
                };
                let passed = validator(value.as_str());
                report
                    .fields
                    .entry(field.clone())
                    .or_default()
                    .insert(code.clone(), passed);
                if !passed {
                    report.error = true;
                }
            }
        }
        report
    }
}
