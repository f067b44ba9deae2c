//! Configuration loading: JSON files plus `MPASSIGN_*` environment overrides.

use std::path::Path;

use anyhow::Context;

use mpassign_assignment::{AssignSettings, FieldRules};

pub const ENV_ADD_APPROVAL: &str = "MPASSIGN_ADD_APPROVAL";
pub const ENV_EDIT_APPROVAL: &str = "MPASSIGN_EDIT_APPROVAL";
pub const ENV_ALLOWED_TYPES: &str = "MPASSIGN_ALLOWED_TYPES";
pub const ENV_DATE_FORMAT: &str = "MPASSIGN_DATE_FORMAT";

/// Default settings with environment overrides applied.
pub fn settings_from_env() -> AssignSettings {
    apply_overrides(AssignSettings::default(), |key| std::env::var(key).ok())
}

/// Settings from an optional JSON file, then environment overrides, validated.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<AssignSettings> {
    let base = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading settings from {}", path.display()))?;
            AssignSettings::from_json(&raw)
                .with_context(|| format!("parsing settings from {}", path.display()))?
        }
        None => AssignSettings::default(),
    };

    let settings = apply_overrides(base, |key| std::env::var(key).ok());
    settings.validate().context("invalid assignment settings")?;
    Ok(settings)
}

/// Field rules (rule codes per field, required fields) from a JSON file.
pub fn load_field_rules(path: &Path) -> anyhow::Result<FieldRules> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading field rules from {}", path.display()))?;
    let rules: FieldRules = serde_json::from_str(&raw)
        .with_context(|| format!("parsing field rules from {}", path.display()))?;
    Ok(rules)
}

fn parse_flag(key: &str, raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => {
            tracing::warn!(key, value = raw, "unparsable flag, keeping configured value");
            None
        }
    }
}

pub(crate) fn apply_overrides<F>(mut settings: AssignSettings, lookup: F) -> AssignSettings
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(flag) = lookup(ENV_ADD_APPROVAL).and_then(|raw| parse_flag(ENV_ADD_APPROVAL, &raw)) {
        settings.add_approval_required = flag;
    }
    if let Some(flag) = lookup(ENV_EDIT_APPROVAL).and_then(|raw| parse_flag(ENV_EDIT_APPROVAL, &raw)) {
        settings.edit_approval_required = flag;
    }
    if let Some(raw) = lookup(ENV_ALLOWED_TYPES) {
        let types: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        if types.is_empty() {
            tracing::warn!(key = ENV_ALLOWED_TYPES, "empty product type list ignored");
        } else {
            settings.allowed_product_types = types;
        }
    }
    if let Some(format) = lookup(ENV_DATE_FORMAT).filter(|f| !f.trim().is_empty()) {
        settings.date_format = format;
    }
    settings
}
