//! Engine configuration, supplied by the host at construction time.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use mpassign_core::{AttributeId, DomainError, DomainResult};

use crate::context::DEFAULT_DATE_FORMAT;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignSettings {
    /// New assignments are held as pending until approved.
    pub add_approval_required: bool,
    /// Edited assignments are held as pending until approved.
    pub edit_approval_required: bool,
    /// Catalog product types sellers may assign to.
    pub allowed_product_types: Vec<String>,
    /// strftime format of `created_at`.
    pub date_format: String,
    /// Attribute codes handled as first-class assignment fields.
    pub excluded_attribute_codes: Vec<String>,
    /// Attribute value type holding localized descriptions.
    pub description_value_type: AttributeId,
}

impl Default for AssignSettings {
    fn default() -> Self {
        Self {
            add_approval_required: false,
            edit_approval_required: false,
            allowed_product_types: vec!["simple".to_string(), "virtual".to_string()],
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            excluded_attribute_codes: vec![
                "price".to_string(),
                "quantity_and_stock_status".to_string(),
            ],
            description_value_type: AttributeId::new(2),
        }
    }
}

impl AssignSettings {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn is_type_allowed(&self, type_id: &str) -> bool {
        self.allowed_product_types.iter().any(|allowed| allowed == type_id)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.date_format.trim().is_empty() {
            return Err(DomainError::validation("date_format cannot be empty"));
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(DomainError::validation(format!(
                "date_format '{}' is not a valid strftime format",
                self.date_format
            )));
        }
        Ok(())
    }
}
