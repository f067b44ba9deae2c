//! Attribute catalog accessor: which attributes a seller may set.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use mpassign_core::{AttributeId, ValueObject};

use crate::product::{AttributeInput, AttributeOption, CatalogAttribute, CatalogProduct};

/// Why a catalog attribute was left out of the allowed set.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("attribute '{0}' has no resolvable backend")]
    MissingBackend(String),

    #[error("attribute '{0}' has no resolvable option source")]
    MissingSource(String),

    #[error("attribute '{0}' is not settable by sellers")]
    NotSellerSettable(String),

    #[error("attribute '{0}' is a first-class assignment field")]
    Excluded(String),
}

/// Projection of a catalog attribute a seller is permitted to set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedAttribute {
    pub id: AttributeId,
    pub code: String,
    pub input_type: AttributeInput,
    pub is_required: bool,
    pub label: String,
    /// Populated for select attributes only.
    pub options: Vec<AttributeOption>,
}

impl ValueObject for AllowedAttribute {}

impl AllowedAttribute {
    /// Project `attribute`, unless it must be skipped.
    pub fn project(attribute: &CatalogAttribute, excluded: &[String]) -> Result<Self, SkipReason> {
        if !attribute.is_allowed_for_sellers()? {
            return Err(SkipReason::NotSellerSettable(attribute.code.clone()));
        }
        if excluded.iter().any(|code| *code == attribute.code) {
            return Err(SkipReason::Excluded(attribute.code.clone()));
        }

        let options = if attribute.frontend_input.is_select() {
            attribute.select_options()?.to_vec()
        } else {
            Vec::new()
        };

        Ok(Self {
            id: attribute.id,
            code: attribute.code.clone(),
            input_type: attribute.frontend_input.clone(),
            is_required: attribute.is_required,
            label: attribute.frontend_label.clone(),
            options,
        })
    }

    /// Label of a select option value; non-select attributes and unknown
    /// values map to the value itself.
    pub fn option_label<'a>(&'a self, value: &'a str) -> &'a str {
        if !self.input_type.is_select() {
            return value;
        }
        self.options
            .iter()
            .find(|option| option.value == value)
            .map(|option| option.label.as_str())
            .unwrap_or(value)
    }
}

/// Allowed attributes keyed by code, in attribute-set order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllowedAttributes(Vec<AllowedAttribute>);

impl AllowedAttributes {
    pub fn get(&self, code: &str) -> Option<&AllowedAttribute> {
        self.0.iter().find(|attribute| attribute.code == code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AllowedAttribute> {
        self.0.iter()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|attribute| attribute.code.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<AllowedAttribute> for AllowedAttributes {
    fn from_iter<I: IntoIterator<Item = AllowedAttribute>>(iter: I) -> Self {
        let mut out: Vec<AllowedAttribute> = Vec::new();
        for attribute in iter {
            // Later definitions of the same code win, keeping the first position.
            match out.iter_mut().find(|existing| existing.code == attribute.code) {
                Some(existing) => *existing = attribute,
                None => out.push(attribute),
            }
        }
        Self(out)
    }
}

impl<'a> IntoIterator for &'a AllowedAttributes {
    type Item = &'a AllowedAttribute;
    type IntoIter = core::slice::Iter<'a, AllowedAttribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Attributes of `product` a seller may set, excluding `excluded` codes.
///
/// Partially configured attributes (no backend, no option source) are
/// skipped with a debug log.
pub fn allowed_attributes(product: &CatalogProduct, excluded: &[String]) -> AllowedAttributes {
    product
        .attribute_set_attributes()
        .iter()
        .map(|attribute| AllowedAttribute::project(attribute, excluded))
        .filter_map(|projected| match projected {
            Ok(attribute) => Some(attribute),
            Err(reason) => {
                tracing::debug!(product_id = %product.id, %reason, "attribute not allowed");
                None
            }
        })
        .collect()
}
