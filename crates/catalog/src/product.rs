use std::sync::Arc;

use serde::{Deserialize, Serialize};

use mpassign_core::{AttributeId, ProductId, SellerId, ValueObject};

use crate::allowed::SkipReason;

/// Read-only view of the host catalog.
pub trait Catalog: Send + Sync {
    /// Resolve a catalog product by id; `None` when it does not exist.
    fn resolve_product(&self, id: ProductId) -> Option<CatalogProduct>;
}

impl<C> Catalog for Arc<C>
where
    C: Catalog + ?Sized,
{
    fn resolve_product(&self, id: ProductId) -> Option<CatalogProduct> {
        (**self).resolve_product(id)
    }
}

/// Frontend input kind of a catalog attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeInput {
    Text,
    Select,
    #[serde(untagged)]
    Other(String),
}

impl AttributeInput {
    pub fn as_str(&self) -> &str {
        match self {
            AttributeInput::Text => "text",
            AttributeInput::Select => "select",
            AttributeInput::Other(kind) => kind,
        }
    }

    pub fn is_select(&self) -> bool {
        matches!(self, AttributeInput::Select)
    }
}

/// One `(value, label)` pair of a select attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeOption {
    pub value: String,
    pub label: String,
}

impl AttributeOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

impl ValueObject for AttributeOption {}

/// Backend configuration of an attribute (as far as sellers are concerned).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttributeBackend {
    pub allow_sellers_to_set: bool,
}

/// An attribute of a catalog product's attribute set.
///
/// `backend` and `options` are `None` when the host could not resolve the
/// backend model or the option source; such attributes are skipped, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogAttribute {
    pub id: AttributeId,
    pub code: String,
    pub frontend_input: AttributeInput,
    pub frontend_label: String,
    pub is_required: bool,
    pub backend: Option<AttributeBackend>,
    pub options: Option<Vec<AttributeOption>>,
}

impl CatalogAttribute {
    /// Whether sellers may set this attribute on their own assignment.
    pub fn is_allowed_for_sellers(&self) -> Result<bool, SkipReason> {
        self.backend
            .map(|backend| backend.allow_sellers_to_set)
            .ok_or_else(|| SkipReason::MissingBackend(self.code.clone()))
    }

    /// Ordered option list of a select attribute.
    pub fn select_options(&self) -> Result<&[AttributeOption], SkipReason> {
        self.options
            .as_deref()
            .ok_or_else(|| SkipReason::MissingSource(self.code.clone()))
    }
}

/// A catalog product as seen by the assignment engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: ProductId,
    pub type_id: String,
    /// Marketplace seller that owns the product; zero for admin-owned products.
    pub owner_id: SellerId,
    pub attributes: Vec<CatalogAttribute>,
}

impl CatalogProduct {
    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    pub fn owner_id(&self) -> SellerId {
        self.owner_id
    }

    pub fn attribute_set_attributes(&self) -> &[CatalogAttribute] {
        &self.attributes
    }

    /// Attributes sellers may set, including the ones the accessor excludes
    /// as first-class assignment fields. Unresolvable attributes are dropped.
    pub fn seller_settable_attributes(&self) -> impl Iterator<Item = &CatalogAttribute> {
        self.attributes.iter().filter(|attribute| {
            match attribute.is_allowed_for_sellers() {
                Ok(allowed) => allowed,
                Err(reason) => {
                    tracing::debug!(%reason, "skipping attribute");
                    false
                }
            }
        })
    }
}
