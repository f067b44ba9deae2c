use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mpassign_core::{AssignmentId, AttributeId, Entity, ProductId, SellerId, StoreViewId};

/// Assignment status lifecycle.
///
/// Transitions are driven by the approval workflow only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    Pending,
    Active,
    Disabled,
}

impl AssignmentStatus {
    /// Numeric code as stored by the host platform.
    pub fn code(self) -> u8 {
        match self {
            AssignmentStatus::Pending => 0,
            AssignmentStatus::Active => 1,
            AssignmentStatus::Disabled => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(AssignmentStatus::Pending),
            1 => Some(AssignmentStatus::Active),
            2 => Some(AssignmentStatus::Disabled),
            _ => None,
        }
    }

    pub fn is_visible(self) -> bool {
        self == AssignmentStatus::Active
    }
}

/// A seller's listing of an existing catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAssignment {
    pub id: AssignmentId,
    pub product_id: ProductId,
    /// Seller that owns the catalog product.
    pub owner_id: SellerId,
    /// Seller who created this listing.
    pub seller_id: SellerId,
    pub qty: u64,
    pub price: Decimal,
    pub condition: i64,
    pub description: String,
    /// Empty when no image was uploaded.
    pub image: String,
    pub status: AssignmentStatus,
    pub type_id: String,
    /// Creation date, formatted with the configured date format.
    pub created_at: String,
}

impl ProductAssignment {
    pub fn is_saved(&self) -> bool {
        !self.id.is_zero()
    }
}

impl Entity for ProductAssignment {
    type Id = AssignmentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Natural key of an attribute value: one value per attribute, assignment and store view.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeValueKey {
    pub attribute_id: AttributeId,
    pub assignment_id: AssignmentId,
    pub store_view: StoreViewId,
}

/// One localized value of one dynamic attribute of an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValueRecord {
    pub key: AttributeValueKey,
    /// Free-form text or a select option value.
    pub value: String,
    pub is_default: bool,
    pub status: bool,
}

impl AttributeValueRecord {
    /// A fresh seller-supplied value (not a default, enabled).
    pub fn seller_value(key: AttributeValueKey, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
            is_default: false,
            status: true,
        }
    }
}

impl Entity for AttributeValueRecord {
    type Id = AttributeValueKey;

    fn id(&self) -> &Self::Id {
        &self.key
    }
}
