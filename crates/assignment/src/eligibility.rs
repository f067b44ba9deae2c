//! Eligibility of a catalog product for a seller assignment.

use serde::Serialize;

use mpassign_catalog::Catalog;
use mpassign_core::{AssignmentId, ProductId, SellerId};

use crate::settings::AssignSettings;
use crate::store::{AssignmentStore, StoreError};

/// What the request targets: a product to assign, or an assignment to edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EligibilityTarget {
    Add(ProductId),
    Edit(AssignmentId),
}

impl EligibilityTarget {
    /// Host form encoding: `is_add == 1` means `id` is a product id.
    pub fn from_request(id: u64, is_add: bool) -> Self {
        if is_add {
            EligibilityTarget::Add(ProductId::new(id))
        } else {
            EligibilityTarget::Edit(AssignmentId::new(id))
        }
    }

    fn is_zero(self) -> bool {
        match self {
            EligibilityTarget::Add(id) => id.is_zero(),
            EligibilityTarget::Edit(id) => id.is_zero(),
        }
    }
}

/// Why a product cannot be assigned, in check order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IneligibleReason {
    InvalidRequest,
    ProductMissing,
    TypeNotAllowed,
    OwnProduct,
}

impl IneligibleReason {
    pub fn message(self) -> &'static str {
        match self {
            IneligibleReason::InvalidRequest => "Invalid request.",
            IneligibleReason::ProductMissing => "Product does not exist.",
            IneligibleReason::TypeNotAllowed => "Product type not allowed.",
            IneligibleReason::OwnProduct => "Product is your own product.",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EligibilityReport {
    pub error: bool,
    pub msg: String,
    #[serde(skip)]
    pub reason: Option<IneligibleReason>,
}

impl EligibilityReport {
    pub fn eligible() -> Self {
        Self::default()
    }

    pub fn rejected(reason: IneligibleReason) -> Self {
        Self {
            error: true,
            msg: reason.message().to_string(),
            reason: Some(reason),
        }
    }

    pub fn is_eligible(&self) -> bool {
        !self.error
    }
}

/// Check whether `seller_id` may assign (or keep editing) the targeted product.
///
/// The first failing check wins; a zero id fails before any lookup.
pub fn check_product<C, A>(
    catalog: &C,
    assignments: &A,
    settings: &AssignSettings,
    target: EligibilityTarget,
    seller_id: SellerId,
) -> Result<EligibilityReport, StoreError>
where
    C: Catalog + ?Sized,
    A: AssignmentStore + ?Sized,
{
    if target.is_zero() {
        return Ok(EligibilityReport::rejected(IneligibleReason::InvalidRequest));
    }

    let product_id = match target {
        EligibilityTarget::Add(product_id) => product_id,
        EligibilityTarget::Edit(assign_id) => assignments
            .get(assign_id)?
            .map(|assignment| assignment.product_id)
            .unwrap_or_default(),
    };

    let product = if product_id.is_zero() {
        None
    } else {
        catalog.resolve_product(product_id)
    };
    let Some(product) = product else {
        return Ok(EligibilityReport::rejected(IneligibleReason::ProductMissing));
    };

    if !settings.is_type_allowed(product.type_id()) {
        return Ok(EligibilityReport::rejected(IneligibleReason::TypeNotAllowed));
    }

    if product.owner_id() == seller_id {
        return Ok(EligibilityReport::rejected(IneligibleReason::OwnProduct));
    }

    Ok(EligibilityReport::eligible())
}
