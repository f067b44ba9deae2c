//! Assignment writer: persists an assignment and reconciles its attribute values.

use serde::Serialize;

use mpassign_catalog::CatalogProduct;
use mpassign_core::{AssignmentId, ProductId, StoreViewId};

use crate::assignment::{AssignmentStatus, AttributeValueKey, AttributeValueRecord, ProductAssignment};
use crate::context::{Clock, RequestContext};
use crate::store::{AssignmentStore, AttributeValueStore, StoreError};
use crate::submission::Submission;
use crate::workflow::WorkflowGate;

/// Whether a submission creates a new assignment or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Create,
    Edit,
}

impl WriteMode {
    /// Host form encoding: `1` edits, anything else creates.
    pub fn from_flag(flag: i64) -> Self {
        if flag == 1 { WriteMode::Edit } else { WriteMode::Create }
    }

    pub fn flag(self) -> u8 {
        match self {
            WriteMode::Create => 0,
            WriteMode::Edit => 1,
        }
    }
}

/// Outcome of [`AssignmentWriter::assign_product`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentResult {
    pub assign_id: AssignmentId,
    pub product_id: ProductId,
    pub error: bool,
    pub msg: String,
    pub qty: u64,
    pub flag: u8,
    pub status: AssignmentStatus,
    pub condition: i64,
    /// Quantity before an edit.
    pub old_qty: Option<u64>,
    /// Status before an edit.
    pub prev_status: Option<AssignmentStatus>,
}

impl AssignmentResult {
    /// The zero-valued result returned when nothing was written.
    pub fn skeleton() -> Self {
        Self {
            assign_id: AssignmentId::default(),
            product_id: ProductId::default(),
            error: false,
            msg: String::new(),
            qty: 0,
            flag: 0,
            status: AssignmentStatus::Active,
            condition: 0,
            old_qty: None,
            prev_status: None,
        }
    }

    /// `true` when no assignment was written (e.g. the edited one does not exist).
    pub fn is_empty(&self) -> bool {
        self.assign_id.is_zero()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ImageUpdate {
    Keep,
    Clear,
    Replace(String),
}

impl ImageUpdate {
    fn from_submission(submission: &Submission) -> Self {
        if submission.delete_image {
            ImageUpdate::Clear
        } else if submission.image.is_empty() {
            ImageUpdate::Keep
        } else {
            ImageUpdate::Replace(submission.image.clone())
        }
    }

    fn apply(self, image: &mut String) {
        match self {
            ImageUpdate::Keep => {}
            ImageUpdate::Clear => image.clear(),
            ImageUpdate::Replace(new) => *image = new,
        }
    }
}

pub struct AssignmentWriter<'a, A: ?Sized, V: ?Sized> {
    assignments: &'a A,
    values: &'a V,
    gate: WorkflowGate,
    clock: &'a dyn Clock,
    date_format: &'a str,
}

impl<'a, A, V> AssignmentWriter<'a, A, V>
where
    A: AssignmentStore + ?Sized,
    V: AttributeValueStore + ?Sized,
{
    pub fn new(
        assignments: &'a A,
        values: &'a V,
        gate: WorkflowGate,
        clock: &'a dyn Clock,
        date_format: &'a str,
    ) -> Self {
        Self {
            assignments,
            values,
            gate,
            clock,
            date_format,
        }
    }

    /// Create or edit the caller's assignment of `product`, then reconcile its
    /// attribute values for the caller's store view.
    ///
    /// Editing a missing assignment writes nothing and returns
    /// [`AssignmentResult::skeleton`].
    pub fn assign_product(
        &self,
        product: &CatalogProduct,
        submission: &Submission,
        mode: WriteMode,
        ctx: &RequestContext,
    ) -> Result<AssignmentResult, StoreError> {
        let mut result = AssignmentResult::skeleton();
        let status = self.gate.status_for(mode);
        let image = ImageUpdate::from_submission(submission);

        let saved = match mode {
            WriteMode::Create => {
                let mut assignment = ProductAssignment {
                    id: AssignmentId::default(),
                    product_id: product.id,
                    owner_id: product.owner_id(),
                    seller_id: ctx.seller_id,
                    qty: submission.qty,
                    price: submission.price,
                    condition: submission.condition,
                    description: submission.description.clone(),
                    image: String::new(),
                    status,
                    type_id: product.type_id().to_string(),
                    created_at: self.clock.today(self.date_format),
                };
                image.apply(&mut assignment.image);
                self.assignments.insert(assignment)?
            }
            WriteMode::Edit => {
                let Some(mut assignment) = self.assignments.get(submission.assign_id)? else {
                    tracing::warn!(
                        assign_id = %submission.assign_id,
                        seller_id = %ctx.seller_id,
                        "edit of unknown assignment ignored"
                    );
                    return Ok(result);
                };
                result.old_qty = Some(assignment.qty);
                result.prev_status = Some(assignment.status);
                result.flag = mode.flag();

                assignment.product_id = product.id;
                assignment.owner_id = product.owner_id();
                assignment.seller_id = ctx.seller_id;
                assignment.qty = submission.qty;
                assignment.price = submission.price;
                assignment.condition = submission.condition;
                assignment.description = submission.description.clone();
                assignment.type_id = product.type_id().to_string();
                assignment.status = status;
                image.apply(&mut assignment.image);

                self.assignments.update(&assignment)?;
                assignment
            }
        };

        let reconciled =
            self.save_additional_attributes(saved.id, product, submission, ctx.store_view)?;

        tracing::info!(
            assign_id = %saved.id,
            product_id = %saved.product_id,
            seller_id = %saved.seller_id,
            status = ?saved.status,
            attributes = reconciled,
            mode = ?mode,
            "assignment saved"
        );

        if saved.is_saved() {
            result.assign_id = saved.id;
            result.product_id = saved.product_id;
            result.qty = saved.qty;
            result.status = saved.status;
            result.condition = saved.condition;
        }
        Ok(result)
    }

    /// Upsert one value per seller-settable attribute of `product` for
    /// `(attribute, assignment_id, store_view)`; returns how many were written.
    ///
    /// Absent submitted values are stored as the empty string.
    pub fn save_additional_attributes(
        &self,
        assignment_id: AssignmentId,
        product: &CatalogProduct,
        submission: &Submission,
        store_view: StoreViewId,
    ) -> Result<usize, StoreError> {
        let mut written = 0;
        for attribute in product.seller_settable_attributes() {
            let key = AttributeValueKey {
                attribute_id: attribute.id,
                assignment_id,
                store_view,
            };
            let value = submission.attribute_value(&attribute.code).unwrap_or("");

            let existing = self.values.find(&key.into())?;
            if existing.is_empty() {
                self.values.insert(AttributeValueRecord::seller_value(key, value))?;
                written += 1;
                continue;
            }
            for mut record in existing {
                record.value = value.to_string();
                self.values.update(&record)?;
                written += 1;
            }
        }
        Ok(written)
    }
}
