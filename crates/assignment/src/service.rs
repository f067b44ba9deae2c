//! `AssignmentService`: the entry point used by the storefront request handlers.

use std::sync::Arc;

use mpassign_catalog::{AllowedAttribute, AllowedAttributes, Catalog, allowed_attributes};
use mpassign_core::{AssignmentId, AttributeId, ProductId, StoreViewId};

use crate::assignment::ProductAssignment;
use crate::context::{Clock, RequestContext, SystemClock};
use crate::duplicate::DuplicateDetector;
use crate::eligibility::{self, EligibilityReport, EligibilityTarget};
use crate::rules::{RuleEngine, ValidationReport};
use crate::settings::AssignSettings;
use crate::store::{AssignmentFilter, AssignmentStore, AttributeValueStore, StoreError};
use crate::submission::{self, FieldMap, Submission, parse_id_lenient};
use crate::values;
use crate::workflow::WorkflowGate;
use crate::writer::{AssignmentResult, AssignmentWriter, WriteMode};

pub const DUPLICATE_MESSAGE: &str = "You Already have same product with same attributes.";

pub struct AssignmentService<C, A, V> {
    catalog: C,
    assignments: A,
    values: V,
    rules: RuleEngine,
    gate: WorkflowGate,
    settings: AssignSettings,
    clock: Arc<dyn Clock>,
}

impl<C, A, V> AssignmentService<C, A, V>
where
    C: Catalog,
    A: AssignmentStore,
    V: AttributeValueStore,
{
    pub fn new(catalog: C, assignments: A, values: V, rules: RuleEngine, settings: AssignSettings) -> Self {
        Self {
            catalog,
            assignments,
            values,
            rules,
            gate: WorkflowGate::from_settings(&settings),
            settings,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn settings(&self) -> &AssignSettings {
        &self.settings
    }

    pub fn gate(&self) -> WorkflowGate {
        self.gate
    }

    /// Attributes a seller may set on assignments of `product_id`; empty when
    /// the product does not exist.
    pub fn allowed_attributes(&self, product_id: ProductId) -> AllowedAttributes {
        self.catalog
            .resolve_product(product_id)
            .map(|product| allowed_attributes(&product, &self.settings.excluded_attribute_codes))
            .unwrap_or_default()
    }

    /// Validate a submitted form: field rules first, then duplicate detection
    /// against the caller's other assignments of the same product.
    pub fn validate_data(
        &self,
        fields: &FieldMap,
        ctx: &RequestContext,
    ) -> Result<ValidationReport, StoreError> {
        let mut report = self.rules.validate(fields);
        if report.error && !report.msg.is_empty() {
            return Ok(report);
        }

        let field = |name: &str| fields.get(name).map(String::as_str).unwrap_or("");
        let product_id = ProductId::new(parse_id_lenient(field(submission::PRODUCT_ID)));
        let assign_id = AssignmentId::new(parse_id_lenient(field(submission::ASSIGN_ID)));

        let allowed = self.allowed_attributes(product_id);
        let duplicate = self.find_duplicate(
            product_id,
            ctx,
            assign_id,
            fields,
            &allowed,
        )?;
        if duplicate {
            report.msg = DUPLICATE_MESSAGE.to_string();
            report.error = true;
        }
        Ok(report)
    }

    pub fn find_duplicate(
        &self,
        product_id: ProductId,
        ctx: &RequestContext,
        exclude: AssignmentId,
        candidate: &FieldMap,
        allowed: &AllowedAttributes,
    ) -> Result<bool, StoreError> {
        DuplicateDetector::new(&self.assignments, &self.values).find_duplicate(
            product_id,
            ctx.seller_id,
            exclude,
            candidate,
            allowed,
            ctx.store_view,
        )
    }

    /// Persist a submission. Writes nothing when the catalog product is gone.
    pub fn assign_product(
        &self,
        submission: &Submission,
        mode: WriteMode,
        ctx: &RequestContext,
    ) -> Result<AssignmentResult, StoreError> {
        let Some(product) = self.catalog.resolve_product(submission.product_id) else {
            tracing::warn!(product_id = %submission.product_id, "assignment of unknown product ignored");
            return Ok(AssignmentResult::skeleton());
        };

        AssignmentWriter::new(
            &self.assignments,
            &self.values,
            self.gate,
            self.clock.as_ref(),
            &self.settings.date_format,
        )
        .assign_product(&product, submission, mode, ctx)
    }

    pub fn check_product(
        &self,
        target: EligibilityTarget,
        ctx: &RequestContext,
    ) -> Result<EligibilityReport, StoreError> {
        eligibility::check_product(
            &self.catalog,
            &self.assignments,
            &self.settings,
            target,
            ctx.seller_id,
        )
    }

    pub fn attribute_value(
        &self,
        assignment_id: AssignmentId,
        attribute_id: AttributeId,
        store_view: StoreViewId,
    ) -> Result<String, StoreError> {
        values::stored_value(&self.values, assignment_id, attribute_id, store_view)
    }

    pub fn attribute_value_label(
        &self,
        assignment_id: AssignmentId,
        attribute: &AllowedAttribute,
        store_view: StoreViewId,
    ) -> Result<String, StoreError> {
        values::stored_label(&self.values, assignment_id, attribute, store_view)
    }

    pub fn description(
        &self,
        assignment_id: AssignmentId,
        store_view: StoreViewId,
    ) -> Result<String, StoreError> {
        values::localized_description(
            &self.assignments,
            &self.values,
            assignment_id,
            store_view,
            self.settings.description_value_type,
        )
    }

    pub fn assignment(&self, assignment_id: AssignmentId) -> Result<Option<ProductAssignment>, StoreError> {
        self.assignments.get(assignment_id)
    }

    /// Every seller's assignments of `product_id`, oldest first.
    pub fn assignments_for_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<ProductAssignment>, StoreError> {
        self.assignments.find(&AssignmentFilter::product(product_id))
    }
}
