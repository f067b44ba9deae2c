//! Store-view scoped reads of assignment attribute values.

use mpassign_catalog::AllowedAttribute;
use mpassign_core::{AssignmentId, AttributeId, StoreViewId};

use crate::store::{AssignmentStore, AttributeValueFilter, AttributeValueStore, StoreError};

/// Stored value of one attribute for one assignment in `store_view`.
///
/// A missing record reads as the empty string.
pub fn stored_value<V>(
    values: &V,
    assignment_id: AssignmentId,
    attribute_id: AttributeId,
    store_view: StoreViewId,
) -> Result<String, StoreError>
where
    V: AttributeValueStore + ?Sized,
{
    if assignment_id.is_zero() {
        return Ok(String::new());
    }
    let filter = AttributeValueFilter::assignment(assignment_id)
        .attribute(attribute_id)
        .store_view(store_view);
    Ok(values
        .find(&filter)?
        .pop()
        .map(|record| record.value)
        .unwrap_or_default())
}

/// Like [`stored_value`], but select option values are mapped to their label.
pub fn stored_label<V>(
    values: &V,
    assignment_id: AssignmentId,
    attribute: &AllowedAttribute,
    store_view: StoreViewId,
) -> Result<String, StoreError>
where
    V: AttributeValueStore + ?Sized,
{
    let value = stored_value(values, assignment_id, attribute.id, store_view)?;
    Ok(attribute.option_label(&value).to_string())
}

/// Localized description of an assignment.
///
/// Lookup order: the default description value for `store_view`, the first
/// default description value of any store view, the assignment's own
/// description.
pub fn localized_description<A, V>(
    assignments: &A,
    values: &V,
    assignment_id: AssignmentId,
    store_view: StoreViewId,
    description_type: AttributeId,
) -> Result<String, StoreError>
where
    A: AssignmentStore + ?Sized,
    V: AttributeValueStore + ?Sized,
{
    let defaults = AttributeValueFilter::assignment(assignment_id)
        .attribute(description_type)
        .defaults_only();

    let scoped = values.find(&defaults.store_view(store_view))?;
    let localized = match scoped.into_iter().last() {
        Some(record) => Some(record.value),
        None => values.find(&defaults)?.into_iter().next().map(|record| record.value),
    };

    match localized {
        Some(desc) if !desc.is_empty() => Ok(desc),
        _ => Ok(assignments
            .get(assignment_id)?
            .map(|assignment| assignment.description)
            .unwrap_or_default()),
    }
}
