//! Duplicate detection across a seller's assignments of one product.

use mpassign_catalog::AllowedAttributes;
use mpassign_core::{AssignmentId, ProductId, SellerId, StoreViewId};

use crate::store::{AssignmentFilter, AssignmentStore, AttributeValueStore, StoreError};
use crate::submission::FieldMap;
use crate::values::stored_value;

/// Finds an existing assignment equivalent to a candidate one.
///
/// Two assignments of the same product by the same seller are equivalent when
/// every allowed attribute holds the same value in the current store view.
pub struct DuplicateDetector<'a, A: ?Sized, V: ?Sized> {
    assignments: &'a A,
    values: &'a V,
}

impl<'a, A, V> DuplicateDetector<'a, A, V>
where
    A: AssignmentStore + ?Sized,
    V: AttributeValueStore + ?Sized,
{
    pub fn new(assignments: &'a A, values: &'a V) -> Self {
        Self {
            assignments,
            values,
        }
    }

    /// `true` if `seller_id` already has an equivalent assignment of `product_id`.
    ///
    /// `exclude` skips the assignment being edited. With no allowed attributes
    /// any existing assignment counts as a duplicate. A candidate value absent
    /// from `candidate` never matches.
    pub fn find_duplicate(
        &self,
        product_id: ProductId,
        seller_id: SellerId,
        exclude: AssignmentId,
        candidate: &FieldMap,
        allowed: &AllowedAttributes,
        store_view: StoreViewId,
    ) -> Result<bool, StoreError> {
        let filter = AssignmentFilter::product(product_id)
            .seller(seller_id)
            .excluding(exclude);

        for existing in self.assignments.find(&filter)? {
            if self.is_equivalent(existing.id, candidate, allowed, store_view)? {
                tracing::debug!(
                    %product_id,
                    %seller_id,
                    duplicate_of = %existing.id,
                    "equivalent assignment found"
                );
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn is_equivalent(
        &self,
        existing: AssignmentId,
        candidate: &FieldMap,
        allowed: &AllowedAttributes,
        store_view: StoreViewId,
    ) -> Result<bool, StoreError> {
        for attribute in allowed {
            let Some(submitted) = candidate.get(&attribute.code) else {
                return Ok(false);
            };
            let stored = stored_value(self.values, existing, attribute.id, store_view)?;
            if stored != *submitted {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::assignment::{AssignmentStatus, AttributeValueKey, AttributeValueRecord, ProductAssignment};
    use crate::store::AttributeValueFilter;
    use mpassign_catalog::{AllowedAttribute, AttributeInput};
    use mpassign_core::AttributeId;

    /// Minimal Vec-backed stores (no id allocation, no uniqueness checks).
    #[derive(Default)]
    struct Rows {
        assignments: Mutex<Vec<ProductAssignment>>,
        values: Mutex<Vec<AttributeValueRecord>>,
    }

    impl AssignmentStore for Rows {
        fn insert(&self, assignment: ProductAssignment) -> Result<ProductAssignment, StoreError> {
            self.assignments.lock().unwrap().push(assignment.clone());
            Ok(assignment)
        }

        fn update(&self, _assignment: &ProductAssignment) -> Result<(), StoreError> {
            Ok(())
        }

        fn get(&self, id: AssignmentId) -> Result<Option<ProductAssignment>, StoreError> {
            Ok(self.assignments.lock().unwrap().iter().find(|a| a.id == id).cloned())
        }

        fn find(&self, filter: &AssignmentFilter) -> Result<Vec<ProductAssignment>, StoreError> {
            Ok(self
                .assignments
                .lock()
                .unwrap()
                .iter()
                .filter(|a| filter.matches(a))
                .cloned()
                .collect())
        }
    }

    impl AttributeValueStore for Rows {
        fn insert(&self, record: AttributeValueRecord) -> Result<(), StoreError> {
            self.values.lock().unwrap().push(record);
            Ok(())
        }

        fn update(&self, _record: &AttributeValueRecord) -> Result<(), StoreError> {
            Ok(())
        }

        fn find(&self, filter: &AttributeValueFilter) -> Result<Vec<AttributeValueRecord>, StoreError> {
            Ok(self
                .values
                .lock()
                .unwrap()
                .iter()
                .filter(|r| filter.matches(r))
                .cloned()
                .collect())
        }
    }

    const VIEW: StoreViewId = StoreViewId::new(1);

    fn seed(rows: &Rows, id: u64, values: &[(u64, &str)]) {
        AssignmentStore::insert(
            rows,
            ProductAssignment {
                id: AssignmentId::new(id),
                product_id: ProductId::new(10),
                owner_id: SellerId::new(1),
                seller_id: SellerId::new(2),
                qty: 1,
                price: Default::default(),
                condition: 1,
                description: String::new(),
                image: String::new(),
                status: AssignmentStatus::Active,
                type_id: "simple".to_string(),
                created_at: "2024-01-01".to_string(),
            },
        )
        .unwrap();
        for (attribute, value) in values {
            let key = AttributeValueKey {
                attribute_id: AttributeId::new(*attribute),
                assignment_id: AssignmentId::new(id),
                store_view: VIEW,
            };
            AttributeValueStore::insert(rows, AttributeValueRecord::seller_value(key, *value)).unwrap();
        }
    }

    fn allowed(codes: &[(u64, &str)]) -> AllowedAttributes {
        codes
            .iter()
            .map(|(id, code)| AllowedAttribute {
                id: AttributeId::new(*id),
                code: code.to_string(),
                input_type: AttributeInput::Text,
                is_required: false,
                label: code.to_string(),
                options: Vec::new(),
            })
            .collect()
    }

    fn candidate(pairs: &[(&str, &str)]) -> FieldMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn detect(rows: &Rows, exclude: u64, fields: &FieldMap, allowed: &AllowedAttributes) -> bool {
        DuplicateDetector::new(rows, rows)
            .find_duplicate(
                ProductId::new(10),
                SellerId::new(2),
                AssignmentId::new(exclude),
                fields,
                allowed,
                VIEW,
            )
            .unwrap()
    }

    #[test]
    fn one_mismatching_attribute_makes_assignments_distinct() {
        let rows = Rows::default();
        seed(&rows, 1, &[(5, "red"), (6, "M")]);
        let allowed = allowed(&[(5, "color"), (6, "size")]);

        assert!(detect(&rows, 0, &candidate(&[("color", "red"), ("size", "M")]), &allowed));
        assert!(!detect(&rows, 0, &candidate(&[("color", "red"), ("size", "L")]), &allowed));
        assert!(!detect(&rows, 1, &candidate(&[("color", "red"), ("size", "M")]), &allowed));
    }

    #[test]
    fn missing_stored_value_matches_empty_submission_only() {
        let rows = Rows::default();
        seed(&rows, 1, &[(5, "red")]);
        let allowed = allowed(&[(5, "color"), (6, "size")]);

        assert!(detect(&rows, 0, &candidate(&[("color", "red"), ("size", "")]), &allowed));
        assert!(!detect(&rows, 0, &candidate(&[("color", "red")]), &allowed));
    }

    #[test]
    fn empty_attribute_set_matches_any_assignment() {
        let rows = Rows::default();
        assert!(!detect(&rows, 0, &FieldMap::new(), &AllowedAttributes::default()));

        seed(&rows, 1, &[]);
        assert!(detect(&rows, 0, &FieldMap::new(), &AllowedAttributes::default()));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: identical values are a duplicate; changing any single
            /// attribute makes the candidate distinct.
            #[test]
            fn single_change_breaks_equivalence(
                values in proptest::collection::vec("[a-z0-9]{1,6}", 1..6),
                changed in any::<prop::sample::Index>(),
            ) {
                let rows = Rows::default();
                let stored: Vec<(u64, &str)> = values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (i as u64 + 1, v.as_str()))
                    .collect();
                seed(&rows, 1, &stored);

                let codes: Vec<(u64, String)> =
                    (1..=values.len() as u64).map(|i| (i, format!("attr_{i}"))).collect();
                let code_refs: Vec<(u64, &str)> =
                    codes.iter().map(|(i, c)| (*i, c.as_str())).collect();
                let allowed = allowed(&code_refs);

                let mut fields: FieldMap = codes
                    .iter()
                    .zip(&values)
                    .map(|((_, code), value)| (code.clone(), value.clone()))
                    .collect();
                prop_assert!(detect(&rows, 0, &fields, &allowed));

                let (_, code) = &codes[changed.index(codes.len())];
                fields.entry(code.clone()).and_modify(|v| v.push('!'));
                prop_assert!(!detect(&rows, 0, &fields, &allowed));
            }
        }
    }
}
