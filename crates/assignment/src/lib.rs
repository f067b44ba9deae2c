//! Seller product assignments (event-free, synchronous domain services).
//!
//! A seller attaches their own listing (price, quantity, condition, dynamic
//! attributes) to a catalog product owned by someone else. This crate holds the
//! decision logic: rule validation, duplicate detection, persistence of the
//! assignment and its localized attribute values, and the approval workflow.
//! Storage and the catalog are injected through traits.

pub mod assignment;
pub mod context;
pub mod duplicate;
pub mod eligibility;
pub mod rules;
pub mod service;
pub mod settings;
pub mod store;
pub mod submission;
pub mod values;
pub mod workflow;
pub mod writer;

pub use assignment::{AssignmentStatus, AttributeValueKey, AttributeValueRecord, ProductAssignment};
pub use context::{Clock, FixedClock, RequestContext, SystemClock};
pub use duplicate::DuplicateDetector;
pub use eligibility::{EligibilityReport, EligibilityTarget, IneligibleReason, check_product};
pub use rules::{FieldRules, RuleEngine, RuleRegistry, ValidationReport, Validator, rule_name};
pub use service::AssignmentService;
pub use settings::AssignSettings;
pub use store::{
    AssignmentFilter, AssignmentStore, AttributeValueFilter, AttributeValueStore, StoreError,
};
pub use submission::{FieldMap, Submission};
pub use workflow::WorkflowGate;
pub use writer::{AssignmentResult, AssignmentWriter, WriteMode};
