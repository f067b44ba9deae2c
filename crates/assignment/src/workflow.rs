//! Approval workflow gate.

use crate::assignment::AssignmentStatus;
use crate::settings::AssignSettings;
use crate::writer::WriteMode;

/// Decides whether a created or edited assignment must wait for approval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkflowGate {
    add_approval_required: bool,
    edit_approval_required: bool,
}

impl WorkflowGate {
    pub fn new(add_approval_required: bool, edit_approval_required: bool) -> Self {
        Self {
            add_approval_required,
            edit_approval_required,
        }
    }

    pub fn from_settings(settings: &AssignSettings) -> Self {
        Self::new(settings.add_approval_required, settings.edit_approval_required)
    }

    pub fn is_add_approval_required(&self) -> bool {
        self.add_approval_required
    }

    pub fn is_edit_approval_required(&self) -> bool {
        self.edit_approval_required
    }

    /// Status a write in `mode` lands in.
    pub fn status_for(&self, mode: WriteMode) -> AssignmentStatus {
        let held = match mode {
            WriteMode::Create => self.add_approval_required,
            WriteMode::Edit => self.edit_approval_required,
        };
        if held {
            AssignmentStatus::Pending
        } else {
            AssignmentStatus::Active
        }
    }
}
