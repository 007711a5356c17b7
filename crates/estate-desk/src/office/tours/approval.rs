//! Pure transition rules for the review chain. The service fetches and
//! persists; everything about who may move an appointment where is decided
//! here, with no I/O.

use super::domain::{AppointmentStatus, StaffRole};

/// Which desk owns the next decision for an appointment under review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStage {
    CustomerService,
    Sales,
}

impl ReviewStage {
    pub const fn label(self) -> &'static str {
        match self {
            ReviewStage::CustomerService => "customer service",
            ReviewStage::Sales => "sales",
        }
    }

    /// The stage an appointment currently waits on, if it is reviewable.
    pub fn for_status(status: AppointmentStatus) -> Option<Self> {
        match status {
            AppointmentStatus::Pending => Some(Self::CustomerService),
            AppointmentStatus::CsApproved => Some(Self::Sales),
            _ => None,
        }
    }

    const fn acting_role(self) -> StaffRole {
        match self {
            ReviewStage::CustomerService => StaffRole::CustomerService,
            ReviewStage::Sales => StaffRole::Sales,
        }
    }

    const fn on_approve(self) -> AppointmentStatus {
        match self {
            ReviewStage::CustomerService => AppointmentStatus::CsApproved,
            ReviewStage::Sales => AppointmentStatus::SalesApproved,
        }
    }
}

/// Decision submitted by the reviewing desk.
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewAction {
    Approve { notes: Option<String> },
    Reject { reason: String },
}

/// Rule violations raised before any store call is made.
#[derive(Debug, thiserror::Error)]
pub enum ApprovalError {
    #[error("rejection reason is required")]
    EmptyReason,
    #[error("appointment in status '{status}' has no pending review")]
    NotReviewable { status: &'static str },
    #[error("role '{role}' may not act while the appointment awaits {stage} review")]
    RoleNotAllowed {
        role: &'static str,
        stage: &'static str,
    },
}

/// Trim and require a non-empty rejection reason.
pub fn validate_reason(raw: &str) -> Result<String, ApprovalError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApprovalError::EmptyReason);
    }
    Ok(trimmed.to_string())
}

/// Apply a review decision to the current status, returning the next status.
///
/// A `pending` appointment can only become `cs_approved` or `rejected`; the
/// sales stage is reachable solely through a prior customer-service
/// approval, so no single decision ever jumps straight to `sales_approved`.
pub fn review(
    status: AppointmentStatus,
    actor: StaffRole,
    action: &ReviewAction,
) -> Result<AppointmentStatus, ApprovalError> {
    let stage = ReviewStage::for_status(status).ok_or(ApprovalError::NotReviewable {
        status: status.label(),
    })?;

    if actor != stage.acting_role() {
        return Err(ApprovalError::RoleNotAllowed {
            role: actor.label(),
            stage: stage.label(),
        });
    }

    match action {
        ReviewAction::Approve { .. } => Ok(stage.on_approve()),
        ReviewAction::Reject { reason } => {
            validate_reason(reason)?;
            Ok(AppointmentStatus::Rejected)
        }
    }
}
