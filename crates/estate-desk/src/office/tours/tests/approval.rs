use crate::office::tours::approval::{
    review, validate_reason, ApprovalError, ReviewAction, ReviewStage,
};
use crate::office::tours::domain::{AppointmentStatus, StaffRole};

fn approve() -> ReviewAction {
    ReviewAction::Approve { notes: None }
}

fn reject(reason: &str) -> ReviewAction {
    ReviewAction::Reject {
        reason: reason.to_string(),
    }
}

#[test]
fn pending_approval_lands_on_cs_approved_only() {
    let next = review(AppointmentStatus::Pending, StaffRole::CustomerService, &approve())
        .expect("customer service may approve a pending appointment");

    assert_eq!(next, AppointmentStatus::CsApproved);
    assert_ne!(next, AppointmentStatus::SalesApproved);
}

#[test]
fn cs_approved_approval_lands_on_sales_approved() {
    let next = review(AppointmentStatus::CsApproved, StaffRole::Sales, &approve())
        .expect("sales may approve after customer service");

    assert_eq!(next, AppointmentStatus::SalesApproved);
}

#[test]
fn either_stage_may_reject_with_a_reason() {
    let first = review(
        AppointmentStatus::Pending,
        StaffRole::CustomerService,
        &reject("no agent available that day"),
    )
    .expect("customer service rejection");
    let second = review(
        AppointmentStatus::CsApproved,
        StaffRole::Sales,
        &reject("unit already reserved"),
    )
    .expect("sales rejection");

    assert_eq!(first, AppointmentStatus::Rejected);
    assert_eq!(second, AppointmentStatus::Rejected);
}

#[test]
fn blank_reason_is_refused() {
    match review(
        AppointmentStatus::Pending,
        StaffRole::CustomerService,
        &reject("   "),
    ) {
        Err(ApprovalError::EmptyReason) => {}
        other => panic!("expected empty-reason refusal, got {other:?}"),
    }
}

#[test]
fn rejected_is_terminal() {
    match review(AppointmentStatus::Rejected, StaffRole::Sales, &approve()) {
        Err(ApprovalError::NotReviewable { status }) => assert_eq!(status, "rejected"),
        other => panic!("expected not-reviewable, got {other:?}"),
    }
}

#[test]
fn administrative_states_have_no_review_stage() {
    for status in [
        AppointmentStatus::SalesApproved,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::Completed,
        AppointmentStatus::NoShow,
    ] {
        assert!(ReviewStage::for_status(status).is_none());
    }
    assert_eq!(
        ReviewStage::for_status(AppointmentStatus::Pending),
        Some(ReviewStage::CustomerService)
    );
    assert_eq!(
        ReviewStage::for_status(AppointmentStatus::CsApproved),
        Some(ReviewStage::Sales)
    );
}

#[test]
fn sales_cannot_act_on_the_customer_service_stage() {
    match review(AppointmentStatus::Pending, StaffRole::Sales, &approve()) {
        Err(ApprovalError::RoleNotAllowed { role, stage }) => {
            assert_eq!(role, "sales");
            assert_eq!(stage, "customer service");
        }
        other => panic!("expected role refusal, got {other:?}"),
    }
}

#[test]
fn customer_service_cannot_act_on_the_sales_stage() {
    match review(
        AppointmentStatus::CsApproved,
        StaffRole::CustomerService,
        &approve(),
    ) {
        Err(ApprovalError::RoleNotAllowed { .. }) => {}
        other => panic!("expected role refusal, got {other:?}"),
    }
}

#[test]
fn admin_does_not_sit_on_either_review_desk() {
    assert!(review(AppointmentStatus::Pending, StaffRole::Admin, &approve()).is_err());
    assert!(review(AppointmentStatus::CsApproved, StaffRole::Admin, &approve()).is_err());
}

#[test]
fn validate_reason_trims_surrounding_whitespace() {
    let reason = validate_reason("  flooding along the access road  ").expect("reason accepted");
    assert_eq!(reason, "flooding along the access road");
}
