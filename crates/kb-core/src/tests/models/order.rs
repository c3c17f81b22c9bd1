use crate::{
    CoreError, NewOrder, Order, OrderAction, OrderId, OrderStatus, OrderUpdate, Priority,
    ProposalId, UserId,
};

use chrono::{Duration, TimeZone, Utc};
use googletest::assert_that;
use googletest::prelude::{anything, eq, err, ok};
use serde_json::json;

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

fn new_order() -> NewOrder {
    NewOrder::new("Landing page", "One page, two forms", 500.0, now() + Duration::days(7))
}

// =========================================================================
// Deserialization
// =========================================================================

#[test]
fn given_order_with_proposals_when_deserialized_then_nested_models_mapped() {
    // Given
    let payload = json!({
        "id": 3,
        "title": "Landing page",
        "description": "One page",
        "budget": 500.0,
        "deadline": "2025-07-01T00:00:00",
        "priority": "URGENT",
        "status": "in_progress",
        "tags": "web,design",
        "customer_id": 7,
        "assigned_executor_id": 8,
        "created_at": "2025-06-01T10:00:00",
        "proposals": [
            {"id": 1, "order_id": 3, "user_id": 8, "description": "Done in a week",
             "price": 450.0, "status": "accepted"},
            {"id": 2, "order_id": 3, "user_id": 9, "message": "Cheaper",
             "price": 300.0, "status": "pending"}
        ]
    });

    // When
    let order: Order = serde_json::from_value(payload).unwrap();

    // Then
    assert_that!(order.id, eq(OrderId(3)));
    assert_that!(order.priority, eq(Priority::Urgent));
    assert_that!(order.status, eq(OrderStatus::InProgress));
    assert_that!(order.creator_id, eq(Some(UserId(7))));
    assert_that!(order.tags, eq(&vec!["web".to_string(), "design".to_string()]));
    assert_that!(order.accepted_proposal().map(|p| p.id), eq(Some(ProposalId(1))));
    assert_that!(order.pending_proposals().count(), eq(1));
    assert_that!(order.proposals[1].description.as_str(), eq("Cheaper"));
}

#[test]
fn given_order_without_status_when_deserialized_then_open() {
    let order: Order = serde_json::from_value(json!({ "id": 1, "title": "Bare" })).unwrap();

    assert_that!(order.status, eq(OrderStatus::Open));
    assert!(order.proposals.is_empty());
}

// =========================================================================
// Lifecycle
// =========================================================================

#[test]
fn given_in_progress_when_completed_then_completed() {
    let result = OrderStatus::InProgress.apply(OrderAction::Complete);

    assert!(matches!(result, Ok(OrderStatus::Completed)));
}

#[test]
fn given_open_when_completed_then_refused() {
    // When
    let result = OrderStatus::Open.apply(OrderAction::Complete);

    // Then
    let e = result.unwrap_err();
    assert!(matches!(e, CoreError::InvalidTransition { .. }));
    assert_that!(
        e.user_message().as_str(),
        eq("Cannot complete an order that is open")
    );
}

#[test]
fn given_open_or_in_progress_when_cancelled_then_cancelled() {
    for status in [OrderStatus::Open, OrderStatus::InProgress] {
        assert!(matches!(status.apply(OrderAction::Cancel), Ok(OrderStatus::Cancelled)));
    }
}

#[test]
fn given_finished_order_when_cancelled_then_refused() {
    for status in [OrderStatus::Completed, OrderStatus::Cancelled] {
        assert_that!(status.apply(OrderAction::Cancel), err(anything()));
    }
}

#[test]
fn given_cancelled_when_restored_then_open_again() {
    let restored = OrderStatus::Cancelled.apply(OrderAction::Restore).unwrap();

    assert_that!(restored, eq(OrderStatus::Open));
    assert!(restored.accepts_proposals());
    assert_that!(OrderStatus::Open.apply(OrderAction::Restore), err(anything()));
}

#[test]
fn test_order_status_from_str() {
    assert!(matches!("IN_PROGRESS".parse::<OrderStatus>(), Ok(OrderStatus::InProgress)));
    assert_that!("archived".parse::<OrderStatus>(), err(anything()));
}

// =========================================================================
// Validation and wire shape
// =========================================================================

#[test]
fn given_valid_order_when_validated_then_ok() {
    assert_that!(new_order().validate(now()), ok(anything()));
}

#[test]
fn given_past_deadline_when_validated_then_rejected() {
    // Given
    let mut order = new_order();
    order.deadline = now() - Duration::hours(1);

    // When
    let result = order.validate(now());

    // Then
    assert!(matches!(
        result,
        Err(CoreError::Validation { field: Some(ref f), .. }) if f == "deadline"
    ));
}

#[test]
fn given_zero_budget_when_validated_then_rejected() {
    let mut order = new_order();
    order.budget = 0.0;

    assert_that!(order.validate(now()), err(anything()));
}

#[test]
fn given_blank_description_when_validated_then_rejected() {
    let mut order = new_order();
    order.description = "  ".to_string();

    assert_that!(order.validate(now()), err(anything()));
}

#[test]
fn given_new_order_when_serialized_then_priority_upper_and_tags_joined() {
    // Given
    let mut order = new_order();
    order.priority = Priority::High;
    order.tags = vec!["web".to_string(), "urgent".to_string()];

    // When
    let value = serde_json::to_value(&order).unwrap();

    // Then
    assert_that!(value["priority"], eq(&json!("HIGH")));
    assert_that!(value["tags"], eq(&json!("web,urgent")));
}

#[test]
fn given_new_order_without_tags_when_serialized_then_tags_null() {
    let value = serde_json::to_value(new_order()).unwrap();

    assert!(value["tags"].is_null());
}

#[test]
fn given_partial_update_when_serialized_then_only_set_fields_sent() {
    // Given
    let update = OrderUpdate {
        budget: Some(750.0),
        priority: Some(Priority::Low),
        ..OrderUpdate::default()
    };

    // When
    let value = serde_json::to_value(&update).unwrap();

    // Then
    assert_that!(value, eq(&json!({ "budget": 750.0, "priority": "LOW" })));
    assert!(!update.is_empty());
    assert!(OrderUpdate::default().is_empty());
}

#[test]
fn given_update_with_past_deadline_when_validated_then_rejected() {
    let update = OrderUpdate {
        deadline: Some(now() - Duration::days(1)),
        ..OrderUpdate::default()
    };

    assert_that!(update.validate(now()), err(anything()));
}
