use crate::{
    CoreError, NewProposal, OrderId, Proposal, ProposalId, ProposalStatus, UserId, accept_among,
};

use googletest::assert_that;
use googletest::prelude::{anything, eq, err, ok};
use serde_json::json;

fn proposal(id: i64, order: i64, status: ProposalStatus) -> Proposal {
    Proposal {
        id: ProposalId(id),
        order_id: OrderId(order),
        executor_id: Some(UserId(100 + id)),
        description: format!("Bid {id}"),
        price: 100.0,
        estimated_duration: None,
        status,
        created_at: None,
    }
}

#[test]
fn given_valid_input_when_built_then_description_trimmed() {
    let result = NewProposal::new(OrderId(3), "  I can do it  ", 250.0, Some(5));

    assert_that!(result, ok(anything()));
    let proposal = result.unwrap();
    assert_that!(proposal.description.as_str(), eq("I can do it"));
    assert_that!(
        serde_json::to_value(&proposal).unwrap(),
        eq(&json!({
            "order_id": 3,
            "description": "I can do it",
            "price": 250.0,
            "estimated_duration": 5
        }))
    );
}

#[test]
fn given_non_positive_price_when_built_then_rejected() {
    let result = NewProposal::new(OrderId(3), "Bid", 0.0, None);

    assert!(matches!(
        result,
        Err(CoreError::Validation { field: Some(ref f), .. }) if f == "price"
    ));
}

#[test]
fn given_zero_duration_or_blank_text_when_built_then_rejected() {
    assert_that!(NewProposal::new(OrderId(3), "Bid", 10.0, Some(0)), err(anything()));
    assert_that!(NewProposal::new(OrderId(3), "   ", 10.0, None), err(anything()));
}

#[test]
fn given_pending_bids_when_one_accepted_then_others_on_order_rejected() {
    // Given
    let mut proposals = vec![
        proposal(1, 3, ProposalStatus::Pending),
        proposal(2, 3, ProposalStatus::Pending),
        proposal(3, 3, ProposalStatus::Withdrawn),
        proposal(4, 9, ProposalStatus::Pending),
    ];

    // When
    accept_among(&mut proposals, ProposalId(2));

    // Then
    let statuses: Vec<ProposalStatus> = proposals.iter().map(|p| p.status).collect();
    assert_that!(
        statuses,
        eq(&vec![
            ProposalStatus::Rejected,
            ProposalStatus::Accepted,
            ProposalStatus::Withdrawn,
            ProposalStatus::Pending,
        ])
    );
}

#[test]
fn given_unknown_id_when_accepted_then_nothing_changes() {
    let mut proposals = vec![proposal(1, 3, ProposalStatus::Pending)];

    accept_among(&mut proposals, ProposalId(42));

    assert_that!(proposals[0].status, eq(ProposalStatus::Pending));
}
