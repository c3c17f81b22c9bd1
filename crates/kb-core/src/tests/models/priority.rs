use crate::Priority;

use std::str::FromStr;

use serde_json::json;

#[test]
fn test_priority_as_str() {
    assert_eq!(Priority::Low.as_str(), "low");
    assert_eq!(Priority::Medium.as_str(), "medium");
    assert_eq!(Priority::High.as_str(), "high");
    assert_eq!(Priority::Urgent.as_str(), "urgent");
}

#[test]
fn test_priority_from_str_is_case_insensitive() {
    assert_eq!(Priority::from_str("HIGH").unwrap(), Priority::High);
    assert_eq!(Priority::from_str(" low ").unwrap(), Priority::Low);
    assert!(Priority::from_str("critical").is_err());
}

#[test]
fn test_priority_default() {
    assert_eq!(Priority::default(), Priority::Medium);
}

#[test]
fn test_priority_level_round_trip() {
    for priority in [Priority::Low, Priority::Medium, Priority::High, Priority::Urgent] {
        assert_eq!(Priority::from_level(priority.level()), Some(priority));
    }
    assert_eq!(Priority::from_level(0), None);
    assert_eq!(Priority::from_level(5), None);
}

#[test]
fn test_priority_deserializes_name_level_and_null() {
    assert_eq!(
        serde_json::from_value::<Priority>(json!("high")).unwrap(),
        Priority::High
    );
    assert_eq!(
        serde_json::from_value::<Priority>(json!(1)).unwrap(),
        Priority::Low
    );
    assert_eq!(
        serde_json::from_value::<Priority>(json!(null)).unwrap(),
        Priority::Medium
    );
    assert!(serde_json::from_value::<Priority>(json!(9)).is_err());
    assert!(serde_json::from_value::<Priority>(json!("whenever")).is_err());
}

#[test]
fn test_priority_serializes_as_name() {
    assert_eq!(serde_json::to_value(Priority::Urgent).unwrap(), json!("urgent"));
}
