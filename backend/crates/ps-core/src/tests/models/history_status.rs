use crate::HistoryStatus;

use std::str::FromStr;

#[test]
fn test_history_status_as_str() {
    assert_eq!(HistoryStatus::Processing.as_str(), "processing");
    assert_eq!(HistoryStatus::Completed.as_str(), "completed");
    assert_eq!(HistoryStatus::Failed.as_str(), "failed");
}

#[test]
fn test_history_status_from_str() {
    assert_eq!(
        HistoryStatus::from_str("processing").unwrap(),
        HistoryStatus::Processing
    );
    assert_eq!(
        HistoryStatus::from_str("completed").unwrap(),
        HistoryStatus::Completed
    );
    assert_eq!(
        HistoryStatus::from_str("failed").unwrap(),
        HistoryStatus::Failed
    );
    assert!(HistoryStatus::from_str("pending").is_err());
}

#[test]
fn test_history_status_default_is_not_terminal() {
    assert_eq!(HistoryStatus::default(), HistoryStatus::Processing);
    assert!(!HistoryStatus::Processing.is_terminal());
    assert!(HistoryStatus::Completed.is_terminal());
    assert!(HistoryStatus::Failed.is_terminal());
}
