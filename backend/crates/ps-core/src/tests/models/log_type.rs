use crate::LogType;

use std::str::FromStr;

#[test]
fn test_log_type_round_trips_through_str() {
    for log_type in [
        LogType::Log,
        LogType::Error,
        LogType::AiRequest,
        LogType::SessionMetadata,
    ] {
        assert_eq!(LogType::from_str(log_type.as_str()).unwrap(), log_type);
    }
    assert!(LogType::from_str("AI_REQUEST").is_err());
}
