use serde::Serialize;

/// One row of the impact file. `event_timestamp` is already RFC 3339 in UTC.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactedRecord {
    pub appointment_id: String,
    pub request_id: i64,
    pub event_timestamp: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EventPayload {
    pub request_id: i64,
    pub event_timestamp: String,
}
