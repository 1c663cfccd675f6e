
use crate::entities::{EventPayload, ImpactedRecord};

pub fn create_payload(impacted_record: &ImpactedRecord) -> EventPayload {
    EventPayload {
        request_id: impacted_record.request_id,
        event_timestamp: String::from(&impacted_record.event_timestamp),
    }
}

impl From<&ImpactedRecord> for EventPayload {
    fn from(impacted_record: &ImpactedRecord) -> Self {
        create_payload(impacted_record)
    }
}
