mod endpoint;

use crate::config::Config;
use crate::entities::{EventPayload, ImpactedRecord};
use crate::Error;
use endpoint::send_reschedule_event;
use reqwest::Client;
use simple_error::simple_error;
use std::future::Future;
use tracing::{event, Level};

#[derive(Debug)]
pub enum ProcessingError {
    SerializationFailure(String),
    RequestBuildFailure(String),
    TransportFailure(String),
    UnexpectedStatus(String),
    RecordReplayFailure(String),
}

/// Sends one event per record, in order, stopping at the first failure.
/// Returns how many records were sent.
async fn replay_impacted_records<F, FutF>(
    impacted_records: &[ImpactedRecord],
    fn_send_event: F,
) -> Result<usize, ProcessingError>
where
    F: Fn(EventPayload) -> FutF,
    FutF: Future<Output = Result<(), ProcessingError>>,
{
    for (i, impacted_record) in impacted_records.iter().enumerate() {
        let payload = EventPayload::from(impacted_record);
        if let Err(error) = fn_send_event(payload).await {
            return Err(ProcessingError::RecordReplayFailure(format!(
                "Error processing record {} (Appointment ID: {}): {:?}",
                i + 1,
                &impacted_record.appointment_id,
                error
            )));
        }
        event!(
            Level::INFO,
            "Successfully processed record {} (Appointment ID: {})",
            i + 1,
            &impacted_record.appointment_id
        );
    }
    Ok(impacted_records.len())
}

pub async fn generate_backfill_effects(
    impacted_records: &[ImpactedRecord],
    config: &Config,
    client: &Client,
) -> Result<usize, Error> {
    let endpoint_url = config.endpoint_url.as_str();
    let bearer_token = config.bearer_token.as_str();
    let fn_send_event = |payload: EventPayload| async move {
        send_reschedule_event(&payload, endpoint_url, bearer_token, client).await
    };
    let processed_count = replay_impacted_records(impacted_records, fn_send_event)
        .await
        .map_err(|e| Box::new(simple_error!(format!("{:?}", e))))?;
    Ok(processed_count)
}
