use super::ProcessingError;
use crate::entities::EventPayload;
use http::{header, StatusCode};
use reqwest::{self, Client};
use tracing::{event, Level};

pub async fn send_reschedule_event(
    payload: &EventPayload,
    endpoint_url: &str,
    bearer_token: &str,
    client: &Client,
) -> Result<(), ProcessingError> {
    let http_request = build_reschedule_request(payload, endpoint_url, bearer_token)?;
    event!(Level::INFO, "Sending request body: {}", http_request.body());
    let status = _execute_request(http_request, client).await?;
    _check_status(status)
}

pub fn build_reschedule_request(
    payload: &EventPayload,
    endpoint_url: &str,
    bearer_token: &str,
) -> Result<http::Request<String>, ProcessingError> {
    let body = serde_json::to_string(payload).map_err(|e| {
        ProcessingError::SerializationFailure(format!("Error marshaling JSON:\n{:?}", e))
    })?;
    http::Request::builder()
        .uri::<&str>(endpoint_url)
        .method::<&str>("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", bearer_token))
        .body(body)
        .map_err(|e| {
            ProcessingError::RequestBuildFailure(format!("Error creating request:\n{:?}", e))
        })
}

async fn _execute_request(
    http_request: http::Request<String>,
    client: &Client,
) -> Result<StatusCode, ProcessingError> {
    let request = reqwest::Request::try_from(http_request).map_err(|e| {
        ProcessingError::RequestBuildFailure(format!("Failed to construct http request:\n{:?}", e))
    })?;
    let response = client.execute(request).await.map_err(|e| {
        ProcessingError::TransportFailure(format!("Error sending request:\n{:?}", e))
    })?;
    Ok(response.status())
}

fn _check_status(status: StatusCode) -> Result<(), ProcessingError> {
    if status == StatusCode::OK {
        Ok(())
    } else {
        Err(ProcessingError::UnexpectedStatus(format!(
            "Request failed with status: {}",
            status.as_u16()
        )))
    }
}
