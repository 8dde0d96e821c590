use crate::{
    providers::{ServerErrorDetail, Transcript, TranscriptError, TranscriptService},
    youtube::VideoId,
};
use log::{debug, error};
use reqwest::Client;
use serde_json::Value;

const TRANSCRIPT_PATH: &str = "/api/get_transcript";
const SNIPPET_LEN: usize = 200;

pub struct HttpTranscriptService {
    client: Client,
    endpoint: String,
}

impl HttpTranscriptService {
    pub fn new(client: Client, endpoint: &str) -> Self {
        debug!("Initializing transcript service for endpoint: {}", endpoint);
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    pub fn request_url(&self) -> String {
        format!("{}{}", self.endpoint, TRANSCRIPT_PATH)
    }
}

impl TranscriptService for HttpTranscriptService {
    async fn fetch(&self, video_id: &VideoId) -> Result<Transcript, TranscriptError> {
        let request_url = self.request_url();
        debug!("Requesting transcript for {} from {}", video_id, request_url);

        let response = self
            .client
            .get(&request_url)
            .query(&[("videoId", video_id.as_str())])
            .send()
            .await
            .map_err(|e| {
                error!("HTTP request failed: {}", e);
                TranscriptError::TransportError(e.to_string())
            })?;

        let status = response.status();
        debug!("Received response with status {}", status);

        match response.text().await {
            Ok(body) => decode(status.as_u16(), status.is_success(), &body),
            Err(e) if !status.is_success() => {
                error!("Failed to read error response body: {}", e);
                Err(server_error(status.as_u16(), None))
            }
            Err(e) => {
                error!("Failed to read response text: {}", e);
                Err(TranscriptError::TransportError(e.to_string()))
            }
        }
    }
}

/// Non-empty string under `error`, whatever else the body holds.
fn error_message(value: &Value) -> Option<String> {
    value
        .get("error")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

/// Builds the error for a non-2xx status. `body` is `None` when it could not be read.
fn server_error(status: u16, body: Option<&str>) -> TranscriptError {
    let detail = match body {
        None => ServerErrorDetail::Unreadable,
        Some(body) => {
            debug!("Server error response (raw): {}", body);

            match serde_json::from_str::<Value>(body) {
                Ok(value) => error_message(&value)
                    .map(ServerErrorDetail::Message)
                    .unwrap_or(ServerErrorDetail::UnexpectedJson),
                Err(_) => ServerErrorDetail::NonJson {
                    snippet: body.chars().take(SNIPPET_LEN).collect(),
                    truncated: body.chars().count() > SNIPPET_LEN,
                },
            }
        }
    };

    TranscriptError::ServerError { status, detail }
}

/// Maps a raw HTTP status and body onto the transcript outcome.
fn decode(status: u16, success: bool, body: &str) -> Result<Transcript, TranscriptError> {
    if !success {
        return Err(server_error(status, Some(body)));
    }

    let value = serde_json::from_str::<Value>(body).map_err(|e| {
        error!("Failed to deserialize response: {}", e);
        TranscriptError::MalformedResponse
    })?;

    // the error field is honoured before the transcript is looked at
    if let Some(message) = error_message(&value) {
        return Err(TranscriptError::ApplicationError(message));
    }

    match value.get("transcript").cloned().map(serde_json::from_value::<Vec<String>>) {
        Some(Ok(snippets)) => {
            debug!("Decoded transcript with {} snippets", snippets.len());
            Ok(Transcript::new(snippets))
        }
        Some(Err(e)) => {
            error!("Transcript is not a list of strings: {}", e);
            Err(TranscriptError::MalformedResponse)
        }
        None => {
            error!("Response has neither a transcript nor an error field");
            Err(TranscriptError::MalformedResponse)
        }
    }
}
