pub mod cli;

use crate::providers::{Transcript, TranscriptError};
use crossterm::style::Stylize;
use strum::AsRefStr;

pub const LOADING_MESSAGE: &str = "Fetching transcript...";
pub const EMPTY_TRANSCRIPT: &str = "Transcript is empty.";
pub const UNEXPECTED_STRUCTURE: &str = "Unexpected response structure from server.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum StatusKind {
    Loading,
    Success,
    Error,
}

/// What one action leaves on screen: a status line and, optionally, the output pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub kind: StatusKind,
    pub status: String,
    pub body: Option<String>,
}

impl Screen {
    pub fn loading() -> Self {
        Self {
            kind: StatusKind::Loading,
            status: LOADING_MESSAGE.to_string(),
            body: None,
        }
    }

    pub fn fetched(transcript: &Transcript) -> Self {
        if transcript.is_empty() {
            Self {
                kind: StatusKind::Success,
                status: "Transcript fetched, but it is empty.".to_string(),
                body: Some(EMPTY_TRANSCRIPT.to_string()),
            }
        } else {
            Self {
                kind: StatusKind::Success,
                status: "Transcript fetched successfully!".to_string(),
                body: Some(transcript.text()),
            }
        }
    }

    pub fn failed(err: &TranscriptError) -> Self {
        let (status, body) = match err {
            TranscriptError::EmptyInput | TranscriptError::InvalidIdFormat => {
                (err.to_string(), None)
            }
            TranscriptError::MalformedResponse => {
                (err.to_string(), Some(UNEXPECTED_STRUCTURE.to_string()))
            }
            TranscriptError::TransportError(_)
            | TranscriptError::ServerError { .. }
            | TranscriptError::ApplicationError(_) => (format!("Error: {}", err), None),
        };

        Self {
            kind: StatusKind::Error,
            status,
            body,
        }
    }

    pub fn status_line(&self, color: bool) -> String {
        if !color {
            return self.status.clone();
        }

        match self.kind {
            StatusKind::Loading => self.status.as_str().yellow().to_string(),
            StatusKind::Success => self.status.as_str().green().to_string(),
            StatusKind::Error => self.status.as_str().red().bold().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ServerErrorDetail;

    #[test]
    fn empty_and_non_empty_transcripts_read_differently() {
        let empty = Screen::fetched(&Transcript::default());
        let full = Screen::fetched(&Transcript::new(vec!["a".into(), "b".into()]));

        assert_eq!(empty.kind, StatusKind::Success);
        assert_eq!(empty.body.as_deref(), Some(EMPTY_TRANSCRIPT));
        assert_eq!(full.status, "Transcript fetched successfully!");
        assert_eq!(full.body.as_deref(), Some("a\n\nb"));
        assert_ne!(empty.status, full.status);
    }

    #[test]
    fn application_error_is_prefixed_and_has_no_body() {
        let screen = Screen::failed(&TranscriptError::ApplicationError("x".into()));
        assert_eq!(screen.kind, StatusKind::Error);
        assert_eq!(screen.status, "Error: x");
        assert_eq!(screen.body, None);
    }

    #[test]
    fn server_error_status_line() {
        let screen = Screen::failed(&TranscriptError::ServerError {
            status: 500,
            detail: ServerErrorDetail::UnexpectedJson,
        });
        assert_eq!(
            screen.status,
            "Error: HTTP error! Status: 500. Unexpected JSON error structure from server."
        );
    }

    #[test]
    fn malformed_response_fills_the_output_pane() {
        let screen = Screen::failed(&TranscriptError::MalformedResponse);
        assert_eq!(
            screen.status,
            "Failed to fetch transcript due to unexpected server response."
        );
        assert_eq!(screen.body.as_deref(), Some(UNEXPECTED_STRUCTURE));
    }

    #[test]
    fn input_errors_are_not_prefixed() {
        let screen = Screen::failed(&TranscriptError::EmptyInput);
        assert_eq!(screen.status, "Please enter a YouTube Video URL or ID.");
    }

    #[test]
    fn plain_status_line_has_no_escape_codes() {
        let line = Screen::loading().status_line(false);
        assert_eq!(line, LOADING_MESSAGE);
        assert_eq!(StatusKind::Loading.as_ref(), "loading");
    }
}
