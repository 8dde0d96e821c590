pub mod http;

use crate::youtube::{Rejected, VideoId};
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

/// Ordered caption snippets for one video, as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    pub snippets: Vec<String>,
}

impl Transcript {
    pub fn new(snippets: Vec<String>) -> Self {
        Self { snippets }
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    /// Snippets separated by a blank line.
    pub fn text(&self) -> String {
        self.snippets.join("\n\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerErrorDetail {
    /// The `error` field of a JSON error body.
    Message(String),
    /// JSON body without an `error` field.
    UnexpectedJson,
    /// Body that is not JSON at all, cut to a short prefix.
    NonJson { snippet: String, truncated: bool },
    /// The body could not be read at all.
    Unreadable,
}

impl Display for ServerErrorDetail {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ServerErrorDetail::Message(message) => f.write_str(message),
            ServerErrorDetail::UnexpectedJson => {
                f.write_str("Unexpected JSON error structure from server.")
            }
            ServerErrorDetail::Unreadable => f.write_str("Could not retrieve error body."),
            ServerErrorDetail::NonJson { snippet, truncated } => write!(
                f,
                "Server returned non-JSON response: {}{}",
                snippet,
                if *truncated { "..." } else { "" }
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranscriptError {
    #[error("Please enter a YouTube Video URL or ID.")]
    EmptyInput,
    #[error("Invalid YouTube URL or ID format. Please use a valid YouTube video URL or just the 11-character video ID.")]
    InvalidIdFormat,
    #[error("{0}")]
    TransportError(String),
    #[error("HTTP error! Status: {status}. {detail}")]
    ServerError { status: u16, detail: ServerErrorDetail },
    #[error("{0}")]
    ApplicationError(String),
    #[error("Failed to fetch transcript due to unexpected server response.")]
    MalformedResponse,
}

impl From<Rejected> for TranscriptError {
    fn from(rejected: Rejected) -> Self {
        match rejected {
            Rejected::Empty => TranscriptError::EmptyInput,
            Rejected::Malformed => TranscriptError::InvalidIdFormat,
        }
    }
}

pub trait TranscriptService {
    async fn fetch(&self, video_id: &VideoId) -> Result<Transcript, TranscriptError>;
}
