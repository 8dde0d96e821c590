use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use serde::Serialize;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

lazy_static! {
    /// Tried in order, the first capture wins.
    static ref URL_PATTERNS: [Regex; 2] = [
        Regex::new(r"(?:https?://)?(?:www\.)?youtube\.com/watch\?v=([^&]+)").unwrap(),
        Regex::new(r"(?:https?://)?(?:www\.)?youtu\.be/([^?]+)").unwrap(),
    ];
    static ref VIDEO_ID: Regex = Regex::new(r"^[a-zA-Z0-9_-]{11}$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejected {
    #[error("no URL or video ID was provided")]
    Empty,
    #[error("input does not contain an 11-character video ID")]
    Malformed,
}

/// An 11 character YouTube video identifier. Only structurally validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for VideoId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for VideoId {
    type Err = Rejected;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve(s)
    }
}

/// Extracts the video ID from a watch URL, a youtu.be short URL or a bare ID.
pub fn resolve(raw: &str) -> Result<VideoId, Rejected> {
    let input = raw.trim();
    if input.is_empty() {
        return Err(Rejected::Empty);
    }

    let candidate = URL_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(input).and_then(|c| c.get(1)))
        .map(|m| m.as_str())
        .unwrap_or(input);

    debug!("Resolved candidate video ID: {}", candidate);

    if VIDEO_ID.is_match(candidate) {
        Ok(VideoId(candidate.to_string()))
    } else {
        Err(Rejected::Malformed)
    }
}
