use crate::{
    cli::Screen,
    providers::{http::HttpTranscriptService, Transcript, TranscriptError, TranscriptService},
    utils::config::Config,
    youtube::{self, VideoId},
    Args, CLIENT,
};
use anyhow::Context;
use log::{debug, warn};
use serde_json::json;
use std::io::{self, BufRead, Write};

const PROMPT: &str = "YouTube URL or ID: ";

#[derive(Debug, Clone, Copy, Default)]
pub struct ViewOptions {
    pub color: bool,
    pub json: bool,
}

#[derive(Debug)]
pub enum Outcome {
    Fetched(VideoId, Transcript),
    Failed(TranscriptError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Fetched(..))
    }
}

/// Terminal front-end over a [`TranscriptService`]. Reads requests from `input`
/// and renders every status change to `output`.
pub struct TranscriptView<S, R, W> {
    service: S,
    input: R,
    output: W,
    options: ViewOptions,
}

impl<S, R, W> TranscriptView<S, R, W>
where
    S: TranscriptService,
    R: BufRead,
    W: Write,
{
    pub fn new(service: S, input: R, output: W, options: ViewOptions) -> Self {
        Self {
            service,
            input,
            output,
            options,
        }
    }

    /// Handles one user action from raw input to the final screen.
    pub async fn submit(&mut self, raw: &str) -> io::Result<Outcome> {
        let outcome = match youtube::resolve(raw) {
            Ok(video_id) => {
                if !self.options.json {
                    self.draw(&Screen::loading())?;
                }

                match self.service.fetch(&video_id).await {
                    Ok(transcript) => Outcome::Fetched(video_id, transcript),
                    Err(e) => Outcome::Failed(e),
                }
            }
            Err(rejected) => {
                debug!("Input rejected: {}", rejected);
                Outcome::Failed(rejected.into())
            }
        };

        match &outcome {
            Outcome::Fetched(video_id, transcript) => {
                debug!("Fetched {} snippets for {}", transcript.len(), video_id);
            }
            Outcome::Failed(e) => debug!("Transcript request failed: {}", e),
        }

        self.render(&outcome)?;
        Ok(outcome)
    }

    /// Prompts for input until EOF.
    pub async fn interactive(&mut self) -> io::Result<()> {
        loop {
            write!(self.output, "{}", PROMPT)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                debug!("Reached end of input.");
                return Ok(());
            }

            self.submit(&line).await?;
        }
    }

    fn render(&mut self, outcome: &Outcome) -> io::Result<()> {
        if self.options.json {
            let value = match outcome {
                Outcome::Fetched(video_id, transcript) => json!({
                    "video_id": video_id,
                    "transcript": transcript.snippets,
                }),
                Outcome::Failed(e) => json!({ "error": e.to_string() }),
            };
            writeln!(self.output, "{}", value)?;
            return self.output.flush();
        }

        let screen = match outcome {
            Outcome::Fetched(_, transcript) => Screen::fetched(transcript),
            Outcome::Failed(e) => Screen::failed(e),
        };
        self.draw(&screen)
    }

    fn draw(&mut self, screen: &Screen) -> io::Result<()> {
        debug!("Status [{}]: {}", screen.kind.as_ref(), screen.status);
        writeln!(self.output, "{}", screen.status_line(self.options.color))?;
        if let Some(body) = &screen.body {
            writeln!(self.output)?;
            writeln!(self.output, "{}", body)?;
        }
        self.output.flush()
    }
}

/// Returns whether every requested transcript was fetched.
pub async fn run(settings: &Args, config: &Config) -> anyhow::Result<bool> {
    let endpoint = settings.endpoint.as_deref().unwrap_or(&config.endpoint);
    let service = HttpTranscriptService::new(CLIENT.clone(), endpoint);

    let options = ViewOptions {
        color: !settings.no_color,
        json: settings.json,
    };

    let stdin = io::stdin();
    let mut view = TranscriptView::new(service, stdin.lock(), io::stdout(), options);

    match &settings.input {
        Some(input) => {
            let outcome = view
                .submit(input)
                .await
                .context("Failed to write to stdout")?;
            Ok(outcome.is_success())
        }
        None => {
            if let Err(e) = ctrlc::set_handler(|| {
                println!();
                std::process::exit(0);
            }) {
                warn!("Failed to install Ctrl-C handler: {}", e);
            }

            view.interactive()
                .await
                .context("Failed to read from stdin")?;
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ServerErrorDetail;
    use std::cell::Cell;
    use std::io::Cursor;

    struct FakeService {
        response: Result<Transcript, TranscriptError>,
        calls: Cell<usize>,
    }

    impl FakeService {
        fn new(response: Result<Transcript, TranscriptError>) -> Self {
            Self {
                response,
                calls: Cell::new(0),
            }
        }
    }

    impl TranscriptService for FakeService {
        async fn fetch(&self, video_id: &VideoId) -> Result<Transcript, TranscriptError> {
            assert_eq!(video_id.as_str(), "dQw4w9WgXcQ");
            self.calls.set(self.calls.get() + 1);
            self.response.clone()
        }
    }

    fn view(
        response: Result<Transcript, TranscriptError>,
        input: &str,
        json: bool,
    ) -> TranscriptView<FakeService, Cursor<Vec<u8>>, Vec<u8>> {
        TranscriptView::new(
            FakeService::new(response),
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
            ViewOptions { color: false, json },
        )
    }

    fn printed<S, R>(view: &TranscriptView<S, R, Vec<u8>>) -> String {
        String::from_utf8(view.output.clone()).unwrap()
    }

    #[tokio::test]
    async fn renders_loading_then_transcript() {
        let mut view = view(Ok(Transcript::new(vec!["a".into(), "b".into()])), "", false);

        let outcome = view.submit("https://youtu.be/dQw4w9WgXcQ?t=30").await.unwrap();

        assert!(outcome.is_success());
        assert_eq!(
            printed(&view),
            "Fetching transcript...\nTranscript fetched successfully!\n\na\n\nb\n"
        );
    }

    #[tokio::test]
    async fn empty_transcript_has_its_own_message() {
        let mut view = view(Ok(Transcript::default()), "", false);

        view.submit("dQw4w9WgXcQ").await.unwrap();

        assert!(printed(&view).ends_with(
            "Transcript fetched, but it is empty.\n\nTranscript is empty.\n"
        ));
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_the_service() {
        let mut view = view(Ok(Transcript::default()), "", false);

        let outcome = view.submit("not a valid id!!").await.unwrap();

        assert!(matches!(
            outcome,
            Outcome::Failed(TranscriptError::InvalidIdFormat)
        ));
        assert_eq!(view.service.calls.get(), 0);
        assert!(!printed(&view).contains("Fetching"));
    }

    #[tokio::test]
    async fn blank_input_asks_for_a_value() {
        let mut view = view(Ok(Transcript::default()), "", false);

        let outcome = view.submit("   ").await.unwrap();

        assert!(matches!(outcome, Outcome::Failed(TranscriptError::EmptyInput)));
        assert_eq!(printed(&view), "Please enter a YouTube Video URL or ID.\n");
    }

    #[tokio::test]
    async fn server_errors_show_no_transcript() {
        let mut view = view(
            Err(TranscriptError::ServerError {
                status: 404,
                detail: ServerErrorDetail::Message("Video unavailable".into()),
            }),
            "",
            false,
        );

        view.submit("dQw4w9WgXcQ").await.unwrap();

        assert_eq!(
            printed(&view),
            "Fetching transcript...\nError: HTTP error! Status: 404. Video unavailable\n"
        );
    }

    #[tokio::test]
    async fn json_mode_prints_one_document() {
        let mut view = view(Ok(Transcript::new(vec!["hello".into()])), "", true);

        view.submit("dQw4w9WgXcQ").await.unwrap();

        let value: serde_json::Value = serde_json::from_str(printed(&view).trim()).unwrap();
        assert_eq!(
            value,
            json!({ "video_id": "dQw4w9WgXcQ", "transcript": ["hello"] })
        );
    }

    #[tokio::test]
    async fn json_mode_reports_errors() {
        let mut view = view(Err(TranscriptError::ApplicationError("x".into())), "", true);

        view.submit("dQw4w9WgXcQ").await.unwrap();

        let value: serde_json::Value = serde_json::from_str(printed(&view).trim()).unwrap();
        assert_eq!(value, json!({ "error": "x" }));
    }

    #[tokio::test]
    async fn interactive_mode_handles_each_line_until_eof() {
        let mut view = view(
            Ok(Transcript::new(vec!["a".into()])),
            "dQw4w9WgXcQ\n\nhttps://www.youtube.com/watch?v=dQw4w9WgXcQ&list=xyz\n",
            false,
        );

        view.interactive().await.unwrap();

        let output = printed(&view);
        assert_eq!(view.service.calls.get(), 2);
        assert_eq!(output.matches(PROMPT).count(), 4);
        assert_eq!(output.matches("Transcript fetched successfully!").count(), 2);
        assert!(output.contains("Please enter a YouTube Video URL or ID."));
    }
}
