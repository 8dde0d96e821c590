use clap::Parser;
use log::LevelFilter;
use log::error;
use log::info;

mod cli;
mod providers;
mod utils;
mod youtube;
use cli::cli::run;
use lazy_static::lazy_static;
use reqwest::Client;
use utils::config::Config;

lazy_static! {
    static ref CLIENT: Client = Client::new();
}

#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about = "Fetch the transcript of a YouTube video", long_about = None)]
pub struct Args {
    /// A YouTube watch URL, a youtu.be link or a bare 11-character video ID (prompts when omitted)
    #[clap(value_parser)]
    pub input: Option<String>,

    /// Base URL of the transcript service (defaults to the endpoint in the config file)
    #[clap(short, long)]
    pub endpoint: Option<String>,

    /// Outputs JSON containing the video ID and transcript snippets
    #[clap(short, long)]
    pub json: bool,

    /// Disable colored status messages
    #[clap(long)]
    pub no_color: bool,

    /// Edit config file using $EDITOR
    #[clap(long)]
    pub edit: bool,

    /// Enable debug mode (prints request and response details)
    #[clap(long)]
    pub debug: bool,
}

/// JSON output keeps stdout free of informational log lines.
fn log_level(args: &Args) -> LevelFilter {
    if args.debug {
        LevelFilter::Debug
    } else if args.json {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    }
}

fn edit_config() -> anyhow::Result<()> {
    let editor = std::env::var("EDITOR")
        .map_err(|_| anyhow::anyhow!("EDITOR environment variable not set!"))?;

    let config_path = Config::config_path()?;
    // creates the file with defaults so the editor has something to open
    Config::load_from_file(&config_path)?;

    std::process::Command::new(editor)
        .arg(&config_path)
        .status()
        .map_err(|e| anyhow::anyhow!("Failed to open config file with editor: {}", e))?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = Args::parse();

    rich_logger::init(log_level(&args))?;

    if args.edit {
        if let Err(e) = edit_config() {
            error!("{}", e);
            std::process::exit(1);
        }

        info!("Done editing config file.");
        std::process::exit(0);
    }

    let config = Config::load_config()?;

    Config::program_configuration(&mut args, &config);

    // config.toml may have switched on `debug` or `json`
    log::set_max_level(log_level(&args));

    if !run(&args, &config).await? {
        std::process::exit(1);
    }

    Ok(())
}
