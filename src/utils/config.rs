use crate::Args;
use anyhow::Context;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Base URL of the transcript backend, without the `/api/...` path.
    pub endpoint: String,
    pub color: bool,
    pub json: bool,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        debug!("Creating a new default configuration.");
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            color: true,
            json: false,
            debug: false,
        }
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to retrieve the config directory")?;
        Ok(config_dir.join("yt-transcript").join("config.toml"))
    }

    pub fn load_config() -> anyhow::Result<Self> {
        debug!("Loading configuration...");
        let config_path = Self::config_path()?;
        debug!("Looking for config file at path: {}", config_path.display());

        let config = Config::load_from_file(&config_path)?;
        debug!("Configuration loaded successfully.");
        Ok(config)
    }

    /// Reads the config at `file_path`, writing the defaults there first when it is missing.
    pub fn load_from_file(file_path: &Path) -> anyhow::Result<Self> {
        if !file_path.exists() {
            warn!(
                "No config at {}, writing defaults (endpoint {}).",
                file_path.display(),
                DEFAULT_ENDPOINT
            );
            let defaults = Config::new();
            defaults.write_to(file_path)?;
            return Ok(defaults);
        }

        let content = fs::read_to_string(file_path)
            .with_context(|| format!("Could not read {}", file_path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid transcript config in {}", file_path.display()))?;
        debug!("Using transcript endpoint {} from config.", config.endpoint);
        Ok(config)
    }

    fn write_to(&self, file_path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string(self).context("Could not serialize the config")?;

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Could not create {}", parent.display()))?;
        }

        File::create(file_path)
            .and_then(|mut file| file.write_all(content.as_bytes()))
            .with_context(|| format!("Could not write {}", file_path.display()))
    }

    /// Fills unset flags from the config file. Flags given on the command line win.
    pub fn program_configuration<'a>(args: &'a mut Args, config: &Self) -> &'a mut Args {
        debug!("Applying configuration to program arguments.");

        args.endpoint = Some(match args.endpoint.take() {
            Some(endpoint) => {
                debug!("Using provided endpoint: {}", endpoint);
                endpoint
            }
            None => {
                debug!("Using default endpoint: {}", config.endpoint);
                config.endpoint.clone()
            }
        });

        if !args.no_color && !config.color {
            debug!("Disabling colored output from config.");
            args.no_color = true;
        }

        args.json = if !args.json {
            debug!("Setting `json` to {}", config.json);
            config.json
        } else {
            args.json
        };

        args.debug = if !args.debug {
            debug!("Setting `debug` to {}", config.debug);
            config.debug
        } else {
            args.debug
        };

        args
    }
}
