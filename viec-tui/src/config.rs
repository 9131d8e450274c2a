//! Command line and config file
//!
//! Precedence: command line, then `config.json`, then built-in defaults.
//! The config file is optional unless given explicitly with `--config`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use crate::keymap::{self, Keybindings};

pub const APP_NAME: &str = "viec";
pub const CONFIG_FILE: &str = "config.json";

/// Terminal todo list
#[derive(Parser, Debug, Default)]
#[command(name = "viec")]
#[command(about = "A terminal todo list with projects, tags and due dates")]
#[command(version)]
pub struct Args {
    /// Directory holding todos.json, projects.json and darkTheme.json
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file (default: <config dir>/viec/config.json)
    #[arg(long, short, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Start empty instead of seeding sample todos on first run
    #[arg(long)]
    pub no_samples: bool,

    /// Keep everything in memory; nothing is read or written
    #[arg(long)]
    pub ephemeral: bool,

    /// Append logs to this file (filter with VIEC_LOG)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no data directory available; pass --data-dir")]
    NoDataDir,
}

/// Contents of `config.json`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileConfig {
    pub data_dir: Option<PathBuf>,
    pub sample_data: Option<bool>,
    pub log_file: Option<PathBuf>,
    /// Overrides merged over the default bindings
    pub keybindings: Option<Keybindings>,
}

impl FileConfig {
    /// Read a config file. A missing file yields the defaults unless
    /// `required` is set.
    pub fn read(path: &Path, required: bool) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound && !required => {
                tracing::debug!(path = %path.display(), "No config file");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Effective settings
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub sample_data: bool,
    pub ephemeral: bool,
    pub log_file: Option<PathBuf>,
    pub keybindings: Keybindings,
}

impl Config {
    /// Resolve from the command line and the config file it points at
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let file = match &args.config {
            Some(path) => FileConfig::read(path, true)?,
            None => match default_config_path() {
                Some(path) => FileConfig::read(&path, false)?,
                None => FileConfig::default(),
            },
        };
        Self::resolve(args, file, default_data_dir())
    }

    pub fn resolve(
        args: &Args,
        file: FileConfig,
        fallback_data_dir: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let data_dir = args.data_dir.clone().or(file.data_dir).or(fallback_data_dir);
        let data_dir = match data_dir {
            Some(dir) => dir,
            // Nothing touches the disk in ephemeral mode
            None if args.ephemeral => PathBuf::new(),
            None => return Err(ConfigError::NoDataDir),
        };

        let keybindings = match file.keybindings {
            Some(user) => {
                for name in keymap::unknown_commands(&user) {
                    tracing::warn!(command = %name, "Ignoring binding for unknown command");
                }
                Keybindings::merge(keymap::defaults(), user)
            }
            None => keymap::defaults(),
        };

        Ok(Self {
            data_dir,
            sample_data: !args.no_samples && file.sample_data.unwrap_or(true),
            ephemeral: args.ephemeral,
            log_file: args.log_file.clone().or(file.log_file),
            keybindings,
        })
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
}

pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(APP_NAME))
}
