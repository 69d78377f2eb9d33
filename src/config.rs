//! Configuration loading for faro.
//!
//! Settings come from `<config_dir>/faro/faro.toml`, deserialized into
//! [RawConfig] and converted into the processed [Config]. A missing or
//! malformed file falls back to the defaults; the core itself never reads
//! files, it receives a plain [ViewOptions] value.

use std::path::PathBuf;
use std::time::Duration;
use std::{fs, io};

use serde::Deserialize;

use crate::app::browser::BrowserMode;

/// Raw configuration as read from the toml file.
#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct RawConfig {
    ignore_case: bool,
    show_hidden: bool,
    mode: String,
    refresh_secs: u64,
    editor: String,
}

impl Default for RawConfig {
    fn default() -> Self {
        RawConfig {
            ignore_case: false,
            show_hidden: false,
            mode: "table".to_string(),
            refresh_secs: 5,
            editor: String::new(),
        }
    }
}

/// Processed configuration used by the application.
#[derive(Debug, Clone)]
pub struct Config {
    ignore_case: bool,
    show_hidden: bool,
    mode: BrowserMode,
    refresh_interval: Duration,
    editor: String,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        let mode = match raw.mode.to_lowercase().as_str() {
            "tree" => BrowserMode::Tree,
            "table" => BrowserMode::Table,
            other => {
                eprintln!("Unknown mode '{}' in faro.toml, using table.", other);
                BrowserMode::Table
            }
        };

        // A zero interval would spin the scanner; clamp to one second.
        let refresh_secs = raw.refresh_secs.max(1);

        Self {
            ignore_case: raw.ignore_case,
            show_hidden: raw.show_hidden,
            mode,
            refresh_interval: Duration::from_secs(refresh_secs),
            editor: raw.editor,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        RawConfig::default().into()
    }
}

impl Config {
    /// Loads the configuration from the default path, falling back to the
    /// defaults when the file is missing or does not parse.
    pub fn load() -> Self {
        let path = Self::default_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<RawConfig>(&content) {
                Ok(raw) => raw.into(),
                Err(e) => {
                    eprintln!("Error parsing {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("faro")
            .join("faro.toml")
    }

    /// Writes a commented default config, refusing to clobber an existing
    /// one.
    pub fn generate_default(path: &PathBuf) -> io::Result<()> {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists", path.display()),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_CONFIG_TOML)?;
        println!("Wrote {}", path.display());
        Ok(())
    }

    /// The startup parameters handed to the view-state core.
    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            ignore_case: self.ignore_case,
            show_hidden: self.show_hidden,
            mode: self.mode,
            refresh_interval: self.refresh_interval,
            editor: self.editor.clone(),
        }
    }

    #[inline]
    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }
}

/// The startup parameters of the view-state core plus the editor command;
/// the core accepts these once at startup and never parses files itself.
#[derive(Debug, Clone)]
pub struct ViewOptions {
    pub ignore_case: bool,
    pub show_hidden: bool,
    pub mode: BrowserMode,
    pub refresh_interval: Duration,
    pub editor: String,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Config::default().view_options()
    }
}

const DEFAULT_CONFIG_TOML: &str = r#"# faro configuration

# Case-fold the search filter.
ignore_case = false

# Show entries the platform marks hidden.
show_hidden = false

# Presentation mode: "table" or "tree".
mode = "table"

# Background refresh interval in seconds.
refresh_secs = 5

# Editor command; empty falls back to $EDITOR.
editor = ""
"#;
