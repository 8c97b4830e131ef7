//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/calwatch/config.toml` by default. Every section is optional
//! and command-line flags override what the file says.

use std::path::{Path, PathBuf};
use std::time::Duration;

use calwatch_face::{EngineConfig, Language};
use calwatch_providers::{DEMO_TIMEZONE, DemoSource, EventSource, JsonFileSource, StaticSource};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::error::{ClientError, ClientResult};

/// Configuration for the calwatch client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchFaceConfig {
    /// Debug mode.
    pub debug: bool,

    /// Face geometry and text.
    pub face: FaceSettings,

    /// Wearer clock.
    pub clock: ClockSettings,

    /// Where events come from.
    pub source: SourceSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceSettings {
    pub width: u32,
    pub height: u32,
    pub language: Language,
    /// Assume a low-bit ambient screen.
    pub low_bit_ambient: bool,
}

impl Default for FaceSettings {
    fn default() -> Self {
        Self {
            width: 320,
            height: 320,
            language: Language::En,
            low_bit_ambient: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockSettings {
    /// IANA time zone name.
    pub timezone: String,

    /// Interactive redraw period in milliseconds.
    pub interactive_update_ms: u64,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            interactive_update_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// JSON file of event rows.
    pub events_file: Option<PathBuf>,

    /// Use the built-in demo calendar and clock.
    pub demo: bool,
}

impl WatchFaceConfig {
    /// Loads configuration from the default path, or defaults if it does not
    /// exist.
    pub fn load() -> ClientResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ClientError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ClientError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the file named by `--config` (or the default path), applies
    /// the command-line overrides and validates the result.
    pub fn resolve(cli: &Cli) -> ClientResult<Self> {
        let mut config = match cli.config {
            Some(ref path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("calwatch")
            .join("config.toml")
    }

    /// Applies command-line overrides.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if cli.debug {
            self.debug = true;
        }
        if let Some(ref path) = cli.events {
            self.source.events_file = Some(path.clone());
            self.source.demo = false;
        }
        if cli.demo {
            self.source.demo = true;
        }
        if let Some(ref tz) = cli.timezone {
            self.clock.timezone = tz.clone();
        }
        if let Some(language) = cli.language {
            self.face.language = language.into();
        }
    }

    /// The wearer's time zone. Demo mode always uses the demo calendar's.
    pub fn timezone(&self) -> ClientResult<Tz> {
        if self.source.demo {
            return Ok(DEMO_TIMEZONE);
        }
        self.clock
            .timezone
            .parse::<Tz>()
            .map_err(|_| ClientError::UnknownTimezone(self.clock.timezone.clone()))
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            width: self.face.width,
            height: self.face.height,
            language: self.face.language,
            low_bit_ambient: self.face.low_bit_ambient,
            interactive_update: Duration::from_millis(self.clock.interactive_update_ms),
        }
    }

    /// Builds the configured event source. Without a file or demo mode the
    /// face has no events.
    pub fn event_source(&self) -> Box<dyn EventSource> {
        if self.source.demo {
            Box::new(DemoSource)
        } else if let Some(ref path) = self.source.events_file {
            Box::new(JsonFileSource::new(path))
        } else {
            Box::new(StaticSource::empty())
        }
    }

    /// Checks values that deserialize fine but cannot drive a face.
    pub fn validate(&self) -> ClientResult<()> {
        if self.face.width == 0 || self.face.height == 0 {
            return Err(ClientError::Config(format!(
                "face size must be non-zero, got {}x{}",
                self.face.width, self.face.height
            )));
        }
        if self.clock.interactive_update_ms == 0 {
            return Err(ClientError::Config(
                "clock.interactive_update_ms must be positive".to_string(),
            ));
        }
        self.timezone()?;
        if !self.source.demo {
            if let Some(ref path) = self.source.events_file {
                if !path.is_file() {
                    return Err(ClientError::Config(format!(
                        "events file {} does not exist",
                        path.display()
                    )));
                }
            }
        }
        Ok(())
    }
}
