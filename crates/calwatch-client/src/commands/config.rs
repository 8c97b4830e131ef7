//! Configuration commands.

use std::io::Write;

use crate::config::WatchFaceConfig;
use crate::error::ClientResult;

/// Dump the current configuration, overrides applied, as TOML.
pub fn dump(config: &WatchFaceConfig, out: &mut impl Write) -> ClientResult<()> {
    let toml_str = toml::to_string_pretty(config)?;
    writeln!(out, "# config.toml ({})", WatchFaceConfig::default_path().display())?;
    writeln!(out, "{toml_str}")?;
    Ok(())
}

/// Validate the configuration.
pub fn validate(config: &WatchFaceConfig, out: &mut impl Write) -> ClientResult<()> {
    config.validate()?;
    writeln!(out, "Configuration is valid.")?;
    Ok(())
}

/// Show the configuration file path.
pub fn path(out: &mut impl Write) -> ClientResult<()> {
    writeln!(out, "config: {}", WatchFaceConfig::default_path().display())?;
    Ok(())
}
