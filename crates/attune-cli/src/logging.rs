use anyhow::{anyhow, Result};
use attune_source::LoggingConfig;
use twyg::{LogLevel, OptsBuilder};

/// Install the logger.
///
/// `-v` flags raise the configured level one step each, `-q` drops it to
/// errors only.
pub fn init(config: &LoggingConfig, verbose: u8, quiet: bool) -> Result<()> {
    let level = effective_level(&config.level, verbose, quiet)?;

    let opts = OptsBuilder::new()
        .coloured(config.coloured)
        .level(level)
        .build()
        .map_err(|e| anyhow!("Invalid logging options: {e:?}"))?;

    twyg::setup(opts).map_err(|e| anyhow!("Could not set up logger: {e:?}"))?;
    Ok(())
}

const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

fn effective_level(configured: &str, verbose: u8, quiet: bool) -> Result<LogLevel> {
    let name = if quiet {
        "error"
    } else {
        let base = LEVELS
            .iter()
            .position(|l| l.eq_ignore_ascii_case(configured))
            .ok_or_else(|| {
                anyhow!(
                    "Unknown log level: {}\n\nValid levels: {}",
                    configured,
                    LEVELS.join(", ")
                )
            })?;
        LEVELS[(base + usize::from(verbose)).min(LEVELS.len() - 1)]
    };

    Ok(match name {
        "error" => LogLevel::Error,
        "warn" => LogLevel::Warn,
        "info" => LogLevel::Info,
        "debug" => LogLevel::Debug,
        _ => LogLevel::Trace,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(configured: &str, verbose: u8, quiet: bool) -> LogLevel {
        effective_level(configured, verbose, quiet).unwrap()
    }

    #[test]
    fn test_configured_level_is_used() {
        assert!(matches!(level("warn", 0, false), LogLevel::Warn));
        assert!(matches!(level("INFO", 0, false), LogLevel::Info));
    }

    #[test]
    fn test_verbose_raises_level() {
        assert!(matches!(level("warn", 1, false), LogLevel::Info));
        assert!(matches!(level("warn", 2, false), LogLevel::Debug));
        assert!(matches!(level("warn", 9, false), LogLevel::Trace));
    }

    #[test]
    fn test_quiet_wins() {
        assert!(matches!(level("trace", 3, true), LogLevel::Error));
    }

    #[test]
    fn test_unknown_level_is_rejected() {
        assert!(effective_level("loud", 0, false).is_err());
    }
}
