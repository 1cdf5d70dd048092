//! log4rs initialisation for the binary.

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::Path;

/// Console config used when no log4rs file is available: warnings to stderr.
pub fn default_config() -> Result<Config, Box<dyn Error>> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{h({l})} {M} - {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn))?;
    Ok(config)
}

/// Initialise logging from `path`, falling back to [`default_config`].
pub fn init_logging(path: &Path) {
    match log4rs::init_file(path, Default::default()) {
        Ok(()) => log::debug!("Logging configured from {}", path.display()),
        Err(file_err) => match default_config() {
            Ok(config) => {
                if log4rs::init_config(config).is_ok() {
                    log::debug!("Using default logging, {}: {file_err}", path.display());
                }
            }
            Err(e) => eprintln!("Error building default log config: {e}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_builds() {
        assert!(default_config().is_ok());
    }
}
