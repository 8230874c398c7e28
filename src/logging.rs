// 📝 Logging - tracing subscriber setup
//
// RUST_LOG overrides the verbosity passed in. Diagnostics go to stderr so
// CLI output (search results, CSV on stdout) stays clean.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Trace,
}

impl Verbosity {
    pub fn to_level(&self) -> Level {
        match self {
            Verbosity::Quiet => Level::ERROR,
            Verbosity::Normal => Level::INFO,
            Verbosity::Verbose => Level::DEBUG,
            Verbosity::Trace => Level::TRACE,
        }
    }

    /// -q / -v / -vv style flags
    pub fn from_flag(flag: &str) -> Option<Verbosity> {
        match flag {
            "-q" | "--quiet" => Some(Verbosity::Quiet),
            "-v" | "--verbose" => Some(Verbosity::Verbose),
            "-vv" | "--trace" => Some(Verbosity::Trace),
            _ => None,
        }
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init_logging(verbosity: Verbosity) {
    let default_filter = format!(
        "medreg_catalog={level},medreg={level},medreg_server={level}",
        level = verbosity.to_level()
    );
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_line_number(false),
    );

    // Already initialised (e.g. by another test) is fine
    let _ = subscriber.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(Verbosity::Quiet.to_level(), Level::ERROR);
        assert_eq!(Verbosity::default().to_level(), Level::INFO);
        assert_eq!(Verbosity::Trace.to_level(), Level::TRACE);
    }

    #[test]
    fn test_from_flag() {
        assert_eq!(Verbosity::from_flag("-v"), Some(Verbosity::Verbose));
        assert_eq!(Verbosity::from_flag("--quiet"), Some(Verbosity::Quiet));
        assert_eq!(Verbosity::from_flag("search"), None);
    }

    #[test]
    fn test_init_logging_twice_does_not_panic() {
        init_logging(Verbosity::Normal);
        init_logging(Verbosity::Verbose);
    }
}
