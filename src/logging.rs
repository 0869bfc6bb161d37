// src/logging.rs
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Log level requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

impl Verbosity {
    pub fn level(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::ERROR,
            Self::Normal => LevelFilter::INFO,
            Self::Verbose => LevelFilter::DEBUG,
        }
    }
}

/// Installs the stderr subscriber. `RUST_LOG` directives take precedence
/// over the default level; `log` records from the library crates are
/// forwarded to the same subscriber.
pub fn init(verbosity: Verbosity) {
    let filter = EnvFilter::builder().with_default_directive(verbosity.level().into()).from_env_lossy();
    // a second init (tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
