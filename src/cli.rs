use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

// Build version with target info
const VERSION_INFO: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"), "\n",
    "UI:     eframe/egui 0.33\n",
    "Target: ", std::env::consts::ARCH, "-", std::env::consts::OS
);

/// Animated striped progress bar
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
pub struct Args {
    /// Tick period in milliseconds (default: 30)
    #[arg(long = "period", value_name = "MS")]
    pub period_ms: Option<u64>,

    /// Progress increment per tick (default: 0.005)
    #[arg(long = "step", value_name = "FRACTION")]
    pub step: Option<f64>,

    /// Enable debug logging to file (default: stripebar.log)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE")]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Custom configuration directory (overrides default platform paths)
    #[arg(short = 'c', long = "config-dir", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}

impl Args {
    /// Tick period override as a Duration, if given on the command line.
    pub fn period(&self) -> Option<Duration> {
        self.period_ms.map(Duration::from_millis)
    }
}
