use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "logscrub")]
#[command(about = "Redact server addresses, access tokens, and client IPs from a log file", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Input log file to clean
    pub input: Option<PathBuf>,

    /// Config file holding the persisted server address
    #[arg(long, default_value = logscrub_config::DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Where to write the cleaned log
    #[arg(long, default_value = "cleaned.log")]
    pub output: PathBuf,
}
