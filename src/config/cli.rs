use crate::config::AutotaskConfig;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "autotask-companies")]
#[command(about = "List Autotask companies as CompanyID/CompanyName JSON")]
pub struct CliConfig {
    #[arg(long, help = "Override AT_BASE")]
    pub base_url: Option<String>,

    #[arg(long, help = "Override the per-request timeout in seconds")]
    pub timeout_secs: Option<u64>,

    #[arg(long, short, help = "Write the JSON array to a file instead of stdout")]
    pub output: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Applies command-line overrides on top of the environment config.
    pub fn apply(&self, mut config: AutotaskConfig) -> AutotaskConfig {
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = self.timeout_secs {
            config.request_timeout = Duration::from_secs(secs);
        }
        config
    }
}
