//! CLI subcommands
//!
//! Each module owns its clap arguments and a `run` entry point.

pub mod docs;
pub mod normalize;
pub mod replay;

use clap::Args;

use pushstate_core::HistoryConfig;

/// Hostname reported by the in-memory host when no domain is configured
pub const DEFAULT_HOSTNAME: &str = "localhost";

/// History settings that override the configuration file
#[derive(Debug, Clone, Default, Args)]
pub struct HistoryOverrides {
    /// Document root to push URLs under
    #[arg(long)]
    pub document_root: Option<String>,

    /// Primary domain name for the cross-origin guard
    #[arg(long)]
    pub domain: Option<String>,

    /// Allow URLs on other domains
    #[arg(long)]
    pub no_observe_domain: bool,

    /// Log push and pop failures as warnings
    #[arg(long)]
    pub dev: bool,
}

impl HistoryOverrides {
    pub fn apply(&self, mut config: HistoryConfig) -> HistoryConfig {
        if let Some(root) = &self.document_root {
            config.document_root = root.clone();
        }
        if let Some(domain) = &self.domain {
            config.top_level_domain = Some(domain.clone());
        }
        if self.no_observe_domain {
            config.observe_top_level_domain = false;
        }
        if self.dev {
            config.dev_mode = true;
        }
        config
    }
}
