//! `pushstate normalize`

use anyhow::Result;
use clap::Args;
use std::sync::Arc;

use pushstate_core::{Config, MemoryHost};

use super::{HistoryOverrides, DEFAULT_HOSTNAME};

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// URL to normalize; relative, rooted or fully qualified
    pub url: String,

    #[command(flatten)]
    pub history: HistoryOverrides,

    /// Drop the document root from rooted URLs
    #[arg(long)]
    pub exclude_root: bool,

    /// Drop query strings and hash trailers
    #[arg(long)]
    pub no_trailers: bool,
}

pub fn run(config: Config, args: NormalizeArgs) -> Result<()> {
    println!("{}", normalize(config, &args)?);
    Ok(())
}

pub fn normalize(mut config: Config, args: &NormalizeArgs) -> Result<String> {
    config.history = args.history.apply(config.history);

    let host = Arc::new(MemoryHost::new(DEFAULT_HOSTNAME));
    let history = config.open_history(host)?;

    Ok(history.normalize_url(&args.url, !args.exclude_root, !args.no_trailers)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(url: &str) -> NormalizeArgs {
        NormalizeArgs {
            url: url.to_string(),
            history: HistoryOverrides {
                document_root: Some("/app".to_string()),
                domain: Some("example.com".to_string()),
                ..HistoryOverrides::default()
            },
            exclude_root: false,
            no_trailers: false,
        }
    }

    #[test]
    fn test_normalize() {
        let result = normalize(Config::default(), &args("/about?x=1")).unwrap();
        assert_eq!(result, "/app/about?x=1");

        let mut no_trailers = args("/about?x=1#top");
        no_trailers.no_trailers = true;
        no_trailers.exclude_root = true;
        assert_eq!(normalize(Config::default(), &no_trailers).unwrap(), "/about");
    }

    #[test]
    fn test_normalize_rejects_other_domains() {
        let err = normalize(Config::default(), &args("https://evil.com/x")).unwrap_err();
        assert!(err.to_string().contains("evil.com"));
    }
}
