use clap::Parser;

use pushstate_cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;

    // Initialize logging
    pushstate_core::init_logging(config.log_filter.as_deref());

    pushstate_cli::run(cli, config)
}
