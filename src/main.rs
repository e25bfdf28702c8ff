use anyhow::Context;
use clap::Parser;

use medallog_clip::cli::Cli;
use medallog_clip::{app, logging, Settings};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (settings, settings_error) = match Settings::load() {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };
    logging::init(cli.verbose, settings.log_level.as_deref());
    if let Some(e) = settings_error {
        tracing::warn!(error = %e, "ignoring settings file");
    }

    app::run(&cli, &settings).context("could not copy best times")?;
    Ok(())
}
