use std::io::{self, Write};
use std::path::Path;

use os_api::OS;

use crate::catalog;
use crate::cli::Cli;
use crate::errors::MedalLogError;
use crate::locator;
use crate::parser::read_records;
use crate::report;
use crate::settings::Settings;

/// Reads `path` and renders the full report. Nothing is returned unless
/// every catalog level has a time.
pub fn build_report(path: &Path) -> Result<String, MedalLogError> {
    let best = read_records(path)?;
    report::render(&best, catalog::levels())
}

/// One invocation of the tool.
pub fn run(cli: &Cli, settings: &Settings) -> Result<(), MedalLogError> {
    if cli.list_levels {
        let mut out = io::stdout().lock();
        out.write_all(report::list_levels(catalog::levels()).as_bytes())?;
        out.flush()?;
        return Ok(());
    }

    let path = locator::resolve(cli.path.as_deref(), settings)?;
    let text = build_report(&path)?;

    if cli.print {
        let mut out = io::stdout().lock();
        out.write_all(text.as_bytes())?;
        out.flush()?;
        return Ok(());
    }

    OS::set_clipboard_text(&text, &settings.retry_policy())?;
    let levels = catalog::levels().len();
    tracing::info!(
        levels,
        source = %path.display(),
        "best times copied to clipboard, paste them into the sheet"
    );
    Ok(())
}
