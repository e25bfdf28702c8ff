use std::collections::HashSet;

use crate::catalog::Level;
use crate::errors::MedalLogError;
use crate::formatter::format_time;
use crate::parser::BestTimes;

/// Renders one `M:SS.mmm` line per catalog level, in catalog order.
///
/// Every level must have a time. If any are missing the whole report is
/// refused and the error lists all of them.
pub fn render(best: &BestTimes, catalog: &[Level]) -> Result<String, MedalLogError> {
    let mut out = String::with_capacity(catalog.len() * "00:00.000\n".len());
    let mut missing = Vec::new();

    for level in catalog {
        match best.get(&level.id) {
            Some(seconds) => {
                out.push_str(&format_time(seconds));
                out.push('\n');
            }
            None => missing.push(level.label()),
        }
    }

    if !missing.is_empty() {
        return Err(MedalLogError::MissingLevels(missing));
    }

    let known: HashSet<&str> = catalog.iter().map(|l| l.id.as_str()).collect();
    let mut extra: Vec<&str> = best.levels().filter(|id| !known.contains(id)).collect();
    if !extra.is_empty() {
        extra.sort_unstable();
        tracing::debug!(?extra, "ignoring levels outside the catalog");
    }

    Ok(out)
}

/// Table of the catalog: position, identifier, in-game name.
pub fn list_levels(catalog: &[Level]) -> String {
    let width = catalog.iter().map(|l| l.id.len()).max().unwrap_or(0);
    catalog
        .iter()
        .enumerate()
        .map(|(i, l)| format!("{:>3}  {:<width$}  {}\n", i + 1, l.id, l.name))
        .collect()
}
