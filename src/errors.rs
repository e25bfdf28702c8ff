use std::io;
use std::path::PathBuf;

use os_api::ClipboardError;
use thiserror::Error;

/// Fatal conditions of a run. None of them are recovered from.
#[derive(Debug, Error)]
pub enum MedalLogError {
    #[error("medallog.txt not found in {}: {reason}", .searched.display())]
    LogNotFound { searched: PathBuf, reason: String },
    #[error("cannot open {}: {}", .path.display(), .source)]
    LogUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot read line {line}: {source}")]
    LineUnreadable {
        line: usize,
        #[source]
        source: io::Error,
    },
    #[error("line {line} is not a `<level> <seconds>` record: {content:?}")]
    MalformedLine { line: usize, content: String },
    #[error("no recorded time for {} level(s): {}", .0.len(), .0.join(", "))]
    MissingLevels(Vec<String>),
    #[error("invalid settings file {}: {reason}", .path.display())]
    InvalidSettings { path: PathBuf, reason: String },
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
    #[error(transparent)]
    Io(#[from] io::Error),
}
