use crate::error::Result;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::{Dispatch, Level};

/// Build the log sink for one run.
///
/// The caller scopes it with `tracing::dispatcher::with_default`; nothing is
/// installed process-wide.
pub fn build_dispatch(verbose: bool, log_file: Option<&Path>) -> Result<Dispatch> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(verbose);

    let dispatch = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Dispatch::new(builder.with_ansi(false).with_writer(Mutex::new(file)).finish())
        }
        None => Dispatch::new(builder.with_writer(std::io::stderr).finish()),
    };

    Ok(dispatch)
}
