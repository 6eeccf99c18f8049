use basic_cleaning::cli::{run, Cli};
use basic_cleaning::logging::build_dispatch;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let dispatch = build_dispatch(cli.verbose, cli.log_file.as_deref())?;

    tracing::dispatcher::with_default(&dispatch, || run(cli))?;
    Ok(())
}
