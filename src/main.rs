use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

fn main() -> ExitCode {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn try_main() -> anyhow::Result<()> {
    termshelf::logging::init().context("init logging")?;

    let cli = termshelf::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    let config =
        termshelf::config::Config::load(cli.data_dir.as_deref()).context("load config")?;
    tracing::debug!(?config, "loaded config");

    match cli.command {
        termshelf::cli::Command::List(args) => {
            termshelf::commands::list(&config, args).context("list")?;
        }
        termshelf::cli::Command::Show(args) => {
            termshelf::commands::show(&config, args).context("show")?;
        }
        termshelf::cli::Command::Close(args) => {
            termshelf::commands::close(&config, args).context("close")?;
        }
        termshelf::cli::Command::Resume(args) => {
            termshelf::commands::resume(&config, args).context("resume")?;
        }
        termshelf::cli::Command::Delete(args) => {
            termshelf::commands::delete(&config, args).context("delete")?;
        }
        termshelf::cli::Command::Config => {
            termshelf::commands::show_config(&config).context("config")?;
        }
    }

    Ok(())
}
