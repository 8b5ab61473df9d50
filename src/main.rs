use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use kiwi_cli::cli::commands::{export, import, init, sync, unused};
use kiwi_cli::cli::{Args, Command};
use kiwi_cli::output::{self, OutputConfig};
use kiwi_cli::ui::Style;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    output::init(OutputConfig {
        quiet: args.quiet,
        ..OutputConfig::default()
    });

    match run(args.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", Style::error("Error:"));
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<()> {
    match command {
        Command::Init { force } => {
            init::run_init(force)?;
        }
        Command::Import { file, lang } => {
            let options = import::ImportOptions { file, lang };
            import::run_import(&options)?;
        }
        Command::Export { lang, output } => {
            let options = export::ExportOptions { lang, output };
            export::run_export(&options)?;
        }
        Command::Sync {
            lang,
            retries,
            api_key,
        } => {
            let options = sync::SyncCommandOptions {
                lang,
                retries,
                api_key,
            };
            sync::run_sync(options).await?;
        }
        Command::Unused { dir } => {
            unused::run_unused(&dir)?;
        }
    }

    Ok(())
}
