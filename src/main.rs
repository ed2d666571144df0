use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod i18n;
mod state;

use crate::cli::args::{Cli, CliCommand};
use crate::i18n::Messages;

fn main() {
    if let Err(err) = run() {
        eprintln!("relay-admin error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    relay_admin::logging::init_tracing(cli.verbose);
    let messages = Messages::new(&cli.lang)?;

    match cli.command {
        CliCommand::Create(args) => {
            commands::create::run_create(&args, cli.verbose, &messages)?;
        }
    }
    Ok(())
}
