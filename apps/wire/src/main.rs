#![allow(clippy::print_stdout)]

use clap::Parser;
use dbx_wire::args::{Cli, Command};
use dbx_wire::{commands, logging};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _log = logging::init(env!("CARGO_PKG_NAME"), &cli.log)?;

    let output = match cli.command {
        Command::Run(args) => commands::run(&args)?,
        Command::Schema { section } => commands::schema(section.as_deref())?,
    };
    print!("{output}");

    Ok(())
}
