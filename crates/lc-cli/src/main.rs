//! labcat CLI - data entry and tabular browsing for the lab measurement catalog

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod context;
mod logging;

use cli::Cli;
use commands::{add, delete, find, init, join, query, relation, show, tables};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.global.verbose);

    match &cli.command {
        cli::Commands::Init(args) => init::execute(args),
        cli::Commands::Add(args) => add::execute(args, &cli.global),
        cli::Commands::Show(args) => show::execute(args, &cli.global),
        cli::Commands::Join(args) => join::execute(args, &cli.global),
        cli::Commands::Relation(args) => relation::execute(args, &cli.global),
        cli::Commands::Find(args) => find::execute(args, &cli.global),
        cli::Commands::Delete(args) => delete::execute(args, &cli.global),
        cli::Commands::Tables => tables::execute(&cli.global),
        cli::Commands::Query(args) => query::execute(args, &cli.global),
    }
}
