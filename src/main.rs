#[macro_use]
extern crate diesel;

mod cli;
mod commands;
mod config;
mod contact;
mod content;
mod database;
mod http;
mod mailer;
mod richtext;
mod schema;

use crate::cli::{Cli, Command};
use crate::config::Config;
use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    simple_logger::SimpleLogger::new()
        .with_module_level("actix_server", LevelFilter::Off)
        .with_module_level("mio", LevelFilter::Off)
        .with_level(if cli.quiet {
            LevelFilter::Warn
        } else {
            LevelFilter::Debug
        })
        .init()?;

    let config = Config::load(cli.config.as_deref())?;
    match cli.command {
        Command::Serve(args) => commands::serve(config, args).await?,
        Command::Import(args) => commands::import(&config, args)?,
        Command::Messages(args) => commands::messages(&config, args)?,
        Command::MarkRead(args) => commands::mark_read(&config, args)?,
        Command::DeleteMessage(args) => commands::delete_message(&config, args)?,
    }

    Ok(())
}
