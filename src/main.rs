mod cli;
mod tables;

use clap::{Parser, crate_version};
use solarprognose::{
    plugin::PluginRegistry,
    prelude::*,
    solarprognose::{DESCRIPTOR, register},
};
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .without_time()
        .compact()
        .init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();
    let mut registry = PluginRegistry::default();
    register(&mut registry, args.locale)?;
    let provider = registry
        .get(DESCRIPTOR.name)
        .with_context(|| format!("plugin `{}` is not registered", DESCRIPTOR.name))?;

    match args.command {
        Command::Fetch(args) => args.run(provider),
        Command::TestConnection(args) => {
            let setting = args.resolve(provider.default_setting())?;
            let message = provider.test_connection(&setting)?;
            info!(host = %setting.provider_host, "connected");
            println!("{message}");
            Ok(())
        }
        Command::Describe(args) => args.run(provider),
        Command::Watch(args) => args.run(provider),
    }
}
