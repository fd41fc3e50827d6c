mod describe;
mod fetch;
mod setting;
mod watch;

use clap::{Parser, Subcommand};
use solarprognose::i18n::Locale;

pub use self::{
    describe::DescribeArgs,
    fetch::FetchArgs,
    setting::SettingArgs,
    watch::WatchArgs,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    /// Language of the dialog and connection test texts.
    #[clap(long, env = "LOCALE", value_enum, default_value_t)]
    pub locale: Locale,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a single activity tick and print the forecast.
    #[clap(name = "fetch")]
    Fetch(Box<FetchArgs>),

    /// Check that the API is reachable with the given configuration.
    #[clap(name = "test-connection")]
    TestConnection(Box<SettingArgs>),

    /// Print the plugin declarations: metadata, fields, tables, and dialog.
    #[clap(name = "describe")]
    Describe(DescribeArgs),

    /// Run activity ticks on the default schedule until terminated.
    #[clap(name = "watch")]
    Watch(Box<WatchArgs>),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_args() {
        Args::command().debug_assert();
    }

    #[test]
    fn parse_fetch_ok() -> solarprognose::prelude::Result {
        let args = Args::try_parse_from([
            "solarprognose",
            "--locale",
            "de",
            "fetch",
            "--token",
            "12345",
            "--element-id",
            "0815",
            "--algorithm",
            "own-v1",
        ])?;
        assert_eq!(args.locale, Locale::De);
        assert!(matches!(args.command, Command::Fetch(_)));
        Ok(())
    }
}
