use clap::{Parser, ValueEnum};
use solarprognose::{forecast::HourlyForecast, plugin::Provider, prelude::*, value::Variables};

use crate::{
    cli::SettingArgs,
    tables::{build_forecast_table, build_rows_table},
};

#[derive(Copy, Clone, Default, ValueEnum)]
pub enum Format {
    /// Hourly forecast.
    #[default]
    Table,

    /// Rows of the default tables.
    Rows,

    /// Extracted variables.
    Json,
}

#[derive(Parser)]
pub struct FetchArgs {
    #[clap(long, value_enum, default_value_t)]
    format: Format,

    #[clap(flatten)]
    setting: SettingArgs,
}

impl FetchArgs {
    pub fn run(&self, provider: &dyn Provider) -> Result {
        let setting = self.setting.resolve(provider.default_setting())?;
        let mut variables = Variables::default();
        provider
            .do_activity_work(&setting, &mut variables)
            .context("failed to fetch the forecast")?;
        match self.format {
            Format::Table => {
                let forecast = HourlyForecast::collect_from(&variables);
                if let Some(peak) = HourlyForecast::peak(&forecast) {
                    info!(power = %peak.power, at = %peak.timestamp, "peak");
                }
                println!("{}", build_forecast_table(&forecast));
            }
            Format::Rows => {
                for table in provider.default_tables() {
                    let rows = table.populate(&variables);
                    info!(table = table.name, n_rows = rows.len(), "populated");
                    println!("{}", build_rows_table(&table, &rows));
                }
            }
            Format::Json => {
                println!("{}", serde_json::to_string_pretty(&variables)?);
            }
        }
        Ok(())
    }
}
