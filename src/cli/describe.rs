use clap::Parser;
use serde::Serialize;
use solarprognose::{
    dialog::UiElement,
    field::CommandProperty,
    plugin::{PluginDescriptor, Provider},
    prelude::*,
};

use crate::tables::{build_descriptor_table, build_fields_table, build_schema_table};

#[derive(Parser)]
pub struct DescribeArgs {
    /// Print JSON instead of tables.
    #[clap(long)]
    json: bool,
}

#[derive(Serialize)]
struct Description {
    descriptor: &'static PluginDescriptor,
    properties: Vec<CommandProperty>,
    dialog: Vec<UiElement>,
}

impl DescribeArgs {
    pub fn run(&self, provider: &dyn Provider) -> Result {
        if self.json {
            let description = Description {
                descriptor: provider.descriptor(),
                properties: provider.supported_properties(),
                dialog: provider.dialog(),
            };
            println!("{}", serde_json::to_string_pretty(&description)?);
            return Ok(());
        }
        println!("{}", build_descriptor_table(provider.descriptor()));
        println!("{}", build_fields_table(&provider.supported_properties()));
        for table in provider.default_tables() {
            println!("{}:", table.name);
            println!("{}", build_schema_table(&table));
        }
        Ok(())
    }
}
