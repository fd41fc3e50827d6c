use chrono::Local;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use itertools::Itertools;
use solarprognose::{
    field::CommandProperty,
    forecast::HourlyForecast,
    plugin::PluginDescriptor,
    quantity::{Kilowatts, Watts},
    table::Table as SchemaTable,
    value::Value,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

pub fn build_forecast_table(forecast: &[HourlyForecast]) -> Table {
    let peak = HourlyForecast::peak(forecast).map(|hourly| hourly.power);
    let mut table = new_table();
    table.set_header(vec!["Date", "Time", "Power", "Accumulated"]);
    for hourly in forecast {
        let local = hourly.timestamp.with_timezone(&Local);
        table.add_row(vec![
            Cell::new(local.format("%b %d")).add_attribute(Attribute::Dim),
            Cell::new(local.format("%H:%M")),
            Cell::new(Watts::from(hourly.power)).set_alignment(CellAlignment::Right).fg(
                if Some(hourly.power) == peak {
                    Color::Green
                } else if hourly.power <= Kilowatts::ZERO {
                    Color::DarkGrey
                } else {
                    Color::Reset
                },
            ),
            Cell::new(hourly.accumulated_energy).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Rows as the host would persist them.
pub fn build_rows_table(schema: &SchemaTable, rows: &[Vec<Value>]) -> Table {
    let mut table = new_table();
    table.set_header(schema.columns.iter().map(|column| column.name).collect_vec());
    for row in rows {
        table.add_row(row.iter().map(|value| {
            let cell = Cell::new(value);
            if value.is_null() { cell.add_attribute(Attribute::Dim) } else { cell }
        }));
    }
    table
}

pub fn build_descriptor_table(descriptor: &PluginDescriptor) -> Table {
    let mut table = new_table();
    table.add_row(vec!["Name", descriptor.name]);
    table.add_row(vec!["Version", descriptor.version]);
    table.add_row(vec!["Author", descriptor.author]);
    table.add_row(vec!["URL", descriptor.url]);
    table.add_row(vec!["Supports", descriptor.supports]);
    table.add_row(vec![
        "Interfaces".to_owned(),
        descriptor.interfaces.iter().map(|interface| format!("{interface:?}")).join(", "),
    ]);
    table.add_row(vec!["Protocol".to_owned(), format!("{:?}", descriptor.protocol)]);
    table.add_row(vec![
        "Capabilities".to_owned(),
        descriptor.capabilities.iter().map(|capability| format!("{capability:?}")).join(", "),
    ]);
    table
}

pub fn build_fields_table(properties: &[CommandProperty]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Property", "Field", "Type", "Unit", "Index", "Note"]);
    for property in properties {
        for field in &property.fields {
            table.add_row(vec![
                Cell::new(property.name).add_attribute(Attribute::Dim),
                Cell::new(&field.name),
                Cell::new(format!("{:?}", field.field_type)),
                Cell::new(field.unit),
                Cell::new(&field.index).add_attribute(Attribute::Dim),
                Cell::new(&field.note),
            ]);
        }
    }
    table
}

pub fn build_schema_table(schema: &SchemaTable) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Column", "Type", "Key", "Cell", "Precondition"]);
    let first_row = schema.rows.first();
    for column in &schema.columns {
        let cell = first_row
            .and_then(|row| row.cells.iter().find(|cell| cell.column == column.name));
        table.add_row(vec![
            Cell::new(column.name),
            Cell::new(format!("{:?}", column.column_type)),
            Cell::new(if column.primary_key { "yes" } else { "" }),
            Cell::new(cell.map(|cell| cell.source.to_string()).unwrap_or_default()),
            Cell::new(cell.map(|cell| cell.precondition.to_string()).unwrap_or_default())
                .add_attribute(Attribute::Dim),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_rows_table_ok() {
        let schema = SchemaTable::forecast();
        let rows = [vec![
            Value::from("01.06.2024"),
            Value::Number(1.5),
            Value::Number(3.0),
            Value::Timestamp(1_717_250_400),
        ]];
        let rendered = build_rows_table(&schema, &rows).to_string();
        assert!(rendered.contains("Forecast_Wh"));
        assert!(rendered.contains("01.06.2024"));
        assert!(rendered.contains("1717250400"));
    }

    #[test]
    fn build_schema_table_ok() {
        let rendered = build_schema_table(&SchemaTable::forecast()).to_string();
        assert!(rendered.contains(r#"DT_DATE_FORMAT(timestamp_0, "dd.MM.yyyy")"#));
        assert!(rendered.contains("timestamp_0 != null"));
    }
}
