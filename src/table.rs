//! Default persisted table schema.
//!
//! The host stores forecast rows through its own expression language. Cells are kept typed
//! here and rendered to host expressions only at the boundary, see [`CellSource`]'s
//! [`Display`]. [`Table::populate`] evaluates the same rows locally.

use std::fmt::{Display, Formatter};

use chrono::DateTime;
use serde::Serialize;

use crate::{
    mapper::HOURS,
    value::{Value, Variables},
};

/// Date format as understood by the host.
pub const HOST_DATE_FORMAT: &str = "dd.MM.yyyy";

const DATE_FORMAT: &str = "%d.%m.%Y";

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColumnType {
    String,
    Number,
    Timestamp,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TableColumn {
    pub name: &'static str,

    #[serde(rename = "type")]
    pub column_type: ColumnType,

    pub primary_key: bool,
}

impl TableColumn {
    const fn key(name: &'static str, column_type: ColumnType) -> Self {
        Self { name, column_type, primary_key: true }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CellSource {
    /// Date of the timestamp held by the variable.
    DateOf(String),

    /// Variable value as is.
    Variable(String),
}

impl CellSource {
    fn evaluate(&self, variables: &Variables) -> Value {
        match self {
            Self::Variable(name) => variables.get_or_null(name).clone(),
            Self::DateOf(name) => variables
                .get_or_null(name)
                .as_i64()
                .and_then(|timestamp| DateTime::from_timestamp(timestamp, 0))
                .map_or(Value::Null, |date_time| {
                    Value::String(date_time.format(DATE_FORMAT).to_string())
                }),
        }
    }
}

impl Display for CellSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DateOf(name) => write!(f, r#"DT_DATE_FORMAT({name}, "{HOST_DATE_FORMAT}")"#),
            Self::Variable(name) => write!(f, "{name}"),
        }
    }
}

/// The variable must hold a value for the cell to be written.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NotNull(pub String);

impl NotNull {
    fn holds(&self, variables: &Variables) -> bool {
        !variables.get_or_null(&self.0).is_null()
    }
}

impl Display for NotNull {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} != null", self.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TableCell {
    pub column: &'static str,
    pub source: CellSource,
    pub precondition: NotNull,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Table {
    pub name: &'static str,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Forecast table with one row per hour of the day.
    #[must_use]
    pub fn forecast() -> Self {
        let columns = vec![
            TableColumn::key("Date", ColumnType::String),
            TableColumn::key("Forecast_W", ColumnType::Number),
            TableColumn::key("Forecast_Wh", ColumnType::Number),
            TableColumn::key("timestamp", ColumnType::Timestamp),
        ];
        let rows = HOURS
            .map(|hour| {
                let precondition = NotNull(format!("timestamp_{hour}"));
                let cell = |column, source| TableCell {
                    column,
                    source,
                    precondition: precondition.clone(),
                };
                TableRow {
                    cells: vec![
                        cell("Date", CellSource::DateOf(format!("timestamp_{hour}"))),
                        cell("Forecast_W", CellSource::Variable(format!("prognose_{hour}"))),
                        cell(
                            "Forecast_Wh",
                            CellSource::Variable(format!("prognose_accumulated_{hour}")),
                        ),
                        cell("timestamp", CellSource::Variable(format!("timestamp_{hour}"))),
                    ],
                }
            })
            .collect();
        Self { name: "Wetterprognose", columns, rows }
    }

    /// Evaluate the rows against the variables.
    ///
    /// A row is omitted unless every cell's precondition holds. Values follow the column order.
    #[must_use]
    pub fn populate(&self, variables: &Variables) -> Vec<Vec<Value>> {
        self.rows
            .iter()
            .filter(|row| row.cells.iter().all(|cell| cell.precondition.holds(variables)))
            .map(|row| {
                self.columns
                    .iter()
                    .map(|column| {
                        row.cells
                            .iter()
                            .find(|cell| cell.column == column.name)
                            .map_or(Value::Null, |cell| cell.source.evaluate(variables))
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_schema_ok() {
        let table = Table::forecast();
        assert_eq!(table.name, "Wetterprognose");
        assert_eq!(table.columns.len(), 4);
        assert!(table.columns.iter().all(|column| column.primary_key));
        assert_eq!(table.rows.len(), 24);
        let cell = &table.rows[5].cells[0];
        assert_eq!(cell.source.to_string(), r#"DT_DATE_FORMAT(timestamp_5, "dd.MM.yyyy")"#);
        assert_eq!(cell.precondition.to_string(), "timestamp_5 != null");
        assert_eq!(table.rows[5].cells[2].source.to_string(), "prognose_accumulated_5");
    }

    #[test]
    fn populate_ok() {
        let variables: Variables = [
            ("timestamp_14", Value::Timestamp(1_717_250_400)),
            ("prognose_14", Value::Number(1.5)),
            ("prognose_accumulated_14", Value::Number(3.0)),
            ("timestamp_15", Value::Null),
            ("prognose_15", Value::Number(2.0)),
        ]
        .into_iter()
        .collect();
        let rows = Table::forecast().populate(&variables);
        assert_eq!(
            rows,
            [[
                Value::from("01.06.2024"),
                Value::Number(1.5),
                Value::Number(3.0),
                Value::Timestamp(1_717_250_400),
            ]]
        );
    }

    #[test]
    fn populate_empty() {
        assert!(Table::forecast().populate(&Variables::default()).is_empty());
    }
}
