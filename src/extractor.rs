//! Field extraction into output variables.
//!
//! The host normally owns this step. [`MapExtractor`] is the default used when the provider runs
//! outside of a host.

use crate::{
    field::{FieldType, PropertyField},
    prelude::*,
    value::{Value, ValueMap, Variables},
};

pub trait FieldExtractor {
    /// Write one variable per field, named after the field.
    fn extract(&self, values: &ValueMap, fields: &[PropertyField], variables: &mut Variables);
}

#[derive(Copy, Clone, Debug, Default)]
pub struct MapExtractor;

impl MapExtractor {
    /// Coerce the value to the field type, [`Value::Null`] when impossible.
    fn coerce(value: &Value, field_type: FieldType) -> Value {
        match (field_type, value) {
            (_, Value::Null) => Value::Null,
            (FieldType::Number, _) => value.as_f64().map_or(Value::Null, Value::Number),
            (FieldType::Timestamp, _) => value.as_i64().map_or(Value::Null, Value::Timestamp),
            (FieldType::String, Value::String(_)) => value.clone(),
            (FieldType::String, _) => Value::String(value.to_string()),
        }
    }
}

impl FieldExtractor for MapExtractor {
    #[instrument(skip_all, level = Level::DEBUG, fields(n_fields = fields.len()))]
    fn extract(&self, values: &ValueMap, fields: &[PropertyField], variables: &mut Variables) {
        let mut n_missing = 0_usize;
        for field in fields {
            let value = Self::coerce(values.get_or_null(&field.index), field.field_type);
            if value.is_null() {
                n_missing += 1;
            }
            variables.insert(field.name.clone(), value);
        }
        debug!(n_missing, "extracted");
    }
}
