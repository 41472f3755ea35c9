//! Conversion from Arrow record batches.

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{
    DataType, Float64Type, Int64Type, TimeUnit, TimestampMicrosecondType, UInt64Type,
};
use arrow::record_batch::RecordBatch;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use tracing::debug;

use super::{Column, ColumnKind, Dataset, Value};
use crate::error::{Error, Result};

/// Maps an Arrow data type onto the closed set of column kinds.
pub(crate) fn kind_for(data_type: &DataType) -> ColumnKind {
    match data_type {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => ColumnKind::Integer,
        DataType::Float16 | DataType::Float32 | DataType::Float64 => ColumnKind::Float,
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => ColumnKind::Text,
        DataType::Boolean => ColumnKind::Boolean,
        DataType::Dictionary(_, values)
            if matches!(values.as_ref(), DataType::Utf8 | DataType::LargeUtf8) =>
        {
            ColumnKind::Category
        }
        DataType::Timestamp(_, _) | DataType::Date32 | DataType::Date64 => ColumnKind::Datetime,
        _ => ColumnKind::Unknown,
    }
}

fn convert_column(name: &str, array: &ArrayRef) -> Result<Column> {
    let kind = kind_for(array.data_type());
    let len = array.len();

    let values: Vec<Value> = match kind {
        // `u64` above `i64::MAX` does not fit the Int64 cast and would turn into null.
        ColumnKind::Integer if array.data_type() == &DataType::UInt64 => {
            let ints = array.as_primitive::<UInt64Type>();
            (0..len)
                .map(|i| {
                    if ints.is_null(i) {
                        Value::Null
                    } else {
                        Value::from(ints.value(i))
                    }
                })
                .collect()
        }
        ColumnKind::Integer => {
            let cast_array = cast(array, &DataType::Int64)?;
            let ints = cast_array.as_primitive::<Int64Type>();
            (0..len)
                .map(|i| {
                    if ints.is_null(i) {
                        Value::Null
                    } else {
                        Value::Int(ints.value(i))
                    }
                })
                .collect()
        }
        ColumnKind::Float => {
            let cast_array = cast(array, &DataType::Float64)?;
            let floats = cast_array.as_primitive::<Float64Type>();
            (0..len)
                .map(|i| {
                    if floats.is_null(i) {
                        Value::Null
                    } else {
                        Value::Float(floats.value(i))
                    }
                })
                .collect()
        }
        ColumnKind::Text | ColumnKind::Category => {
            let cast_array = cast(array, &DataType::Utf8)?;
            let strings = cast_array.as_string::<i32>();
            (0..len)
                .map(|i| {
                    if strings.is_null(i) {
                        Value::Null
                    } else {
                        Value::Text(strings.value(i).to_string())
                    }
                })
                .collect()
        }
        ColumnKind::Boolean => {
            let bools = array.as_boolean();
            (0..len)
                .map(|i| {
                    if bools.is_null(i) {
                        Value::Null
                    } else {
                        Value::Bool(bools.value(i))
                    }
                })
                .collect()
        }
        ColumnKind::Datetime => {
            let cast_array = cast(array, &DataType::Timestamp(TimeUnit::Microsecond, None))?;
            let stamps = cast_array.as_primitive::<TimestampMicrosecondType>();
            (0..len)
                .map(|i| {
                    if stamps.is_null(i) {
                        Value::Null
                    } else {
                        stamps
                            .value_as_datetime(i)
                            .map_or(Value::Null, Value::Timestamp)
                    }
                })
                .collect()
        }
        ColumnKind::Unknown => {
            let options = FormatOptions::default();
            let formatter = ArrayFormatter::try_new(array.as_ref(), &options)?;
            (0..len)
                .map(|i| {
                    if array.is_null(i) {
                        Value::Null
                    } else {
                        Value::Text(formatter.value(i).to_string())
                    }
                })
                .collect()
        }
    };

    debug!(column = %name, kind = %kind, rows = len, "Converted Arrow column");
    Ok(Column::new(name, kind, values))
}

impl TryFrom<&RecordBatch> for Dataset {
    type Error = Error;

    fn try_from(batch: &RecordBatch) -> Result<Self> {
        let schema = batch.schema();
        let columns = schema
            .fields()
            .iter()
            .zip(batch.columns())
            .map(|(field, array)| convert_column(field.name(), array))
            .collect::<Result<Vec<_>>>()?;
        Dataset::new(columns)
    }
}
