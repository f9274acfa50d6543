//! Turns lists of JSON records into Polars frames and stitches frames together.

use crate::DarkSkyError;
use polars::prelude::*;
use serde_json::{Map, Value};

/// Polars type chosen for a column from the JSON values found in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Boolean,
    Float,
    Text,
}

impl ColumnKind {
    fn of(value: &Value) -> Self {
        match value {
            Value::Bool(_) => ColumnKind::Boolean,
            Value::Number(_) => ColumnKind::Float,
            _ => ColumnKind::Text,
        }
    }

    fn merge(current: Option<Self>, value: &Value) -> Self {
        let kind = Self::of(value);
        match current {
            Some(existing) if existing != kind => ColumnKind::Text,
            _ => kind,
        }
    }
}

/// Builds a frame with one row per record and one column per field name.
///
/// Columns appear in the order their names are first seen. A record that lacks a
/// field gets a null in that column. Numbers become `Float64`, booleans `Boolean`,
/// and anything else (or a mix of kinds) `String`, with nested values kept as JSON
/// text. A column holding only nulls has type `Null`, so stacking it with another
/// day's frame keeps that day's type. An empty slice yields an empty frame.
///
/// `section` only labels the error returned when a record is not a JSON object.
pub fn records_to_frame(records: &[Value], section: &str) -> Result<DataFrame, DarkSkyError> {
    if records.is_empty() {
        return Ok(DataFrame::empty());
    }

    let rows = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            record.as_object().ok_or_else(|| DarkSkyError::MalformedRecord {
                section: section.to_string(),
                index,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut names: Vec<&str> = Vec::new();
    for row in &rows {
        for key in row.keys() {
            if !names.contains(&key.as_str()) {
                names.push(key);
            }
        }
    }

    let columns = names
        .into_iter()
        .map(|name| build_column(name, &rows))
        .collect();
    Ok(DataFrame::new(columns)?)
}

fn build_column(name: &str, rows: &[&Map<String, Value>]) -> Column {
    let cells: Vec<Option<&Value>> = rows
        .iter()
        .map(|row| row.get(name).filter(|value| !value.is_null()))
        .collect();
    let kind = cells
        .iter()
        .flatten()
        .fold(None, |kind, value| Some(ColumnKind::merge(kind, value)));

    match kind {
        Some(ColumnKind::Boolean) => {
            let values: Vec<Option<bool>> = cells
                .iter()
                .map(|cell| cell.and_then(Value::as_bool))
                .collect();
            Series::new(name.into(), values).into()
        }
        Some(ColumnKind::Float) => {
            let values: Vec<Option<f64>> = cells
                .iter()
                .map(|cell| cell.and_then(Value::as_f64))
                .collect();
            Series::new(name.into(), values).into()
        }
        Some(ColumnKind::Text) => {
            let values: Vec<Option<String>> = cells
                .iter()
                .map(|cell| cell.map(cell_text))
                .collect();
            Series::new(name.into(), values).into()
        }
        None => Series::full_null(name.into(), cells.len(), &DataType::Null).into(),
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Stacks frames vertically, in order, into one contiguous frame.
///
/// Frames may disagree on their columns: missing columns are filled with nulls and
/// mismatched column types are widened to a common supertype. The row count of the
/// result is the sum of the inputs' row counts.
pub fn concat_frames(frames: Vec<DataFrame>) -> Result<DataFrame, DarkSkyError> {
    let mut frames: Vec<DataFrame> = frames
        .into_iter()
        .filter(|frame| frame.width() > 0)
        .collect();

    match frames.len() {
        0 => Ok(DataFrame::empty()),
        1 => Ok(frames.remove(0)),
        _ => {
            let lazy_frames: Vec<LazyFrame> = frames.into_iter().map(|frame| frame.lazy()).collect();
            let args = UnionArgs {
                rechunk: true,
                to_supertypes: true,
                ..Default::default()
            };
            Ok(concat_lf_diagonal(lazy_frames, args)?.collect()?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn column_names(frame: &DataFrame) -> Vec<String> {
        frame
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    #[test]
    fn one_row_per_record_with_union_of_fields() -> Result<(), DarkSkyError> {
        let records = vec![
            json!({ "time": "2020-01-01 00:00", "temperature": 3, "precipIntensity": 0 }),
            json!({ "time": "2020-01-01 01:00", "temperature": 2.5, "precipType": "rain" }),
            json!({ "time": "2020-01-01 02:00", "temperature": null }),
        ];
        let frame = records_to_frame(&records, "hourly")?;

        assert_eq!(frame.height(), 3);
        assert_eq!(
            column_names(&frame),
            vec!["time", "temperature", "precipIntensity", "precipType"]
        );

        let temperature = frame.column("temperature")?;
        assert_eq!(temperature.dtype(), &DataType::Float64);
        assert_eq!(temperature.f64()?.get(0), Some(3.0));
        assert_eq!(temperature.f64()?.get(1), Some(2.5));
        assert_eq!(temperature.null_count(), 1);

        let precip_type = frame.column("precipType")?;
        assert_eq!(precip_type.str()?.get(1), Some("rain"));
        assert_eq!(precip_type.null_count(), 2);
        Ok(())
    }

    #[test]
    fn mixed_and_nested_values_become_text() -> Result<(), DarkSkyError> {
        let records = vec![
            json!({ "regions": ["Marin", "Sonoma"], "flag": true, "mixed": 1 }),
            json!({ "regions": ["Napa"], "flag": false, "mixed": "n/a" }),
        ];
        let frame = records_to_frame(&records, "alerts")?;

        assert_eq!(frame.column("flag")?.dtype(), &DataType::Boolean);
        assert_eq!(frame.column("regions")?.str()?.get(0), Some(r#"["Marin","Sonoma"]"#));
        let mixed = frame.column("mixed")?.str()?;
        assert_eq!(mixed.get(0), Some("1"));
        assert_eq!(mixed.get(1), Some("n/a"));
        Ok(())
    }

    #[test]
    fn empty_records_give_empty_frame() -> Result<(), DarkSkyError> {
        let frame = records_to_frame(&[], "minutely")?;
        assert_eq!(frame.shape(), (0, 0));
        Ok(())
    }

    #[test]
    fn non_object_record_is_rejected() {
        let records = vec![json!({ "time": "2020-01-01 00:00" }), json!("oops")];
        match records_to_frame(&records, "daily") {
            Err(DarkSkyError::MalformedRecord { section, index }) => {
                assert_eq!(section, "daily");
                assert_eq!(index, 1);
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn concat_keeps_order_and_fills_missing_columns() -> Result<(), DarkSkyError> {
        let first = records_to_frame(
            &[
                json!({ "time": "2020-01-01 00:00", "temperature": 1.0 }),
                json!({ "time": "2020-01-01 01:00", "temperature": 2.0 }),
            ],
            "hourly",
        )?;
        let second = records_to_frame(
            &[json!({ "time": "2020-01-02 00:00", "temperature": 3.0, "snow": true })],
            "hourly",
        )?;

        let stacked = concat_frames(vec![first, DataFrame::empty(), second])?;

        assert_eq!(stacked.height(), 3);
        assert_eq!(column_names(&stacked), vec!["time", "temperature", "snow"]);
        let times = stacked.column("time")?.str()?;
        assert_eq!(times.get(0), Some("2020-01-01 00:00"));
        assert_eq!(times.get(2), Some("2020-01-02 00:00"));
        assert_eq!(stacked.column("snow")?.null_count(), 2);
        Ok(())
    }

    #[test]
    fn all_null_column_takes_the_type_of_other_frames() -> Result<(), DarkSkyError> {
        let quiet = records_to_frame(
            &[
                json!({ "time": "2020-01-01 00:00", "temperature": null }),
                json!({ "time": "2020-01-01 01:00" }),
            ],
            "hourly",
        )?;
        assert_eq!(quiet.column("temperature")?.dtype(), &DataType::Null);
        assert_eq!(quiet.column("temperature")?.null_count(), 2);

        let measured = records_to_frame(
            &[json!({ "time": "2020-01-02 00:00", "temperature": 12.5 })],
            "hourly",
        )?;
        let stacked = concat_frames(vec![quiet, measured])?;

        let temperature = stacked.column("temperature")?;
        assert_eq!(temperature.dtype(), &DataType::Float64);
        assert_eq!(temperature.f64()?.get(0), None);
        assert_eq!(temperature.f64()?.get(2), Some(12.5));
        Ok(())
    }

    #[test]
    fn concat_of_nothing_is_empty() -> Result<(), DarkSkyError> {
        assert_eq!(concat_frames(Vec::new())?.shape(), (0, 0));
        assert_eq!(
            concat_frames(vec![DataFrame::empty(), DataFrame::empty()])?.shape(),
            (0, 0)
        );
        Ok(())
    }
}
