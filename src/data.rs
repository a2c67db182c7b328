//! Input data: a mapping from dates to scalar or record data points
use serde_json::{Map, Value as Json};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use thiserror::Error;
use time::{Date, macros::format_description};

/// A number-like value as found in input data
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Bool(bool),
    Null,
}

impl Value {
    /// Converts the value to a number.  Anything that is not a finite number
    /// (unparsable or empty text, `null`, infinities) becomes NaN, meaning "no
    /// value".
    pub fn coerce(&self) -> f64 {
        let n = match self {
            Value::Number(n) => *n,
            Value::Text(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
            Value::Bool(true) => 1.0,
            Value::Bool(false) => 0.0,
            Value::Null => f64::NAN,
        };
        if n.is_finite() {
            n
        } else {
            f64::NAN
        }
    }

    fn from_json(json: Json) -> Value {
        match json {
            Json::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
            Json::String(s) => Value::Text(s),
            Json::Bool(b) => Value::Bool(b),
            Json::Null | Json::Array(_) | Json::Object(_) => Value::Null,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Value {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::Text(s.to_owned())
    }
}

/// A flat record of named values, in the order the fields were given
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record(Vec<(String, Value)>);

impl Record {
    pub fn new() -> Record {
        Record::default()
    }

    /// Sets `field` to `value`, keeping the field's position if it was already
    /// present
    pub fn insert<S: Into<String>>(&mut self, field: S, value: Value) {
        let field = field.into();
        if let Some(slot) = self.0.iter_mut().find(|(k, _)| *k == field) {
            slot.1 = value;
        } else {
            self.0.push((field, value));
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == field).map(|(_, v)| v)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>, V: Into<Value>> FromIterator<(S, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (S, V)>>(iter: I) -> Record {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v.into());
        }
        record
    }
}

/// The value associated with a single day (or, once aggregated, a single
/// week)
#[derive(Clone, Debug, PartialEq)]
pub enum DataPoint {
    Scalar(Value),
    Record(Record),
}

impl DataPoint {
    fn from_json(json: Json) -> DataPoint {
        match json {
            Json::Object(fields) => DataPoint::Record(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Value::from_json(v)))
                    .collect(),
            ),
            other => DataPoint::Scalar(Value::from_json(other)),
        }
    }
}

impl From<f64> for DataPoint {
    fn from(n: f64) -> DataPoint {
        DataPoint::Scalar(Value::Number(n))
    }
}

impl From<Record> for DataPoint {
    fn from(record: Record) -> DataPoint {
        DataPoint::Record(record)
    }
}

/// Per-day data points keyed by date.  Iteration follows insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    entries: Vec<(Date, DataPoint)>,
    index: BTreeMap<Date, usize>,
}

impl Dataset {
    pub fn new() -> Dataset {
        Dataset::default()
    }

    /// Parses a JSON object mapping `YYYY-MM-DD` keys to numbers, numeric
    /// strings, or flat objects of such values
    pub fn from_json(s: &str) -> Result<Dataset, DatasetError> {
        match serde_json::from_str::<Json>(s)? {
            Json::Object(map) => Dataset::from_json_map(map),
            _ => Err(DatasetError::NotAnObject),
        }
    }

    pub fn from_json_map(map: Map<String, Json>) -> Result<Dataset, DatasetError> {
        map.into_iter()
            .map(|(key, value)| (key, DataPoint::from_json(value)))
            .try_fold(Dataset::new(), |mut dataset, (key, point)| {
                dataset.insert_key(&key, point)?;
                Ok(dataset)
            })
    }

    /// Inserts a data point under a `YYYY-MM-DD` key
    pub fn insert_key(&mut self, key: &str, point: DataPoint) -> Result<(), DatasetError> {
        let date = parse_date_key(key)?;
        self.insert(date, point);
        Ok(())
    }

    /// Sets the data point for `date`.  Replacing an existing entry keeps its
    /// position in iteration order.
    pub fn insert(&mut self, date: Date, point: DataPoint) {
        if let Some(&i) = self.index.get(&date) {
            if let Some(slot) = self.entries.get_mut(i) {
                slot.1 = point;
            }
        } else {
            self.index.insert(date, self.entries.len());
            self.entries.push((date, point));
        }
    }

    pub fn get(&self, date: Date) -> Option<&DataPoint> {
        self.index
            .get(&date)
            .and_then(|&i| self.entries.get(i))
            .map(|(_, p)| p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Date, &DataPoint)> + '_ {
        self.entries.iter().map(|(d, p)| (*d, p))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the inclusive span of years touched by the dataset, or `None`
    /// if it is empty
    pub fn year_range(&self) -> Option<RangeInclusive<i32>> {
        let first = self.index.keys().next()?.year();
        let last = self.index.keys().next_back()?.year();
        Some(first..=last)
    }
}

impl FromIterator<(Date, DataPoint)> for Dataset {
    fn from_iter<I: IntoIterator<Item = (Date, DataPoint)>>(iter: I) -> Dataset {
        let mut dataset = Dataset::new();
        for (date, point) in iter {
            dataset.insert(date, point);
        }
        dataset
    }
}

pub fn parse_date_key(key: &str) -> Result<Date, DatasetError> {
    Date::parse(key, format_description!("[year]-[month]-[day]")).map_err(|source| {
        DatasetError::InvalidDate {
            key: key.to_owned(),
            source,
        }
    })
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("invalid date key {key:?}; expected YYYY-MM-DD")]
    InvalidDate {
        key: String,
        source: time::error::Parse,
    },
    #[error("dataset must be a JSON object mapping dates to values")]
    NotAnObject,
    #[error("failed to parse dataset as JSON")]
    Json(#[from] serde_json::Error),
}
