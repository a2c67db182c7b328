//! Rollup keys: the field names of record-valued data points, and the
//! resolution of a data point to the number that gets colored
use crate::data::{DataPoint, Dataset, Value};

/// Field names discovered across record-valued data points, in first-seen
/// order.  Keys are only ever appended.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct RollupKeys(Vec<String>);

impl RollupKeys {
    pub fn new() -> RollupKeys {
        RollupKeys::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|k| k == key)
    }

    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn get(&self, i: usize) -> Option<&str> {
        self.0.get(i).map(String::as_str)
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.0.iter().position(|k| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push_new(&mut self, key: &str) {
        if !self.contains(key) {
            self.0.push(key.to_owned());
        }
    }
}

impl<S: Into<String>> FromIterator<S> for RollupKeys {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> RollupKeys {
        let mut keys = RollupKeys::new();
        for k in iter {
            keys.push_new(&k.into());
        }
        keys
    }
}

/// Returns `existing` extended with every record field name in `dataset` that
/// it does not already contain, in order of first appearance.  Scalar data
/// points contribute nothing.
pub fn discover_rollup_keys(dataset: &Dataset, existing: &RollupKeys) -> RollupKeys {
    let mut keys = existing.clone();
    for (_, point) in dataset.iter() {
        if let DataPoint::Record(record) = point {
            for field in record.fields() {
                keys.push_new(field);
            }
        }
    }
    keys
}

/// Returns the number to color for `point`.
///
/// Records yield their `key` field, provided `key` is one of the `known` keys
/// and the field holds a finite number.  Scalars yield their own value
/// whatever the key.  Anything else, including a missing point, is NaN.
pub fn resolve_value(point: Option<&DataPoint>, key: Option<&str>, known: &RollupKeys) -> f64 {
    match point {
        Some(DataPoint::Record(record)) => key
            .filter(|k| known.contains(k))
            .and_then(|k| record.get(k))
            .map_or(f64::NAN, Value::coerce),
        Some(DataPoint::Scalar(value)) => value.coerce(),
        None => f64::NAN,
    }
}
