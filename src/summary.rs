//! Weekly means of per-day data
use crate::calendar::{WeekStart, week_index};
use crate::data::{DataPoint, Dataset, Record, Value};
use crate::rollup::RollupKeys;
use std::collections::BTreeMap;

/// Mean values per (year, week) bucket.  Each aggregate is itself a
/// [`DataPoint`]: a scalar mean when there are no rollup keys, otherwise a
/// record holding one mean per key.  A mean over no samples is NaN.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeeklySummary(BTreeMap<i32, BTreeMap<u8, DataPoint>>);

impl WeeklySummary {
    pub fn get(&self, year: i32, week: u8) -> Option<&DataPoint> {
        self.0.get(&year).and_then(|weeks| weeks.get(&week))
    }

    pub fn year(&self, year: i32) -> Option<&BTreeMap<u8, DataPoint>> {
        self.0.get(&year)
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, u8, &DataPoint)> + '_ {
        self.0
            .iter()
            .flat_map(|(&y, weeks)| weeks.iter().map(move |(&w, p)| (y, w, p)))
    }

    /// Number of (year, week) buckets
    pub fn len(&self) -> usize {
        self.0.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Groups the days of `dataset` by calendar year and week of the year, and
/// averages each group.
///
/// With no rollup keys, each group's scalar values are averaged.  With rollup
/// keys, each key is averaged separately over the records of the group that
/// carry it.  Values that do not coerce to numbers are left out of a mean
/// rather than counted as zero, and scalars mixed into a record dataset drop
/// out of every per-key mean.
pub fn weekly_summary(
    dataset: &Dataset,
    week_start: WeekStart,
    rollup_keys: &RollupKeys,
) -> WeeklySummary {
    let mut groups: BTreeMap<(i32, u8), Vec<&DataPoint>> = BTreeMap::new();
    for (date, point) in dataset.iter() {
        groups
            .entry((date.year(), week_index(date, week_start)))
            .or_default()
            .push(point);
    }
    let mut summary = WeeklySummary::default();
    for ((year, week), points) in groups {
        let aggregate = if rollup_keys.is_empty() {
            DataPoint::Scalar(Value::Number(mean(points.iter().map(|p| scalar_sample(p)))))
        } else {
            DataPoint::Record(
                rollup_keys
                    .iter()
                    .map(|key| (key, mean(points.iter().map(|p| field_sample(p, key)))))
                    .collect::<Record>(),
            )
        };
        summary.0.entry(year).or_default().insert(week, aggregate);
    }
    summary
}

fn scalar_sample(point: &DataPoint) -> f64 {
    match point {
        DataPoint::Scalar(value) => value.coerce(),
        DataPoint::Record(_) => f64::NAN,
    }
}

fn field_sample(point: &DataPoint, key: &str) -> f64 {
    match point {
        DataPoint::Record(record) => record.get(key).map_or(f64::NAN, Value::coerce),
        DataPoint::Scalar(_) => f64::NAN,
    }
}

/// Arithmetic mean of the non-NaN samples; NaN if there are none
fn mean<I: IntoIterator<Item = f64>>(samples: I) -> f64 {
    let (sum, count) = samples
        .into_iter()
        .filter(|x| !x.is_nan())
        .fold((0.0, 0.0), |(sum, count), x| (sum + x, count + 1.0));
    if count > 0.0 {
        sum / count
    } else {
        f64::NAN
    }
}
