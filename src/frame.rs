use crate::models::Series;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of a [`SeriesFrame`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// A date-keyed table with a single `value` column.
///
/// Rows keep the order of the source observations; nothing is sorted, deduplicated
/// or resampled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesFrame {
    pub rows: Vec<Row>,
}

/// Tabulate a series, one row per observation.
pub fn series_to_frame(series: &Series) -> SeriesFrame {
    SeriesFrame {
        rows: series
            .observations
            .iter()
            .map(|o| Row {
                date: o.date,
                value: o.value,
            })
            .collect(),
    }
}

impl From<&Series> for SeriesFrame {
    fn from(series: &Series) -> Self {
        series_to_frame(series)
    }
}

impl SeriesFrame {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The index column.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|r| r.date).collect()
    }

    /// The `value` column.
    pub fn values(&self) -> Vec<Option<f64>> {
        self.rows.iter().map(|r| r.value).collect()
    }

    /// Value at `date`; the first row wins if the index repeats.
    /// `None` when the date is absent, `Some(None)` when present but missing.
    pub fn get(&self, date: NaiveDate) -> Option<Option<f64>> {
        self.rows.iter().find(|r| r.date == date).map(|r| r.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Observation;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn get_distinguishes_absent_and_missing() {
        let frame = SeriesFrame {
            rows: vec![
                Row { date: d(2020, 1, 1), value: Some(1.0) },
                Row { date: d(2020, 2, 1), value: None },
                Row { date: d(2020, 1, 1), value: Some(9.0) },
            ],
        };
        assert_eq!(frame.get(d(2020, 1, 1)), Some(Some(1.0)));
        assert_eq!(frame.get(d(2020, 2, 1)), Some(None));
        assert_eq!(frame.get(d(2021, 1, 1)), None);
    }

    #[test]
    fn from_series_keeps_order() {
        let series = Series {
            id: "X".into(),
            title: String::new(),
            frequency: String::new(),
            units: String::new(),
            notes: None,
            observations: vec![
                Observation { date: d(2021, 1, 1), value: Some(2.0) },
                Observation { date: d(2020, 1, 1), value: Some(1.0) },
            ],
        };
        let frame = SeriesFrame::from(&series);
        assert_eq!(frame.dates(), vec![d(2021, 1, 1), d(2020, 1, 1)]);
        assert_eq!(frame.values(), vec![Some(2.0), Some(1.0)]);
    }
}
