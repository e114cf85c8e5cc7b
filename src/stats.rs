use crate::frame::SeriesFrame;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Summary statistics for one frame's `value` column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    /// Rows with a value.
    pub count: usize,
    pub missing: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    /// Earliest and latest index dates.
    pub first: Option<NaiveDate>,
    pub last: Option<NaiveDate>,
}

/// Compute statistics over the non-missing values of a frame.
pub fn summary(frame: &SeriesFrame) -> Summary {
    let mut vals: Vec<f64> = frame.rows.iter().filter_map(|r| r.value).collect();
    let missing = frame.len() - vals.len();
    vals.sort_by(|a, b| a.total_cmp(b));

    let count = vals.len();
    let min = vals.first().cloned();
    let max = vals.last().cloned();
    let mean = if count > 0 {
        Some(vals.iter().copied().sum::<f64>() / count as f64)
    } else { None };
    let median = if count == 0 {
        None
    } else if count % 2 == 1 {
        Some(vals[count / 2])
    } else {
        Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
    };
    let first = frame.rows.iter().map(|r| r.date).min();
    let last = frame.rows.iter().map(|r| r.date).max();
    Summary { count, missing, min, max, mean, median, first, last }
}
