//! Typed producers of the optional query parameters accepted by the
//! observations and search endpoints. Every client method also takes raw
//! `(key, value)` pairs; these builders only spell the common ones.

use crate::models::DATE_FORMAT;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Resampling frequency for observations (`frequency=`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Semiannual,
    Annual,
}

impl Frequency {
    pub fn code(self) -> &'static str {
        match self {
            Frequency::Daily => "d",
            Frequency::Weekly => "w",
            Frequency::Biweekly => "bw",
            Frequency::Monthly => "m",
            Frequency::Quarterly => "q",
            Frequency::Semiannual => "sa",
            Frequency::Annual => "a",
        }
    }
}

/// Value transformation applied server-side (`units=`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Units {
    /// Levels, no transformation
    Levels,
    Change,
    ChangeFromYearAgo,
    PercentChange,
    PercentChangeFromYearAgo,
    CompoundedAnnualRate,
    ContinuouslyCompoundedRate,
    ContinuouslyCompoundedAnnualRate,
    NaturalLog,
}

impl Units {
    pub fn code(self) -> &'static str {
        match self {
            Units::Levels => "lin",
            Units::Change => "chg",
            Units::ChangeFromYearAgo => "ch1",
            Units::PercentChange => "pch",
            Units::PercentChangeFromYearAgo => "pc1",
            Units::CompoundedAnnualRate => "pca",
            Units::ContinuouslyCompoundedRate => "cch",
            Units::ContinuouslyCompoundedAnnualRate => "cca",
            Units::NaturalLog => "log",
        }
    }
}

/// How values are combined when `frequency` lowers the resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Aggregation {
    Average,
    Sum,
    EndOfPeriod,
}

impl Aggregation {
    pub fn code(self) -> &'static str {
        match self {
            Aggregation::Average => "avg",
            Aggregation::Sum => "sum",
            Aggregation::EndOfPeriod => "eop",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn code(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

macro_rules! code_enum_traits {
    ($ty:ty, [$($variant:expr),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_ascii_lowercase();
                [$($variant),+]
                    .into_iter()
                    .find(|v: &$ty| v.code() == wanted)
                    .ok_or_else(|| {
                        let codes: Vec<&str> = [$($variant),+].iter().map(|v| v.code()).collect();
                        format!("unknown code {:?}, expected one of {}", s, codes.join(", "))
                    })
            }
        }
    };
}

code_enum_traits!(
    Frequency,
    [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Biweekly,
        Frequency::Monthly,
        Frequency::Quarterly,
        Frequency::Semiannual,
        Frequency::Annual,
    ]
);
code_enum_traits!(
    Units,
    [
        Units::Levels,
        Units::Change,
        Units::ChangeFromYearAgo,
        Units::PercentChange,
        Units::PercentChangeFromYearAgo,
        Units::CompoundedAnnualRate,
        Units::ContinuouslyCompoundedRate,
        Units::ContinuouslyCompoundedAnnualRate,
        Units::NaturalLog,
    ]
);
code_enum_traits!(
    Aggregation,
    [Aggregation::Average, Aggregation::Sum, Aggregation::EndOfPeriod]
);
code_enum_traits!(SortOrder, [SortOrder::Asc, SortOrder::Desc]);

/// Extra parameters for the observations endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub frequency: Option<Frequency>,
    pub units: Option<Units>,
    pub aggregation: Option<Aggregation>,
    pub sort_order: Option<SortOrder>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ObservationQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(mut self, date: NaiveDate) -> Self {
        self.start = Some(date);
        self
    }

    pub fn end(mut self, date: NaiveDate) -> Self {
        self.end = Some(date);
        self
    }

    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    pub fn units(mut self, units: Units) -> Self {
        self.units = Some(units);
        self
    }

    pub fn aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = Some(aggregation);
        self
    }

    pub fn sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = Some(order);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Parameters in a stable order; unset fields are omitted.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        let mut push = |k: &str, v: String| out.push((k.to_string(), v));
        if let Some(d) = self.start {
            push("observation_start", d.format(DATE_FORMAT).to_string());
        }
        if let Some(d) = self.end {
            push("observation_end", d.format(DATE_FORMAT).to_string());
        }
        if let Some(f) = self.frequency {
            push("frequency", f.to_string());
        }
        if let Some(u) = self.units {
            push("units", u.to_string());
        }
        if let Some(a) = self.aggregation {
            push("aggregation_method", a.to_string());
        }
        if let Some(o) = self.sort_order {
            push("sort_order", o.to_string());
        }
        if let Some(n) = self.limit {
            push("limit", n.to_string());
        }
        if let Some(n) = self.offset {
            push("offset", n.to_string());
        }
        out
    }
}

/// Extra parameters for the search endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    /// e.g. `popularity`, `search_rank`, `last_updated`
    pub order_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    /// `full_text` (API default) or `series_id`
    pub search_type: Option<String>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn order_by(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some(field.into());
        self
    }

    pub fn sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = Some(order);
        self
    }

    pub fn search_type(mut self, kind: impl Into<String>) -> Self {
        self.search_type = Some(kind.into());
        self
    }

    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        if let Some(n) = self.limit {
            out.push(("limit".to_string(), n.to_string()));
        }
        if let Some(n) = self.offset {
            out.push(("offset".to_string(), n.to_string()));
        }
        if let Some(f) = &self.order_by {
            out.push(("order_by".to_string(), f.clone()));
        }
        if let Some(o) = self.sort_order {
            out.push(("sort_order".to_string(), o.to_string()));
        }
        if let Some(t) = &self.search_type {
            out.push(("search_type".to_string(), t.clone()));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observation_query_formats_dates_and_codes() {
        let q = ObservationQuery::new()
            .start(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap())
            .frequency(Frequency::Annual)
            .units(Units::PercentChangeFromYearAgo)
            .limit(5);
        assert_eq!(
            q.to_params(),
            vec![
                ("observation_start".to_string(), "2020-01-01".to_string()),
                ("frequency".to_string(), "a".to_string()),
                ("units".to_string(), "pc1".to_string()),
                ("limit".to_string(), "5".to_string()),
            ]
        );
    }

    #[test]
    fn empty_queries_produce_no_params() {
        assert!(ObservationQuery::new().to_params().is_empty());
        assert!(SearchQuery::new().to_params().is_empty());
    }

    #[test]
    fn codes_parse_case_insensitively() {
        assert_eq!("Q".parse::<Frequency>(), Ok(Frequency::Quarterly));
        assert_eq!("pch".parse::<Units>(), Ok(Units::PercentChange));
        assert_eq!("eop".parse::<Aggregation>(), Ok(Aggregation::EndOfPeriod));
        assert!("quarterly".parse::<Frequency>().is_err());
    }
}
