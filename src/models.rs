use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Date layout used by the API for observation dates and query bounds.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Sentinel the API sends in place of a value when no data exists for a date.
pub const MISSING_VALUE: &str = ".";

/// One dated reading of a series. `value` is `None` where the API reported no data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// A named economic indicator and its observations, in the order the API returned them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub id: String,
    pub title: String,
    pub frequency: String,
    pub units: String,
    /// `Some("")` when the response has no `notes` key, `None` when it holds an explicit null.
    pub notes: Option<String>,
    pub observations: Vec<Observation>,
}

/// Why an observation entry was dropped. Only ever logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Skip {
    Date,
    Value,
}

impl Series {
    /// Build a `Series` from a combined metadata + observations response.
    ///
    /// Accepts both the direct fetch shape and a search result: metadata comes from the
    /// first element of `seriess`. Entries of `observations` whose date is not `YYYY-MM-DD`
    /// or whose value is neither `"."` nor a number are dropped; nothing here fails.
    ///
    /// ```
    /// use fred_rs::Series;
    /// let v = serde_json::json!({
    ///     "seriess": [{"id": "GDP", "title": "Gross Domestic Product"}],
    ///     "observations": [
    ///         {"date": "2023-01-01", "value": "25723.9"},
    ///         {"date": "2023-04-01", "value": "."}
    ///     ]
    /// });
    /// let s = Series::from_api_response(&v);
    /// assert_eq!(s.id, "GDP");
    /// assert_eq!(s.observations[0].value, Some(25723.9));
    /// assert_eq!(s.observations[1].value, None);
    /// ```
    pub fn from_api_response(response: &Value) -> Self {
        let first = response
            .get("seriess")
            .and_then(Value::as_array)
            .and_then(|arr| arr.first());
        let field = |name: &str| text_or_empty(first.and_then(|s| s.get(name)));

        let notes = match response.get("notes") {
            None => Some(String::new()),
            Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        };

        let observations = response
            .get("observations")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .enumerate()
                    .filter_map(|(i, entry)| match parse_observation(entry) {
                        Ok(obs) => Some(obs),
                        Err(reason) => {
                            log::trace!("dropping observation #{i} ({reason:?}): {entry}");
                            None
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            id: field("id"),
            title: field("title"),
            frequency: field("frequency"),
            units: field("units"),
            notes,
            observations,
        }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

fn text_or_empty(v: Option<&Value>) -> String {
    match v {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn parse_observation(entry: &Value) -> Result<Observation, Skip> {
    let date = entry
        .get("date")
        .and_then(Value::as_str)
        .and_then(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok())
        .ok_or(Skip::Date)?;
    let value = match entry.get("value") {
        Some(Value::String(s)) if s == MISSING_VALUE => None,
        Some(Value::String(s)) => Some(s.trim().parse::<f64>().map_err(|_| Skip::Value)?),
        Some(Value::Number(n)) => Some(n.as_f64().ok_or(Skip::Value)?),
        _ => return Err(Skip::Value),
    };
    Ok(Observation { date, value })
}

/// Metadata for one entry of a `seriess` array (series info or search hit).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesInfo {
    #[serde(default, deserialize_with = "de_string_or_null")]
    pub id: String,
    #[serde(default, deserialize_with = "de_string_or_null")]
    pub title: String,
    #[serde(default, deserialize_with = "de_string_or_null")]
    pub frequency: String,
    #[serde(default, deserialize_with = "de_string_or_null")]
    pub units: String,
    #[serde(default)]
    pub frequency_short: Option<String>,
    #[serde(default)]
    pub units_short: Option<String>,
    #[serde(default)]
    pub seasonal_adjustment: Option<String>,
    #[serde(default)]
    pub observation_start: Option<String>,
    #[serde(default)]
    pub observation_end: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub popularity: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Serde helper: same rules as the `Series` metadata fields. `null` is empty,
/// numbers and other non-string values are rendered as JSON text.
fn de_string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(text_or_empty(Some(&v)))
}

/// All entries of a response's `seriess` array, in order. Entries that do not fit
/// [`SeriesInfo`] are skipped.
pub fn search_results(response: &Value) -> Vec<SeriesInfo> {
    response
        .get("seriess")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(|v| SeriesInfo::deserialize(v).ok())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_json_values_are_accepted() {
        let obs = parse_observation(&json!({"date": "2020-01-01", "value": 3.5})).unwrap();
        assert_eq!(obs.value, Some(3.5));
    }

    #[test]
    fn skip_reason_distinguishes_date_and_value() {
        assert_eq!(
            parse_observation(&json!({"date": "2020/01/01", "value": "1"})),
            Err(Skip::Date)
        );
        assert_eq!(
            parse_observation(&json!({"date": "2020-01-01", "value": "abc"})),
            Err(Skip::Value)
        );
        assert_eq!(
            parse_observation(&json!({"date": "2020-01-01", "value": null})),
            Err(Skip::Value)
        );
        assert_eq!(parse_observation(&json!({"value": "1"})), Err(Skip::Date));
    }

    #[test]
    fn separators_and_booleans_are_not_numbers() {
        assert_eq!(
            parse_observation(&json!({"date": "2020-01-01", "value": "1_000"})),
            Err(Skip::Value)
        );
        assert_eq!(
            parse_observation(&json!({"date": "2020-01-01", "value": true})),
            Err(Skip::Value)
        );
        let obs = parse_observation(&json!({"date": "2020-01-01", "value": " 1e3 "})).unwrap();
        assert_eq!(obs.value, Some(1000.0));
    }

    #[test]
    fn search_hits_render_numeric_ids_like_series() {
        let v = json!({"seriess": [{"id": 42, "title": null, "units": "Percent"}]});
        let hits = search_results(&v);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, Series::from_api_response(&v).id);
        assert_eq!(hits[0].id, "42");
        assert_eq!(hits[0].title, "");
    }

    #[test]
    fn non_string_metadata_is_rendered_as_text() {
        let s = Series::from_api_response(&json!({"seriess": [{"id": 42, "title": null}]}));
        assert_eq!(s.id, "42");
        assert_eq!(s.title, "");
    }
}
