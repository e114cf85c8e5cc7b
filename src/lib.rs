//! fred_rs
//!
//! A lightweight Rust library for retrieving FRED (Federal Reserve Economic Data)
//! time series and turning them into typed, analysis-ready values. Pairs with the
//! `fred` CLI.
//!
//! ### Features
//! - Fetch series metadata, observations, and search results over blocking HTTP
//! - Map the loosely-typed JSON into a `Series` of dated `Observation`s
//!   (the API's `"."` sentinel becomes a missing value; malformed entries are dropped)
//! - Tabulate a series as a date-keyed frame, summarize it, and write it as CSV or JSON
//!
//! ### Example
//! ```no_run
//! use fred_rs::{Client, Config, ObservationQuery, Series};
//!
//! let client = Client::new(Config::from_env())?;
//! let raw = client.fetch_series("GDP", &ObservationQuery::new().limit(20).to_params())?;
//! let series = Series::from_api_response(&raw);
//! let frame = fred_rs::series_to_frame(&series);
//! fred_rs::storage::write_csv(&frame, std::io::stdout())?;
//! println!("{:#?}", fred_rs::stats::summary(&frame));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod frame;
pub mod models;
pub mod query;
pub mod stats;
pub mod storage;

pub use api::{Client, NO_PARAMS, ShapeError, merge_series_response};
pub use config::Config;
pub use error::TransportError;
pub use frame::{SeriesFrame, series_to_frame};
pub use models::{Observation, Series, SeriesInfo, search_results};
pub use query::{Aggregation, Frequency, ObservationQuery, SearchQuery, SortOrder, Units};
