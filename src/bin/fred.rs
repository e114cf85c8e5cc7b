use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use fred_rs::models::DATE_FORMAT;
use fred_rs::{Client, Config, Frequency, ObservationQuery, SearchQuery, Series, Units};
use fred_rs::{search_results, series_to_frame, stats, storage};

#[derive(Parser, Debug)]
#[command(
    name = "fred",
    version,
    about = "Fetch, tabulate & summarize FRED economic time series"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the raw metadata JSON of a series.
    Info {
        /// Series id (e.g., GDP, UNRATE)
        series_id: String,
    },
    /// Fetch observations and print them as a table, CSV, or JSON.
    Series(SeriesArgs),
    /// Search series by free text.
    Search(SearchArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Table,
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct SeriesArgs {
    /// Series id (e.g., GDP, UNRATE)
    series_id: String,
    /// First observation date (YYYY-MM-DD)
    #[arg(long)]
    start: Option<String>,
    /// Last observation date (YYYY-MM-DD)
    #[arg(long)]
    end: Option<String>,
    /// Maximum number of observations.
    #[arg(long)]
    limit: Option<u32>,
    /// Resample to a lower frequency (d, w, bw, m, q, sa, a).
    #[arg(long)]
    frequency: Option<Frequency>,
    /// Server-side transformation (lin, chg, ch1, pch, pc1, pca, cch, cca, log).
    #[arg(long)]
    units: Option<Units>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutFormat::Table)]
    format: OutFormat,
    /// Print summary statistics to stderr.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Search text (e.g., "unemployment rate")
    text: String,
    /// Maximum number of results.
    #[arg(long, default_value_t = 20)]
    limit: u32,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 4 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn parse_date(flag: &str, s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .with_context(|| format!("invalid --{}, expected YYYY-MM-DD", flag))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let client = Client::new(Config::from_env())?;
    match cli.cmd {
        Command::Info { series_id } => {
            let v = client.fetch_series_info(&series_id)?;
            println!("{}", serde_json::to_string_pretty(&v)?);
            Ok(())
        }
        Command::Series(args) => cmd_series(&client, args),
        Command::Search(args) => cmd_search(&client, args),
    }
}

fn cmd_series(client: &Client, args: SeriesArgs) -> Result<()> {
    let mut query = ObservationQuery::new();
    if let Some(s) = &args.start {
        query = query.start(parse_date("start", s)?);
    }
    if let Some(s) = &args.end {
        query = query.end(parse_date("end", s)?);
    }
    if let Some(n) = args.limit {
        query = query.limit(n);
    }
    if let Some(f) = args.frequency {
        query = query.frequency(f);
    }
    if let Some(u) = args.units {
        query = query.units(u);
    }

    let raw = client
        .fetch_series(&args.series_id, &query.to_params())
        .with_context(|| format!("fetch series {}", args.series_id))?;
    let series = Series::from_api_response(&raw);
    let frame = series_to_frame(&series);

    let stdout = std::io::stdout();
    match args.format {
        OutFormat::Csv => storage::write_csv(&frame, stdout.lock())?,
        OutFormat::Json => storage::write_json(&series, stdout.lock())?,
        OutFormat::Table => {
            println!("{} - {}", series.id, series.title);
            println!("{} | {}", series.frequency, series.units);
            for r in &frame.rows {
                println!("{}  {:>14}", r.date.format(DATE_FORMAT), fmt_opt(r.value));
            }
        }
    }

    if args.stats {
        let s = stats::summary(&frame);
        let span = match (s.first, s.last) {
            (Some(a), Some(b)) => format!("{}..{}", a, b),
            _ => "empty".to_string(),
        };
        eprintln!(
            "{}  {}  count={} missing={}  min={} max={} mean={} median={}",
            series.id,
            span,
            s.count,
            s.missing,
            fmt_opt(s.min),
            fmt_opt(s.max),
            fmt_opt(s.mean),
            fmt_opt(s.median)
        );
    }

    Ok(())
}

fn cmd_search(client: &Client, args: SearchArgs) -> Result<()> {
    let query = SearchQuery::new().limit(args.limit);
    let raw = client
        .search_series(&args.text, &query.to_params())
        .with_context(|| format!("search {:?}", args.text))?;
    let hits = search_results(&raw);
    if hits.is_empty() {
        eprintln!("No series match {:?}", args.text);
    }
    for h in hits {
        println!("{:<20} {:<10} {:<30} {}", h.id, h.frequency, h.units, h.title);
    }
    Ok(())
}
