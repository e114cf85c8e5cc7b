use crate::frame::SeriesFrame;
use crate::models::{DATE_FORMAT, Series};
use anyhow::Result;
use csv::WriterBuilder;
use std::io::Write;

/// Write a frame as CSV with a `date,value` header. Missing values become empty cells.
pub fn write_csv<W: Write>(frame: &SeriesFrame, out: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(out);
    wtr.write_record(["date", "value"])?;
    for r in &frame.rows {
        wtr.serialize((r.date.format(DATE_FORMAT).to_string(), r.value))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write a series (metadata and observations) as pretty JSON.
pub fn write_json<W: Write>(series: &Series, mut out: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, series)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}
