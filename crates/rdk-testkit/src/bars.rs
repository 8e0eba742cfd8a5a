use std::path::Path;

use anyhow::{Context, Result};

use rdk_engine::Bar;
use rdk_schemas::CsvBarRow;

/// `n` complete bars trading inside `[low_micros, high_micros]`, closing
/// mid-band. The first bar prints the band's exact low and high so the
/// window extremes are the band bounds.
pub fn band_bars(n: usize, low_micros: i64, high_micros: i64, start_ts: i64, step_secs: i64) -> Vec<Bar> {
    let mid = (low_micros + high_micros) / 2;
    (0..n)
        .map(|i| {
            let squeeze = if i == 0 { 0 } else { (high_micros - low_micros) / 10 };
            Bar::new(
                start_ts + step_secs * i as i64,
                high_micros - squeeze,
                low_micros + squeeze,
                mid,
                true,
            )
        })
        .collect()
}

/// Load bar rows from a CSV file.
///
/// Column contract (header required, order-independent):
/// `symbol,end_ts,open,high,low,close,volume,is_complete` — prices as
/// decimal strings, `is_complete` as `true`/`false`.
pub fn load_bars_csv(path: &Path) -> Result<Vec<CsvBarRow>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read bars csv: {}", path.display()))?;
    load_bars_csv_str(&raw)
}

/// Load bar rows from in-memory CSV text (tests without a filesystem).
pub fn load_bars_csv_str(src: &str) -> Result<Vec<CsvBarRow>> {
    let mut rdr = csv::Reader::from_reader(src.as_bytes());
    let mut rows = Vec::new();
    for (i, rec) in rdr.deserialize::<CsvBarRow>().enumerate() {
        let row = rec.with_context(|| format!("bars csv row {}", i + 1))?;
        rows.push(row);
    }
    Ok(rows)
}
