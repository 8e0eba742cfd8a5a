//! rdk-schemas
//!
//! Serde DTOs for the engine's edges: raw CSV bar rows on the way in,
//! intent records and replay reports on the way out. Prices cross the
//! boundary as decimal strings and are converted to integer micros here,
//! so no floating point is introduced at the data edge.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use rdk_engine::OrderIntent;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors produced while converting boundary DTOs into engine values.
#[derive(Debug, PartialEq, Eq)]
pub enum SchemaError {
    /// A price string was empty.
    EmptyPrice { field: &'static str },
    /// A price string could not be parsed as a decimal number.
    InvalidPrice { field: &'static str, raw: String },
    /// A price had more than 6 decimal places (ambiguous micro conversion).
    TooManyDecimalPlaces { field: &'static str, raw: String },
    /// High/low/close relationships are inconsistent.
    OhlcViolation(String),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::EmptyPrice { field } => {
                write!(f, "price field '{field}' is empty")
            }
            SchemaError::InvalidPrice { field, raw } => {
                write!(f, "price field '{field}' could not be parsed: '{raw}'")
            }
            SchemaError::TooManyDecimalPlaces { field, raw } => {
                write!(
                    f,
                    "price field '{field}' has more than 6 decimal places \
                     (ambiguous micro conversion): '{raw}'"
                )
            }
            SchemaError::OhlcViolation(msg) => {
                write!(f, "OHLC sanity violation: {msg}")
            }
        }
    }
}

impl std::error::Error for SchemaError {}

// ---------------------------------------------------------------------------
// Price conversion
// ---------------------------------------------------------------------------

/// Convert a decimal price string (e.g. `"182.34"`) into integer micros.
///
/// Pure string arithmetic — no `f64` round trip. At most 6 decimal places;
/// an optional leading `+` is accepted, negative prices are not.
pub fn price_str_to_micros(field: &'static str, raw: &str) -> Result<i64, SchemaError> {
    let invalid = || SchemaError::InvalidPrice {
        field,
        raw: raw.to_string(),
    };

    // Sign first, before any digit handling: "-0.5" must not slip through
    // as a zero integer part with a positive fraction.
    let t = raw.trim();
    if t.starts_with('-') {
        return Err(invalid());
    }
    let s = t.strip_prefix('+').unwrap_or(t);
    if s.is_empty() {
        return Err(SchemaError::EmptyPrice { field });
    }

    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, f),
        None => (s, ""),
    };
    if frac_part.len() > 6 {
        return Err(SchemaError::TooManyDecimalPlaces {
            field,
            raw: raw.to_string(),
        });
    }
    // Both parts must be pure ASCII digits; parse() alone would still admit
    // an embedded sign in the fraction.
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }
    if int_part.is_empty() && frac_part.is_empty() {
        // A bare "." carries no digits at all.
        return Err(invalid());
    }

    let int_val: i64 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().map_err(|_| invalid())?
    };

    let frac_val: i64 = if frac_part.is_empty() {
        0
    } else {
        // Right-pad to 6 digits: "34" -> 340000 micros.
        let padded = format!("{frac_part:0<6}");
        padded.parse().map_err(|_| invalid())?
    };

    int_val
        .checked_mul(1_000_000)
        .and_then(|v| v.checked_add(frac_val))
        .ok_or_else(invalid)
}

// ---------------------------------------------------------------------------
// CSV bar row
// ---------------------------------------------------------------------------

/// A single OHLCV row as decoded from a CSV fixture or export.
///
/// Prices remain `String` until [`CsvBarRow::to_engine_bar`] applies the
/// canonical micro conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvBarRow {
    pub symbol: String,
    /// UTC epoch seconds of the bar end.
    pub end_ts: i64,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: i64,
    pub is_complete: bool,
}

impl CsvBarRow {
    /// Convert to the engine's bar type, validating the HLC ordering.
    pub fn to_engine_bar(&self) -> Result<rdk_engine::Bar, SchemaError> {
        let high = price_str_to_micros("high", &self.high)?;
        let low = price_str_to_micros("low", &self.low)?;
        let close = price_str_to_micros("close", &self.close)?;

        if low > high {
            return Err(SchemaError::OhlcViolation(format!(
                "low {low} > high {high} at end_ts {}",
                self.end_ts
            )));
        }
        if close < low || close > high {
            return Err(SchemaError::OhlcViolation(format!(
                "close {close} outside [{low}, {high}] at end_ts {}",
                self.end_ts
            )));
        }

        Ok(rdk_engine::Bar::new(
            self.end_ts,
            high,
            low,
            close,
            self.is_complete,
        ))
    }
}

// ---------------------------------------------------------------------------
// Intent records
// ---------------------------------------------------------------------------

/// Serialisable mirror of an engine order intent, for replay output and
/// artifacts. Tagged so JSON consumers can dispatch on `kind`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntentRecord {
    SetAllocation { symbol: String, fraction_bps: i32 },
    PlaceStop { symbol: String, trigger_micros: i64 },
    PlaceLimitExit { symbol: String, limit_micros: i64 },
    LiquidateAll { symbol: String },
}

impl From<&OrderIntent> for IntentRecord {
    fn from(intent: &OrderIntent) -> Self {
        match intent {
            OrderIntent::SetAllocation {
                symbol,
                fraction_bps,
            } => IntentRecord::SetAllocation {
                symbol: symbol.clone(),
                fraction_bps: *fraction_bps,
            },
            OrderIntent::PlaceStop {
                symbol,
                trigger_micros,
            } => IntentRecord::PlaceStop {
                symbol: symbol.clone(),
                trigger_micros: *trigger_micros,
            },
            OrderIntent::PlaceLimitExit {
                symbol,
                limit_micros,
            } => IntentRecord::PlaceLimitExit {
                symbol: symbol.clone(),
                limit_micros: *limit_micros,
            },
            OrderIntent::LiquidateAll { symbol } => IntentRecord::LiquidateAll {
                symbol: symbol.clone(),
            },
        }
    }
}

/// Summary artifact for one replay run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayReport {
    pub run_id: Uuid,
    pub generated_at_utc: DateTime<Utc>,
    pub config_hash: String,
    pub symbol: String,
    pub bars_processed: usize,
    pub bars_skipped: usize,
    pub intents: Vec<IntentRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_conversion_pads_fraction_to_micros() {
        assert_eq!(price_str_to_micros("close", "182.34").unwrap(), 182_340_000);
        assert_eq!(price_str_to_micros("close", "100").unwrap(), 100_000_000);
        assert_eq!(price_str_to_micros("close", "0.000001").unwrap(), 1);
    }

    #[test]
    fn price_conversion_rejects_ambiguous_or_bad_input() {
        assert!(matches!(
            price_str_to_micros("close", "1.0000001"),
            Err(SchemaError::TooManyDecimalPlaces { .. })
        ));
        assert!(matches!(
            price_str_to_micros("close", ""),
            Err(SchemaError::EmptyPrice { .. })
        ));
        assert!(matches!(
            price_str_to_micros("close", "abc"),
            Err(SchemaError::InvalidPrice { .. })
        ));
        assert!(matches!(
            price_str_to_micros("close", "-3.5"),
            Err(SchemaError::InvalidPrice { .. })
        ));
    }

    #[test]
    fn price_conversion_rejects_negative_fraction_with_zero_integer() {
        // "-0" parses to 0, so a value check on the integer part alone
        // would silently flip the sign of the fraction.
        assert!(matches!(
            price_str_to_micros("low", "-0.5"),
            Err(SchemaError::InvalidPrice { .. })
        ));
        assert!(matches!(
            price_str_to_micros("low", "-.5"),
            Err(SchemaError::InvalidPrice { .. })
        ));
        // A sign embedded in the fraction is not a digit.
        assert!(matches!(
            price_str_to_micros("low", "1.+5"),
            Err(SchemaError::InvalidPrice { .. })
        ));
        assert!(matches!(
            price_str_to_micros("low", "."),
            Err(SchemaError::InvalidPrice { .. })
        ));
    }

    #[test]
    fn csv_row_converts_and_validates_hlc() {
        let row = CsvBarRow {
            symbol: "SPY".to_string(),
            end_ts: 1000,
            open: "100.50".to_string(),
            high: "101.00".to_string(),
            low: "100.00".to_string(),
            close: "100.75".to_string(),
            volume: 1_000_000,
            is_complete: true,
        };
        let bar = row.to_engine_bar().unwrap();
        assert_eq!(bar.high_micros, 101_000_000);
        assert_eq!(bar.low_micros, 100_000_000);
        assert_eq!(bar.close_micros, 100_750_000);

        let bad = CsvBarRow {
            close: "102.00".to_string(),
            ..row
        };
        assert!(matches!(
            bad.to_engine_bar(),
            Err(SchemaError::OhlcViolation(_))
        ));
    }
}
