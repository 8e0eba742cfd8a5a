use crate::types::{BracketPrices, Direction};

/// Apply a multiplicative factor to a micro price, rounding to the nearest
/// micro. Factors come from validated config percentages, so the f64 detour
/// stays inside this function.
fn apply_factor(price_micros: i64, factor: f64) -> i64 {
    (price_micros as f64 * factor).round() as i64
}

/// Stop/target pair for an entry at `entry_micros`.
///
/// - Long:  stop = P * (1 - stop_loss_pct), target = P * (1 + take_profit_pct)
/// - Short: stop = P * (1 + stop_loss_pct), target = P * (1 - take_profit_pct)
///
/// Exit quantities are not computed here: closing orders are sized to
/// exactly flatten by the host, which is the only party that sees fills.
pub fn bracket_prices(
    entry_micros: i64,
    direction: Direction,
    stop_loss_pct: f64,
    take_profit_pct: f64,
) -> BracketPrices {
    match direction {
        Direction::Long => BracketPrices {
            stop_micros: apply_factor(entry_micros, 1.0 - stop_loss_pct),
            target_micros: apply_factor(entry_micros, 1.0 + take_profit_pct),
        },
        Direction::Short => BracketPrices {
            stop_micros: apply_factor(entry_micros, 1.0 + stop_loss_pct),
            target_micros: apply_factor(entry_micros, 1.0 - take_profit_pct),
        },
    }
}
