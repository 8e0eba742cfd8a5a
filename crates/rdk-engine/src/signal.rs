use crate::types::{ConsolidationZone, Direction};

/// Which side of the zone the close is touching, if any.
///
/// - close <= zone low  => Long (buy the floor)
/// - close >= zone high => Short (sell the ceiling)
/// - strictly inside    => None
///
/// The branches are mutually exclusive because the zone has positive width;
/// long is checked first, matching the floor-before-ceiling precedence of
/// the decision table.
pub fn entry_side(close_micros: i64, zone: &ConsolidationZone) -> Option<Direction> {
    if close_micros <= zone.low_micros {
        Some(Direction::Long)
    } else if close_micros >= zone.high_micros {
        Some(Direction::Short)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZONE: ConsolidationZone = ConsolidationZone {
        low_micros: 100_000_000,
        high_micros: 101_000_000,
    };

    #[test]
    fn floor_touch_is_long() {
        assert_eq!(entry_side(100_000_000, &ZONE), Some(Direction::Long));
        assert_eq!(entry_side(99_500_000, &ZONE), Some(Direction::Long));
    }

    #[test]
    fn ceiling_touch_is_short() {
        assert_eq!(entry_side(101_000_000, &ZONE), Some(Direction::Short));
        assert_eq!(entry_side(102_000_000, &ZONE), Some(Direction::Short));
    }

    #[test]
    fn strictly_inside_is_no_action() {
        assert_eq!(entry_side(100_000_001, &ZONE), None);
        assert_eq!(entry_side(100_500_000, &ZONE), None);
        assert_eq!(entry_side(100_999_999, &ZONE), None);
    }
}
