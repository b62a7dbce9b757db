use std::fmt;

/// Qualitative direction of change. `Negative < Neutral < Positive` is an
/// ordinal scale; `Ambiguous` sits outside it and marks a change that could
/// go either way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Negative,
    Neutral,
    Positive,
    Ambiguous,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Negative,
        Direction::Neutral,
        Direction::Positive,
        Direction::Ambiguous,
    ];

    /// Numeric sign of the ordinal directions. `Ambiguous` has none.
    pub const fn sign(self) -> Option<i8> {
        match self {
            Direction::Negative => Some(-1),
            Direction::Neutral => Some(0),
            Direction::Positive => Some(1),
            Direction::Ambiguous => None,
        }
    }

    pub const fn from_sign(value: i64) -> Direction {
        if value > 0 {
            Direction::Positive
        } else if value < 0 {
            Direction::Negative
        } else {
            Direction::Neutral
        }
    }

    /// Stable code used when building canonical state keys.
    pub const fn code(self) -> u8 {
        match self {
            Direction::Negative => 0,
            Direction::Neutral => 1,
            Direction::Positive => 2,
            Direction::Ambiguous => 3,
        }
    }

    pub const fn glyph(self) -> char {
        match self {
            Direction::Negative => '-',
            Direction::Neutral => '0',
            Direction::Positive => '+',
            Direction::Ambiguous => '?',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Sign of an Influence/Proportional relation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Correlation {
    Positive,
    Negative,
}

impl Correlation {
    pub const fn factor(self) -> i8 {
        match self {
            Correlation::Positive => 1,
            Correlation::Negative => -1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Correlation, Direction};

    #[test]
    fn sign_round_trips_through_from_sign() {
        for dir in [Direction::Negative, Direction::Neutral, Direction::Positive] {
            let sign = dir.sign().unwrap();
            assert_eq!(Direction::from_sign(sign as i64), dir);
        }
        assert_eq!(Direction::Ambiguous.sign(), None);
    }

    #[test]
    fn from_sign_collapses_magnitudes() {
        assert_eq!(Direction::from_sign(123), Direction::Positive);
        assert_eq!(Direction::from_sign(-123), Direction::Negative);
        assert_eq!(Direction::from_sign(0), Direction::Neutral);
    }

    #[test]
    fn codes_are_distinct_and_stable() {
        let codes: Vec<u8> = Direction::ALL.iter().map(|d| d.code()).collect();
        assert_eq!(codes, vec![0, 1, 2, 3]);
    }

    #[test]
    fn correlation_factor_flips_sign() {
        assert_eq!(Correlation::Positive.factor(), 1);
        assert_eq!(Correlation::Negative.factor(), -1);
    }
}
