//! Physical dimensions as exponent vectors over the seven SI base units.
//!
//! Field files carry their unit in a `dimensions` entry written as
//! `[m l t T n I J]`: mass, length, time, temperature, amount of substance,
//! electric current and luminous intensity.

use crate::error::{CoreError, CoreResult};
use core::fmt;
use core::str::FromStr;

/// SI exponent vector of a physical quantity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dimension {
    pub mass: i32,
    pub length: i32,
    pub time: i32,
    pub temperature: i32,
    pub moles: i32,
    pub current: i32,
    pub luminous: i32,
}

impl Dimension {
    pub const DIMENSIONLESS: Dimension = Dimension::new([0; 7]);

    /// Build from exponents in `[m l t T n I J]` order.
    pub const fn new(exponents: [i32; 7]) -> Self {
        let [mass, length, time, temperature, moles, current, luminous] = exponents;
        Self {
            mass,
            length,
            time,
            temperature,
            moles,
            current,
            luminous,
        }
    }

    /// Parse the bracketed form, e.g. `[0 2 -2 0 0 0 0]`.
    ///
    /// Padding inside the brackets is accepted (`[ 0 2 -2 0 0 0 0 ]`), which is
    /// how `foamDictionary -value` prints it.
    pub fn from_bracketed(text: &str) -> CoreResult<Self> {
        let invalid = |reason: &str| CoreError::InvalidDimension {
            text: text.to_string(),
            reason: reason.to_string(),
        };

        let inner = text
            .trim()
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .ok_or_else(|| invalid("expected '[' ... ']'"))?;

        let mut exponents = [0_i32; 7];
        let mut count = 0;
        for token in inner.split_whitespace() {
            if count == exponents.len() {
                return Err(invalid("more than seven exponents"));
            }
            exponents[count] = token
                .parse()
                .map_err(|_| invalid(&format!("'{token}' is not an integer")))?;
            count += 1;
        }
        if count != exponents.len() {
            return Err(invalid(&format!("expected 7 exponents, found {count}")));
        }

        Ok(Self::new(exponents))
    }

    /// Exponents in `[m l t T n I J]` order.
    pub const fn exponents(&self) -> [i32; 7] {
        [
            self.mass,
            self.length,
            self.time,
            self.temperature,
            self.moles,
            self.current,
            self.luminous,
        ]
    }

    pub fn is_dimensionless(&self) -> bool {
        *self == Self::DIMENSIONLESS
    }
}

const NAMES: [&str; 7] = [
    "mass",
    "length",
    "time",
    "temperature",
    "moles",
    "current",
    "luminous",
];

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [m, l, t, tt, n, i, j] = self.exponents();
        write!(f, "[{m} {l} {t} {tt} {n} {i} {j}]")
    }
}

impl fmt::Debug for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = NAMES
            .iter()
            .zip(self.exponents())
            .filter(|(_, e)| *e != 0)
            .map(|(name, e)| format!("{name}={e}"))
            .collect();
        write!(f, "Dimension({})", parts.join(", "))
    }
}

impl FromStr for Dimension {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bracketed(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn kinematic_pressure_round_trips() {
        let dim = Dimension::from_bracketed("[0 2 -2 0 0 0 0]").unwrap();
        assert_eq!(dim.length, 2);
        assert_eq!(dim.time, -2);
        assert_eq!(dim.to_string(), "[0 2 -2 0 0 0 0]");
    }

    #[test]
    fn padded_brackets_accepted() {
        let dim: Dimension = "  [ 0 2 -1 0 0 0 0 ] ".parse().unwrap();
        assert_eq!(dim, Dimension::new([0, 2, -1, 0, 0, 0, 0]));
    }

    #[test]
    fn wrong_shapes_rejected() {
        for text in [
            "0 2 -2 0 0 0 0",
            "[0 2 -2 0 0 0]",
            "[0 2 -2 0 0 0 0 0]",
            "[0 2 x 0 0 0 0]",
            "[0, 2, -2, 0, 0, 0, 0]",
            "",
        ] {
            let err = Dimension::from_bracketed(text).unwrap_err();
            assert!(matches!(err, CoreError::InvalidDimension { .. }), "{text}");
        }
    }

    #[test]
    fn debug_lists_nonzero_exponents_only() {
        let dim = Dimension::new([0, 1, -1, 0, 0, 0, 0]);
        assert_eq!(format!("{dim:?}"), "Dimension(length=1, time=-1)");
        assert!(Dimension::DIMENSIONLESS.is_dimensionless());
    }

    proptest! {
        #[test]
        fn display_then_parse_is_identity(exps in proptest::array::uniform7(-8_i32..8)) {
            let dim = Dimension::new(exps);
            let text = dim.to_string();
            let back = Dimension::from_bracketed(&text).unwrap();
            prop_assert_eq!(back, dim);
            prop_assert_eq!(back.to_string(), text);
        }
    }
}
