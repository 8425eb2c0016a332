//! Lengths with units, and conversion between absolute units.

use std::fmt;

use cssparser::{Parser, ParserInput, Token};

use super::enum_property;

const POINTS_PER_IN: f64 = 72.0;
const POINTS_PER_PC: f64 = 12.0;
const POINTS_PER_PX: f64 = 0.75;
const POINTS_PER_CM: f64 = POINTS_PER_IN / 2.54;
const POINTS_PER_MM: f64 = POINTS_PER_CM / 10.0;

enum_property! {
    /// Length unit.
    pub enum Units {
        In => "in",
        Cm => "cm",
        Mm => "mm",
        Pt => "pt",
        Pc => "pc",
        Px => "px",
        Pct => "%",
    }
}

impl Units {
    /// Size of one unit in points. `None` for percentages.
    pub fn points(self) -> Option<f64> {
        match self {
            Units::In => Some(POINTS_PER_IN),
            Units::Cm => Some(POINTS_PER_CM),
            Units::Mm => Some(POINTS_PER_MM),
            Units::Pt => Some(1.0),
            Units::Pc => Some(POINTS_PER_PC),
            Units::Px => Some(POINTS_PER_PX),
            Units::Pct => None,
        }
    }

    /// Convert `value` between two absolute units.
    pub fn convert(value: f64, from: Units, to: Units) -> Option<f64> {
        if from == to {
            return Some(value);
        }
        Some(value * from.points()? / to.points()?)
    }
}

/// A numeric length such as `12pt` or `50%`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CssLength {
    pub value: f64,
    pub units: Units,
}

impl CssLength {
    pub fn new(value: f64, units: Units) -> Self {
        Self { value, units }
    }

    /// Parse a length. Returns `None` for unitless numbers, unknown units and
    /// anything that is not a single dimension or percentage.
    pub fn parse(text: &str) -> Option<Self> {
        let mut input = ParserInput::new(text);
        let mut parser = Parser::new(&mut input);
        let length = match parser.next().ok()? {
            Token::Dimension { value, unit, .. } => {
                CssLength::new(f64::from(*value), Units::from_css(unit)?)
            }
            Token::Percentage { unit_value, .. } => {
                CssLength::new(f64::from(*unit_value) * 100.0, Units::Pct)
            }
            _ => return None,
        };
        parser.expect_exhausted().ok()?;
        Some(length)
    }

    pub fn is_percentage(&self) -> bool {
        self.units == Units::Pct
    }

    pub fn is_absolute(&self) -> bool {
        !self.is_percentage()
    }

    /// Resolve to `units`, taking percentages relative to `total` (which is
    /// already in `units`).
    pub fn to_absolute(&self, total: f64, units: Units) -> f64 {
        match self.units {
            Units::Pct => self.value / 100.0 * total,
            from => Units::convert(self.value, from, units).unwrap_or(0.0),
        }
    }

    /// Resolve to points, taking percentages relative to `total` points.
    pub fn to_pts(&self, total: f64) -> f64 {
        self.to_absolute(total, Units::Pt)
    }
}

impl fmt::Display for CssLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.units)
    }
}
