use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/*
Size of a component along one axis, as the server sees it. Only pixels and percentages travel
over the wire, the client never gets anything else.
 */
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Dimension {
    Undefined,
    Pixels(i32),
    Percent(f32),
}

impl Default for Dimension {
    fn default() -> Self {
        Dimension::Undefined
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DimensionError {
    #[error("unsupported unit in size \"{0}\", only px and % are accepted")]
    UnsupportedUnit(String),
    #[error("size \"{0}\" does not start with a number")]
    NotANumber(String),
    #[error("negative size \"{0}\"")]
    Negative(String),
}

impl Dimension {
    pub const FULL: Dimension = Dimension::Percent(100.0);

    pub fn is_defined(&self) -> bool {
        *self != Dimension::Undefined
    }

    pub fn is_relative(&self) -> bool {
        matches!(self, Dimension::Percent(_))
    }

    pub fn pixels(&self) -> Option<i32> {
        match self {
            Dimension::Pixels(px) => Some(*px),
            _ => None,
        }
    }

    pub fn percent(&self) -> Option<f32> {
        match self {
            Dimension::Percent(p) => Some(*p),
            _ => None,
        }
    }

    /*
    Empty string (and missing value) means undefined. A bare number is taken as pixels, and a
    fractional pixel value is truncated the same way the browser parses a computed pixel size.
     */
    pub fn parse(s: &str) -> Result<Dimension, DimensionError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Dimension::Undefined);
        }

        let (number, unit) = split_unit(trimmed);
        let value = f32::from_str(number)
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| DimensionError::NotANumber(s.to_string()))?;
        if value < 0.0 {
            return Err(DimensionError::Negative(s.to_string()));
        }

        match unit {
            "" | "px" => Ok(Dimension::Pixels(value as i32)),
            "%" => Ok(Dimension::Percent(value)),
            _ => Err(DimensionError::UnsupportedUnit(s.to_string())),
        }
    }

    /// Parses a pixel value like "170px" into a whole number of pixels.
    pub fn parse_pixels(s: &str) -> Option<i32> {
        match Dimension::parse(s) {
            Ok(Dimension::Pixels(px)) => Some(px),
            _ => None,
        }
    }
}

fn split_unit(s: &str) -> (&str, &str) {
    let idx = s
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.' || *c == '-' || *c == '+'))
        .map(|(idx, _)| idx)
        .unwrap_or(s.len());
    (&s[..idx], s[idx..].trim())
}

impl Display for Dimension {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Undefined => Ok(()),
            Dimension::Pixels(px) => write!(f, "{}px", px),
            Dimension::Percent(p) => write!(f, "{}%", p),
        }
    }
}

impl FromStr for Dimension {
    type Err = DimensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dimension::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pixels_and_percent() {
        assert_eq!(Dimension::parse("200px"), Ok(Dimension::Pixels(200)));
        assert_eq!(Dimension::parse("200"), Ok(Dimension::Pixels(200)));
        assert_eq!(Dimension::parse("12.7px"), Ok(Dimension::Pixels(12)));
        assert_eq!(Dimension::parse("50%"), Ok(Dimension::Percent(50.0)));
        assert_eq!(Dimension::parse(" 100 % "), Ok(Dimension::Percent(100.0)));
    }

    #[test]
    fn empty_is_undefined() {
        assert_eq!(Dimension::parse(""), Ok(Dimension::Undefined));
        assert_eq!(Dimension::parse("   "), Ok(Dimension::Undefined));
        assert_eq!(Dimension::Undefined.to_string(), "");
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(Dimension::parse("10em"), Err(DimensionError::UnsupportedUnit(_))));
        assert!(matches!(Dimension::parse("px"), Err(DimensionError::NotANumber(_))));
        assert!(matches!(Dimension::parse("-5px"), Err(DimensionError::Negative(_))));
        assert!(matches!(Dimension::parse("inf"), Err(DimensionError::NotANumber(_))));
        assert!(matches!(Dimension::parse("NaN%"), Err(DimensionError::NotANumber(_))));
    }

    #[test]
    fn overflowing_numbers_are_not_sizes() {
        let huge = format!("{}px", "9".repeat(45));
        assert!(matches!(Dimension::parse(&huge), Err(DimensionError::NotANumber(_))));
        assert!(matches!(Dimension::parse(&format!("{}%", "9".repeat(45))), Err(DimensionError::NotANumber(_))));
        assert_eq!(Dimension::parse_pixels(&huge), None);
    }

    #[test]
    fn display_matches_wire_format() {
        assert_eq!(Dimension::Pixels(170).to_string(), "170px");
        assert_eq!(Dimension::FULL.to_string(), "100%");
        assert_eq!(Dimension::Percent(33.5).to_string(), "33.5%");
    }
}
