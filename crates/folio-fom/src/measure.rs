//! Measurements
//!
//! Form descriptions size widgets in absolute units ("10pt", "0.25in").
//! Stored parsed so layout never re-tokenizes attribute text.

use std::fmt;
use std::str::FromStr;

/// Measurement unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    In,
    Pt,
    Mm,
    Cm,
}

impl Unit {
    /// Canonical suffix used in attribute text
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::In => "in",
            Unit::Pt => "pt",
            Unit::Mm => "mm",
            Unit::Cm => "cm",
        }
    }
}

/// A sized value with its unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measure {
    pub value: f64,
    pub unit: Unit,
}

impl Measure {
    /// Measurement in points
    pub fn pt(value: f64) -> Self {
        Self {
            value,
            unit: Unit::Pt,
        }
    }

    /// Convert to points (1in = 72pt, 25.4mm = 1in)
    pub fn to_pt(self) -> f64 {
        match self.unit {
            Unit::Pt => self.value,
            Unit::In => self.value * 72.0,
            Unit::Mm => self.value * 72.0 / 25.4,
            Unit::Cm => self.value * 720.0 / 25.4,
        }
    }
}

/// Failed to parse a measurement string
#[derive(Debug, Clone, thiserror::Error)]
#[error("not a measurement: {0}")]
pub struct MeasureError(pub String);

impl FromStr for Measure {
    type Err = MeasureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let suffix_len = s
            .chars()
            .rev()
            .take_while(|c| c.is_ascii_alphabetic())
            .count();
        let (number, suffix) = s.split_at(s.len() - suffix_len);
        let unit = match suffix {
            // A bare number is taken as points
            "" | "pt" => Unit::Pt,
            "in" => Unit::In,
            "mm" => Unit::Mm,
            "cm" => Unit::Cm,
            _ => return Err(MeasureError(s.to_string())),
        };
        let value: f64 = number
            .trim()
            .parse()
            .map_err(|_| MeasureError(s.to_string()))?;
        Ok(Measure { value, unit })
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_units() {
        assert_eq!("10pt".parse::<Measure>().unwrap(), Measure::pt(10.0));
        assert_eq!(
            "0.25in".parse::<Measure>().unwrap(),
            Measure {
                value: 0.25,
                unit: Unit::In
            }
        );
        assert_eq!("12".parse::<Measure>().unwrap(), Measure::pt(12.0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("10px".parse::<Measure>().is_err());
        assert!("pt".parse::<Measure>().is_err());
        assert!("".parse::<Measure>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let m: Measure = "10pt".parse().unwrap();
        assert_eq!(m.to_string(), "10pt");
        let m: Measure = "0.25in".parse().unwrap();
        assert_eq!(m.to_string(), "0.25in");
    }

    #[test]
    fn test_to_pt() {
        let m: Measure = "1in".parse().unwrap();
        assert_eq!(m.to_pt(), 72.0);
    }
}
