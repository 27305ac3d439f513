//! # Route
//!
//! A compiled route is a list of leg commands, one per straight segment
//! between consecutive waypoints. The robot controller consumes them as text,
//! five lines per leg:
//!
//! ```text
//! turn
//! heading
//! direction
//! distance
//! function
//! ```
//!
//! with heading and distance rounded to whole degrees and millimeters.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::convert::TryFrom;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::points::Direction;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Number of lines in one leg record.
pub const LINES_PER_LEG: usize = 5;

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// Motion command for a single leg of the route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegCmd {
    /// Which way to turn before driving the leg.
    pub turn: Turn,

    /// Heading to drive the leg at, accounting for the direction.
    ///
    /// Units: degrees, in (-180, 180]
    pub heading_deg: f64,

    /// Whether the leg is driven forwards or backwards.
    pub direction: Direction,

    /// Length of the leg.
    ///
    /// Units: millimeters
    pub distance_mm: f64,

    /// Function code to execute on this leg.
    pub function: u32,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Sign of the turn made at the start of a leg, serialised as `-1`, `0` or `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Turn {
    Anticlockwise,
    None,
    Clockwise,
}

/// Errors raised while parsing route text.
#[derive(Debug, Error)]
pub enum RouteFormatError {
    #[error("Route text ends part way through leg {leg} ({lines} of 5 lines)")]
    TruncatedLeg { leg: usize, lines: usize },

    #[error("Line {line} of the route is not an integer: {value:?}")]
    NotAnInteger { line: usize, value: String },

    #[error("Line {line} of the route has an invalid turn: {value}")]
    InvalidTurn { line: usize, value: i64 },

    #[error("Line {line} of the route has an invalid direction: {value}")]
    InvalidDirection { line: usize, value: i64 },

    #[error("Line {line} of the route has a negative function code: {value}")]
    InvalidFunction { line: usize, value: i64 },
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl Turn {
    /// Build a turn from the sign of a rotation, `0` being no turn.
    pub fn from_sign(sign: i8) -> Self {
        if sign > 0 {
            Turn::Clockwise
        } else if sign < 0 {
            Turn::Anticlockwise
        } else {
            Turn::None
        }
    }

    pub fn as_i8(self) -> i8 {
        match self {
            Turn::Anticlockwise => -1,
            Turn::None => 0,
            Turn::Clockwise => 1,
        }
    }

    /// The turn in the other rotational direction.
    pub fn reversed(self) -> Self {
        Self::from_sign(-self.as_i8())
    }
}

impl From<Turn> for i8 {
    fn from(t: Turn) -> Self {
        t.as_i8()
    }
}

impl TryFrom<i8> for Turn {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 | 0 | 1 => Ok(Self::from_sign(value)),
            v => Err(format!("Expected a turn of -1, 0 or 1, found {}", v)),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Render the route in the controller's text format.
///
/// An empty route renders as an empty string.
pub fn route_to_text(legs: &[LegCmd]) -> String {
    let mut text = String::new();

    for leg in legs {
        text.push_str(&format!(
            "{}\n{}\n{}\n{}\n{}\n",
            leg.turn.as_i8(),
            round_half_up(leg.heading_deg),
            leg.direction.as_i8(),
            round_half_up(leg.distance_mm),
            leg.function
        ));
    }

    text.trim().to_string()
}

/// Parse the controller's text format back into leg commands.
///
/// Blank lines are ignored, so records may be separated by an empty line.
pub fn parse_route_text(text: &str) -> Result<Vec<LegCmd>, RouteFormatError> {
    // Keep the 1-based line numbers for error reporting
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty())
        .collect();

    let mut legs = Vec::with_capacity(lines.len() / LINES_PER_LEG);

    for (leg, record) in lines.chunks(LINES_PER_LEG).enumerate() {
        if record.len() != LINES_PER_LEG {
            return Err(RouteFormatError::TruncatedLeg {
                leg,
                lines: record.len(),
            });
        }

        let mut fields = [0i64; LINES_PER_LEG];
        for (field, (line, value)) in fields.iter_mut().zip(record.iter()) {
            *field = value
                .parse()
                .map_err(|_| RouteFormatError::NotAnInteger {
                    line: *line,
                    value: value.to_string(),
                })?;
        }

        let turn = match fields[0] {
            -1 | 0 | 1 => Turn::from_sign(fields[0] as i8),
            value => {
                return Err(RouteFormatError::InvalidTurn {
                    line: record[0].0,
                    value,
                })
            }
        };

        let direction = match fields[2] {
            1 => Direction::Forwards,
            -1 => Direction::Backwards,
            value => {
                return Err(RouteFormatError::InvalidDirection {
                    line: record[2].0,
                    value,
                })
            }
        };

        let function = u32::try_from(fields[4]).map_err(|_| RouteFormatError::InvalidFunction {
            line: record[4].0,
            value: fields[4],
        })?;

        legs.push(LegCmd {
            turn,
            heading_deg: fields[1] as f64,
            direction,
            distance_mm: fields[3] as f64,
            function,
        });
    }

    Ok(legs)
}

/// Round to the nearest integer, with halves going towards positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod test {
    use super::*;

    fn leg(turn: Turn, heading_deg: f64, direction: Direction, distance_mm: f64, function: u32) -> LegCmd {
        LegCmd {
            turn,
            heading_deg,
            direction,
            distance_mm,
            function,
        }
    }

    #[test]
    fn test_route_to_text() {
        let legs = vec![
            leg(Turn::Clockwise, 90.0, Direction::Forwards, 100.0, 0),
            leg(Turn::Anticlockwise, -44.6, Direction::Backwards, 141.42, 7),
        ];

        assert_eq!(route_to_text(&legs), "1\n90\n1\n100\n0\n-1\n-45\n-1\n141\n7");
        assert_eq!(route_to_text(&[]), "");
    }

    #[test]
    fn test_parse_route_text() {
        let legs = parse_route_text("1\n90\n1\n100\n0\n\n-1\n-45\n-1\n141\n7\n").unwrap();

        assert_eq!(
            legs,
            vec![
                leg(Turn::Clockwise, 90.0, Direction::Forwards, 100.0, 0),
                leg(Turn::Anticlockwise, -45.0, Direction::Backwards, 141.0, 7),
            ]
        );
        assert!(parse_route_text("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_route_text_errors() {
        assert!(matches!(
            parse_route_text("1\n90\n1\n100"),
            Err(RouteFormatError::TruncatedLeg { leg: 0, lines: 4 })
        ));
        assert!(matches!(
            parse_route_text("1\n90.5\n1\n100\n0"),
            Err(RouteFormatError::NotAnInteger { line: 2, .. })
        ));
        assert!(matches!(
            parse_route_text("2\n90\n1\n100\n0"),
            Err(RouteFormatError::InvalidTurn { line: 1, value: 2 })
        ));
        assert!(matches!(
            parse_route_text("1\n90\n0\n100\n0"),
            Err(RouteFormatError::InvalidDirection { line: 3, .. })
        ));
        assert!(matches!(
            parse_route_text("1\n90\n1\n100\n-3"),
            Err(RouteFormatError::InvalidFunction { line: 5, value: -3 })
        ));
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-0.2), 0);
        assert_eq!(round_half_up(141.42), 141);
    }

    #[test]
    fn test_turn_reversed() {
        assert_eq!(Turn::Clockwise.reversed(), Turn::Anticlockwise);
        assert_eq!(Turn::Anticlockwise.reversed(), Turn::Clockwise);
        assert_eq!(Turn::None.reversed(), Turn::None);
    }
}
