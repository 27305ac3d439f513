//! # Waypoints
//!
//! A waypoint is a position on the field plus the direction the robot drives
//! the leg starting at it and the function code it executes on that leg.
//!
//! Waypoints are exchanged as a JSON list of `{"x", "y", "d", "f"}` records,
//! used for files, the clipboard and persisted editor state alike.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::convert::TryFrom;
use std::fmt;

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::route::round_half_up;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Largest coordinate magnitude a point may have.
///
/// Held by the editor as well as on import, so every stored route can be read
/// back.
///
/// Units: millimeters
pub const MAX_ABS_COORD_MM: i64 = 1_000_000_000_000;

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// A single waypoint.
///
/// Field order is the interchange order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Point {
    /// Horizontal position, increasing to the right.
    ///
    /// Units: millimeters
    #[serde(deserialize_with = "de_coord")]
    pub x: i64,

    /// Vertical position, increasing downwards.
    ///
    /// Units: millimeters
    #[serde(deserialize_with = "de_coord")]
    pub y: i64,

    /// Direction the leg starting at this point is driven in.
    pub d: Direction,

    /// Function code executed on the leg starting at this point.
    pub f: u32,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// The direction a leg is driven in, serialised as `1` or `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Direction {
    /// Nose first
    Forwards,

    /// Tail first
    Backwards,
}

/// Errors raised while reading or writing the point interchange format.
#[derive(Debug, Error)]
pub enum PointsFormatError {
    #[error("Points are not valid interchange JSON: {0}")]
    InvalidJson(serde_json::Error),

    #[error("Could not serialise the points: {0}")]
    SerialiseError(serde_json::Error),
}

/// A direction flag outside of `{-1, 1}`.
#[derive(Debug, Error)]
#[error("Expected a direction of 1 or -1, found {0}")]
pub struct InvalidDirection(pub i8);

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl Point {
    /// A forwards point with no function.
    pub fn new(x: i64, y: i64) -> Self {
        Self::with(x, y, Direction::Forwards, 0)
    }

    pub fn with(x: i64, y: i64, d: Direction, f: u32) -> Self {
        Self { x, y, d, f }
    }

    /// Position as floating point coordinates.
    pub fn position(&self) -> (f64, f64) {
        (self.x as f64, self.y as f64)
    }
}

impl Direction {
    /// The flag as used in the interchange formats.
    pub fn as_i8(self) -> i8 {
        match self {
            Direction::Forwards => 1,
            Direction::Backwards => -1,
        }
    }
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Forwards
    }
}

impl From<Direction> for i8 {
    fn from(d: Direction) -> Self {
        d.as_i8()
    }
}

impl TryFrom<i8> for Direction {
    type Error = InvalidDirection;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Direction::Forwards),
            -1 => Ok(Direction::Backwards),
            v => Err(InvalidDirection(v)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i8())
    }
}

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Serialise the points into the interchange format.
pub fn export_points(points: &[Point]) -> Result<String, PointsFormatError> {
    serde_json::to_string(points).map_err(PointsFormatError::SerialiseError)
}

/// Limit a coordinate to `MAX_ABS_COORD_MM` either side of zero.
pub fn clamp_coord(value: i64) -> i64 {
    value.clamp(-MAX_ABS_COORD_MM, MAX_ABS_COORD_MM)
}

/// Parse points from the interchange format.
///
/// Either the whole list parses or an error is returned, there is no partial
/// result.
pub fn import_points(text: &str) -> Result<Vec<Point>, PointsFormatError> {
    serde_json::from_str(text).map_err(PointsFormatError::InvalidJson)
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Coordinates may arrive as any JSON number, they're rounded to the nearest
/// millimeter.
fn de_coord<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;

    if !value.is_finite() || value.abs() > MAX_ABS_COORD_MM as f64 {
        return Err(D::Error::custom(format!(
            "coordinate {} is out of range",
            value
        )));
    }

    Ok(round_half_up(value))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_export_field_order() {
        let points = vec![
            Point::new(0, 0),
            Point::with(100, -20, Direction::Backwards, 3),
        ];

        assert_eq!(
            export_points(&points).unwrap(),
            r#"[{"x":0,"y":0,"d":1,"f":0},{"x":100,"y":-20,"d":-1,"f":3}]"#
        );
    }

    #[test]
    fn test_round_trip() {
        let points = vec![
            Point::with(12, 900, Direction::Forwards, 9),
            Point::with(-4, 7, Direction::Backwards, 0),
            Point::with(2361, 1142, Direction::Backwards, 17),
        ];

        let text = export_points(&points).unwrap();
        assert_eq!(import_points(&text).unwrap(), points);

        assert!(import_points(&export_points(&[]).unwrap()).unwrap().is_empty());
    }

    #[test]
    fn test_import_rounds_coords() {
        let points = import_points(r#"[{"x":10.4,"y":10.5,"d":1,"f":2}]"#).unwrap();
        assert_eq!(points, vec![Point::with(10, 11, Direction::Forwards, 2)]);
    }

    #[test]
    fn test_import_rejects_bad_input() {
        // Not JSON
        assert!(import_points("points please").is_err());
        // Null isn't a point list
        assert!(import_points("null").is_err());
        // Not a list
        assert!(import_points(r#"{"x":1,"y":1,"d":1,"f":0}"#).is_err());
        // Bad direction
        assert!(import_points(r#"[{"x":1,"y":1,"d":0,"f":0}]"#).is_err());
        // Negative function
        assert!(import_points(r#"[{"x":1,"y":1,"d":1,"f":-2}]"#).is_err());
        // Missing field
        assert!(import_points(r#"[{"x":1,"y":1,"d":1}]"#).is_err());
        // One bad record spoils the whole list
        assert!(import_points(
            r#"[{"x":1,"y":1,"d":1,"f":0},{"x":"a","y":1,"d":1,"f":0}]"#
        )
        .is_err());
    }

    #[test]
    fn test_coord_limit() {
        assert_eq!(clamp_coord(2_000_000_000_000), MAX_ABS_COORD_MM);
        assert_eq!(clamp_coord(i64::MIN), -MAX_ABS_COORD_MM);
        assert_eq!(clamp_coord(-17), -17);

        // The limit itself reads back, anything beyond it doesn't
        let edge = vec![Point::new(MAX_ABS_COORD_MM, -MAX_ABS_COORD_MM)];
        assert_eq!(import_points(&export_points(&edge).unwrap()).unwrap(), edge);
        assert!(import_points(r#"[{"x":1000000000001,"y":0,"d":1,"f":0}]"#).is_err());
    }
}
