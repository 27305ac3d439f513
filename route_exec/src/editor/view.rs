//! Text view of the route
//!
//! Lists each point with the values the robot will see for the leg starting
//! at it, and optionally the corridor the robot sweeps along each leg.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::fmt::Write;

use comms_if::{
    points::Point,
    route::{round_half_up, LegCmd, Turn},
};

use crate::route_compiler;

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// A point along with what's shown next to it.
#[derive(Debug, Clone, PartialEq)]
pub struct PointInfo {
    pub index: usize,
    pub point: Point,

    /// Turn made at the start of the leg from this point, `None` for the
    /// last point.
    pub turn: Option<Turn>,

    /// Heading of the leg from this point, rounded.
    ///
    /// Units: degrees
    pub heading_deg: Option<i64>,

    /// Length of the leg from this point, rounded.
    ///
    /// Units: millimeters
    pub distance_mm: Option<i64>,

    pub selected: bool,
}

/// Axis aligned box around the robot's path along one leg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corridor {
    pub min_mm: (f64, f64),
    pub max_mm: (f64, f64),
}

/// Extent of the field the points are placed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    pub width_mm: f64,
    pub height_mm: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl Corridor {
    /// Corridor swept by a robot of the given width driving from `a` to `b`.
    ///
    /// The robot's outline is treated as a circle of the robot width, as the
    /// editor overlay draws it.
    pub fn of_leg(a: &Point, b: &Point, robot_width_mm: f64) -> Self {
        let half = robot_width_mm / 2.0;
        let (ax, ay) = a.position();
        let (bx, by) = b.position();

        Self {
            min_mm: (ax.min(bx) - half, ay.min(by) - half),
            max_mm: (ax.max(bx) + half, ay.max(by) + half),
        }
    }
}

impl Field {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= 0.0 && y >= 0.0 && x <= self.width_mm && y <= self.height_mm
    }

    pub fn contains_corridor(&self, c: &Corridor) -> bool {
        self.contains(c.min_mm.0, c.min_mm.1) && self.contains(c.max_mm.0, c.max_mm.1)
    }
}

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Annotate each point with the turn, heading and length of its outgoing leg.
pub fn annotate(points: &[Point], current: Option<usize>) -> Vec<PointInfo> {
    let legs = route_compiler::compile(points);

    points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let leg: Option<&LegCmd> = legs.get(index);

            PointInfo {
                index,
                point: *point,
                turn: leg.map(|l| l.turn),
                heading_deg: leg.map(|l| round_half_up(l.heading_deg)),
                distance_mm: leg.map(|l| round_half_up(l.distance_mm)),
                selected: current == Some(index),
            }
        })
        .collect()
}

/// Render the listing of points.
///
/// Pass a robot width to include the corridor of each leg, flagged when it
/// leaves the field.
pub fn render_listing(points: &[Point], current: Option<usize>, overlay: Option<(f64, Field)>) -> String {
    if points.is_empty() {
        return String::from("(no points)");
    }

    let mut out = String::new();

    for info in annotate(points, current) {
        let turn = match info.turn {
            Some(t) => format!("{:>2}", t.as_i8()),
            None => String::from(" -"),
        };
        let leg = match (info.heading_deg, info.distance_mm) {
            (Some(h), Some(d)) => format!(" hdg={:>4} dist={}", h, d),
            _ => String::new(),
        };

        // Writing to a String can't fail
        let _ = writeln!(
            out,
            "{} {:>3}: x={:>5} y={:>5} d={:>2} f={} turn={}{}",
            if info.selected { '*' } else { ' ' },
            info.index,
            info.point.x,
            info.point.y,
            info.point.d.as_i8(),
            info.point.f,
            turn,
            leg
        );

        if let (Some((robot_width_mm, field)), Some(next)) = (overlay, points.get(info.index + 1)) {
            let c = Corridor::of_leg(&info.point, next, robot_width_mm);
            let _ = writeln!(
                out,
                "        corridor x=[{:.0}, {:.0}] y=[{:.0}, {:.0}]{}",
                c.min_mm.0,
                c.max_mm.0,
                c.min_mm.1,
                c.max_mm.1,
                if field.contains_corridor(&c) { "" } else { " OUTSIDE FIELD" }
            );
        }
    }

    out.trim_end().to_string()
}
