//! # Route compiler
//!
//! Turns the edited waypoints into the motion commands driven by the robot,
//! one command per leg.
//!
//! Headings are bearings of each leg, flipped by half a turn when the leg is
//! driven backwards. The first leg turns relative to a heading of 0, every
//! other leg relative to the heading of the leg before it. Where a backwards
//! leg is followed by a forwards one the turn is reversed.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::{
    points::{Direction, Point},
    route::{LegCmd, Turn},
};
use util::maths;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Compile the points into leg commands.
///
/// `n` points give `n - 1` commands, fewer than two points give none.
pub fn compile(points: &[Point]) -> Vec<LegCmd> {
    let mut legs = Vec::with_capacity(points.len().saturating_sub(1));

    // Heading the robot starts the leg at
    let mut ref_heading_deg = 0.0;

    for (i, leg) in points.windows(2).enumerate() {
        let (origin, target) = (&leg[0], &leg[1]);

        let heading_deg = leg_heading_deg(origin, target);

        let mut turn = Turn::from_sign(maths::turn_sign(ref_heading_deg, heading_deg));

        // Backwards into forwards
        if i > 0 && points[i - 1].d == Direction::Backwards && origin.d == Direction::Forwards {
            turn = turn.reversed();
        }

        legs.push(LegCmd {
            turn,
            heading_deg,
            direction: origin.d,
            distance_mm: maths::distance(origin.position(), target.position()),
            function: origin.f,
        });

        ref_heading_deg = heading_deg;
    }

    legs
}

/// Heading of the leg from `origin` to `target`, accounting for the origin's
/// direction.
pub fn leg_heading_deg(origin: &Point, target: &Point) -> f64 {
    let bearing_deg = maths::bearing_deg(origin.position(), target.position());

    match origin.d {
        Direction::Forwards => bearing_deg,
        Direction::Backwards => maths::flip_deg(bearing_deg),
    }
}
