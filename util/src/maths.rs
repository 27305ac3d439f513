//! Utility maths functions
//!
//! Planar geometry used by the route compiler. Points are `(x, y)` tuples in
//! image coordinates, so `y` increases downwards. Angles are in degrees and
//! are kept in the range `(-180, 180]`.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Sign of a value, returning `0` for both zeros (unlike `Float::signum`).
///
/// `NaN` is mapped to `0`.
pub fn sign<T>(value: T) -> i8
where
    T: Float
{
    if value > T::zero() {
        1
    }
    else if value < T::zero() {
        -1
    }
    else {
        0
    }
}

/// Return the euclidian distance between two points.
pub fn distance<T>(p1: (T, T), p2: (T, T)) -> T
where
    T: Float
{
    (p1.0 - p2.0).hypot(p1.1 - p2.1)
}

/// Bearing from `from` to `to` in degrees.
///
/// Straight up the image (decreasing `y`) is 0, with the angle increasing
/// towards increasing `x`. Coincident points have no defined bearing, `0` is
/// returned for them.
pub fn bearing_deg<T>(from: (T, T), to: (T, T)) -> T
where
    T: Float
{
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;

    if dx == T::zero() && dy == T::zero() {
        return T::zero();
    }

    let bearing = dx.atan2(-dy).to_degrees();

    // atan2 can land on -180 when dx is a negative zero, keep (-180, 180]
    if bearing <= -half_turn::<T>() {
        half_turn()
    }
    else {
        bearing
    }
}

/// The opposite of the given angle, `-sign(a) * (180 - |a|)`.
///
/// `0` maps onto itself.
pub fn flip_deg<T>(angle: T) -> T
where
    T: Float
{
    let flipped = -(half_turn::<T>() - angle.abs()) * T::from(sign(angle)).unwrap_or_else(T::zero);

    // Avoid handing out negative zeros, flip(180) is 0
    if flipped == T::zero() {
        T::zero()
    }
    else {
        flipped
    }
}

/// Sign of the shortest rotation taking `from_deg` onto `to_deg`.
///
/// Positive is clockwise (towards increasing bearing). Equal angles give `0`.
/// Angles exactly half a turn apart resolve to `-1`.
pub fn turn_sign<T>(from_deg: T, to_deg: T) -> i8
where
    T: Float
{
    let full_turn = half_turn::<T>() + half_turn::<T>();

    sign((to_deg - from_deg + full_turn + half_turn()) % full_turn - half_turn())
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn half_turn<T: Float>() -> T {
    T::from(180.0).unwrap_or_else(T::nan)
}
