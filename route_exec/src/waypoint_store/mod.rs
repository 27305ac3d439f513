//! Waypoint store module
//!
//! Owns the route being edited together with the selection and drag cursors
//! and the trash used to restore removed points.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod state;
mod trash;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use state::*;
pub use trash::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Result of a pointer press on the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    /// An existing point at this index was picked up.
    Existing(usize),

    /// Nothing was in range so a new point was created at this index.
    Created(usize),
}
