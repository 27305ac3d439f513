//! # Communications interface crate.
//!
//! Provides the interchange formats shared between the route editor and the
//! robot controller which consumes its output.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Waypoints and their JSON interchange format
pub mod points;

/// Compiled motion commands and the route text format
pub mod route;
