//! # Route library.
//!
//! Waypoint editing and route compilation for the route planner. The
//! executable drives this library, other crates in the workspace may use it
//! directly.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Editor - executes user commands against the waypoint store
pub mod editor;

/// Parameters for the editor
pub mod params;

/// Persistence - stores editor state between sessions
pub mod persist;

/// Route compiler - converts waypoints into motion commands
pub mod route_compiler;

/// Script interpreter - runs editor commands from a file
pub mod script;

/// Waypoint store - the route being edited and its undo trash
pub mod waypoint_store;
