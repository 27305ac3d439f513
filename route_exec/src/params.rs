//! Parameters structure for the route editor

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the route editor.
///
/// Keys missing from the parameter file take their default value.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Params {

    // ---- PICKING ----

    /// Distance from a pointer press within which an existing point is
    /// picked up rather than a new one created.
    ///
    /// Units: millimeters
    pub pick_radius_mm: f64,

    /// Which point to pick when several lie within the pick radius.
    pub pick_policy: PickPolicy,

    // ---- UNDO ----

    /// Maximum number of removed points kept for restoring.
    pub trash_capacity: usize,

    /// If true wiping the route also empties the trash.
    pub clear_trash_on_wipe: bool,

    // ---- PERSISTENCE ----

    /// Key the points are saved under between sessions.
    pub save_key: String,

    // ---- FIELD ----

    /// Width of the field image.
    ///
    /// Units: millimeters
    pub field_width_mm: f64,

    /// Height of the field image.
    ///
    /// Units: millimeters
    pub field_height_mm: f64,

    // ---- DISPLAY ----

    /// Width of the robot, used for the overlay.
    ///
    /// Units: millimeters
    pub robot_width_mm: f64,

    /// Show the swept corridor of each leg in listings.
    pub show_overlay: bool,

    /// Print the point listing after every edit.
    pub show_info: bool,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Tie break used when more than one point lies within the pick radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickPolicy {
    /// Earliest point in route order
    First,

    /// Latest point in route order
    Last,

    /// Nearest point to the pointer, earliest on a tie
    Closest,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            pick_radius_mm: 25.0,
            pick_policy: PickPolicy::default(),
            trash_capacity: 64,
            clear_trash_on_wipe: false,
            save_key: String::from("Save"),
            field_width_mm: 2362.0,
            field_height_mm: 1143.0,
            robot_width_mm: 200.0,
            show_overlay: false,
            show_info: true,
        }
    }
}

impl Default for PickPolicy {
    fn default() -> Self {
        PickPolicy::Last
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_partial_params() {
        let params: Params = util::params::from_toml_str(
            "pick_policy = \"closest\"\nrobot_width_mm = 250.0"
        ).unwrap();

        assert_eq!(params.pick_policy, PickPolicy::Closest);
        assert_eq!(params.robot_width_mm, 250.0);
        assert_eq!(params.pick_radius_mm, 25.0);
        assert_eq!(params.save_key, "Save");
    }
}
