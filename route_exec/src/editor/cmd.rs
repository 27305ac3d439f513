//! Editor commands
//!
//! Every user action on the editor is one of these commands. They are parsed
//! from a single line, like `click 120 45` or `func 3`.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::path::PathBuf;

use structopt::{clap::AppSettings, StructOpt};
use thiserror::Error;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// A command to the route editor.
#[derive(Debug, Clone, PartialEq, StructOpt)]
#[structopt(name = "route", no_version)]
pub enum EditorCmd {
    /// Press the pointer, picking up a nearby point or creating a new one.
    #[structopt(name = "click", setting = AppSettings::AllowNegativeNumbers)]
    Click {
        /// Pointer x position in millimeters.
        x: f64,

        /// Pointer y position in millimeters.
        y: f64,
    },

    /// Move the pointer, carrying any held point with it.
    #[structopt(name = "drag", setting = AppSettings::AllowNegativeNumbers)]
    Drag {
        x: f64,
        y: f64,
    },

    /// Release the pointer.
    #[structopt(name = "release")]
    Release,

    /// Move the last point into the trash.
    #[structopt(name = "del")]
    Delete,

    /// Restore the most recently deleted point.
    #[structopt(name = "restore")]
    Restore,

    /// Drive the leg from the selected point forwards.
    #[structopt(name = "fwd")]
    Forwards,

    /// Drive the leg from the selected point backwards.
    #[structopt(name = "back")]
    Backwards,

    /// Set the function code of the selected point.
    #[structopt(name = "func")]
    Function {
        f: u32,
    },

    /// Shift the selected point.
    #[structopt(name = "move", setting = AppSettings::AllowNegativeNumbers)]
    Move {
        dx: i64,
        dy: i64,
    },

    /// Nudge the selected point 1 mm left.
    #[structopt(name = "left")]
    Left,

    /// Nudge the selected point 1 mm right.
    #[structopt(name = "right")]
    Right,

    /// Nudge the selected point 1 mm up.
    #[structopt(name = "up")]
    Up,

    /// Nudge the selected point 1 mm down.
    #[structopt(name = "down")]
    Down,

    /// Set the x position of the selected point.
    #[structopt(name = "set-x", setting = AppSettings::AllowNegativeNumbers)]
    SetX {
        x: f64,
    },

    /// Set the y position of the selected point.
    #[structopt(name = "set-y", setting = AppSettings::AllowNegativeNumbers)]
    SetY {
        y: f64,
    },

    /// Remove every point.
    #[structopt(name = "wipe")]
    Wipe,

    /// Toggle showing the robot's corridor along each leg.
    #[structopt(name = "overlay")]
    Overlay,

    /// Toggle printing the point listing after each edit.
    #[structopt(name = "info")]
    Info,

    /// Set the robot width used by the overlay.
    #[structopt(name = "robot-width")]
    RobotWidth {
        width_mm: f64,
    },

    /// Print the point listing.
    #[structopt(name = "list")]
    List,

    /// Compile the route and print it, or write it to a file.
    #[structopt(name = "export-route")]
    ExportRoute {
        #[structopt(short, long, parse(from_os_str))]
        file: Option<PathBuf>,
    },

    /// Print the points, or write them to a file.
    #[structopt(name = "export-points")]
    ExportPoints {
        #[structopt(short, long, parse(from_os_str))]
        file: Option<PathBuf>,
    },

    /// Replace the points with those in a file.
    #[structopt(name = "import-points")]
    ImportPoints {
        #[structopt(parse(from_os_str))]
        file: PathBuf,
    },

    /// Replace the points with the given JSON.
    #[structopt(
        name = "import-text",
        setting = AppSettings::TrailingVarArg,
        setting = AppSettings::AllowLeadingHyphen
    )]
    ImportText {
        #[structopt(required = true, allow_hyphen_values = true)]
        json: Vec<String>,
    },

    /// Save the points for a later session.
    #[structopt(name = "save")]
    Save,

    /// Load the previously saved points.
    #[structopt(name = "prev")]
    Prev,

    /// Press a key as on the editor's keyboard shortcuts.
    #[structopt(name = "key")]
    Key {
        name: String,
    },

    /// Leave the editor.
    #[structopt(name = "quit")]
    Quit,
}

/// Errors from parsing a command line.
#[derive(Debug, Error)]
pub enum CmdParseError {
    #[error("No command given")]
    Empty,

    #[error("{0}")]
    Invalid(String),
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl EditorCmd {
    /// Parse a command from a single line.
    pub fn parse_line(line: &str) -> Result<Self, CmdParseError> {
        if line.trim().is_empty() {
            return Err(CmdParseError::Empty);
        }

        // The first item is taken as the program name
        Self::from_iter_safe(std::iter::once("route").chain(line.split_whitespace()))
            .map_err(|e| CmdParseError::Invalid(e.message))
    }

    /// The command bound to a keyboard key, if any.
    ///
    /// Key names follow the DOM `KeyboardEvent.key` values.
    pub fn from_key(key: &str) -> Option<Self> {
        let cmd = match key {
            "Backspace" => EditorCmd::Delete,
            "Enter" => EditorCmd::Restore,
            "-" => EditorCmd::Backwards,
            "=" => EditorCmd::Forwards,
            "o" => EditorCmd::Overlay,
            "i" => EditorCmd::Info,
            "p" => EditorCmd::Prev,
            "q" => EditorCmd::Wipe,
            "ArrowLeft" => EditorCmd::Left,
            "ArrowRight" => EditorCmd::Right,
            "ArrowUp" => EditorCmd::Up,
            "ArrowDown" => EditorCmd::Down,
            k => match k.parse::<u32>() {
                Ok(f) if k.len() == 1 => EditorCmd::Function { f },
                _ => return None,
            },
        };

        Some(cmd)
    }

    /// True if the command can change the points.
    pub fn is_edit(&self) -> bool {
        !matches!(
            self,
            EditorCmd::Overlay
                | EditorCmd::Info
                | EditorCmd::RobotWidth { .. }
                | EditorCmd::List
                | EditorCmd::ExportRoute { .. }
                | EditorCmd::ExportPoints { .. }
                | EditorCmd::Save
                | EditorCmd::Key { .. }
                | EditorCmd::Quit
        )
    }
}
