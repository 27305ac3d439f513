//! # Editor script interpreter
//!
//! Editor scripts are plain text files of editor commands, each terminated
//! by a `;`. Anything after a `#` on a line is a comment.
//!
//! ```text
//! # Square
//! click 0 0; release;
//! click 100 0; release;
//! export-route -f square.txt;
//! ```

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use regex::Regex;
use thiserror::Error;

// Internal
use crate::editor::{CmdParseError, EditorCmd};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A script interpreter.
///
/// After loading a script use `.next_cmd` to take the commands in order.
pub struct ScriptInterpreter {
    cmds: VecDeque<EditorCmd>
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0:?}")]
    ScriptNotFound(PathBuf),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error("Statement {0} of the script ({1:?}) is not a valid command: {2}")]
    InvalidCmd(usize, String, CmdParseError),

    #[error("The script ends with an unterminated statement: {0:?}")]
    Unterminated(String),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ScriptInterpreter {

    /// Create a new interpreter from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {

        // Get the path in a buffer
        let path = PathBuf::from(script_path.as_ref());
        
        // Check that the script file exists.
        if !path.exists() {
            return Err(ScriptError::ScriptNotFound(path));
        }

        // Load the script into a string
        let script = fs::read_to_string(&path)
            .map_err(ScriptError::ScriptLoadError)?;

        Self::from_script(&script)
    }

    /// Create a new interpreter from the script's text.
    pub fn from_script(script: &str) -> Result<Self, ScriptError> {
        // Strip comments, the pattern is constant so can't fail to build
        let comment_re = Regex::new(r"#[^\n]*").unwrap();
        let script = comment_re.replace_all(script, "");

        let mut statements: Vec<&str> = script.split(';').collect();

        // Whatever follows the last `;` must be blank
        if let Some(rest) = statements.pop() {
            if !rest.trim().is_empty() {
                return Err(ScriptError::Unterminated(rest.trim().to_string()));
            }
        }

        let mut cmd_queue: VecDeque<EditorCmd> = VecDeque::new();

        for (i, statement) in statements
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .enumerate()
        {
            let cmd = EditorCmd::parse_line(statement).map_err(|e| {
                ScriptError::InvalidCmd(i + 1, statement.to_string(), e)
            })?;

            cmd_queue.push_back(cmd);
        }

        if cmd_queue.is_empty() {
            return Err(ScriptError::ScriptEmpty)
        }

        Ok(ScriptInterpreter {
            cmds: cmd_queue
        })
    }

    /// Take the next command, or `None` at the end of the script.
    pub fn next_cmd(&mut self) -> Option<EditorCmd> {
        self.cmds.pop_front()
    }

    /// Get the number of commands left in the script
    pub fn get_num_cmds(&self) -> usize {
        self.cmds.len()
    }
}
