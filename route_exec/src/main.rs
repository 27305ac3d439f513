//! Route editor executable entry point.
//! 
//! # Usage
//! 
//! - `route_exec` starts an interactive editor shell. Type `help` for the
//!   list of commands.
//! - `route_exec <script>` runs the editor commands in the script, see
//!   `route_lib::script` for the format.
//! 
//! In both cases the points are saved when the executable exits, and can be
//! brought back in a later session with `prev`.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{Report, eyre::{WrapErr, eyre}};
use log::{debug, info, warn};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::env;

// Internal
use route_lib::{
    editor::{CmdParseError, Editor, EditorCmd},
    params::Params,
    persist::{FileKvStore, KvStore},
    script::ScriptInterpreter,
};
use util::{
    logger::{logger_init, LevelFilter},
    session::Session,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

const PROMPT: &str = "route $ ";

/// Shell history file, kept in the saves directory.
const HISTORY_FILE: &str = "history.txt";

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new(
        "route_exec", 
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session)
        .wrap_err("Failed to initialise logging")?;

    info!("Route Planner Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let params: Params = util::params::load(
        "route_exec.toml"
    ).wrap_err("Could not load route_exec params")?;

    info!("Editor parameters loaded");
    debug!("{:#?}", params);

    // ---- INITIALISE EDITOR ----

    let kv = FileKvStore::new(&session.saves_root);
    let work_dir = env::current_dir()
        .wrap_err("Could not get the working directory")?;

    let mut editor = Editor::new(params, kv, work_dir);

    // ---- RUN ----

    // Collect all arguments
    let args: Vec<String> = env::args().collect();

    debug!("CLI arguments: {:?}", args);

    // If we have a single argument use it as the script path
    if args.len() == 2 {
        run_script(&mut editor, &args[1])?;
    }
    // If no arguments then run the shell
    else if args.len() == 1 {
        run_shell(&mut editor, &session)?;
    }
    else {
        return Err(eyre!(
            "Expected either zero or one argument, found {}", args.len() - 1)
        );
    }

    // ---- SHUTDOWN ----

    editor.save().wrap_err("Failed to save the points")?;
    info!("Saved {} points", editor.store().len());

    info!("End of execution");

    Ok(())
}

/// Execute every command in the script at `path`.
fn run_script<S: KvStore>(editor: &mut Editor<S>, path: &str) -> Result<(), Report> {
    info!("Loading script from \"{}\"", path);

    let mut si = ScriptInterpreter::new(path)
        .wrap_err("Failed to load script")?;

    info!("Loaded script contains {} commands\n", si.get_num_cmds());

    while let Some(cmd) = si.next_cmd() {
        if cmd == EditorCmd::Quit {
            info!("Quit reached with {} commands left", si.get_num_cmds());
            break;
        }

        match editor.exec(cmd) {
            Ok(Some(out)) => println!("{}", out),
            Ok(None) => (),
            Err(e) => warn!("{}", e),
        }
    }

    Ok(())
}

/// Read and execute commands from the terminal until `quit` or Ctrl-C/D.
fn run_shell<S: KvStore>(editor: &mut Editor<S>, session: &Session) -> Result<(), Report> {
    let history_path = session.saves_root.join(HISTORY_FILE);

    let mut rl = DefaultEditor::new()
        .wrap_err("Failed to start the line editor")?;
    if rl.load_history(&history_path).is_err() {
        info!("No history detected");
    }

    loop {
        let line = match rl.readline(PROMPT) {
            Ok(l) => l,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e).wrap_err("Failed to read the command line"),
        };

        let cmd = match EditorCmd::parse_line(&line) {
            Ok(c) => c,
            Err(CmdParseError::Empty) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        // Whether this succeeds only matters to the history
        let _ = rl.add_history_entry(line.as_str());

        if cmd == EditorCmd::Quit {
            break;
        }

        match editor.exec(cmd) {
            Ok(Some(out)) => println!("{}", out),
            Ok(None) => (),
            Err(e) => println!("{}", e),
        }
    }

    if let Err(e) = rl.save_history(&history_path) {
        warn!("Could not save the shell history: {}", e);
    }

    Ok(())
}
