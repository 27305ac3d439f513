//! # Editor
//!
//! Processes editor commands against the waypoint store. Commands are
//! executed synchronously, one at a time, in the order they arrive.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod cmd;
pub mod view;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::{
    fs,
    path::{Path, PathBuf},
};

use comms_if::{
    points::{self, Direction, PointsFormatError},
    route::{round_half_up, route_to_text},
};
use log::{debug, info, warn};
use thiserror::Error;

// Internal
pub use cmd::*;
use crate::{
    params::Params,
    persist::{KvStore, PersistError},
    route_compiler,
    waypoint_store::{Pick, WaypointStore},
};
use view::Field;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The route editor.
pub struct Editor<S: KvStore> {
    store: WaypointStore,

    /// Storage for points kept between sessions
    kv: S,

    params: Params,

    /// Directory relative export and import paths are resolved against
    work_dir: PathBuf,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors which can occur while executing an editor command.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Could not read {0:?}: {1}")]
    ReadError(PathBuf, std::io::Error),

    #[error("Could not write {0:?}: {1}")]
    WriteError(PathBuf, std::io::Error),

    #[error("Import failed, points left unchanged: {0}")]
    ImportFailed(PointsFormatError),

    #[error("Could not export the points: {0}")]
    ExportFailed(PointsFormatError),

    #[error("Persistence error: {0}")]
    PersistError(PersistError),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<S: KvStore> Editor<S> {
    /// Create an editor with an empty route.
    pub fn new<P: AsRef<Path>>(params: Params, kv: S, work_dir: P) -> Self {
        Self {
            store: WaypointStore::new(&params),
            kv,
            params,
            work_dir: work_dir.as_ref().to_path_buf(),
        }
    }

    pub fn store(&self) -> &WaypointStore {
        &self.store
    }

    /// Execute a command.
    ///
    /// Returns any text the command produced for the user.
    pub fn exec(&mut self, cmd: EditorCmd) -> Result<Option<String>, EditorError> {
        debug!("Executing {:?}", cmd);

        let is_edit = cmd.is_edit();

        let output = match cmd {
            EditorCmd::Click { x, y } => {
                let query = (round_half_up(x), round_half_up(y));
                if let Pick::Created(i) = self.store.select_nearest(query, self.params.pick_radius_mm) {
                    self.check_in_field(i);
                }
                None
            }
            EditorCmd::Drag { x, y } => {
                self.store.drag_to((round_half_up(x), round_half_up(y)));
                None
            }
            EditorCmd::Release => {
                if let Some(i) = self.store.holding() {
                    self.check_in_field(i);
                }
                self.store.release_drag();
                None
            }
            EditorCmd::Delete => {
                self.store.remove_last();
                None
            }
            EditorCmd::Restore => {
                self.store.restore_last();
                None
            }
            EditorCmd::Forwards => {
                self.store.set_selected_direction(Direction::Forwards);
                None
            }
            EditorCmd::Backwards => {
                self.store.set_selected_direction(Direction::Backwards);
                None
            }
            EditorCmd::Function { f } => {
                self.store.set_selected_function(f);
                None
            }
            EditorCmd::Move { dx, dy } => {
                self.store.move_selected(dx, dy);
                None
            }
            EditorCmd::Left => {
                self.store.move_selected(-1, 0);
                None
            }
            EditorCmd::Right => {
                self.store.move_selected(1, 0);
                None
            }
            EditorCmd::Up => {
                self.store.move_selected(0, -1);
                None
            }
            EditorCmd::Down => {
                self.store.move_selected(0, 1);
                None
            }
            EditorCmd::SetX { x } => {
                self.store.set_selected_x(round_half_up(x));
                None
            }
            EditorCmd::SetY { y } => {
                self.store.set_selected_y(round_half_up(y));
                None
            }
            EditorCmd::Wipe => {
                self.store.wipe();
                None
            }
            EditorCmd::Overlay => {
                self.params.show_overlay = !self.params.show_overlay;
                Some(format!("Overlay {}", on_off(self.params.show_overlay)))
            }
            EditorCmd::Info => {
                self.params.show_info = !self.params.show_info;
                Some(format!("Info {}", on_off(self.params.show_info)))
            }
            EditorCmd::RobotWidth { width_mm } => {
                self.params.robot_width_mm = width_mm;
                Some(format!("Robot width {} mm", width_mm))
            }
            EditorCmd::List => Some(self.listing()),
            EditorCmd::ExportRoute { file } => {
                let text = self.export_route();
                match file {
                    Some(f) => Some(self.write_file(&f, &text)?),
                    None => Some(text),
                }
            }
            EditorCmd::ExportPoints { file } => {
                let text = self.export_points()?;
                match file {
                    Some(f) => Some(self.write_file(&f, &text)?),
                    None => Some(text),
                }
            }
            EditorCmd::ImportPoints { file } => {
                let path = self.work_dir.join(file);
                let text = fs::read_to_string(&path)
                    .map_err(|e| EditorError::ReadError(path.clone(), e))?;
                let num = self.import_points(&text)?;
                Some(format!("Imported {} points from {:?}", num, path))
            }
            EditorCmd::ImportText { json } => {
                let num = self.import_points(&json.join(" "))?;
                Some(format!("Imported {} points", num))
            }
            EditorCmd::Save => {
                self.save()?;
                Some(format!("Saved {} points", self.store.len()))
            }
            EditorCmd::Prev => match self.load_previous()? {
                Some(num) => Some(format!("Loaded {} previously saved points", num)),
                None => Some(String::from("No previously saved points")),
            },
            EditorCmd::Key { name } => match EditorCmd::from_key(&name) {
                Some(c) => return self.exec(c),
                None => {
                    debug!("Key {:?} isn't bound", name);
                    None
                }
            },
            EditorCmd::Quit => None,
        };

        // Follow edits with the listing when info is on
        if is_edit && self.params.show_info && output.is_none() {
            return Ok(Some(self.listing()));
        }

        Ok(output)
    }

    /// The compiled route in the controller's text format.
    pub fn export_route(&self) -> String {
        route_to_text(&route_compiler::compile(self.store.points()))
    }

    /// The points in the interchange format.
    pub fn export_points(&self) -> Result<String, EditorError> {
        points::export_points(self.store.points()).map_err(EditorError::ExportFailed)
    }

    /// Replace the points with those parsed from `text`.
    ///
    /// If the text can't be parsed the points are left unchanged.
    pub fn import_points(&mut self, text: &str) -> Result<usize, EditorError> {
        let points = points::import_points(text).map_err(|e| {
            debug!("Ignoring import: {}", e);
            EditorError::ImportFailed(e)
        })?;

        let num = points.len();
        self.store.replace(points);

        info!("Imported {} points", num);

        Ok(num)
    }

    /// Save the points under the save key.
    pub fn save(&mut self) -> Result<(), EditorError> {
        let text = self.export_points()?;
        self.kv
            .set(&self.params.save_key, &text)
            .map_err(EditorError::PersistError)
    }

    /// Load the points saved under the save key.
    ///
    /// Returns `None` if nothing was saved, leaving the points unchanged.
    pub fn load_previous(&mut self) -> Result<Option<usize>, EditorError> {
        match self.kv.get(&self.params.save_key).map_err(EditorError::PersistError)? {
            Some(text) => self.import_points(&text).map(Some),
            None => Ok(None),
        }
    }

    /// The point listing, with corridors if the overlay is on.
    pub fn listing(&self) -> String {
        let overlay = if self.params.show_overlay {
            Some((self.params.robot_width_mm, self.field()))
        } else {
            None
        };

        view::render_listing(self.store.points(), self.store.current(), overlay)
    }

    fn field(&self) -> Field {
        Field {
            width_mm: self.params.field_width_mm,
            height_mm: self.params.field_height_mm,
        }
    }

    /// Warn if a point has been placed off the field.
    fn check_in_field(&self, index: usize) {
        if let Some(p) = self.store.points().get(index) {
            if !self.field().contains(p.x as f64, p.y as f64) {
                warn!("Point {} at ({}, {}) is outside the field", index, p.x, p.y);
            }
        }
    }

    fn write_file(&self, file: &Path, text: &str) -> Result<String, EditorError> {
        let path = self.work_dir.join(file);
        fs::write(&path, text).map_err(|e| EditorError::WriteError(path.clone(), e))?;

        info!("Wrote {:?}", path);

        Ok(format!("Written to {:?}", path))
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::persist::MemKvStore;
    use comms_if::points::Point;

    fn editor() -> Editor<MemKvStore> {
        Editor::new(
            Params {
                show_info: false,
                ..Params::default()
            },
            MemKvStore::default(),
            std::env::temp_dir(),
        )
    }

    fn run(editor: &mut Editor<MemKvStore>, lines: &[&str]) {
        for l in lines {
            editor.exec(EditorCmd::parse_line(l).unwrap()).unwrap();
        }
    }

    #[test]
    fn test_click_drag_release() {
        let mut e = editor();
        run(&mut e, &["click 10.4 20.6", "drag 50 60", "release", "click 300 300"]);

        assert_eq!(e.store().points(), &[Point::new(50, 60), Point::new(300, 300)]);

        // Clicking near an existing point selects it without creating another
        run(&mut e, &["click 55 65", "release", "back", "func 2"]);
        assert_eq!(e.store().len(), 2);
        assert_eq!(e.store().points()[0], Point::with(50, 60, Direction::Backwards, 2));
        assert_eq!(e.store().holding(), None);
    }

    #[test]
    fn test_keys() {
        let mut e = editor();
        run(&mut e, &["click 100 100", "release", "key ArrowLeft", "key ArrowDown", "key -", "key 5"]);
        assert_eq!(e.store().points()[0], Point::with(99, 101, Direction::Backwards, 5));

        run(&mut e, &["key Backspace"]);
        assert!(e.store().is_empty());
        run(&mut e, &["key Enter"]);
        assert_eq!(e.store().len(), 1);

        // Unbound keys do nothing
        run(&mut e, &["key x"]);
        assert_eq!(e.store().len(), 1);
    }

    #[test]
    fn test_export_route() {
        let mut e = editor();
        run(&mut e, &["click 0 0", "release", "click 100 0", "release", "click 100 100", "release"]);

        assert_eq!(
            e.exec(EditorCmd::ExportRoute { file: None }).unwrap(),
            Some(String::from("1\n90\n1\n100\n0\n1\n180\n1\n100\n0"))
        );
    }

    #[test]
    fn test_import_failure_leaves_points() {
        let mut e = editor();
        run(&mut e, &["click 10 10", "click 200 10"]);
        let before = e.store().points().to_vec();

        let res = e.exec(EditorCmd::ImportText {
            json: vec![String::from("[{\"x\":1}]")],
        });
        assert!(matches!(res, Err(EditorError::ImportFailed(_))));
        assert_eq!(e.store().points(), &before[..]);
        assert_eq!(e.store().current(), Some(1));
    }

    #[test]
    fn test_import_clears_cursors() {
        let mut e = editor();
        run(&mut e, &["click 10 10", r#"import-text [{"x": 5, "y": 6, "d": -1, "f": 1}]"#]);

        assert_eq!(e.store().points(), &[Point::with(5, 6, Direction::Backwards, 1)]);
        assert_eq!(e.store().current(), None);
        assert_eq!(e.store().holding(), None);
    }

    #[test]
    fn test_save_and_load_previous() {
        let mut e = editor();

        assert_eq!(
            e.exec(EditorCmd::Prev).unwrap(),
            Some(String::from("No previously saved points"))
        );

        run(&mut e, &["click 1 2", "release", "click 300 400", "save", "wipe"]);
        assert!(e.store().is_empty());

        run(&mut e, &["prev"]);
        assert_eq!(e.store().points(), &[Point::new(1, 2), Point::new(300, 400)]);
        assert_eq!(e.store().current(), None);

        // A corrupt save leaves the points alone
        let mut e = editor();
        e.kv.set("Save", "not json").unwrap();
        run(&mut e, &["click 7 7"]);
        assert!(e.exec(EditorCmd::Prev).is_err());
        assert_eq!(e.store().points(), &[Point::new(7, 7)]);
    }

    #[test]
    fn test_far_point_saves_and_loads() {
        let mut e = editor();
        run(&mut e, &["click 10 10", "release", "set-x 2e12", "click 0 0", "drag 1e13 -1e13", "save", "wipe"]);

        assert_eq!(
            e.exec(EditorCmd::Prev).unwrap(),
            Some(String::from("Loaded 2 previously saved points"))
        );
        assert_eq!(
            e.store().points(),
            &[
                Point::new(points::MAX_ABS_COORD_MM, 10),
                Point::new(points::MAX_ABS_COORD_MM, -points::MAX_ABS_COORD_MM)
            ]
        );
    }

    #[test]
    fn test_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut e = Editor::new(Params::default(), MemKvStore::default(), dir.path());
        run(&mut e, &["click 0 0", "release", "click 0 -100", "export-points -f points.json", "export-route -f route.txt"]);

        assert_eq!(
            fs::read_to_string(dir.path().join("route.txt")).unwrap(),
            "0\n0\n1\n100\n0"
        );

        run(&mut e, &["wipe", "import-points points.json"]);
        assert_eq!(e.store().points(), &[Point::new(0, 0), Point::new(0, -100)]);

        assert!(matches!(
            e.exec(EditorCmd::ImportPoints {
                file: PathBuf::from("missing.json")
            }),
            Err(EditorError::ReadError(..))
        ));
    }

    #[test]
    fn test_info_listing() {
        let mut e = Editor::new(Params::default(), MemKvStore::default(), std::env::temp_dir());

        let out = e.exec(EditorCmd::Click { x: 10.0, y: 10.0 }).unwrap();
        assert!(out.unwrap().contains("x=   10 y=   10"));

        assert_eq!(e.exec(EditorCmd::Info).unwrap(), Some(String::from("Info off")));
        assert_eq!(e.exec(EditorCmd::Release).unwrap(), None);

        assert_eq!(e.exec(EditorCmd::Overlay).unwrap(), Some(String::from("Overlay on")));
        run(&mut e, &["click 100 10"]);
        assert!(e.listing().contains("corridor"));
    }
}
