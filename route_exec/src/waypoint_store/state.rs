//! Waypoint store state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use comms_if::points::{clamp_coord, Direction, Point};
use log::{debug, trace};
use util::maths;

// Internal
use super::{Pick, Trash};
use crate::params::{Params, PickPolicy};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The route being edited.
///
/// Points are only ever appended at, or removed from, the tail. Both cursors
/// are always either `None` or a valid index into the route. Coordinates are
/// held within `MAX_ABS_COORD_MM` of zero so the route can always be imported
/// again.
#[derive(Debug, Clone)]
pub struct WaypointStore {
    points: Vec<Point>,

    /// Point shown and edited in the point menu
    current: Option<usize>,

    /// Point following the pointer
    holding: Option<usize>,

    trash: Trash,

    pick_policy: PickPolicy,
    clear_trash_on_wipe: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl WaypointStore {
    /// Create an empty store.
    pub fn new(params: &Params) -> Self {
        Self {
            points: Vec::new(),
            current: None,
            holding: None,
            trash: Trash::new(params.trash_capacity),
            pick_policy: params.pick_policy,
            clear_trash_on_wipe: params.clear_trash_on_wipe,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Index of the selected point.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Index of the point being dragged.
    pub fn holding(&self) -> Option<usize> {
        self.holding
    }

    pub fn selected(&self) -> Option<&Point> {
        self.current.and_then(|i| self.points.get(i))
    }

    pub fn trash(&self) -> &Trash {
        &self.trash
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    // ---- STRUCTURAL EDITS ----

    /// Append a point at the tail and select it.
    pub fn append(&mut self, point: Point) -> usize {
        let point = Point {
            x: clamp_coord(point.x),
            y: clamp_coord(point.y),
            ..point
        };
        self.points.push(point);

        let index = self.points.len() - 1;
        self.current = Some(index);

        debug!("Point {} created at ({}, {})", index, point.x, point.y);

        index
    }

    /// Move the tail point into the trash.
    pub fn remove_last(&mut self) -> Option<Point> {
        let point = self.points.pop()?;
        self.trash.push(point);
        self.invalidate_cursors();

        debug!("Point {} removed ({} in trash)", self.points.len(), self.trash.len());

        Some(point)
    }

    /// Put the most recently removed point back on the tail.
    ///
    /// Cursors are left as they are.
    pub fn restore_last(&mut self) -> Option<Point> {
        let point = self.trash.pop()?;
        self.points.push(point);

        debug!("Point {} restored ({} in trash)", self.points.len() - 1, self.trash.len());

        Some(point)
    }

    /// Remove every point.
    pub fn wipe(&mut self) {
        self.points.clear();
        self.invalidate_cursors();

        if self.clear_trash_on_wipe {
            self.trash.clear();
        }

        debug!("Route wiped");
    }

    /// Replace the whole route, as done on import.
    ///
    /// Both cursors are cleared, the trash is kept.
    pub fn replace(&mut self, points: Vec<Point>) {
        self.points = points;
        self.current = None;
        self.holding = None;

        debug!("Route replaced with {} points", self.points.len());
    }

    // ---- SELECTION EDITS ----

    /// Shift the selected point.
    pub fn move_selected(&mut self, dx: i64, dy: i64) {
        if let Some(p) = self.selected_mut() {
            p.x = clamp_coord(p.x.saturating_add(dx));
            p.y = clamp_coord(p.y.saturating_add(dy));
        }
    }

    pub fn set_selected_position(&mut self, x: i64, y: i64) {
        if let Some(p) = self.selected_mut() {
            p.x = clamp_coord(x);
            p.y = clamp_coord(y);
        }
    }

    pub fn set_selected_x(&mut self, x: i64) {
        if let Some(p) = self.selected_mut() {
            p.x = clamp_coord(x);
        }
    }

    pub fn set_selected_y(&mut self, y: i64) {
        if let Some(p) = self.selected_mut() {
            p.y = clamp_coord(y);
        }
    }

    pub fn set_selected_direction(&mut self, d: Direction) {
        if let Some(p) = self.selected_mut() {
            p.d = d;
        }
    }

    pub fn set_selected_function(&mut self, f: u32) {
        if let Some(p) = self.selected_mut() {
            p.f = f;
        }
    }

    // ---- POINTER ----

    /// Handle a pointer press at `query`.
    ///
    /// A point within `radius_mm` of the query is selected and picked up,
    /// chosen according to the pick policy. Otherwise a new point is created
    /// at the query, then selected and picked up.
    pub fn select_nearest(&mut self, query: (i64, i64), radius_mm: f64) -> Pick {
        let query_f = (query.0 as f64, query.1 as f64);

        let in_range = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| (i, maths::distance(p.position(), query_f)))
            .filter(|(_, dist)| *dist <= radius_mm);

        let hit = match self.pick_policy {
            PickPolicy::First => in_range.map(|(i, _)| i).next(),
            PickPolicy::Last => in_range.map(|(i, _)| i).last(),
            // min_by keeps the first of equal elements
            PickPolicy::Closest => in_range.min_by(|a, b| a.1.total_cmp(&b.1)).map(|(i, _)| i),
        };

        let pick = match hit {
            Some(i) => Pick::Existing(i),
            None => Pick::Created(self.append(Point::new(query.0, query.1))),
        };

        let index = match pick {
            Pick::Existing(i) | Pick::Created(i) => i,
        };
        self.current = Some(index);
        self.holding = Some(index);

        trace!("Pointer press at {:?}: {:?}", query, pick);

        pick
    }

    /// Move the held point to `query`, if any point is held.
    pub fn drag_to(&mut self, query: (i64, i64)) {
        if let Some(p) = self.holding.and_then(|i| self.points.get_mut(i)) {
            p.x = clamp_coord(query.0);
            p.y = clamp_coord(query.1);
        }
    }

    /// Let go of the held point.
    pub fn release_drag(&mut self) {
        self.holding = None;
    }

    // ---- PRIVATE ----

    fn selected_mut(&mut self) -> Option<&mut Point> {
        match self.current {
            Some(i) => self.points.get_mut(i),
            None => None,
        }
    }

    /// Clear any cursor left pointing past the end of the route.
    ///
    /// Must be called by every edit that shrinks the route.
    fn invalidate_cursors(&mut self) {
        let len = self.points.len();

        if matches!(self.current, Some(i) if i >= len) {
            self.current = None;
        }
        if matches!(self.holding, Some(i) if i >= len) {
            self.holding = None;
        }
    }
}

impl Default for WaypointStore {
    fn default() -> Self {
        Self::new(&Params::default())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::points::MAX_ABS_COORD_MM;

    fn store_with(points: &[(i64, i64)]) -> WaypointStore {
        let mut store = WaypointStore::default();
        for p in points {
            store.append(Point::new(p.0, p.1));
        }
        store
    }

    #[test]
    fn test_append_selects_tail() {
        let mut store = WaypointStore::default();
        assert_eq!(store.current(), None);

        assert_eq!(store.append(Point::new(10, 20)), 0);
        assert_eq!(store.current(), Some(0));
        assert_eq!(store.append(Point::new(30, 40)), 1);
        assert_eq!(store.current(), Some(1));
        assert_eq!(store.holding(), None);
        assert_eq!(store.selected(), Some(&Point::new(30, 40)));
    }

    #[test]
    fn test_remove_until_empty_clears_cursors() {
        let mut store = store_with(&[(0, 0), (10, 0), (20, 0)]);
        store.select_nearest((10, 0), 5.0);
        assert_eq!(store.current(), Some(1));
        assert_eq!(store.holding(), Some(1));

        // Removing the tail leaves index 1 valid
        store.remove_last();
        assert_eq!(store.current(), Some(1));
        assert_eq!(store.holding(), Some(1));

        store.remove_last();
        assert_eq!(store.current(), None);
        assert_eq!(store.holding(), None);

        store.remove_last();
        assert!(store.is_empty());
        assert_eq!(store.current(), None);
        assert_eq!(store.holding(), None);

        // No-op on an empty route
        assert_eq!(store.remove_last(), None);
        assert_eq!(store.trash().len(), 3);
    }

    #[test]
    fn test_remove_then_restore() {
        let mut store = store_with(&[(0, 0), (10, 0), (20, 5)]);
        store.set_selected_function(4);
        let before = store.points().to_vec();

        store.remove_last();
        assert_eq!(store.len(), 2);
        store.restore_last();
        assert_eq!(store.points(), &before[..]);

        // Cursors aren't restored
        assert_eq!(store.current(), None);

        // Nothing left to restore
        assert_eq!(store.restore_last(), None);
        assert_eq!(store.points(), &before[..]);
    }

    #[test]
    fn test_wipe_keeps_trash() {
        let mut store = store_with(&[(0, 0), (10, 0)]);
        store.remove_last();
        store.wipe();

        assert!(store.is_empty());
        assert_eq!(store.current(), None);
        assert_eq!(store.trash().len(), 1);

        // The trashed point can still come back
        store.restore_last();
        assert_eq!(store.points(), &[Point::new(10, 0)]);

        let mut store = WaypointStore::new(&Params {
            clear_trash_on_wipe: true,
            ..Params::default()
        });
        store.append(Point::new(1, 1));
        store.remove_last();
        store.wipe();
        assert!(store.trash().is_empty());
    }

    #[test]
    fn test_selection_edits() {
        let mut store = store_with(&[(0, 0), (10, 0)]);
        store.move_selected(-1, 1);
        store.set_selected_direction(Direction::Backwards);
        store.set_selected_function(9);
        assert_eq!(store.points()[1], Point::with(9, 1, Direction::Backwards, 9));

        store.set_selected_x(50);
        store.set_selected_y(60);
        assert_eq!(store.selected().map(|p| (p.x, p.y)), Some((50, 60)));

        store.set_selected_position(70, 80);
        assert_eq!(store.selected().map(|p| (p.x, p.y)), Some((70, 80)));
    }

    #[test]
    fn test_selection_edits_without_selection() {
        let mut store = store_with(&[(0, 0)]);
        store.replace(store.points().to_vec());
        let before = store.points().to_vec();

        store.move_selected(5, 5);
        store.set_selected_position(1, 1);
        store.set_selected_direction(Direction::Backwards);
        store.set_selected_function(3);

        assert_eq!(store.points(), &before[..]);
    }

    #[test]
    fn test_select_nearest_creates() {
        let mut store = store_with(&[(0, 0)]);

        assert_eq!(store.select_nearest((100, 100), 25.0), Pick::Created(1));
        assert_eq!(store.points()[1], Point::new(100, 100));
        assert_eq!(store.current(), Some(1));
        assert_eq!(store.holding(), Some(1));
    }

    #[test]
    fn test_select_nearest_radius_inclusive() {
        let mut store = store_with(&[(0, 0), (300, 0)]);

        assert_eq!(store.select_nearest((15, 20), 25.0), Pick::Existing(0));
        assert_eq!(store.current(), Some(0));
        assert_eq!(store.holding(), Some(0));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_select_nearest_policies() {
        let points = [(0, 0), (20, 0), (12, 0)];

        let mut last = store_with(&points);
        assert_eq!(last.select_nearest((9, 0), 25.0), Pick::Existing(2));

        let mut first = WaypointStore::new(&Params {
            pick_policy: PickPolicy::First,
            ..Params::default()
        });
        let mut closest = WaypointStore::new(&Params {
            pick_policy: PickPolicy::Closest,
            ..Params::default()
        });
        for p in points.iter() {
            first.append(Point::new(p.0, p.1));
            closest.append(Point::new(p.0, p.1));
        }

        assert_eq!(first.select_nearest((9, 0), 25.0), Pick::Existing(0));
        assert_eq!(closest.select_nearest((9, 0), 25.0), Pick::Existing(2));

        // A tie goes to the earlier point
        let mut tie = WaypointStore::new(&Params {
            pick_policy: PickPolicy::Closest,
            ..Params::default()
        });
        tie.append(Point::new(0, 0));
        tie.append(Point::new(20, 0));
        assert_eq!(tie.select_nearest((10, 0), 10.0), Pick::Existing(0));
    }

    #[test]
    fn test_drag() {
        let mut store = store_with(&[(0, 0), (100, 0)]);

        // Nothing held
        store.replace(store.points().to_vec());
        store.drag_to((5, 5));
        assert_eq!(store.points()[0], Point::new(0, 0));

        store.select_nearest((2, 2), 25.0);
        store.drag_to((40, 50));
        assert_eq!(store.points()[0], Point::new(40, 50));

        store.release_drag();
        assert_eq!(store.holding(), None);
        assert_eq!(store.current(), Some(0));

        store.drag_to((0, 0));
        assert_eq!(store.points()[0], Point::new(40, 50));
    }

    #[test]
    fn test_replace_clears_cursors() {
        let mut store = store_with(&[(0, 0), (100, 0)]);
        store.select_nearest((100, 0), 25.0);
        store.remove_last();

        store.replace(vec![Point::new(1, 2)]);
        assert_eq!(store.points(), &[Point::new(1, 2)]);
        assert_eq!(store.current(), None);
        assert_eq!(store.holding(), None);
        assert_eq!(store.trash().len(), 1);
    }

    #[test]
    fn test_coords_held_in_range() {
        let mut store = store_with(&[(0, 0)]);

        store.set_selected_x(2_000_000_000_000);
        assert_eq!(store.points()[0].x, MAX_ABS_COORD_MM);

        store.move_selected(i64::MAX, i64::MIN);
        assert_eq!(store.points()[0].x, MAX_ABS_COORD_MM);
        assert_eq!(store.points()[0].y, -MAX_ABS_COORD_MM);

        store.set_selected_position(-5, i64::MAX);
        assert_eq!(store.selected().map(|p| (p.x, p.y)), Some((-5, MAX_ABS_COORD_MM)));

        assert_eq!(store.select_nearest((10_000_000_000_000, 0), 25.0), Pick::Created(1));
        assert_eq!(store.points()[1], Point::new(MAX_ABS_COORD_MM, 0));

        store.drag_to((0, -10_000_000_000_000));
        assert_eq!(store.points()[1], Point::new(0, -MAX_ABS_COORD_MM));
    }
}
