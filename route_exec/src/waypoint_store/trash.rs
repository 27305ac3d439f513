//! Bounded trash of removed points

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::collections::VecDeque;

use comms_if::points::Point;
use log::trace;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A last-in first-out stack of removed points.
///
/// Once full, pushing discards the oldest point.
#[derive(Debug, Clone)]
pub struct Trash {
    points: VecDeque<Point>,
    capacity: usize,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Trash {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, point: Point) {
        self.points.push_back(point);

        if self.points.len() > self.capacity {
            if let Some(p) = self.points.pop_front() {
                trace!("Trash full, discarding {:?}", p);
            }
        }
    }

    pub fn pop(&mut self) -> Option<Point> {
        self.points.pop_back()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
