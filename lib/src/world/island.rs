//! Island search: advancing a generation by walking the living cells.
//!
//! A cell can only be alive in the next generation if it, or one of its
//! neighbors, is alive now. So instead of scanning the whole bounding box,
//! we flood through each connected island of living cells and examine the
//! 3x3 block around every living cell we meet. Dead cells on the border of
//! an island are examined but never walked through.

use super::World;
use crate::cells::{BBoxTracker, Coord};
use std::collections::HashSet;

impl World {
    /// Advances one generation.
    ///
    /// The work is proportional to the number of living cells, not to the
    /// area of the bounding box. The result, bounding box included, is the
    /// same as [`step_full_scan`](World::step_full_scan).
    pub fn step(&mut self) {
        let mut alive = HashSet::with_capacity(self.alive.len());
        let mut tracker = BBoxTracker::default();

        // Cells whose next state is already decided.
        let mut examined: HashSet<Coord> = HashSet::with_capacity(self.alive.len() * 4);
        // Living cells whose neighborhood has been, or is about to be, examined.
        let mut visited: HashSet<Coord> = HashSet::with_capacity(self.alive.len());
        let mut stack = Vec::new();

        for &start in &self.alive {
            if !visited.insert(start) {
                continue;
            }
            stack.push(start);

            while let Some(cell) = stack.pop() {
                for coord in cell.nbhd() {
                    if examined.insert(coord) && self.lives_next(coord) {
                        alive.insert(coord);
                        tracker.add(coord);
                    }
                    if self.is_alive(coord) && visited.insert(coord) {
                        stack.push(coord);
                    }
                }
            }
        }

        self.advance(alive, tracker);
    }
}
