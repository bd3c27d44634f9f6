//! The world.

use crate::{
    cells::{BBox, BBoxTracker, Coord},
    error::Error,
    rules::Rule,
};
use rand::Rng;
use std::collections::{hash_set, HashSet};

mod island;

/// One generation of the cellular automaton.
///
/// Only living cells are stored; every other cell of the infinite grid
/// is dead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct World {
    /// The rule of the cellular automaton.
    pub(crate) rule: Rule,

    /// All living cells.
    pub(crate) alive: HashSet<Coord>,

    /// A box containing every living cell.
    ///
    /// Right after [`seed`](World::seed) it is the whole seeding rectangle;
    /// after each step it is the tight enclosure of the living cells.
    pub(crate) bbox: BBox,
}

impl World {
    /// Fills the rectangle `[0, height) x [0, width)` at random.
    ///
    /// Each cell is alive with probability `density`, independently.
    /// A `density` outside `[0, 1]` is not an error here: it just gives
    /// an empty or a full rectangle.
    pub fn seed<G: Rng + ?Sized>(
        height: i64,
        width: i64,
        density: f64,
        rule: Rule,
        rng: &mut G,
    ) -> Result<Self, Error> {
        if height <= 0 {
            return Err(Error::InvalidDimension {
                name: "height",
                value: height,
            });
        }
        if width <= 0 {
            return Err(Error::InvalidDimension {
                name: "width",
                value: width,
            });
        }
        rule.validate()?;

        let bbox = BBox::new(0, 0, height, width);
        let alive = bbox
            .cells()
            .filter(|_| rng.gen::<f64>() < density)
            .collect();
        Ok(World { rule, alive, bbox })
    }

    /// A world with exactly the given living cells.
    ///
    /// The bounding box is their tight enclosure.
    /// Returns an error if the rule is invalid.
    pub fn from_cells<I>(cells: I, rule: Rule) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Coord>,
    {
        rule.validate()?;
        let mut tracker = BBoxTracker::default();
        let alive = cells
            .into_iter()
            .inspect(|&coord| tracker.add(coord))
            .collect();
        let bbox = tracker.finish(BBox::new(0, 0, 0, 0));
        Ok(World { rule, alive, bbox })
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn bbox(&self) -> BBox {
        self.bbox
    }

    /// The set of living cells.
    pub fn alive(&self) -> &HashSet<Coord> {
        &self.alive
    }

    /// Iterates over the living cells, in no particular order.
    pub fn cells(&self) -> hash_set::Iter<'_, Coord> {
        self.alive.iter()
    }

    /// Number of living cells.
    pub fn population(&self) -> usize {
        self.alive.len()
    }

    #[inline]
    pub fn is_alive(&self, coord: Coord) -> bool {
        self.alive.contains(&coord)
    }

    /// Number of living cells among the eight neighbors.
    #[inline]
    pub fn live_neighbors(&self, coord: Coord) -> u32 {
        coord.neighbors().filter(|&c| self.is_alive(c)).count() as u32
    }

    /// Whether the cell is alive in the next generation.
    #[inline]
    pub(crate) fn lives_next(&self, coord: Coord) -> bool {
        self.rule.decide(self.is_alive(coord), self.live_neighbors(coord))
    }

    /// Replaces the living cells with the next generation.
    ///
    /// When no cell survives, the box collapses to the minimum corner of
    /// the old one.
    fn advance(&mut self, alive: HashSet<Coord>, tracker: BBoxTracker) {
        self.bbox = tracker.finish(self.bbox.collapsed());
        self.alive = alive;
    }

    /// Advances one generation by examining every cell of the bounding box
    /// grown by one on each side.
    ///
    /// Slow on sparse worlds. [`step`](World::step) gives the same result.
    pub fn step_full_scan(&mut self) {
        let mut alive = HashSet::new();
        let mut tracker = BBoxTracker::default();
        for coord in self.bbox.expanded().cells() {
            if self.lives_next(coord) {
                alive.insert(coord);
                tracker.add(coord);
            }
        }
        self.advance(alive, tracker);
    }
}
