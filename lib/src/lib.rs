//! __Rust Life__ simulates Conway's Game of Life on an unbounded grid,
//! and renders each generation as text.
//!
//! The grid is stored sparsely, as the set of living cells. A generation is
//! advanced by an island search over the living cells; see [`World::step`].
//!
//! # Example
//!
//! ```rust
//! use rlife_lib::{Coord, Rule, World};
//!
//! let blinker = (0..3).map(|col| Coord::new(0, col));
//! let mut world = World::from_cells(blinker, Rule::default())?;
//! world.step();
//! assert_eq!(world.render(), "o\no\no\n");
//! # Ok::<(), rlife_lib::Error>(())
//! ```

mod cells;
mod config;
mod driver;
mod error;
mod render;
pub mod rules;
mod world;

pub use cells::{BBox, Coord};
pub use config::{Config, MAX_VIEW_SIZE};
pub use driver::{Delay, Driver, Frame, Renderer, Status, StopHandle};
pub use error::Error;
pub use render::{Viewport, ALIVE_GLYPH, DEAD_GLYPH};
pub use rules::{NeighborRange, Rule};
pub use world::World;
