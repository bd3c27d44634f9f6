//! Text rendering.

use crate::{cells::BBox, world::World};
use std::fmt::{self, Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The character for a living cell.
pub const ALIVE_GLYPH: char = 'o';

/// The character for a dead cell.
pub const DEAD_GLYPH: char = ' ';

/// A display-only clip of the rendered region.
///
/// A given `height` restricts the rows to `[0, height)`, and a given
/// `width` restricts the columns to `[0, width)`, no matter where the
/// living cells are. An axis without a limit follows the bounding box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Viewport {
    pub height: Option<i64>,
    pub width: Option<i64>,
}

impl Viewport {
    pub const fn new(height: Option<i64>, width: Option<i64>) -> Self {
        Viewport { height, width }
    }

    /// The region to render for a world with the given bounding box.
    pub fn region(&self, bbox: BBox) -> BBox {
        let (min_row, max_row) = self.height.map_or((bbox.min_row, bbox.max_row), |h| (0, h));
        let (min_col, max_col) = self.width.map_or((bbox.min_col, bbox.max_col), |w| (0, w));
        BBox::new(min_row, min_col, max_row, max_col)
    }
}

impl World {
    /// Renders the bounding box, one line per row.
    pub fn render(&self) -> String {
        self.render_region(self.bbox)
    }

    /// Renders the bounding box, clipped by the viewport.
    pub fn render_view(&self, viewport: &Viewport) -> String {
        self.render_region(viewport.region(self.bbox))
    }

    /// Renders an arbitrary region, one line per row.
    ///
    /// Every line, including the last, ends with `'\n'`.
    pub fn render_region(&self, region: BBox) -> String {
        let mut str = String::with_capacity(text_len(region));
        for row in region.min_row..region.max_row {
            for col in region.min_col..region.max_col {
                if self.is_alive((row, col).into()) {
                    str.push(ALIVE_GLYPH)
                } else {
                    str.push(DEAD_GLYPH)
                }
            }
            str.push('\n');
        }
        str
    }
}

/// Length of the text of a region, or `0` if it does not fit in a `usize`.
fn text_len(region: BBox) -> usize {
    region
        .width()
        .checked_add(1)
        .and_then(|line| line.checked_mul(region.height()))
        .and_then(|len| usize::try_from(len).ok())
        .unwrap_or(0)
}

/// Same as [`World::render`].
impl Display for World {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.render())
    }
}
