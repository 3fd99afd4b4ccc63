//! Orthogonal neighbor resolution over a live [`Grid`].

use pathviz_core::{Grid, Pos};

use crate::traits::{Pather, WeightedPather};

/// Passable orthogonal neighbors of `p`, in the fixed order
/// `+col`, `+row`, `-col`, `-row`.
///
/// Out-of-bounds positions and walls are skipped. The grid is read at call
/// time, so walls placed during an animation are honoured immediately.
pub fn passable_neighbors(grid: &Grid, p: Pos) -> Vec<Pos> {
    let mut buf = Vec::with_capacity(4);
    grid.neighbors(p, &mut buf);
    buf
}

impl Pather for Grid {
    fn neighbors(&self, p: Pos, buf: &mut Vec<Pos>) {
        buf.extend(p.neighbors_4().into_iter().filter(|&n| self.is_passable(n)));
    }

    fn passable(&self, p: Pos) -> bool {
        self.is_passable(p)
    }
}

impl WeightedPather for Grid {
    /// Entering a cell costs that cell's weight.
    fn cost(&self, _from: Pos, to: Pos) -> u32 {
        self.weight(to)
    }
}
