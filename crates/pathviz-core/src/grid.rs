//! The [`Grid`] type: the rectangular cell model edited by the user.
//!
//! A `Grid` owns its cells in a flat row-major buffer and tracks where the
//! (at most one) start and end cells are. Search bookkeeping is kept
//! elsewhere, so a `Grid` only ever holds durable state.

use crate::cell::{Cell, Role};
use crate::config::{BASE_WEIGHT, HEAVY_WEIGHT};
use crate::error::{InputError, LayoutError};
use crate::geom::{Dims, Pos};

/// What a primary click changed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Toggle {
    ClearedWall,
    PlacedStart,
    PlacedEnd,
    PlacedWall,
    /// The click hit the start or end cell and had nothing left to do.
    Unchanged,
}

/// What a secondary click changed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WeightToggle {
    Weighted,
    Cleared,
    /// Walls, start and end cannot carry weight.
    Unchanged,
}

/// A rectangular grid of [`Cell`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    dims: Dims,
    cells: Vec<Cell>,
    start: Option<Pos>,
    end: Option<Pos>,
}

impl Grid {
    /// Create a grid of default cells: no start, end or walls, all weight 1.
    pub fn new(dims: Dims) -> Self {
        Self {
            dims,
            cells: vec![Cell::default(); dims.len()],
            start: None,
            end: None,
        }
    }

    /// Assemble a grid from row-major cells, deriving start and end from
    /// the cells' roles.
    pub fn from_cells(dims: Dims, cells: Vec<Cell>) -> Result<Self, LayoutError> {
        if cells.len() != dims.len() {
            return Err(LayoutError::CellCount {
                dims,
                expected: dims.len(),
                found: cells.len(),
            });
        }
        let mut start = None;
        let mut end = None;
        for (i, c) in cells.iter().enumerate() {
            let p = dims.pos(i);
            if !(BASE_WEIGHT..=HEAVY_WEIGHT).contains(&c.weight) {
                return Err(LayoutError::WeightOutOfRange {
                    pos: p,
                    weight: c.weight,
                    min: BASE_WEIGHT,
                    max: HEAVY_WEIGHT,
                });
            }
            match c.role {
                Role::Start => {
                    if let Some(first) = start {
                        return Err(LayoutError::DuplicateStart { first, second: p });
                    }
                    start = Some(p);
                }
                Role::End => {
                    if let Some(first) = end {
                        return Err(LayoutError::DuplicateEnd { first, second: p });
                    }
                    end = Some(p);
                }
                Role::Open | Role::Wall => {}
            }
        }
        Ok(Self {
            dims,
            cells,
            start,
            end,
        })
    }

    /// Parse a textual layout, one line per row.
    ///
    /// `.` open, `#` wall, `~` weighted, `S` start, `E` end. Trailing blank
    /// lines are ignored.
    pub fn from_layout(text: &str) -> Result<Self, LayoutError> {
        let mut lines: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        let cols = lines.first().map_or(0, |l| l.chars().count());
        let mut cells = Vec::with_capacity(lines.len() * cols);
        for (r, line) in lines.iter().enumerate() {
            if line.chars().count() != cols {
                return Err(LayoutError::InconsistentSize);
            }
            for (c, ch) in line.chars().enumerate() {
                let cell = Cell::default();
                let cell = match ch {
                    '.' => cell,
                    '#' => cell.with_role(Role::Wall),
                    '~' => cell.with_weight(HEAVY_WEIGHT),
                    'S' => cell.with_role(Role::Start),
                    'E' => cell.with_role(Role::End),
                    _ => {
                        return Err(LayoutError::InvalidChar {
                            ch,
                            pos: Pos::new(r as i32, c as i32),
                        });
                    }
                };
                cells.push(cell);
            }
        }
        Self::from_cells(Dims::new(lines.len() as i32, cols as i32), cells)
    }

    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// The designated start cell, if any.
    #[inline]
    pub fn start(&self) -> Option<Pos> {
        self.start
    }

    /// The designated end cell, if any.
    #[inline]
    pub fn end(&self) -> Option<Pos> {
        self.end
    }

    /// Read the cell at `p`, or `None` outside the grid.
    #[inline]
    pub fn at(&self, p: Pos) -> Option<Cell> {
        self.dims.index(p).map(|i| self.cells[i])
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Row-major iterator over `(Pos, Cell)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, Cell)> + '_ {
        self.dims.iter().zip(self.cells.iter().copied())
    }

    /// Whether `p` is inside the grid and not a wall.
    #[inline]
    pub fn is_passable(&self, p: Pos) -> bool {
        self.at(p).is_some_and(|c| !c.is_wall())
    }

    /// Traversal cost of entering `p`.
    #[inline]
    pub fn weight(&self, p: Pos) -> u32 {
        self.at(p).map_or(BASE_WEIGHT, |c| c.weight)
    }

    fn index_of(&self, p: Pos) -> Result<usize, InputError> {
        self.dims.index(p).ok_or(InputError::OutOfBounds(p))
    }

    /// Advance the cell at `p` one step along the role chain:
    ///
    /// 1. a wall is cleared;
    /// 2. otherwise, with no start placed and `p` not the end, `p` becomes start;
    /// 3. otherwise, with no end placed and `p` not the start, `p` becomes end;
    /// 4. otherwise a plain cell becomes a wall.
    ///
    /// Exactly one transition happens per call.
    pub fn toggle_wall_or_role(&mut self, p: Pos) -> Result<Toggle, InputError> {
        let i = self.index_of(p)?;
        let cell = &mut self.cells[i];
        let toggle = if cell.is_wall() {
            cell.role = Role::Open;
            Toggle::ClearedWall
        } else if self.start.is_none() && !cell.is_end() {
            cell.role = Role::Start;
            self.start = Some(p);
            Toggle::PlacedStart
        } else if self.end.is_none() && !cell.is_start() {
            cell.role = Role::End;
            self.end = Some(p);
            Toggle::PlacedEnd
        } else if !cell.is_start() && !cell.is_end() {
            cell.role = Role::Wall;
            Toggle::PlacedWall
        } else {
            Toggle::Unchanged
        };
        log::trace!("primary toggle at {p}: {toggle:?}");
        Ok(toggle)
    }

    /// Flip the weight of a plain cell between 1 and the heavy weight.
    pub fn toggle_weight(&mut self, p: Pos) -> Result<WeightToggle, InputError> {
        let i = self.index_of(p)?;
        let cell = &mut self.cells[i];
        if cell.role != Role::Open {
            return Ok(WeightToggle::Unchanged);
        }
        cell.flip_weight();
        let toggle = if cell.is_weighted() {
            WeightToggle::Weighted
        } else {
            WeightToggle::Cleared
        };
        log::trace!("weight toggle at {p}: {toggle:?}");
        Ok(toggle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid5() -> Grid {
        Grid::new(Dims::square(5))
    }

    #[test]
    fn new_grid_is_blank() {
        let g = grid5();
        assert_eq!(g.cells().len(), 25);
        assert!(g.start().is_none() && g.end().is_none());
        assert!(g.iter().all(|(_, c)| c == Cell::default()));
    }

    #[test]
    fn role_chain_start_end_wall_clear() {
        let mut g = grid5();
        let (a, b, c) = (Pos::new(0, 0), Pos::new(4, 4), Pos::new(2, 2));
        assert_eq!(g.toggle_wall_or_role(a), Ok(Toggle::PlacedStart));
        assert_eq!(g.toggle_wall_or_role(b), Ok(Toggle::PlacedEnd));
        assert_eq!(g.toggle_wall_or_role(c), Ok(Toggle::PlacedWall));
        assert!(g.at(c).is_some_and(Cell::is_wall));
        assert_eq!(g.toggle_wall_or_role(c), Ok(Toggle::ClearedWall));
        assert_eq!(g.at(c).map(|c| c.role), Some(Role::Open));
        assert_eq!(g.start(), Some(a));
        assert_eq!(g.end(), Some(b));
    }

    #[test]
    fn start_cell_cannot_become_end() {
        let mut g = grid5();
        let a = Pos::new(1, 1);
        g.toggle_wall_or_role(a).unwrap();
        assert_eq!(g.toggle_wall_or_role(a), Ok(Toggle::Unchanged));
        assert!(g.end().is_none());
        assert!(g.at(a).is_some_and(Cell::is_start));
    }

    #[test]
    fn end_cell_cannot_become_start_or_wall() {
        let mut g = grid5();
        g.toggle_wall_or_role(Pos::new(0, 0)).unwrap();
        g.toggle_wall_or_role(Pos::new(0, 1)).unwrap();
        assert_eq!(g.toggle_wall_or_role(Pos::new(0, 1)), Ok(Toggle::Unchanged));
        assert_eq!(g.toggle_wall_or_role(Pos::new(0, 0)), Ok(Toggle::Unchanged));
    }

    #[test]
    fn cleared_wall_does_not_jump_to_start() {
        let mut g = Grid::from_layout(".....\n.#...\n.....\n.....\n.....").unwrap();
        let w = Pos::new(1, 1);
        assert_eq!(g.toggle_wall_or_role(w), Ok(Toggle::ClearedWall));
        assert!(g.start().is_none());
        assert_eq!(g.toggle_wall_or_role(w), Ok(Toggle::PlacedStart));
    }

    #[test]
    fn toggle_out_of_bounds() {
        let mut g = grid5();
        let p = Pos::new(5, 0);
        assert_eq!(g.toggle_wall_or_role(p), Err(InputError::OutOfBounds(p)));
        assert_eq!(g.toggle_weight(p), Err(InputError::OutOfBounds(p)));
    }

    #[test]
    fn weight_toggle_only_on_plain_cells() {
        let mut g = Grid::from_layout("S#..E\n.....\n.....\n.....\n.....").unwrap();
        assert_eq!(g.toggle_weight(Pos::new(0, 0)), Ok(WeightToggle::Unchanged));
        assert_eq!(g.toggle_weight(Pos::new(0, 1)), Ok(WeightToggle::Unchanged));
        assert_eq!(g.toggle_weight(Pos::new(0, 4)), Ok(WeightToggle::Unchanged));
        let p = Pos::new(2, 2);
        assert_eq!(g.toggle_weight(p), Ok(WeightToggle::Weighted));
        assert_eq!(g.weight(p), HEAVY_WEIGHT);
        assert_eq!(g.toggle_weight(p), Ok(WeightToggle::Cleared));
        assert_eq!(g.weight(p), 1);
    }

    #[test]
    fn layout_parsing() {
        let g = Grid::from_layout("S.~\n.#.\n..E\n\n").unwrap();
        assert_eq!(g.dims(), Dims::new(3, 3));
        assert_eq!(g.start(), Some(Pos::new(0, 0)));
        assert_eq!(g.end(), Some(Pos::new(2, 2)));
        assert_eq!(g.weight(Pos::new(0, 2)), HEAVY_WEIGHT);
        assert!(!g.is_passable(Pos::new(1, 1)));
        assert!(!g.is_passable(Pos::new(-1, 0)));
        assert!(g.is_passable(Pos::new(1, 0)));
    }

    #[test]
    fn layout_errors() {
        assert_eq!(
            Grid::from_layout("...\n..").unwrap_err(),
            LayoutError::InconsistentSize
        );
        assert_eq!(
            Grid::from_layout("..x").unwrap_err(),
            LayoutError::InvalidChar {
                ch: 'x',
                pos: Pos::new(0, 2)
            }
        );
        assert!(matches!(
            Grid::from_layout("S.S").unwrap_err(),
            LayoutError::DuplicateStart { .. }
        ));
        assert!(matches!(
            Grid::from_layout("E\nE").unwrap_err(),
            LayoutError::DuplicateEnd { .. }
        ));
    }

    #[test]
    fn from_cells_checks_count_and_weight() {
        let d = Dims::new(2, 2);
        assert!(matches!(
            Grid::from_cells(d, vec![Cell::default(); 3]),
            Err(LayoutError::CellCount { expected: 4, found: 3, .. })
        ));
        let mut cells = vec![Cell::default(); 4];
        cells[3].weight = 0;
        assert!(matches!(
            Grid::from_cells(d, cells),
            Err(LayoutError::WeightOutOfRange { pos, weight: 0, .. }) if pos == Pos::new(1, 1)
        ));
    }

    #[test]
    fn from_cells_rejects_weights_above_heavy() {
        let d = Dims::new(2, 2);
        let mut cells = vec![Cell::default(); 4];
        cells[1].weight = HEAVY_WEIGHT;
        assert!(Grid::from_cells(d, cells.clone()).is_ok());
        cells[2].weight = u32::MAX;
        assert!(matches!(
            Grid::from_cells(d, cells),
            Err(LayoutError::WeightOutOfRange {
                pos,
                weight: u32::MAX,
                max: HEAVY_WEIGHT,
                ..
            }) if pos == Pos::new(1, 0)
        ));
    }
}
