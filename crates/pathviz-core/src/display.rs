//! The cell display sink.
//!
//! Rendering is external to the core: everything the visualizer wants shown
//! is expressed as [`DisplayCmd`]s adding or removing a [`CellClass`] on a
//! cell identified by a [`CellId`]. Front-ends implement [`CellDisplay`].

use std::fmt;

use crate::geom::{Dims, Pos};
use crate::grid::Grid;

/// Stable identifier of a rendered cell, derived from its position.
///
/// Formats as `cell-{row}-{col}`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub Pos);

impl CellId {
    #[inline]
    pub const fn pos(self) -> Pos {
        self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell-{}-{}", self.0.row, self.0.col)
    }
}

/// A visual class a cell can carry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CellClass {
    Start,
    End,
    Wall,
    Weighted,
    Visited,
    Path,
}

impl CellClass {
    /// Style-class name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
            Self::Wall => "wall",
            Self::Weighted => "weighted",
            Self::Visited => "visited",
            Self::Path => "path",
        }
    }

    /// Classes produced by a search rather than by editing.
    pub const fn is_search(self) -> bool {
        matches!(self, Self::Visited | Self::Path)
    }
}

impl fmt::Display for CellClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One instruction to the display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplayCmd {
    /// Discard every cell and lay out a blank grid of the given size.
    Rebuild(Dims),
    /// Remove the visited and path classes from every cell.
    ClearSearch,
    Mark(CellId, CellClass),
    Unmark(CellId, CellClass),
}

/// Sink for display commands.
///
/// Only [`apply`](CellDisplay::apply) is required; the named helpers are
/// shorthands for the individual commands.
pub trait CellDisplay {
    fn apply(&mut self, cmd: DisplayCmd);

    fn rebuild(&mut self, dims: Dims) {
        self.apply(DisplayCmd::Rebuild(dims));
    }

    fn clear_search(&mut self) {
        self.apply(DisplayCmd::ClearSearch);
    }

    fn mark_visited(&mut self, id: CellId) {
        self.apply(DisplayCmd::Mark(id, CellClass::Visited));
    }

    fn mark_path(&mut self, id: CellId) {
        self.apply(DisplayCmd::Mark(id, CellClass::Path));
    }

    fn mark_wall(&mut self, id: CellId) {
        self.apply(DisplayCmd::Mark(id, CellClass::Wall));
    }

    fn clear_wall(&mut self, id: CellId) {
        self.apply(DisplayCmd::Unmark(id, CellClass::Wall));
    }

    fn mark_start(&mut self, id: CellId) {
        self.apply(DisplayCmd::Mark(id, CellClass::Start));
    }

    fn mark_end(&mut self, id: CellId) {
        self.apply(DisplayCmd::Mark(id, CellClass::End));
    }

    fn mark_weighted(&mut self, id: CellId) {
        self.apply(DisplayCmd::Mark(id, CellClass::Weighted));
    }

    fn clear_weighted(&mut self, id: CellId) {
        self.apply(DisplayCmd::Unmark(id, CellClass::Weighted));
    }
}

impl<D: CellDisplay + ?Sized> CellDisplay for &mut D {
    fn apply(&mut self, cmd: DisplayCmd) {
        (**self).apply(cmd);
    }
}

/// Emit a rebuild followed by the durable classes of every cell in `grid`.
pub fn paint<D: CellDisplay + ?Sized>(grid: &Grid, out: &mut D) {
    out.rebuild(grid.dims());
    for (p, cell) in grid.iter() {
        let id = CellId(p);
        if cell.is_wall() {
            out.mark_wall(id);
        }
        if cell.is_start() {
            out.mark_start(id);
        }
        if cell.is_end() {
            out.mark_end(id);
        }
        if cell.is_weighted() {
            out.mark_weighted(id);
        }
    }
}

// ---------------------------------------------------------------------------
// Recorder
// ---------------------------------------------------------------------------

/// A display that records every command it receives.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    cmds: Vec<DisplayCmd>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands received so far, oldest first.
    pub fn commands(&self) -> &[DisplayCmd] {
        &self.cmds
    }

    /// Take the recorded commands, leaving the recorder empty.
    pub fn take(&mut self) -> Vec<DisplayCmd> {
        std::mem::take(&mut self.cmds)
    }

    /// Cells that received a `Mark` of `class`, in order.
    pub fn marked(&self, class: CellClass) -> Vec<Pos> {
        self.cmds
            .iter()
            .filter_map(|c| match c {
                DisplayCmd::Mark(id, k) if *k == class => Some(id.pos()),
                _ => None,
            })
            .collect()
    }
}

impl CellDisplay for Recorder {
    fn apply(&mut self, cmd: DisplayCmd) {
        self.cmds.push(cmd);
    }
}
