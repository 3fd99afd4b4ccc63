//! Terminal rendering of the cell display.
//!
//! [`TermDisplay`] keeps the set of classes carried by every cell and draws
//! the grid with crossterm, two terminal columns per cell.

use std::io::{self, Write};
use std::ops::{BitAnd, BitOr, Not};

use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use pathviz_core::{CellClass, CellDisplay, Dims, DisplayCmd, Pos};

/// Terminal columns used by one cell.
pub const CELL_WIDTH: u16 = 2;

// ---------------------------------------------------------------------------
// ClassMask
// ---------------------------------------------------------------------------

/// Bitmask of the [`CellClass`]es a cell carries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct ClassMask(pub u8);

impl ClassMask {
    pub const NONE: Self = Self(0);
    pub const START: Self = Self(1 << 0);
    pub const END: Self = Self(1 << 1);
    pub const WALL: Self = Self(1 << 2);
    pub const WEIGHTED: Self = Self(1 << 3);
    pub const VISITED: Self = Self(1 << 4);
    pub const PATH: Self = Self(1 << 5);
    pub const SEARCH: Self = Self(Self::VISITED.0 | Self::PATH.0);

    /// Whether this mask contains all bits of `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl From<CellClass> for ClassMask {
    fn from(c: CellClass) -> Self {
        match c {
            CellClass::Start => Self::START,
            CellClass::End => Self::END,
            CellClass::Wall => Self::WALL,
            CellClass::Weighted => Self::WEIGHTED,
            CellClass::Visited => Self::VISITED,
            CellClass::Path => Self::PATH,
        }
    }
}

impl BitOr for ClassMask {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for ClassMask {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for ClassMask {
    type Output = Self;
    #[inline]
    fn not(self) -> Self {
        Self(!self.0)
    }
}

/// Glyph pair and colours for a cell, highest-priority class first.
fn look(mask: ClassMask) -> (&'static str, Color, Color) {
    if mask.contains(ClassMask::START) {
        ("S ", Color::Black, Color::Green)
    } else if mask.contains(ClassMask::END) {
        ("E ", Color::Black, Color::Red)
    } else if mask.contains(ClassMask::WALL) {
        ("  ", Color::Reset, Color::DarkGrey)
    } else if mask.contains(ClassMask::PATH) {
        ("··", Color::Black, Color::Yellow)
    } else if mask.contains(ClassMask::VISITED) {
        let glyph = if mask.contains(ClassMask::WEIGHTED) { "~~" } else { "  " };
        (glyph, Color::White, Color::DarkCyan)
    } else if mask.contains(ClassMask::WEIGHTED) {
        ("~~", Color::DarkYellow, Color::Reset)
    } else {
        ("· ", Color::DarkGrey, Color::Reset)
    }
}

// ---------------------------------------------------------------------------
// TermDisplay
// ---------------------------------------------------------------------------

/// Cell display backed by the terminal.
#[derive(Debug, Default)]
pub struct TermDisplay {
    dims: Dims,
    cells: Vec<ClassMask>,
    dirty: bool,
}

impl TermDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Classes currently carried by `p`.
    pub fn classes(&self, p: Pos) -> ClassMask {
        self.dims
            .index(p)
            .map_or(ClassMask::NONE, |i| self.cells[i])
    }

    /// Whether anything changed since the last [`draw`](Self::draw).
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Request a full redraw.
    #[inline]
    pub fn touch(&mut self) {
        self.dirty = true;
    }

    /// Map a terminal position to the cell drawn there, if any.
    pub fn hit(&self, origin: (u16, u16), column: u16, row: u16) -> Option<Pos> {
        let (ox, oy) = origin;
        if column < ox || row < oy {
            return None;
        }
        let p = Pos::new((row - oy) as i32, ((column - ox) / CELL_WIDTH) as i32);
        self.dims.contains(p).then_some(p)
    }

    /// Draw the whole grid at `origin` followed by the status lines.
    pub fn draw<W: Write>(
        &mut self,
        out: &mut W,
        origin: (u16, u16),
        status: &[&str],
    ) -> io::Result<()> {
        let (ox, oy) = origin;
        let dims = self.dims();
        queue!(out, terminal::Clear(ClearType::All))?;
        for row in 0..dims.rows {
            queue!(out, cursor::MoveTo(ox, oy + row as u16))?;
            for col in 0..dims.cols {
                let (glyph, fg, bg) = look(self.classes(Pos::new(row, col)));
                queue!(
                    out,
                    SetForegroundColor(fg),
                    SetBackgroundColor(bg),
                    Print(glyph)
                )?;
            }
            queue!(out, ResetColor)?;
        }
        let below = oy + dims.rows as u16 + 1;
        for (i, line) in status.iter().enumerate() {
            queue!(out, cursor::MoveTo(ox, below + i as u16), Print(line))?;
        }
        out.flush()?;
        self.dirty = false;
        Ok(())
    }
}

impl CellDisplay for TermDisplay {
    fn apply(&mut self, cmd: DisplayCmd) {
        match cmd {
            DisplayCmd::Rebuild(dims) => {
                self.dims = dims;
                self.cells.clear();
                self.cells.resize(dims.len(), ClassMask::NONE);
            }
            DisplayCmd::ClearSearch => {
                for m in self.cells.iter_mut() {
                    *m = *m & !ClassMask::SEARCH;
                }
            }
            DisplayCmd::Mark(id, class) => {
                if let Some(i) = self.dims.index(id.pos()) {
                    self.cells[i] = self.cells[i] | class.into();
                }
            }
            DisplayCmd::Unmark(id, class) => {
                if let Some(i) = self.dims.index(id.pos()) {
                    self.cells[i] = self.cells[i] & !ClassMask::from(class);
                }
            }
        }
        self.dirty = true;
    }
}
