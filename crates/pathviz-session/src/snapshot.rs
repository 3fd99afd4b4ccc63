//! Grid snapshots: the durable fields of every cell, row-major.
//!
//! ## JSON format
//! ```text
//! {
//!   "rows": 5,
//!   "cols": 5,
//!   "cells": [
//!     { "isWall": false, "isStart": true, "isEnd": false, "weight": 1 },
//!     ...
//!   ]
//! }
//! ```
//! A missing `weight` reads as 1; weights outside `1..=5` are rejected.

use serde::{Deserialize, Serialize};

use pathviz_core::config::BASE_WEIGHT;
use pathviz_core::{Cell, Dims, Grid, Role};

use crate::error::PersistenceError;

fn base_weight() -> u32 {
    BASE_WEIGHT
}

/// Durable state of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellRecord {
    pub is_wall: bool,
    pub is_start: bool,
    pub is_end: bool,
    #[serde(default = "base_weight")]
    pub weight: u32,
}

impl From<Cell> for CellRecord {
    fn from(c: Cell) -> Self {
        Self {
            is_wall: c.is_wall(),
            is_start: c.is_start(),
            is_end: c.is_end(),
            weight: c.weight,
        }
    }
}

impl CellRecord {
    /// The role encoded by the flags, or `None` if more than one is set.
    fn role(&self) -> Option<Role> {
        match (self.is_wall, self.is_start, self.is_end) {
            (false, false, false) => Some(Role::Open),
            (true, false, false) => Some(Role::Wall),
            (false, true, false) => Some(Role::Start),
            (false, false, true) => Some(Role::End),
            _ => None,
        }
    }
}

/// A saved grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub rows: i32,
    pub cols: i32,
    pub cells: Vec<CellRecord>,
}

impl Snapshot {
    #[inline]
    pub fn dims(&self) -> Dims {
        Dims::new(self.rows, self.cols)
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, PersistenceError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Capture the durable fields of `grid`.
pub fn serialize(grid: &Grid) -> Snapshot {
    let dims = grid.dims();
    Snapshot {
        rows: dims.rows,
        cols: dims.cols,
        cells: grid.cells().iter().map(|&c| CellRecord::from(c)).collect(),
    }
}

/// Rebuild a grid of `current` dimensions from `snapshot`.
///
/// Start and end are recomputed from the cell flags. Fails without side
/// effects if the shapes differ or the cells are inconsistent.
pub fn deserialize(snapshot: &Snapshot, current: Dims) -> Result<Grid, PersistenceError> {
    let found = snapshot.dims();
    if found != current {
        return Err(PersistenceError::ShapeMismatch {
            expected: current,
            found,
        });
    }
    let cells = snapshot
        .cells
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            rec.role()
                .map(|role| Cell::default().with_role(role).with_weight(rec.weight))
                .ok_or_else(|| PersistenceError::ConflictingRoles(current.pos(i)))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Grid::from_cells(current, cells)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathviz_core::{LayoutError, Pos};

    fn round_trip(layout: &str) {
        let g = Grid::from_layout(layout).unwrap();
        let snap = serialize(&g);
        assert_eq!(snap.cells.len(), g.dims().len());
        let back = deserialize(&snap, g.dims()).unwrap();
        assert_eq!(back, g);
        assert_eq!(back.start(), g.start());
        assert_eq!(back.end(), g.end());
    }

    #[test]
    fn round_trip_variants() {
        round_trip("S...E\n.#~#.\n.....\n~~~~~\n#####");
        round_trip("#####\n#####\n#####\n#####\n#####");
        round_trip(".....\n..#..\n.....\n.....\n.....");
        round_trip("S~~~~\n~~~~~\n~~~~~\n~~~~~\n~~~~E");
    }

    #[test]
    fn json_round_trip_uses_camel_case() {
        let g = Grid::from_layout("S~\n#E").unwrap();
        let json = serialize(&g).to_json().unwrap();
        assert!(json.contains("\"isWall\""));
        assert!(json.contains("\"isStart\""));
        let back = Snapshot::from_json(&json).unwrap();
        assert_eq!(deserialize(&back, g.dims()).unwrap(), g);
    }

    #[test]
    fn missing_weight_defaults_to_one() {
        let json = r#"{"rows":1,"cols":2,"cells":[
            {"isWall":false,"isStart":true,"isEnd":false},
            {"isWall":false,"isStart":false,"isEnd":true,"weight":5}
        ]}"#;
        let snap = Snapshot::from_json(json).unwrap();
        assert_eq!(snap.cells[0].weight, 1);
        assert_eq!(snap.cells[1].weight, 5);
    }

    #[test]
    fn oversized_weight_is_rejected() {
        let g = Grid::from_layout("S....\n.....\n.....\n.....\n....E").unwrap();
        let mut snap = serialize(&g);
        snap.cells[12].weight = u32::MAX - 1;
        assert!(matches!(
            deserialize(&snap, g.dims()),
            Err(PersistenceError::InvalidSnapshot(LayoutError::WeightOutOfRange {
                weight,
                ..
            })) if weight == u32::MAX - 1
        ));
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        let g = Grid::from_layout(".....\n.....\n.....\n.....\n.....").unwrap();
        let snap = serialize(&g);
        let err = deserialize(&snap, Dims::new(6, 6)).unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::ShapeMismatch { expected, found }
                if expected == Dims::new(6, 6) && found == Dims::new(5, 5)
        ));
    }

    #[test]
    fn conflicting_flags_are_rejected() {
        let g = Grid::from_layout("...\n...").unwrap();
        let mut snap = serialize(&g);
        snap.cells[4].is_wall = true;
        snap.cells[4].is_start = true;
        assert!(matches!(
            deserialize(&snap, g.dims()),
            Err(PersistenceError::ConflictingRoles(p)) if p == Pos::new(1, 1)
        ));
    }

    #[test]
    fn bad_cell_count_and_duplicate_start() {
        let g = Grid::from_layout("S..\n...").unwrap();
        let mut short = serialize(&g);
        short.cells.pop();
        assert!(matches!(
            deserialize(&short, g.dims()),
            Err(PersistenceError::InvalidSnapshot(LayoutError::CellCount { .. }))
        ));

        let mut twice = serialize(&g);
        twice.cells[5].is_start = true;
        assert!(matches!(
            deserialize(&twice, g.dims()),
            Err(PersistenceError::InvalidSnapshot(LayoutError::DuplicateStart { .. }))
        ));
    }
}
