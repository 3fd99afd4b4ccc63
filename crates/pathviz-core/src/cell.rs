//! The [`Cell`] type: the durable state of one grid position.

use crate::config::{BASE_WEIGHT, HEAVY_WEIGHT};

/// The exclusive role a cell plays on the grid.
///
/// Start, end and wall are mutually exclusive, so they are one enum rather
/// than three flags.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    /// Plain traversable terrain.
    #[default]
    Open,
    Start,
    End,
    /// Excluded from traversal.
    Wall,
}

/// Durable cell state: role and traversal weight.
///
/// Search bookkeeping (visited, distance, predecessor) lives in a per-run
/// side table, not here.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub role: Role,
    pub weight: u32,
}

impl Cell {
    /// Set the role (builder).
    #[inline]
    pub const fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Set the weight (builder).
    #[inline]
    pub const fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    #[inline]
    pub const fn is_start(self) -> bool {
        matches!(self.role, Role::Start)
    }

    #[inline]
    pub const fn is_end(self) -> bool {
        matches!(self.role, Role::End)
    }

    #[inline]
    pub const fn is_wall(self) -> bool {
        matches!(self.role, Role::Wall)
    }

    /// Whether the cell carries the elevated terrain weight.
    #[inline]
    pub const fn is_weighted(self) -> bool {
        self.weight > BASE_WEIGHT
    }

    /// Flip between the base and the elevated weight.
    #[inline]
    pub(crate) fn flip_weight(&mut self) {
        self.weight = if self.weight == BASE_WEIGHT {
            HEAVY_WEIGHT
        } else {
            BASE_WEIGHT
        };
    }
}

impl Default for Cell {
    #[inline]
    fn default() -> Self {
        Self {
            role: Role::Open,
            weight: BASE_WEIGHT,
        }
    }
}
