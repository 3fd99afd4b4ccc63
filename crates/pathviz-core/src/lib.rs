//! **pathviz-core**: core types of the pathviz shortest-path visualizer.
//!
//! This crate provides the grid model edited by the user, geometry
//! primitives, the display sink through which every visual change is
//! announced, and the configuration limits shared by the other crates.

pub mod cell;
pub mod config;
pub mod display;
pub mod error;
pub mod geom;
pub mod grid;

pub use cell::{Cell, Role};
pub use config::{Speed, VizConfig};
pub use display::{CellClass, CellDisplay, CellId, DisplayCmd, Recorder};
pub use error::{InputError, LayoutError};
pub use geom::{Dims, Pos};
pub use grid::{Grid, Toggle, WeightToggle};
