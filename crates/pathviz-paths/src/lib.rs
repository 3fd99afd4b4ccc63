//! Weighted shortest-path search over pathviz grids.
//!
//! - **Topology**: [`passable_neighbors`] resolves the orthogonal,
//!   wall-free neighbors of a cell against the live grid.
//! - **Search**: [`Dijkstra`] is a stepping uniform-cost search that reports
//!   each settled cell as a [`SearchEvent`]; [`shortest_path`] runs one to
//!   completion.
//! - **Reconstruction**: [`reconstruct`] walks predecessor links back from
//!   the end cell.
//!
//! Per-run bookkeeping lives in a [`SearchContext`] side table, never in the
//! grid itself.

mod context;
mod dijkstra;
mod distance;
mod frontier;
mod path;
mod topology;
mod traits;

pub use context::{SearchContext, UNREACHABLE};
pub use dijkstra::{Dijkstra, SearchEvent, SearchReport, Status, shortest_path};
pub use distance::manhattan;
pub use path::reconstruct;
pub use topology::passable_neighbors;
pub use traits::{Pather, WeightedPather};
