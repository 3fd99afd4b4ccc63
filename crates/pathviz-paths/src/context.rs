use pathviz_core::{Dims, Pos};

/// Sentinel value meaning "distance not yet known".
pub const UNREACHABLE: u32 = u32::MAX;

/// Per-run search bookkeeping, keyed by cell index.
///
/// Lives beside the durable [`Grid`](pathviz_core::Grid), not inside it, and
/// is reset before every run. Predecessors are plain indices into the same
/// table, never references to cells.
#[derive(Debug, Clone, Default)]
pub struct SearchContext {
    dims: Dims,
    pub(crate) visited: Vec<bool>,
    pub(crate) distance: Vec<u32>,
    pub(crate) predecessor: Vec<Option<usize>>,
}

impl SearchContext {
    pub fn new(dims: Dims) -> Self {
        let mut ctx = Self::default();
        ctx.reset(dims);
        ctx
    }

    /// Clear every field for a grid of `dims`: nothing visited, every
    /// distance unknown, no predecessors.
    pub fn reset(&mut self, dims: Dims) {
        let len = dims.len();
        self.dims = dims;
        self.visited.clear();
        self.visited.resize(len, false);
        self.distance.clear();
        self.distance.resize(len, UNREACHABLE);
        self.predecessor.clear();
        self.predecessor.resize(len, None);
    }

    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    #[inline]
    pub fn is_visited(&self, p: Pos) -> bool {
        self.dims.index(p).is_some_and(|i| self.visited[i])
    }

    /// Tentative (or settled) distance of `p`; `None` while unknown.
    #[inline]
    pub fn distance(&self, p: Pos) -> Option<u32> {
        self.dims
            .index(p)
            .map(|i| self.distance[i])
            .filter(|&d| d != UNREACHABLE)
    }

    #[inline]
    pub fn predecessor(&self, p: Pos) -> Option<Pos> {
        let i = self.dims.index(p)?;
        self.predecessor[i].map(|j| self.dims.pos(j))
    }

    /// Number of cells settled so far.
    pub fn visited_count(&self) -> usize {
        self.visited.iter().filter(|&&v| v).count()
    }
}
