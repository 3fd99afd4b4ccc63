use pathviz_core::{Dims, Grid, Pos};

use crate::context::{SearchContext, UNREACHABLE};
use crate::frontier::Frontier;
use crate::path::reconstruct;
use crate::traits::WeightedPather;

/// One observable step of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEvent {
    /// A cell other than start or end was settled.
    Visited(Pos),
    /// The end cell was settled at the given total weight.
    Found { distance: u32 },
    /// The frontier ran dry before the end was reached.
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Found,
    Exhausted,
}

/// An incremental Dijkstra search from one start cell to one end cell.
///
/// Each call to [`step`](Dijkstra::step) settles cells until one worth
/// showing comes up, and returns it. A settled cell's neighbors are relaxed
/// at the *next* step, so the pather is consulted only after the caller has
/// had a chance to edit the grid in between.
#[derive(Debug)]
pub struct Dijkstra {
    ctx: SearchContext,
    frontier: Frontier,
    start: Pos,
    end: Pos,
    status: Status,
    /// Settled cell whose neighbors have not been relaxed yet.
    pending: Option<usize>,
    nbuf: Vec<Pos>,
}

impl Dijkstra {
    /// Prepare a search over a grid of `dims`.
    pub fn new(dims: Dims, start: Pos, end: Pos) -> Self {
        let mut d = Self {
            ctx: SearchContext::default(),
            frontier: Frontier::default(),
            start,
            end,
            status: Status::Running,
            pending: None,
            nbuf: Vec::with_capacity(4),
        };
        d.restart(dims, start, end);
        d
    }

    /// Reset all search state and seed the frontier with `start` alone.
    pub fn restart(&mut self, dims: Dims, start: Pos, end: Pos) {
        self.ctx.reset(dims);
        self.frontier.clear();
        self.start = start;
        self.end = end;
        self.pending = None;
        self.status = Status::Running;
        match dims.index(start) {
            Some(si) => {
                self.ctx.distance[si] = 0;
                self.frontier.push(si, 0);
            }
            None => self.status = Status::Exhausted,
        }
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn start(&self) -> Pos {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Pos {
        self.end
    }

    /// Search bookkeeping of this run.
    #[inline]
    pub fn context(&self) -> &SearchContext {
        &self.ctx
    }

    /// Number of entries waiting in the frontier, stale copies included.
    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Total weight of the shortest path, once found.
    pub fn distance(&self) -> Option<u32> {
        match self.status {
            Status::Found => self.ctx.distance(self.end),
            _ => None,
        }
    }

    /// Cells strictly between start and end along the shortest path,
    /// ordered from the end backwards. Empty unless the end was found.
    pub fn path(&self) -> Vec<Pos> {
        match self.status {
            Status::Found => reconstruct(&self.ctx, self.start, self.end),
            _ => Vec::new(),
        }
    }

    /// Advance the search to its next observable event.
    ///
    /// Returns `None` once the search has finished.
    pub fn step<P: WeightedPather>(&mut self, pather: &P) -> Option<SearchEvent> {
        if self.status != Status::Running {
            return None;
        }
        let dims = self.ctx.dims();
        if let Some(ci) = self.pending.take() {
            // Walled since it was settled: a dead end.
            if pather.passable(dims.pos(ci)) {
                self.relax(ci, pather);
            }
        }

        loop {
            let Some((ci, dist)) = self.frontier.pop() else {
                self.status = Status::Exhausted;
                return Some(SearchEvent::Exhausted);
            };
            // Stale duplicate, superseded by a shorter entry or already settled.
            if self.ctx.visited[ci] || dist != self.ctx.distance[ci] {
                continue;
            }
            let cp = dims.pos(ci);
            if !pather.passable(cp) {
                // Walled while queued. Forget the tentative route so the cell
                // can be queued again if the wall is cleared.
                self.ctx.distance[ci] = UNREACHABLE;
                self.ctx.predecessor[ci] = None;
                continue;
            }
            self.ctx.visited[ci] = true;

            if cp == self.end {
                self.status = Status::Found;
                return Some(SearchEvent::Found {
                    distance: self.ctx.distance[ci],
                });
            }
            if cp == self.start {
                self.relax(ci, pather);
                continue;
            }
            self.pending = Some(ci);
            return Some(SearchEvent::Visited(cp));
        }
    }

    fn relax<P: WeightedPather>(&mut self, ci: usize, pather: &P) {
        let dims = self.ctx.dims();
        let cp = dims.pos(ci);
        let current = self.ctx.distance[ci];

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        pather.neighbors(cp, &mut nbuf);

        for &np in nbuf.iter() {
            let Some(ni) = dims.index(np) else {
                continue;
            };
            if self.ctx.visited[ni] {
                continue;
            }
            let tentative = current.saturating_add(pather.cost(cp, np));
            if tentative < self.ctx.distance[ni] {
                self.ctx.distance[ni] = tentative;
                self.ctx.predecessor[ni] = Some(ci);
                self.frontier.push(ni, tentative);
            }
        }

        self.nbuf = nbuf;
    }
}

/// Result of a search run to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    /// Settled cells in order, start and end excluded.
    pub visited: Vec<Pos>,
    /// Shortest total weight, or `None` when no path exists.
    pub distance: Option<u32>,
    /// Cells between start and end, ordered from the end backwards.
    pub path: Vec<Pos>,
}

/// Run a search on `grid` from its start to its end without pausing.
///
/// Returns `None` if either endpoint is missing.
pub fn shortest_path(grid: &Grid) -> Option<SearchReport> {
    let (start, end) = (grid.start()?, grid.end()?);
    let mut search = Dijkstra::new(grid.dims(), start, end);
    let mut visited = Vec::new();
    while let Some(ev) = search.step(grid) {
        if let SearchEvent::Visited(p) = ev {
            visited.push(p);
        }
    }
    Some(SearchReport {
        visited,
        distance: search.distance(),
        path: search.path(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::manhattan;
    use pathviz_core::{Cell, Role};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn open5(start: Pos, end: Pos) -> Grid {
        let mut g = Grid::new(Dims::square(5));
        g.toggle_wall_or_role(start).unwrap();
        g.toggle_wall_or_role(end).unwrap();
        g
    }

    /// Exhaustive search over every simple path; only viable on tiny grids.
    fn brute_force(g: &Grid, start: Pos, end: Pos) -> Option<u32> {
        fn go(g: &Grid, p: Pos, end: Pos, cost: u32, seen: &mut [bool], best: &mut Option<u32>) {
            if best.is_some_and(|b| cost >= b) {
                return;
            }
            if p == end {
                *best = Some(cost);
                return;
            }
            for n in p.neighbors_4() {
                let Some(i) = g.dims().index(n) else {
                    continue;
                };
                if seen[i] || !g.is_passable(n) {
                    continue;
                }
                seen[i] = true;
                go(g, n, end, cost + g.weight(n), seen, best);
                seen[i] = false;
            }
        }
        let mut seen = vec![false; g.dims().len()];
        let mut best = None;
        if let Some(si) = g.dims().index(start) {
            seen[si] = true;
        }
        go(g, start, end, 0, &mut seen, &mut best);
        best
    }

    fn random_grid(rng: &mut StdRng) -> Grid {
        let dims = Dims::square(5);
        let mut cells: Vec<Cell> = (0..dims.len())
            .map(|_| {
                let c = Cell::default();
                if rng.random_bool(0.3) {
                    c.with_role(Role::Wall)
                } else if rng.random_bool(0.3) {
                    c.with_weight(5)
                } else {
                    c
                }
            })
            .collect();
        let s = rng.random_range(0..dims.len());
        let mut e = rng.random_range(0..dims.len());
        while e == s {
            e = rng.random_range(0..dims.len());
        }
        cells[s].role = Role::Start;
        cells[e].role = Role::End;
        Grid::from_cells(dims, cells).unwrap()
    }

    /// The path is a chain of orthogonal steps from start to end whose
    /// entered weights add up to `distance`.
    fn assert_valid_path(g: &Grid, report: &SearchReport) {
        let (start, end) = (g.start().unwrap(), g.end().unwrap());
        let mut chain = vec![end];
        chain.extend(report.path.iter().copied());
        chain.push(start);
        let mut total = 0;
        for w in chain.windows(2) {
            assert_eq!(manhattan(w[0], w[1]), 1, "non-adjacent step {:?}", w);
            assert!(g.is_passable(w[0]));
            total += g.weight(w[0]);
        }
        assert_eq!(Some(total), report.distance);
        assert!(!report.path.contains(&start));
        assert!(!report.path.contains(&end));
    }

    #[test]
    fn open_grid_5x5_corner_to_corner() {
        let g = open5(Pos::new(0, 0), Pos::new(4, 4));
        let mut search = Dijkstra::new(g.dims(), Pos::new(0, 0), Pos::new(4, 4));
        let mut events = 0;
        while let Some(ev) = search.step(&g) {
            if matches!(ev, SearchEvent::Visited(_)) {
                events += 1;
            }
        }
        assert_eq!(search.status(), Status::Found);
        assert_eq!(search.context().visited_count(), 25);
        assert_eq!(events, 23);
        assert_eq!(search.distance(), Some(8));
        assert_eq!(search.path().len(), 7);
    }

    #[test]
    fn uniform_open_grids_match_manhattan() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let s = Pos::new(rng.random_range(0..5), rng.random_range(0..5));
            let mut e = s;
            while e == s {
                e = Pos::new(rng.random_range(0..5), rng.random_range(0..5));
            }
            let report = shortest_path(&open5(s, e)).unwrap();
            assert_eq!(report.distance, Some(manhattan(s, e)));
            assert_eq!(report.path.len() as u32, manhattan(s, e) - 1);
        }
    }

    #[test]
    fn random_layouts_match_brute_force() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut found = 0;
        for _ in 0..200 {
            let g = random_grid(&mut rng);
            let report = shortest_path(&g).unwrap();
            let expect = brute_force(&g, g.start().unwrap(), g.end().unwrap());
            assert_eq!(report.distance, expect, "layout {:?}", g.cells());
            if expect.is_some() {
                found += 1;
                assert_valid_path(&g, &report);
            } else {
                assert!(report.path.is_empty());
            }
        }
        assert!(found > 0);
    }

    #[test]
    fn wall_column_blocks_everything() {
        let g = Grid::from_layout(
            "..#..\n\
             ..#..\n\
             S.#.E\n\
             ..#..\n\
             ..#..",
        )
        .unwrap();
        let mut search = Dijkstra::new(g.dims(), g.start().unwrap(), g.end().unwrap());
        let mut last = None;
        while let Some(ev) = search.step(&g) {
            last = Some(ev);
        }
        assert_eq!(last, Some(SearchEvent::Exhausted));
        assert_eq!(search.status(), Status::Exhausted);
        assert!(search.path().is_empty());
        assert_eq!(search.distance(), None);
        assert!(!search.context().is_visited(Pos::new(2, 4)));
        // Every cell left of the wall was settled.
        assert_eq!(search.context().visited_count(), 10);
    }

    #[test]
    fn weights_divert_the_path() {
        let g = Grid::from_layout(
            "S~~~E\n\
             .....",
        )
        .unwrap();
        let report = shortest_path(&g).unwrap();
        // Cheaper to go around the heavy cells through the bottom row.
        assert_eq!(report.distance, Some(6));
        assert!(report.path.iter().all(|p| p.row == 1));
    }

    #[test]
    fn start_and_end_never_reported_visited() {
        let g = open5(Pos::new(2, 2), Pos::new(0, 4));
        let report = shortest_path(&g).unwrap();
        assert!(!report.visited.contains(&Pos::new(2, 2)));
        assert!(!report.visited.contains(&Pos::new(0, 4)));
        let mut dedup = report.visited.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), report.visited.len());
    }

    #[test]
    fn visitation_order_is_deterministic() {
        let g = Grid::from_layout(
            ".~...\n\
             .#.#.\n\
             ..S..\n\
             .#.#.\n\
             ...~E",
        )
        .unwrap();
        let a = shortest_path(&g).unwrap();
        let b = shortest_path(&g).unwrap();
        assert_eq!(a, b);
        // The first expansion follows the +col, +row, -col, -row order.
        assert_eq!(&a.visited[..4], &[
            Pos::new(2, 3),
            Pos::new(3, 2),
            Pos::new(2, 1),
            Pos::new(1, 2),
        ]);
    }

    #[test]
    fn walls_placed_mid_run_are_honoured() {
        let mut g = open5(Pos::new(0, 0), Pos::new(0, 4));
        let mut search = Dijkstra::new(g.dims(), Pos::new(0, 0), Pos::new(0, 4));
        assert_eq!(search.step(&g), Some(SearchEvent::Visited(Pos::new(0, 1))));
        // (0, 1) is settled but not yet expanded: block its way east.
        g.toggle_wall_or_role(Pos::new(0, 2)).unwrap();
        while search.step(&g).is_some() {}
        assert_eq!(search.status(), Status::Found);
        assert_eq!(search.distance(), Some(6));
        assert!(!search.path().contains(&Pos::new(0, 2)));
    }

    #[test]
    fn wall_on_queued_cell_is_skipped() {
        let mut g = Grid::from_layout("S....\n.####\n.....\n.....\n....E").unwrap();
        let mut search = Dijkstra::new(g.dims(), Pos::new(0, 0), Pos::new(4, 4));
        assert_eq!(search.step(&g), Some(SearchEvent::Visited(Pos::new(0, 1))));
        // (1, 0) is queued but not settled; walling it cuts the only route.
        g.toggle_wall_or_role(Pos::new(1, 0)).unwrap();
        let mut visited = Vec::new();
        while let Some(ev) = search.step(&g) {
            if let SearchEvent::Visited(p) = ev {
                visited.push(p);
            }
        }
        assert_eq!(search.status(), Status::Exhausted);
        assert!(!visited.contains(&Pos::new(1, 0)));
        assert!(!search.context().is_visited(Pos::new(1, 0)));
        assert_eq!(search.distance(), None);
        assert!(search.path().is_empty());
    }

    #[test]
    fn walled_settled_cell_is_not_expanded() {
        let mut g = open5(Pos::new(0, 0), Pos::new(4, 4));
        let mut search = Dijkstra::new(g.dims(), Pos::new(0, 0), Pos::new(4, 4));
        assert_eq!(search.step(&g), Some(SearchEvent::Visited(Pos::new(0, 1))));
        g.toggle_wall_or_role(Pos::new(0, 1)).unwrap();
        while search.step(&g).is_some() {}
        assert_eq!(search.status(), Status::Found);
        assert_eq!(search.distance(), Some(8));
        let ctx = search.context();
        assert!(g.dims().iter().all(|p| ctx.predecessor(p) != Some(Pos::new(0, 1))));
        assert!(!search.path().contains(&Pos::new(0, 1)));
    }

    #[test]
    fn walled_queued_cell_forgets_its_route() {
        let mut g = Grid::from_layout("S....\n.####\n.....\n.....\n....E").unwrap();
        let mut search = Dijkstra::new(g.dims(), Pos::new(0, 0), Pos::new(4, 4));
        assert_eq!(search.step(&g), Some(SearchEvent::Visited(Pos::new(0, 1))));
        g.toggle_wall_or_role(Pos::new(1, 0)).unwrap();
        // Skips the walled (1, 0) on the way to settling (0, 2).
        assert_eq!(search.step(&g), Some(SearchEvent::Visited(Pos::new(0, 2))));
        assert!(!search.context().is_visited(Pos::new(1, 0)));
        assert_eq!(search.context().distance(Pos::new(1, 0)), None);
        // Nothing settled is left to reach it from.
        g.toggle_wall_or_role(Pos::new(1, 0)).unwrap();
        while search.step(&g).is_some() {}
        assert_eq!(search.status(), Status::Exhausted);
    }

    #[test]
    fn restart_discards_previous_run() {
        let g = open5(Pos::new(0, 0), Pos::new(4, 4));
        let mut search = Dijkstra::new(g.dims(), Pos::new(0, 0), Pos::new(4, 4));
        while search.step(&g).is_some() {}
        search.restart(g.dims(), Pos::new(0, 0), Pos::new(4, 4));
        assert_eq!(search.status(), Status::Running);
        assert_eq!(search.context().visited_count(), 0);
        assert_eq!(search.frontier_len(), 1);
        assert_eq!(search.path(), Vec::new());
        while search.step(&g).is_some() {}
        assert_eq!(search.distance(), Some(8));
    }

    #[test]
    fn missing_endpoint_yields_no_report() {
        let mut g = Grid::new(Dims::square(5));
        assert!(shortest_path(&g).is_none());
        g.toggle_wall_or_role(Pos::new(0, 0)).unwrap();
        assert!(shortest_path(&g).is_none());
    }

    #[test]
    fn finished_search_stays_finished() {
        let g = open5(Pos::new(0, 0), Pos::new(0, 1));
        let mut search = Dijkstra::new(g.dims(), Pos::new(0, 0), Pos::new(0, 1));
        assert_eq!(search.step(&g), Some(SearchEvent::Found { distance: 1 }));
        assert_eq!(search.step(&g), None);
        assert!(search.path().is_empty());
    }
}
